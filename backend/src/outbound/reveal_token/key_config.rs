//! Reveal key loading and validation.
//!
//! The key file holds raw secret bytes from which the cookie [`Key`] (and in
//! turn the token cipher key) is derived. Tokens only survive a restart if
//! the same file is read again, so the lifecycle is:
//!
//! 1. Read `REVEAL_KEY_FILE` (default `/var/run/secrets/reveal_key`).
//! 2. If it does not exist and generation is allowed, write fresh random
//!    bytes there and use them.
//! 3. In debug builds a failed write degrades to an in-memory key; release
//!    builds fail instead.
//!
//! Generation is allowed by default in debug builds and must be opted into
//! with `REVEAL_KEY_GENERATE=1` in release builds.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use mockable::Env;
use rand::Rng;
use tracing::{info, warn};
use zeroize::Zeroize;

/// Environment variable naming the key file.
pub const KEY_FILE_ENV: &str = "REVEAL_KEY_FILE";
/// Environment variable toggling key generation when the file is missing.
pub const GENERATE_ENV: &str = "REVEAL_KEY_GENERATE";
/// Shortest key accepted in any build.
pub const KEY_MIN_LEN: usize = 32;
/// Shortest key accepted in release builds.
pub const RELEASE_KEY_MIN_LEN: usize = 64;

const KEY_DEFAULT_PATH: &str = "/var/run/secrets/reveal_key";
const GENERATED_KEY_LEN: usize = 64;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode for key validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate invalid toggles and unwritable key paths.
    Debug,
    /// Release builds reject both.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::outbound::reveal_token::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    fn min_key_len(self) -> usize {
        match self {
            Self::Debug => KEY_MIN_LEN,
            Self::Release => RELEASE_KEY_MIN_LEN,
        }
    }
}

/// Where the active key came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeySource {
    /// Read from an existing key file.
    Loaded,
    /// Generated and persisted to the key file.
    Generated,
    /// Generated but held in memory only; links break on restart.
    Ephemeral,
}

/// The reveal key together with its provenance.
pub struct RevealKeySettings {
    /// Key material for the token cipher.
    pub key: Key,
    /// Key file that was read or written.
    pub path: PathBuf,
    /// How the key was obtained.
    pub source: KeySource,
}

/// Errors raised while loading the reveal key.
#[derive(thiserror::Error, Debug)]
pub enum KeyConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
        /// Accepted forms.
        expected: &'static str,
    },
    /// Reading the key file failed.
    #[error("failed to read reveal key at {path}: {source}")]
    KeyRead {
        /// Key file location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Persisting a generated key failed.
    #[error("failed to write reveal key to {path}: {source}")]
    KeyWrite {
        /// Key file location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The key file is shorter than the build mode allows.
    #[error("reveal key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Key file location.
        path: PathBuf,
        /// Bytes found.
        length: usize,
        /// Bytes required.
        min_len: usize,
    },
}

/// Load, or create, the reveal key described by the environment.
///
/// # Errors
///
/// See [`KeyConfigError`]. Debug builds never fail on an invalid
/// `REVEAL_KEY_GENERATE` value or an unwritable key path.
///
/// # Examples
///
/// ```rust
/// use backend::outbound::reveal_token::{reveal_key_from_env, BuildMode, KeySource};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("reveal_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let key_path = key_path.to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "REVEAL_KEY_FILE" => Some(key_path.clone()),
///     _ => None,
/// });
///
/// let settings = reveal_key_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.source, KeySource::Loaded);
///
/// std::fs::remove_file(&settings.path)?;
/// # Ok(())
/// # }
/// ```
pub fn reveal_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<RevealKeySettings, KeyConfigError> {
    let allow_generate = allow_generate_from_env(env, mode)?;
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| KEY_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(bytes) => load_key(path, bytes, mode),
        Err(error) if error.kind() == io::ErrorKind::NotFound && allow_generate => {
            generate_key(path, mode)
        }
        Err(source) => Err(KeyConfigError::KeyRead { path, source }),
    }
}

fn allow_generate_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, KeyConfigError> {
    let default = mode.is_debug();
    let Some(value) = env.string(GENERATE_ENV) else {
        return Ok(default);
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid REVEAL_KEY_GENERATE; defaulting to enabled");
            Ok(default)
        }
        None => Err(KeyConfigError::InvalidEnv {
            name: GENERATE_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn load_key(
    path: PathBuf,
    mut bytes: Vec<u8>,
    mode: BuildMode,
) -> Result<RevealKeySettings, KeyConfigError> {
    let length = bytes.len();
    let min_len = mode.min_key_len();
    if length < min_len {
        bytes.zeroize();
        return Err(KeyConfigError::KeyTooShort {
            path,
            length,
            min_len,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(RevealKeySettings {
        key,
        path,
        source: KeySource::Loaded,
    })
}

fn generate_key(path: PathBuf, mode: BuildMode) -> Result<RevealKeySettings, KeyConfigError> {
    let mut bytes = vec![0_u8; GENERATED_KEY_LEN];
    rand::rng().fill(bytes.as_mut_slice());
    let key = Key::derive_from(&bytes);
    let written = persist_key(&path, &bytes);
    bytes.zeroize();

    match written {
        Ok(()) => {
            info!(path = %path.display(), "generated new reveal key");
            Ok(RevealKeySettings {
                key,
                path,
                source: KeySource::Generated,
            })
        }
        Err(error) if mode.is_debug() => {
            warn!(
                path = %path.display(),
                error = %error,
                "could not persist reveal key; links will not survive a restart (dev only)"
            );
            Ok(RevealKeySettings {
                key,
                path,
                source: KeySource::Ephemeral,
            })
        }
        Err(source) => Err(KeyConfigError::KeyWrite { path, source }),
    }
}

fn persist_key(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;

//! Temporary reveal key files for tests.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A key file path under the system temp directory, removed on drop.
#[derive(Debug)]
pub struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    /// A path with no file behind it yet.
    #[must_use]
    pub fn missing() -> Self {
        Self {
            path: std::env::temp_dir().join(format!("reveal-key-{}", Uuid::new_v4())),
        }
    }

    /// A key file holding `len` bytes.
    ///
    /// # Errors
    /// Propagates the write failure.
    pub fn with_len(len: usize) -> io::Result<Self> {
        let file = Self::missing();
        std::fs::write(&file.path, vec![b'k'; len])?;
        Ok(file)
    }

    /// Location of the key file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path rendered for an environment variable.
    #[must_use]
    pub fn env_value(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

//! Unit tests for reveal key loading.

use super::*;
use crate::outbound::reveal_token::key_fingerprint;
use crate::outbound::reveal_token::test_utils::TempKeyFile;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn env_for(file: &TempKeyFile, generate: Option<&str>) -> MockEnv {
    let mut vars = HashMap::from([(KEY_FILE_ENV, file.env_value())]);
    if let Some(value) = generate {
        vars.insert(GENERATE_ENV, value.to_owned());
    }
    mock_env(vars)
}

fn expect_error(result: Result<RevealKeySettings, KeyConfigError>) -> KeyConfigError {
    match result {
        Ok(settings) => panic!("expected failure, got key from {:?}", settings.source),
        Err(error) => error,
    }
}

#[rstest]
#[case(BuildMode::Debug, KEY_MIN_LEN)]
#[case(BuildMode::Release, RELEASE_KEY_MIN_LEN)]
fn existing_key_files_are_loaded(#[case] mode: BuildMode, #[case] len: usize) {
    let file = TempKeyFile::with_len(len).expect("key file");
    let settings = reveal_key_from_env(&env_for(&file, None), mode).expect("key loads");

    assert_eq!(settings.source, KeySource::Loaded);
    assert_eq!(settings.path, file.path());
}

#[rstest]
#[case(BuildMode::Debug, KEY_MIN_LEN - 1)]
#[case(BuildMode::Release, RELEASE_KEY_MIN_LEN - 1)]
#[case(BuildMode::Release, KEY_MIN_LEN)]
fn short_keys_are_rejected(#[case] mode: BuildMode, #[case] len: usize) {
    let file = TempKeyFile::with_len(len).expect("key file");
    let error = expect_error(reveal_key_from_env(&env_for(&file, None), mode));

    assert!(matches!(
        error,
        KeyConfigError::KeyTooShort { length, .. } if length == len
    ));
}

#[rstest]
fn loading_the_same_file_twice_yields_the_same_key() {
    let file = TempKeyFile::with_len(RELEASE_KEY_MIN_LEN).expect("key file");
    let first = reveal_key_from_env(&env_for(&file, None), BuildMode::Release).expect("first");
    let second = reveal_key_from_env(&env_for(&file, None), BuildMode::Release).expect("second");

    assert_eq!(key_fingerprint(&first.key), key_fingerprint(&second.key));
}

#[rstest]
fn debug_generates_and_persists_a_missing_key() {
    let file = TempKeyFile::missing();
    let generated =
        reveal_key_from_env(&env_for(&file, None), BuildMode::Debug).expect("key generated");

    assert_eq!(generated.source, KeySource::Generated);
    let written = std::fs::read(file.path()).expect("key persisted");
    assert_eq!(written.len(), GENERATED_KEY_LEN);

    let reloaded =
        reveal_key_from_env(&env_for(&file, None), BuildMode::Release).expect("key reloads");
    assert_eq!(reloaded.source, KeySource::Loaded);
    assert_eq!(key_fingerprint(&generated.key), key_fingerprint(&reloaded.key));
}

#[rstest]
fn release_requires_opt_in_to_generate() {
    let file = TempKeyFile::missing();
    let error = expect_error(reveal_key_from_env(
        &env_for(&file, None),
        BuildMode::Release,
    ));

    assert!(matches!(error, KeyConfigError::KeyRead { .. }));
    assert!(!file.path().exists());
}

#[rstest]
#[case("1")]
#[case("yes")]
#[case("TRUE")]
fn release_generates_when_opted_in(#[case] flag: &str) {
    let file = TempKeyFile::missing();
    let settings = reveal_key_from_env(&env_for(&file, Some(flag)), BuildMode::Release)
        .expect("key generated");

    assert_eq!(settings.source, KeySource::Generated);
    assert!(file.path().exists());
}

#[rstest]
fn debug_can_opt_out_of_generation() {
    let file = TempKeyFile::missing();
    let error = expect_error(reveal_key_from_env(
        &env_for(&file, Some("0")),
        BuildMode::Debug,
    ));
    assert!(matches!(error, KeyConfigError::KeyRead { .. }));
}

#[rstest]
fn release_rejects_invalid_generate_flag() {
    let file = TempKeyFile::with_len(RELEASE_KEY_MIN_LEN).expect("key file");
    let error = expect_error(reveal_key_from_env(
        &env_for(&file, Some("maybe")),
        BuildMode::Release,
    ));

    assert!(matches!(
        error,
        KeyConfigError::InvalidEnv {
            name: GENERATE_ENV,
            ..
        }
    ));
}

#[rstest]
fn debug_tolerates_invalid_generate_flag() {
    let file = TempKeyFile::missing();
    let settings = reveal_key_from_env(&env_for(&file, Some("maybe")), BuildMode::Debug)
        .expect("debug falls back to generating");
    assert_eq!(settings.source, KeySource::Generated);
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn unwritable_paths_depend_on_build_mode(#[case] mode: BuildMode) {
    let parent = TempKeyFile::missing();
    let path = parent.path().join("nested").join("reveal_key");
    let env = mock_env(HashMap::from([
        (KEY_FILE_ENV, path.to_string_lossy().into_owned()),
        (GENERATE_ENV, "1".to_owned()),
    ]));

    let result = reveal_key_from_env(&env, mode);

    match mode {
        BuildMode::Debug => {
            let settings = result.expect("debug keeps an in-memory key");
            assert_eq!(settings.source, KeySource::Ephemeral);
        }
        BuildMode::Release => {
            assert!(matches!(
                expect_error(result),
                KeyConfigError::KeyWrite { .. }
            ));
        }
    }
}

#[rstest]
fn defaults_to_the_secrets_path() {
    let env = mock_env(HashMap::from([(GENERATE_ENV, "0".to_owned())]));
    let result = reveal_key_from_env(&env, BuildMode::Release);

    match result {
        Ok(settings) => assert_eq!(settings.path, PathBuf::from(KEY_DEFAULT_PATH)),
        Err(KeyConfigError::KeyRead { path, .. } | KeyConfigError::KeyTooShort { path, .. }) => {
            assert_eq!(path, PathBuf::from(KEY_DEFAULT_PATH));
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case("1", Some(true))]
#[case("Y", Some(true))]
#[case("false", Some(false))]
#[case("No", Some(false))]
#[case("", None)]
#[case("2", None)]
fn parse_bool_accepts_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}

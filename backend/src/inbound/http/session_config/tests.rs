//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use uuid::Uuid;

/// Key file in the temporary directory, removed on drop.
struct KeyFile {
    path: PathBuf,
}

impl KeyFile {
    fn with_len(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("microblog-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("key file written");
        Self { path }
    }

    fn path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl Drop for KeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn env_from(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

fn release_vars(key: &KeyFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key.path()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&env_from(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(err) => err,
    }
}

#[rstest]
#[case("1", Some(true))]
#[case("TRUE", Some(true))]
#[case(" yes ", Some(true))]
#[case("y", Some(true))]
#[case("0", Some(false))]
#[case("False", Some(false))]
#[case("no", Some(false))]
#[case("n", Some(false))]
#[case("maybe", None)]
#[case("", None)]
fn parse_bool_accepts_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}

#[rstest]
fn release_accepts_complete_settings() {
    let key = KeyFile::with_len(MIN_KEY_BYTES);

    let settings = session_settings_from_env(&env_from(release_vars(&key)), BuildMode::Release)
        .expect("valid release settings");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.fingerprint().len(), FINGERPRINT_BYTES * 2);
}

#[rstest]
fn same_key_file_yields_same_fingerprint() {
    let key = KeyFile::with_len(MIN_KEY_BYTES);

    let first = session_settings_from_env(&env_from(release_vars(&key)), BuildMode::Release)
        .expect("first load");
    let second = session_settings_from_env(&env_from(release_vars(&key)), BuildMode::Release)
        .expect("second load");

    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggle(#[case] missing: &'static str) {
    let key = KeyFile::with_len(MIN_KEY_BYTES);
    let mut vars = release_vars(&key);
    vars.remove(missing);

    let err = release_error(vars);

    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sometimes")]
fn release_rejects_invalid_toggle(#[case] name: &'static str, #[case] value: &str) {
    let key = KeyFile::with_len(MIN_KEY_BYTES);
    let mut vars = release_vars(&key);
    vars.insert(name, value.to_owned());

    let err = release_error(vars);

    assert!(matches!(
        err,
        SessionConfigError::InvalidEnv { name: found, value: ref found_value, .. }
            if found == name && found_value == value
    ));
}

#[rstest]
fn release_rejects_ephemeral_keys() {
    let key = KeyFile::with_len(MIN_KEY_BYTES);
    let mut vars = release_vars(&key);
    vars.insert(ALLOW_EPHEMERAL_ENV, "1".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_unreadable_key_file() {
    let key = KeyFile::with_len(MIN_KEY_BYTES);
    let mut vars = release_vars(&key);
    vars.insert(
        KEY_FILE_ENV,
        std::env::temp_dir()
            .join(format!("microblog-absent-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
    );

    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn release_rejects_short_key() {
    let key = KeyFile::with_len(MIN_KEY_BYTES - 1);

    let err = release_error(release_vars(&key));

    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, min_len, .. }
            if length == MIN_KEY_BYTES - 1 && min_len == MIN_KEY_BYTES
    ));
}

#[rstest]
fn release_rejects_same_site_none_without_secure_cookie() {
    let key = KeyFile::with_len(MIN_KEY_BYTES);
    let mut vars = release_vars(&key);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_allows_same_site_none_with_secure_cookie() {
    let key = KeyFile::with_len(MIN_KEY_BYTES);
    let mut vars = release_vars(&key);
    vars.insert(SAMESITE_ENV, "none".to_owned());

    let settings = session_settings_from_env(&env_from(vars), BuildMode::Release)
        .expect("secure SameSite=None is allowed");

    assert_eq!(settings.same_site, SameSite::None);
}

#[rstest]
fn debug_defaults_apply_without_any_variables() {
    let settings = session_settings_from_env(&env_from(HashMap::new()), BuildMode::Debug)
        .expect("debug defaults");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_falls_back_on_invalid_values_and_short_key() {
    let key = KeyFile::with_len(8);
    let vars = HashMap::from([
        (KEY_FILE_ENV, key.path()),
        (COOKIE_SECURE_ENV, "perhaps".to_owned()),
        (SAMESITE_ENV, "unexpected".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]);

    let settings =
        session_settings_from_env(&env_from(vars), BuildMode::Debug).expect("debug fallbacks");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_keeps_explicit_insecure_cookie() {
    let vars = HashMap::from([
        (COOKIE_SECURE_ENV, "0".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
    ]);

    let settings =
        session_settings_from_env(&env_from(vars), BuildMode::Debug).expect("debug settings");

    assert!(!settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

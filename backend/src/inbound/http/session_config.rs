//! Session cookie configuration read from the process environment.
//!
//! Release builds insist on explicit, valid toggles and a real signing key.
//! Debug builds fall back to development defaults and log a warning for each
//! missing or malformed value so local runs need no setup.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroize;

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

const DEFAULT_KEY_PATH: &str = "/var/run/secrets/microblog_session_key";
const MIN_KEY_BYTES: usize = 64;
const FINGERPRINT_BYTES: usize = 8;

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode steering how strictly session settings are validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or invalid values fall back to defaults with a warning.
    Debug,
    /// Missing or invalid values are errors.
    Release,
}

impl BuildMode {
    /// Mode of the running binary, derived from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use microblog::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) {
    ///     BuildMode::Debug
    /// } else {
    ///     BuildMode::Release
    /// };
    /// assert_eq!(BuildMode::current(), expected);
    /// ```
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Return `fallback` in debug builds after running `warn_fn`, or `error`
    /// in release builds.
    fn lenient<T>(
        self,
        fallback: T,
        error: SessionConfigError,
        warn_fn: impl FnOnce(),
    ) -> Result<T, SessionConfigError> {
        match self {
            Self::Debug => {
                warn_fn();
                Ok(fallback)
            }
            Self::Release => Err(error),
        }
    }
}

/// Validated session cookie settings.
pub struct SessionSettings {
    /// Key signing and encrypting the session cookie.
    pub key: Key,
    /// Whether the cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// `SameSite` policy for the cookie.
    pub same_site: SameSite,
}

impl SessionSettings {
    /// Short fingerprint of the active key; see [`key_fingerprint`].
    #[must_use]
    pub fn fingerprint(&self) -> String {
        key_fingerprint(&self.key)
    }
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required variable is not set.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is set to an unsupported value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The key file could not be read.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file holds fewer bytes than a release build accepts.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` without a secure cookie.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Ephemeral keys requested in a release build.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read session settings from `env`.
///
/// Recognised variables: `SESSION_KEY_FILE`, `SESSION_COOKIE_SECURE`,
/// `SESSION_SAMESITE` and `SESSION_ALLOW_EPHEMERAL`.
///
/// # Errors
///
/// In [`BuildMode::Release`], any missing or invalid variable, an unreadable
/// or short key file, `SameSite=None` on an insecure cookie, or an ephemeral
/// key request. Debug builds never fail.
///
/// # Examples
///
/// ```rust
/// use microblog::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = read_flag(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = read_same_site(env, mode, cookie_secure)?;
    let allow_ephemeral = read_flag(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = read_key(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Truncated SHA-256 fingerprint of the key's signing half, hex encoded.
///
/// Operators compare fingerprints across instances to confirm which key is
/// live without exposing the key itself.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use microblog::inbound::http::session_config::key_fingerprint;
///
/// let fingerprint = key_fingerprint(&Key::generate());
/// assert_eq!(fingerprint.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.iter().take(FINGERPRINT_BYTES).copied().collect::<Vec<u8>>())
}

fn read_flag<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    fallback: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        return mode.lenient(fallback, SessionConfigError::MissingEnv { name }, || {
            warn!(variable = name, fallback, "session toggle not set; using default");
        });
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => mode.lenient(
            fallback,
            SessionConfigError::InvalidEnv {
                name,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            },
            || warn!(variable = name, %value, fallback, "invalid session toggle; using default"),
        ),
    }
}

fn read_same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = match mode {
        BuildMode::Debug => SameSite::Lax,
        BuildMode::Release => SameSite::Strict,
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        return mode.lenient(
            fallback,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("SESSION_SAMESITE not set; using default"),
        );
    };
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => mode.lenient(SameSite::None, SessionConfigError::InsecureSameSiteNone, || {
            warn!("SESSION_SAMESITE=None on an insecure cookie; browsers may drop it");
        }),
        _ => mode.lenient(
            fallback,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            },
            || warn!(%value, "invalid SESSION_SAMESITE; using default"),
        ),
    }
}

fn read_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| DEFAULT_KEY_PATH.to_owned()),
    );
    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) if mode == BuildMode::Debug || allow_ephemeral => {
            warn!(path = %path.display(), error = %source, "using an ephemeral session key");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };
    let length = bytes.len();
    let result = if length >= MIN_KEY_BYTES {
        Ok(Key::derive_from(&bytes))
    } else {
        mode.lenient(
            Key::generate(),
            SessionConfigError::KeyTooShort {
                path: path.clone(),
                length,
                min_len: MIN_KEY_BYTES,
            },
            || warn!(path = %path.display(), length, "session key too short; using an ephemeral key"),
        )
    };
    bytes.zeroize();
    result
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;

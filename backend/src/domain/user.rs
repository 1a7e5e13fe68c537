//! User data model.
//!
//! Users own posts and likes. The aggregate never mutates them; profile
//! edits go through the user service.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Username was blank.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username length outside the allowed range.
    #[error("username must be between {min} and {max} characters")]
    UsernameLength {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },
    /// Username contained characters outside `[A-Za-z0-9_]`.
    #[error("username may only contain letters, numbers, or underscores")]
    UsernameInvalidCharacters,
    /// Display name was blank.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// Display name shorter than the minimum.
    #[error("display name must be at least {min} characters")]
    DisplayNameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Display name longer than the maximum.
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Display name contained unsupported characters.
    #[error("display name may only contain letters, numbers, spaces, or underscores")]
    DisplayNameInvalidCharacters,
    /// Bio longer than the maximum.
    #[error("bio must be at most {max} characters")]
    BioTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Image URL was blank.
    #[error("image url must not be empty")]
    EmptyImageUrl,
    /// Image URL longer than the maximum.
    #[error("image url must be at most {max} characters")]
    ImageUrlTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::EmptyId`] or
    /// [`UserValidationError::InvalidId`] when `id` is not a bare UUID.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

/// Unique login handle, also used in profile URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`]. Surrounding whitespace is
    /// trimmed first.
    ///
    /// # Errors
    ///
    /// Returns a [`UserValidationError`] describing the first rule broken.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let length = trimmed.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
            return Err(UserValidationError::UsernameLength {
                min: USERNAME_MIN,
                max: USERNAME_MAX,
            });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Minimum allowed length for a display name.
pub const DISPLAY_NAME_MIN: usize = 3;
/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 32;

static DISPLAY_NAME_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn display_name_is_well_formed(display_name: &str) -> bool {
    DISPLAY_NAME_RE
        .get_or_init(|| Regex::new("^[A-Za-z0-9_ ]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(display_name))
}

/// Human readable display name for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    ///
    /// # Errors
    ///
    /// Returns a [`UserValidationError`] describing the first rule broken.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }

        let length = display_name.chars().count();
        if length < DISPLAY_NAME_MIN {
            return Err(UserValidationError::DisplayNameTooShort {
                min: DISPLAY_NAME_MIN,
            });
        }
        if length > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        if !display_name_is_well_formed(&display_name) {
            return Err(UserValidationError::DisplayNameInvalidCharacters);
        }

        Ok(Self(display_name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum allowed length for a bio.
pub const BIO_MAX: usize = 160;

/// Free-form profile blurb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bio(String);

impl Bio {
    /// Validate and construct a [`Bio`]. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::BioTooLong`] past [`BIO_MAX`]
    /// characters.
    pub fn new(bio: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = bio.as_ref().trim();
        if trimmed.chars().count() > BIO_MAX {
            return Err(UserValidationError::BioTooLong { max: BIO_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Bio {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Bio> for String {
    fn from(value: Bio) -> Self {
        value.0
    }
}

impl TryFrom<String> for Bio {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum allowed length for an avatar URL.
pub const IMAGE_URL_MAX: usize = 2048;

/// Location of the user's avatar. Storage of the image itself happens
/// elsewhere; only the reference is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Validate and construct an [`ImageUrl`].
    ///
    /// # Errors
    ///
    /// Returns a [`UserValidationError`] for blank or oversized values.
    pub fn new(url: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = url.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyImageUrl);
        }
        if trimmed.chars().count() > IMAGE_URL_MAX {
            return Err(UserValidationError::ImageUrlTooLong { max: IMAGE_URL_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ImageUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ImageUrl> for String {
    fn from(value: ImageUrl) -> Self {
        value.0
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Public user profile.
///
/// Serialised as `{ id, username, name, bio, imageUrl }`; the password hash
/// never leaves the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct User {
    id: UserId,
    username: Username,
    name: DisplayName,
    bio: Option<Bio>,
    image_url: Option<ImageUrl>,
}

impl User {
    /// Build a new [`User`] from validated components.
    #[must_use]
    pub const fn new(
        id: UserId,
        username: Username,
        name: DisplayName,
        bio: Option<Bio>,
        image_url: Option<ImageUrl>,
    ) -> Self {
        Self {
            id,
            username,
            name,
            bio,
            image_url,
        }
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique login handle.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Display name shown to other users.
    #[must_use]
    pub const fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Optional profile blurb.
    #[must_use]
    pub const fn bio(&self) -> Option<&Bio> {
        self.bio.as_ref()
    }

    /// Optional avatar location.
    #[must_use]
    pub const fn image_url(&self) -> Option<&ImageUrl> {
        self.image_url.as_ref()
    }
}

/// Partial profile edit. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Replacement display name.
    pub name: Option<DisplayName>,
    /// Replacement bio.
    pub bio: Option<Bio>,
    /// Replacement avatar location.
    pub image_url: Option<ImageUrl>,
}

impl ProfileUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.bio.is_none() && self.image_url.is_none()
    }
}

//! User data model and field validation.

use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Mutable user fields, in the order they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    /// Display name.
    Name,
    /// Free-text location.
    Location,
    /// Job title.
    Title,
}

impl UserField {
    /// Field name as it appears in request and response bodies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Location => "location",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`UserId::parse`] for text that is not a 24-digit hex ObjectId.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user id must be a 24 character hex string, got {value:?}")]
pub struct InvalidUserId {
    value: String,
}

impl InvalidUserId {
    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// Accumulated field failures from [`UserProfile::new`].
///
/// Display joins one sentence per field, e.g.
/// `name must not be empty; title must not be empty`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe_empty(.empty))]
pub struct ProfileValidationError {
    empty: Vec<UserField>,
}

impl ProfileValidationError {
    /// Fields that were missing or blank.
    #[must_use]
    pub fn fields(&self) -> &[UserField] {
        &self.empty
    }
}

fn describe_empty(fields: &[UserField]) -> String {
    fields
        .iter()
        .map(|field| format!("{field} must not be empty"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Store-assigned user identifier.
///
/// Wraps the document store's ObjectId and renders as 24 lowercase hex
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(ObjectId);

impl UserId {
    /// Parse a path or body identifier.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::UserId;
    ///
    /// let id = UserId::parse("507f1f77bcf86cd799439011").expect("valid id");
    /// assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
    /// assert!(UserId::parse("42").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, InvalidUserId> {
        ObjectId::parse_str(raw).map(Self).map_err(|_| InvalidUserId {
            value: raw.to_owned(),
        })
    }

    /// Allocate a fresh identifier for a new record.
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Wrap an identifier read back from the store.
    #[must_use]
    pub const fn from_object_id(id: ObjectId) -> Self {
        Self(id)
    }

    /// Borrow the underlying ObjectId for store filters.
    #[must_use]
    pub const fn as_object_id(&self) -> &ObjectId {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_hex()
    }
}

impl TryFrom<String> for UserId {
    type Error = InvalidUserId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// The three mutable user fields, each guaranteed non-blank.
///
/// Values are kept exactly as supplied; only the blank check trims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    name: String,
    location: String,
    title: String,
}

impl UserProfile {
    /// Validate all three fields, reporting every blank one at once.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::{UserField, UserProfile};
    ///
    /// let err = UserProfile::new("", "London", " ").expect_err("blank fields");
    /// assert_eq!(err.fields(), &[UserField::Name, UserField::Title]);
    /// assert_eq!(err.to_string(), "name must not be empty; title must not be empty");
    /// ```
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<Self, ProfileValidationError> {
        let profile = Self {
            name: name.into(),
            location: location.into(),
            title: title.into(),
        };
        let empty: Vec<UserField> = [
            (UserField::Name, &profile.name),
            (UserField::Location, &profile.location),
            (UserField::Title, &profile.title),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if empty.is_empty() {
            Ok(profile)
        } else {
            Err(ProfileValidationError { empty })
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-text location.
    #[must_use]
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Job title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}

/// Persisted user record.
///
/// ## Invariants
/// - `id` is assigned once by the store and never changes.
/// - every profile field is non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    profile: UserProfile,
}

impl User {
    /// Pair a stored identifier with validated fields.
    #[must_use]
    pub const fn new(id: UserId, profile: UserProfile) -> Self {
        Self { id, profile }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// The three mutable fields.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Replace every mutable field, keeping the identifier.
    #[must_use]
    pub fn with_profile(self, profile: UserProfile) -> Self {
        Self {
            id: self.id,
            profile,
        }
    }
}

/// Wire shape: `{"id","name","location","title"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDto {
    id: String,
    name: String,
    location: String,
    title: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, profile } = value;
        Self {
            id: id.into(),
            name: profile.name,
            location: profile.location,
            title: profile.title,
        }
    }
}

/// Failure decoding a [`User`] from its wire shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDecodeError {
    /// The `id` is not an ObjectId.
    #[error(transparent)]
    Id(#[from] InvalidUserId),
    /// One or more fields are blank.
    #[error("{0}")]
    Profile(ProfileValidationError),
}

impl TryFrom<UserDto> for User {
    type Error = UserDecodeError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let id = UserId::parse(&value.id)?;
        let profile = UserProfile::new(value.name, value.location, value.title)
            .map_err(UserDecodeError::Profile)?;
        Ok(Self::new(id, profile))
    }
}

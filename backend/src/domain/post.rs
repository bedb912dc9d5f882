//! Blog posts and the drafts they are created from.
//!
//! A [`PostDraft`] is the validated content of the creation form. Validation
//! collects every violated constraint so the form can show all of them at
//! once. The publish date is optional on the draft; the service stamps the
//! clock's current time when it is missing.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use super::Error;

/// Maximum length of a post title.
pub const TITLE_MAX: usize = 80;
/// Maximum length of an author name.
pub const AUTHOR_MAX: usize = 100;
/// Minimum length of a post body.
pub const BODY_MIN: usize = 10;
/// Maximum length of a post body.
pub const BODY_MAX: usize = 15_000;

/// Stable post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(Uuid);

impl PostId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Form field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostField {
    /// Post title.
    Title,
    /// Author name.
    Author,
    /// Post body.
    Body,
}

impl PostField {
    /// Lower-case field name as used by the form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for PostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// The field was blank after trimming.
    Empty { field: PostField },
    /// The field had fewer than `min` characters.
    TooShort { field: PostField, min: usize },
    /// The field had more than `max` characters.
    TooLong { field: PostField, max: usize },
}

impl PostValidationError {
    /// Field the failure refers to.
    pub fn field(&self) -> PostField {
        match self {
            Self::Empty { field } | Self::TooShort { field, .. } | Self::TooLong { field, .. } => {
                *field
            }
        }
    }
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooShort { field, min } => {
                write!(f, "{field} must be at least {min} characters")
            }
            Self::TooLong { field, max } => write!(f, "{field} must be at most {max} characters"),
        }
    }
}

/// Every constraint a submitted post violated, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostValidationErrors(Vec<PostValidationError>);

impl PostValidationErrors {
    /// All failures.
    pub fn errors(&self) -> &[PostValidationError] {
        &self.0
    }

    /// Messages for one field, for inline display next to the input.
    pub fn messages_for(&self, field: PostField) -> Vec<String> {
        self.0
            .iter()
            .filter(|err| err.field() == field)
            .map(ToString::to_string)
            .collect()
    }

    /// Whether `field` has at least one failure.
    pub fn has(&self, field: PostField) -> bool {
        self.0.iter().any(|err| err.field() == field)
    }
}

impl fmt::Display for PostValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for PostValidationErrors {}

impl From<PostValidationErrors> for Error {
    fn from(value: PostValidationErrors) -> Self {
        let fields: Vec<Value> = value
            .0
            .iter()
            .map(|err| json!({ "field": err.field().as_str(), "message": err.to_string() }))
            .collect();
        Error::invalid_request(value.to_string()).with_details(json!({ "fields": fields }))
    }
}

fn check_length(
    field: PostField,
    value: &str,
    min: usize,
    max: usize,
    errors: &mut Vec<PostValidationError>,
) {
    let length = value.chars().count();
    if length == 0 {
        errors.push(PostValidationError::Empty { field });
    } else if length < min {
        errors.push(PostValidationError::TooShort { field, min });
    } else if length > max {
        errors.push(PostValidationError::TooLong { field, max });
    }
}

/// Validated content for a new post.
///
/// ## Invariants
/// - `title` is trimmed, 1..=[`TITLE_MAX`] characters.
/// - `author` is trimmed, 1..=[`AUTHOR_MAX`] characters.
/// - `body` is trimmed, [`BODY_MIN`]..=[`BODY_MAX`] characters.
///
/// # Examples
/// ```
/// use blog::domain::{PostDraft, PostField};
///
/// let errors = PostDraft::try_from_parts("", "A", "short", None).expect_err("invalid");
/// assert!(errors.has(PostField::Title));
/// assert!(errors.has(PostField::Body));
/// assert!(!errors.has(PostField::Author));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    author: String,
    body: String,
    pub_date: Option<DateTime<Utc>>,
}

impl PostDraft {
    /// Validate raw form values, collecting every violated constraint.
    pub fn try_from_parts(
        title: &str,
        author: &str,
        body: &str,
        pub_date: Option<DateTime<Utc>>,
    ) -> Result<Self, PostValidationErrors> {
        let title = title.trim();
        let author = author.trim();
        let body = body.trim();

        let mut errors = Vec::new();
        check_length(PostField::Title, title, 1, TITLE_MAX, &mut errors);
        check_length(PostField::Author, author, 1, AUTHOR_MAX, &mut errors);
        check_length(PostField::Body, body, BODY_MIN, BODY_MAX, &mut errors);
        if !errors.is_empty() {
            return Err(PostValidationErrors(errors));
        }

        Ok(Self {
            title: title.to_owned(),
            author: author.to_owned(),
            body: body.to_owned(),
            pub_date,
        })
    }

    /// Post title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Post body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Requested publish date, if the caller supplied one.
    pub fn pub_date(&self) -> Option<DateTime<Utc>> {
        self.pub_date
    }

    /// Turn the draft into a post, defaulting the publish date to `now`.
    pub fn publish(self, id: PostId, now: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            author: self.author,
            body: self.body,
            pub_date: self.pub_date.unwrap_or(now),
        }
    }
}

/// Published blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    title: String,
    author: String,
    body: String,
    pub_date: DateTime<Utc>,
}

impl Post {
    /// Rebuild a post from stored values. Storage constraints mirror the
    /// draft invariants, so no validation happens here.
    pub fn from_stored(
        id: PostId,
        title: String,
        author: String,
        body: String,
        pub_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            body,
            pub_date,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &PostId {
        &self.id
    }

    /// Post title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Post body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Publish timestamp in UTC.
    pub fn pub_date(&self) -> DateTime<Utc> {
        self.pub_date
    }
}

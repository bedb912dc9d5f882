//! Post categories.
//!
//! Categories exist in the schema but no route creates or links them yet.

use std::fmt;

/// Maximum length of a category name.
pub const CATEGORY_NAME_MAX: usize = 50;

/// Validation errors for [`CategoryName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    /// The name was blank after trimming.
    #[error("category name must not be empty")]
    Empty,
    /// The name exceeded `max` characters.
    #[error("category name must be at most {max} characters")]
    TooLong { max: usize },
}

/// Trimmed category name of 1..=[`CATEGORY_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Validate and construct a [`CategoryName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, CategoryValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(CategoryValidationError::Empty);
        }
        if name.chars().count() > CATEGORY_NAME_MAX {
            return Err(CategoryValidationError::TooLong {
                max: CATEGORY_NAME_MAX,
            });
        }
        Ok(Self(name.to_owned()))
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored category row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: i32,
    name: CategoryName,
}

impl Category {
    /// Build a category from its stored identifier and name.
    pub fn new(id: i32, name: CategoryName) -> Self {
        Self { id, name }
    }

    /// Serial identifier.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &CategoryName {
        &self.name
    }
}

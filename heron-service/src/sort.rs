//! Sort descriptor for paged results
//!
//! Describes the sort applied to a result list: the property sorted on
//! and the direction token. A [`Sort`] is immutable after construction
//! and is attached to a page via
//! [`Page::with_sort`](crate::page::Page::with_sort).
//!
//! # Example
//!
//! ```rust
//! use heron_service::sort::Sort;
//!
//! let sort = Sort::of_descending("created_at")?;
//! assert!(sort.is_descending());
//! assert_eq!(sort.direction(), "DESC");
//! # Ok::<(), heron_service::preconditions::PreconditionError>(())
//! ```

use serde::Serialize;

use crate::preconditions::{check_argument_not_blank, PreconditionError};

const ASC: &str = "ASC";
const DESC: &str = "DESC";

/// An immutable sort descriptor: a property name plus a direction token.
///
/// The direction is kept verbatim because it is part of the wire shape.
/// Only the exact token `"ASC"` marks the sort ascending; any other
/// non-blank token (including `"asc"`) is treated as not ascending
/// without further validation of the direction vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    property: String,
    direction: String,
    ignore_case: bool,
    ascending: bool,
}

impl Sort {
    /// Builds a descriptor for `property` sorted in `direction`.
    ///
    /// Both arguments must be non-blank.
    pub fn of(
        property: impl Into<String>,
        direction: impl Into<String>,
    ) -> Result<Self, PreconditionError> {
        let property = property.into();
        let direction = direction.into();
        check_argument_not_blank(Some(property.as_str()))?;
        check_argument_not_blank(Some(direction.as_str()))?;

        let ascending = direction == ASC;
        Ok(Self {
            property,
            direction,
            ignore_case: false,
            ascending,
        })
    }

    /// Equivalent to `Sort::of(property, "ASC")`.
    pub fn of_ascending(property: impl Into<String>) -> Result<Self, PreconditionError> {
        Self::of(property, ASC)
    }

    /// Equivalent to `Sort::of(property, "DESC")`.
    pub fn of_descending(property: impl Into<String>) -> Result<Self, PreconditionError> {
        Self::of(property, DESC)
    }

    /// The property the results are sorted on.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The direction token, verbatim as given at construction.
    #[must_use]
    pub fn direction(&self) -> &str {
        &self.direction
    }

    /// Whether comparisons ignore case. Always false for now; carried
    /// on the wire for consumers that honor it.
    #[must_use]
    pub const fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        self.ascending
    }

    #[must_use]
    pub const fn is_descending(&self) -> bool {
        !self.ascending
    }
}

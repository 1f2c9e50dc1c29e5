//! Ordering types for listing queries.

use std::fmt;
use std::str::FromStr;

use crate::error::TableError;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the wire suffix (`asc` / `desc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Ordering of a listing by a single field.
///
/// Sent to the API as `sortBy=<field>:<asc|desc>`. Parsing rejects anything
/// without a valid direction suffix, so a `SortSpec` always has one.
///
/// # Example
///
/// ```
/// use console_lib::api::query::{Direction, SortSpec};
///
/// let sort: SortSpec = "createdAt:desc".parse().unwrap();
/// assert_eq!(sort.field(), "createdAt");
/// assert_eq!(sort.direction(), Direction::Desc);
/// assert_eq!(sort.to_string(), "createdAt:desc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    field: String,
    direction: Direction,
}

impl SortSpec {
    /// Creates an ascending order on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending order on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    /// Returns the sorted field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the sort direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction if this spec sorts by `field`.
    pub fn direction_of(&self, field: &str) -> Option<Direction> {
        (self.field == field).then_some(self.direction)
    }

    /// Advances the header-click cycle for `column`.
    ///
    /// `column:desc` becomes `column:asc`, `column:asc` falls back to
    /// `default`, and anything else becomes `column:desc`.
    pub fn toggled(&self, column: &str, default: &SortSpec) -> SortSpec {
        match self.direction_of(column) {
            Some(Direction::Desc) => SortSpec::asc(column),
            Some(Direction::Asc) => default.clone(),
            None => SortSpec::desc(column),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::desc("createdAt")
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction.as_str())
    }
}

impl FromStr for SortSpec {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TableError::InvalidSortSpec(s.to_string());
        let (field, direction) = s.rsplit_once(':').ok_or_else(invalid)?;
        if field.is_empty() {
            return Err(invalid());
        }
        let direction = match direction {
            "asc" => Direction::Asc,
            "desc" => Direction::Desc,
            _ => return Err(invalid()),
        };
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_missing_direction() {
        assert!("name".parse::<SortSpec>().is_err());
        assert!("name:up".parse::<SortSpec>().is_err());
        assert!(":asc".parse::<SortSpec>().is_err());
    }

    #[test]
    fn test_toggle_cycle() {
        let default = SortSpec::default();
        let first = default.toggled("name", &default);
        assert_eq!(first.to_string(), "name:desc");
        let second = first.toggled("name", &default);
        assert_eq!(second.to_string(), "name:asc");
        let third = second.toggled("name", &default);
        assert_eq!(third, default);
    }

    #[test]
    fn test_three_toggles_return_to_default_from_any_start() {
        let default = SortSpec::desc("createdAt");
        for start in ["email:asc", "email:desc", "name:asc", "name:desc", "createdAt:desc"] {
            let start: SortSpec = start.parse().unwrap();
            let mut sort = start.toggled("name", &default);
            sort = sort.toggled("name", &default);
            sort = sort.toggled("name", &default);
            // From a state not on `name`, three clicks end on the default;
            // from a state on `name` the cycle reaches the default sooner
            // and the third click starts a new cycle.
            match start.direction_of("name") {
                None => assert_eq!(sort, default),
                Some(Direction::Desc) => assert_eq!(sort, SortSpec::desc("name")),
                Some(Direction::Asc) => assert_eq!(sort, SortSpec::asc("name")),
            }
        }
    }

    #[test]
    fn test_toggling_default_column() {
        let default = SortSpec::desc("createdAt");
        let sort = default.toggled("createdAt", &default);
        assert_eq!(sort, SortSpec::asc("createdAt"));
        assert_eq!(sort.toggled("createdAt", &default), default);
    }
}

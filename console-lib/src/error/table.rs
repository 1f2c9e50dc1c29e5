//! Data table error types

use crate::model::RowId;

/// Errors raised by the remote data table and its query types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Delete was confirmed without a pending target.
    #[error("No row is pending deletion")]
    NoDeleteTarget,

    /// The pending delete target is no longer on the displayed page.
    #[error("Row {0} is no longer on the current page")]
    DeleteTargetMissing(RowId),

    /// A sort spec was not of the form `<field>:<asc|desc>`.
    #[error("Invalid sort spec '{0}', expected '<field>:<asc|desc>'")]
    InvalidSortSpec(String),

    /// A page size outside of the offered sizes.
    #[error("Invalid page size {0}, expected one of 10, 20, 30, 40, 50")]
    InvalidPageSize(u32),
}

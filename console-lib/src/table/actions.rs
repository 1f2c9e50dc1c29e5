//! Row-level callbacks of a remote data table.

use async_trait::async_trait;

use crate::error::Error;
use crate::model::Row;

/// What happens when a user interacts with a row.
///
/// Every method has a no-op default, so implementors only write the ones
/// their listing offers. `on_delete` runs when a delete is confirmed; its
/// error is handed back to whoever confirmed.
#[async_trait]
pub trait RowActions<R: Row>: Send + Sync {
    /// A row was activated (clicked, opened).
    fn on_row(&self, _row: &R) {}

    /// The edit action of a row was chosen.
    fn on_edit(&self, _row: &R) {}

    /// Deletes `row` on the backend.
    async fn on_delete(&self, _row: &R) -> Result<(), Error> {
        Ok(())
    }
}

/// Row actions that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActions;

impl<R: Row> RowActions<R> for NoActions {}

//! Column definitions.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::model::Row;
use crate::model::display_value;

/// Turns the value at a column's accessor path (and the whole row) into the
/// text shown in the cell.
pub type CellRenderer<R> = Arc<dyn Fn(Option<&Value>, &R) -> String + Send + Sync>;

/// One column of a remote data table.
///
/// The accessor is a dotted path into the row (`user.fullname`) and doubles
/// as the column id, which is also the field name sent when sorting by it.
pub struct Column<R> {
    header: String,
    accessor: String,
    cell: Option<CellRenderer<R>>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            cell: self.cell.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("custom_cell", &self.cell.is_some())
            .finish()
    }
}

impl<R: Row> Column<R> {
    pub fn new(header: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            accessor: accessor.into(),
            cell: None,
        }
    }

    /// Sets a custom cell renderer. Without one, cells show the raw value.
    pub fn cell<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&Value>, &R) -> String + Send + Sync + 'static,
    {
        self.cell = Some(Arc::new(render));
        self
    }

    /// Like [`cell`](Self::cell) for renderers that only look at the value.
    pub fn map_value<F>(self, render: F) -> Self
    where
        F: Fn(Option<&Value>) -> String + Send + Sync + 'static,
    {
        self.cell(move |value, _| render(value))
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn id(&self) -> &str {
        &self.accessor
    }

    /// Renders this column's cell for `row`.
    pub fn render(&self, row: &R) -> String {
        let value = row.value_at(&self.accessor);
        match &self.cell {
            Some(render) => render(value, row),
            None => display_value(value),
        }
    }
}

//! Snapshot of everything a front end needs to draw a remote data table.

use crate::api::query::Direction;
use crate::api::query::PageSize;
use crate::model::Row;
use crate::model::RowId;

use super::DeletePhase;
use super::RemoteTable;

/// Renderable state of a table at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Contents of the search box, `None` when the table has no search.
    pub search: Option<String>,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub show_edit: bool,
    pub show_delete: bool,
    pub footer: FooterView,
    pub confirm: Option<ConfirmView>,
    /// A fetch for the current query is running.
    pub is_fetching: bool,
    /// The rows belong to an earlier query and stand in until the current
    /// one arrives.
    pub is_placeholder: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub id: String,
    pub label: String,
    pub sort: Option<Direction>,
}

impl HeaderView {
    /// Arrow shown next to a sorted header.
    pub fn indicator(&self) -> &'static str {
        match self.sort {
            Some(Direction::Asc) => "▲",
            Some(Direction::Desc) => "▼",
            None => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RowId,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    pub page_index: u32,
    pub page_count: Option<u32>,
    pub can_previous: bool,
    pub can_next: bool,
    pub total_results: Option<u64>,
    pub page_size: PageSize,
    pub page_sizes: [PageSize; 5],
}

impl FooterView {
    /// `Page 1 / 3`, with `?` while the page count is unknown.
    pub fn page_label(&self) -> String {
        match self.page_count {
            Some(count) => format!("Page {} / {}", self.page_index + 1, count),
            None => format!("Page {} / ?", self.page_index + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmView {
    pub title: String,
    pub message: String,
    pub target: RowId,
    /// The confirm button shows a spinner.
    pub is_deleting: bool,
}

impl<R: Row> RemoteTable<R> {
    /// Captures the current state for drawing.
    pub fn view(&self) -> TableView {
        let sort = &self.state.sort;
        let headers = self
            .columns
            .iter()
            .map(|column| HeaderView {
                id: column.id().to_string(),
                label: column.header().to_string(),
                sort: sort.direction_of(column.id()),
            })
            .collect();

        let rows = self
            .rows()
            .iter()
            .map(|row| RowView {
                id: row.row_id(),
                cells: self.columns.iter().map(|column| column.render(row)).collect(),
            })
            .collect();

        let confirm = match self.delete.phase() {
            DeletePhase::Idle => None,
            DeletePhase::Confirming(target) | DeletePhase::Deleting(target) => Some(ConfirmView {
                title: "Delete".to_string(),
                message: "Are you sure you want to delete this record?".to_string(),
                target,
                is_deleting: self.is_deleting(),
            }),
        };

        TableView {
            search: self
                .options
                .search_enabled
                .then(|| self.search_input().to_string()),
            headers,
            rows,
            show_edit: self.options.edit_visible,
            show_delete: self.options.delete_visible,
            footer: FooterView {
                page_index: self.state.page_index,
                page_count: self.page_count(),
                can_previous: self.can_previous_page(),
                can_next: self.can_next_page(),
                total_results: self.total_results(),
                page_size: self.state.page_size,
                page_sizes: PageSize::ALL,
            },
            confirm,
            is_fetching: self.is_fetching(),
            is_placeholder: self.is_placeholder(),
            error: self.last_error().map(|err| err.to_string()),
        }
    }
}

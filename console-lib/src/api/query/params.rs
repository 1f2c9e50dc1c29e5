//! Page request parameters.

use std::fmt;

use crate::error::TableError;

use super::SortSpec;

/// Number of rows per page offered by the listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Thirty,
    Forty,
    Fifty,
}

impl PageSize {
    /// Every offered size, smallest first.
    pub const ALL: [PageSize; 5] = [
        PageSize::Ten,
        PageSize::Twenty,
        PageSize::Thirty,
        PageSize::Forty,
        PageSize::Fifty,
    ];

    /// Returns the number of rows.
    pub fn get(self) -> u32 {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Thirty => 30,
            Self::Forty => 40,
            Self::Fifty => 50,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = TableError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(TableError::InvalidPageSize(value))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Parameters of one listing request.
///
/// `page` is 1-based as the API expects. `query` is only present for
/// listings with search enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub limit: PageSize,
    pub sort_by: SortSpec,
    pub query: Option<String>,
}

impl ListParams {
    /// Creates parameters for the first page with default size and order.
    pub fn new() -> Self {
        Self {
            page: 1,
            limit: PageSize::default(),
            sort_by: SortSpec::default(),
            query: None,
        }
    }

    /// Sets the 1-based page number. Zero is clamped to the first page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: PageSize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the ordering.
    pub fn sort_by(mut self, sort: SortSpec) -> Self {
        self.sort_by = sort;
        self
    }

    /// Sets the search term.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Returns the query-string pairs sent to the API.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.get().to_string()),
            ("sortBy", self.sort_by.to_string()),
        ];
        if let Some(query) = &self.query {
            pairs.push(("query", query.clone()));
        }
        pairs
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new()
    }
}

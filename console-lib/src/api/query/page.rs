//! Page type for paginated listing results.

use serde::Deserialize;
use serde::Serialize;

/// One page of listing results with totals.
///
/// Deserialization is lenient: a missing `results` array becomes an empty
/// page, a missing `totalResults` becomes zero and a missing `totalPages`
/// leaves the page count unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<R> {
    #[serde(default = "Vec::new")]
    results: Vec<R>,
    #[serde(default)]
    total_results: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_pages: Option<u32>,
}

impl<R> PageResult<R> {
    /// Creates a page with known totals.
    pub fn new(results: Vec<R>, total_results: u64, total_pages: u32) -> Self {
        Self {
            results,
            total_results,
            total_pages: Some(total_pages),
        }
    }

    /// Creates a page whose page count is unknown.
    pub fn without_totals(results: Vec<R>) -> Self {
        Self {
            results,
            total_results: 0,
            total_pages: None,
        }
    }

    /// Returns the rows of this page.
    pub fn results(&self) -> &[R] {
        &self.results
    }

    /// Consumes the page and returns the rows.
    pub fn into_results(self) -> Vec<R> {
        self.results
    }

    /// Returns the total number of matching rows across all pages.
    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    /// Returns the number of pages, if the server reported it.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Maps every row, keeping the totals.
    pub fn map<U, F: FnMut(R) -> U>(self, f: F) -> PageResult<U> {
        PageResult {
            results: self.results.into_iter().map(f).collect(),
            total_results: self.total_results,
            total_pages: self.total_pages,
        }
    }
}

impl<R> Default for PageResult<R> {
    fn default() -> Self {
        Self::without_totals(Vec::new())
    }
}

//! Query state of a remote data table and the key it is cached under.

use crate::api::query::ListParams;
use crate::api::query::PageSize;
use crate::api::query::SortSpec;

/// Pagination, ordering and search as currently selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// 0-based page index.
    pub page_index: u32,
    pub page_size: PageSize,
    pub sort: SortSpec,
    /// The committed (debounced) search term.
    pub search: String,
}

impl QueryState {
    pub fn new(sort: SortSpec) -> Self {
        Self {
            page_index: 0,
            page_size: PageSize::default(),
            sort,
            search: String::new(),
        }
    }

    /// Key for this state. The search term is part of it only when the table
    /// offers search.
    pub fn key(&self, search_enabled: bool) -> QueryKey {
        QueryKey {
            page_index: self.page_index,
            page_size: self.page_size,
            sort: self.sort.clone(),
            search: search_enabled.then(|| self.search.clone()),
        }
    }
}

/// Identity of one fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub page_index: u32,
    pub page_size: PageSize,
    pub sort: SortSpec,
    pub search: Option<String>,
}

impl QueryKey {
    /// Request parameters for this key. Pages are 1-based on the wire.
    pub fn params(&self) -> ListParams {
        ListParams {
            page: self.page_index.saturating_add(1),
            limit: self.page_size,
            sort_by: self.sort.clone(),
            query: self.search.clone(),
        }
    }
}

/// Converts a 1-based page number typed by a user into a page index.
///
/// Empty, zero, negative and unparsable input all mean the first page.
pub fn parse_page_input(input: &str) -> u32 {
    match input.trim().parse::<i64>() {
        Ok(page) if page > 1 => u32::try_from(page - 1).unwrap_or(u32::MAX),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_params_are_one_based() {
        let mut state = QueryState::new(SortSpec::default());
        state.page_index = 2;
        state.page_size = PageSize::Twenty;
        let params = state.key(false).params();
        assert_eq!(params.page, 3);
        assert_eq!(params.limit, PageSize::Twenty);
        assert_eq!(params.query, None);
    }

    #[test]
    fn test_search_only_keys_when_enabled() {
        let mut state = QueryState::new(SortSpec::default());
        state.search = "john".to_string();
        assert_eq!(state.key(false).search, None);
        assert_eq!(state.key(true).search.as_deref(), Some("john"));
        assert_ne!(state.key(true), state.key(false));
    }

    #[test]
    fn test_parse_page_input() {
        assert_eq!(parse_page_input(""), 0);
        assert_eq!(parse_page_input("0"), 0);
        assert_eq!(parse_page_input("1"), 0);
        assert_eq!(parse_page_input(" 3 "), 2);
        assert_eq!(parse_page_input("-4"), 0);
        assert_eq!(parse_page_input("abc"), 0);
    }
}

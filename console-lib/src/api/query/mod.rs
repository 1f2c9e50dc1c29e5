//! Query types for the listing endpoints.
//!
//! - [`SortSpec`] - single-column ordering, sent as `<field>:<asc|desc>`
//! - [`PageSize`] - the page sizes the listings offer
//! - [`ListParams`] - the parameters of one page request
//! - [`PageResult`] - one page of results with totals

mod order;
mod page;
mod params;

pub use order::Direction;
pub use order::SortSpec;
pub use page::PageResult;
pub use params::ListParams;
pub use params::PageSize;

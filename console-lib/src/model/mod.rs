//! Row model types shared by the API and the data table.

mod format;
mod labels;
mod record;

pub use format::*;
pub use labels::*;
pub use record::*;

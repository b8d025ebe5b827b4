//! Table state controller and its building blocks.
//!
//! The controller composes the codec layer, a query-param store, and the
//! commit scheduler into three controlled slices: pagination, sorting, and
//! column filters. Sorting and pagination commit immediately (discrete
//! clicks); filters commit through the debouncer and always carry a page
//! reset in the same batch.

mod callbacks;
mod column;
mod controller;
mod row;
mod slice;

pub use callbacks::FeedbackGet;
pub use callbacks::FeedbackSet;
pub use callbacks::RowAction;
pub use callbacks::TableCallbacks;
pub use column::ColumnSpec;
pub use column::FilterMode;
pub use column::SyntheticColumn;
pub use column::augment_columns;
pub use controller::FilterSyntax;
pub use controller::TableConfig;
pub use controller::TableController;
pub use row::TableRow;
pub use slice::Update;

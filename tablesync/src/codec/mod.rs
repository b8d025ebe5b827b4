//! Codec layer: conversions between typed table state and query tokens.
//!
//! Every function here is pure, synchronous, and total over its input
//! domain. Decoding recovers from malformed input by substituting the
//! supplied default (pagination) or dropping the offending token while
//! keeping the rest (sort, filters).
//!
//! # Types
//!
//! - [`PageState`] - pagination slice, 0-based in memory, 1-based on the wire
//! - [`SortKey`] / [`Direction`] - one entry of the ordered sort list
//! - [`FilterValue`] - a column filter, scalar or multi-value

mod filter;
mod pagination;
mod sort;

pub use filter::FilterValue;
pub use filter::decode_filter_value;
pub use filter::encode_filter_value;
pub use pagination::PageState;
pub use pagination::decode_pagination;
pub use pagination::encode_pagination;
pub use sort::Direction;
pub use sort::SortKey;
pub use sort::decode_sort;
pub use sort::encode_sort;

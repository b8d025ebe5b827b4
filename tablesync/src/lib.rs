//! Table state synchronization core
//!
//! Keeps pagination, sorting, and column filters consistent between
//! in-memory table state and a serialized query-string representation,
//! and derives the row carousel window used for modal navigation.

pub mod carousel;
pub mod codec;
pub mod commit;
pub mod error;
pub mod store;
pub mod table;

pub mod prelude {
    pub use crate::carousel::{CarouselWrap, RowCarousel};
    pub use crate::codec::{Direction, FilterValue, PageState, SortKey};
    pub use crate::commit::SchedulerConfig;
    pub use crate::error::StoreError;
    pub use crate::store::{
        HistoryMode, InMemoryStore, LocationStore, QueryParamStore, SharedLocation, WriteOptions,
        query_param_store,
    };
    pub use crate::table::{
        ColumnSpec, FilterMode, FilterSyntax, SyntheticColumn, TableCallbacks, TableConfig,
        TableController, TableRow, Update,
    };
}

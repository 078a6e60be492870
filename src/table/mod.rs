pub mod column;
pub mod engine;
pub mod export;
pub mod state;

pub use column::{long_date, Column, DateFormat};
pub use engine::{visible_rows, HeaderCell, TableEngine, TableView};
pub use state::{FilterState, SortDirection, SortSpec, TableAction, DEFAULT_PAGE_SIZE};

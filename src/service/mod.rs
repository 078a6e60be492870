pub mod loader;
pub mod submitter;

pub use loader::{LoadState, SalesList, SalesLoader, Ticket};
pub use submitter::Submitter;

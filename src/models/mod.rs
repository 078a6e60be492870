pub mod draft;
pub mod sale;

pub use draft::{DraftField, SaleForm};
pub use sale::{Assignee, ImplantType, NewSale, SaleDate, SaleRecord, UnknownVariant};

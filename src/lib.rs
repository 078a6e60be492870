pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod table;

pub use client::{HttpSalesApi, InMemorySalesApi, SalesApi};
pub use config::AppConfig;
pub use service::{LoadState, SalesLoader, Submitter};
pub use table::{visible_rows, FilterState, TableEngine};

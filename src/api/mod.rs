pub mod handlers;
pub mod views;

pub use handlers::*;

use crate::client::SalesApi;
use crate::service::Submitter;
use crate::table::{DateFormat, TableEngine};
use axum::{routing::get, Router};
use std::sync::Arc;

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn SalesApi>,
    pub submitter: Arc<Submitter>,
    pub engine: TableEngine,
    pub page_size: usize,
}

impl AppState {
    pub fn new(api: Arc<dyn SalesApi>, page_size: usize) -> Self {
        Self {
            submitter: Arc::new(Submitter::new(api.clone())),
            api,
            engine: TableEngine::default(),
            page_size,
        }
    }

    pub fn with_date_format(mut self, date_format: DateFormat) -> Self {
        self.engine = TableEngine::new(date_format);
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::sales_table))
        .route(
            "/add-new-sale",
            get(handlers::new_sale_form).post(handlers::create_sale),
        )
        .route("/export.csv", get(handlers::export_csv))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

//! 销售记录远程服务的访问接口
//!
//! 表格与提交逻辑只依赖 [`SalesApi`]，测试时可替换为 [`InMemorySalesApi`]。

mod http;
mod memory;

pub use http::HttpSalesApi;
pub use memory::InMemorySalesApi;

use crate::error::{FetchError, SubmitError};
use crate::models::{NewSale, SaleRecord};
use async_trait::async_trait;

pub const SALES_PATH: &str = "api/sales";

#[async_trait]
pub trait SalesApi: Send + Sync {
    /// 拉取全部记录，保持服务端顺序
    async fn load_all(&self) -> Result<Vec<SaleRecord>, FetchError>;

    /// 新建记录，返回服务端分配 id / total_price 后的完整记录
    async fn create(&self, draft: &NewSale) -> Result<SaleRecord, SubmitError>;
}

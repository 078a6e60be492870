use super::SalesApi;
use crate::error::{FetchError, SubmitError};
use crate::models::{NewSale, SaleRecord};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

const ENDPOINT: &str = "memory://api/sales";

/// 内存实现: 分配自增 id，按 rate × quantity 计算总价
///
/// 可预设失败状态码，并记录调用次数。
#[derive(Debug, Default)]
pub struct InMemorySalesApi {
    inner: Mutex<Inner>,
    load_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<SaleRecord>,
    fail_load: Option<u16>,
    fail_create: Option<u16>,
}

impl InMemorySalesApi {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                records,
                ..Inner::default()
            }),
            ..Self::default()
        }
    }

    /// 之后的 load_all 返回该状态码
    pub fn fail_loads_with(&self, status: u16) {
        self.inner.lock().fail_load = Some(status);
    }

    /// 之后的 create 返回该状态码
    pub fn fail_creates_with(&self, status: u16) {
        self.inner.lock().fail_create = Some(status);
    }

    pub fn recover(&self) {
        let mut inner = self.inner.lock();
        inner.fail_load = None;
        inner.fail_create = None;
    }

    pub fn records(&self) -> Vec<SaleRecord> {
        self.inner.lock().records.clone()
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SalesApi for InMemorySalesApi {
    async fn load_all(&self) -> Result<Vec<SaleRecord>, FetchError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.lock();
        if let Some(status) = inner.fail_load {
            return Err(FetchError::Status {
                endpoint: ENDPOINT.to_string(),
                status,
            });
        }
        Ok(inner.records.clone())
    }

    async fn create(&self, draft: &NewSale) -> Result<SaleRecord, SubmitError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.lock();
        if let Some(status) = inner.fail_create {
            return Err(SubmitError::Status {
                endpoint: ENDPOINT.to_string(),
                status,
                body: String::new(),
            });
        }
        let id = inner.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let total_price = &draft.rate * &BigDecimal::from(draft.quantity);
        let record = draft.clone().into_record(id, total_price);
        inner.records.push(record.clone());
        Ok(record)
    }
}

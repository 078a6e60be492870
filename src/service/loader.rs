use crate::client::SalesApi;
use crate::error::{FetchError, ParseError};
use crate::models::SaleRecord;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// 列表加载状态: Idle -> Loading -> Ready | Failed
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready(Vec<SaleRecord>),
    Failed(String),
}

impl LoadState {
    pub fn records(&self) -> &[SaleRecord] {
        match self {
            LoadState::Ready(records) => records,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// 一次挂载对应的加载凭证
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// 持有已加载列表；过期凭证的结果直接丢弃
#[derive(Debug, Default)]
pub struct SalesList {
    state: LoadState,
    generation: u64,
    mounted: bool,
}

impl SalesList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn mount(&mut self) -> Ticket {
        self.generation += 1;
        self.mounted = true;
        self.state = LoadState::Loading;
        Ticket(self.generation)
    }

    /// 卸载后在途结果作废，状态回到 Idle
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
        self.state = LoadState::Idle;
    }

    /// 写入加载结果；成功时整体替换列表。返回是否生效
    pub fn settle(&mut self, ticket: Ticket, result: Result<Vec<SaleRecord>, FetchError>) -> bool {
        if !self.mounted || ticket.0 != self.generation {
            tracing::debug!(ticket = ticket.0, current = self.generation, "discarding stale load result");
            return false;
        }
        self.state = match result.and_then(ensure_unique_ids) {
            Ok(records) => LoadState::Ready(records),
            Err(e) => {
                tracing::warn!("Failed to load sales: {}", e);
                LoadState::Failed(e.to_string())
            }
        };
        true
    }
}

fn ensure_unique_ids(records: Vec<SaleRecord>) -> Result<Vec<SaleRecord>, FetchError> {
    let mut seen = HashSet::with_capacity(records.len());
    if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
        return Err(ParseError {
            endpoint: "sales list".to_string(),
            message: format!("duplicate sale id {}", dup.id),
        }
        .into());
    }
    Ok(records)
}

/// 数据源适配器: 每次挂载拉取一次，不缓存、不重试
pub struct SalesLoader {
    api: Arc<dyn SalesApi>,
    list: Mutex<SalesList>,
}

impl SalesLoader {
    pub fn new(api: Arc<dyn SalesApi>) -> Self {
        Self {
            api,
            list: Mutex::new(SalesList::new()),
        }
    }

    /// 挂载并加载；等待期间不持有锁
    pub async fn load(&self) -> LoadState {
        let ticket = self.list.lock().mount();
        let result = self.api.load_all().await;
        let mut list = self.list.lock();
        list.settle(ticket, result);
        list.state().clone()
    }

    pub fn unmount(&self) {
        self.list.lock().unmount();
    }

    pub fn state(&self) -> LoadState {
        self.list.lock().state().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemorySalesApi;
    use crate::error::SubmitError;
    use crate::models::NewSale;
    use crate::table::fixtures::numbered;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    #[test]
    fn settle_replaces_list() {
        let mut list = SalesList::new();
        assert_eq!(list.state(), &LoadState::Idle);

        let ticket = list.mount();
        assert!(list.state().is_loading());
        assert!(list.settle(ticket, Ok(numbered(3))));
        assert_eq!(list.state().records().len(), 3);

        let ticket = list.mount();
        assert!(list.settle(ticket, Ok(numbered(1))));
        assert_eq!(list.state().records().len(), 1);
    }

    #[test]
    fn late_result_after_unmount_is_discarded() {
        let mut list = SalesList::new();
        let ticket = list.mount();
        list.unmount();
        assert!(!list.settle(ticket, Ok(numbered(2))));
        assert_eq!(list.state(), &LoadState::Idle);
    }

    #[test]
    fn stale_ticket_loses_to_newer_mount() {
        let mut list = SalesList::new();
        let old = list.mount();
        let new = list.mount();
        assert!(list.settle(new, Ok(numbered(1))));
        assert!(!list.settle(old, Ok(numbered(5))));
        assert_eq!(list.state().records().len(), 1);
    }

    #[test]
    fn failure_becomes_terminal_state() {
        let mut list = SalesList::new();
        let ticket = list.mount();
        let err = FetchError::Status {
            endpoint: "memory".to_string(),
            status: 500,
        };
        assert!(list.settle(ticket, Err(err)));
        assert_eq!(list.state().error(), Some("HTTP error! Status: 500"));
        assert!(list.state().records().is_empty());
    }

    #[test]
    fn duplicate_ids_are_a_data_error() {
        let mut records = numbered(2);
        records[1].id = 1;
        let mut list = SalesList::new();
        let ticket = list.mount();
        list.settle(ticket, Ok(records));
        assert!(list.state().error().unwrap().contains("duplicate sale id 1"));
    }

    #[tokio::test]
    async fn loader_fetches_once_per_mount() {
        let api = Arc::new(InMemorySalesApi::new(numbered(4)));
        let loader = SalesLoader::new(api.clone());
        let state = loader.load().await;
        assert_eq!(state.records().len(), 4);
        assert_eq!(api.load_calls(), 1);
        assert_eq!(loader.state(), state);
    }

    /// load_all 阻塞直到被放行
    struct GatedApi {
        inner: InMemorySalesApi,
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl SalesApi for GatedApi {
        async fn load_all(&self) -> Result<Vec<SaleRecord>, FetchError> {
            self.started.notify_one();
            self.release.notified().await;
            self.inner.load_all().await
        }

        async fn create(&self, draft: &NewSale) -> Result<SaleRecord, SubmitError> {
            self.inner.create(draft).await
        }
    }

    #[tokio::test]
    async fn unmount_during_load_discards_result_and_goes_idle() {
        let api = Arc::new(GatedApi {
            inner: InMemorySalesApi::new(numbered(3)),
            started: Notify::new(),
            release: Notify::new(),
        });
        let loader = Arc::new(SalesLoader::new(api.clone()));

        let pending = tokio::spawn({
            let loader = loader.clone();
            async move { loader.load().await }
        });
        api.started.notified().await;
        assert!(loader.state().is_loading());

        loader.unmount();
        api.release.notify_one();

        let returned = pending.await.unwrap();
        assert_eq!(returned, LoadState::Idle);
        assert_eq!(loader.state(), LoadState::Idle);
        assert_eq!(api.inner.load_calls(), 1);
    }

    #[tokio::test]
    async fn loader_reports_failure_as_message() {
        let api = Arc::new(InMemorySalesApi::default());
        api.fail_loads_with(502);
        let loader = SalesLoader::new(api);
        let state = loader.load().await;
        assert_eq!(state.error(), Some("HTTP error! Status: 502"));
    }
}

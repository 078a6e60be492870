use crate::client::SalesApi;
use crate::error::SubmitError;
use crate::models::{SaleForm, SaleRecord};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 新建记录提交器
///
/// 同一时间最多一个请求在途，重复提交直接返回 [`SubmitError::InFlight`]。
/// 不修改任何共享列表，成功后由调用方重新加载。
pub struct Submitter {
    api: Arc<dyn SalesApi>,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Submitter {
    pub fn new(api: Arc<dyn SalesApi>) -> Self {
        Self {
            api,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self, form: &SaleForm) -> Result<SaleRecord, SubmitError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Ignoring submit while another is in flight");
            return Err(SubmitError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let draft = form.validate().map_err(|e| {
            tracing::info!("Rejected sale draft: {}", e);
            e
        })?;

        match self.api.create(&draft).await {
            Ok(record) => {
                tracing::info!("Created sale {} (bill {})", record.id, record.bill_number);
                Ok(record)
            }
            Err(e) => {
                tracing::error!("Error creating sale: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemorySalesApi;
    use crate::models::DraftField;

    fn form() -> SaleForm {
        SaleForm {
            date: "2024-03-15".into(),
            bill_no: "B-1".into(),
            implants_name: "Screw".into(),
            size: "3.5".into(),
            quantity: "2".into(),
            rate: "10".into(),
            institute: "Bir Hospital".into(),
            surgeon: "Dr. Thapa".into(),
            ..SaleForm::default()
        }
    }

    #[tokio::test]
    async fn missing_surgeon_never_reaches_network() {
        let api = Arc::new(InMemorySalesApi::default());
        let submitter = Submitter::new(api.clone());
        let draft = SaleForm {
            surgeon: String::new(),
            ..form()
        };
        match submitter.submit(&draft).await {
            Err(SubmitError::Invalid(e)) => assert_eq!(e.fields(), vec![DraftField::Surgeon]),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(api.create_calls(), 0);
        assert!(!submitter.is_submitting());
    }

    #[tokio::test]
    async fn server_failure_is_reported_and_guard_released() {
        let api = Arc::new(InMemorySalesApi::default());
        api.fail_creates_with(500);
        let submitter = Submitter::new(api.clone());
        assert!(matches!(
            submitter.submit(&form()).await,
            Err(SubmitError::Status { status: 500, .. })
        ));
        assert!(!submitter.is_submitting());

        api.recover();
        let record = submitter.submit(&form()).await.unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.total_price.to_string(), "20");
    }
}

use super::{SalesApi, SALES_PATH};
use crate::config::ApiConfig;
use crate::error::{FetchError, ParseError, SubmitError};
use crate::models::{NewSale, SaleRecord};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// 基于 reqwest 的实现，每次操作恰好一次请求，不重试
#[derive(Debug, Clone)]
pub struct HttpSalesApi {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpSalesApi {
    pub fn new(config: &ApiConfig) -> Result<Self, crate::config::ConfigError> {
        let base = config.base_url()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_client(base, http)
    }

    pub fn with_client(base: Url, http: reqwest::Client) -> Result<Self, crate::config::ConfigError> {
        let endpoint = sales_endpoint(&base).map_err(|source| crate::config::ConfigError::BaseUrl {
            url: base.to_string(),
            source,
        })?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `<base>/api/sales`，base 可带或不带结尾斜杠
fn sales_endpoint(base: &Url) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(SALES_PATH)
}

#[async_trait]
impl SalesApi for HttpSalesApi {
    async fn load_all(&self) -> Result<Vec<SaleRecord>, FetchError> {
        let endpoint = self.endpoint.to_string();
        tracing::debug!("GET {}", endpoint);

        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|source| FetchError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Http {
            endpoint: endpoint.clone(),
            source,
        })?;
        let records: Vec<SaleRecord> = serde_json::from_slice(&body).map_err(|e| ParseError {
            endpoint: endpoint.clone(),
            message: e.to_string(),
        })?;

        tracing::info!("Loaded {} sale records from {}", records.len(), endpoint);
        Ok(records)
    }

    async fn create(&self, draft: &NewSale) -> Result<SaleRecord, SubmitError> {
        let endpoint = self.endpoint.to_string();
        tracing::debug!("POST {} bill_no={}", endpoint, draft.bill_number);

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(draft)
            .send()
            .await
            .map_err(|source| SubmitError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(|source| SubmitError::Http {
            endpoint: endpoint.clone(),
            source,
        })?;
        let record: SaleRecord = serde_json::from_slice(&body).map_err(|e| ParseError {
            endpoint,
            message: e.to_string(),
        })?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_with_or_without_trailing_slash() {
        let bare: Url = "https://oac-api.onrender.com".parse().unwrap();
        assert_eq!(sales_endpoint(&bare).unwrap().as_str(), "https://oac-api.onrender.com/api/sales");

        let nested: Url = "http://localhost:9000/v1".parse().unwrap();
        assert_eq!(sales_endpoint(&nested).unwrap().as_str(), "http://localhost:9000/v1/api/sales");

        let slashed: Url = "http://localhost:9000/v1/".parse().unwrap();
        assert_eq!(sales_endpoint(&slashed).unwrap().as_str(), "http://localhost:9000/v1/api/sales");
    }
}

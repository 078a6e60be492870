use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://oac-api.onrender.com";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub table: TableConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 远程销售服务
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub page_size: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("invalid API base URL {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("table.page_size must be positive")]
    PageSize,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                timeout_secs: 30,
            },
            table: TableConfig {
                page_size: crate::table::DEFAULT_PAGE_SIZE,
            },
        }
    }
}

impl ApiConfig {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|source| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }
}

impl AppConfig {
    /// 从环境变量加载配置 (启动时读取一次)
    ///
    /// `OAC_SERVER__PORT`、`OAC_API__BASE_URL` 等覆盖默认值，
    /// 兼容旧的 `API_URL` 变量且优先级最高。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(
            config::Environment::with_prefix("OAC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
            std::env::var("API_URL").ok(),
        )
    }

    pub fn load(env: config::Environment, api_url: Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("table.page_size", defaults.table.page_size as u64)?
            .add_source(env)
            .set_override_option("api.base_url", api_url)?
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.base_url()?;
        if self.table.page_size == 0 {
            return Err(ConfigError::PageSize);
        }
        Ok(())
    }
}

use oac_sales::{api, AppConfig, HttpSalesApi};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置 (仅启动时读取一次)
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 远程销售服务客户端
    let sales_api = Arc::new(HttpSalesApi::new(&config.api)?);
    info!("Sales endpoint: {}", sales_api.endpoint());

    let state = api::AppState::new(sales_api, config.table.page_size);
    let app = api::router(state);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("Routes:");
    info!("  GET  /              - sales table");
    info!("  GET  /add-new-sale  - new sale form");
    info!("  POST /add-new-sale  - submit new sale");
    info!("  GET  /export.csv    - export filtered sales");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

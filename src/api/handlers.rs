use super::views;
use super::AppState;
use crate::error::SubmitError;
use crate::models::SaleForm;
use crate::service::{LoadState, SalesLoader};
use crate::table::FilterState;
use axum::{
    extract::{Form, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};

pub const CREATED_NOTICE: &str = "created";

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

fn filter_state(state: &AppState, params: &[(String, String)]) -> Result<FilterState, Response> {
    FilterState::from_query(params, state.page_size)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()).into_response())
}

/// 列表页: 每次请求即一次挂载，拉取一次数据
pub async fn sales_table(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let filter = match filter_state(&state, &params) {
        Ok(filter) => filter,
        Err(response) => return response,
    };
    let created = params
        .iter()
        .any(|(k, v)| k == "notice" && v == CREATED_NOTICE);

    let load = SalesLoader::new(state.api.clone()).load().await;
    Html(views::sales_page(&load, &filter, &state.engine, created)).into_response()
}

/// 导出当前过滤/排序结果 (全部页)
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let filter = match filter_state(&state, &params) {
        Ok(filter) => filter,
        Err(response) => return response,
    };

    let records = match SalesLoader::new(state.api.clone()).load().await {
        LoadState::Ready(records) => records,
        other => {
            let message = other.error().unwrap_or("sales list unavailable").to_string();
            return (StatusCode::BAD_GATEWAY, message).into_response();
        }
    };

    let rows = state.engine.filtered_sorted(&records, &filter);
    match crate::table::export::to_csv(&rows, state.engine.date_format()) {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"sales.csv\""),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("CSV export failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn new_sale_form(State(state): State<AppState>) -> Html<String> {
    Html(views::sale_form_page(
        &SaleForm::default(),
        None,
        None,
        state.submitter.is_submitting(),
    ))
}

/// 提交新建表单
///
/// 失败时保留用户输入并提示，成功后跳回列表页重新加载。
pub async fn create_sale(State(state): State<AppState>, Form(form): Form<SaleForm>) -> Response {
    match state.submitter.submit(&form).await {
        Ok(_) => Redirect::to(&format!("/?notice={}", CREATED_NOTICE)).into_response(),
        Err(SubmitError::Invalid(errors)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::sale_form_page(&form, Some(&errors), None, false)),
        )
            .into_response(),
        Err(SubmitError::InFlight) => (
            StatusCode::CONFLICT,
            Html(views::sale_form_page(&form, None, None, true)),
        )
            .into_response(),
        Err(_) => (
            StatusCode::BAD_GATEWAY,
            Html(views::sale_form_page(
                &form,
                None,
                Some(views::SUBMIT_FAILED_NOTICE),
                false,
            )),
        )
            .into_response(),
    }
}

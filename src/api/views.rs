//! 服务端渲染的两个页面: 销售列表与新建表单
//!
//! 页面内容完全由加载状态与 [`FilterState`] 派生，链接通过状态 reducer 生成。

use crate::error::ValidationError;
use crate::models::{Assignee, DraftField, ImplantType, SaleForm};
use crate::service::LoadState;
use crate::table::{Column, FilterState, SortDirection, TableAction, TableEngine, TableView};

pub const CREATED_NOTICE_TEXT: &str = "Added new Sale successfully!";
pub const SUBMIT_FAILED_NOTICE: &str = "Error creating new Sale! Try again later.";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn href(path: &str, state: &FilterState) -> String {
    escape(&format!("{}?{}", path, state.to_query_string()))
}

/// 由动作派生链接；动作非法时 (不会发生于内部生成的动作) 退回当前状态
fn action_href(state: &FilterState, action: TableAction) -> String {
    let next = state.next(action).unwrap_or_else(|_| state.clone());
    href("/", &next)
}

fn notice(kind: &str, text: &str) -> String {
    format!("<div class=\"notice notice-{}\" role=\"status\">{}</div>\n", kind, escape(text))
}

pub fn sales_page(load: &LoadState, state: &FilterState, engine: &TableEngine, created: bool) -> String {
    let mut body = String::from("<h1>OAC Sales</h1>\n");
    if created {
        body.push_str(&notice("success", CREATED_NOTICE_TEXT));
    }
    body.push_str("<p><a href=\"/add-new-sale\">Add a New Sale</a></p>\n");

    match load {
        LoadState::Idle | LoadState::Loading => {
            body.push_str("<p class=\"loader\">Loading...</p>\n");
            return layout("OAC Sales", &body);
        }
        LoadState::Failed(message) => {
            body.push_str(&notice("error", &format!("Could not load sales: {}", message)));
        }
        LoadState::Ready(_) => {}
    }

    body.push_str(&controls(state));
    let view = engine.project(load.records(), state);
    body.push_str(&table(&view, state, engine));
    body.push_str(&pager(&view, state));
    body.push_str(&format!(
        "<p><a href=\"{}\">Export CSV</a></p>\n",
        href("/export.csv", state)
    ));
    layout("OAC Sales", &body)
}

/// 搜索框、负责人下拉、材质单选；提交即新的过滤条件 (页码回到 0)
fn controls(state: &FilterState) -> String {
    let mut html = String::from("<form method=\"get\" action=\"/\" class=\"controls\">\n");
    html.push_str(&format!(
        "<input type=\"text\" name=\"q\" value=\"{}\" placeholder=\"Search all fields...\">\n",
        escape(state.global_query())
    ));

    let assigned = state.column_filter(Column::Assigned).unwrap_or("");
    html.push_str("<select name=\"assigned\">\n");
    html.push_str(&option("", "All Assigned", assigned));
    for assignee in Assignee::ALL {
        html.push_str(&option(assignee.as_str(), assignee.as_str(), assigned));
    }
    html.push_str("</select>\n");

    let implant_type = state.column_filter(Column::ImplantsType).unwrap_or("");
    html.push_str(&radio("implants_type", "", "All", implant_type));
    for t in ImplantType::ALL {
        html.push_str(&radio("implants_type", t.as_str(), t.as_str(), implant_type));
    }

    // 其他列过滤、排序与每页条数随表单保留
    for (column, value) in state.column_filters() {
        if !matches!(column, Column::Assigned | Column::ImplantsType) {
            html.push_str(&hidden(column.key(), value));
        }
    }
    if let Some(sort) = state.sort() {
        html.push_str(&hidden("sort", sort.column.key()));
        html.push_str(&hidden("dir", sort.direction.as_str()));
    }
    html.push_str(&hidden("page_size", &state.page_size().to_string()));
    html.push_str("<button type=\"submit\">Apply</button>\n</form>\n");
    html
}

fn option(value: &str, label: &str, selected: &str) -> String {
    format!(
        "<option value=\"{}\"{}>{}</option>\n",
        escape(value),
        if value == selected { " selected" } else { "" },
        escape(label)
    )
}

fn radio(name: &str, value: &str, label: &str, checked: &str) -> String {
    format!(
        "<label><input type=\"radio\" name=\"{}\" value=\"{}\"{}> {}</label>\n",
        name,
        escape(value),
        if value == checked { " checked" } else { "" },
        escape(label)
    )
}

fn hidden(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
        escape(name),
        escape(value)
    )
}

fn table(view: &TableView<'_>, state: &FilterState, engine: &TableEngine) -> String {
    let mut html = String::from("<table>\n<thead>\n<tr>\n");
    for header in &view.headers {
        let marker = match header.sorted {
            Some(SortDirection::Asc) => " ▲",
            Some(SortDirection::Desc) => " ▼",
            None => "",
        };
        html.push_str(&format!(
            "<th><a href=\"{}\">{}{}</a></th>\n",
            action_href(state, TableAction::ToggleSort(header.column)),
            escape(header.label),
            marker
        ));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    if view.rows.is_empty() {
        html.push_str(&format!(
            "<tr><td colspan=\"{}\">No sales found</td></tr>\n",
            view.headers.len()
        ));
    }
    for record in &view.rows {
        html.push_str("<tr>");
        for header in &view.headers {
            html.push_str(&format!(
                "<td>{}</td>",
                escape(&header.column.render(record, engine.date_format()))
            ));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

fn pager(view: &TableView<'_>, state: &FilterState) -> String {
    let mut html = String::from("<nav class=\"pager\">\n");
    if view.has_previous() {
        html.push_str(&format!(
            "<a href=\"{}\">Previous</a>\n",
            action_href(state, TableAction::SetPage(view.page - 1))
        ));
    }
    html.push_str(&format!(
        "<span>Page {} of {} ({} rows)</span>\n",
        view.page + 1,
        view.page_count,
        view.total_rows
    ));
    if view.has_next() {
        html.push_str(&format!(
            "<a href=\"{}\">Next</a>\n",
            action_href(state, TableAction::SetPage(view.page + 1))
        ));
    }
    html.push_str("</nav>\n");
    html
}

/// 新建表单页；`errors` 为字段级提示，`failure` 为提交失败提示
pub fn sale_form_page(
    form: &SaleForm,
    errors: Option<&ValidationError>,
    failure: Option<&str>,
    submitting: bool,
) -> String {
    let mut body = String::from("<p><a href=\"/\">Go Back</a></p>\n<h1>Add a New Sale</h1>\n");
    if let Some(text) = failure {
        body.push_str(&notice("error", text));
    }
    body.push_str("<form method=\"post\" action=\"/add-new-sale\">\n");

    for field in DraftField::ALL {
        let error = errors.and_then(|e| e.message_for(field));
        body.push_str(&format!(
            "<div class=\"field{}\">\n<label for=\"{}\">{}</label>\n",
            if error.is_some() { " invalid" } else { "" },
            field.key(),
            field.label()
        ));
        body.push_str(&input(form, field));
        if let Some(message) = error {
            body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(message)));
        }
        body.push_str("</div>\n");
    }

    body.push_str(&format!(
        "<button type=\"submit\"{}>Submit</button>\n</form>\n",
        if submitting { " disabled" } else { "" }
    ));
    layout("Add a New Sale", &body)
}

fn input(form: &SaleForm, field: DraftField) -> String {
    let key = field.key();
    let value = form.value(field);
    match field {
        DraftField::ImplantType => select(
            key,
            ImplantType::ALL.iter().map(|t| t.as_str()),
            value,
        ),
        DraftField::Assignee => select(key, Assignee::ALL.iter().map(|a| a.as_str()), value),
        DraftField::Remarks => format!(
            "<textarea id=\"{0}\" name=\"{0}\" placeholder=\"Enter any remarks\">{1}</textarea>\n",
            key,
            escape(value)
        ),
        _ => {
            let kind = match field {
                DraftField::Date => "date",
                DraftField::Size | DraftField::Quantity => "number",
                _ => "text",
            };
            format!(
                "<input type=\"{0}\" id=\"{2}\" name=\"{2}\" value=\"{1}\">\n",
                kind,
                escape(value),
                key
            )
        }
    }
}

fn select<'a>(name: &str, values: impl Iterator<Item = &'a str>, selected: &str) -> String {
    let mut html = format!("<select id=\"{0}\" name=\"{0}\">\n", name);
    for value in values {
        html.push_str(&option(value, value, selected));
    }
    html.push_str("</select>\n");
    html
}

//! 表格派生管线: 全局搜索 -> 列过滤 -> 排序 -> 分页
//!
//! 每一步都是纯函数，输入相同则输出相同。

use crate::models::SaleRecord;
use crate::table::column::{long_date, Column, DateFormat};
use crate::table::state::{FilterState, SortDirection, SortSpec};
use indexmap::IndexMap;

/// 表头信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub column: Column,
    pub label: &'static str,
    pub sorted: Option<SortDirection>,
}

/// 当前可见窗口
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<&'a SaleRecord>,
    /// 实际展示的页码 (越界时已收敛到最后一页)
    pub page: usize,
    pub page_count: usize,
    /// 过滤后的总行数
    pub total_rows: usize,
}

impl TableView<'_> {
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TableEngine {
    date_format: DateFormat,
}

impl Default for TableEngine {
    fn default() -> Self {
        Self {
            date_format: long_date,
        }
    }
}

impl TableEngine {
    pub fn new(date_format: DateFormat) -> Self {
        Self { date_format }
    }

    pub fn date_format(&self) -> DateFormat {
        self.date_format
    }

    /// 过滤并排序后的完整序列 (未分页)
    pub fn filtered_sorted<'a>(&self, records: &'a [SaleRecord], state: &FilterState) -> Vec<&'a SaleRecord> {
        let rows = global_filter(records.iter().collect(), state.global_query(), self.date_format);
        let mut rows = column_filter(rows, state.column_filters());
        sort_rows(&mut rows, state.sort());
        rows
    }

    pub fn project<'a>(&self, records: &'a [SaleRecord], state: &FilterState) -> TableView<'a> {
        let rows = self.filtered_sorted(records, state);
        let total_rows = rows.len();
        let page_count = page_count(total_rows, state.page_size());
        let page = state.page().min(page_count - 1);
        if page != state.page() {
            tracing::debug!(requested = state.page(), clamped = page, "page out of range");
        }

        TableView {
            headers: headers(state),
            rows: paginate(&rows, page, state.page_size()).to_vec(),
            page,
            page_count,
            total_rows,
        }
    }
}

/// 当前页可见行 (默认日期格式)
pub fn visible_rows<'a>(records: &'a [SaleRecord], state: &FilterState) -> Vec<&'a SaleRecord> {
    TableEngine::default().project(records, state).rows
}

pub fn headers(state: &FilterState) -> Vec<HeaderCell> {
    Column::ALL
        .into_iter()
        .map(|column| HeaderCell {
            column,
            label: column.header(),
            sorted: state.sort_direction(column),
        })
        .collect()
}

/// 任一列的渲染值包含查询串即保留 (忽略大小写)；空查询不过滤
pub fn global_filter<'a>(rows: Vec<&'a SaleRecord>, query: &str, date_format: DateFormat) -> Vec<&'a SaleRecord> {
    if query.is_empty() {
        return rows;
    }
    let needle = query.to_lowercase();
    rows.into_iter()
        .filter(|record| {
            Column::ALL
                .iter()
                .any(|column| column.render(record, date_format).to_lowercase().contains(&needle))
        })
        .collect()
}

/// 所有列过滤条件同时满足 (按原始值精确匹配)
pub fn column_filter<'a>(rows: Vec<&'a SaleRecord>, filters: &IndexMap<Column, String>) -> Vec<&'a SaleRecord> {
    if filters.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|record| {
            filters
                .iter()
                .all(|(column, value)| column.raw_value(record) == *value)
        })
        .collect()
}

/// 稳定排序；降序反转比较器而非序列，相等键保持原有相对顺序
pub fn sort_rows(rows: &mut [&SaleRecord], sort: Option<SortSpec>) {
    let Some(SortSpec { column, direction }) = sort else {
        return;
    };
    match direction {
        SortDirection::Asc => rows.sort_by(|a, b| column.compare(a, b)),
        SortDirection::Desc => rows.sort_by(|a, b| column.compare(b, a)),
    }
}

/// `[page * page_size, (page + 1) * page_size)`，越界返回空切片
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// 总页数，空结果也算一页
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_rows.div_ceil(page_size).max(1)
}

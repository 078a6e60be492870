use crate::error::TableError;
use crate::table::column::Column;
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(TableError::UnknownDirection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Column,
    pub direction: SortDirection,
}

/// 表格状态变更动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    SetGlobalQuery(String),
    SetColumnFilter(Column, String),
    ToggleSort(Column),
    SetPage(usize),
    SetPageSize(usize),
}

/// 搜索/过滤/排序/分页状态
///
/// 任何过滤、排序或每页条数的变更都会把页码重置为 0。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    global_query: String,
    column_filters: IndexMap<Column, String>,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            global_query: String::new(),
            column_filters: IndexMap::new(),
            sort: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    pub fn with_page_size(page_size: usize) -> Result<Self, TableError> {
        let mut state = Self::default();
        state.set_page_size(page_size)?;
        Ok(state)
    }

    pub fn global_query(&self) -> &str {
        &self.global_query
    }

    pub fn column_filters(&self) -> &IndexMap<Column, String> {
        &self.column_filters
    }

    pub fn column_filter(&self, column: Column) -> Option<&str> {
        self.column_filters.get(&column).map(String::as_str)
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn sort_direction(&self, column: Column) -> Option<SortDirection> {
        self.sort.filter(|s| s.column == column).map(|s| s.direction)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_global_query(&mut self, query: impl Into<String>) {
        self.global_query = query.into();
        self.page = 0;
    }

    /// 空字符串表示移除该列的过滤条件
    pub fn set_column_filter(&mut self, column: Column, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.column_filters.shift_remove(&column);
        } else {
            self.column_filters.insert(column, value);
        }
        self.page = 0;
    }

    /// 点击表头: 未排序 -> 升序 -> 降序 -> 未排序；换列时从升序开始
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = match self.sort {
            Some(SortSpec {
                column: current,
                direction: SortDirection::Asc,
            }) if current == column => Some(SortSpec {
                column,
                direction: SortDirection::Desc,
            }),
            Some(SortSpec {
                column: current,
                direction: SortDirection::Desc,
            }) if current == column => None,
            _ => Some(SortSpec {
                column,
                direction: SortDirection::Asc,
            }),
        };
        self.page = 0;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// 非法值被拒绝，保留原值
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        if page_size == 0 {
            return Err(TableError::InvalidPageSize(page_size));
        }
        self.page_size = page_size;
        self.page = 0;
        Ok(())
    }

    pub fn apply(&mut self, action: TableAction) -> Result<(), TableError> {
        match action {
            TableAction::SetGlobalQuery(q) => self.set_global_query(q),
            TableAction::SetColumnFilter(column, value) => self.set_column_filter(column, value),
            TableAction::ToggleSort(column) => self.toggle_sort(column),
            TableAction::SetPage(page) => self.set_page(page),
            TableAction::SetPageSize(size) => return self.set_page_size(size),
        }
        Ok(())
    }

    /// 返回应用动作后的新状态 (用于生成链接)
    pub fn next(&self, action: TableAction) -> Result<FilterState, TableError> {
        let mut next = self.clone();
        next.apply(action)?;
        Ok(next)
    }

    /// 从查询参数恢复状态
    ///
    /// 保留参数: `q`, `sort`, `dir`, `page`, `page_size`；
    /// 其余与列键同名的参数视为列过滤条件，其他参数忽略。
    /// 不合法的 `page_size` 被记录并忽略。
    pub fn from_query(params: &[(String, String)], default_page_size: usize) -> Result<Self, TableError> {
        let mut state = Self::with_page_size(default_page_size)?;
        let mut sort_column = None;
        let mut direction = SortDirection::Asc;
        let mut page = 0;

        for (key, value) in params {
            match key.as_str() {
                "q" => state.global_query = value.clone(),
                "sort" if !value.is_empty() => sort_column = Some(value.parse::<Column>()?),
                "dir" if !value.is_empty() => direction = value.parse()?,
                "page" if !value.is_empty() => {
                    page = value
                        .parse()
                        .map_err(|_| TableError::InvalidPage(value.clone()))?;
                }
                "page_size" if !value.is_empty() => {
                    // 非法的每页条数不报错，沿用之前的值
                    let applied = value
                        .parse()
                        .map_err(|_| TableError::UnparsablePageSize(value.clone()))
                        .and_then(|size| state.set_page_size(size));
                    if let Err(e) = applied {
                        tracing::warn!("忽略 page_size 参数: {}", e);
                    }
                }
                other => {
                    if let Ok(column) = other.parse::<Column>() {
                        state.set_column_filter(column, value.clone());
                    }
                }
            }
        }

        state.sort = sort_column.map(|column| SortSpec { column, direction });
        state.page = page;
        Ok(state)
    }

    /// 编码为查询参数 (与 [`FilterState::from_query`] 对应)
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.global_query.is_empty() {
            params.push(("q".to_string(), self.global_query.clone()));
        }
        for (column, value) in &self.column_filters {
            params.push((column.key().to_string(), value.clone()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort".to_string(), sort.column.key().to_string()));
            params.push(("dir".to_string(), sort.direction.as_str().to_string()));
        }
        if self.page > 0 {
            params.push(("page".to_string(), self.page.to_string()));
        }
        params.push(("page_size".to_string(), self.page_size.to_string()));
        params
    }

    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_query())
            .finish()
    }
}

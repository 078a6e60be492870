use crate::error::TableError;
use crate::models::{SaleDate, SaleRecord};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// 日期渲染函数 (纯函数，可替换为其他历法)
pub type DateFormat = fn(&SaleDate) -> String;

/// 默认日期渲染: `ddd, DD MMMM YYYY`
pub fn long_date(date: &SaleDate) -> String {
    date.0.format("%a, %d %B %Y").to_string()
}

/// 表格列，顺序即展示顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Id,
    Date,
    BillNo,
    ImplantsName,
    ImplantsType,
    Size,
    Quantity,
    Rate,
    TotalPrice,
    Assigned,
    Institute,
    Surgeon,
    Remarks,
}

impl Column {
    pub const ALL: [Column; 13] = [
        Column::Id,
        Column::Date,
        Column::BillNo,
        Column::ImplantsName,
        Column::ImplantsType,
        Column::Size,
        Column::Quantity,
        Column::Rate,
        Column::TotalPrice,
        Column::Assigned,
        Column::Institute,
        Column::Surgeon,
        Column::Remarks,
    ];

    /// 列键，与服务端字段名一致
    pub fn key(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Date => "date",
            Column::BillNo => "bill_no",
            Column::ImplantsName => "implants_name",
            Column::ImplantsType => "implants_type",
            Column::Size => "size",
            Column::Quantity => "quantity",
            Column::Rate => "rate",
            Column::TotalPrice => "total_price",
            Column::Assigned => "assigned",
            Column::Institute => "institute",
            Column::Surgeon => "surgeon",
            Column::Remarks => "remarks",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Column::Id => "S.No",
            Column::Date => "Date",
            Column::BillNo => "Bill No",
            Column::ImplantsName => "Name of Implants",
            Column::ImplantsType => "Type of Implants",
            Column::Size => "Size",
            Column::Quantity => "Quantity",
            Column::Rate => "Rate",
            Column::TotalPrice => "Total Price",
            Column::Assigned => "Assigned",
            Column::Institute => "Institute",
            Column::Surgeon => "Surgeon",
            Column::Remarks => "Remarks",
        }
    }

    /// 原始值 (列过滤按此做精确匹配)
    pub fn raw_value(&self, record: &SaleRecord) -> String {
        match self {
            Column::Id => record.id.to_string(),
            Column::Date => record.date.to_string(),
            Column::BillNo => record.bill_number.clone(),
            Column::ImplantsName => record.implant_name.clone(),
            Column::ImplantsType => record.implant_type.as_str().to_string(),
            Column::Size => record.size.to_string(),
            Column::Quantity => record.quantity.to_string(),
            Column::Rate => record.rate.to_string(),
            Column::TotalPrice => record.total_price.to_string(),
            Column::Assigned => record.assignee.as_str().to_string(),
            Column::Institute => record.institute.clone(),
            Column::Surgeon => record.surgeon.clone(),
            Column::Remarks => record.remarks.clone(),
        }
    }

    /// 渲染值 (全局搜索与展示使用)
    pub fn render(&self, record: &SaleRecord, date_format: DateFormat) -> String {
        match self {
            Column::Date => date_format(&record.date),
            _ => self.raw_value(record),
        }
    }

    /// 按列的实际类型比较
    pub fn compare(&self, a: &SaleRecord, b: &SaleRecord) -> Ordering {
        match self {
            Column::Id => a.id.cmp(&b.id),
            Column::Date => a.date.cmp(&b.date),
            Column::BillNo => a.bill_number.cmp(&b.bill_number),
            Column::ImplantsName => a.implant_name.cmp(&b.implant_name),
            Column::ImplantsType => a.implant_type.as_str().cmp(b.implant_type.as_str()),
            Column::Size => a.size.total_cmp(&b.size),
            Column::Quantity => a.quantity.cmp(&b.quantity),
            Column::Rate => a.rate.cmp(&b.rate),
            Column::TotalPrice => a.total_price.cmp(&b.total_price),
            Column::Assigned => a.assignee.as_str().cmp(b.assignee.as_str()),
            Column::Institute => a.institute.cmp(&b.institute),
            Column::Surgeon => a.surgeon.cmp(&b.surgeon),
            Column::Remarks => a.remarks.cmp(&b.remarks),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Column {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| TableError::UnknownColumn(s.to_string()))
    }
}

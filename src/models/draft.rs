use crate::error::{FieldError, ValidationError};
use crate::models::sale::{Assignee, ImplantType, NewSale, SaleDate};
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Date,
    BillNumber,
    ImplantName,
    ImplantType,
    Size,
    Quantity,
    Rate,
    Assignee,
    Institute,
    Surgeon,
    Remarks,
}

impl DraftField {
    pub const ALL: [DraftField; 11] = [
        DraftField::Date,
        DraftField::BillNumber,
        DraftField::ImplantName,
        DraftField::ImplantType,
        DraftField::Size,
        DraftField::Quantity,
        DraftField::Rate,
        DraftField::Assignee,
        DraftField::Institute,
        DraftField::Surgeon,
        DraftField::Remarks,
    ];

    /// 表单 name 属性，与服务端字段名一致
    pub fn key(&self) -> &'static str {
        match self {
            DraftField::Date => "date",
            DraftField::BillNumber => "bill_no",
            DraftField::ImplantName => "implants_name",
            DraftField::ImplantType => "implants_type",
            DraftField::Size => "size",
            DraftField::Quantity => "quantity",
            DraftField::Rate => "rate",
            DraftField::Assignee => "assigned",
            DraftField::Institute => "institute",
            DraftField::Surgeon => "surgeon",
            DraftField::Remarks => "remarks",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Date => "Date",
            DraftField::BillNumber => "Bill Number",
            DraftField::ImplantName => "Implant Name",
            DraftField::ImplantType => "Implant Type",
            DraftField::Size => "Size",
            DraftField::Quantity => "Quantity",
            DraftField::Rate => "Rate",
            DraftField::Assignee => "Assignee",
            DraftField::Institute => "Institute",
            DraftField::Surgeon => "Surgeon",
            DraftField::Remarks => "Remarks",
        }
    }

    fn required_message(&self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        // "Bill Number" -> "Bill number is required"
        let head: String = chars.next().into_iter().collect();
        format!("{}{} is required", head, chars.as_str().to_lowercase())
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 新建表单的原始输入 (全部为字符串，校验后才转换为 [`NewSale`])
///
/// 提交失败时原样回填，用户无需重新输入。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleForm {
    pub date: String,
    pub bill_no: String,
    pub implants_name: String,
    pub implants_type: String,
    pub size: String,
    pub quantity: String,
    pub rate: String,
    pub assigned: String,
    pub institute: String,
    pub surgeon: String,
    pub remarks: String,
}

impl Default for SaleForm {
    fn default() -> Self {
        Self {
            date: String::new(),
            bill_no: String::new(),
            implants_name: String::new(),
            implants_type: ImplantType::Ss.as_str().to_string(),
            size: String::new(),
            quantity: String::new(),
            rate: String::new(),
            assigned: Assignee::Santosh.as_str().to_string(),
            institute: String::new(),
            surgeon: String::new(),
            remarks: String::new(),
        }
    }
}

impl SaleForm {
    pub fn value(&self, field: DraftField) -> &str {
        match field {
            DraftField::Date => &self.date,
            DraftField::BillNumber => &self.bill_no,
            DraftField::ImplantName => &self.implants_name,
            DraftField::ImplantType => &self.implants_type,
            DraftField::Size => &self.size,
            DraftField::Quantity => &self.quantity,
            DraftField::Rate => &self.rate,
            DraftField::Assignee => &self.assigned,
            DraftField::Institute => &self.institute,
            DraftField::Surgeon => &self.surgeon,
            DraftField::Remarks => &self.remarks,
        }
    }

    /// 本地同步校验，不访问网络
    ///
    /// 一次性收集所有不合法字段。
    pub fn validate(&self) -> Result<NewSale, ValidationError> {
        let mut errors = Vec::new();

        let date = self.parse_required(DraftField::Date, &mut errors, |s| {
            SaleDate::from_str(s).map_err(|_| "Date must be a valid YYYY-MM-DD date".to_string())
        });
        let bill_number = self.text_required(DraftField::BillNumber, &mut errors);
        let implant_name = self.text_required(DraftField::ImplantName, &mut errors);
        let implant_type = self.parse_required(DraftField::ImplantType, &mut errors, |s| {
            ImplantType::from_str(s).map_err(|e| e.to_string())
        });
        let size = self.parse_required(DraftField::Size, &mut errors, |s| match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
            _ => Err("Size must be a non-negative number".to_string()),
        });
        let quantity = self.parse_required(DraftField::Quantity, &mut errors, |s| match s.parse::<u32>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err("Quantity must be a positive whole number".to_string()),
        });
        let rate = self.parse_required(DraftField::Rate, &mut errors, |s| match BigDecimal::from_str(s) {
            Ok(v) if v >= BigDecimal::zero() => Ok(v),
            _ => Err("Rate must be a non-negative decimal amount".to_string()),
        });
        let assignee = self.parse_required(DraftField::Assignee, &mut errors, |s| {
            Assignee::from_str(s).map_err(|e| e.to_string())
        });
        let institute = self.text_required(DraftField::Institute, &mut errors);
        let surgeon = self.text_required(DraftField::Surgeon, &mut errors);

        match (date, bill_number, implant_name, implant_type, size, quantity, rate, assignee, institute, surgeon) {
            (
                Some(date),
                Some(bill_number),
                Some(implant_name),
                Some(implant_type),
                Some(size),
                Some(quantity),
                Some(rate),
                Some(assignee),
                Some(institute),
                Some(surgeon),
            ) if errors.is_empty() => Ok(NewSale {
                date,
                bill_number,
                implant_name,
                implant_type,
                size,
                quantity,
                rate,
                assignee,
                institute,
                surgeon,
                remarks: self.remarks.trim().to_string(),
            }),
            _ => Err(ValidationError::new(errors)),
        }
    }

    fn text_required(&self, field: DraftField, errors: &mut Vec<FieldError>) -> Option<String> {
        self.parse_required(field, errors, |s| Ok(s.to_string()))
    }

    fn parse_required<T>(
        &self,
        field: DraftField,
        errors: &mut Vec<FieldError>,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        let raw = self.value(field).trim();
        if raw.is_empty() {
            errors.push(FieldError {
                field,
                message: field.required_message(),
            });
            return None;
        }
        match parse(raw) {
            Ok(value) => Some(value),
            Err(message) => {
                errors.push(FieldError { field, message });
                None
            }
        }
    }
}

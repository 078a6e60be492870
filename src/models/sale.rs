use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 枚举字段遇到未知取值
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// 植入物材质 (implants_type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImplantType {
    #[serde(rename = "SS")]
    Ss,
    #[serde(rename = "TITANIUM")]
    Titanium,
}

impl ImplantType {
    pub const ALL: [ImplantType; 2] = [ImplantType::Ss, ImplantType::Titanium];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImplantType::Ss => "SS",
            ImplantType::Titanium => "TITANIUM",
        }
    }
}

impl fmt::Display for ImplantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImplantType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "implant type",
                value: s.to_string(),
            })
    }
}

/// 负责人 (assigned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Assignee {
    Santosh,
    Shiva,
    Neither,
}

impl Assignee {
    pub const ALL: [Assignee; 3] = [Assignee::Santosh, Assignee::Shiva, Assignee::Neither];

    pub fn as_str(&self) -> &'static str {
        match self {
            Assignee::Santosh => "Santosh",
            Assignee::Shiva => "Shiva",
            Assignee::Neither => "Neither",
        }
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Assignee {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "assignee",
                value: s.to_string(),
            })
    }
}

/// 销售日期
///
/// 接受 `YYYY-MM-DD` 或带时间的 ISO-8601 字符串 (仅保留日期部分)，
/// 序列化时统一输出 `YYYY-MM-DD`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SaleDate(pub NaiveDate);

impl SaleDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(SaleDate)
    }
}

impl FromStr for SaleDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
            .map(SaleDate)
    }
}

impl fmt::Display for SaleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for SaleDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SaleDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// 销售记录 (服务端 /api/sales 返回的单条数据)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: i64,
    pub date: SaleDate,
    #[serde(rename = "bill_no")]
    pub bill_number: String,
    #[serde(rename = "implants_name")]
    pub implant_name: String,
    #[serde(rename = "implants_type")]
    pub implant_type: ImplantType,
    pub size: f64,
    pub quantity: u32,
    pub rate: BigDecimal,
    pub total_price: BigDecimal, // 服务端计算: rate × quantity
    #[serde(rename = "assigned")]
    pub assignee: Assignee,
    pub institute: String,
    pub surgeon: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub remarks: String,
}

/// 新建销售记录的请求体 (不含 id / total_price)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    pub date: SaleDate,
    #[serde(rename = "bill_no")]
    pub bill_number: String,
    #[serde(rename = "implants_name")]
    pub implant_name: String,
    #[serde(rename = "implants_type")]
    pub implant_type: ImplantType,
    pub size: f64,
    pub quantity: u32,
    pub rate: BigDecimal,
    #[serde(rename = "assigned")]
    pub assignee: Assignee,
    pub institute: String,
    pub surgeon: String,
    #[serde(default)]
    pub remarks: String,
}

impl NewSale {
    /// 补齐服务端分配的字段
    pub fn into_record(self, id: i64, total_price: BigDecimal) -> SaleRecord {
        SaleRecord {
            id,
            date: self.date,
            bill_number: self.bill_number,
            implant_name: self.implant_name,
            implant_type: self.implant_type,
            size: self.size,
            quantity: self.quantity,
            rate: self.rate,
            total_price,
            assignee: self.assignee,
            institute: self.institute,
            surgeon: self.surgeon,
            remarks: self.remarks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json() -> serde_json::Value {
        json!({
            "id": 7,
            "date": "2024-03-15",
            "bill_no": "B-101",
            "implants_name": "Locking Plate",
            "implants_type": "TITANIUM",
            "size": 4.5,
            "quantity": 2,
            "rate": "1250.50",
            "total_price": "2501.00",
            "assigned": "Shiva",
            "institute": "Bir Hospital",
            "surgeon": "Dr. Thapa",
            "remarks": null
        })
    }

    #[test]
    fn deserializes_server_shape() {
        let record: SaleRecord = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.bill_number, "B-101");
        assert_eq!(record.implant_type, ImplantType::Titanium);
        assert_eq!(record.assignee, Assignee::Shiva);
        assert_eq!(record.rate.to_string(), "1250.50");
        assert_eq!(record.total_price.to_string(), "2501.00");
        assert_eq!(record.remarks, "");
    }

    #[test]
    fn rejects_unknown_enum_values() {
        let mut value = sample_json();
        value["assigned"] = json!("Ram");
        assert!(serde_json::from_value::<SaleRecord>(value).is_err());

        let mut value = sample_json();
        value["implants_type"] = json!("ceramic");
        assert!(serde_json::from_value::<SaleRecord>(value).is_err());
    }

    #[test]
    fn accepts_timestamp_dates() {
        let date: SaleDate = "2024-03-15T00:00:00.000Z".parse().unwrap();
        assert_eq!(date, SaleDate::from_ymd(2024, 3, 15).unwrap());
        let date: SaleDate = "2024-03-15T10:20:30".parse().unwrap();
        assert_eq!(date.to_string(), "2024-03-15");
        assert!("15/03/2024".parse::<SaleDate>().is_err());
    }

    #[test]
    fn new_sale_serializes_without_server_fields() {
        let record: SaleRecord = serde_json::from_value(sample_json()).unwrap();
        let draft = NewSale {
            date: record.date,
            bill_number: record.bill_number.clone(),
            implant_name: record.implant_name.clone(),
            implant_type: record.implant_type,
            size: record.size,
            quantity: record.quantity,
            rate: record.rate.clone(),
            assignee: record.assignee,
            institute: record.institute.clone(),
            surgeon: record.surgeon.clone(),
            remarks: String::new(),
        };
        let body = serde_json::to_value(&draft).unwrap();
        assert!(body.get("id").is_none());
        assert!(body.get("total_price").is_none());
        assert_eq!(body["bill_no"], "B-101");
        assert_eq!(body["implants_type"], "TITANIUM");
        assert_eq!(body["date"], "2024-03-15");
    }

    #[test]
    fn enum_parsing_matches_wire_names() {
        assert_eq!("SS".parse::<ImplantType>().unwrap(), ImplantType::Ss);
        assert_eq!("Neither".parse::<Assignee>().unwrap(), Assignee::Neither);
        assert!("ss".parse::<ImplantType>().is_err());
    }
}

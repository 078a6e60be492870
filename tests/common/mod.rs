#![allow(dead_code)]

use oac_sales::models::{SaleForm, SaleRecord};
use serde_json::{json, Value};

pub fn record_json(id: i64, implant_type: &str, assignee: &str) -> Value {
    json!({
        "id": id,
        "date": format!("2024-01-{:02}", (id % 28) + 1),
        "bill_no": format!("B-{id:03}"),
        "implants_name": "Locking Plate",
        "implants_type": implant_type,
        "size": 4.5,
        "quantity": 2,
        "rate": "150.00",
        "total_price": "300.00",
        "assigned": assignee,
        "institute": "Bir Hospital",
        "surgeon": "Dr. Thapa",
        "remarks": ""
    })
}

pub fn record(id: i64, implant_type: &str, assignee: &str) -> SaleRecord {
    serde_json::from_value(record_json(id, implant_type, assignee)).unwrap()
}

/// id 从 1 开始的连续记录
pub fn numbered(count: i64) -> Vec<SaleRecord> {
    (1..=count).map(|id| record(id, "SS", "Santosh")).collect()
}

pub fn filled_form() -> SaleForm {
    SaleForm {
        date: "2024-03-15".into(),
        bill_no: "B-900".into(),
        implants_name: "Cortical Screw".into(),
        implants_type: "TITANIUM".into(),
        size: "3.5".into(),
        quantity: "4".into(),
        rate: "25.25".into(),
        assigned: "Neither".into(),
        institute: "Patan Hospital".into(),
        surgeon: "Dr. Shrestha".into(),
        remarks: String::new(),
    }
}

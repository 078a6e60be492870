use crate::models::SaleRecord;
use crate::table::column::{Column, DateFormat};

/// 导出 CSV: 表头为列标题，单元格为渲染值
pub fn to_csv(rows: &[&SaleRecord], date_format: DateFormat) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(Column::ALL.iter().map(|c| c.header()))?;
    for record in rows {
        writer.write_record(Column::ALL.iter().map(|c| c.render(record, date_format)))?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

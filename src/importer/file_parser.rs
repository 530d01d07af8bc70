// ==========================================
// 电商仓储发货运营系统 - 文件解析器
// ==========================================
// 职责: 上传文件 → 原始订单记录数组 (键值保持原样,不做清洗)
// 支持: CSV (.csv) / Excel (.xlsx/.xls) / JSON (.json)
// ==========================================

use crate::domain::order::RawOrderRecord;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use csv::ReaderBuilder;
use serde_json::{Map, Value};
use std::fs::File;
use std::path::Path;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawOrderRecord>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = Map::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), Value::String(value.trim().to_string()));
                }
            }

            // 跳过完全空白的行
            if row_map
                .values()
                .all(|v| v.as_str().map(|s| s.is_empty()).unwrap_or(false))
            {
                continue;
            }

            records.push(Value::Object(row_map));
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    pub fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawOrderRecord>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names.first().ok_or(ImportError::EmptySheet)?.clone();

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut rows = range.rows();
        let header_row = rows.next().ok_or(ImportError::EmptySheet)?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            let mut row_map = Map::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), Self::cell_to_value(cell));
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(is_blank_value) {
                continue;
            }

            records.push(Value::Object(row_map));
        }

        Ok(records)
    }

    /// 单元格转 JSON 值; 数值/布尔保形,其余按 TRIM 字符串
    fn cell_to_value(cell: &Data) -> Value {
        match cell {
            Data::Empty => Value::Null,
            Data::Int(i) => Value::from(*i),
            Data::Float(f) => Value::from(*f),
            Data::Bool(b) => Value::from(*b),
            other => Value::String(other.to_string().trim().to_string()),
        }
    }
}

fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
pub struct JsonParser;

impl JsonParser {
    /// 接受顶层数组,或含 "orders" 数组字段的对象
    pub fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawOrderRecord>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let content = std::fs::read_to_string(file_path)?;
        let parsed: Value = serde_json::from_str(&content)?;

        match parsed {
            Value::Array(items) => Ok(items),
            Value::Object(mut obj) => match obj.remove("orders") {
                Some(Value::Array(items)) => Ok(items),
                _ => Err(ImportError::InvalidJsonShape),
            },
            _ => Err(ImportError::InvalidJsonShape),
        }
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawOrderRecord>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_records(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(path),
            "json" => JsonParser.parse_to_raw_records(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        writeln!(temp_file, "orderId,platform,orderValue").unwrap();
        writeln!(temp_file, "ORD-001,tiktok,1250000").unwrap();
        writeln!(temp_file, "ORD-002,shopee,480000").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["orderId"], "ORD-001");
        assert_eq!(records[1]["orderValue"], "480000");
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "orderId,platform").unwrap();
        writeln!(temp_file, "ORD-001,tiktok").unwrap();
        writeln!(temp_file, ",").unwrap(); // 空行
        writeln!(temp_file, "ORD-002,shopee").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_json_parser_top_level_array() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"[{{"orderId": "ORD-001", "orderValue": 100000}}]"#
        )
        .unwrap();

        let records = JsonParser.parse_to_raw_records(temp_file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["orderValue"], 100000);
    }

    #[test]
    fn test_json_parser_orders_wrapper() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{"orders": [{{"orderId": "ORD-001"}}, {{"orderId": "ORD-002"}}]}}"#
        )
        .unwrap();

        let records = JsonParser.parse_to_raw_records(temp_file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_json_parser_invalid_shape() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#""just a string""#).unwrap();

        let result = JsonParser.parse_to_raw_records(temp_file.path());
        assert!(matches!(result, Err(ImportError::InvalidJsonShape)));
    }

    #[test]
    fn test_universal_parser_unsupported_extension() {
        let result = UniversalFileParser.parse(Path::new("orders.parquet"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}

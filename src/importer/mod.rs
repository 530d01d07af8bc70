// ==========================================
// 电商仓储发货运营系统 - 导入层
// ==========================================
// 职责: 外部数据进入系统的边界 (文件解析 / 字段映射 / 演示数据)
// 红线: 导入层只交付原始记录,类型化与富化归引擎层
// ==========================================

pub mod demo_data;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod source;

pub use demo_data::generate_demo_orders;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, JsonParser, UniversalFileParser};
pub use source::{FileIngestionSource, IngestionSource};

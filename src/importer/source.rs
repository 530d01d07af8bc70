// ==========================================
// 电商仓储发货运营系统 - 摄取边界
// ==========================================
// 职责: 异步摄取源抽象 (解析一次,交付一个原始记录数组)
// 红线: 摄取是流水线之外唯一的异步边界;
//       摄取源只交付原始记录,不做任何清洗或富化
// ==========================================

use crate::domain::order::RawOrderRecord;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UniversalFileParser;
use async_trait::async_trait;
use std::path::PathBuf;

/// 摄取源: 解析/拉取一次,成功则交付完整的原始记录数组
#[async_trait]
pub trait IngestionSource: Send + Sync {
    async fn fetch_raw_orders(&self) -> ImportResult<Vec<RawOrderRecord>>;
}

// ==========================================
// FileIngestionSource - 本地文件摄取源
// ==========================================
pub struct FileIngestionSource {
    path: PathBuf,
}

impl FileIngestionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IngestionSource for FileIngestionSource {
    async fn fetch_raw_orders(&self) -> ImportResult<Vec<RawOrderRecord>> {
        let path = self.path.clone();
        // 文件解析是阻塞 IO,移出异步执行器线程
        tokio::task::spawn_blocking(move || UniversalFileParser.parse(path))
            .await
            .map_err(|e| crate::importer::error::ImportError::InternalError(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_file_source_fetches_once() {
        let mut temp_file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        write!(temp_file, r#"[{{"orderId": "ORD-001"}}]"#).unwrap();

        let source = FileIngestionSource::new(temp_file.path());
        let records = source.fetch_raw_orders().await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileIngestionSource::new("missing_orders.csv");
        assert!(source.fetch_raw_orders().await.is_err());
    }
}

// ==========================================
// 电商仓储发货运营系统 - 平台×承运商政策矩阵
// ==========================================
// 职责: (platform, carrier) → 确认/交接时限 查找表
// 红线: 矩阵必须显式注入,禁止模块级全局单例
//       矩阵缺项是定义内状态 (Unknown),不是错误
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ==========================================
// PolicyEntry - 单元格: 时限定义 (小时)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyEntry {
    /// 确认时限: 下单后须在该小时数内确认
    pub confirm_deadline_hours: f64,
    /// 交接时限: 下单后须在该小时数内交给承运商
    pub handover_deadline_hours: f64,
}

// ==========================================
// PolicyRule - 配置文件中的一行规则
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRule {
    pub platform: String,
    pub carrier: String,
    pub confirm_deadline_hours: f64,
    pub handover_deadline_hours: f64,
}

// ==========================================
// PolicyMatrix - 政策矩阵
// ==========================================
#[derive(Debug, Clone)]
pub struct PolicyMatrix {
    // 键统一小写,lookup 时大小写不敏感
    entries: HashMap<(String, String), PolicyEntry>,
}

impl PolicyMatrix {
    /// 创建空矩阵（测试/自定义政策用）
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// 写入一条政策
    pub fn insert(&mut self, platform: &str, carrier: &str, entry: PolicyEntry) {
        self.entries.insert(Self::key(platform, carrier), entry);
    }

    /// 查找 (platform, carrier) 对应的时限政策
    ///
    /// # 返回
    /// - Some(entry): 命中
    /// - None: 矩阵缺项,调用方必须按 Unknown 分类处理,不得报错
    pub fn lookup(&self, platform: &str, carrier: &str) -> Option<&PolicyEntry> {
        self.entries.get(&Self::key(platform, carrier))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(platform: &str, carrier: &str) -> (String, String) {
        (
            platform.trim().to_lowercase(),
            carrier.trim().to_lowercase(),
        )
    }

    // ==========================================
    // 构造: 规则列表 / 配置文件
    // ==========================================

    /// 由规则列表构造矩阵（后写覆盖先写）
    pub fn from_rules(rules: &[PolicyRule]) -> Self {
        let mut matrix = Self::new();
        for rule in rules {
            matrix.insert(
                &rule.platform,
                &rule.carrier,
                PolicyEntry {
                    confirm_deadline_hours: rule.confirm_deadline_hours,
                    handover_deadline_hours: rule.handover_deadline_hours,
                },
            );
        }
        matrix
    }

    /// 从 JSON 规则文件加载矩阵
    ///
    /// 文件格式: PolicyRule 数组
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let rules: Vec<PolicyRule> = serde_json::from_str(&content)?;
        Ok(Self::from_rules(&rules))
    }

    /// 默认政策文件路径: <用户配置目录>/shipping-ops/policy_matrix.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shipping-ops").join("policy_matrix.json"))
    }

    /// 加载默认路径下的政策文件; 不存在或解析失败时回落为内置矩阵
    pub fn load_or_default() -> Self {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                match Self::from_json_file(&path) {
                    Ok(matrix) => {
                        tracing::info!("已加载政策矩阵: {} ({} 条)", path.display(), matrix.len());
                        return matrix;
                    }
                    Err(e) => {
                        tracing::warn!("政策矩阵加载失败,回落为内置矩阵: {}: {}", path.display(), e);
                    }
                }
            }
        }
        Self::default()
    }
}

impl Default for PolicyMatrix {
    /// 内置默认矩阵
    ///
    /// 时限口径:
    /// - tiktok: 平台考核最严,确认 4h / 交接 24h
    /// - shopee: 确认 12h / 交接 48h (J&T 渠道单独收紧为 8h/36h)
    /// - website: 自营渠道,确认 24h / 交接 72h
    fn default() -> Self {
        let mut matrix = Self::new();

        let tiktok = PolicyEntry {
            confirm_deadline_hours: 4.0,
            handover_deadline_hours: 24.0,
        };
        matrix.insert("tiktok", "J&T Express", tiktok);
        matrix.insert("tiktok", "Ninja Van", tiktok);

        let shopee = PolicyEntry {
            confirm_deadline_hours: 12.0,
            handover_deadline_hours: 48.0,
        };
        matrix.insert("shopee", "GHTK", shopee);
        matrix.insert("shopee", "Viettel Post", shopee);
        matrix.insert(
            "shopee",
            "J&T Express",
            PolicyEntry {
                confirm_deadline_hours: 8.0,
                handover_deadline_hours: 36.0,
            },
        );

        let website = PolicyEntry {
            confirm_deadline_hours: 24.0,
            handover_deadline_hours: 72.0,
        };
        matrix.insert("website", "J&T Express", website);
        matrix.insert("website", "Viettel Post", website);
        matrix.insert("website", "GHTK", website);

        matrix
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hit() {
        let matrix = PolicyMatrix::default();
        let entry = matrix.lookup("tiktok", "J&T Express").expect("应命中");
        assert_eq!(entry.confirm_deadline_hours, 4.0);
        assert_eq!(entry.handover_deadline_hours, 24.0);
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let matrix = PolicyMatrix::default();
        assert!(matrix.lookup("TikTok", "j&t express").is_some());
        assert!(matrix.lookup(" SHOPEE ", "GHTK").is_some());
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let matrix = PolicyMatrix::default();
        // 缺项返回 None,由调用方按 Unknown 分类
        assert!(matrix.lookup("lazada", "GHTK").is_none());
        assert!(matrix.lookup("tiktok", "GHTK").is_none());
    }

    #[test]
    fn test_from_rules_overrides() {
        let rules = vec![
            PolicyRule {
                platform: "tiktok".to_string(),
                carrier: "J&T Express".to_string(),
                confirm_deadline_hours: 4.0,
                handover_deadline_hours: 24.0,
            },
            PolicyRule {
                platform: "tiktok".to_string(),
                carrier: "J&T Express".to_string(),
                confirm_deadline_hours: 6.0,
                handover_deadline_hours: 30.0,
            },
        ];
        let matrix = PolicyMatrix::from_rules(&rules);
        assert_eq!(matrix.len(), 1);
        let entry = matrix.lookup("tiktok", "J&T Express").unwrap();
        // 后写覆盖先写
        assert_eq!(entry.confirm_deadline_hours, 6.0);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = PolicyMatrix::new();
        assert!(matrix.is_empty());
        assert!(matrix.lookup("tiktok", "J&T Express").is_none());
    }
}

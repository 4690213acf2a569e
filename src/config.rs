// ==========================================
// 订单编排核心 - 系统配置
// ==========================================
// 职责: 核心运行配置,serde 反序列化 + 显式缺省
// ==========================================

use crate::engine::detail::{DEFAULT_RATING, DEFAULT_RELIABILITY, RECENT_ORDERS_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 核心配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoreConfig {
    /// SQLite 数据库路径
    pub db_path: String,
    /// 详情页同客户历史订单条数
    pub recent_orders_limit: u32,
    /// 客户画像展示缺省: 信任评分
    pub default_rating: f64,
    /// 客户画像展示缺省: 可靠度
    pub default_reliability: f64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: "order_core.db".to_string(),
            recent_orders_limit: RECENT_ORDERS_LIMIT,
            default_rating: DEFAULT_RATING,
            default_reliability: DEFAULT_RELIABILITY,
        }
    }
}

impl CoreConfig {
    /// 从 JSON 文件加载配置,文件缺失时返回缺省配置
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_falls_back_to_default() {
        let config = CoreConfig::load(Path::new("/nonexistent/config.json")).unwrap();
        assert_eq!(config.db_path, "order_core.db");
        assert_eq!(config.recent_orders_limit, 5);
        assert_eq!(config.default_rating, 4.5);
        assert_eq!(config.default_reliability, 90.0);
    }

    #[test]
    fn test_partial_config_keeps_remaining_defaults() {
        let config: CoreConfig =
            serde_json::from_str(r#"{ "recentOrdersLimit": 3 }"#).unwrap();
        assert_eq!(config.recent_orders_limit, 3);
        assert_eq!(config.db_path, "order_core.db");
        assert_eq!(config.default_rating, 4.5);
    }
}

// ==========================================
// 订单编排核心 - 自动化规则领域模型
// ==========================================
// 依据: Order_Core_Spec.md §2 - AutomationRule / AutomationLogEntry
// 红线: 规则判定顺序 = 插入顺序 (决定日志序,不影响命中集合)
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// RuleCondition - 规则条件
// ==========================================
// 语义: 存在的子条件 AND; 缺失的子条件恒通过; 全缺失匹配一切
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    #[serde(default)]
    pub customer_type: Option<String>,    // 客户类型必须相等
    #[serde(default)]
    pub min_value: Option<f64>,           // total >= min_value (含边界)
    #[serde(default)]
    pub product_category: Option<String>, // 任一行项类目相等
}

impl RuleCondition {
    /// 条件是否为空 (空条件匹配一切订单)
    pub fn is_empty(&self) -> bool {
        self.customer_type.is_none()
            && self.min_value.is_none()
            && self.product_category.is_none()
    }
}

// ==========================================
// AutomationRule - 自动化规则
// ==========================================
// action 对引擎不透明,执行仅模拟/记日志 (命名的扩展点)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationRule {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub condition: RuleCondition,
    #[serde(default)]
    pub action: JsonValue,
}

// ==========================================
// AutomationLogEntry - 规则执行日志
// ==========================================
// 进程生命周期内存保存,规格不要求持久化
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationLogEntry {
    pub rule_id: String,
    pub order_id: String,
    pub executed_at: DateTime<Utc>,
    pub result: String, // "applied" (执行模拟结果)
}

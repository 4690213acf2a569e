// ==========================================
// 订单编排核心 - 账户领域模型
// ==========================================
// 依据: Order_Core_Spec.md §2 - AccountProfile
// 说明: 认证/注册在范围外,本核心只读账户画像
// ==========================================

use crate::domain::types::{AccountRole, CustomerTier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// AccountProfile - 账户画像
// ==========================================
// 用途: 评分只用 tier; rating/reliability/preferences 仅读侧展示
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub account_id: String,
    pub name: Option<String>,
    pub role: Option<AccountRole>,
    #[serde(default)]
    pub tier: Option<CustomerTier>,         // 缺失按 new 档计分
    #[serde(default)]
    pub rating: Option<f64>,                // 信任评分 (展示缺省 4.5)
    #[serde(default)]
    pub reliability_score: Option<f64>,     // 可靠度 (展示缺省 90)
    #[serde(default)]
    pub preferences: Vec<String>,           // 偏好标签
    pub created_at: DateTime<Utc>,
}

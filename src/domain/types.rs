// ==========================================
// 订单编排核心 - 领域类型定义
// ==========================================
// 依据: Order_Core_Spec.md - §2 数据模型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 订单状态 (Order Status)
// ==========================================
// 红线: 状态为开放集合,规范值之外允许 bulk updateStatus 写入自定义值
// 序列化格式: 小写字符串 (与看板约定一致)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,   // 待处理
    Confirmed, // 已确认
    Cancelled, // 已取消
    Scheduled, // 已排期
    Delivered, // 已送达
    Custom(String), // 自定义状态 (bulk updateStatus 写入)
}

impl OrderStatus {
    /// 状态字符串表示
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Scheduled => "scheduled",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Custom(s) => s.as_str(),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => OrderStatus::Pending,
            "confirmed" => OrderStatus::Confirmed,
            "cancelled" => OrderStatus::Cancelled,
            "scheduled" => OrderStatus::Scheduled,
            "delivered" => OrderStatus::Delivered,
            other => OrderStatus::Custom(other.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        OrderStatus::from(s.as_str())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 客户等级 (Customer Tier)
// ==========================================
// 依据: Order_Core_Spec.md §3 PriorityScorer - premium/regular/new
// 红线: 未知等级字符串按 new 处理 (与原始实现对齐,不猜测其他缺省)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    Premium, // 核心客户
    Regular, // 常规客户
    New,     // 新客户
}

impl CustomerTier {
    /// 从数据库字符串解析 (未知值归入 New)
    pub fn parse(s: &str) -> Self {
        match s {
            "premium" => CustomerTier::Premium,
            "regular" => CustomerTier::Regular,
            _ => CustomerTier::New,
        }
    }
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerTier::Premium => write!(f, "premium"),
            CustomerTier::Regular => write!(f, "regular"),
            CustomerTier::New => write!(f, "new"),
        }
    }
}

// ==========================================
// 账户角色 (Account Role)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Vendor,   // 采购商 (下单方)
    Supplier, // 供应商 (履约方)
}

impl AccountRole {
    /// 从数据库字符串解析
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "vendor" => Some(AccountRole::Vendor),
            "supplier" => Some(AccountRole::Supplier),
            _ => None,
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRole::Vendor => write!(f, "vendor"),
            AccountRole::Supplier => write!(f, "supplier"),
        }
    }
}

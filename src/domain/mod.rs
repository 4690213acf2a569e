// ==========================================
// 订单编排核心 - 领域层
// ==========================================
// 职责: 实体与类型定义,无业务逻辑
// ==========================================

pub mod account;
pub mod automation;
pub mod order;
pub mod types;

// 重导出核心实体
pub use account::AccountProfile;
pub use automation::{AutomationLogEntry, AutomationRule, RuleCondition};
pub use order::{
    InteractionLog, ModificationRecord, Order, OrderItem, PerformanceMetrics, StatusHistoryEntry,
};
pub use types::{AccountRole, CustomerTier, OrderStatus};

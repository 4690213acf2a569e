// ==========================================
// 订单编排核心 - 引擎层
// ==========================================
// 职责: 业务规则与编排逻辑 (评分/排队/详情/批量/审批/自动化)
// ==========================================

pub mod bulk;
pub mod collaborators;
pub mod detail;
pub mod modification;
pub mod priority;
pub mod queue;
pub mod repositories;
pub mod rules;

// 重导出核心引擎
pub use bulk::{BulkAction, BulkActionError, BulkActionExecutor, BulkActionReport};
pub use collaborators::{
    CatalogProvider, ItemEnrichment, NoopCatalog, NoopNotifier, NotificationSink,
};
pub use detail::{OrderDetailAssembler, OrderDetailView};
pub use modification::ModificationWorkflow;
pub use priority::PriorityScorer;
pub use queue::{OrderQueue, QueueStats, ScoredOrder};
pub use repositories::CoreRepositories;
pub use rules::RuleEngine;

// ==========================================
// 订单编排核心 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod account_repo;
pub mod error;
pub mod order_repo;

// 重导出核心仓储
pub use account_repo::AccountRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use order_repo::{OrderPatch, OrderRepository};

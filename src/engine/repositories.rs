// ==========================================
// 订单编排核心 - 引擎层仓储聚合
// ==========================================
// 职责: 聚合编排引擎所需的 Repository,简化依赖注入
// ==========================================

use std::sync::Arc;

use crate::repository::{AccountRepository, OrderRepository};

/// 编排引擎仓储集合
///
/// 将订单/账户仓储合并为一个结构体参数,便于各引擎共享注入。
#[derive(Clone)]
pub struct CoreRepositories {
    /// 订单仓储
    pub order_repo: Arc<OrderRepository>,
    /// 账户仓储
    pub account_repo: Arc<AccountRepository>,
}

impl CoreRepositories {
    /// 创建新的仓储集合
    pub fn new(order_repo: Arc<OrderRepository>, account_repo: Arc<AccountRepository>) -> Self {
        Self {
            order_repo,
            account_repo,
        }
    }
}

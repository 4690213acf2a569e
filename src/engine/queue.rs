// ==========================================
// 订单编排核心 - 订单队列引擎
// ==========================================
// 依据: Order_Core_Spec.md §3 OrderQueue
// 红线: 客户解析必须一次批量查询 (杜绝 N+1)
// 红线: 按分降序稳定排序,同分保持装载顺序
// ==========================================

use crate::domain::order::Order;
use crate::domain::types::OrderStatus;
use crate::engine::priority::PriorityScorer;
use crate::engine::repositories::CoreRepositories;
use crate::repository::RepositoryResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

// ==========================================
// ScoredOrder - 带优先级分的订单
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredOrder {
    #[serde(flatten)]
    pub order: Order,
    pub priority_score: i64,
}

// ==========================================
// QueueStats - 队列运营统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    pub total_pending: usize,       // status == pending 的订单数
    pub avg_processing_time: f64,   // 仅统计上报了 processing_time 的订单; 无人上报为 0
    pub total_orders: usize,        // 全量订单数 (无分页口径)
}

// ==========================================
// OrderQueue - 订单队列引擎
// ==========================================
pub struct OrderQueue {
    repos: CoreRepositories,
    scorer: PriorityScorer,
}

impl OrderQueue {
    /// 创建新的队列引擎
    pub fn new(repos: CoreRepositories) -> Self {
        Self {
            repos,
            scorer: PriorityScorer::new(),
        }
    }

    /// 构建供应商的优先级工作队列
    ///
    /// 流程:
    /// 1. 装载该供应商全部订单
    /// 2. 去重收集 customer_id,一次批量查询账户
    /// 3. 逐单评分 (客户缺失按默认画像降级,从不让整体失败)
    /// 4. 按分降序稳定排序 + 聚合统计
    pub fn build_queue(
        &self,
        supplier_id: &str,
    ) -> RepositoryResult<(Vec<ScoredOrder>, QueueStats)> {
        let orders = self.repos.order_repo.find_by_supplier(supplier_id)?;

        // 去重后的客户 ID 集合 (BTreeSet 保证查询参数顺序确定)
        let customer_ids: Vec<String> = orders
            .iter()
            .map(|o| o.customer_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let customers = self.repos.account_repo.find_by_ids(&customer_ids)?;

        let now = Utc::now();
        let stats = aggregate_stats(&orders);

        let mut scored: Vec<ScoredOrder> = orders
            .into_iter()
            .map(|order| {
                let customer = customers.get(&order.customer_id);
                let priority_score = self.scorer.score(&order, customer, now);
                ScoredOrder {
                    order,
                    priority_score,
                }
            })
            .collect();

        // Vec::sort_by 是稳定排序: 同分订单保持装载顺序
        scored.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));

        debug!(
            "队列构建完成: supplier_id={}, orders={}, pending={}",
            supplier_id, stats.total_orders, stats.total_pending
        );
        Ok((scored, stats))
    }
}

/// 聚合队列统计
///
/// avg_processing_time 的分子分母都只含上报了 processing_time 的订单。
fn aggregate_stats(orders: &[Order]) -> QueueStats {
    let total_pending = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending)
        .count();

    let mut total_time = 0.0;
    let mut reporting = 0usize;
    for order in orders {
        if let Some(t) = order.processing_time() {
            total_time += t;
            reporting += 1;
        }
    }
    let avg_processing_time = if reporting > 0 {
        total_time / reporting as f64
    } else {
        0.0
    };

    QueueStats {
        total_pending,
        avg_processing_time,
        total_orders: orders.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::PerformanceMetrics;
    use chrono::Utc;

    fn order_with(status: OrderStatus, processing_time: Option<f64>) -> Order {
        Order {
            order_no: "ORD".to_string(),
            supplier_id: "SUP".to_string(),
            customer_id: "CUST".to_string(),
            customer_type: None,
            items: vec![],
            status,
            total: None,
            delivery_address: None,
            delivery_date: None,
            payment_method: None,
            payment_status: None,
            payment_transaction: None,
            notes: None,
            status_history: vec![],
            modification_history: vec![],
            interaction_logs: vec![],
            performance_metrics: processing_time.map(|t| PerformanceMetrics {
                processing_time: Some(t),
            }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stats_counts_pending_and_reporting_orders_only() {
        let orders = vec![
            order_with(OrderStatus::Pending, Some(4.0)),
            order_with(OrderStatus::Confirmed, None),
            order_with(OrderStatus::Pending, Some(8.0)),
            order_with(OrderStatus::Cancelled, None),
        ];
        let stats = aggregate_stats(&orders);
        assert_eq!(stats.total_pending, 2);
        assert_eq!(stats.total_orders, 4);
        // 平均只除以上报了耗时的 2 单
        assert!((stats.avg_processing_time - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_avg_processing_time_zero_when_nobody_reports() {
        let orders = vec![
            order_with(OrderStatus::Pending, None),
            order_with(OrderStatus::Delivered, None),
        ];
        let stats = aggregate_stats(&orders);
        assert_eq!(stats.avg_processing_time, 0.0);
    }
}

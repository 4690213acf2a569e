// ==========================================
// 订单编排核心 - 自动化规则引擎
// ==========================================
// 依据: Order_Core_Spec.md §3 RuleEngine
// 红线: 规则集为显式持有的状态对象 (RwLock<Arc<Vec<_>>>),
//       save_rules 整体原子替换; evaluate 先取 Arc 快照再判定,
//       单次判定从不混用新旧规则
// ==========================================

use crate::domain::automation::{AutomationLogEntry, AutomationRule};
use crate::domain::order::Order;
use chrono::Utc;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info};

// ==========================================
// RuleEngine - 自动化规则引擎
// ==========================================
pub struct RuleEngine {
    /// 规则集快照 (原子换指针,last-writer-wins)
    rules: RwLock<Arc<Vec<AutomationRule>>>,
    /// 执行日志 (进程生命周期,仅内存)
    logs: Mutex<Vec<AutomationLogEntry>>,
}

impl RuleEngine {
    /// 创建空规则集引擎
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(Arc::new(Vec::new())),
            logs: Mutex::new(Vec::new()),
        }
    }

    /// 当前规则集快照
    pub fn rules(&self) -> Vec<AutomationRule> {
        self.snapshot().as_ref().clone()
    }

    /// 整体替换规则集 (原子换指针,不做合并)
    pub fn save_rules(&self, rules: Vec<AutomationRule>) {
        let count = rules.len();
        *self
            .rules
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Arc::new(rules);
        info!("自动化规则集已替换: count={}", count);
    }

    /// 对单个订单判定全部规则
    ///
    /// 按插入顺序逐条判定;存在的条件键全部成立才命中;
    /// 命中即追加执行日志 (动作执行是命名的扩展点,仅模拟)。
    pub fn evaluate(&self, order: &Order) -> Vec<AutomationRule> {
        // 先取快照: 并发 save_rules 不影响本次判定
        let snapshot = self.snapshot();

        let mut applied = Vec::new();
        for rule in snapshot.iter() {
            if !rule_matches(rule, order) {
                continue;
            }
            debug!(
                "规则命中: rule_id={}, order_no={}",
                rule.id, order.order_no
            );
            self.push_log(AutomationLogEntry {
                rule_id: rule.id.clone(),
                order_id: order.order_no.clone(),
                executed_at: Utc::now(),
                result: "applied".to_string(),
            });
            applied.push(rule.clone());
        }
        applied
    }

    /// 执行日志快照 (测试与排障用)
    pub fn logs(&self) -> Vec<AutomationLogEntry> {
        self.logs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn snapshot(&self) -> Arc<Vec<AutomationRule>> {
        Arc::clone(
            &self
                .rules
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    fn push_log(&self, entry: AutomationLogEntry) {
        self.logs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry);
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 单规则判定: 存在的条件键 AND,缺失恒通过
fn rule_matches(rule: &AutomationRule, order: &Order) -> bool {
    let cond = &rule.condition;

    if let Some(customer_type) = &cond.customer_type {
        if order.customer_type.as_deref() != Some(customer_type.as_str()) {
            return false;
        }
    }

    if let Some(min_value) = cond.min_value {
        // total 缺失按 0; 含边界 (total == min_value 命中)
        if order.total.unwrap_or(0.0) < min_value {
            return false;
        }
    }

    if let Some(category) = &cond.product_category {
        let any_match = order
            .items
            .iter()
            .any(|item| item.category.as_deref() == Some(category.as_str()));
        if !any_match {
            return false;
        }
    }

    true
}

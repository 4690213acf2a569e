// ==========================================
// 订单编排核心 - 自动化规则 API
// ==========================================
// 职责: 规则集读取/整体替换,以及入单时的规则处理钩子
// - GET  /orders/automation-rules     → get_rules
// - POST /orders/automation-rules     → save_rules
// - POST /orders/automation/process   → process_order
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::automation::AutomationRule;
use crate::domain::order::Order;
use crate::engine::rules::RuleEngine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ==========================================
// 请求/响应 DTO
// ==========================================

/// GET /orders/automation-rules 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesResponse {
    pub rules: Vec<AutomationRule>,
}

/// POST /orders/automation/process 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOrderResponse {
    pub applied_rules: Vec<AutomationRule>,
}

// ==========================================
// AutomationApi - 自动化业务接口
// ==========================================
pub struct AutomationApi {
    engine: Arc<RuleEngine>,
}

impl AutomationApi {
    /// 创建自动化 API
    pub fn new(engine: Arc<RuleEngine>) -> Self {
        Self { engine }
    }

    /// 当前规则集
    pub fn get_rules(&self) -> RulesResponse {
        RulesResponse {
            rules: self.engine.rules(),
        }
    }

    /// 整体替换规则集 (last-writer-wins)
    ///
    /// 规则 id 不允许为空,避免日志无法溯源。
    pub fn save_rules(&self, rules: Vec<AutomationRule>) -> ApiResult<()> {
        for rule in &rules {
            if rule.id.trim().is_empty() {
                return Err(ApiError::InvalidInput("规则 id 不能为空".to_string()));
            }
        }
        self.engine.save_rules(rules);
        Ok(())
    }

    /// 入单时的规则处理钩子 (独立于队列,针对新到订单)
    pub fn process_order(&self, order: &Order) -> ProcessOrderResponse {
        ProcessOrderResponse {
            applied_rules: self.engine.evaluate(order),
        }
    }
}

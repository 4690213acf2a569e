// ==========================================
// 订单编排核心 - 批量操作执行引擎
// ==========================================
// 依据: Order_Core_Spec.md §3 BulkActionExecutor
// 红线: 单事务全有或全无,从不报告部分成功
// 红线: 未知 action 在解析阶段即失败,零变更
// ==========================================

use crate::domain::order::{Order, StatusHistoryEntry};
use crate::domain::types::OrderStatus;
use crate::engine::repositories::CoreRepositories;
use crate::repository::error::RepositoryError;
use crate::repository::order_repo::OrderPatch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{info, warn};

// ==========================================
// BulkAction - 批量操作 (带标签联合)
// ==========================================
// 每个变体只携带自己需要的载荷,消除字符串分发
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum BulkAction {
    /// 接单: status → confirmed
    Accept,
    /// 拒单: status → cancelled,原因写入历史备注
    Reject { reason: Option<String> },
    /// 排期: status 不变,更新交货日期
    Schedule { delivery_date: DateTime<Utc> },
    /// 状态改写: 允许自定义状态值
    UpdateStatus { status: OrderStatus },
}

/// 批量操作的线上载荷 (宽松解析,缺失字段由各 action 自行校验)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePayload {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    status: Option<String>,
}

impl BulkAction {
    /// 从线上 {action, payload} 形式解析
    ///
    /// # 错误
    /// - 未知 action 名 → Validation (调用方零变更即返回)
    /// - schedule 缺 deliveryDate / updateStatus 缺 status → Validation
    pub fn parse(name: &str, payload: Option<&JsonValue>) -> Result<Self, BulkActionError> {
        let payload: WirePayload = match payload {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| BulkActionError::Validation(format!("载荷解析失败: {}", e)))?,
            None => WirePayload::default(),
        };

        match name {
            "accept" => Ok(BulkAction::Accept),
            "reject" => Ok(BulkAction::Reject {
                reason: payload.reason,
            }),
            "schedule" => {
                let delivery_date = payload.delivery_date.ok_or_else(|| {
                    BulkActionError::Validation("schedule 操作缺少 deliveryDate".to_string())
                })?;
                Ok(BulkAction::Schedule { delivery_date })
            }
            "updateStatus" => {
                let status = payload.status.ok_or_else(|| {
                    BulkActionError::Validation("updateStatus 操作缺少 status".to_string())
                })?;
                Ok(BulkAction::UpdateStatus {
                    status: OrderStatus::from(status),
                })
            }
            other => Err(BulkActionError::Validation(format!(
                "不支持的批量操作: {}",
                other
            ))),
        }
    }

    /// 操作名 (报告与日志口径)
    pub fn name(&self) -> &'static str {
        match self {
            BulkAction::Accept => "accept",
            BulkAction::Reject { .. } => "reject",
            BulkAction::Schedule { .. } => "schedule",
            BulkAction::UpdateStatus { .. } => "updateStatus",
        }
    }

    /// 单订单报告日志行
    fn log_line(&self) -> String {
        match self {
            BulkAction::Accept => "Order accepted".to_string(),
            BulkAction::Reject { .. } => "Order rejected".to_string(),
            BulkAction::Schedule { .. } => "Order scheduled".to_string(),
            BulkAction::UpdateStatus { status } => {
                format!("Status updated to {}", status)
            }
        }
    }

    /// 生成存储侧补丁 (恰好追加一条历史)
    fn to_patch(&self, order_no: &str, timestamp: DateTime<Utc>) -> OrderPatch {
        match self {
            BulkAction::Accept => OrderPatch {
                order_no: order_no.to_string(),
                set_status: Some(OrderStatus::Confirmed),
                set_delivery_date: None,
                history_entry: StatusHistoryEntry {
                    status: OrderStatus::Confirmed,
                    timestamp,
                    notes: None,
                },
            },
            BulkAction::Reject { reason } => OrderPatch {
                order_no: order_no.to_string(),
                set_status: Some(OrderStatus::Cancelled),
                set_delivery_date: None,
                history_entry: StatusHistoryEntry {
                    status: OrderStatus::Cancelled,
                    timestamp,
                    notes: reason.clone(),
                },
            },
            BulkAction::Schedule { delivery_date } => OrderPatch {
                order_no: order_no.to_string(),
                set_status: None, // 排期不改操作状态
                set_delivery_date: Some(*delivery_date),
                history_entry: StatusHistoryEntry {
                    status: OrderStatus::Scheduled,
                    timestamp,
                    notes: Some(format!(
                        "Scheduled for {}",
                        delivery_date.format("%Y-%m-%d")
                    )),
                },
            },
            BulkAction::UpdateStatus { status } => OrderPatch {
                order_no: order_no.to_string(),
                set_status: Some(status.clone()),
                set_delivery_date: None,
                history_entry: StatusHistoryEntry {
                    status: status.clone(),
                    timestamp,
                    notes: None,
                },
            },
        }
    }
}

// ==========================================
// 错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum BulkActionError {
    /// 输入校验失败,零变更
    #[error("批量操作参数无效: {0}")]
    Validation(String),

    /// 事务中止,整批已回滚;附带尝试过的 action/ids 供重试
    #[error("批量操作中止并回滚: action={action}, order_ids={order_ids:?}: {source}")]
    TransactionAborted {
        action: String,
        order_ids: Vec<String>,
        #[source]
        source: RepositoryError,
    },
}

// ==========================================
// BulkActionReport - 单订单执行报告
// ==========================================
// 口径: 报告存在 ⇒ 整批全部生效 (从不部分成功)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionReport {
    pub order_id: String,
    pub result: Order, // 更新后的订单
    pub log: String,
}

// ==========================================
// BulkActionExecutor - 批量操作执行引擎
// ==========================================
pub struct BulkActionExecutor {
    repos: CoreRepositories,
}

impl BulkActionExecutor {
    /// 创建新的批量执行引擎
    pub fn new(repos: CoreRepositories) -> Self {
        Self { repos }
    }

    /// 对一组订单原子应用同一操作
    ///
    /// 补丁按调用方 id 顺序生成与应用,但整批在一个事务内,
    /// 外部观察者看不到部分交错; 任一 id 缺失即整批回滚。
    pub fn apply_bulk(
        &self,
        action: &BulkAction,
        order_ids: &[String],
    ) -> Result<Vec<BulkActionReport>, BulkActionError> {
        if order_ids.is_empty() {
            return Err(BulkActionError::Validation(
                "order_ids 不能为空".to_string(),
            ));
        }

        let now = Utc::now();
        let patches: Vec<OrderPatch> = order_ids
            .iter()
            .map(|id| action.to_patch(id, now))
            .collect();

        let updated = self
            .repos
            .order_repo
            .apply_patches(&patches)
            .map_err(|source| {
                warn!(
                    "批量操作回滚: action={}, order_ids={:?}, cause={}",
                    action.name(),
                    order_ids,
                    source
                );
                BulkActionError::TransactionAborted {
                    action: action.name().to_string(),
                    order_ids: order_ids.to_vec(),
                    source,
                }
            })?;

        info!(
            "批量操作提交: action={}, count={}",
            action.name(),
            updated.len()
        );

        let log = action.log_line();
        Ok(updated
            .into_iter()
            .map(|order| BulkActionReport {
                order_id: order.order_no.clone(),
                log: log.clone(),
                result: order,
            })
            .collect())
    }
}

// ==========================================
// 订单编排核心 - 订单 API
// ==========================================
// 职责: 暴露给消费看板的业务接口 (HTTP 接线在范围外)
// - GET  /orders/queue          → get_order_queue
// - GET  /orders/:id/details    → get_order_details
// - POST /orders/bulk-action    → bulk_order_actions
// - PUT  /orders/:id/modify     → modify_order
// 约束: 输入校验在本层完成,校验失败零变更
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::CoreConfig;
use crate::engine::bulk::{BulkAction, BulkActionExecutor, BulkActionReport};
use crate::engine::collaborators::{CatalogProvider, NotificationSink};
use crate::engine::detail::{OrderDetailAssembler, OrderDetailView};
use crate::engine::modification::ModificationWorkflow;
use crate::engine::queue::{OrderQueue, QueueStats, ScoredOrder};
use crate::engine::repositories::CoreRepositories;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;

// ==========================================
// 请求/响应 DTO
// ==========================================

/// GET /orders/queue 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQueueResponse {
    pub queue: Vec<ScoredOrder>,
    pub stats: QueueStats,
}

/// POST /orders/bulk-action 请求体 {action, orderIds, payload}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionRequest {
    pub action: String,
    pub order_ids: Vec<String>,
    #[serde(default)]
    pub payload: Option<JsonValue>,
}

/// POST /orders/bulk-action 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionResponse {
    pub success: bool,
    pub report: Vec<BulkActionReport>,
}

/// PUT /orders/:id/modify 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyOrderRequest {
    #[serde(default)]
    pub change_type: Option<String>,
    #[serde(default)]
    pub change_details: Option<JsonValue>,
}

/// PUT /orders/:id/modify 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyOrderResponse {
    pub success: bool,
    pub message: String,
}

// ==========================================
// OrderApi - 订单业务接口
// ==========================================
pub struct OrderApi {
    queue: OrderQueue,
    detail: OrderDetailAssembler,
    bulk: BulkActionExecutor,
    modification: ModificationWorkflow,
}

impl OrderApi {
    /// 创建订单 API
    ///
    /// # 参数
    /// - `repos`: 仓储集合
    /// - `catalog`: 目录协作者 (行项补全)
    /// - `notifier`: 通知协作者 (修改审批钩子)
    pub fn new(
        repos: CoreRepositories,
        catalog: Arc<dyn CatalogProvider>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self::with_config(repos, catalog, notifier, &CoreConfig::default())
    }

    /// 按配置创建订单 API (详情页展示口径可调)
    pub fn with_config(
        repos: CoreRepositories,
        catalog: Arc<dyn CatalogProvider>,
        notifier: Arc<dyn NotificationSink>,
        config: &CoreConfig,
    ) -> Self {
        Self {
            queue: OrderQueue::new(repos.clone()),
            detail: OrderDetailAssembler::with_config(repos.clone(), catalog, config),
            bulk: BulkActionExecutor::new(repos.clone()),
            modification: ModificationWorkflow::new(repos, notifier),
        }
    }

    /// 供应商优先级工作队列
    pub fn get_order_queue(&self, supplier_id: &str) -> ApiResult<OrderQueueResponse> {
        if supplier_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("supplierId 不能为空".to_string()));
        }
        let (queue, stats) = self.queue.build_queue(supplier_id)?;
        Ok(OrderQueueResponse { queue, stats })
    }

    /// 订单详情组合视图 (订单缺失 → NotFound,404 等价)
    pub async fn get_order_details(&self, order_no: &str) -> ApiResult<OrderDetailView> {
        if order_no.trim().is_empty() {
            return Err(ApiError::InvalidInput("orderId 不能为空".to_string()));
        }
        Ok(self.detail.get_details(order_no).await?)
    }

    /// 批量订单操作 (单事务,全有或全无)
    ///
    /// 未知 action 在解析阶段即失败,不触达存储;
    /// 报告存在 ⇒ 全部订单已生效。
    pub fn bulk_order_actions(&self, request: &BulkActionRequest) -> ApiResult<BulkActionResponse> {
        if request.order_ids.is_empty() {
            return Err(ApiError::InvalidInput("orderIds 不能为空".to_string()));
        }
        let action = BulkAction::parse(&request.action, request.payload.as_ref())?;
        let report = self.bulk.apply_bulk(&action, &request.order_ids)?;
        Ok(BulkActionResponse {
            success: true,
            report,
        })
    }

    /// 提交订单修改请求 (待审批,只追加历史)
    pub async fn modify_order(
        &self,
        order_no: &str,
        request: &ModifyOrderRequest,
        requester: &str,
    ) -> ApiResult<ModifyOrderResponse> {
        let change_type = request
            .change_type
            .as_deref()
            .ok_or_else(|| ApiError::InvalidInput("changeType 不能为空".to_string()))?;

        self.modification
            .request_modification(
                order_no,
                change_type,
                request.change_details.clone(),
                requester,
            )
            .await?;

        Ok(ModifyOrderResponse {
            success: true,
            message: "Modification request submitted for approval".to_string(),
        })
    }
}

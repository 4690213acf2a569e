// ==========================================
// 订单编排核心 - 修改审批工作流
// ==========================================
// 依据: Order_Core_Spec.md §3 ModificationWorkflow
// 红线: 只追加 modification_history,从不直接改操作字段;
//       审批/执行是独立的下游步骤 (外部协作者)
// ==========================================

use crate::domain::order::ModificationRecord;
use crate::engine::collaborators::NotificationSink;
use crate::engine::repositories::CoreRepositories;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

// ==========================================
// ModificationWorkflow - 修改审批工作流
// ==========================================
pub struct ModificationWorkflow {
    repos: CoreRepositories,
    notifier: Arc<dyn NotificationSink>,
}

impl ModificationWorkflow {
    /// 创建新的修改工作流
    pub fn new(repos: CoreRepositories, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { repos, notifier }
    }

    /// 提交一条待审批的修改请求
    ///
    /// 追加 {change_type, changed_by, change_details, approved:false,
    /// approval_status:"pending", timestamp:now};时间戳服务端赋值。
    ///
    /// # 错误
    /// - ValidationError: change_type 为空或 change_details 缺失
    /// - NotFound: 订单号不存在
    pub async fn request_modification(
        &self,
        order_no: &str,
        change_type: &str,
        change_details: Option<JsonValue>,
        requester: &str,
    ) -> RepositoryResult<ModificationRecord> {
        if change_type.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "changeType 不能为空".to_string(),
            ));
        }
        let change_details = match change_details {
            Some(v) if !v.is_null() => v,
            _ => {
                return Err(RepositoryError::ValidationError(
                    "changeDetails 不能为空".to_string(),
                ))
            }
        };

        let record = ModificationRecord {
            request_id: Uuid::new_v4().to_string(),
            change_type: change_type.to_string(),
            changed_by: requester.to_string(),
            change_details,
            approved: false,
            approval_status: "pending".to_string(),
            timestamp: Utc::now(),
        };

        self.repos
            .order_repo
            .append_modification(order_no, &record)?;

        info!(
            "修改请求已提交: order_no={}, change_type={}, request_id={}",
            order_no, change_type, record.request_id
        );

        // 通知待审批方: 尽力而为,失败只记 warn,不回滚已追加的请求
        if let Err(e) = self
            .notifier
            .notify_modification_requested(order_no, &record)
            .await
        {
            warn!("修改请求通知发送失败: order_no={}, err={}", order_no, e);
        }

        Ok(record)
    }
}

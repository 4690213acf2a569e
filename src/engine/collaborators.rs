// ==========================================
// 订单编排核心 - 外部协作者接口
// ==========================================
// 依据: Order_Core_Spec.md §0 - 范围外系统以黑盒协作者建模
// 说明: 目录服务/通知服务是远程调用边界,trait 声明为异步
// ==========================================

use crate::domain::order::{ModificationRecord, OrderItem};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// ItemEnrichment - 目录侧行项补全数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEnrichment {
    pub inventory_status: String,
    pub specifications: JsonValue,
    pub images: Vec<String>,
    pub description: String,
}

impl Default for ItemEnrichment {
    /// 目录协作者不可用时的占位缺省值
    fn default() -> Self {
        Self {
            inventory_status: "Available".to_string(),
            specifications: JsonValue::Object(Default::default()),
            images: vec![],
            description: String::new(),
        }
    }
}

// ==========================================
// CatalogProvider - 商品目录协作者
// ==========================================
// 本核心不计算库存/规格/图片,只透传;不可用时用缺省值
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// 查询单个行项的补全数据;None 表示目录侧无数据
    async fn enrich(&self, item: &OrderItem) -> Option<ItemEnrichment>;
}

/// 目录协作者缺省实现 (永远返回 None,触发占位缺省值)
pub struct NoopCatalog;

#[async_trait]
impl CatalogProvider for NoopCatalog {
    async fn enrich(&self, _item: &OrderItem) -> Option<ItemEnrichment> {
        None
    }
}

// ==========================================
// NotificationSink - 通知协作者
// ==========================================
// 命名的钩子: 修改请求提交后通知待审批方;尽力而为,失败不回滚
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify_modification_requested(
        &self,
        order_no: &str,
        record: &ModificationRecord,
    ) -> anyhow::Result<()>;
}

/// 通知协作者缺省实现 (静默丢弃)
pub struct NoopNotifier;

#[async_trait]
impl NotificationSink for NoopNotifier {
    async fn notify_modification_requested(
        &self,
        _order_no: &str,
        _record: &ModificationRecord,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

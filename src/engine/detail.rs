// ==========================================
// 订单编排核心 - 订单详情聚合引擎
// ==========================================
// 依据: Order_Core_Spec.md §3 OrderDetailAssembler
// 职责: 单订单 + 客户画像 + 历史订单 + 时间线 + 修改历史的只读组合视图
// 红线: 只读,不做任何变更; 展示缺省值不落库
// ==========================================

use crate::config::CoreConfig;
use crate::domain::account::AccountProfile;
use crate::domain::order::{
    InteractionLog, ModificationRecord, Order, OrderItem, StatusHistoryEntry,
};
use crate::domain::types::CustomerTier;
use crate::engine::collaborators::{CatalogProvider, ItemEnrichment};
use crate::engine::repositories::CoreRepositories;
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// 详情页同客户历史订单条数 (配置缺省值)
pub const RECENT_ORDERS_LIMIT: u32 = 5;

/// 客户画像展示缺省: 信任评分
pub const DEFAULT_RATING: f64 = 4.5;
/// 客户画像展示缺省: 可靠度
pub const DEFAULT_RELIABILITY: f64 = 90.0;

// ==========================================
// 组合视图结构
// ==========================================

/// 客户画像视图 (缺省回填后的展示口径)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfileView {
    pub account_id: String,
    pub name: Option<String>,
    pub tier: Option<CustomerTier>,
    pub rating: f64,
    pub reliability_score: f64,
    pub preferences: Vec<String>,
    pub order_history: Vec<Order>, // 最近 5 笔其他订单,新→旧
}

/// 目录补全后的行项视图
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedItem {
    #[serde(flatten)]
    pub item: OrderItem,
    #[serde(flatten)]
    pub enrichment: ItemEnrichment,
}

/// 支付信息视图
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub method: Option<String>,
    pub status: Option<String>,
    pub transaction: JsonValue,
}

/// 订单详情组合视图
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailView {
    pub order: Order,
    pub customer: CustomerProfileView,
    pub products: Vec<EnrichedItem>,
    pub payment: PaymentView,
    pub timeline: Vec<StatusHistoryEntry>,
    pub communication: Vec<InteractionLog>,
    pub modifications: Vec<ModificationRecord>,
}

// ==========================================
// OrderDetailAssembler - 详情聚合引擎
// ==========================================
pub struct OrderDetailAssembler {
    repos: CoreRepositories,
    catalog: Arc<dyn CatalogProvider>,
    recent_orders_limit: u32,
    default_rating: f64,
    default_reliability: f64,
}

impl OrderDetailAssembler {
    /// 创建新的详情聚合引擎 (缺省展示口径)
    pub fn new(repos: CoreRepositories, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self::with_config(repos, catalog, &CoreConfig::default())
    }

    /// 按配置创建详情聚合引擎 (历史条数/画像缺省值可调)
    pub fn with_config(
        repos: CoreRepositories,
        catalog: Arc<dyn CatalogProvider>,
        config: &CoreConfig,
    ) -> Self {
        Self {
            repos,
            catalog,
            recent_orders_limit: config.recent_orders_limit,
            default_rating: config.default_rating,
            default_reliability: config.default_reliability,
        }
    }

    /// 组装订单详情视图
    ///
    /// # 错误
    /// - NotFound: 订单号不存在
    pub async fn get_details(&self, order_no: &str) -> RepositoryResult<OrderDetailView> {
        let order = self
            .repos
            .order_repo
            .find_by_id(order_no)?
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Order".to_string(),
                id: order_no.to_string(),
            })?;

        // 客户画像: 账户缺失不让详情失败,按空画像回填展示缺省
        let customer = self.repos.account_repo.find_by_id(&order.customer_id)?;
        let order_history = self.repos.order_repo.find_recent_by_customer(
            &order.customer_id,
            &order.order_no,
            self.recent_orders_limit,
        )?;
        let customer = self.build_customer_view(&order.customer_id, customer, order_history);

        // 行项目录补全: 协作者无数据即占位缺省
        let mut products = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let enrichment = self.catalog.enrich(item).await.unwrap_or_default();
            products.push(EnrichedItem {
                item: item.clone(),
                enrichment,
            });
        }

        let payment = PaymentView {
            method: order.payment_method.clone(),
            status: order.payment_status.clone(),
            transaction: order
                .payment_transaction
                .clone()
                .unwrap_or(JsonValue::Object(Default::default())),
        };

        Ok(OrderDetailView {
            timeline: order.status_history.clone(),
            communication: order.interaction_logs.clone(),
            modifications: order.modification_history.clone(),
            customer,
            products,
            payment,
            order,
        })
    }

    /// 客户画像展示口径: 缺省回填评分/可靠度/空偏好
    fn build_customer_view(
        &self,
        customer_id: &str,
        account: Option<AccountProfile>,
        order_history: Vec<Order>,
    ) -> CustomerProfileView {
        match account {
            Some(account) => CustomerProfileView {
                account_id: account.account_id,
                name: account.name,
                tier: account.tier,
                rating: account.rating.unwrap_or(self.default_rating),
                reliability_score: account
                    .reliability_score
                    .unwrap_or(self.default_reliability),
                preferences: account.preferences,
                order_history,
            },
            None => CustomerProfileView {
                account_id: customer_id.to_string(),
                name: None,
                tier: None,
                rating: self.default_rating,
                reliability_score: self.default_reliability,
                preferences: vec![],
                order_history,
            },
        }
    }
}

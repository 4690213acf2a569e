// ==========================================
// 订单编排核心 - 订单领域模型
// ==========================================
// 依据: Order_Core_Spec.md §2 - Order 数据模型
// 红线: status_history / modification_history 只允许追加,
//       每次变更恰好追加一条,时间戳由服务端赋值
// 对齐: schema orders 表 (嵌套结构存 JSON 列)
// ==========================================

use crate::domain::types::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// OrderItem - 订单行项
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,            // 商品引用
    pub name: Option<String>,          // 商品名称快照
    pub price: Option<f64>,            // 单价
    pub quantity: Option<f64>,         // 数量
    pub unit: Option<String>,          // 计量单位
    #[serde(default)]
    pub category: Option<String>,      // 商品类目 (自动化规则匹配用)
    #[serde(default)]
    pub special_requirement: bool,     // 特殊要求标记 (评分 +200,整单一次)
}

// ==========================================
// StatusHistoryEntry - 状态跟踪时间线条目
// ==========================================
// 红线: 追加式,从不删除或重排
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub status: OrderStatus,           // 该节点记录的状态
    pub timestamp: DateTime<Utc>,      // 服务端赋值时间戳
    #[serde(default)]
    pub notes: Option<String>,         // 备注 (拒单原因、排期说明等)
}

// ==========================================
// ModificationRecord - 修改请求记录
// ==========================================
// 用途: 审批工作流的审计痕迹,与执行解耦
// 红线: approved 初始恒为 false, approval_status 初始恒为 "pending"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationRecord {
    pub request_id: String,            // 修改请求 ID (uuid v4)
    pub change_type: String,           // 变更类型 (quantity/date/address/...)
    pub changed_by: String,            // 请求人账户 ID
    pub change_details: JsonValue,     // 变更内容 (不透明 JSON)
    pub approved: bool,                // 审批结果 (下游流程写入)
    pub approval_status: String,       // pending / approved / rejected
    pub timestamp: DateTime<Utc>,      // 服务端赋值时间戳
}

// ==========================================
// InteractionLog - 沟通记录
// ==========================================
// 补充自原始实现 customerInteractionLogs,详情页 communication 字段
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionLog {
    pub timestamp: DateTime<Utc>,
    pub author: String,                // 留言方账户 ID
    pub message: String,
}

// ==========================================
// PerformanceMetrics - 履约统计
// ==========================================
// 用途: 队列 stats 口径,仅统计上报了 processing_time 的订单
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    #[serde(default)]
    pub processing_time: Option<f64>,  // 处理耗时 (小时)
}

// ==========================================
// Order - 订单主实体
// ==========================================
// 生命周期: 下单流程 (范围外) 创建; BulkActionExecutor 与
// ModificationWorkflow 变更; 本核心从不删除
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    // ===== 主键与归属 =====
    pub order_no: String,              // 订单号 (唯一)
    pub supplier_id: String,           // 归属供应商账户
    pub customer_id: String,           // 下单采购商账户
    #[serde(default)]
    pub customer_type: Option<String>, // 客户类型 (自动化规则匹配用)

    // ===== 订单内容 =====
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total: Option<f64>,            // 订单总额

    // ===== 交付信息 =====
    #[serde(default)]
    pub delivery_address: Option<JsonValue>,
    #[serde(default)]
    pub delivery_date: Option<DateTime<Utc>>,

    // ===== 支付信息 =====
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub payment_transaction: Option<JsonValue>,

    // ===== 备注 =====
    #[serde(default)]
    pub notes: Option<String>,

    // ===== 追加式历史 =====
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
    #[serde(default)]
    pub modification_history: Vec<ModificationRecord>,
    #[serde(default)]
    pub interaction_logs: Vec<InteractionLog>,

    // ===== 履约统计 =====
    #[serde(default)]
    pub performance_metrics: Option<PerformanceMetrics>,

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// 上报的处理耗时 (未上报返回 None,统计时排除)
    pub fn processing_time(&self) -> Option<f64> {
        self.performance_metrics
            .as_ref()
            .and_then(|m| m.processing_time)
    }
}

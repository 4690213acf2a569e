// ==========================================
// 订单编排核心 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 HTTP 路由层 (范围外) 调用
// ==========================================

pub mod automation_api;
pub mod error;
pub mod order_api;

// 重导出核心类型
pub use automation_api::{AutomationApi, ProcessOrderResponse, RulesResponse};
pub use error::{ApiError, ApiResult};
pub use order_api::{
    BulkActionRequest, BulkActionResponse, ModifyOrderRequest, ModifyOrderResponse, OrderApi,
    OrderQueueResponse,
};

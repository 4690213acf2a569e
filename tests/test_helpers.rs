// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据生成等功能
// ==========================================

use chrono::{DateTime, Duration, Utc};
use order_core::db;
use order_core::domain::account::AccountProfile;
use order_core::domain::order::{Order, OrderItem};
use order_core::domain::types::{AccountRole, CustomerTier, OrderStatus};
use order_core::engine::repositories::CoreRepositories;
use order_core::repository::{AccountRepository, OrderRepository};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema,返回仓储集合
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - CoreRepositories: 指向该库的仓储集合
pub fn setup_repos() -> (NamedTempFile, CoreRepositories) {
    let temp_file = NamedTempFile::new().expect("创建临时数据库失败");
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = db::open_sqlite_connection(&db_path).expect("打开数据库失败");
    db::init_schema(&conn).expect("初始化 schema 失败");

    let conn = Arc::new(Mutex::new(conn));
    let repos = CoreRepositories::new(
        Arc::new(OrderRepository::new(Arc::clone(&conn))),
        Arc::new(AccountRepository::new(conn)),
    );
    (temp_file, repos)
}

/// 生成测试订单 (created_at 按序号递增,保证装载顺序确定)
pub fn make_order(order_no: &str, supplier_id: &str, customer_id: &str, seq: i64) -> Order {
    let created_at: DateTime<Utc> =
        "2026-08-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap() + Duration::minutes(seq);
    Order {
        order_no: order_no.to_string(),
        supplier_id: supplier_id.to_string(),
        customer_id: customer_id.to_string(),
        customer_type: None,
        items: vec![],
        status: OrderStatus::Pending,
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
        performance_metrics: None,
        created_at,
        updated_at: created_at,
    }
}

/// 生成测试行项
pub fn make_item(product_id: &str, category: Option<&str>, special: bool) -> OrderItem {
    OrderItem {
        product_id: product_id.to_string(),
        name: Some(format!("商品-{}", product_id)),
        price: Some(10.0),
        quantity: Some(2.0),
        unit: Some("箱".to_string()),
        category: category.map(|c| c.to_string()),
        special_requirement: special,
    }
}

/// 生成测试客户账户
pub fn make_vendor(account_id: &str, tier: Option<CustomerTier>) -> AccountProfile {
    AccountProfile {
        account_id: account_id.to_string(),
        name: Some(format!("采购商-{}", account_id)),
        role: Some(AccountRole::Vendor),
        tier,
        rating: None,
        reliability_score: None,
        preferences: vec![],
        created_at: Utc::now(),
    }
}

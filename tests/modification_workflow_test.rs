// ==========================================
// 修改审批工作流集成测试
// ==========================================
// 覆盖: 只追加历史 / 不触碰操作字段 / 校验与 NotFound
// ==========================================

mod test_helpers;

use order_core::api::order_api::ModifyOrderRequest;
use order_core::api::{ApiError, OrderApi};
use order_core::domain::types::OrderStatus;
use order_core::engine::modification::ModificationWorkflow;
use order_core::engine::{NoopCatalog, NoopNotifier};
use order_core::repository::RepositoryError;
use serde_json::json;
use std::sync::Arc;

use test_helpers::{make_item, make_order, setup_repos};

#[tokio::test]
async fn test_request_appends_pending_record_only() {
    let (_db, repos) = setup_repos();
    let mut order = make_order("ORD-A", "SUP-1", "V-1", 0);
    order.total = Some(800.0);
    order.items = vec![make_item("P-1", None, false)];
    repos.order_repo.insert(&order).unwrap();

    let workflow = ModificationWorkflow::new(repos.clone(), Arc::new(NoopNotifier));
    let record = workflow
        .request_modification(
            "ORD-A",
            "quantity",
            Some(json!({ "productId": "P-1", "newQuantity": 5 })),
            "V-1",
        )
        .await
        .unwrap();

    assert!(!record.approved);
    assert_eq!(record.approval_status, "pending");
    assert_eq!(record.changed_by, "V-1");

    let stored = repos.order_repo.find_by_id("ORD-A").unwrap().unwrap();
    assert_eq!(stored.modification_history.len(), 1);
    assert_eq!(stored.modification_history[0].change_type, "quantity");

    // 操作字段不被触碰: status/total/items 原样
    assert_eq!(stored.status, OrderStatus::Pending);
    assert_eq!(stored.total, Some(800.0));
    assert_eq!(stored.items.len(), 1);
    assert!(stored.status_history.is_empty());
}

#[tokio::test]
async fn test_second_request_appends_not_replaces() {
    let (_db, repos) = setup_repos();
    repos
        .order_repo
        .insert(&make_order("ORD-A", "SUP-1", "V-1", 0))
        .unwrap();

    let workflow = ModificationWorkflow::new(repos.clone(), Arc::new(NoopNotifier));
    workflow
        .request_modification("ORD-A", "date", Some(json!({ "newDate": "2026-09-20" })), "V-1")
        .await
        .unwrap();
    workflow
        .request_modification("ORD-A", "address", Some(json!({ "city": "上海" })), "V-1")
        .await
        .unwrap();

    let stored = repos.order_repo.find_by_id("ORD-A").unwrap().unwrap();
    assert_eq!(stored.modification_history.len(), 2);
    assert_eq!(stored.modification_history[0].change_type, "date");
    assert_eq!(stored.modification_history[1].change_type, "address");
}

#[tokio::test]
async fn test_missing_change_details_is_validation_error() {
    let (_db, repos) = setup_repos();
    repos
        .order_repo
        .insert(&make_order("ORD-A", "SUP-1", "V-1", 0))
        .unwrap();

    let workflow = ModificationWorkflow::new(repos.clone(), Arc::new(NoopNotifier));
    let err = workflow
        .request_modification("ORD-A", "quantity", None, "V-1")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));

    // 校验失败零变更
    let stored = repos.order_repo.find_by_id("ORD-A").unwrap().unwrap();
    assert!(stored.modification_history.is_empty());
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let (_db, repos) = setup_repos();
    let workflow = ModificationWorkflow::new(repos, Arc::new(NoopNotifier));
    let err = workflow
        .request_modification("ORD-GONE", "quantity", Some(json!({})), "V-1")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_modify_order_via_api() {
    let (_db, repos) = setup_repos();
    repos
        .order_repo
        .insert(&make_order("ORD-A", "SUP-1", "V-1", 0))
        .unwrap();

    let api = OrderApi::new(repos.clone(), Arc::new(NoopCatalog), Arc::new(NoopNotifier));

    // changeType 缺失 → InvalidInput
    let err = api
        .modify_order(
            "ORD-A",
            &ModifyOrderRequest {
                change_type: None,
                change_details: Some(json!({})),
            },
            "V-1",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));

    let response = api
        .modify_order(
            "ORD-A",
            &ModifyOrderRequest {
                change_type: Some("quantity".to_string()),
                change_details: Some(json!({ "newQuantity": 3 })),
            },
            "V-1",
        )
        .await
        .unwrap();
    assert!(response.success);
    assert_eq!(
        response.message,
        "Modification request submitted for approval"
    );
}

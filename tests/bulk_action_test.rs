// ==========================================
// 批量操作执行引擎集成测试
// ==========================================
// 覆盖: 原子性回滚 / 历史恰好追加一条 / 未知 action 零变更
// ==========================================

mod test_helpers;

use order_core::api::order_api::BulkActionRequest;
use order_core::api::{ApiError, OrderApi};
use order_core::domain::types::OrderStatus;
use order_core::engine::bulk::{BulkAction, BulkActionError, BulkActionExecutor};
use order_core::engine::{NoopCatalog, NoopNotifier};
use serde_json::json;
use std::sync::Arc;

use test_helpers::{make_order, setup_repos};

#[test]
fn test_accept_updates_all_orders_and_appends_history() {
    let (_db, repos) = setup_repos();
    repos
        .order_repo
        .insert(&make_order("ORD-A", "SUP-1", "V-1", 0))
        .unwrap();
    repos
        .order_repo
        .insert(&make_order("ORD-B", "SUP-1", "V-1", 1))
        .unwrap();

    let executor = BulkActionExecutor::new(repos.clone());
    let report = executor
        .apply_bulk(
            &BulkAction::Accept,
            &["ORD-A".to_string(), "ORD-B".to_string()],
        )
        .unwrap();

    assert_eq!(report.len(), 2);
    for entry in &report {
        assert_eq!(entry.result.status, OrderStatus::Confirmed);
        assert_eq!(entry.log, "Order accepted");
    }

    let stored = repos.order_repo.find_by_id("ORD-B").unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Confirmed);
    assert_eq!(stored.status_history.len(), 1);
    assert_eq!(stored.status_history[0].status, OrderStatus::Confirmed);
}

#[test]
fn test_missing_order_aborts_whole_batch() {
    let (_db, repos) = setup_repos();
    repos
        .order_repo
        .insert(&make_order("ORD-A", "SUP-1", "V-1", 0))
        .unwrap();

    let executor = BulkActionExecutor::new(repos.clone());
    let err = executor
        .apply_bulk(
            &BulkAction::Accept,
            &["ORD-A".to_string(), "ORD-GONE".to_string()],
        )
        .unwrap_err();

    match err {
        BulkActionError::TransactionAborted {
            action, order_ids, ..
        } => {
            assert_eq!(action, "accept");
            assert_eq!(order_ids, vec!["ORD-A", "ORD-GONE"]);
        }
        other => panic!("预期 TransactionAborted,实际 {:?}", other),
    }

    // ORD-A 必须未被触碰 (整批回滚)
    let stored = repos.order_repo.find_by_id("ORD-A").unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
    assert!(stored.status_history.is_empty());
}

#[test]
fn test_reject_appends_exactly_one_entry_with_reason() {
    let (_db, repos) = setup_repos();
    repos
        .order_repo
        .insert(&make_order("ORD-A", "SUP-1", "V-1", 0))
        .unwrap();

    let executor = BulkActionExecutor::new(repos.clone());
    executor
        .apply_bulk(
            &BulkAction::Reject {
                reason: Some("damaged".to_string()),
            },
            &["ORD-A".to_string()],
        )
        .unwrap();

    let stored = repos.order_repo.find_by_id("ORD-A").unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Cancelled);
    assert_eq!(stored.status_history.len(), 1);
    assert_eq!(stored.status_history[0].status, OrderStatus::Cancelled);
    assert_eq!(stored.status_history[0].notes.as_deref(), Some("damaged"));
}

#[test]
fn test_schedule_sets_delivery_date_but_not_status() {
    let (_db, repos) = setup_repos();
    repos
        .order_repo
        .insert(&make_order("ORD-A", "SUP-1", "V-1", 0))
        .unwrap();

    let delivery = "2026-09-15T00:00:00Z".parse().unwrap();
    let executor = BulkActionExecutor::new(repos.clone());
    executor
        .apply_bulk(
            &BulkAction::Schedule {
                delivery_date: delivery,
            },
            &["ORD-A".to_string()],
        )
        .unwrap();

    let stored = repos.order_repo.find_by_id("ORD-A").unwrap().unwrap();
    // 排期不改操作状态
    assert_eq!(stored.status, OrderStatus::Pending);
    assert_eq!(stored.delivery_date, Some(delivery));
    assert_eq!(stored.status_history.len(), 1);
    assert_eq!(stored.status_history[0].status, OrderStatus::Scheduled);
    assert_eq!(
        stored.status_history[0].notes.as_deref(),
        Some("Scheduled for 2026-09-15")
    );
}

#[test]
fn test_empty_order_ids_is_validation_error() {
    let (_db, repos) = setup_repos();
    let executor = BulkActionExecutor::new(repos);
    let err = executor.apply_bulk(&BulkAction::Accept, &[]).unwrap_err();
    assert!(matches!(err, BulkActionError::Validation(_)));
}

#[test]
fn test_unknown_action_via_api_mutates_nothing() {
    let (_db, repos) = setup_repos();
    repos
        .order_repo
        .insert(&make_order("ORD-A", "SUP-1", "V-1", 0))
        .unwrap();

    let api = OrderApi::new(repos.clone(), Arc::new(NoopCatalog), Arc::new(NoopNotifier));
    let err = api
        .bulk_order_actions(&BulkActionRequest {
            action: "vaporize".to_string(),
            order_ids: vec!["ORD-A".to_string()],
            payload: None,
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));

    let stored = repos.order_repo.find_by_id("ORD-A").unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
    assert!(stored.status_history.is_empty());
}

#[test]
fn test_update_status_with_custom_value_via_api() {
    let (_db, repos) = setup_repos();
    repos
        .order_repo
        .insert(&make_order("ORD-A", "SUP-1", "V-1", 0))
        .unwrap();

    let api = OrderApi::new(repos.clone(), Arc::new(NoopCatalog), Arc::new(NoopNotifier));
    let response = api
        .bulk_order_actions(&BulkActionRequest {
            action: "updateStatus".to_string(),
            order_ids: vec!["ORD-A".to_string()],
            payload: Some(json!({ "status": "in_transit" })),
        })
        .unwrap();

    assert!(response.success);
    assert_eq!(response.report.len(), 1);
    assert_eq!(response.report[0].log, "Status updated to in_transit");

    let stored = repos.order_repo.find_by_id("ORD-A").unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Custom("in_transit".to_string()));
}

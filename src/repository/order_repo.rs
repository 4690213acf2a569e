// ==========================================
// 订单编排核心 - 订单仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
// 红线: 批量补丁在单事务内应用,任一目标缺失整体回滚
// ==========================================

use crate::domain::order::{ModificationRecord, Order, StatusHistoryEntry};
use crate::domain::types::OrderStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row, Transaction};
use std::sync::{Arc, Mutex};

// ==========================================
// OrderPatch - 批量操作的存储侧补丁
// ==========================================
// 由引擎层计算,仓储层机械应用:
// - set_status / set_delivery_date 为 None 时保持原值
// - history_entry 恰好追加一条 (追加式不变量)
#[derive(Debug, Clone)]
pub struct OrderPatch {
    pub order_no: String,
    pub set_status: Option<OrderStatus>,
    pub set_delivery_date: Option<DateTime<Utc>>,
    pub history_entry: StatusHistoryEntry,
}

// ==========================================
// OrderRepository - 订单仓储
// ==========================================
pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepository {
    /// 创建新的订单仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 查询供应商的全部订单 (装载顺序 = created_at 升序,order_no 兜底)
    ///
    /// 装载顺序是队列稳定排序的平局基准,必须确定。
    /// 单条 JSON 列损坏的订单记 warn 后跳过,不让整个队列构建失败。
    pub fn find_by_supplier(&self, supplier_id: &str) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            &format!("{SELECT_ORDER} WHERE supplier_id = ?1 ORDER BY created_at ASC, order_no ASC"),
        )?;
        let rows = stmt.query_map(params![supplier_id], map_order_row)?;

        let mut orders = Vec::new();
        for row in rows {
            let raw = row?;
            let order_no = raw.order_no.clone();
            match decode_order(raw) {
                Ok(order) => orders.push(order),
                Err(e) => {
                    tracing::warn!("订单行解码失败,跳过: order_no={}, err={}", order_no, e);
                }
            }
        }
        Ok(orders)
    }

    /// 按订单号查询单个订单
    pub fn find_by_id(&self, order_no: &str) -> RepositoryResult<Option<Order>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("{SELECT_ORDER} WHERE order_no = ?1"))?;
        let mut rows = stmt.query_map(params![order_no], map_order_row)?;

        match rows.next() {
            Some(row) => Ok(Some(decode_order(row?)?)),
            None => Ok(None),
        }
    }

    /// 查询同一客户最近的其他订单 (新→旧)
    ///
    /// 与 find_by_supplier 同口径: 单条损坏记 warn 后跳过,
    /// 不让整个详情视图失败。
    ///
    /// # 参数
    /// - `exclude_order_no`: 排除当前订单
    /// - `limit`: 返回条数上限
    pub fn find_recent_by_customer(
        &self,
        customer_id: &str,
        exclude_order_no: &str,
        limit: u32,
    ) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_ORDER} WHERE customer_id = ?1 AND order_no != ?2 \
             ORDER BY created_at DESC, order_no DESC LIMIT ?3"
        ))?;
        let rows = stmt.query_map(params![customer_id, exclude_order_no, limit], map_order_row)?;

        let mut orders = Vec::new();
        for row in rows {
            let raw = row?;
            let order_no = raw.order_no.clone();
            match decode_order(raw) {
                Ok(order) => orders.push(order),
                Err(e) => {
                    tracing::warn!("订单行解码失败,跳过: order_no={}, err={}", order_no, e);
                }
            }
        }
        Ok(orders)
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 插入订单 (下单流程/测试数据装载使用)
    pub fn insert(&self, order: &Order) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO orders (
                order_no, supplier_id, customer_id, customer_type, status, total,
                delivery_address_json, delivery_date, payment_method, payment_status,
                payment_transaction_json, notes, items_json, status_history_json,
                modification_history_json, interaction_logs_json, performance_json,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                order.order_no,
                order.supplier_id,
                order.customer_id,
                order.customer_type,
                order.status.as_str(),
                order.total,
                order.delivery_address.as_ref().map(|v| v.to_string()),
                order.delivery_date,
                order.payment_method,
                order.payment_status,
                order.payment_transaction.as_ref().map(|v| v.to_string()),
                order.notes,
                serde_json::to_string(&order.items)?,
                serde_json::to_string(&order.status_history)?,
                serde_json::to_string(&order.modification_history)?,
                serde_json::to_string(&order.interaction_logs)?,
                order
                    .performance_metrics
                    .as_ref()
                    .map(serde_json::to_string)
                    .transpose()?,
                order.created_at,
                order.updated_at,
            ],
        )?;
        Ok(())
    }

    /// 在单事务内应用一组订单补丁 (全有或全无)
    ///
    /// 按调用方补丁顺序逐条应用; 任一 order_no 不存在即返回 NotFound,
    /// 事务随 drop 回滚,外部观察不到部分提交。
    ///
    /// # 返回
    /// - Ok(orders): 按补丁顺序返回更新后的订单
    pub fn apply_patches(&self, patches: &[OrderPatch]) -> RepositoryResult<Vec<Order>> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut updated = Vec::with_capacity(patches.len());
        for patch in patches {
            updated.push(apply_patch_in_tx(&tx, patch)?);
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(updated)
    }

    /// 向订单追加一条修改请求记录 (审批工作流)
    ///
    /// 只触碰 modification_history,从不改动操作字段。
    pub fn append_modification(
        &self,
        order_no: &str,
        record: &ModificationRecord,
    ) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let history_json: String = tx
            .query_row(
                "SELECT modification_history_json FROM orders WHERE order_no = ?1",
                params![order_no],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                    entity: "Order".to_string(),
                    id: order_no.to_string(),
                },
                other => other.into(),
            })?;

        let mut history: Vec<ModificationRecord> = serde_json::from_str(&history_json)?;
        history.push(record.clone());

        tx.execute(
            "UPDATE orders SET modification_history_json = ?1, updated_at = ?2 WHERE order_no = ?3",
            params![serde_json::to_string(&history)?, record.timestamp, order_no],
        )?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }
}

// ==========================================
// 行映射
// ==========================================

/// 订单查询的统一列清单
const SELECT_ORDER: &str = r#"
    SELECT order_no, supplier_id, customer_id, customer_type, status, total,
           delivery_address_json, delivery_date, payment_method, payment_status,
           payment_transaction_json, notes, items_json, status_history_json,
           modification_history_json, interaction_logs_json, performance_json,
           created_at, updated_at
    FROM orders
"#;

/// 原始行 (JSON 列尚未解码)
struct RawOrderRow {
    order_no: String,
    supplier_id: String,
    customer_id: String,
    customer_type: Option<String>,
    status: String,
    total: Option<f64>,
    delivery_address_json: Option<String>,
    delivery_date: Option<DateTime<Utc>>,
    payment_method: Option<String>,
    payment_status: Option<String>,
    payment_transaction_json: Option<String>,
    notes: Option<String>,
    items_json: String,
    status_history_json: String,
    modification_history_json: String,
    interaction_logs_json: String,
    performance_json: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn map_order_row(row: &Row<'_>) -> rusqlite::Result<RawOrderRow> {
    Ok(RawOrderRow {
        order_no: row.get(0)?,
        supplier_id: row.get(1)?,
        customer_id: row.get(2)?,
        customer_type: row.get(3)?,
        status: row.get(4)?,
        total: row.get(5)?,
        delivery_address_json: row.get(6)?,
        delivery_date: row.get(7)?,
        payment_method: row.get(8)?,
        payment_status: row.get(9)?,
        payment_transaction_json: row.get(10)?,
        notes: row.get(11)?,
        items_json: row.get(12)?,
        status_history_json: row.get(13)?,
        modification_history_json: row.get(14)?,
        interaction_logs_json: row.get(15)?,
        performance_json: row.get(16)?,
        created_at: row.get(17)?,
        updated_at: row.get(18)?,
    })
}

fn decode_order(raw: RawOrderRow) -> RepositoryResult<Order> {
    Ok(Order {
        order_no: raw.order_no,
        supplier_id: raw.supplier_id,
        customer_id: raw.customer_id,
        customer_type: raw.customer_type,
        status: OrderStatus::from(raw.status),
        total: raw.total,
        delivery_address: raw
            .delivery_address_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?,
        delivery_date: raw.delivery_date,
        payment_method: raw.payment_method,
        payment_status: raw.payment_status,
        payment_transaction: raw
            .payment_transaction_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?,
        notes: raw.notes,
        items: serde_json::from_str(&raw.items_json)?,
        status_history: serde_json::from_str(&raw.status_history_json)?,
        modification_history: serde_json::from_str(&raw.modification_history_json)?,
        interaction_logs: serde_json::from_str(&raw.interaction_logs_json)?,
        performance_metrics: raw
            .performance_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
    })
}

/// 事务内应用单条补丁,返回更新后的订单
fn apply_patch_in_tx(tx: &Transaction<'_>, patch: &OrderPatch) -> RepositoryResult<Order> {
    let raw = tx
        .query_row(
            &format!("{SELECT_ORDER} WHERE order_no = ?1"),
            params![patch.order_no],
            map_order_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Order".to_string(),
                id: patch.order_no.clone(),
            },
            other => other.into(),
        })?;

    let mut order = decode_order(raw)?;

    if let Some(status) = &patch.set_status {
        order.status = status.clone();
    }
    if let Some(delivery_date) = patch.set_delivery_date {
        order.delivery_date = Some(delivery_date);
    }
    order.status_history.push(patch.history_entry.clone());
    order.updated_at = patch.history_entry.timestamp;

    tx.execute(
        r#"
        UPDATE orders
        SET status = ?1, delivery_date = ?2, status_history_json = ?3, updated_at = ?4
        WHERE order_no = ?5
        "#,
        params![
            order.status.as_str(),
            order.delivery_date,
            serde_json::to_string(&order.status_history)?,
            order.updated_at,
            order.order_no,
        ],
    )?;

    Ok(order)
}

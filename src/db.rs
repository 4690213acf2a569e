// ==========================================
// 订单编排核心 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout,交叠 id 的并发批量靠它与连接互斥串行化
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等）
///
/// 嵌套结构（行项、历史、沟通记录）存 JSON 列，
/// 订单主体按查询维度 (supplier/customer) 建索引。
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            account_id        TEXT PRIMARY KEY,
            name              TEXT,
            role              TEXT,
            tier              TEXT,
            rating            REAL,
            reliability_score REAL,
            preferences_json  TEXT NOT NULL DEFAULT '[]',
            created_at        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS orders (
            order_no                  TEXT PRIMARY KEY,
            supplier_id               TEXT NOT NULL,
            customer_id               TEXT NOT NULL,
            customer_type             TEXT,
            status                    TEXT NOT NULL,
            total                     REAL,
            delivery_address_json     TEXT,
            delivery_date             TEXT,
            payment_method            TEXT,
            payment_status            TEXT,
            payment_transaction_json  TEXT,
            notes                     TEXT,
            items_json                TEXT NOT NULL DEFAULT '[]',
            status_history_json       TEXT NOT NULL DEFAULT '[]',
            modification_history_json TEXT NOT NULL DEFAULT '[]',
            interaction_logs_json     TEXT NOT NULL DEFAULT '[]',
            performance_json          TEXT,
            created_at                TEXT NOT NULL,
            updated_at                TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_orders_supplier ON orders(supplier_id);
        CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer_id);
        "#,
    )?;
    Ok(())
}

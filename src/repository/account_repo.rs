// ==========================================
// 订单编排核心 - 账户仓储
// ==========================================
// 红线: 队列构建只允许一次批量账户查询 (find_by_ids),杜绝 N+1
// ==========================================

use crate::domain::account::AccountProfile;
use crate::domain::types::{AccountRole, CustomerTier};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// AccountRepository - 账户仓储
// ==========================================
pub struct AccountRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AccountRepository {
    /// 创建新的账户仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按 ID 查询单个账户
    pub fn find_by_id(&self, account_id: &str) -> RepositoryResult<Option<AccountProfile>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("{SELECT_ACCOUNT} WHERE account_id = ?1"))?;
        let mut rows = stmt.query_map(params![account_id], map_account_row)?;

        match rows.next() {
            Some(row) => Ok(Some(decode_account(row?)?)),
            None => Ok(None),
        }
    }

    /// 批量查询账户,单条 IN 查询 (队列构建的硬性要求)
    ///
    /// # 返回
    /// - account_id → AccountProfile 映射; 缺失的 ID 不出现在映射中,
    ///   由调用方按默认画像降级,不视为错误
    pub fn find_by_ids(
        &self,
        account_ids: &[String],
    ) -> RepositoryResult<HashMap<String, AccountProfile>> {
        if account_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let conn = self.get_conn()?;
        let placeholders = vec!["?"; account_ids.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
            "{SELECT_ACCOUNT} WHERE account_id IN ({placeholders})"
        ))?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(account_ids.iter()),
            map_account_row,
        )?;

        let mut map = HashMap::with_capacity(account_ids.len());
        for row in rows {
            let raw = row?;
            let account_id = raw.account_id.clone();
            match decode_account(raw) {
                Ok(account) => {
                    map.insert(account_id, account);
                }
                Err(e) => {
                    // 单个账户画像损坏按缺失处理,由调用方降级为默认画像
                    tracing::warn!("账户行解码失败,按缺失处理: account_id={}, err={}", account_id, e);
                }
            }
        }
        Ok(map)
    }

    /// 插入账户 (注册流程/测试数据装载使用)
    pub fn insert(&self, account: &AccountProfile) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO accounts (
                account_id, name, role, tier, rating, reliability_score,
                preferences_json, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                account.account_id,
                account.name,
                account.role.map(|r| r.to_string()),
                account.tier.map(|t| t.to_string()),
                account.rating,
                account.reliability_score,
                serde_json::to_string(&account.preferences)?,
                account.created_at,
            ],
        )?;
        Ok(())
    }
}

// ==========================================
// 行映射
// ==========================================

const SELECT_ACCOUNT: &str = r#"
    SELECT account_id, name, role, tier, rating, reliability_score,
           preferences_json, created_at
    FROM accounts
"#;

struct RawAccountRow {
    account_id: String,
    name: Option<String>,
    role: Option<String>,
    tier: Option<String>,
    rating: Option<f64>,
    reliability_score: Option<f64>,
    preferences_json: String,
    created_at: DateTime<Utc>,
}

fn map_account_row(row: &Row<'_>) -> rusqlite::Result<RawAccountRow> {
    Ok(RawAccountRow {
        account_id: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
        tier: row.get(3)?,
        rating: row.get(4)?,
        reliability_score: row.get(5)?,
        preferences_json: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn decode_account(raw: RawAccountRow) -> RepositoryResult<AccountProfile> {
    Ok(AccountProfile {
        account_id: raw.account_id,
        name: raw.name,
        role: raw.role.as_deref().and_then(AccountRole::parse),
        tier: raw.tier.as_deref().map(CustomerTier::parse),
        rating: raw.rating,
        reliability_score: raw.reliability_score,
        preferences: serde_json::from_str(&raw.preferences_json)?,
        created_at: raw.created_at,
    })
}

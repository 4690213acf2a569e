// ==========================================
// 订单编排核心 - 优先级评分引擎
// ==========================================
// 依据: Order_Core_Spec.md §3 PriorityScorer
// 红线: 权重为契约值 (1000/500/100/500/200),不是可调参数
// 职责: (订单, 客户) → 整数分,纯函数,无副作用
// ==========================================

use crate::domain::account::AccountProfile;
use crate::domain::order::Order;
use crate::domain::types::CustomerTier;
use chrono::{DateTime, Utc};

// ===== 客户等级加分 =====
const TIER_BONUS_PREMIUM: i64 = 1000;
const TIER_BONUS_REGULAR: i64 = 500;
const TIER_BONUS_DEFAULT: i64 = 100; // new 与未知等级同档

// ===== 交货紧急度加分 (互斥档位,升序判定,命中即停) =====
const URGENCY_BONUS_UNDER_1_DAY: i64 = 1000;
const URGENCY_BONUS_UNDER_3_DAYS: i64 = 500;
const URGENCY_BONUS_UNDER_7_DAYS: i64 = 100;

// ===== 特殊标记加分 =====
const NOTES_URGENT_BONUS: i64 = 500;
const SPECIAL_REQUIREMENT_BONUS: i64 = 200; // 整单一次,不按行项叠加

// ==========================================
// PriorityScorer - 优先级评分引擎
// ==========================================
pub struct PriorityScorer {
    // 无状态引擎,不需要注入依赖
}

impl PriorityScorer {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 计算订单优先级分
    ///
    /// 对全部合法输入是全函数: 缺失字段按零/缺省处理,从不报错。
    /// 同输入任意次调用结果相同 (引用透明)。
    ///
    /// # 参数
    /// - `order`: 待评分订单
    /// - `customer`: 下单客户画像 (缺失按默认档计分)
    /// - `now`: 评分基准时刻 (紧急度口径,由调用方注入保证确定性)
    pub fn score(
        &self,
        order: &Order,
        customer: Option<&AccountProfile>,
        now: DateTime<Utc>,
    ) -> i64 {
        let mut score: i64 = 0;

        // 1. 基础分 = 订单总额 (缺失为 0,向整数截断)
        score += order.total.unwrap_or(0.0) as i64;

        // 2. 客户等级: premium/regular 之外 (含缺失客户、缺失等级) 均为默认档
        score += match customer.and_then(|c| c.tier) {
            Some(CustomerTier::Premium) => TIER_BONUS_PREMIUM,
            Some(CustomerTier::Regular) => TIER_BONUS_REGULAR,
            _ => TIER_BONUS_DEFAULT,
        };

        // 3. 交货紧急度: 仅 delivery_date 存在时评估
        if let Some(delivery_date) = order.delivery_date {
            score += urgency_bonus(delivery_date, now);
        }

        // 4. 备注含 "urgent" 子串 (大小写不敏感)
        if let Some(notes) = &order.notes {
            if notes.to_lowercase().contains("urgent") {
                score += NOTES_URGENT_BONUS;
            }
        }

        // 5. 任一行项带特殊要求标记
        if order.items.iter().any(|item| item.special_requirement) {
            score += SPECIAL_REQUIREMENT_BONUS;
        }

        score
    }
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// 交货紧急度加分
///
/// 档位按剩余天数互斥,升序判定: <1 → +1000; <3 → +500; <7 → +100; 其余 +0。
/// 已逾期 (剩余为负) 落入 <1 档。
fn urgency_bonus(delivery_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let days_until = (delivery_date - now).num_seconds() as f64 / 86_400.0;
    if days_until < 1.0 {
        URGENCY_BONUS_UNDER_1_DAY
    } else if days_until < 3.0 {
        URGENCY_BONUS_UNDER_3_DAYS
    } else if days_until < 7.0 {
        URGENCY_BONUS_UNDER_7_DAYS
    } else {
        0
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderItem;
    use crate::domain::types::{AccountRole, OrderStatus};
    use chrono::Duration;

    fn base_order(total: Option<f64>) -> Order {
        Order {
            order_no: "ORD-001".to_string(),
            supplier_id: "SUP-1".to_string(),
            customer_id: "CUST-1".to_string(),
            customer_type: None,
            items: vec![],
            status: OrderStatus::Pending,
            total,
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
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn customer(tier: Option<CustomerTier>) -> AccountProfile {
        AccountProfile {
            account_id: "CUST-1".to_string(),
            name: Some("测试客户".to_string()),
            role: Some(AccountRole::Vendor),
            tier,
            rating: None,
            reliability_score: None,
            preferences: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_base_score_is_total_plus_default_tier() {
        let scorer = PriorityScorer::new();
        let order = base_order(Some(350.0));
        // 无客户: 总额 350 + 默认档 100
        assert_eq!(scorer.score(&order, None, Utc::now()), 450);
    }

    #[test]
    fn test_missing_total_scores_zero_base() {
        let scorer = PriorityScorer::new();
        let order = base_order(None);
        assert_eq!(scorer.score(&order, None, Utc::now()), 100);
    }

    #[test]
    fn test_tier_bonus_ladder() {
        let scorer = PriorityScorer::new();
        let order = base_order(Some(0.0));
        let now = Utc::now();
        assert_eq!(
            scorer.score(&order, Some(&customer(Some(CustomerTier::Premium))), now),
            1000
        );
        assert_eq!(
            scorer.score(&order, Some(&customer(Some(CustomerTier::Regular))), now),
            500
        );
        assert_eq!(
            scorer.score(&order, Some(&customer(Some(CustomerTier::New))), now),
            100
        );
        // 等级缺失与 new 同档
        assert_eq!(scorer.score(&order, Some(&customer(None)), now), 100);
    }

    #[test]
    fn test_urgency_bands_are_mutually_exclusive() {
        let scorer = PriorityScorer::new();
        let now = Utc::now();

        // 0.5 天后交货: 只拿 <1 档,不与 <3/<7 叠加
        let mut order = base_order(Some(0.0));
        order.delivery_date = Some(now + Duration::hours(12));
        assert_eq!(scorer.score(&order, None, now), 100 + 1000);

        order.delivery_date = Some(now + Duration::hours(48));
        assert_eq!(scorer.score(&order, None, now), 100 + 500);

        order.delivery_date = Some(now + Duration::days(5));
        assert_eq!(scorer.score(&order, None, now), 100 + 100);

        order.delivery_date = Some(now + Duration::days(30));
        assert_eq!(scorer.score(&order, None, now), 100);
    }

    #[test]
    fn test_overdue_delivery_counts_as_most_urgent() {
        let scorer = PriorityScorer::new();
        let now = Utc::now();
        let mut order = base_order(Some(0.0));
        order.delivery_date = Some(now - Duration::days(2));
        assert_eq!(scorer.score(&order, None, now), 100 + 1000);
    }

    #[test]
    fn test_urgent_notes_case_insensitive() {
        let scorer = PriorityScorer::new();
        let mut order = base_order(Some(0.0));
        order.notes = Some("请尽快 URGENT 处理".to_string());
        assert_eq!(scorer.score(&order, None, Utc::now()), 100 + 500);
    }

    #[test]
    fn test_special_requirement_is_flat_bonus() {
        let scorer = PriorityScorer::new();
        let mut order = base_order(Some(0.0));
        let item = OrderItem {
            product_id: "P1".to_string(),
            name: None,
            price: None,
            quantity: None,
            unit: None,
            category: None,
            special_requirement: true,
        };
        // 两个行项都带标记,依然整单只加一次 200
        order.items = vec![item.clone(), item];
        assert_eq!(scorer.score(&order, None, Utc::now()), 100 + 200);
    }

    #[test]
    fn test_score_is_deterministic() {
        let scorer = PriorityScorer::new();
        let now = Utc::now();
        let mut order = base_order(Some(1234.0));
        order.notes = Some("urgent".to_string());
        order.delivery_date = Some(now + Duration::hours(36));
        let first = scorer.score(&order, None, now);
        for _ in 0..10 {
            assert_eq!(scorer.score(&order, None, now), first);
        }
    }
}

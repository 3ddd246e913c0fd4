//! Analytics aggregator
//!
//! A read-side fold over the orders of a reporting window. Nothing is
//! stored; every request recomputes from `orders` / `order_item`.

use std::collections::{BTreeMap, HashMap};

use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::models::{
    AnalyticsPeriod, AnalyticsSummary, Order, OrderStatus, StatusBreakdown, TopItem,
};
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, order};
use crate::pricing::{to_decimal, to_f64};
use crate::utils::time::{day_key, day_start_millis, local_date, month_start, year_start};

/// Number of best sellers reported
pub const TOP_ITEMS_LIMIT: usize = 10;

const WEEK_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Window start for a period, relative to `now` in the business time zone
///
/// - daily: local midnight today
/// - weekly: `now - 7 days`
/// - monthly: local midnight on the 1st
/// - yearly: local midnight on January 1st
pub fn window_start(period: AnalyticsPeriod, now_millis: i64, tz: Tz) -> i64 {
    let today = local_date(now_millis, tz);
    match period {
        AnalyticsPeriod::Daily => day_start_millis(today, tz),
        AnalyticsPeriod::Weekly => now_millis - WEEK_MILLIS,
        AnalyticsPeriod::Monthly => day_start_millis(month_start(today), tz),
        AnalyticsPeriod::Yearly => day_start_millis(year_start(today), tz),
    }
}

/// Fold orders into a summary
pub fn summarize(
    orders: &[Order],
    period: AnalyticsPeriod,
    start_date: i64,
    end_date: i64,
    tz: Tz,
) -> AnalyticsSummary {
    let mut total_revenue = Decimal::ZERO;
    let mut orders_by_status = StatusBreakdown::default();
    let mut revenue_by_day: BTreeMap<String, Decimal> = BTreeMap::new();

    // insertion order is kept so equal quantities rank by first appearance
    let mut item_index: HashMap<&str, usize> = HashMap::new();
    let mut items: Vec<(&str, i64, Decimal)> = Vec::new();

    for order in orders {
        let amount = to_decimal(order.total_amount);
        total_revenue += amount;
        *revenue_by_day
            .entry(day_key(order.created_at, tz))
            .or_default() += amount;

        let counter = match order.status {
            OrderStatus::Pending => &mut orders_by_status.pending,
            OrderStatus::Preparing => &mut orders_by_status.preparing,
            OrderStatus::Ready => &mut orders_by_status.ready,
            OrderStatus::Served => &mut orders_by_status.served,
            OrderStatus::Paid => &mut orders_by_status.paid,
            OrderStatus::Cancelled => &mut orders_by_status.cancelled,
        };
        *counter += 1;

        for line in &order.items {
            let idx = *item_index.entry(line.name.as_str()).or_insert_with(|| {
                items.push((line.name.as_str(), 0, Decimal::ZERO));
                items.len() - 1
            });
            let entry = &mut items[idx];
            entry.1 += line.quantity;
            entry.2 += to_decimal(line.price) * Decimal::from(line.quantity);
        }
    }

    // stable sort
    items.sort_by(|a, b| b.1.cmp(&a.1));
    let top_items = items
        .into_iter()
        .take(TOP_ITEMS_LIMIT)
        .map(|(name, quantity, revenue)| TopItem {
            name: name.to_string(),
            quantity,
            revenue: to_f64(revenue),
        })
        .collect();

    let total_orders = orders.len() as u64;
    let average_order_value = if total_orders == 0 {
        0.0
    } else {
        to_f64(total_revenue / Decimal::from(total_orders))
    };

    AnalyticsSummary {
        period,
        start_date,
        end_date,
        total_orders,
        total_revenue: to_f64(total_revenue),
        average_order_value,
        orders_by_status,
        top_items,
        revenue_by_day: revenue_by_day
            .into_iter()
            .map(|(day, revenue)| (day, to_f64(revenue)))
            .collect(),
    }
}

/// Load the window's orders and summarize them
pub async fn get_summary(
    pool: &SqlitePool,
    period: AnalyticsPeriod,
    now_millis: i64,
    tz: Tz,
) -> RepoResult<AnalyticsSummary> {
    let start = window_start(period, now_millis, tz);
    let orders = order::find_in_window(pool, start, now_millis).await?;
    Ok(summarize(&orders, period, start, now_millis, tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use shared::models::OrderItem;

    const DAY: i64 = 24 * 60 * 60 * 1000;

    fn order(id: i64, created_at: i64, total: f64, status: OrderStatus, lines: &[(&str, i64, f64)]) -> Order {
        Order {
            id,
            user_id: 1,
            user_name: "Guest".into(),
            table_number: 3,
            total_amount: total,
            coupon_code: None,
            discount: 0.0,
            final_amount: total,
            status,
            special_instructions: String::new(),
            created_at,
            updated_at: created_at,
            items: lines
                .iter()
                .enumerate()
                .map(|(i, (name, quantity, price))| OrderItem {
                    id: id * 100 + i as i64,
                    order_id: id,
                    menu_item_id: i as i64,
                    name: name.to_string(),
                    quantity: *quantity,
                    price: *price,
                })
                .collect(),
        }
    }

    #[test]
    fn test_window_start() {
        let tz = Tz::UTC;
        let now = Utc
            .with_ymd_and_hms(2025, 6, 18, 15, 30, 0)
            .unwrap()
            .timestamp_millis();
        let midnight = |y, m, d| {
            day_start_millis(NaiveDate::from_ymd_opt(y, m, d).unwrap(), tz)
        };

        assert_eq!(window_start(AnalyticsPeriod::Daily, now, tz), midnight(2025, 6, 18));
        assert_eq!(window_start(AnalyticsPeriod::Weekly, now, tz), now - 7 * DAY);
        assert_eq!(window_start(AnalyticsPeriod::Monthly, now, tz), midnight(2025, 6, 1));
        assert_eq!(window_start(AnalyticsPeriod::Yearly, now, tz), midnight(2025, 1, 1));
    }

    #[test]
    fn test_daily_window_in_business_zone() {
        // 2025-06-18 20:00 UTC is already 2025-06-19 01:30 in Kolkata
        let tz = chrono_tz::Asia::Kolkata;
        let now = Utc
            .with_ymd_and_hms(2025, 6, 18, 20, 0, 0)
            .unwrap()
            .timestamp_millis();
        let expected = Utc
            .with_ymd_and_hms(2025, 6, 18, 18, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(window_start(AnalyticsPeriod::Daily, now, tz), expected);
    }

    #[test]
    fn test_summarize_totals() {
        let base = Utc
            .with_ymd_and_hms(2025, 6, 18, 12, 0, 0)
            .unwrap()
            .timestamp_millis();
        let orders = vec![
            order(1, base, 598.0, OrderStatus::Paid, &[("Classic Burger", 2, 299.0)]),
            order(2, base + 1000, 129.0, OrderStatus::Pending, &[("French Fries", 1, 129.0)]),
            order(3, base - DAY, 850.0, OrderStatus::Cancelled, &[("Classic Burger", 1, 299.0), ("French Fries", 3, 129.0)]),
        ];

        let summary = summarize(&orders, AnalyticsPeriod::Weekly, base - 7 * DAY, base, Tz::UTC);
        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.total_revenue, 1577.0);
        assert_eq!(summary.average_order_value, 525.67);
        assert_eq!(summary.orders_by_status.paid, 1);
        assert_eq!(summary.orders_by_status.pending, 1);
        assert_eq!(summary.orders_by_status.cancelled, 1);
        assert_eq!(summary.revenue_by_day.get("2025-06-18"), Some(&727.0));
        assert_eq!(summary.revenue_by_day.get("2025-06-17"), Some(&850.0));

        // French Fries 4, Classic Burger 3
        assert_eq!(summary.top_items[0].name, "French Fries");
        assert_eq!(summary.top_items[0].quantity, 4);
        assert_eq!(summary.top_items[0].revenue, 516.0);
        assert_eq!(summary.top_items[1].name, "Classic Burger");
        assert_eq!(summary.top_items[1].revenue, 897.0);
    }

    #[test]
    fn test_top_items_ties_keep_first_seen() {
        let orders = vec![order(
            1,
            0,
            30.0,
            OrderStatus::Paid,
            &[("Tea", 1, 10.0), ("Coffee", 1, 10.0), ("Juice", 1, 10.0)],
        )];
        let summary = summarize(&orders, AnalyticsPeriod::Daily, 0, 0, Tz::UTC);
        let names: Vec<_> = summary.top_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Tea", "Coffee", "Juice"]);
    }

    #[test]
    fn test_top_items_limited() {
        let lines: Vec<(String, i64, f64)> = (0..15).map(|i| (format!("Item {i}"), i + 1, 1.0)).collect();
        let borrowed: Vec<(&str, i64, f64)> = lines.iter().map(|(n, q, p)| (n.as_str(), *q, *p)).collect();
        let orders = vec![order(1, 0, 1.0, OrderStatus::Paid, &borrowed)];
        let summary = summarize(&orders, AnalyticsPeriod::Daily, 0, 0, Tz::UTC);
        assert_eq!(summary.top_items.len(), TOP_ITEMS_LIMIT);
        assert_eq!(summary.top_items[0].name, "Item 14");
    }

    #[test]
    fn test_empty() {
        let summary = summarize(&[], AnalyticsPeriod::Monthly, 0, 0, Tz::UTC);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.average_order_value, 0.0);
        assert!(summary.top_items.is_empty());
        assert!(summary.revenue_by_day.is_empty());
    }
}

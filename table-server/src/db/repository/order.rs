//! Order Repository

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderItem, OrderStatus};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashMap;

/// Fully priced order ready to be persisted
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub user_name: String,
    pub table_number: i64,
    pub total_amount: f64,
    pub coupon_code: Option<String>,
    pub discount: f64,
    pub final_amount: f64,
    pub special_instructions: String,
    pub lines: Vec<NewOrderLine>,
}

/// Line snapshot: name and unit price as of order time
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub menu_item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Insert an order and its lines, returning the new order id
pub async fn insert(conn: &mut SqliteConnection, order: &NewOrder) -> RepoResult<i64> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO orders (id, user_id, user_name, table_number, total_amount, coupon_code, discount, final_amount, status, special_instructions, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
    )
    .bind(id)
    .bind(order.user_id)
    .bind(&order.user_name)
    .bind(order.table_number)
    .bind(order.total_amount)
    .bind(&order.coupon_code)
    .bind(order.discount)
    .bind(order.final_amount)
    .bind(OrderStatus::Pending)
    .bind(&order.special_instructions)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    for line in &order.lines {
        sqlx::query(
            "INSERT INTO order_item (id, order_id, menu_item_id, name, quantity, price) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(shared::util::snowflake_id())
        .bind(id)
        .bind(line.menu_item_id)
        .bind(&line.name)
        .bind(line.quantity)
        .bind(line.price)
        .execute(&mut *conn)
        .await?;
    }

    Ok(id)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, user_id, user_name, table_number, total_amount, coupon_code, discount, final_amount, status, special_instructions, created_at, updated_at FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match order {
        Some(order) => Ok(with_items(pool, vec![order]).await?.pop()),
        None => Ok(None),
    }
}

/// All orders, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, user_id, user_name, table_number, total_amount, coupon_code, discount, final_amount, status, special_instructions, created_at, updated_at FROM orders ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    with_items(pool, orders).await
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, user_id, user_name, table_number, total_amount, coupon_code, discount, final_amount, status, special_instructions, created_at, updated_at FROM orders WHERE user_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    with_items(pool, orders).await
}

pub async fn find_by_status(pool: &SqlitePool, status: OrderStatus) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, user_id, user_name, table_number, total_amount, coupon_code, discount, final_amount, status, special_instructions, created_at, updated_at FROM orders WHERE status = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(status)
    .fetch_all(pool)
    .await?;
    with_items(pool, orders).await
}

/// Orders created in `[start, end]` (Unix millis)
pub async fn find_in_window(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, user_id, user_name, table_number, total_amount, coupon_code, discount, final_amount, status, special_instructions, created_at, updated_at FROM orders WHERE created_at >= ? AND created_at <= ? ORDER BY created_at",
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    with_items(pool, orders).await
}

/// Compare-and-set status change
///
/// Returns `false` when the order is no longer in `expected` (concurrent
/// change), leaving the row untouched.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    expected: OrderStatus,
    next: OrderStatus,
) -> RepoResult<bool> {
    let rows =
        sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
            .bind(next)
            .bind(shared::util::now_millis())
            .bind(id)
            .bind(expected)
            .execute(pool)
            .await?;
    Ok(rows.rows_affected() > 0)
}

/// Bind parameters per `IN (...)` batch
const ITEM_BATCH: usize = 500;

/// Attach line items to a batch of orders
async fn with_items(pool: &SqlitePool, mut orders: Vec<Order>) -> RepoResult<Vec<Order>> {
    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();

    for chunk in orders.chunks(ITEM_BATCH) {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, order_id, menu_item_id, name, quantity, price FROM order_item WHERE order_id IN (",
        );
        let mut separated = qb.separated(", ");
        for order in chunk {
            separated.push_bind(order.id);
        }
        separated.push_unseparated(") ORDER BY id");

        let items: Vec<OrderItem> = qb.build_query_as().fetch_all(pool).await?;
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }
    }

    for order in &mut orders {
        order.items = by_order.remove(&order.id).unwrap_or_default();
    }
    Ok(orders)
}

/// Fail with NotFound when the order does not exist
pub async fn require(pool: &SqlitePool, id: i64) -> RepoResult<Order> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

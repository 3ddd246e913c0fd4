//! Initial data
//!
//! Used by the `seed` binary. Both steps are idempotent: the admin is
//! created only when its email is free, the menu only when it is empty.

use shared::models::{MenuCategory, MenuItemCreate, Role};
use sqlx::SqlitePool;

use super::repository::{RepoError, RepoResult, menu_item, user};
use crate::auth::hash_password;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@cafe.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// (name, description, price, category, image)
const SAMPLE_MENU: &[(&str, &str, f64, MenuCategory, &str)] = &[
    ("Classic Burger", "Juicy beef patty with lettuce, tomato, onion, and special sauce", 299.0, MenuCategory::MainCourse, "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=400"),
    ("Margherita Pizza", "Fresh mozzarella, tomato sauce, and basil on thin crust", 399.0, MenuCategory::MainCourse, "https://images.unsplash.com/photo-1574071318508-1cdbab80d002?w=400"),
    ("Caesar Salad", "Crisp romaine lettuce with parmesan, croutons, and Caesar dressing", 199.0, MenuCategory::Appetizer, "https://images.unsplash.com/photo-1546793665-c74683f339c1?w=400"),
    ("French Fries", "Golden crispy fries with choice of dipping sauce", 129.0, MenuCategory::Appetizer, "https://images.unsplash.com/photo-1573080496219-bb080dd4f877?w=400"),
    ("Grilled Chicken", "Tender grilled chicken breast with herbs and vegetables", 349.0, MenuCategory::MainCourse, "https://images.unsplash.com/photo-1598103442097-8b74394b95c6?w=400"),
    ("Pasta Carbonara", "Creamy pasta with bacon, egg, and parmesan cheese", 279.0, MenuCategory::MainCourse, "https://images.unsplash.com/photo-1612874742237-6526221588e3?w=400"),
    ("Chocolate Lava Cake", "Warm chocolate cake with molten center, served with vanilla ice cream", 179.0, MenuCategory::Dessert, "https://images.unsplash.com/photo-1606313564200-e75d5e30476c?w=400"),
    ("Tiramisu", "Classic Italian dessert with coffee-soaked ladyfingers and mascarpone", 159.0, MenuCategory::Dessert, "https://images.unsplash.com/photo-1571877227200-a0d98ea607e9?w=400"),
    ("Ice Cream Sundae", "Three scoops of ice cream with toppings and whipped cream", 149.0, MenuCategory::Dessert, "https://images.unsplash.com/photo-1563805042-7684c019e1cb?w=400"),
    ("Fresh Orange Juice", "Freshly squeezed orange juice", 89.0, MenuCategory::Beverage, "https://images.unsplash.com/photo-1600271886742-f049cd451bba?w=400"),
    ("Cappuccino", "Espresso with steamed milk and foam", 119.0, MenuCategory::Beverage, "https://images.unsplash.com/photo-1572442388796-11668a67e53d?w=400"),
    ("Iced Coffee", "Cold brew coffee served over ice", 99.0, MenuCategory::Beverage, "https://images.unsplash.com/photo-1517487881594-2787fef5ebf7?w=400"),
    ("Mango Smoothie", "Refreshing blend of mango, yogurt, and honey", 139.0, MenuCategory::Beverage, "https://images.unsplash.com/photo-1505252585461-04db1eb84625?w=400"),
    ("Chef's Special Steak", "Premium ribeye steak cooked to perfection with sides", 599.0, MenuCategory::Special, "https://images.unsplash.com/photo-1600891964092-4316c288032e?w=400"),
    ("Seafood Platter", "Assorted fresh seafood including prawns, fish, and calamari", 699.0, MenuCategory::Special, "https://images.unsplash.com/photo-1559737558-2f5a35f4523a?w=400"),
];

/// Create the admin account; `false` when the email is already taken
pub async fn seed_admin(pool: &SqlitePool, email: &str, password: &str) -> RepoResult<bool> {
    if user::find_by_email(pool, email).await?.is_some() {
        return Ok(false);
    }
    let password_hash = hash_password(password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;
    user::create(pool, "Admin", email, &password_hash, Role::Admin, None).await?;
    Ok(true)
}

/// Insert the sample menu into an empty catalog, returning the count added
pub async fn seed_menu(pool: &SqlitePool) -> RepoResult<usize> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    for &(name, description, price, category, image) in SAMPLE_MENU {
        menu_item::create(
            pool,
            MenuItemCreate {
                name: name.to_string(),
                description: description.to_string(),
                price,
                category,
                image: Some(image.to_string()),
                available: Some(true),
            },
        )
        .await?;
    }
    Ok(SAMPLE_MENU.len())
}

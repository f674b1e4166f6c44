use sqlx::FromRow;
use chrono::{DateTime, Utc};

#[derive(Debug, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub available: bool,
    pub image: Option<String>,
    pub category_id: String,
    pub created_at: Option<DateTime<Utc>>,
}

use serde::{Deserialize, Serialize};

/// Product record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub user_id: i64,
}

/// Payload for `POST /products`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub user_id: i64,
}

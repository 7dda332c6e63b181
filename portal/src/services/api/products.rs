//! # Product Endpoints

use reqwest::Method;
use shared::{Product, ProductCreate};

use super::client::ApiClient;
use crate::core::error::ApiError;

/// List all products (`GET /products`).
#[tracing::instrument(skip(client))]
pub async fn get_products(client: &ApiClient) -> Result<Vec<Product>, ApiError> {
    let request = client.request(Method::GET, "/products")?;
    client.send(request).await
}

/// Fetch one product (`GET /products/{id}`).
#[tracing::instrument(skip(client))]
pub async fn get_product(client: &ApiClient, id: i64) -> Result<Product, ApiError> {
    let request = client.request(Method::GET, &format!("/products/{}", id))?;
    client.send(request).await
}

/// Create a product (`POST /products`).
#[tracing::instrument(skip(client, product), fields(name = %product.name))]
pub async fn create_product(client: &ApiClient, product: &ProductCreate) -> Result<Product, ApiError> {
    let request = client.request(Method::POST, "/products")?.json(product);
    client.send(request).await
}

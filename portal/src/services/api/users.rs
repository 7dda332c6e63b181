//! # User Endpoints

use reqwest::Method;
use shared::{Product, User, UserCreate};

use super::client::ApiClient;
use crate::core::error::ApiError;

/// List all users (`GET /users`).
#[tracing::instrument(skip(client))]
pub async fn get_users(client: &ApiClient) -> Result<Vec<User>, ApiError> {
    let request = client.request(Method::GET, "/users")?;
    client.send(request).await
}

/// Fetch one user (`GET /users/{id}`).
#[tracing::instrument(skip(client))]
pub async fn get_user(client: &ApiClient, id: i64) -> Result<User, ApiError> {
    let request = client.request(Method::GET, &format!("/users/{}", id))?;
    client.send(request).await
}

/// Create a user (`POST /users`). The service requires an admin token.
#[tracing::instrument(skip(client, user), fields(username = %user.username))]
pub async fn create_user(client: &ApiClient, user: &UserCreate) -> Result<User, ApiError> {
    let request = client.request(Method::POST, "/users")?.json(user);
    client.send(request).await
}

/// Products owned by a user (`GET /users/{user_id}/products`).
#[tracing::instrument(skip(client))]
pub async fn get_user_products(client: &ApiClient, user_id: i64) -> Result<Vec<Product>, ApiError> {
    let request = client.request(Method::GET, &format!("/users/{}/products", user_id))?;
    client.send(request).await
}

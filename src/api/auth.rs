use crate::auth::{create_jwt, hash_password, verify_password, AdminClaims, Claims};
use crate::models::user::{self, Entity as User};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

pub async fn login(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    tracing::info!("Login attempt for user: {}", payload.username);

    let user = match User::find()
        .filter(user::Column::Username.eq(&payload.username))
        .one(&db)
        .await
    {
        Ok(Some(u)) => u,
        _ => {
            tracing::warn!("User not found: {}", payload.username);
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response();
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {
            let token = match create_jwt(&user.username, &user.role) {
                Ok(t) => t,
                Err(e) => {
                    tracing::error!("Failed to issue token: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Failed to issue token" })),
                    )
                        .into_response();
                }
            };
            (StatusCode::OK, Json(json!({ "token": token }))).into_response()
        }
        _ => {
            tracing::warn!("Password verification failed for user: {}", user.username);
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response()
        }
    }
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
}

/// Create an administrator account. Open only while no user exists
/// (first-run bootstrap); afterwards an administrator token is required.
pub async fn register(
    admin: Option<AdminClaims>,
    State(db): State<DatabaseConnection>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let user_count = match User::find().count(&db).await {
        Ok(n) => n,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    if user_count > 0 && admin.is_none() {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Administrator role required" })),
        )
            .into_response();
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e })),
            )
                .into_response();
        }
    };

    let now = chrono::Utc::now().to_rfc3339();
    let new_user = user::ActiveModel {
        username: Set(payload.username),
        password_hash: Set(password_hash),
        role: Set("admin".to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_user.insert(&db).await {
        Ok(_) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Admin created" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn get_me(claims: Claims) -> impl IntoResponse {
    Json(json!({
        "username": claims.sub,
        "role": claims.role,
    }))
}

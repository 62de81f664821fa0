use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::Value;

use crate::{
    database::{Collections, InsertAck, UpdateAck},
    models::{document_to_json, documents_to_json, json_to_document, UpdateUserRequest},
    utils::AppError,
};

/// POST /users - Stores the posted user document as-is
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "User stored", body = InsertAck),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user(
    db: web::Data<Collections>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let user = json_to_document(body.into_inner())?;

    log::info!("👤 POST /users - Creating user {:?}", user.get("email"));

    let ack = db.users.insert_one(user).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// GET /users - Lists every user
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All user documents"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_users(db: web::Data<Collections>) -> Result<HttpResponse, AppError> {
    let users = db.users.find(doc! {}).await?;

    log::info!("👥 GET /users - {} users", users.len());

    Ok(HttpResponse::Ok().json(documents_to_json(users)))
}

/// GET /users/{email} - One user by email, `null` when absent
#[utoipa::path(
    get,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User document or null"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_user_by_email(
    db: web::Data<Collections>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = email.into_inner();

    log::info!("🔍 GET /users/{}", email);

    let user = db.users.find_one(doc! { "email": email.as_str() }).await?;
    Ok(HttpResponse::Ok().json(user.map(document_to_json).unwrap_or(Value::Null)))
}

/// PATCH /users - Updates name and image of the user with the given email
#[utoipa::path(
    patch,
    path = "/users",
    tag = "Users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateAck),
        (status = 400, description = "Malformed body"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_user(
    db: web::Data<Collections>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let UpdateUserRequest { email, name, photo } = request.into_inner();

    log::info!("🔧 PATCH /users - Updating profile of {}", email);

    let ack = db
        .users
        .update_one(doc! { "email": email.as_str() }, doc! { "name": name, "image": photo })
        .await?;

    if ack.matched_count == 0 {
        log::warn!("⚠️  No user with email {}", email);
    }

    Ok(HttpResponse::Ok().json(ack))
}

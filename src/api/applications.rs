use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::Value;

use crate::{
    database::{parse_object_id, Collections, DeleteAck, InsertAck},
    models::{documents_to_json, json_to_document},
    services::{enrich, APPLIED_SCHOLARSHIP},
    utils::AppError,
};

/// GET /applications - Lists every application
#[utoipa::path(
    get,
    path = "/applications",
    tag = "Applications",
    responses(
        (status = 200, description = "All application documents"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_applications(db: web::Data<Collections>) -> Result<HttpResponse, AppError> {
    let applications = db.applications.find(doc! {}).await?;

    log::info!("📋 GET /applications - {} applications", applications.len());

    Ok(HttpResponse::Ok().json(documents_to_json(applications)))
}

/// POST /applications - Stores the posted application as-is
#[utoipa::path(
    post,
    path = "/applications",
    tag = "Applications",
    responses(
        (status = 200, description = "Application stored", body = InsertAck),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_application(
    db: web::Data<Collections>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let application = json_to_document(body.into_inner())?;

    log::info!(
        "📝 POST /applications - user {:?} applying to {:?}",
        application.get("user_id"),
        application.get("scholarship_id")
    );

    let ack = db.applications.insert_one(application).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// GET /applications/{applicant_id} - Applications of one user with scholarship details
#[utoipa::path(
    get,
    path = "/applications/{applicant_id}",
    tag = "Applications",
    params(("applicant_id" = String, Path, description = "Applicant user id")),
    responses(
        (status = 200, description = "Applications merged with scholarship_name, university_name, scholarship_category and subject_name"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_applications_by_applicant(
    db: web::Data<Collections>,
    applicant_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let applicant_id = applicant_id.into_inner();

    let applications = db
        .applications
        .find(doc! { "user_id": applicant_id.as_str() })
        .await?;

    log::info!(
        "📋 GET /applications/{} - enriching {} applications",
        applicant_id,
        applications.len()
    );

    let enriched = enrich(applications, &db.scholarships, &APPLIED_SCHOLARSHIP).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(enriched)))
}

/// DELETE /applications/{id} - Removes one application
#[utoipa::path(
    delete,
    path = "/applications/{id}",
    tag = "Applications",
    params(("id" = String, Path, description = "Application ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Delete acknowledgement; deletedCount is 0 when nothing matched", body = DeleteAck),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_application(
    db: web::Data<Collections>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let object_id = parse_object_id(&id)?;

    log::info!("🗑️  DELETE /applications/{}", object_id);

    let ack = db.applications.delete_one(doc! { "_id": object_id }).await?;
    Ok(HttpResponse::Ok().json(ack))
}

use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::Value;

use crate::{
    database::{Collections, InsertAck},
    models::{documents_to_json, json_to_document},
    services::{enrich, REVIEWED_SCHOLARSHIP, REVIEWER_DETAILS},
    utils::AppError,
};

/// GET /reviews - Lists every review
#[utoipa::path(
    get,
    path = "/reviews",
    tag = "Reviews",
    responses(
        (status = 200, description = "All review documents"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_reviews(db: web::Data<Collections>) -> Result<HttpResponse, AppError> {
    let reviews = db.reviews.find(doc! {}).await?;

    log::info!("⭐ GET /reviews - {} reviews", reviews.len());

    Ok(HttpResponse::Ok().json(documents_to_json(reviews)))
}

/// POST /reviews - Stores the posted review as-is
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    responses(
        (status = 200, description = "Review stored", body = InsertAck),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_review(
    db: web::Data<Collections>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let review = json_to_document(body.into_inner())?;

    log::info!(
        "📝 POST /reviews - reviewer {:?} on scholarship {:?}",
        review.get("reviewer_id"),
        review.get("scholarship_id")
    );

    let ack = db.reviews.insert_one(review).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// GET /reviews/{scholarship_id} - Reviews of a scholarship with reviewer name and image
#[utoipa::path(
    get,
    path = "/reviews/{scholarship_id}",
    tag = "Reviews",
    params(("scholarship_id" = String, Path, description = "Scholarship id as stored on the review")),
    responses(
        (status = 200, description = "Reviews merged with reviewer_name (\"Unknown\") and reviewer_image (\"default.jpg\")"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_reviews_by_scholarship(
    db: web::Data<Collections>,
    scholarship_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let scholarship_id = scholarship_id.into_inner();

    let reviews = db
        .reviews
        .find(doc! { "scholarship_id": scholarship_id.as_str() })
        .await?;

    log::info!(
        "⭐ GET /reviews/{} - enriching {} reviews",
        scholarship_id,
        reviews.len()
    );

    let enriched = enrich(reviews, &db.users, &REVIEWER_DETAILS).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(enriched)))
}

/// GET /reviews/r_id/{reviewer_id} - What one reviewer wrote, per scholarship
#[utoipa::path(
    get,
    path = "/reviews/r_id/{reviewer_id}",
    tag = "Reviews",
    params(("reviewer_id" = String, Path, description = "Reviewer user id as stored on the review")),
    responses(
        (status = 200, description = "List of {scholarship_name, university_name, review_comments, review_date}"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_reviews_by_reviewer(
    db: web::Data<Collections>,
    reviewer_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let reviewer_id = reviewer_id.into_inner();

    let reviews = db
        .reviews
        .find(doc! { "reviewer_id": reviewer_id.as_str() })
        .await?;

    log::info!(
        "⭐ GET /reviews/r_id/{} - enriching {} reviews",
        reviewer_id,
        reviews.len()
    );

    let enriched = enrich(reviews, &db.scholarships, &REVIEWED_SCHOLARSHIP).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(enriched)))
}

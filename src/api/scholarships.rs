use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::Value;

use crate::{
    database::{parse_object_id, Collections},
    models::{document_to_json, documents_to_json},
    utils::AppError,
};

/// GET /scholarships - Lists every scholarship
#[utoipa::path(
    get,
    path = "/scholarships",
    tag = "Scholarships",
    responses(
        (status = 200, description = "All scholarship documents"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_scholarships(db: web::Data<Collections>) -> Result<HttpResponse, AppError> {
    let scholarships = db.scholarships.find(doc! {}).await?;

    log::info!("🎓 GET /scholarships - {} scholarships", scholarships.len());

    Ok(HttpResponse::Ok().json(documents_to_json(scholarships)))
}

/// GET /scholarships/{id} - One scholarship, `null` when absent
#[utoipa::path(
    get,
    path = "/scholarships/{id}",
    tag = "Scholarships",
    params(("id" = String, Path, description = "Scholarship ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Scholarship document or null"),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_scholarship(
    db: web::Data<Collections>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let object_id = parse_object_id(&id)?;

    log::info!("🔍 GET /scholarships/{}", object_id);

    let scholarship = db.scholarships.find_one(doc! { "_id": object_id }).await?;
    Ok(HttpResponse::Ok().json(scholarship.map(document_to_json).unwrap_or(Value::Null)))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{test_app, with_store};
    use crate::database::memory::MemoryStore;
    use crate::database::SCHOLARSHIPS;
    use actix_web::{http::StatusCode, test};
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::{json, Value};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_list_and_get_by_id() {
        let id = ObjectId::new();
        let store = Arc::new(MemoryStore::with(vec![(
            SCHOLARSHIPS,
            vec![
                doc! { "_id": id, "subject_name": "CS", "university_name": "MIT", "application_fees": 19.99 },
                doc! { "_id": ObjectId::new(), "subject_name": "Law", "university_name": "LSE" },
            ],
        )]));
        let app = test::init_service(test_app(with_store(store))).await;

        let req = test::TestRequest::get().uri("/scholarships").to_request();
        let all: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let req = test::TestRequest::get()
            .uri(&format!("/scholarships/{}", id.to_hex()))
            .to_request();
        let one: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            one,
            json!({ "_id": id.to_hex(), "subject_name": "CS", "university_name": "MIT", "application_fees": 19.99 })
        );

        let req = test::TestRequest::get()
            .uri(&format!("/scholarships/{}", ObjectId::new().to_hex()))
            .to_request();
        let missing: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(missing, Value::Null);
    }

    #[actix_web::test]
    async fn test_malformed_id_is_bad_request() {
        let app = test::init_service(test_app(with_store(Arc::new(MemoryStore::default())))).await;

        let req = test::TestRequest::get().uri("/scholarships/not-an-id").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

pub mod applications;
pub mod health;
pub mod metrics;
pub mod payments;
pub mod reviews;
pub mod scholarships;
pub mod swagger;
pub mod users;

use actix_web::web;

use crate::utils::AppError;

/// Registers every route plus the extractor error handlers, so malformed
/// bodies and paths go through `AppError` like everything else.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(format!("Malformed JSON body: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(format!("Malformed path: {}", err)).into()
    }))
    .route("/", web::get().to(health::index))
    // Health & Metrics
    .route("/health", web::get().to(health::health_check))
    .route("/metrics", web::get().to(metrics::get_metrics))
    // Users
    .service(
        web::scope("/users")
            .route("", web::post().to(users::create_user))
            .route("", web::get().to(users::list_users))
            .route("", web::patch().to(users::update_user))
            .route("/{email}", web::get().to(users::get_user_by_email)),
    )
    // Scholarships
    .service(
        web::scope("/scholarships")
            .route("", web::get().to(scholarships::list_scholarships))
            .route("/{id}", web::get().to(scholarships::get_scholarship)),
    )
    // Applications
    .service(
        web::scope("/applications")
            .route("", web::get().to(applications::list_applications))
            .route("", web::post().to(applications::create_application))
            // Same resource: GET takes an applicant id, DELETE an application id
            .route("/{id}", web::get().to(applications::get_applications_by_applicant))
            .route("/{id}", web::delete().to(applications::delete_application)),
    )
    // Reviews
    .service(
        web::scope("/reviews")
            .route("", web::get().to(reviews::list_reviews))
            .route("", web::post().to(reviews::create_review))
            .route("/r_id/{reviewer_id}", web::get().to(reviews::get_reviews_by_reviewer))
            .route("/{scholarship_id}", web::get().to(reviews::get_reviews_by_scholarship)),
    )
    // Payments
    .route(
        "/create-payment-intent",
        web::post().to(payments::create_payment_intent),
    );
}


#[cfg(test)]
mod tests {
    use actix_web::{http::header, test};
    use mongodb::bson::doc;
    use std::sync::Arc;

    use super::test_support::{test_app, with_store};
    use crate::database::{memory::MemoryStore, USERS};

    #[actix_web::test]
    async fn test_responses_are_gzipped_when_accepted() {
        let store = Arc::new(MemoryStore::with(vec![(
            USERS,
            vec![doc! { "email": "a@example.com" }, doc! { "email": "b@example.com" }],
        )]));
        let app = test::init_service(test_app(with_store(store))).await;

        let req = test::TestRequest::get()
            .uri("/users")
            .insert_header((header::ACCEPT_ENCODING, "gzip"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::CONTENT_ENCODING).unwrap(),
            "gzip"
        );
    }

    #[actix_web::test]
    async fn test_plain_response_without_accept_encoding() {
        let app = test::init_service(test_app(with_store(Arc::new(MemoryStore::default())))).await;

        let req = test::TestRequest::get().uri("/users").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.headers().get(header::CONTENT_ENCODING).is_none());
    }
}

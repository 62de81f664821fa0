use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scholar Beacon API",
        version = "1.0.0",
        description = "Backend for the Scholar Beacon scholarship-discovery app.\n\n**Features:**\n- Users, scholarships, applications and reviews stored as MongoDB documents\n- Reviews and applications enriched with related user and scholarship details\n- Card payment intents for application fees\n- Health monitoring and metrics"
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::get_user_by_email,
        crate::api::users::update_user,

        // Scholarships
        crate::api::scholarships::list_scholarships,
        crate::api::scholarships::get_scholarship,

        // Applications
        crate::api::applications::list_applications,
        crate::api::applications::create_application,
        crate::api::applications::get_applications_by_applicant,
        crate::api::applications::delete_application,

        // Reviews
        crate::api::reviews::list_reviews,
        crate::api::reviews::create_review,
        crate::api::reviews::get_reviews_by_scholarship,
        crate::api::reviews::get_reviews_by_reviewer,

        // Payments
        crate::api::payments::create_payment_intent,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
            crate::database::InsertAck,
            crate::database::UpdateAck,
            crate::database::DeleteAck,
            crate::models::UpdateUserRequest,
            crate::models::PaymentIntentRequest,
            crate::models::PaymentIntentResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
        (name = "Users", description = "User profiles, stored as posted by the client."),
        (name = "Scholarships", description = "Scholarship catalog (read only)."),
        (name = "Applications", description = "Scholarship applications. Per-user listing is enriched with scholarship details."),
        (name = "Reviews", description = "Scholarship reviews, enriched with reviewer or scholarship details."),
        (name = "Payments", description = "Payment intents for application fees."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_enrichment_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/users",
            "/users/{email}",
            "/scholarships/{id}",
            "/applications/{applicant_id}",
            "/reviews/{scholarship_id}",
            "/reviews/r_id/{reviewer_id}",
            "/create-payment-intent",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }
}

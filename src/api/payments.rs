use actix_web::{web, HttpResponse};

use crate::{
    models::{PaymentIntentRequest, PaymentIntentResponse},
    services::{payment_service, PaymentProcessor},
    utils::AppError,
};

/// POST /create-payment-intent - Card payment intent in USD for the given fee
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret of the created intent", body = PaymentIntentResponse),
        (status = 400, description = "Missing or negative fee"),
        (status = 500, description = "Payment processor failure")
    )
)]
pub async fn create_payment_intent(
    processor: web::Data<dyn PaymentProcessor>,
    request: web::Json<PaymentIntentRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("💳 POST /create-payment-intent - fee {}", request.fee);

    let client_secret =
        payment_service::create_payment_intent(processor.get_ref(), request.fee).await?;

    Ok(HttpResponse::Ok().json(PaymentIntentResponse { client_secret }))
}

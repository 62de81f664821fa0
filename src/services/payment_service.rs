use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use crate::utils::AppError;

pub const CURRENCY: &str = "usd";
pub const PAYMENT_METHOD_TYPES: &[&str] = &["card"];

/// External processor that turns an amount into a payment intent.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Returns the client secret of the created intent.
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<String, AppError>;
}

/// Converts a fee in currency units to integer minor units (cents).
///
/// Truncates in decimal, so `19.99` gives `1999` even though
/// `19.99 * 100.0` is `1998.9999999999998` in binary floating point.
pub fn fee_to_minor_units(fee: f64) -> Result<i64, AppError> {
    if !fee.is_finite() || fee < 0.0 {
        return Err(AppError::InvalidRequest(format!("fee must be a non-negative amount, got {}", fee)));
    }

    // f64 Display gives the shortest round-trip form, never an exponent
    let text = fee.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let cents: String = fraction.chars().chain(std::iter::repeat('0')).take(2).collect();

    let too_large = || AppError::InvalidRequest(format!("fee {} is too large", fee));
    let whole: i64 = whole.trim_start_matches('-').parse().map_err(|_| too_large())?;
    let cents: i64 = cents.parse().map_err(|_| too_large())?;

    whole
        .checked_mul(100)
        .and_then(|amount| amount.checked_add(cents))
        .ok_or_else(too_large)
}

pub async fn create_payment_intent(
    processor: &dyn PaymentProcessor,
    fee: f64,
) -> Result<String, AppError> {
    let amount = fee_to_minor_units(fee)?;

    log::info!("💳 Creating payment intent: {} {} (fee {})", amount, CURRENCY, fee);

    let client_secret = processor.create_payment_intent(amount, CURRENCY).await?;

    log::info!("✅ Payment intent created");

    Ok(client_secret)
}

// ==================== STRIPE ====================

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: Option<String>,
}

pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(api_base: &str, secret_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        }
    }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<String, AppError> {
        let url = format!("{}/v1/payment_intents", self.api_base);

        let mut form = vec![
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
        ];
        for method in PAYMENT_METHOD_TYPES {
            form.push(("payment_method_types[]", method.to_string()));
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .header("Idempotency-Key", Uuid::new_v4().to_string())
            .form(&form)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| AppError::PaymentError(format!("Failed to reach payment processor: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorEnvelope>()
                .await
                .ok()
                .and_then(|envelope| envelope.error.message)
                .unwrap_or_else(|| "no error message".to_string());
            return Err(AppError::PaymentError(format!(
                "Payment processor rejected intent ({}): {}",
                status, message
            )));
        }

        let intent: StripePaymentIntent = response
            .json()
            .await
            .map_err(|e| AppError::PaymentError(format!("Failed to parse payment intent: {}", e)))?;

        Ok(intent.client_secret)
    }
}

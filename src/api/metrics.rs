use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::utils::metrics;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsResponse {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub enrichment_fallbacks_total: u64,
}

impl MetricsResponse {
    pub fn snapshot() -> Self {
        Self {
            http_requests_total: metrics::request_count(),
            http_errors_total: metrics::error_count(),
            enrichment_fallbacks_total: metrics::fallback_count(),
        }
    }

    fn render(&self) -> String {
        format!(
            "# HELP http_requests_total Total number of HTTP requests\n\
             # TYPE http_requests_total counter\n\
             http_requests_total {}\n\
             \n\
             # HELP http_errors_total Total number of HTTP errors\n\
             # TYPE http_errors_total counter\n\
             http_errors_total {}\n\
             \n\
             # HELP enrichment_fallbacks_total Enriched items whose related document was missing\n\
             # TYPE enrichment_fallbacks_total counter\n\
             enrichment_fallbacks_total {}\n",
            self.http_requests_total, self.http_errors_total, self.enrichment_fallbacks_total
        )
    }
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus text counters", body = String, content_type = "text/plain")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(MetricsResponse::snapshot().render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_counter() {
        let text = MetricsResponse {
            http_requests_total: 12,
            http_errors_total: 2,
            enrichment_fallbacks_total: 5,
        }
        .render();

        assert!(text.contains("http_requests_total 12\n"));
        assert!(text.contains("http_errors_total 2\n"));
        assert!(text.contains("enrichment_fallbacks_total 5\n"));
    }
}

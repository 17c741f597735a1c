//! Prometheus metrics collection and exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    active_coupon_decisions_total: IntCounterVec,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let tracked = metrics().is_some_and(|metrics| {
            metrics.requests_in_flight.inc();

            true
        });

        Self { tracked }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count one active-coupon decision by where the winning discount came from.
pub(crate) fn record_decision(origin: &str) {
    if let Some(metrics) = metrics() {
        metrics
            .active_coupon_decisions_total
            .with_label_values(&[origin])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();

    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(String::from_utf8_lossy(&encoded).into_owned());
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn metrics() -> Option<&'static Metrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

fn register<C>(registry: &Registry, name: &str, collector: C) -> Option<C>
where
    C: Collector + Clone + 'static,
{
    match registry.register(Box::new(collector.clone())) {
        Ok(()) => Some(collector),
        Err(source) => {
            error!("failed to register {name} metric: {source}");
            None
        }
    }
}

fn build_metrics() -> Option<Metrics> {
    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new(
            "coupons_json_http_requests_total",
            "Total HTTP requests partitioned by method, route, status class, and status code.",
        ),
        &["method", "route", "status_class", "status_code"],
    )
    .inspect_err(|source| error!("failed to create requests_total metric: {source}"))
    .ok()?;

    let request_duration_seconds = HistogramVec::new(
        HistogramOpts::new(
            "coupons_json_http_request_duration_seconds",
            "HTTP request duration in seconds partitioned by method and route.",
        )
        .buckets(DURATION_BUCKETS.to_vec()),
        &["method", "route"],
    )
    .inspect_err(|source| error!("failed to create request_duration metric: {source}"))
    .ok()?;

    let requests_in_flight = IntGauge::with_opts(Opts::new(
        "coupons_json_http_requests_in_flight",
        "Current number of in-flight HTTP requests.",
    ))
    .inspect_err(|source| error!("failed to create in-flight gauge metric: {source}"))
    .ok()?;

    let active_coupon_decisions_total = IntCounterVec::new(
        Opts::new(
            "coupons_json_active_coupon_decisions_total",
            "Active merchant coupon decisions partitioned by the origin of the winning discount.",
        ),
        &["origin"],
    )
    .inspect_err(|source| error!("failed to create decisions metric: {source}"))
    .ok()?;

    Some(Metrics {
        requests_total: register(&registry, "requests_total", requests_total)?,
        request_duration_seconds: register(
            &registry,
            "request_duration",
            request_duration_seconds,
        )?,
        requests_in_flight: register(&registry, "in-flight gauge", requests_in_flight)?,
        active_coupon_decisions_total: register(
            &registry,
            "decisions",
            active_coupon_decisions_total,
        )?,
        registry,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };

    use super::*;

    #[test]
    fn status_codes_are_grouped_by_class() {
        assert_eq!(status_class(200), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }

    #[tokio::test]
    async fn metrics_endpoint_exposes_http_and_decision_metrics() {
        observe_request("GET", "/products/{product}/active-coupon", 200, 0.042);
        observe_request("GET", "/products/{product}/active-coupon", 500, 0.123);
        record_decision("sale");

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let response = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await
            .unwrap_or_default();

        assert!(
            response.contains("coupons_json_http_requests_total"),
            "expected requests_total metric in response"
        );
        assert!(
            response.contains("coupons_json_http_request_duration_seconds"),
            "expected request_duration metric in response"
        );
        assert!(
            response.contains("coupons_json_http_requests_in_flight"),
            "expected in-flight metric in response"
        );
        assert!(
            response.contains("coupons_json_active_coupon_decisions_total{origin=\"sale\"}"),
            "expected decision counter in response"
        );
    }
}

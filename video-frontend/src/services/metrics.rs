use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;
use std::time::Duration;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// Page requests served by the front-end
pub static HTTP_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static HTTP_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

// Calls made to backend services
pub static BACKEND_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static BACKEND_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

// Upload attempts by final state
pub static UPLOADS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

pub fn init_metrics() -> Result<(), prometheus::Error> {
    if REGISTRY.get().is_some() {
        return Ok(());
    }

    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["method", "path", "status"],
    )?;
    let request_duration = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
        ),
        &["method", "path", "status"],
    )?;
    let backend_total = IntCounterVec::new(
        Opts::new("backend_requests_total", "Calls made to backend services"),
        &["service", "operation", "outcome"],
    )?;
    let backend_duration = HistogramVec::new(
        HistogramOpts::new(
            "backend_request_duration_seconds",
            "Backend call latency in seconds",
        ),
        &["service", "operation"],
    )?;
    let uploads_total = IntCounterVec::new(
        Opts::new("video_uploads_total", "Video upload attempts by outcome"),
        &["outcome"],
    )?;

    registry.register(Box::new(requests_total.clone()))?;
    registry.register(Box::new(request_duration.clone()))?;
    registry.register(Box::new(backend_total.clone()))?;
    registry.register(Box::new(backend_duration.clone()))?;
    registry.register(Box::new(uploads_total.clone()))?;

    // Initialize globals
    let _ = REGISTRY.set(registry);
    let _ = HTTP_REQUESTS_TOTAL.set(requests_total);
    let _ = HTTP_REQUEST_DURATION_SECONDS.set(request_duration);
    let _ = BACKEND_REQUESTS_TOTAL.set(backend_total);
    let _ = BACKEND_REQUEST_DURATION_SECONDS.set(backend_duration);
    let _ = UPLOADS_TOTAL.set(uploads_total);

    Ok(())
}

/// No-op until [`init_metrics`] has run (e.g. in tests).
pub fn record_http_request(method: &str, path: &str, status: u16, elapsed: Duration) {
    let status = status.to_string();
    if let Some(counter) = HTTP_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[method, path, status.as_str()]).inc();
    }
    if let Some(histogram) = HTTP_REQUEST_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[method, path, status.as_str()])
            .observe(elapsed.as_secs_f64());
    }
}

pub fn record_backend_call(service: &str, operation: &str, outcome: &str, elapsed: Duration) {
    if let Some(counter) = BACKEND_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[service, operation, outcome]).inc();
    }
    if let Some(histogram) = BACKEND_REQUEST_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[service, operation])
            .observe(elapsed.as_secs_f64());
    }
}

pub fn record_upload(outcome: &str) {
    if let Some(counter) = UPLOADS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

pub fn get_metrics() -> String {
    let Some(registry) = REGISTRY.get() else {
        return String::new();
    };

    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_after_init() {
        init_metrics().unwrap();
        init_metrics().unwrap();

        record_backend_call("video-service", "list_videos", "success", Duration::from_millis(12));
        record_upload("success");

        let text = get_metrics();
        assert!(text.contains("backend_requests_total"));
        assert!(text.contains("video_uploads_total"));
    }
}

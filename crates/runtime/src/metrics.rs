//! Metrics collection and Prometheus export.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tts_core::TtsResult;

/// Metrics recorder for TTS operations.
#[derive(Debug, Clone, Copy)]
pub struct TtsMetrics;

impl TtsMetrics {
    /// Initialize the metrics system and start the Prometheus exporter.
    ///
    /// # Arguments
    /// * `port` - Port for the Prometheus metrics endpoint
    pub fn init(port: u16) -> TtsResult<Self> {
        let addr: SocketAddr = ([0, 0, 0, 0], port).into();

        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .map_err(|e| tts_core::TtsError::internal(format!("metrics init failed: {e}")))?;

        Self::register_metrics();

        Ok(Self)
    }

    /// Metrics handle without an exporter (for tests and the CLI).
    pub fn init_noop() -> Self {
        Self
    }

    fn register_metrics() {
        describe_counter!(
            "tts_requests_total",
            "Total number of synthesis requests received"
        );
        describe_counter!(
            "tts_requests_completed",
            "Total number of synthesis requests completed successfully"
        );
        describe_counter!(
            "tts_requests_failed",
            "Total number of synthesis requests that failed"
        );
        describe_counter!(
            "tts_requests_timeout",
            "Total number of synthesis requests that timed out"
        );

        describe_histogram!(
            "tts_synthesis_latency_ms",
            "End-to-end synthesis latency in milliseconds"
        );
        describe_histogram!(
            "tts_audio_seconds",
            "Seconds of audio generated per request"
        );
        describe_histogram!(
            "tts_rtf",
            "Real-time factor (processing time / audio duration)"
        );

        describe_gauge!("tts_active_requests", "Number of currently active requests");
        describe_counter!("tts_files_swept_total", "Stale output files removed");
    }

    // Request tracking methods

    /// Record a new request received.
    pub fn request_received(&self) {
        counter!("tts_requests_total").increment(1);
    }

    /// Record a request completed successfully.
    pub fn request_completed(&self) {
        counter!("tts_requests_completed").increment(1);
    }

    /// Record a request failed.
    pub fn request_failed(&self) {
        counter!("tts_requests_failed").increment(1);
    }

    /// Record a request timeout.
    pub fn request_timeout(&self) {
        counter!("tts_requests_timeout").increment(1);
    }

    // Latency and throughput tracking methods

    /// Record end-to-end synthesis latency.
    pub fn record_synthesis_latency(&self, ms: f64) {
        histogram!("tts_synthesis_latency_ms").record(ms);
    }

    /// Record seconds of audio generated.
    pub fn record_audio_seconds(&self, secs: f64) {
        histogram!("tts_audio_seconds").record(secs);
    }

    /// Record real-time factor.
    pub fn record_rtf(&self, rtf: f64) {
        histogram!("tts_rtf").record(rtf);
    }

    // Resource tracking methods

    /// Adjust the number of in-flight requests.
    pub fn add_active_requests(&self, delta: f64) {
        gauge!("tts_active_requests").increment(delta);
    }

    /// Record stale files removed by a sweep.
    pub fn files_swept(&self, count: u64) {
        counter!("tts_files_swept_total").increment(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_noop() {
        let metrics = TtsMetrics::init_noop();

        // These should not panic even without a recorder
        metrics.request_received();
        metrics.request_completed();
        metrics.record_synthesis_latency(100.0);
        metrics.record_audio_seconds(1.5);
        metrics.add_active_requests(1.0);
        metrics.files_swept(3);
    }
}

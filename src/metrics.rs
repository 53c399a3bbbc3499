/// Metrics and telemetry for identity resolution
///
/// Provides Prometheus-compatible metrics for monitoring:
/// - Cache hit/miss rates per lookup direction
/// - Which fallback tier answered each resolution
/// - Remote identity service failures

use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

/// Lookup direction labels
pub const DIRECTION_ID: &str = "name_to_id";
pub const DIRECTION_NAME: &str = "id_to_name";

lazy_static! {
    /// Cache hits by lookup direction
    pub static ref IDENTITY_CACHE_HITS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "identity_cache_hits_total",
        "Total number of identity cache hits",
        &["direction"]
    )
    .expect("identity_cache_hits_total registers once");

    /// Cache misses by lookup direction
    pub static ref IDENTITY_CACHE_MISSES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "identity_cache_misses_total",
        "Total number of identity cache misses",
        &["direction"]
    )
    .expect("identity_cache_misses_total registers once");

    /// Resolutions by direction and the tier that answered
    pub static ref IDENTITY_RESOLUTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "identity_resolutions_total",
        "Total number of identity resolutions by answering source",
        &["direction", "source"]
    )
    .expect("identity_resolutions_total registers once");

    /// Remote identity service failures by direction
    pub static ref IDENTITY_REMOTE_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "identity_remote_failures_total",
        "Total number of failed remote identity lookups",
        &["direction"]
    )
    .expect("identity_remote_failures_total registers once");
}

/// Where a resolution was answered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    Session,
    History,
    Remote,
    Offline,
    Unresolved,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionSource::Cache => "cache",
            ResolutionSource::Session => "session",
            ResolutionSource::History => "history",
            ResolutionSource::Remote => "remote",
            ResolutionSource::Offline => "offline",
            ResolutionSource::Unresolved => "unresolved",
        }
    }
}

/// Render all metrics in Prometheus text format
pub fn render_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Record a cache access
pub fn record_cache_access(direction: &str, hit: bool) {
    if hit {
        IDENTITY_CACHE_HITS_TOTAL.with_label_values(&[direction]).inc();
    } else {
        IDENTITY_CACHE_MISSES_TOTAL.with_label_values(&[direction]).inc();
    }
}

/// Record which tier answered a resolution
pub fn record_resolution(direction: &str, source: ResolutionSource) {
    IDENTITY_RESOLUTIONS_TOTAL
        .with_label_values(&[direction, source.as_str()])
        .inc();
}

/// Record a failed remote lookup
pub fn record_remote_failure(direction: &str) {
    IDENTITY_REMOTE_FAILURES_TOTAL
        .with_label_values(&[direction])
        .inc();
}

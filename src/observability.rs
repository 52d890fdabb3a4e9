//! Structured metric logging for the pipeline's decisions.
//!
//! The `log_metric!` macro emits one `STRATA_METRIC` line of key/value pairs at
//! `debug` level. The pairs are only formatted when that level is enabled.

/// Logs a structured key-value metric line through the `log` facade.
///
/// ```ignore
/// log_metric!("event"="cycle", "codec"=&codec, "size"=&size);
/// ```
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if log::log_enabled!(log::Level::Debug) {
            let mut parts: Vec<String> = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            log::debug!("STRATA_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

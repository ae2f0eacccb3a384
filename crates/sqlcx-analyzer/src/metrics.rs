//! Tracing hooks, compiled only with the `tracing` feature.
//!
//! The binary layer owns subscriber setup.

pub fn emit_span(event: &str, key_values: &[(&str, String)]) {
    let span = tracing::span!(tracing::Level::TRACE, "sqlcx", event);
    let _enter = span.enter();
    for (k, v) in key_values {
        tracing::trace!(%event, %k, %v, "metric");
    }
}

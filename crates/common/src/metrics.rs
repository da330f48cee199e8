use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static ENTITY_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cemetery_entity_operations_total",
        "Entity service operations by entity, operation and outcome",
        &["entity", "operation", "outcome"]
    )
    .expect("register entity_operations_total")
});

pub static LOGIN_ATTEMPTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cemetery_login_attempts_total",
        "Login attempts by outcome",
        &["outcome"]
    )
    .expect("register login_attempts_total")
});

/// Count one entity operation; `ok` selects the outcome label.
pub fn record_operation(entity: &str, operation: &str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    ENTITY_OPERATIONS_TOTAL.with_label_values(&[entity, operation, outcome]).inc();
}

/// Record the outcome of `res` and hand it back unchanged.
pub fn track<T, E>(entity: &str, operation: &str, res: Result<T, E>) -> Result<T, E> {
    record_operation(entity, operation, res.is_ok());
    res
}

pub fn record_login(ok: bool) {
    LOGIN_ATTEMPTS_TOTAL.with_label_values(&[if ok { "success" } else { "failure" }]).inc();
}

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_operations_show_up_in_exposition() {
        record_operation("grave", "create", true);
        record_operation("grave", "delete", false);
        let res: Result<(), ()> = track("faq", "update", Err(()));
        assert!(res.is_err());
        record_login(true);
        let text = encode_metrics().unwrap();
        assert!(text.contains("cemetery_entity_operations_total"));
        assert!(text.contains("entity=\"grave\""));
        assert!(text.contains("entity=\"faq\""));
        assert!(text.contains("cemetery_login_attempts_total"));
    }
}

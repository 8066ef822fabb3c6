use std::sync::OnceLock;

static SERVICE_NAME: OnceLock<String> = OnceLock::new();

/// Records `AppConfig::service_name` for the response envelopes. Only the
/// first call takes effect.
pub fn init_service_name(name: &str) {
    if SERVICE_NAME.set(name.to_string()).is_err() {
        log::debug!("service name already set to {}", service_name());
    }
}

/// Service name reported in every response envelope.
pub fn service_name() -> &'static str {
    SERVICE_NAME.get().map(String::as_str).unwrap_or("Unknown")
}

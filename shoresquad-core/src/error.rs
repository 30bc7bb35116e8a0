use thiserror::Error;

/// The typed error channel every startup branch and user action returns.
///
/// Components do not present errors themselves; the orchestrator maps each
/// variant onto the shared toast tray. Variants wrap `anyhow::Error` where
/// the underlying failure is a request/decode chain with context attached.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather forecast unavailable: {0:#}")]
    Weather(anyhow::Error),

    #[error("Cleanup events unavailable: {0:#}")]
    Events(anyhow::Error),

    #[error("Map initialization failed: {0}")]
    Map(String),

    #[error("No cleanup event with id '{0}'")]
    EventNotFound(String),

    #[error("Join request for event '{id}' was rejected with status {status}")]
    JoinRejected { id: String, status: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_id() {
        let err = AppError::EventNotFound("ev-42".into());
        assert!(err.to_string().contains("ev-42"));
    }

    #[test]
    fn rejected_carries_the_status() {
        let err = AppError::JoinRejected { id: "ev-1".into(), status: 403 };
        let msg = err.to_string();
        assert!(msg.contains("ev-1"));
        assert!(msg.contains("403"));
    }
}

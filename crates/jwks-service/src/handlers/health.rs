//! Liveness check.

/// Returns "OK" while the process is running.
///
/// The key store is populated before the listener binds, so a running
/// process always has a signing key.
pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_ok() {
        assert_eq!(health_check().await, "OK");
    }
}

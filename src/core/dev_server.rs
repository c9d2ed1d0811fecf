use crate::core::models::{DevServerClient, DevServerConfig, MiddlewareEntry};
use crate::utils::{Result, RiggerError};

/// Fixed development server port.
pub const DEV_SERVER_PORT: u16 = 5014;

/// Build the development server descriptor.
///
/// Exactly three middleware behaviors are injected, in chain order:
/// source-map passthrough for eval'd modules, single-page-app fallback
/// routing to the served base path, and a no-op handler for the legacy
/// service-worker path. All three live in the middleware host; this
/// descriptor only names them.
pub fn descriptor(public_path: &str) -> Result<DevServerConfig> {
    if public_path.is_empty() {
        return Err(RiggerError::config(
            "dev server requested without a served base path for its middleware host",
        ));
    }

    Ok(DevServerConfig {
        client: DevServerClient { overlay: false },
        history_api_fallback: true,
        port: DEV_SERVER_PORT,
        hot: true,
        middleware: vec![
            MiddlewareEntry {
                name: "eval-source-map".to_string(),
                path: None,
            },
            MiddlewareEntry {
                name: "redirect-served-path".to_string(),
                path: Some(public_path.to_string()),
            },
            MiddlewareEntry {
                name: "noop-service-worker".to_string(),
                path: Some(public_path.to_string()),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_port_and_middleware_order() {
        let server = descriptor("/").unwrap();
        assert_eq!(server.port, 5014);
        assert!(server.hot);
        assert!(!server.client.overlay);
        assert!(server.history_api_fallback);

        let names: Vec<&str> = server.middleware.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["eval-source-map", "redirect-served-path", "noop-service-worker"]
        );
    }

    #[test]
    fn test_descriptor_rejects_empty_base_path() {
        assert!(matches!(descriptor(""), Err(RiggerError::Config(_))));
    }
}

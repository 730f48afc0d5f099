/// Error type shared by the store, configuration and browser adapters.
///
/// None of these reach the end user: callers at the component boundaries
/// log them and degrade to reduced functionality.

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("storage access failed: {0}")]
    StorageAccess(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid case path pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("case path pattern has no capture group: {0}")]
    MissingCapture(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dom error: {0}")]
    Dom(String),
}

impl WidgetError {
    /// Wrap a JS exception thrown by a storage call.
    pub fn storage_access(err: wasm_bindgen::JsValue) -> Self {
        WidgetError::StorageAccess(format!("{:?}", err))
    }

    pub fn dom(err: wasm_bindgen::JsValue) -> Self {
        WidgetError::Dom(format!("{:?}", err))
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = WidgetError::StorageAccess("QuotaExceededError".to_string());
        assert_eq!(err.to_string(), "storage access failed: QuotaExceededError");

        let err = WidgetError::MissingCapture("/case/".to_string());
        assert_eq!(err.to_string(), "case path pattern has no capture group: /case/");
    }

    #[test]
    fn test_json_error_converts() {
        fn parse(raw: &str) -> Result<Vec<String>> {
            Ok(serde_json::from_str(raw)?)
        }

        let err = parse("{not json").unwrap_err();
        assert!(matches!(err, WidgetError::Json(_)));
        assert!(err.to_string().starts_with("json error:"));
    }

    #[test]
    fn test_regex_error_converts() {
        fn compile(pattern: &str) -> Result<regex::Regex> {
            Ok(regex::Regex::new(pattern)?)
        }

        let err = compile("(unclosed").unwrap_err();
        assert!(matches!(err, WidgetError::InvalidPattern(_)));
    }
}

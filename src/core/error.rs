use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("session expired, please sign in again")]
    Unauthorized,
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized,
            other => ApiError::Status(other),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

// fetch() rejections arrive as TypeError objects, everything else as plain values
impl From<JsValue> for ApiError {
    fn from(value: JsValue) -> Self {
        if let Some(err) = value.dyn_ref::<js_sys::Error>() {
            return ApiError::Network(String::from(err.message()));
        }
        ApiError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_map_to_unauthorized() {
        assert_eq!(ApiError::from_status(401), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(500), ApiError::Status(500));
        assert_eq!(ApiError::Status(500).to_string(), "HTTP error! status: 500");
    }
}

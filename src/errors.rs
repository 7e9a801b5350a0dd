// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::header, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every failure a page can hit, from remote API errors to guard redirects.
/// Each variant maps to an HTTP status code and a localized message for the UI.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden access")]
    Forbidden,

    /// Non-2xx answer from the remote API, with the payload message when it sent one
    #[error("API error {status}: {}", message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    /// Transport or decode failure talking to the remote API
    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Guard decision: send the browser elsewhere
    #[error("Redirect to {0}")]
    Redirect(String),
}

impl PortalError {
    /// Stable machine-readable code for the JSON error body
    pub fn code(&self) -> &'static str {
        match self {
            PortalError::NotFound(_) => "NOT_FOUND",
            PortalError::InvalidInput(_) => "INVALID_INPUT",
            PortalError::ValidationError(_) => "VALIDATION_ERROR",
            PortalError::Unauthorized => "UNAUTHORIZED",
            PortalError::Forbidden => "FORBIDDEN",
            PortalError::Api { .. } => "API_ERROR",
            PortalError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            PortalError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            PortalError::Redirect(_) => "REDIRECT",
        }
    }

    /// Message shown to the user
    /// DOCUMENTATION: The UI is Arabic. Messages coming back from the API are
    /// passed through untouched since the backend already localizes them.
    pub fn localized_message(&self) -> String {
        match self {
            PortalError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            PortalError::Api { .. } | PortalError::ExternalApiError(_) => {
                "حدث خطأ أثناء تحميل البيانات. يرجى المحاولة مرة أخرى".to_string()
            }
            PortalError::NotFound(_) => "العنصر المطلوب غير موجود".to_string(),
            PortalError::InvalidInput(_) | PortalError::ValidationError(_) => {
                "يرجى التحقق من البيانات المدخلة".to_string()
            }
            PortalError::Unauthorized => "يرجى تسجيل الدخول للمتابعة".to_string(),
            PortalError::Forbidden => "ليس لديك صلاحية للوصول إلى هذه الصفحة".to_string(),
            PortalError::RateLimitExceeded => "عدد كبير من الطلبات، حاول لاحقاً".to_string(),
            PortalError::Redirect(_) => String::new(),
        }
    }
}

impl From<validator::ValidationErrors> for PortalError {
    fn from(errors: validator::ValidationErrors) -> Self {
        PortalError::ValidationError(errors.to_string())
    }
}

/// Convert PortalError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for PortalError {
    fn error_response(&self) -> HttpResponse {
        if let PortalError::Redirect(location) = self {
            return HttpResponse::Found()
                .insert_header((header::LOCATION, location.as_str()))
                .finish();
        }

        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.localized_message(),
                "detail": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PortalError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PortalError::Unauthorized => StatusCode::UNAUTHORIZED,
            PortalError::Forbidden => StatusCode::FORBIDDEN,
            PortalError::Api { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            PortalError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            PortalError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            PortalError::Redirect(_) => StatusCode::FOUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_is_passed_through() {
        let err = PortalError::Api {
            status: 422,
            message: Some("رقم الجوال مستخدم".to_string()),
        };
        assert_eq!(err.localized_message(), "رقم الجوال مستخدم");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn api_without_message_falls_back_to_generic_text() {
        let err = PortalError::Api {
            status: 500,
            message: None,
        };
        assert!(err.localized_message().starts_with("حدث خطأ"));
    }

    #[test]
    fn redirect_sets_location() {
        let resp = PortalError::Redirect("/auth/sign-in".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/auth/sign-in"
        );
    }
}

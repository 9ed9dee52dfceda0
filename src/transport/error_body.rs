use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
/// Twilio error document returned with non-2xx responses.
pub(crate) struct ApiErrorBody {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub status: Option<u16>,
}

/// Best-effort parse of an error body; `None` when the body is not the
/// documented error shape (callers fall back to a raw HTTP-status error).
pub(crate) fn decode_api_error_body(body: &str) -> Option<ApiErrorBody> {
    let parsed: ApiErrorBody = serde_json::from_str(body).ok()?;
    if parsed.code.is_none() && parsed.message.is_none() {
        return None;
    }
    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_documented_error_shape() {
        let body = r#"{"code": 21211, "message": "Invalid 'To' Phone Number", "more_info": "https://www.twilio.com/docs/errors/21211", "status": 400}"#;
        let err = decode_api_error_body(body).unwrap();
        assert_eq!(err.code, Some(21211));
        assert_eq!(err.message.as_deref(), Some("Invalid 'To' Phone Number"));
        assert_eq!(err.status, Some(400));
    }

    #[test]
    fn rejects_bodies_without_error_fields() {
        assert!(decode_api_error_body("{}").is_none());
        assert!(decode_api_error_body("not json").is_none());
    }
}

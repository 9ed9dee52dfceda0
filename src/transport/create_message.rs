use serde::Deserialize;
use url::Url;

use crate::domain::{MessagingServiceSid, RawPhoneNumber, SmsStatus};
use crate::transport::TransportError;

#[derive(Debug, Clone)]
/// One `Messages.json` create request, already resolved per recipient.
pub struct CreateMessage {
    pub to: RawPhoneNumber,
    /// Omitted when a messaging service picks the origination number.
    pub from: Option<RawPhoneNumber>,
    pub body: String,
    pub messaging_service_sid: Option<MessagingServiceSid>,
    pub status_callback: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The subset of Twilio's message resource this crate consumes.
pub struct MessageResource {
    pub sid: String,
    /// Parsed lifecycle status; `None` when Twilio sent a value this crate
    /// does not know.
    pub status: Option<SmsStatus>,
    /// Raw status text exactly as received.
    pub raw_status: String,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageJsonResponse {
    sid: String,
    status: String,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_message: Option<String>,
}

pub(crate) fn encode_create_message_form(request: &CreateMessage) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();

    params.push((RawPhoneNumber::FIELD.to_owned(), request.to.raw().to_owned()));
    if let Some(from) = request.from.as_ref() {
        params.push(("From".to_owned(), from.raw().to_owned()));
    }
    params.push(("Body".to_owned(), request.body.clone()));
    if let Some(sid) = request.messaging_service_sid.as_ref() {
        params.push((MessagingServiceSid::FIELD.to_owned(), sid.as_str().to_owned()));
    }
    if let Some(url) = request.status_callback.as_ref() {
        params.push(("StatusCallback".to_owned(), url.to_string()));
    }

    params
}

pub(crate) fn decode_create_message_json_response(
    body: &str,
) -> Result<MessageResource, TransportError> {
    let parsed: MessageJsonResponse = serde_json::from_str(body)?;
    Ok(MessageResource {
        status: SmsStatus::parse(&parsed.status),
        raw_status: parsed.status,
        sid: parsed.sid,
        error_code: parsed.error_code,
        error_message: parsed.error_message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateMessage {
        CreateMessage {
            to: RawPhoneNumber::new("+15550001111").unwrap(),
            from: Some(RawPhoneNumber::new("+15550002222").unwrap()),
            body: "hello".to_owned(),
            messaging_service_sid: None,
            status_callback: None,
        }
    }

    #[test]
    fn encodes_to_from_and_body() {
        let params = encode_create_message_form(&request());
        assert_eq!(
            params,
            vec![
                ("To".to_owned(), "+15550001111".to_owned()),
                ("From".to_owned(), "+15550002222".to_owned()),
                ("Body".to_owned(), "hello".to_owned()),
            ]
        );
    }

    #[test]
    fn encodes_messaging_service_without_from() {
        let mut request = request();
        request.from = None;
        request.messaging_service_sid =
            Some(MessagingServiceSid::new("MG0123456789abcdef").unwrap());
        request.status_callback = Some(Url::parse("https://example.invalid/cb").unwrap());

        let params = encode_create_message_form(&request);
        assert!(!params.iter().any(|(k, _)| k == "From"));
        assert!(
            params
                .iter()
                .any(|(k, v)| k == "MessagingServiceSid" && v == "MG0123456789abcdef")
        );
        assert!(
            params
                .iter()
                .any(|(k, v)| k == "StatusCallback" && v == "https://example.invalid/cb")
        );
    }

    #[test]
    fn decodes_message_resource() {
        let body = r#"
        {
          "sid": "SM0123456789abcdef",
          "status": "queued",
          "error_code": null,
          "error_message": null,
          "num_segments": "1"
        }
        "#;
        let resource = decode_create_message_json_response(body).unwrap();
        assert_eq!(resource.sid, "SM0123456789abcdef");
        assert_eq!(resource.status, Some(SmsStatus::Queued));
        assert_eq!(resource.raw_status, "queued");
        assert_eq!(resource.error_code, None);
    }

    #[test]
    fn keeps_raw_text_for_unknown_status() {
        let body = r#"{"sid": "SM1", "status": "hologram"}"#;
        let resource = decode_create_message_json_response(body).unwrap();
        assert_eq!(resource.status, None);
        assert_eq!(resource.raw_status, "hologram");
    }

    #[test]
    fn invalid_json_is_a_transport_error() {
        assert!(matches!(
            decode_create_message_json_response("{ nope }"),
            Err(TransportError::Json(_))
        ));
    }
}

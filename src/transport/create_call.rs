use serde::Deserialize;
use url::Url;

use crate::domain::{CallStatus, RawPhoneNumber, RingTimeout};
use crate::transport::TransportError;

#[derive(Debug, Clone)]
/// One `Calls.json` create request, already resolved per recipient.
///
/// Exactly one of `twiml` and `url` is set; the voice dispatcher enforces
/// that before building the request.
pub struct CreateCall {
    pub to: RawPhoneNumber,
    pub from: RawPhoneNumber,
    pub twiml: Option<String>,
    pub url: Option<Url>,
    /// HTTP method Twilio uses to fetch `url`; the API names this `Method`.
    pub url_method: Option<String>,
    pub timeout: Option<RingTimeout>,
    pub status_callback: Option<Url>,
    pub status_callback_method: Option<String>,
    pub machine_detection: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The subset of Twilio's call resource this crate consumes.
pub struct CallResource {
    pub sid: String,
    /// Parsed lifecycle status; `None` for values outside the known set
    /// (Twilio's `canceled`, for one, has no normalized counterpart).
    pub status: Option<CallStatus>,
    /// Raw status text exactly as received.
    pub raw_status: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CallJsonResponse {
    sid: String,
    status: String,
}

pub(crate) fn encode_create_call_form(request: &CreateCall) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();

    params.push((RawPhoneNumber::FIELD.to_owned(), request.to.raw().to_owned()));
    params.push(("From".to_owned(), request.from.raw().to_owned()));
    if let Some(twiml) = request.twiml.as_ref() {
        params.push(("Twiml".to_owned(), twiml.clone()));
    }
    if let Some(url) = request.url.as_ref() {
        params.push(("Url".to_owned(), url.to_string()));
    }
    if let Some(method) = request.url_method.as_ref() {
        params.push(("Method".to_owned(), method.clone()));
    }
    if let Some(timeout) = request.timeout {
        params.push((RingTimeout::FIELD.to_owned(), timeout.seconds().to_string()));
    }
    if let Some(url) = request.status_callback.as_ref() {
        params.push(("StatusCallback".to_owned(), url.to_string()));
    }
    if let Some(method) = request.status_callback_method.as_ref() {
        params.push(("StatusCallbackMethod".to_owned(), method.clone()));
    }
    if let Some(mode) = request.machine_detection {
        params.push(("MachineDetection".to_owned(), mode.to_owned()));
    }

    params
}

pub(crate) fn decode_create_call_json_response(body: &str) -> Result<CallResource, TransportError> {
    let parsed: CallJsonResponse = serde_json::from_str(body)?;
    Ok(CallResource {
        status: CallStatus::parse(&parsed.status),
        raw_status: parsed.status,
        sid: parsed.sid,
    })
}

//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{AccountSid, AuthToken, BoxFuture, ValidationError};
use crate::transport::{
    CallResource, CreateCall, CreateMessage, MessageResource, decode_api_error_body,
    decode_create_call_json_response, decode_create_message_json_response,
    encode_create_call_form, encode_create_message_form,
};

const DEFAULT_API_BASE: &str = "https://api.twilio.com";
const API_VERSION: &str = "2010-04-01";

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    status: u16,
    body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: (&'a str, &'a str),
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: (&'a str, &'a str),
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .basic_auth(auth.0, Some(auth.1))
                .form(&params)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Twilio API credentials: account sid + auth token, sent as HTTP basic auth.
pub struct TwilioAuth {
    account_sid: AccountSid,
    auth_token: AuthToken,
}

impl TwilioAuth {
    /// Create validated credentials.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            account_sid: AccountSid::new(account_sid)?,
            auth_token: AuthToken::new(auth_token)?,
        })
    }

    /// The account sid part.
    pub fn account_sid(&self) -> &AccountSid {
        &self.account_sid
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TwilioClient`] and the dispatchers built on it.
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - API-level failures (Twilio's documented error document),
/// - configuration failures (missing required content source / addressing),
/// - validation/parse failures.
pub enum TwilioError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status without a parseable Twilio error document.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Twilio returned its documented error document.
    #[error("API error {code:?}: {message:?}")]
    Api {
        code: Option<i64>,
        message: Option<String>,
        status: u16,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The dispatch cannot proceed as configured; distinct from transport
    /// failures and never silently swallowed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`TwilioClient`].
///
/// Use this when you need to customize the API base, timeout, or user-agent.
pub struct TwilioClientBuilder {
    auth: TwilioAuth,
    api_base: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TwilioClientBuilder {
    /// Create a builder with the default API base and no timeout/user-agent
    /// override.
    pub fn new(auth: TwilioAuth) -> Self {
        Self {
            auth,
            api_base: DEFAULT_API_BASE.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL (region/edge routing, test servers).
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TwilioClient`].
    pub fn build(self) -> Result<TwilioClient, TwilioError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TwilioError::Transport(Box::new(err)))?;

        Ok(TwilioClient {
            auth: self.auth,
            api_base: self.api_base,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Minimal Twilio REST client covering the two create operations the
/// dispatchers need.
///
/// Exactly one HTTP call is made per invocation; retries and backoff are the
/// caller's concern. Dropping the returned future cancels the underlying
/// request.
pub struct TwilioClient {
    auth: TwilioAuth,
    api_base: String,
    http: Arc<dyn HttpTransport>,
}

impl TwilioClient {
    /// Create a client using the default API base.
    ///
    /// For more customization, use [`TwilioClient::builder`].
    pub fn new(auth: TwilioAuth) -> Self {
        Self {
            auth,
            api_base: DEFAULT_API_BASE.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: TwilioAuth) -> TwilioClientBuilder {
        TwilioClientBuilder::new(auth)
    }

    #[cfg(test)]
    pub(crate) fn with_transport(auth: TwilioAuth, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            auth,
            api_base: "https://example.invalid".to_owned(),
            http: transport,
        }
    }

    /// Send one SMS create-message request.
    ///
    /// Errors:
    /// - [`TwilioError::Api`] when Twilio returns its error document,
    /// - [`TwilioError::HttpStatus`] for other non-2xx HTTP responses,
    /// - [`TwilioError::Parse`] when a 2xx body is not a message resource.
    pub async fn create_message(
        &self,
        request: CreateMessage,
    ) -> Result<MessageResource, TwilioError> {
        let url = self.resource_url("Messages.json");
        let params = encode_create_message_form(&request);
        let body = self.post(&url, params).await?;
        decode_create_message_json_response(&body)
            .map_err(|err| TwilioError::Parse(Box::new(err)))
    }

    /// Send one voice create-call request.
    ///
    /// Same error surface as [`TwilioClient::create_message`].
    pub async fn create_call(&self, request: CreateCall) -> Result<CallResource, TwilioError> {
        let url = self.resource_url("Calls.json");
        let params = encode_create_call_form(&request);
        let body = self.post(&url, params).await?;
        decode_create_call_json_response(&body).map_err(|err| TwilioError::Parse(Box::new(err)))
    }

    fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}/{}/Accounts/{}/{}",
            self.api_base,
            API_VERSION,
            self.auth.account_sid.as_str(),
            resource
        )
    }

    async fn post(
        &self,
        url: &str,
        params: Vec<(String, String)>,
    ) -> Result<String, TwilioError> {
        let auth = (
            self.auth.account_sid.as_str(),
            self.auth.auth_token.as_str(),
        );
        let response = self
            .http
            .post_form(url, auth, params)
            .await
            .map_err(TwilioError::Transport)?;

        if !(200..=299).contains(&response.status) {
            if let Some(api_error) = decode_api_error_body(&response.body) {
                return Err(TwilioError::Api {
                    code: api_error.code,
                    message: api_error.message,
                    status: api_error.status.unwrap_or(response.status),
                });
            }
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(TwilioError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Shared-state fake transport: records requests, replays canned
    /// responses in order (the last one repeats).
    #[derive(Clone)]
    pub(crate) struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    struct FakeTransportState {
        requests: Vec<(String, Vec<(String, String)>)>,
        responses: Vec<(u16, String)>,
        next: usize,
    }

    impl FakeTransport {
        pub(crate) fn new(status: u16, body: impl Into<String>) -> Self {
            Self::with_responses(vec![(status, body.into())])
        }

        pub(crate) fn with_responses(responses: Vec<(u16, String)>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    requests: Vec::new(),
                    responses,
                    next: 0,
                })),
            }
        }

        pub(crate) fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.state.lock().unwrap().requests.clone()
        }

        pub(crate) fn last_request(&self) -> (Option<String>, Vec<(String, String)>) {
            let state = self.state.lock().unwrap();
            match state.requests.last() {
                Some((url, params)) => (Some(url.clone()), params.clone()),
                None => (None, Vec::new()),
            }
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            _auth: (&'a str, &'a str),
            params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.requests.push((url.to_owned(), params));
                    let idx = state.next.min(state.responses.len() - 1);
                    state.next += 1;
                    state.responses[idx].clone()
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    pub(crate) fn auth() -> TwilioAuth {
        TwilioAuth::new("AC0123456789abcdef0123456789abcdef", "token").unwrap()
    }

    pub(crate) fn client(transport: FakeTransport) -> TwilioClient {
        TwilioClient::with_transport(auth(), Arc::new(transport))
    }

    pub(crate) fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    pub(crate) fn assert_no_param(params: &[(String, String)], key: &str) {
        assert!(
            !params.iter().any(|(k, _)| k == key),
            "unexpected param {key}; got: {params:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FakeTransport, assert_param, client};
    use super::*;
    use crate::domain::{RawPhoneNumber, SmsStatus};

    #[tokio::test]
    async fn create_message_posts_form_and_parses_resource() {
        let body = r#"{"sid": "SM0123", "status": "queued"}"#;
        let transport = FakeTransport::new(201, body);
        let client = client(transport.clone());

        let resource = client
            .create_message(CreateMessage {
                to: RawPhoneNumber::new("+15550001111").unwrap(),
                from: Some(RawPhoneNumber::new("+15550002222").unwrap()),
                body: "hello".to_owned(),
                messaging_service_sid: None,
                status_callback: None,
            })
            .await
            .unwrap();

        assert_eq!(resource.sid, "SM0123");
        assert_eq!(resource.status, Some(SmsStatus::Queued));

        let (url, params) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some(
                "https://example.invalid/2010-04-01/Accounts/AC0123456789abcdef0123456789abcdef/Messages.json"
            )
        );
        assert_param(&params, "To", "+15550001111");
        assert_param(&params, "Body", "hello");
    }

    #[tokio::test]
    async fn create_call_targets_calls_resource() {
        let body = r#"{"sid": "CA0123", "status": "queued"}"#;
        let transport = FakeTransport::new(201, body);
        let client = client(transport.clone());

        let resource = client
            .create_call(CreateCall {
                to: RawPhoneNumber::new("+15550001111").unwrap(),
                from: RawPhoneNumber::new("+15550002222").unwrap(),
                twiml: Some("<Response><Say>hi</Say></Response>".to_owned()),
                url: None,
                url_method: None,
                timeout: None,
                status_callback: None,
                status_callback_method: None,
                machine_detection: None,
            })
            .await
            .unwrap();

        assert_eq!(resource.sid, "CA0123");

        let (url, _) = transport.last_request();
        assert!(url.unwrap().ends_with("/Calls.json"));
    }

    #[tokio::test]
    async fn api_error_document_maps_to_api_error() {
        let body = r#"{"code": 21211, "message": "Invalid 'To' Phone Number", "status": 400}"#;
        let transport = FakeTransport::new(400, body);
        let client = client(transport);

        let err = client
            .create_message(CreateMessage {
                to: RawPhoneNumber::new("bad").unwrap(),
                from: None,
                body: "hi".to_owned(),
                messaging_service_sid: None,
                status_callback: None,
            })
            .await
            .unwrap_err();

        match err {
            TwilioError::Api {
                code,
                message,
                status,
            } => {
                assert_eq!(code, Some(21211));
                assert_eq!(message.as_deref(), Some("Invalid 'To' Phone Number"));
                assert_eq!(status, 400);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_success_without_error_document_maps_to_http_status() {
        let transport = FakeTransport::new(503, "oops");
        let client = client(transport);

        let err = client
            .create_message(CreateMessage {
                to: RawPhoneNumber::new("+15550001111").unwrap(),
                from: None,
                body: "hi".to_owned(),
                messaging_service_sid: None,
                status_callback: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TwilioError::HttpStatus {
                status: 503,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn empty_http_body_maps_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = client(transport);

        let err = client
            .create_call(CreateCall {
                to: RawPhoneNumber::new("+15550001111").unwrap(),
                from: RawPhoneNumber::new("+15550002222").unwrap(),
                twiml: Some("<Response><Say>hi</Say></Response>".to_owned()),
                url: None,
                url_method: None,
                timeout: None,
                status_callback: None,
                status_callback_method: None,
                machine_detection: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TwilioError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn invalid_success_body_maps_to_parse_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = client(transport);

        let err = client
            .create_message(CreateMessage {
                to: RawPhoneNumber::new("+15550001111").unwrap(),
                from: None,
                body: "hi".to_owned(),
                messaging_service_sid: None,
                status_callback: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TwilioError::Parse(_)));
    }

    #[test]
    fn auth_constructor_validates_inputs() {
        assert!(TwilioAuth::new("AC0123", "token").is_ok());
        assert!(TwilioAuth::new("0123", "token").is_err());
        assert!(TwilioAuth::new("AC0123", "").is_err());
    }

    #[test]
    fn builder_api_base_override_is_applied() {
        let client = TwilioClient::builder(testing::auth())
            .api_base("https://api.example.invalid")
            .build()
            .unwrap();
        assert_eq!(client.api_base, "https://api.example.invalid");
    }
}

//! Host-facing contracts for inbound delivery-report adaptation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::DeliveryReport;

/// Context key under which the host supplies the channel-id hint.
pub const CHANNEL_ID_KEY: &str = "channelId";

/// Context key under which the host supplies the channel-provider-id hint.
pub const CHANNEL_PROVIDER_ID_KEY: &str = "channelProviderId";

/// A webhook-shaped request as seen by delivery-report adaptors.
///
/// The host routes each inbound request to every registered adaptor; the
/// context exposes named header/field lookup plus the pipeline correlation
/// hints recovered from the callback URL.
pub trait RequestAdaptorContext: Send + Sync {
    /// Look up a named field (form field, query parameter, or header).
    fn get_value(&self, key: &str) -> Option<&str>;

    /// Pipeline intent recovered from the callback URL, if any.
    fn pipeline_intent(&self) -> Option<&str>;

    /// Pipeline id recovered from the callback URL, if any.
    fn pipeline_id(&self) -> Option<&str>;
}

/// Translates vendor webhook payloads into normalized delivery reports.
///
/// Returning `None` signals "not mine" — never an error — so a host can try
/// multiple adaptors against the same request.
#[async_trait]
pub trait DeliveryReportRequestAdaptor: Send + Sync {
    async fn adapt(&self, context: &dyn RequestAdaptorContext) -> Option<Vec<DeliveryReport>>;
}

#[derive(Debug, Clone, Default)]
/// Map-backed [`RequestAdaptorContext`] for hosts that have already decoded
/// the request body, and for tests.
pub struct FormAdaptorContext {
    values: HashMap<String, String>,
    pipeline_intent: Option<String>,
    pipeline_id: Option<String>,
}

impl FormAdaptorContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named field value.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Set the pipeline correlation hints.
    pub fn with_pipeline(
        mut self,
        pipeline_intent: impl Into<String>,
        pipeline_id: impl Into<String>,
    ) -> Self {
        self.pipeline_intent = Some(pipeline_intent.into());
        self.pipeline_id = Some(pipeline_id.into());
        self
    }
}

impl RequestAdaptorContext for FormAdaptorContext {
    fn get_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn pipeline_intent(&self) -> Option<&str> {
        self.pipeline_intent.as_deref()
    }

    fn pipeline_id(&self) -> Option<&str> {
        self.pipeline_id.as_deref()
    }
}

/// Applicability gate shared by the SMS and Voice adaptors: the channel-id
/// hint must equal `channel_id` and the provider hint must start with the
/// Twilio provider id, both case-insensitive.
pub(crate) fn should_adapt(context: &dyn RequestAdaptorContext, channel_id: &str) -> bool {
    let channel_matches = context
        .get_value(CHANNEL_ID_KEY)
        .is_some_and(|value| value.eq_ignore_ascii_case(channel_id));
    let provider_matches = context.get_value(CHANNEL_PROVIDER_ID_KEY).is_some_and(|value| {
        value
            .get(..crate::domain::TWILIO_PROVIDER_ID.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(crate::domain::TWILIO_PROVIDER_ID))
    });
    channel_matches && provider_matches
}

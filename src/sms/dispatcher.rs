use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::client::{TwilioClient, TwilioError};
use crate::dispatch::ChannelProviderDispatcher;
use crate::domain::{DispatchContext, DispatchResult, RawPhoneNumber, SmsMessage, SmsStatus};
use crate::sms::properties::SmsChannelProperties;
use crate::transport::{CreateMessage, MessageResource};

/// Dispatches SMS communications through Twilio, one create-message call per
/// recipient.
pub struct SmsDispatcher {
    client: TwilioClient,
}

impl SmsDispatcher {
    /// Create a dispatcher over a configured client.
    pub fn new(client: TwilioClient) -> Self {
        Self { client }
    }

    async fn dispatch_one(
        &self,
        message: &SmsMessage,
        properties: &SmsChannelProperties<'_>,
        recipient: &RawPhoneNumber,
        context: &DispatchContext,
    ) -> Result<DispatchResult, TwilioError> {
        let messaging_service_sid = properties.messaging_service_sid();
        // Twilio picks the origination number when routing through a
        // messaging service; sending an explicit From alongside it is
        // rejected.
        let from = if messaging_service_sid.is_some() {
            None
        } else {
            message.from().cloned()
        };

        let status_callback = resolve_status_callback(properties, message, context).await?;

        let resource = self
            .client
            .create_message(CreateMessage {
                to: recipient.clone(),
                from,
                body: message.body().to_owned(),
                messaging_service_sid,
                status_callback,
            })
            .await?;

        let dispatched = is_dispatched(&resource);
        Ok(DispatchResult::new(
            resource.sid,
            dispatched,
            resource.raw_status,
        ))
    }
}

#[async_trait]
impl ChannelProviderDispatcher for SmsDispatcher {
    type Message = SmsMessage;

    async fn dispatch(
        &self,
        message: &SmsMessage,
        context: &DispatchContext,
    ) -> Vec<Result<DispatchResult, TwilioError>> {
        let properties = SmsChannelProperties::new(message.extended_properties());
        let mut results = Vec::with_capacity(context.recipients().len());

        for recipient in context.recipients() {
            context.notify_dispatch();

            let outcome = self
                .dispatch_one(message, &properties, recipient, context)
                .await;
            match &outcome {
                Ok(result) => {
                    debug!(
                        recipient = recipient.raw(),
                        resource_id = result.resource_id(),
                        status = result.status(),
                        dispatched = result.is_dispatched(),
                        "sms dispatch attempt finished"
                    );
                    if result.is_dispatched() {
                        context.notify_dispatched(result);
                    } else {
                        context.notify_error(result);
                    }
                }
                Err(err) => {
                    warn!(recipient = recipient.raw(), error = %err, "sms dispatch attempt failed");
                }
            }
            results.push(outcome);
        }

        results
    }
}

/// Priority order: property resolver, then the message-level resolver, then
/// the static property URL. Only the static path carries pipeline-context
/// parameters; resolver output is used verbatim, and an empty resolver result
/// means "no callback".
async fn resolve_status_callback(
    properties: &SmsChannelProperties<'_>,
    message: &SmsMessage,
    context: &DispatchContext,
) -> Result<Option<Url>, TwilioError> {
    let resolver = properties
        .status_callback_url_resolver()
        .or_else(|| message.delivery_report_callback_url_resolver());
    if let Some(resolver) = resolver {
        return match resolver.resolve(context).await.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(url) => parse_callback_url(url).map(Some),
        };
    }

    match properties.status_callback_url().map(str::trim) {
        None | Some("") => Ok(None),
        Some(url) => {
            let mut url = parse_callback_url(url)?;
            context.append_pipeline_context(&mut url);
            Ok(Some(url))
        }
    }
}

fn parse_callback_url(url: &str) -> Result<Url, TwilioError> {
    Url::parse(url)
        .map_err(|err| TwilioError::Configuration(format!("invalid status-callback URL `{url}`: {err}")))
}

fn is_dispatched(resource: &MessageResource) -> bool {
    !matches!(
        resource.status,
        Some(SmsStatus::Failed | SmsStatus::Undelivered)
    )
}

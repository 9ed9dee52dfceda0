use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::client::{TwilioClient, TwilioError};
use crate::dispatch::ChannelProviderDispatcher;
use crate::domain::{DispatchContext, DispatchResult, RawPhoneNumber, VoiceMessage};
use crate::voice::properties::VoiceChannelProperties;
use crate::transport::{CallResource, CreateCall};

/// Longest spoken-text document Twilio accepts inline on the create-call
/// request; anything longer has to be fetched from a content URL.
const MAX_INLINE_TWIML_LEN: usize = 4000;

/// Query parameter correlating a content URL fetch with stored content.
const MESSAGE_ID_PARAM: &str = "messageId";

/// Dispatches voice communications through Twilio, one create-call request
/// per recipient.
pub struct VoiceDispatcher {
    client: TwilioClient,
}

impl VoiceDispatcher {
    /// Create a dispatcher over a configured client.
    pub fn new(client: TwilioClient) -> Self {
        Self { client }
    }

    async fn dispatch_one(
        &self,
        message: &VoiceMessage,
        properties: &VoiceChannelProperties<'_>,
        recipient: &RawPhoneNumber,
        context: &DispatchContext,
    ) -> Result<DispatchResult, TwilioError> {
        let machine_detection = properties
            .machine_detection()
            .unwrap_or(message.machine_detection());
        let content = resolve_content(message, properties, context).await?;
        let status_callback = resolve_status_callback(properties, message, context).await?;

        let (twiml, url) = match content {
            CallContent::Inline(twiml) => (Some(twiml), None),
            CallContent::Remote { url, content_id, rendered } => {
                // The host stores the rendered content under the correlation
                // id so its endpoint can serve Twilio's fetch; the dispatch
                // path never waits on that.
                if let Some(hook) = properties.on_store_content() {
                    let hook = hook.clone();
                    let context = context.clone();
                    tokio::spawn(async move {
                        hook.store(content_id, rendered, context).await;
                    });
                }
                (None, Some(url))
            }
        };

        let url_method = url
            .is_some()
            .then(|| properties.url_method().map(str::to_owned))
            .flatten();
        let resource = self
            .client
            .create_call(CreateCall {
                to: recipient.clone(),
                from: message.from().clone(),
                twiml,
                url,
                url_method,
                timeout: properties.timeout(),
                status_callback,
                status_callback_method: properties.status_callback_method().map(str::to_owned),
                machine_detection: machine_detection.as_form_value(),
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
impl ChannelProviderDispatcher for VoiceDispatcher {
    type Message = VoiceMessage;

    async fn dispatch(
        &self,
        message: &VoiceMessage,
        context: &DispatchContext,
    ) -> Vec<Result<DispatchResult, TwilioError>> {
        let properties = VoiceChannelProperties::new(message.extended_properties());
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
                        "voice dispatch attempt finished"
                    );
                    if result.is_dispatched() {
                        context.notify_dispatched(result);
                    } else {
                        context.notify_error(result);
                    }
                }
                Err(err) => {
                    warn!(recipient = recipient.raw(), error = %err, "voice dispatch attempt failed");
                }
            }
            results.push(outcome);
        }

        results
    }
}

enum CallContent {
    Inline(String),
    Remote {
        url: Url,
        content_id: String,
        rendered: String,
    },
}

/// Render the spoken-text document and decide how Twilio receives it.
///
/// A non-empty body that fits the inline limit rides on the request itself.
/// Otherwise a content URL is mandatory (resolver first, then the static
/// property) and gets a fresh correlation id plus the pipeline context
/// appended; a missing URL is a configuration error.
async fn resolve_content(
    message: &VoiceMessage,
    properties: &VoiceChannelProperties<'_>,
    context: &DispatchContext,
) -> Result<CallContent, TwilioError> {
    let rendered = if message.body().is_empty() {
        String::new()
    } else {
        render_say_twiml(message.body())
    };

    if !rendered.is_empty() && rendered.len() <= MAX_INLINE_TWIML_LEN {
        return Ok(CallContent::Inline(rendered));
    }

    let resolved = match properties.url_resolver() {
        Some(resolver) => resolver.resolve(context).await,
        None => None,
    };
    let url = match resolved.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_owned(),
        _ => match properties.url().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_owned(),
            _ => {
                return Err(TwilioError::Configuration(
                    "voice content exceeds the inline limit or is empty, and no content URL is configured".to_owned(),
                ));
            }
        },
    };

    let mut url = Url::parse(&url)
        .map_err(|err| TwilioError::Configuration(format!("invalid content URL `{url}`: {err}")))?;
    let content_id = Uuid::new_v4().simple().to_string();
    url.query_pairs_mut().append_pair(MESSAGE_ID_PARAM, &content_id);
    context.append_pipeline_context(&mut url);

    Ok(CallContent::Remote {
        url,
        content_id,
        rendered,
    })
}

fn render_say_twiml(body: &str) -> String {
    let mut escaped = String::with_capacity(body.len());
    for ch in body.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    format!("<Response><Say>{escaped}</Say></Response>")
}

/// Priority order: property resolver, then the message-level resolver, then
/// the static property URL. Unlike SMS, every resolved callback URL carries
/// the pipeline-context parameters.
async fn resolve_status_callback(
    properties: &VoiceChannelProperties<'_>,
    message: &VoiceMessage,
    context: &DispatchContext,
) -> Result<Option<Url>, TwilioError> {
    let resolver = properties
        .status_callback_url_resolver()
        .or_else(|| message.delivery_report_callback_url_resolver());
    let raw = if let Some(resolver) = resolver {
        resolver.resolve(context).await
    } else {
        properties.status_callback_url().map(str::to_owned)
    };

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(url) => {
            let mut url = Url::parse(url).map_err(|err| {
                TwilioError::Configuration(format!("invalid status-callback URL `{url}`: {err}"))
            })?;
            context.append_pipeline_context(&mut url);
            Ok(Some(url))
        }
    }
}

fn is_dispatched(resource: &CallResource) -> bool {
    !matches!(resource.raw_status.as_str(), "failed" | "canceled")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::client::testing::{FakeTransport, assert_no_param, assert_param, client};
    use crate::domain::{ContentStoreCallback, MachineDetection, RingTimeout, UrlResolver};
    use crate::voice::properties::VoiceChannelPropertiesMut;

    fn context(recipients: &[&str]) -> DispatchContext {
        DispatchContext::new(
            "appointment-reminder",
            "pipe-7",
            "voice",
            "twilio",
            recipients
                .iter()
                .map(|addr| RawPhoneNumber::new(*addr).unwrap())
                .collect(),
        )
    }

    fn message(body: &str) -> VoiceMessage {
        VoiceMessage::new(RawPhoneNumber::new("+15550002222").unwrap(), body)
    }

    fn find_param(params: &[(String, String)], key: &str) -> Option<String> {
        params.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[tokio::test]
    async fn short_body_is_sent_as_inline_escaped_twiml() {
        let transport = FakeTransport::new(201, r#"{"sid": "CA1", "status": "queued"}"#);
        let dispatcher = VoiceDispatcher::new(client(transport.clone()));

        let results = dispatcher
            .dispatch(&message("Done & <b>dusted</b>"), &context(&["+15550001111"]))
            .await;
        assert!(results[0].as_ref().unwrap().is_dispatched());

        let (_, params) = transport.last_request();
        assert_param(
            &params,
            "Twiml",
            "<Response><Say>Done &amp; &lt;b&gt;dusted&lt;/b&gt;</Say></Response>",
        );
        assert_no_param(&params, "Url");
        assert_param(&params, "From", "+15550002222");
    }

    #[tokio::test]
    async fn empty_body_uses_the_content_url_with_correlation_id() {
        let transport = FakeTransport::new(201, r#"{"sid": "CA1", "status": "queued"}"#);
        let dispatcher = VoiceDispatcher::new(client(transport.clone()));

        let mut message = message("");
        VoiceChannelPropertiesMut::new(message.extended_properties_mut())
            .set_url("https://example.invalid/twiml")
            .set_url_method("GET");

        dispatcher.dispatch(&message, &context(&["+15550001111"])).await;

        let (_, params) = transport.last_request();
        assert_no_param(&params, "Twiml");
        assert_param(&params, "Method", "GET");
        let url = find_param(&params, "Url").expect("Url param");
        let url = Url::parse(&url).unwrap();
        let message_id = url
            .query_pairs()
            .find(|(k, _)| k == "messageId")
            .map(|(_, v)| v.into_owned())
            .expect("messageId param");
        assert_eq!(message_id.len(), 32);
        assert!(url.query_pairs().any(|(k, v)| k == "pipelineId" && v == "pipe-7"));
        assert!(url.query_pairs().any(|(k, v)| k == "channelId" && v == "voice"));
    }

    #[tokio::test]
    async fn oversized_body_falls_back_to_the_content_url() {
        let transport = FakeTransport::new(201, r#"{"sid": "CA1", "status": "queued"}"#);
        let dispatcher = VoiceDispatcher::new(client(transport.clone()));

        let mut message = message(&"y".repeat(5000));
        VoiceChannelPropertiesMut::new(message.extended_properties_mut())
            .set_url("https://example.invalid/twiml");

        dispatcher.dispatch(&message, &context(&["+15550001111"])).await;

        let (_, params) = transport.last_request();
        assert_no_param(&params, "Twiml");
        assert!(find_param(&params, "Url").is_some());
    }

    #[tokio::test]
    async fn content_url_resolver_overrides_the_static_url() {
        let transport = FakeTransport::new(201, r#"{"sid": "CA1", "status": "queued"}"#);
        let dispatcher = VoiceDispatcher::new(client(transport.clone()));

        let mut message = message("");
        VoiceChannelPropertiesMut::new(message.extended_properties_mut())
            .set_url("https://example.invalid/static")
            .set_url_resolver(UrlResolver::new(|_| async {
                Some("https://example.invalid/resolved".to_owned())
            }));

        dispatcher.dispatch(&message, &context(&["+15550001111"])).await;

        let (_, params) = transport.last_request();
        let url = find_param(&params, "Url").expect("Url param");
        assert!(url.starts_with("https://example.invalid/resolved?"));
    }

    #[tokio::test]
    async fn missing_content_url_is_a_configuration_error() {
        let transport = FakeTransport::new(201, r#"{"sid": "CA1", "status": "queued"}"#);
        let dispatcher = VoiceDispatcher::new(client(transport.clone()));

        let results = dispatcher.dispatch(&message(""), &context(&["+15550001111"])).await;

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(TwilioError::Configuration(_))));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn store_content_hook_receives_the_rendered_document() {
        let transport = FakeTransport::new(201, r#"{"sid": "CA1", "status": "queued"}"#);
        let dispatcher = VoiceDispatcher::new(client(transport.clone()));

        let (tx, rx) = tokio::sync::oneshot::channel::<(String, String)>();
        let tx = std::sync::Mutex::new(Some(tx));

        let mut message = message(&"y".repeat(5000));
        VoiceChannelPropertiesMut::new(message.extended_properties_mut())
            .set_url("https://example.invalid/twiml")
            .set_on_store_content(ContentStoreCallback::new(move |content_id, content, _| {
                let sender = tx.lock().unwrap().take();
                async move {
                    if let Some(sender) = sender {
                        let _ = sender.send((content_id, content));
                    }
                }
            }));

        dispatcher.dispatch(&message, &context(&["+15550001111"])).await;

        let (content_id, content) = tokio::time::timeout(Duration::from_secs(1), rx)
            .await
            .expect("hook fired")
            .unwrap();
        assert_eq!(content_id.len(), 32);
        assert!(content.starts_with("<Response><Say>yyy"));

        let (_, params) = transport.last_request();
        let url = find_param(&params, "Url").expect("Url param");
        assert!(url.contains(&format!("messageId={content_id}")));
    }

    #[tokio::test]
    async fn machine_detection_property_overrides_the_message_default() {
        let transport = FakeTransport::new(201, r#"{"sid": "CA1", "status": "queued"}"#);
        let dispatcher = VoiceDispatcher::new(client(transport.clone()));

        let mut message = message("hello").with_machine_detection(MachineDetection::Enable);
        VoiceChannelPropertiesMut::new(message.extended_properties_mut())
            .set_machine_detection(MachineDetection::DetectMessageEnd)
            .set_timeout(RingTimeout::new(20).unwrap());

        dispatcher.dispatch(&message, &context(&["+15550001111"])).await;

        let (_, params) = transport.last_request();
        assert_param(&params, "MachineDetection", "DetectMessageEnd");
        assert_param(&params, "Timeout", "20");
    }

    #[tokio::test]
    async fn resolved_status_callback_carries_pipeline_context() {
        let transport = FakeTransport::new(201, r#"{"sid": "CA1", "status": "queued"}"#);
        let dispatcher = VoiceDispatcher::new(client(transport.clone()));

        let mut message = message("hello");
        VoiceChannelPropertiesMut::new(message.extended_properties_mut())
            .set_status_callback_url_resolver(UrlResolver::new(|_| async {
                Some("https://example.invalid/cb".to_owned())
            }))
            .set_status_callback_method("POST");

        dispatcher.dispatch(&message, &context(&["+15550001111"])).await;

        let (_, params) = transport.last_request();
        let callback = find_param(&params, "StatusCallback").expect("StatusCallback param");
        assert!(callback.starts_with("https://example.invalid/cb?"));
        assert!(callback.contains("pipelineIntent=appointment-reminder"));
        assert!(callback.contains("channelProviderId=twilio"));
        assert_param(&params, "StatusCallbackMethod", "POST");
    }

    #[tokio::test]
    async fn rejected_call_statuses_are_not_dispatched() {
        for raw in ["failed", "canceled"] {
            let body = format!(r#"{{"sid": "CA1", "status": "{raw}"}}"#);
            let transport = FakeTransport::new(201, &body);
            let dispatcher = VoiceDispatcher::new(client(transport));

            let results = dispatcher
                .dispatch(&message("hello"), &context(&["+15550001111"]))
                .await;
            let result = results[0].as_ref().unwrap();
            assert!(!result.is_dispatched(), "{raw}");
            assert_eq!(result.status(), raw);
        }
    }
}

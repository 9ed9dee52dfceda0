use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use url::Url;

use crate::domain::result::DispatchResult;
use crate::domain::value::RawPhoneNumber;

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Query parameter carrying the pipeline intent on augmented URLs.
pub const PIPELINE_INTENT_PARAM: &str = "pipelineIntent";
/// Query parameter carrying the pipeline id on augmented URLs.
pub const PIPELINE_ID_PARAM: &str = "pipelineId";
/// Query parameter carrying the channel id on augmented URLs.
pub const CHANNEL_ID_PARAM: &str = "channelId";
/// Query parameter carrying the channel-provider id on augmented URLs.
pub const CHANNEL_PROVIDER_ID_PARAM: &str = "channelProviderId";

/// Host-provided callbacks observing per-recipient dispatch progress.
///
/// All methods have no-op defaults so hosts implement only what they consume.
pub trait DispatchObserver: Send + Sync {
    /// A send attempt is about to be made for a recipient.
    fn on_dispatch(&self, _context: &DispatchContext) {}

    /// The vendor accepted the communication for delivery.
    fn on_dispatched(&self, _context: &DispatchContext, _result: &DispatchResult) {}

    /// The vendor rejected the communication synchronously.
    fn on_error(&self, _context: &DispatchContext, _result: &DispatchResult) {}
}

type UrlResolverFn = dyn Fn(DispatchContext) -> BoxFuture<'static, Option<String>> + Send + Sync;

#[derive(Clone)]
/// Asynchronous callback-URL resolver.
///
/// A configuration field can hold either a static URL or one of these; the
/// resolver wins and is invoked lazily, exactly once per recipient, at
/// dispatch time. An empty or absent result means "no callback".
pub struct UrlResolver(Arc<UrlResolverFn>);

impl UrlResolver {
    /// Wrap an async closure as a resolver.
    pub fn new<F, Fut>(resolve: F) -> Self
    where
        F: Fn(DispatchContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<String>> + Send + 'static,
    {
        Self(Arc::new(move |context| Box::pin(resolve(context))))
    }

    /// Invoke the resolver for the given dispatch context.
    pub async fn resolve(&self, context: &DispatchContext) -> Option<String> {
        (self.0)(context.clone()).await
    }

    /// Identity comparison; resolvers have no value equality.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for UrlResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UrlResolver(..)")
    }
}

type ContentStoreFn =
    dyn Fn(String, String, DispatchContext) -> BoxFuture<'static, ()> + Send + Sync;

#[derive(Clone)]
/// Fire-and-forget hook storing rendered voice content for later retrieval.
///
/// Invoked with the content correlation id, the rendered content, and the
/// dispatch context. The dispatch path never awaits it; failures must be
/// handled (or logged) inside the callback.
pub struct ContentStoreCallback(Arc<ContentStoreFn>);

impl ContentStoreCallback {
    /// Wrap an async closure as a content-store hook.
    pub fn new<F, Fut>(store: F) -> Self
    where
        F: Fn(String, String, DispatchContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self(Arc::new(move |content_id, content, context| {
            Box::pin(store(content_id, content, context))
        }))
    }

    /// Invoke the hook.
    pub async fn store(&self, content_id: String, content: String, context: DispatchContext) {
        (self.0)(content_id, content, context).await
    }

    /// Identity comparison; callbacks have no value equality.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ContentStoreCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContentStoreCallback(..)")
    }
}

#[derive(Clone)]
/// Correlation identifiers and recipients for one dispatch invocation.
///
/// The pipeline identifiers are appended to every callback/content URL this
/// crate constructs so the receiving webhook can correlate asynchronous
/// vendor events back to the originating send.
pub struct DispatchContext {
    pipeline_intent: String,
    pipeline_id: String,
    channel_id: String,
    channel_provider_id: String,
    recipients: Vec<RawPhoneNumber>,
    observer: Option<Arc<dyn DispatchObserver>>,
}

impl DispatchContext {
    /// Create a context for one dispatch invocation.
    pub fn new(
        pipeline_intent: impl Into<String>,
        pipeline_id: impl Into<String>,
        channel_id: impl Into<String>,
        channel_provider_id: impl Into<String>,
        recipients: Vec<RawPhoneNumber>,
    ) -> Self {
        Self {
            pipeline_intent: pipeline_intent.into(),
            pipeline_id: pipeline_id.into(),
            channel_id: channel_id.into(),
            channel_provider_id: channel_provider_id.into(),
            recipients,
            observer: None,
        }
    }

    /// Attach host callbacks observing dispatch progress.
    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Pipeline intent (what the host pipeline is trying to communicate).
    pub fn pipeline_intent(&self) -> &str {
        &self.pipeline_intent
    }

    /// Pipeline instance id.
    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    /// Channel id (`sms` / `voice`).
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Channel-provider id.
    pub fn channel_provider_id(&self) -> &str {
        &self.channel_provider_id
    }

    /// Recipient addresses in dispatch order.
    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub(crate) fn notify_dispatch(&self) {
        if let Some(observer) = &self.observer {
            observer.on_dispatch(self);
        }
    }

    pub(crate) fn notify_dispatched(&self, result: &DispatchResult) {
        if let Some(observer) = &self.observer {
            observer.on_dispatched(self, result);
        }
    }

    pub(crate) fn notify_error(&self, result: &DispatchResult) {
        if let Some(observer) = &self.observer {
            observer.on_error(self, result);
        }
    }

    /// Append the pipeline-context query parameters to a URL.
    pub fn append_pipeline_context(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair(PIPELINE_INTENT_PARAM, &self.pipeline_intent)
            .append_pair(PIPELINE_ID_PARAM, &self.pipeline_id)
            .append_pair(CHANNEL_ID_PARAM, &self.channel_id)
            .append_pair(CHANNEL_PROVIDER_ID_PARAM, &self.channel_provider_id);
    }
}

impl fmt::Debug for DispatchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchContext")
            .field("pipeline_intent", &self.pipeline_intent)
            .field("pipeline_id", &self.pipeline_id)
            .field("channel_id", &self.channel_id)
            .field("channel_provider_id", &self.channel_provider_id)
            .field("recipients", &self.recipients)
            .field("observer", &self.observer.as_ref().map(|_| ".."))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> DispatchContext {
        DispatchContext::new(
            "order-shipped",
            "pipe-42",
            "sms",
            "twilio",
            vec![RawPhoneNumber::new("+15550001111").unwrap()],
        )
    }

    #[test]
    fn pipeline_context_params_are_appended() {
        let mut url = Url::parse("https://example.invalid/hooks/status").unwrap();
        context().append_pipeline_context(&mut url);

        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            query,
            vec![
                ("pipelineIntent".to_owned(), "order-shipped".to_owned()),
                ("pipelineId".to_owned(), "pipe-42".to_owned()),
                ("channelId".to_owned(), "sms".to_owned()),
                ("channelProviderId".to_owned(), "twilio".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn url_resolver_receives_the_context() {
        let resolver = UrlResolver::new(|context: DispatchContext| async move {
            Some(format!("https://example.invalid/{}", context.pipeline_id()))
        });
        let resolved = resolver.resolve(&context()).await;
        assert_eq!(resolved.as_deref(), Some("https://example.invalid/pipe-42"));
    }

    #[test]
    fn resolver_identity_is_pointer_based() {
        let a = UrlResolver::new(|_| async { None });
        let b = a.clone();
        let c = UrlResolver::new(|_| async { None });
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}

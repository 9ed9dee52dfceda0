//! Host-facing contract for outbound dispatch.

use async_trait::async_trait;

use crate::client::TwilioError;
use crate::domain::{DispatchContext, DispatchResult};

/// Sends one communication to the context's recipients, one vendor call per
/// recipient, sequentially and without retries.
///
/// The returned vector has one entry per recipient, in recipient order.
/// Failures are isolated per recipient: an `Err` entry does not undo earlier
/// results and later recipients are still attempted. Concurrency across
/// messages, if desired, is the host's responsibility.
#[async_trait]
pub trait ChannelProviderDispatcher: Send + Sync {
    type Message;

    async fn dispatch(
        &self,
        message: &Self::Message,
        context: &DispatchContext,
    ) -> Vec<Result<DispatchResult, TwilioError>>;
}

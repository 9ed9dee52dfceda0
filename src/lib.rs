//! Twilio SMS and Voice channel provider for messaging-pipeline hosts.
//!
//! The crate is layered: a domain layer of strong types (addresses, statuses,
//! the extended-properties bag), a transport layer for Twilio's form/JSON
//! wire format, a small client layer orchestrating requests, and per-channel
//! dispatchers and delivery-report adaptors on top.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use twilio_channel::{
//!     ChannelProviderDispatcher, DispatchContext, RawPhoneNumber, SmsDispatcher, SmsMessage,
//!     TwilioAuth, TwilioClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), twilio_channel::TwilioError> {
//!     let auth = TwilioAuth::new("AC...", "auth-token")?;
//!     let dispatcher = SmsDispatcher::new(TwilioClient::new(auth));
//!
//!     let message = SmsMessage::new("Your order has shipped")
//!         .with_from(RawPhoneNumber::new("+15550002222")?);
//!     let context = DispatchContext::new(
//!         "order-shipped",
//!         "pipe-42",
//!         "sms",
//!         "twilio",
//!         vec![RawPhoneNumber::new("+15550001111")?],
//!     );
//!
//!     for result in dispatcher.dispatch(&message, &context).await {
//!         let result = result?;
//!         println!("{} dispatched={}", result.resource_id(), result.is_dispatched());
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod delivery;
pub mod dispatch;
pub mod domain;
pub mod sms;
mod transport;
pub mod voice;

pub use client::{TwilioAuth, TwilioClient, TwilioClientBuilder, TwilioError};
pub use delivery::{
    DeliveryReportRequestAdaptor, FormAdaptorContext, RequestAdaptorContext,
};
pub use dispatch::ChannelProviderDispatcher;
pub use domain::{
    AccountSid, AuthToken, CallStatus, CommunicationsStatus, ContentStoreCallback, DeliveryReport,
    DispatchContext, DispatchObserver, DispatchResult, ExtendedProperties, MachineDetection,
    MessagingServiceSid, PhoneNumber, PropertyValue, RawPhoneNumber, RingTimeout, SmsMessage,
    SmsStatus, StatusKind, UrlResolver, ValidationError, VoiceMessage,
};
pub use transport::{CallResource, CreateCall, CreateMessage, MessageResource};

pub use sms::{
    SmsChannelProperties, SmsChannelPropertiesMut, SmsDeliveryReportProperties,
    SmsDeliveryStatusReportAdaptor, SmsDispatcher, SmsStatusReport, normalize_sms_status,
};
pub use voice::{
    VoiceChannelProperties, VoiceChannelPropertiesMut, VoiceDeliveryReportProperties,
    VoiceDeliveryStatusReportAdaptor, VoiceDispatcher, VoiceStatusReport, normalize_call_status,
};

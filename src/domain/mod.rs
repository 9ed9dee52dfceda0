//! Domain layer: strong types with validation and invariants (no I/O).

mod context;
mod message;
mod properties;
mod report;
mod result;
mod status;
mod validation;
mod value;

pub use context::{
    CHANNEL_ID_PARAM, CHANNEL_PROVIDER_ID_PARAM, ContentStoreCallback, DispatchContext,
    DispatchObserver, PIPELINE_ID_PARAM, PIPELINE_INTENT_PARAM, UrlResolver,
};
pub(crate) use context::BoxFuture;
pub use message::{MachineDetection, SmsMessage, VoiceMessage};
pub use properties::{ExtendedProperties, PropertyValue};
pub use report::{DeliveryReport, STATUS_CHANGED_EVENT};
pub use result::DispatchResult;
pub use status::{CallStatus, CommunicationsStatus, SmsStatus, StatusKind};
pub use validation::ValidationError;
pub use value::{
    AccountSid, AuthToken, MessagingServiceSid, PhoneNumber, RawPhoneNumber, RingTimeout,
    SMS_CHANNEL_ID, SMS_PROPERTIES_NAMESPACE, TWILIO_PROVIDER_ID, VOICE_CHANNEL_ID,
    VOICE_PROPERTIES_NAMESPACE,
};

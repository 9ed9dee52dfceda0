//! Voice channel: typed property views, dispatcher, status normalization, and
//! the delivery-report adaptor.

mod adaptor;
mod dispatcher;
mod properties;
mod status;

pub use adaptor::{VoiceDeliveryStatusReportAdaptor, VoiceStatusReport};
pub use dispatcher::VoiceDispatcher;
pub use properties::{
    VoiceChannelProperties, VoiceChannelPropertiesMut, VoiceDeliveryReportProperties,
};
pub use status::normalize_call_status;

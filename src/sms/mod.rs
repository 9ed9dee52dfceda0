//! SMS channel: typed property views, dispatcher, status normalization, and
//! the delivery-report adaptor.

mod adaptor;
mod dispatcher;
mod properties;
mod status;

pub use adaptor::{SmsDeliveryStatusReportAdaptor, SmsStatusReport};
pub use dispatcher::SmsDispatcher;
pub use properties::{
    SmsChannelProperties, SmsChannelPropertiesMut, SmsDeliveryReportProperties,
};
pub use status::normalize_sms_status;

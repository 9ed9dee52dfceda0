use crate::domain::{CommunicationsStatus, SmsStatus, TWILIO_PROVIDER_ID};

/// Normalize a Twilio message lifecycle status into the four-bucket taxonomy.
///
/// Total over all inputs: unrecognized/absent vendor values map to the
/// `ClientError("Unknown")` sentinel instead of failing, so new vendor enum
/// values never break report adaptation.
pub fn normalize_sms_status(status: Option<SmsStatus>) -> CommunicationsStatus {
    use SmsStatus::*;

    match status {
        Some(value @ (Queued | Sending)) => {
            CommunicationsStatus::info(TWILIO_PROVIDER_ID, value.name(), value.code())
        }
        Some(value @ (Sent | Receiving | Accepted | Scheduled)) => {
            CommunicationsStatus::success(TWILIO_PROVIDER_ID, value.name(), value.code())
        }
        Some(value @ (Undelivered | Failed)) => {
            CommunicationsStatus::server_error(TWILIO_PROVIDER_ID, value.name(), value.code())
        }
        Some(value @ (Received | Delivered | Read | PartiallyDelivered)) => {
            CommunicationsStatus::success(TWILIO_PROVIDER_ID, value.name(), value.code())
        }
        Some(value @ Canceled) => {
            CommunicationsStatus::client_error(TWILIO_PROVIDER_ID, value.name(), value.code())
        }
        None => CommunicationsStatus::unknown(),
    }
}

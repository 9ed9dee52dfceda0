use crate::domain::{CallStatus, CommunicationsStatus, TWILIO_PROVIDER_ID};

/// Normalize a Twilio call lifecycle status into the four-bucket taxonomy.
///
/// Total over all inputs: unrecognized/absent vendor values map to the
/// `ClientError("Unknown")` sentinel instead of failing. Note that `Unknown`
/// and `Queued` count as success here; Twilio reports them for calls it has
/// accepted but not yet started ringing.
pub fn normalize_call_status(status: Option<CallStatus>) -> CommunicationsStatus {
    use CallStatus::*;

    match status {
        Some(value @ (Unknown | Queued)) => {
            CommunicationsStatus::success(TWILIO_PROVIDER_ID, value.name(), value.code())
        }
        Some(value @ (Initiated | Ringing | InProgress)) => {
            CommunicationsStatus::info(TWILIO_PROVIDER_ID, value.name(), value.code())
        }
        Some(value @ Completed) => {
            CommunicationsStatus::success(TWILIO_PROVIDER_ID, value.name(), value.code())
        }
        Some(value @ (Failed | Busy | NoAnswer)) => {
            CommunicationsStatus::server_error(TWILIO_PROVIDER_ID, value.name(), value.code())
        }
        None => CommunicationsStatus::unknown(),
    }
}

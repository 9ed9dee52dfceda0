use std::fmt;

use crate::domain::value::TWILIO_PROVIDER_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
/// Twilio message lifecycle status as reported synchronously and via webhooks.
///
/// The discriminant doubles as the numeric trace code carried on normalized
/// statuses.
pub enum SmsStatus {
    Queued = 0,
    Sending = 1,
    Sent = 2,
    Receiving = 3,
    Accepted = 4,
    Scheduled = 5,
    Undelivered = 6,
    Failed = 7,
    Received = 8,
    Delivered = 9,
    Read = 10,
    PartiallyDelivered = 11,
    Canceled = 12,
}

impl SmsStatus {
    /// Parse the wire representation (`queued`, `partially_delivered`, ...).
    ///
    /// Matching is case-insensitive. Unrecognized values yield `None`; callers
    /// keep the raw text and the normalizer treats `None` as unknown.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "queued" => Some(Self::Queued),
            "sending" => Some(Self::Sending),
            "sent" => Some(Self::Sent),
            "receiving" => Some(Self::Receiving),
            "accepted" => Some(Self::Accepted),
            "scheduled" => Some(Self::Scheduled),
            "undelivered" => Some(Self::Undelivered),
            "failed" => Some(Self::Failed),
            "received" => Some(Self::Received),
            "delivered" => Some(Self::Delivered),
            "read" => Some(Self::Read),
            "partially_delivered" => Some(Self::PartiallyDelivered),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }

    /// Enum name used as the normalized status label.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Queued => "Queued",
            Self::Sending => "Sending",
            Self::Sent => "Sent",
            Self::Receiving => "Receiving",
            Self::Accepted => "Accepted",
            Self::Scheduled => "Scheduled",
            Self::Undelivered => "Undelivered",
            Self::Failed => "Failed",
            Self::Received => "Received",
            Self::Delivered => "Delivered",
            Self::Read => "Read",
            Self::PartiallyDelivered => "PartiallyDelivered",
            Self::Canceled => "Canceled",
        }
    }

    /// Numeric trace code (the discriminant).
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
/// Twilio call lifecycle status.
///
/// `Unknown` is an explicit vendor value here, distinct from unrecognized wire
/// text (which parses to `None`).
pub enum CallStatus {
    Unknown = 0,
    Queued = 1,
    Initiated = 2,
    Ringing = 3,
    InProgress = 4,
    Completed = 5,
    Failed = 6,
    Busy = 7,
    NoAnswer = 8,
}

impl CallStatus {
    /// Parse the wire representation (`queued`, `in-progress`, `no-answer`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unknown" => Some(Self::Unknown),
            "queued" => Some(Self::Queued),
            "initiated" => Some(Self::Initiated),
            "ringing" => Some(Self::Ringing),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            "busy" => Some(Self::Busy),
            "no-answer" => Some(Self::NoAnswer),
            _ => None,
        }
    }

    /// Enum name used as the normalized status label.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Queued => "Queued",
            Self::Initiated => "Initiated",
            Self::Ringing => "Ringing",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Busy => "Busy",
            Self::NoAnswer => "NoAnswer",
        }
    }

    /// Numeric trace code (the discriminant).
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Normalized outcome bucket a host can branch on generically.
pub enum StatusKind {
    Info,
    Success,
    ClientError,
    ServerError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Normalized communications status.
///
/// Collapses the vendor lifecycle vocabulary into four buckets while the label
/// and numeric code preserve diagnostic fidelity for tracing back to the raw
/// vendor value.
pub struct CommunicationsStatus {
    kind: StatusKind,
    channel_provider_id: String,
    label: String,
    code: i32,
}

impl CommunicationsStatus {
    /// Sentinel code used when the vendor value is unrecognized or absent.
    pub const CLIENT_ERROR_MAX: i32 = i32::MAX;

    /// An informational (in-flight) status.
    pub fn info(provider: impl Into<String>, label: impl Into<String>, code: i32) -> Self {
        Self::new(StatusKind::Info, provider, label, code)
    }

    /// A successful outcome.
    pub fn success(provider: impl Into<String>, label: impl Into<String>, code: i32) -> Self {
        Self::new(StatusKind::Success, provider, label, code)
    }

    /// A failure attributed to the caller/configuration side.
    pub fn client_error(provider: impl Into<String>, label: impl Into<String>, code: i32) -> Self {
        Self::new(StatusKind::ClientError, provider, label, code)
    }

    /// A failure attributed to the vendor/delivery side.
    pub fn server_error(provider: impl Into<String>, label: impl Into<String>, code: i32) -> Self {
        Self::new(StatusKind::ServerError, provider, label, code)
    }

    /// The `ClientError("Unknown")` sentinel for unmapped vendor values.
    pub fn unknown() -> Self {
        Self::client_error(TWILIO_PROVIDER_ID, "Unknown", Self::CLIENT_ERROR_MAX)
    }

    fn new(
        kind: StatusKind,
        provider: impl Into<String>,
        label: impl Into<String>,
        code: i32,
    ) -> Self {
        Self {
            kind,
            channel_provider_id: provider.into(),
            label: label.into(),
            code,
        }
    }

    /// Normalized bucket.
    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    /// Channel provider that produced the raw value.
    pub fn channel_provider_id(&self) -> &str {
        &self.channel_provider_id
    }

    /// Human-readable label (vendor enum name when known).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Numeric code tracing back to the vendor value.
    pub fn code(&self) -> i32 {
        self.code
    }
}

impl fmt::Display for CommunicationsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({}/{}: {})",
            self.kind, self.channel_provider_id, self.code, self.label
        )
    }
}

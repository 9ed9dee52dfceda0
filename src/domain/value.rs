use crate::domain::validation::ValidationError;

use phonenumber::country;

/// Channel-provider identifier used in pipeline context and adaptor matching.
pub const TWILIO_PROVIDER_ID: &str = "twilio";

/// Channel identifier for the SMS channel.
pub const SMS_CHANNEL_ID: &str = "sms";

/// Channel identifier for the Voice channel.
pub const VOICE_CHANNEL_ID: &str = "voice";

/// Extended-properties namespace owning Twilio SMS fields.
pub const SMS_PROPERTIES_NAMESPACE: &str = "twilio.sms";

/// Extended-properties namespace owning Twilio Voice fields.
pub const VOICE_PROPERTIES_NAMESPACE: &str = "twilio.voice";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio account sid.
///
/// Invariant: non-empty after trimming and starts with `AC`.
pub struct AccountSid(String);

impl AccountSid {
    /// Webhook field name carrying the account sid (`AccountSid`).
    pub const FIELD: &'static str = "AccountSid";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !trimmed.starts_with("AC") {
            return Err(ValidationError::InvalidPrefix {
                field: Self::FIELD,
                expected: "AC",
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sid.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio auth token paired with an [`AccountSid`] for basic auth.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct AuthToken(String);

impl AuthToken {
    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: "AuthToken" });
        }
        Ok(Self(value))
    }

    /// Borrow the token as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio messaging-service sid (`MessagingServiceSid`).
///
/// When configured on an SMS channel, Twilio picks the origination number and
/// the explicit `From` is omitted from create-message requests.
///
/// Invariant: non-empty after trimming and starts with `MG`.
pub struct MessagingServiceSid(String);

impl MessagingServiceSid {
    /// Form field name used by the Twilio API (`MessagingServiceSid`).
    pub const FIELD: &'static str = "MessagingServiceSid";

    /// Create a validated [`MessagingServiceSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !trimmed.starts_with("MG") {
            return Err(ValidationError::InvalidPrefix {
                field: Self::FIELD,
                expected: "MG",
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sid.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Lightly-validated recipient or origination address (`To` / `From`).
///
/// Only checks that the value is non-empty. If you need validation and
/// normalization, parse into [`PhoneNumber`] and convert it into
/// [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Form field name used by the Twilio API for recipients (`To`).
    pub const FIELD: &'static str = "To";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to Twilio.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit
    /// country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Number of seconds Twilio lets a call ring before giving up.
///
/// Invariant: Twilio accepts 5..=600 seconds.
pub struct RingTimeout(u16);

impl RingTimeout {
    /// Form field name used by the Twilio API (`Timeout`).
    pub const FIELD: &'static str = "Timeout";

    const MIN: u16 = 5;
    const MAX: u16 = 600;

    /// Create a validated [`RingTimeout`].
    pub fn new(seconds: u16) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&seconds) {
            return Err(ValidationError::TimeoutOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: seconds,
            });
        }
        Ok(Self(seconds))
    }

    /// The configured number of seconds.
    pub fn seconds(&self) -> u16 {
        self.0
    }
}

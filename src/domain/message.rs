use crate::domain::context::UrlResolver;
use crate::domain::properties::ExtendedProperties;
use crate::domain::value::RawPhoneNumber;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
/// Answering-machine detection mode for outbound calls.
pub enum MachineDetection {
    /// No detection; the call connects as soon as it is answered.
    #[default]
    Disabled,
    /// Detect whether a human or machine answered.
    Enable,
    /// Wait for the end of an answering-machine greeting.
    DetectMessageEnd,
}

impl MachineDetection {
    /// Wire value for the `MachineDetection` form field; `None` omits it.
    pub fn as_form_value(&self) -> Option<&'static str> {
        match self {
            Self::Disabled => None,
            Self::Enable => Some("Enable"),
            Self::DetectMessageEnd => Some("DetectMessageEnd"),
        }
    }
}

#[derive(Debug, Clone)]
/// Outbound SMS communication handed to the SMS dispatcher.
///
/// Vendor-specific options ride along in the extended-properties bag scoped to
/// [`SMS_PROPERTIES_NAMESPACE`](crate::domain::SMS_PROPERTIES_NAMESPACE).
pub struct SmsMessage {
    from: Option<RawPhoneNumber>,
    body: String,
    delivery_report_callback_url_resolver: Option<UrlResolver>,
    extended_properties: ExtendedProperties,
}

impl SmsMessage {
    /// Create an SMS message with the given body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            from: None,
            body: body.into(),
            delivery_report_callback_url_resolver: None,
            extended_properties: ExtendedProperties::new(),
        }
    }

    /// Set the explicit origination address.
    ///
    /// Ignored when a messaging-service routing id is configured on the
    /// channel; Twilio then picks the origination number itself.
    pub fn with_from(mut self, from: RawPhoneNumber) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the generic per-message delivery-report URL resolver.
    ///
    /// Consulted after the channel's property-level resolver and before any
    /// static URL property.
    pub fn with_delivery_report_callback_url_resolver(mut self, resolver: UrlResolver) -> Self {
        self.delivery_report_callback_url_resolver = Some(resolver);
        self
    }

    /// Explicit origination address, if set.
    pub fn from(&self) -> Option<&RawPhoneNumber> {
        self.from.as_ref()
    }

    /// Message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Per-message delivery-report URL resolver, if set.
    pub fn delivery_report_callback_url_resolver(&self) -> Option<&UrlResolver> {
        self.delivery_report_callback_url_resolver.as_ref()
    }

    /// Provider-specific options attached to this message.
    pub fn extended_properties(&self) -> &ExtendedProperties {
        &self.extended_properties
    }

    /// Mutable access for configuration-time property views.
    pub fn extended_properties_mut(&mut self) -> &mut ExtendedProperties {
        &mut self.extended_properties
    }
}

#[derive(Debug, Clone)]
/// Outbound voice communication handed to the Voice dispatcher.
///
/// The body is rendered into spoken-text content at dispatch time; an empty
/// body requires a configured content URL instead.
pub struct VoiceMessage {
    from: RawPhoneNumber,
    body: String,
    machine_detection: MachineDetection,
    delivery_report_callback_url_resolver: Option<UrlResolver>,
    extended_properties: ExtendedProperties,
}

impl VoiceMessage {
    /// Create a voice message from an origination address and body.
    pub fn new(from: RawPhoneNumber, body: impl Into<String>) -> Self {
        Self {
            from,
            body: body.into(),
            machine_detection: MachineDetection::default(),
            delivery_report_callback_url_resolver: None,
            extended_properties: ExtendedProperties::new(),
        }
    }

    /// Set the channel-level machine-detection default.
    ///
    /// An extended-property value, when present, overrides this.
    pub fn with_machine_detection(mut self, machine_detection: MachineDetection) -> Self {
        self.machine_detection = machine_detection;
        self
    }

    /// Set the generic per-message delivery-report URL resolver.
    pub fn with_delivery_report_callback_url_resolver(mut self, resolver: UrlResolver) -> Self {
        self.delivery_report_callback_url_resolver = Some(resolver);
        self
    }

    /// Origination address.
    pub fn from(&self) -> &RawPhoneNumber {
        &self.from
    }

    /// Spoken-text body; may be empty when a content URL is configured.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Channel-level machine-detection default.
    pub fn machine_detection(&self) -> MachineDetection {
        self.machine_detection
    }

    /// Per-message delivery-report URL resolver, if set.
    pub fn delivery_report_callback_url_resolver(&self) -> Option<&UrlResolver> {
        self.delivery_report_callback_url_resolver.as_ref()
    }

    /// Provider-specific options attached to this message.
    pub fn extended_properties(&self) -> &ExtendedProperties {
        &self.extended_properties
    }

    /// Mutable access for configuration-time property views.
    pub fn extended_properties_mut(&mut self) -> &mut ExtendedProperties {
        &mut self.extended_properties
    }
}

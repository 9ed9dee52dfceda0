use crate::domain::{
    CallStatus, ContentStoreCallback, ExtendedProperties, MachineDetection, PropertyValue,
    RingTimeout, UrlResolver, VOICE_PROPERTIES_NAMESPACE,
};

pub(crate) mod keys {
    pub const STATUS_CALLBACK_URL: &str = "StatusCallbackUrl";
    pub const STATUS_CALLBACK_URL_RESOLVER: &str = "StatusCallbackUrlResolver";
    pub const STATUS_CALLBACK_METHOD: &str = "StatusCallbackMethod";
    pub const MACHINE_DETECTION: &str = "MachineDetection";
    pub const TIMEOUT: &str = "Timeout";
    pub const URL: &str = "Url";
    pub const URL_RESOLVER: &str = "UrlResolver";
    pub const URL_METHOD: &str = "UrlMethod";
    pub const ON_STORE_CONTENT: &str = "OnStoreContent";

    pub const TO: &str = "To";
    pub const FROM: &str = "From";
    pub const API_VERSION: &str = "ApiVersion";
    pub const ACCOUNT_SID: &str = "AccountSid";
    pub const IDEMPOTENCY_ID: &str = "IdempotencyId";
    pub const SIGNATURE: &str = "Signature";
    pub const CALL_SID: &str = "CallSid";
    pub const CALL_STATUS: &str = "CallStatus";
    pub const DURATION: &str = "Duration";
    pub const CALL_DURATION: &str = "CallDuration";
    pub const TIMESTAMP: &str = "Timestamp";
    pub const ANSWERED_BY: &str = "AnsweredBy";
    pub const CALLBACK_SOURCE: &str = "CallbackSource";
    pub const DIRECTION: &str = "Direction";
    pub const SEQUENCE_NUMBER: &str = "SequenceNumber";
    pub const SIP_RESPONSE_CODE: &str = "SipResponseCode";
    pub const CALLED: &str = "Called";
    pub const CALLER: &str = "Caller";
    pub const FROM_CITY: &str = "FromCity";
    pub const FROM_STATE: &str = "FromState";
    pub const FROM_ZIP: &str = "FromZip";
    pub const FROM_COUNTRY: &str = "FromCountry";
    pub const TO_CITY: &str = "ToCity";
    pub const TO_STATE: &str = "ToState";
    pub const TO_ZIP: &str = "ToZip";
    pub const TO_COUNTRY: &str = "ToCountry";
    pub const CALLED_CITY: &str = "CalledCity";
    pub const CALLED_STATE: &str = "CalledState";
    pub const CALLED_ZIP: &str = "CalledZip";
    pub const CALLED_COUNTRY: &str = "CalledCountry";
    pub const CALLER_CITY: &str = "CallerCity";
    pub const CALLER_STATE: &str = "CallerState";
    pub const CALLER_ZIP: &str = "CallerZip";
    pub const CALLER_COUNTRY: &str = "CallerCountry";
}

#[derive(Debug, Clone, Copy)]
/// Read view over the Twilio-specific Voice fields of an outbound channel
/// configuration.
///
/// Every accessor is independently optional; absence means "use the host or
/// channel default", never an error.
pub struct VoiceChannelProperties<'a> {
    properties: &'a ExtendedProperties,
}

impl<'a> VoiceChannelProperties<'a> {
    /// View the Voice namespace of a property bag.
    pub fn new(properties: &'a ExtendedProperties) -> Self {
        Self { properties }
    }

    fn text(&self, key: &str) -> Option<&'a str> {
        self.properties
            .get(VOICE_PROPERTIES_NAMESPACE, key)
            .and_then(PropertyValue::as_text)
    }

    /// Static URL Twilio should call with call status updates.
    pub fn status_callback_url(&self) -> Option<&'a str> {
        self.text(keys::STATUS_CALLBACK_URL)
    }

    /// Resolver producing the status-callback URL at dispatch time.
    pub fn status_callback_url_resolver(&self) -> Option<&'a UrlResolver> {
        self.properties
            .get(VOICE_PROPERTIES_NAMESPACE, keys::STATUS_CALLBACK_URL_RESOLVER)
            .and_then(PropertyValue::as_url_resolver)
    }

    /// HTTP method Twilio uses for the status callback.
    pub fn status_callback_method(&self) -> Option<&'a str> {
        self.text(keys::STATUS_CALLBACK_METHOD)
    }

    /// Answering-machine detection override; channel default applies when
    /// absent.
    pub fn machine_detection(&self) -> Option<MachineDetection> {
        self.properties
            .get(VOICE_PROPERTIES_NAMESPACE, keys::MACHINE_DETECTION)
            .and_then(PropertyValue::as_machine_detection)
    }

    /// Seconds to wait for an answer.
    pub fn timeout(&self) -> Option<RingTimeout> {
        self.properties
            .get(VOICE_PROPERTIES_NAMESPACE, keys::TIMEOUT)
            .and_then(PropertyValue::as_ring_timeout)
    }

    /// Static URL returning voice content for the call.
    ///
    /// Used only when the message body cannot be inlined; the content
    /// correlation id is appended to the query string.
    pub fn url(&self) -> Option<&'a str> {
        self.text(keys::URL)
    }

    /// Resolver producing the content URL at dispatch time; overrides the
    /// static URL.
    pub fn url_resolver(&self) -> Option<&'a UrlResolver> {
        self.properties
            .get(VOICE_PROPERTIES_NAMESPACE, keys::URL_RESOLVER)
            .and_then(PropertyValue::as_url_resolver)
    }

    /// HTTP method Twilio uses to fetch the content URL.
    pub fn url_method(&self) -> Option<&'a str> {
        self.text(keys::URL_METHOD)
    }

    /// Hook invoked (fire-and-forget) when the URL path is used, so content
    /// can be stored for later retrieval.
    pub fn on_store_content(&self) -> Option<&'a ContentStoreCallback> {
        self.properties
            .get(VOICE_PROPERTIES_NAMESPACE, keys::ON_STORE_CONTENT)
            .and_then(PropertyValue::as_content_store)
    }
}

#[derive(Debug)]
/// Write view used at configuration time to populate the Twilio Voice fields.
pub struct VoiceChannelPropertiesMut<'a> {
    properties: &'a mut ExtendedProperties,
}

impl<'a> VoiceChannelPropertiesMut<'a> {
    /// View the Voice namespace of a property bag, mutably.
    pub fn new(properties: &'a mut ExtendedProperties) -> Self {
        Self { properties }
    }

    fn set(&mut self, key: &str, value: impl Into<PropertyValue>) -> &mut Self {
        self.properties.set(VOICE_PROPERTIES_NAMESPACE, key, value);
        self
    }

    /// Set the static status-callback URL.
    pub fn set_status_callback_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.set(keys::STATUS_CALLBACK_URL, url.into())
    }

    /// Set the status-callback URL resolver.
    pub fn set_status_callback_url_resolver(&mut self, resolver: UrlResolver) -> &mut Self {
        self.set(keys::STATUS_CALLBACK_URL_RESOLVER, resolver)
    }

    /// Set the status-callback HTTP method.
    pub fn set_status_callback_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.set(keys::STATUS_CALLBACK_METHOD, method.into())
    }

    /// Set the answering-machine detection override.
    pub fn set_machine_detection(&mut self, machine_detection: MachineDetection) -> &mut Self {
        self.set(keys::MACHINE_DETECTION, machine_detection)
    }

    /// Set the ring timeout.
    pub fn set_timeout(&mut self, timeout: RingTimeout) -> &mut Self {
        self.set(keys::TIMEOUT, timeout)
    }

    /// Set the static content URL.
    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.set(keys::URL, url.into())
    }

    /// Set the content URL resolver.
    pub fn set_url_resolver(&mut self, resolver: UrlResolver) -> &mut Self {
        self.set(keys::URL_RESOLVER, resolver)
    }

    /// Set the content-URL HTTP method.
    pub fn set_url_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.set(keys::URL_METHOD, method.into())
    }

    /// Set the content-store hook.
    pub fn set_on_store_content(&mut self, callback: ContentStoreCallback) -> &mut Self {
        self.set(keys::ON_STORE_CONTENT, callback)
    }
}

macro_rules! report_text_accessors {
    ($($(#[$meta:meta])* $accessor:ident => $key:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $accessor(&self) -> Option<&'a str> {
                self.properties
                    .get(VOICE_PROPERTIES_NAMESPACE, keys::$key)
                    .and_then(PropertyValue::as_text)
            }
        )*
    };
}

#[derive(Debug, Clone, Copy)]
/// Read view over the Twilio-specific fields of a Voice delivery report.
pub struct VoiceDeliveryReportProperties<'a> {
    properties: &'a ExtendedProperties,
}

impl<'a> VoiceDeliveryReportProperties<'a> {
    /// View the Voice namespace of a delivery report's property bag.
    pub fn new(properties: &'a ExtendedProperties) -> Self {
        Self { properties }
    }

    /// Parsed call lifecycle status, when the webhook carried a known value.
    pub fn call_status(&self) -> Option<CallStatus> {
        self.properties
            .get(VOICE_PROPERTIES_NAMESPACE, keys::CALL_STATUS)
            .and_then(PropertyValue::as_call_status)
    }

    report_text_accessors! {
        to => TO,
        from => FROM,
        api_version => API_VERSION,
        account_sid => ACCOUNT_SID,
        idempotency_id => IDEMPOTENCY_ID,
        signature => SIGNATURE,
        call_sid => CALL_SID,
        duration => DURATION,
        call_duration => CALL_DURATION,
        timestamp => TIMESTAMP,
        answered_by => ANSWERED_BY,
        callback_source => CALLBACK_SOURCE,
        direction => DIRECTION,
        sequence_number => SEQUENCE_NUMBER,
        sip_response_code => SIP_RESPONSE_CODE,
        called => CALLED,
        caller => CALLER,
        from_city => FROM_CITY,
        from_state => FROM_STATE,
        from_zip => FROM_ZIP,
        from_country => FROM_COUNTRY,
        to_city => TO_CITY,
        to_state => TO_STATE,
        to_zip => TO_ZIP,
        to_country => TO_COUNTRY,
        called_city => CALLED_CITY,
        called_state => CALLED_STATE,
        called_zip => CALLED_ZIP,
        called_country => CALLED_COUNTRY,
        caller_city => CALLER_CITY,
        caller_state => CALLER_STATE,
        caller_zip => CALLER_ZIP,
        caller_country => CALLER_COUNTRY,
    }
}

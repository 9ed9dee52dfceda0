use crate::domain::{
    ExtendedProperties, MessagingServiceSid, PropertyValue, SMS_PROPERTIES_NAMESPACE, SmsStatus,
    UrlResolver,
};

pub(crate) mod keys {
    pub const STATUS_CALLBACK_URL: &str = "StatusCallbackUrl";
    pub const STATUS_CALLBACK_URL_RESOLVER: &str = "StatusCallbackUrlResolver";
    pub const STATUS_CALLBACK_METHOD: &str = "StatusCallbackMethod";
    pub const MESSAGING_SERVICE_SID: &str = "MessagingServiceSid";

    pub const TO: &str = "To";
    pub const FROM: &str = "From";
    pub const API_VERSION: &str = "ApiVersion";
    pub const ACCOUNT_SID: &str = "AccountSid";
    pub const IDEMPOTENCY_ID: &str = "IdempotencyId";
    pub const SIGNATURE: &str = "Signature";
    pub const HOME_REGION: &str = "HomeRegion";
    pub const MESSAGE_STATUS: &str = "MessageStatus";
    pub const SMS_STATUS: &str = "SmsStatus";
    pub const SMS_SID: &str = "SmsSid";
    pub const MESSAGE_SID: &str = "MessageSid";
    pub const ERROR_CODE: &str = "ErrorCode";
}

#[derive(Debug, Clone, Copy)]
/// Read view over the Twilio-specific SMS fields of an outbound channel
/// configuration.
///
/// Every accessor is independently optional; absence means "use the host or
/// channel default", never an error.
pub struct SmsChannelProperties<'a> {
    properties: &'a ExtendedProperties,
}

impl<'a> SmsChannelProperties<'a> {
    /// View the SMS namespace of a property bag.
    pub fn new(properties: &'a ExtendedProperties) -> Self {
        Self { properties }
    }

    fn text(&self, key: &str) -> Option<&'a str> {
        self.properties
            .get(SMS_PROPERTIES_NAMESPACE, key)
            .and_then(PropertyValue::as_text)
    }

    /// Static URL Twilio should call with message status updates.
    pub fn status_callback_url(&self) -> Option<&'a str> {
        self.text(keys::STATUS_CALLBACK_URL)
    }

    /// Resolver producing the status-callback URL at dispatch time.
    ///
    /// Takes priority over the static URL and over the message-level resolver.
    pub fn status_callback_url_resolver(&self) -> Option<&'a UrlResolver> {
        self.properties
            .get(SMS_PROPERTIES_NAMESPACE, keys::STATUS_CALLBACK_URL_RESOLVER)
            .and_then(PropertyValue::as_url_resolver)
    }

    /// HTTP method Twilio uses for the status callback.
    pub fn status_callback_method(&self) -> Option<&'a str> {
        self.text(keys::STATUS_CALLBACK_METHOD)
    }

    /// Messaging-service routing id; when set, the explicit `From` is omitted.
    pub fn messaging_service_sid(&self) -> Option<MessagingServiceSid> {
        // Stored pre-validated by the write view.
        self.text(keys::MESSAGING_SERVICE_SID)
            .and_then(|sid| MessagingServiceSid::new(sid).ok())
    }
}

#[derive(Debug)]
/// Write view used at configuration time to populate the Twilio SMS fields.
pub struct SmsChannelPropertiesMut<'a> {
    properties: &'a mut ExtendedProperties,
}

impl<'a> SmsChannelPropertiesMut<'a> {
    /// View the SMS namespace of a property bag, mutably.
    pub fn new(properties: &'a mut ExtendedProperties) -> Self {
        Self { properties }
    }

    /// Set the static status-callback URL.
    pub fn set_status_callback_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.properties
            .set(SMS_PROPERTIES_NAMESPACE, keys::STATUS_CALLBACK_URL, url.into());
        self
    }

    /// Set the status-callback URL resolver.
    pub fn set_status_callback_url_resolver(&mut self, resolver: UrlResolver) -> &mut Self {
        self.properties.set(
            SMS_PROPERTIES_NAMESPACE,
            keys::STATUS_CALLBACK_URL_RESOLVER,
            resolver,
        );
        self
    }

    /// Set the status-callback HTTP method.
    pub fn set_status_callback_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.properties.set(
            SMS_PROPERTIES_NAMESPACE,
            keys::STATUS_CALLBACK_METHOD,
            method.into(),
        );
        self
    }

    /// Set the messaging-service routing id.
    pub fn set_messaging_service_sid(&mut self, sid: MessagingServiceSid) -> &mut Self {
        self.properties.set(
            SMS_PROPERTIES_NAMESPACE,
            keys::MESSAGING_SERVICE_SID,
            sid.as_str().to_owned(),
        );
        self
    }
}

#[derive(Debug, Clone, Copy)]
/// Read view over the Twilio-specific fields of an SMS delivery report.
pub struct SmsDeliveryReportProperties<'a> {
    properties: &'a ExtendedProperties,
}

impl<'a> SmsDeliveryReportProperties<'a> {
    /// View the SMS namespace of a delivery report's property bag.
    pub fn new(properties: &'a ExtendedProperties) -> Self {
        Self { properties }
    }

    fn text(&self, key: &str) -> Option<&'a str> {
        self.properties
            .get(SMS_PROPERTIES_NAMESPACE, key)
            .and_then(PropertyValue::as_text)
    }

    pub fn to(&self) -> Option<&'a str> {
        self.text(keys::TO)
    }

    pub fn from(&self) -> Option<&'a str> {
        self.text(keys::FROM)
    }

    pub fn api_version(&self) -> Option<&'a str> {
        self.text(keys::API_VERSION)
    }

    pub fn account_sid(&self) -> Option<&'a str> {
        self.text(keys::ACCOUNT_SID)
    }

    pub fn idempotency_id(&self) -> Option<&'a str> {
        self.text(keys::IDEMPOTENCY_ID)
    }

    pub fn signature(&self) -> Option<&'a str> {
        self.text(keys::SIGNATURE)
    }

    pub fn home_region(&self) -> Option<&'a str> {
        self.text(keys::HOME_REGION)
    }

    pub fn message_status(&self) -> Option<SmsStatus> {
        self.properties
            .get(SMS_PROPERTIES_NAMESPACE, keys::MESSAGE_STATUS)
            .and_then(PropertyValue::as_sms_status)
    }

    pub fn sms_status(&self) -> Option<SmsStatus> {
        self.properties
            .get(SMS_PROPERTIES_NAMESPACE, keys::SMS_STATUS)
            .and_then(PropertyValue::as_sms_status)
    }

    pub fn sms_sid(&self) -> Option<&'a str> {
        self.text(keys::SMS_SID)
    }

    pub fn message_sid(&self) -> Option<&'a str> {
        self.text(keys::MESSAGE_SID)
    }

    pub fn error_code(&self) -> Option<&'a str> {
        self.text(keys::ERROR_CODE)
    }
}

pub(crate) use keys as sms_keys;

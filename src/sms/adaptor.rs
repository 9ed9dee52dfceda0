use async_trait::async_trait;

use crate::delivery::{DeliveryReportRequestAdaptor, RequestAdaptorContext, should_adapt};
use crate::domain::{
    DeliveryReport, ExtendedProperties, SMS_CHANNEL_ID, SMS_PROPERTIES_NAMESPACE,
    STATUS_CHANGED_EVENT, SmsStatus, TWILIO_PROVIDER_ID,
};
use crate::sms::properties::sms_keys;
use crate::sms::status::normalize_sms_status;

#[derive(Debug, Clone, Default)]
/// Twilio SMS status webhook, parsed into its vendor field set.
pub struct SmsStatusReport {
    pub to: Option<String>,
    pub from: Option<String>,
    pub api_version: Option<String>,
    pub account_sid: Option<String>,
    pub idempotency_id: Option<String>,
    pub signature: Option<String>,
    pub home_region: Option<String>,
    pub message_status: Option<SmsStatus>,
    pub sms_status: Option<SmsStatus>,
    pub sms_sid: Option<String>,
    pub message_sid: Option<String>,
    pub error_code: Option<String>,
}

impl SmsStatusReport {
    /// Parse the vendor field set from an adaptor context.
    pub fn from_context(context: &dyn RequestAdaptorContext) -> Self {
        let text = |key: &str| context.get_value(key).map(str::to_owned);
        let status = |key: &str| context.get_value(key).and_then(SmsStatus::parse);

        Self {
            to: text(sms_keys::TO),
            from: text(sms_keys::FROM),
            api_version: text(sms_keys::API_VERSION),
            account_sid: text(sms_keys::ACCOUNT_SID),
            idempotency_id: text(sms_keys::IDEMPOTENCY_ID),
            signature: text(sms_keys::SIGNATURE),
            home_region: text(sms_keys::HOME_REGION),
            message_status: status(sms_keys::MESSAGE_STATUS),
            sms_status: status(sms_keys::SMS_STATUS),
            sms_sid: text(sms_keys::SMS_SID),
            message_sid: text(sms_keys::MESSAGE_SID),
            error_code: text(sms_keys::ERROR_CODE),
        }
    }

    /// Copy every parsed field into a delivery report's property bag.
    fn apply_to(&self, properties: &mut ExtendedProperties) {
        let mut set_text = |key: &str, value: &Option<String>| {
            if let Some(value) = value {
                properties.set(SMS_PROPERTIES_NAMESPACE, key, value.clone());
            }
        };
        set_text(sms_keys::TO, &self.to);
        set_text(sms_keys::FROM, &self.from);
        set_text(sms_keys::API_VERSION, &self.api_version);
        set_text(sms_keys::ACCOUNT_SID, &self.account_sid);
        set_text(sms_keys::IDEMPOTENCY_ID, &self.idempotency_id);
        set_text(sms_keys::SIGNATURE, &self.signature);
        set_text(sms_keys::HOME_REGION, &self.home_region);
        set_text(sms_keys::SMS_SID, &self.sms_sid);
        set_text(sms_keys::MESSAGE_SID, &self.message_sid);
        set_text(sms_keys::ERROR_CODE, &self.error_code);

        if let Some(status) = self.message_status {
            properties.set(SMS_PROPERTIES_NAMESPACE, sms_keys::MESSAGE_STATUS, status);
        }
        if let Some(status) = self.sms_status {
            properties.set(SMS_PROPERTIES_NAMESPACE, sms_keys::SMS_STATUS, status);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Adapts Twilio SMS status webhooks into normalized delivery reports.
pub struct SmsDeliveryStatusReportAdaptor;

impl SmsDeliveryStatusReportAdaptor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeliveryReportRequestAdaptor for SmsDeliveryStatusReportAdaptor {
    async fn adapt(&self, context: &dyn RequestAdaptorContext) -> Option<Vec<DeliveryReport>> {
        if !should_adapt(context, SMS_CHANNEL_ID) {
            return None;
        }

        let report = SmsStatusReport::from_context(context);
        let mut properties = ExtendedProperties::new();
        report.apply_to(&mut properties);

        // Twilio delivers one event per webhook call.
        Some(vec![DeliveryReport::new(
            STATUS_CHANGED_EVENT,
            SMS_CHANNEL_ID,
            TWILIO_PROVIDER_ID,
            context.pipeline_intent().map(str::to_owned),
            context.pipeline_id().map(str::to_owned),
            report.sms_sid.clone(),
            normalize_sms_status(report.sms_status),
            properties,
        )])
    }
}

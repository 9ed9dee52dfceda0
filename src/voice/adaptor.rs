use async_trait::async_trait;

use crate::delivery::{DeliveryReportRequestAdaptor, RequestAdaptorContext, should_adapt};
use crate::domain::{
    CallStatus, DeliveryReport, ExtendedProperties, STATUS_CHANGED_EVENT, TWILIO_PROVIDER_ID,
    VOICE_CHANNEL_ID, VOICE_PROPERTIES_NAMESPACE,
};
use crate::voice::properties::keys as voice_keys;
use crate::voice::status::normalize_call_status;

#[derive(Debug, Clone, Default)]
/// Twilio call status webhook, parsed into its vendor field set.
pub struct VoiceStatusReport {
    pub to: Option<String>,
    pub from: Option<String>,
    pub api_version: Option<String>,
    pub account_sid: Option<String>,
    pub idempotency_id: Option<String>,
    pub signature: Option<String>,
    pub call_sid: Option<String>,
    pub call_status: Option<CallStatus>,
    pub duration: Option<String>,
    pub call_duration: Option<String>,
    pub timestamp: Option<String>,
    pub answered_by: Option<String>,
    pub callback_source: Option<String>,
    pub direction: Option<String>,
    pub sequence_number: Option<String>,
    pub sip_response_code: Option<String>,
    pub called: Option<String>,
    pub caller: Option<String>,
    pub from_city: Option<String>,
    pub from_state: Option<String>,
    pub from_zip: Option<String>,
    pub from_country: Option<String>,
    pub to_city: Option<String>,
    pub to_state: Option<String>,
    pub to_zip: Option<String>,
    pub to_country: Option<String>,
    pub called_city: Option<String>,
    pub called_state: Option<String>,
    pub called_zip: Option<String>,
    pub called_country: Option<String>,
    pub caller_city: Option<String>,
    pub caller_state: Option<String>,
    pub caller_zip: Option<String>,
    pub caller_country: Option<String>,
}

macro_rules! for_each_text_field {
    ($macro:ident) => {
        $macro! {
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
    };
}

impl VoiceStatusReport {
    /// Parse the vendor field set from an adaptor context.
    pub fn from_context(context: &dyn RequestAdaptorContext) -> Self {
        let text = |key: &str| context.get_value(key).map(str::to_owned);

        macro_rules! parse_text_fields {
            ($($field:ident => $key:ident),* $(,)?) => {
                Self {
                    call_status: context
                        .get_value(voice_keys::CALL_STATUS)
                        .and_then(CallStatus::parse),
                    $($field: text(voice_keys::$key),)*
                }
            };
        }

        for_each_text_field!(parse_text_fields)
    }

    /// Copy every parsed field into a delivery report's property bag.
    fn apply_to(&self, properties: &mut ExtendedProperties) {
        macro_rules! apply_text_fields {
            ($($field:ident => $key:ident),* $(,)?) => {
                $(
                    if let Some(value) = &self.$field {
                        properties.set(VOICE_PROPERTIES_NAMESPACE, voice_keys::$key, value.clone());
                    }
                )*
            };
        }

        for_each_text_field!(apply_text_fields);

        if let Some(status) = self.call_status {
            properties.set(VOICE_PROPERTIES_NAMESPACE, voice_keys::CALL_STATUS, status);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Adapts Twilio call status webhooks into normalized delivery reports.
pub struct VoiceDeliveryStatusReportAdaptor;

impl VoiceDeliveryStatusReportAdaptor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeliveryReportRequestAdaptor for VoiceDeliveryStatusReportAdaptor {
    async fn adapt(&self, context: &dyn RequestAdaptorContext) -> Option<Vec<DeliveryReport>> {
        if !should_adapt(context, VOICE_CHANNEL_ID) {
            return None;
        }

        let report = VoiceStatusReport::from_context(context);
        let mut properties = ExtendedProperties::new();
        report.apply_to(&mut properties);

        // Twilio delivers one event per webhook call.
        Some(vec![DeliveryReport::new(
            STATUS_CHANGED_EVENT,
            VOICE_CHANNEL_ID,
            TWILIO_PROVIDER_ID,
            context.pipeline_intent().map(str::to_owned),
            context.pipeline_id().map(str::to_owned),
            report.call_sid.clone(),
            normalize_call_status(report.call_status),
            properties,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::{CHANNEL_ID_KEY, CHANNEL_PROVIDER_ID_KEY, FormAdaptorContext};
    use crate::domain::StatusKind;
    use crate::voice::properties::VoiceDeliveryReportProperties;

    fn webhook_context(status: &str) -> FormAdaptorContext {
        FormAdaptorContext::new()
            .with_value(CHANNEL_ID_KEY, "voice")
            .with_value(CHANNEL_PROVIDER_ID_KEY, "twilio")
            .with_value("To", "+15550001111")
            .with_value("From", "+15550002222")
            .with_value("ApiVersion", "2010-04-01")
            .with_value("AccountSid", "AC0123456789abcdef0123456789abcdef")
            .with_value("CallSid", "CA0123456789abcdef")
            .with_value("CallStatus", status)
            .with_value("Direction", "outbound-api")
            .with_value("SequenceNumber", "3")
            .with_value("AnsweredBy", "human")
            .with_value("CallDuration", "42")
            .with_value("CallerCity", "AUSTIN")
            .with_value("CalledCountry", "US")
            .with_pipeline("appointment-reminder", "pipe-7")
    }

    #[tokio::test]
    async fn non_matching_channel_yields_no_report() {
        let adaptor = VoiceDeliveryStatusReportAdaptor::new();
        let context = FormAdaptorContext::new()
            .with_value(CHANNEL_ID_KEY, "sms")
            .with_value(CHANNEL_PROVIDER_ID_KEY, "twilio");
        assert!(adaptor.adapt(&context).await.is_none());
    }

    #[tokio::test]
    async fn matching_context_yields_one_normalized_report() {
        let adaptor = VoiceDeliveryStatusReportAdaptor::new();
        let reports = adaptor.adapt(&webhook_context("completed")).await.unwrap();

        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.event_name(), STATUS_CHANGED_EVENT);
        assert_eq!(report.channel_id(), "voice");
        assert_eq!(report.channel_provider_id(), "twilio");
        assert_eq!(report.pipeline_intent(), Some("appointment-reminder"));
        assert_eq!(report.pipeline_id(), Some("pipe-7"));
        assert_eq!(report.resource_id(), Some("CA0123456789abcdef"));
        assert_eq!(report.status().kind(), StatusKind::Success);
        assert_eq!(report.status().label(), "Completed");
    }

    #[tokio::test]
    async fn vendor_fields_are_copied_into_extended_properties() {
        let adaptor = VoiceDeliveryStatusReportAdaptor::new();
        let reports = adaptor.adapt(&webhook_context("no-answer")).await.unwrap();

        let view = VoiceDeliveryReportProperties::new(reports[0].extended_properties());
        assert_eq!(view.to(), Some("+15550001111"));
        assert_eq!(view.from(), Some("+15550002222"));
        assert_eq!(view.call_sid(), Some("CA0123456789abcdef"));
        assert_eq!(view.call_status(), Some(CallStatus::NoAnswer));
        assert_eq!(view.direction(), Some("outbound-api"));
        assert_eq!(view.sequence_number(), Some("3"));
        assert_eq!(view.answered_by(), Some("human"));
        assert_eq!(view.call_duration(), Some("42"));
        assert_eq!(view.caller_city(), Some("AUSTIN"));
        assert_eq!(view.called_country(), Some("US"));
        assert!(view.timestamp().is_none());
        assert!(view.sip_response_code().is_none());
    }

    #[tokio::test]
    async fn busy_normalizes_to_server_error() {
        let adaptor = VoiceDeliveryStatusReportAdaptor::new();
        let reports = adaptor.adapt(&webhook_context("busy")).await.unwrap();

        let status = reports[0].status();
        assert_eq!(status.kind(), StatusKind::ServerError);
        assert_eq!(status.label(), "Busy");
        assert_eq!(status.code(), CallStatus::Busy.code());
    }

    #[tokio::test]
    async fn unrecognized_status_maps_to_the_unknown_sentinel() {
        let adaptor = VoiceDeliveryStatusReportAdaptor::new();
        let reports = adaptor.adapt(&webhook_context("teleported")).await.unwrap();

        let status = reports[0].status();
        assert_eq!(status.kind(), StatusKind::ClientError);
        assert_eq!(status.label(), "Unknown");
    }
}

use crate::domain::properties::ExtendedProperties;
use crate::domain::status::CommunicationsStatus;

/// Event name for reports produced from vendor status webhooks.
pub const STATUS_CHANGED_EVENT: &str = "StatusChanged";

#[derive(Debug, Clone, PartialEq)]
/// Normalized record describing the outcome of a previously dispatched
/// communication.
///
/// Constructed once by a delivery-report adaptor from an inbound webhook and
/// never mutated afterwards; every vendor-specific field outside the
/// normalized core rides in the extended-properties bag.
pub struct DeliveryReport {
    event_name: String,
    channel_id: String,
    channel_provider_id: String,
    pipeline_intent: Option<String>,
    pipeline_id: Option<String>,
    resource_id: Option<String>,
    status: CommunicationsStatus,
    extended_properties: ExtendedProperties,
}

impl DeliveryReport {
    /// Assemble a report. Adaptors build the extended-properties bag first and
    /// hand it over here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        event_name: impl Into<String>,
        channel_id: impl Into<String>,
        channel_provider_id: impl Into<String>,
        pipeline_intent: Option<String>,
        pipeline_id: Option<String>,
        resource_id: Option<String>,
        status: CommunicationsStatus,
        extended_properties: ExtendedProperties,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            channel_id: channel_id.into(),
            channel_provider_id: channel_provider_id.into(),
            pipeline_intent,
            pipeline_id,
            resource_id,
            status,
            extended_properties,
        }
    }

    /// Report event name, e.g. [`STATUS_CHANGED_EVENT`].
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Channel the communication was sent through.
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Provider that carried the communication.
    pub fn channel_provider_id(&self) -> &str {
        &self.channel_provider_id
    }

    /// Pipeline intent correlated from the webhook, if present.
    pub fn pipeline_intent(&self) -> Option<&str> {
        self.pipeline_intent.as_deref()
    }

    /// Pipeline id correlated from the webhook, if present.
    pub fn pipeline_id(&self) -> Option<&str> {
        self.pipeline_id.as_deref()
    }

    /// Vendor resource sid (message or call) the report refers to.
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    /// Normalized communications status.
    pub fn status(&self) -> &CommunicationsStatus {
        &self.status
    }

    /// Vendor-specific fields carried alongside the normalized core.
    pub fn extended_properties(&self) -> &ExtendedProperties {
        &self.extended_properties
    }
}

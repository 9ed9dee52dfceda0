#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of one send attempt for one recipient.
///
/// Immutable once created; `dispatched` reflects whether the vendor accepted
/// the communication for delivery, `status` keeps the raw vendor lifecycle
/// string for diagnostics.
pub struct DispatchResult {
    resource_id: String,
    dispatched: bool,
    status: String,
}

impl DispatchResult {
    /// Create a per-recipient result record.
    pub fn new(resource_id: impl Into<String>, dispatched: bool, status: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            dispatched,
            status: status.into(),
        }
    }

    /// Vendor-assigned resource sid (message or call).
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Whether the vendor accepted the communication for delivery.
    pub fn is_dispatched(&self) -> bool {
        self.dispatched
    }

    /// Raw vendor status string at dispatch time.
    pub fn status(&self) -> &str {
        &self.status
    }
}

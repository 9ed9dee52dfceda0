use std::collections::HashMap;

use crate::domain::context::{ContentStoreCallback, UrlResolver};
use crate::domain::message::MachineDetection;
use crate::domain::status::{CallStatus, SmsStatus};
use crate::domain::value::RingTimeout;

#[derive(Debug, Clone)]
/// A value stored in an [`ExtendedProperties`] bag.
///
/// The bag is opaque to the store: values round-trip exactly as stored, with
/// no coercion. Function-valued entries keep the callable's identity; the
/// store never invokes them.
pub enum PropertyValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    MachineDetection(MachineDetection),
    RingTimeout(RingTimeout),
    SmsStatus(SmsStatus),
    CallStatus(CallStatus),
    UrlResolver(UrlResolver),
    ContentStore(ContentStoreCallback),
}

impl PropertyValue {
    /// Borrow the text value, if this entry holds one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// The integer value, if this entry holds one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// The boolean value, if this entry holds one.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// The machine-detection mode, if this entry holds one.
    pub fn as_machine_detection(&self) -> Option<MachineDetection> {
        match self {
            Self::MachineDetection(value) => Some(*value),
            _ => None,
        }
    }

    /// The ring timeout, if this entry holds one.
    pub fn as_ring_timeout(&self) -> Option<RingTimeout> {
        match self {
            Self::RingTimeout(value) => Some(*value),
            _ => None,
        }
    }

    /// The message lifecycle status, if this entry holds one.
    pub fn as_sms_status(&self) -> Option<SmsStatus> {
        match self {
            Self::SmsStatus(value) => Some(*value),
            _ => None,
        }
    }

    /// The call lifecycle status, if this entry holds one.
    pub fn as_call_status(&self) -> Option<CallStatus> {
        match self {
            Self::CallStatus(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow the URL resolver, if this entry holds one.
    pub fn as_url_resolver(&self) -> Option<&UrlResolver> {
        match self {
            Self::UrlResolver(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the content-store hook, if this entry holds one.
    pub fn as_content_store(&self) -> Option<&ContentStoreCallback> {
        match self {
            Self::ContentStore(value) => Some(value),
            _ => None,
        }
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::MachineDetection(a), Self::MachineDetection(b)) => a == b,
            (Self::RingTimeout(a), Self::RingTimeout(b)) => a == b,
            (Self::SmsStatus(a), Self::SmsStatus(b)) => a == b,
            (Self::CallStatus(a), Self::CallStatus(b)) => a == b,
            // Function-valued entries compare by identity.
            (Self::UrlResolver(a), Self::UrlResolver(b)) => a.ptr_eq(b),
            (Self::ContentStore(a), Self::ContentStore(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<MachineDetection> for PropertyValue {
    fn from(value: MachineDetection) -> Self {
        Self::MachineDetection(value)
    }
}

impl From<RingTimeout> for PropertyValue {
    fn from(value: RingTimeout) -> Self {
        Self::RingTimeout(value)
    }
}

impl From<SmsStatus> for PropertyValue {
    fn from(value: SmsStatus) -> Self {
        Self::SmsStatus(value)
    }
}

impl From<CallStatus> for PropertyValue {
    fn from(value: CallStatus) -> Self {
        Self::CallStatus(value)
    }
}

impl From<UrlResolver> for PropertyValue {
    fn from(value: UrlResolver) -> Self {
        Self::UrlResolver(value)
    }
}

impl From<ContentStoreCallback> for PropertyValue {
    fn from(value: ContentStoreCallback) -> Self {
        Self::ContentStore(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Namespaced key/value bag carrying provider-specific fields on host-generic
/// objects (channel configurations and delivery reports).
///
/// Keys are unique per namespace; insertion order is irrelevant. The bag lives
/// and dies with its owner and assumes a single writer per instance.
pub struct ExtendedProperties {
    entries: HashMap<(String, String), PropertyValue>,
}

impl ExtendedProperties {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by namespace and key.
    pub fn get(&self, namespace: &str, key: &str) -> Option<&PropertyValue> {
        self.entries
            .get(&(namespace.to_owned(), key.to_owned()))
    }

    /// Insert or replace a value under (namespace, key).
    pub fn set(&mut self, namespace: &str, key: &str, value: impl Into<PropertyValue>) {
        self.entries
            .insert((namespace.to_owned(), key.to_owned()), value.into());
    }

    /// Remove a value, returning it if present.
    pub fn remove(&mut self, namespace: &str, key: &str) -> Option<PropertyValue> {
        self.entries
            .remove(&(namespace.to_owned(), key.to_owned()))
    }

    /// Whether the bag holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries across all namespaces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate entries within one namespace, in no particular order.
    pub fn iter_namespace<'a>(
        &'a self,
        namespace: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a PropertyValue)> + 'a {
        self.entries
            .iter()
            .filter(move |((ns, _), _)| ns == namespace)
            .map(|((_, key), value)| (key.as_str(), value))
    }
}

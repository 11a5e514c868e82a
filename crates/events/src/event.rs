use chrono::{DateTime, Utc};

/// A fact emitted by an aggregate after a command was accepted.
///
/// `event_type` names are dotted and stable (`"discounts.policy.rule_added"`);
/// `version` changes only when the payload shape changes.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn event_type(&self) -> &'static str;

    fn version(&self) -> u32;

    /// Business time of the change.
    fn occurred_at(&self) -> DateTime<Utc>;
}

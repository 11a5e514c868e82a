//! Host messaging collaborators: per-record chatter and real-time notifications.
//!
//! Both are external to the add-ons; they are expressed here as traits with
//! in-memory implementations so the add-ons can be exercised end to end.

pub mod chatter;
pub mod notification;
pub mod record;

pub use chatter::{Chatter, ChatterError, ChatterMessage, InMemoryChatter, MessageId, MessageSubtype, PostedMessage};
pub use notification::{BusNotificationSink, Notification, NotificationKind, NotificationSink, NotifyError};
pub use record::RecordRef;

/// Subscribers are identified by an opaque, caller-chosen string.
pub type SubscriberId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Sessions and campaign records are keyed by UUID v4.
pub type RecordId = uuid::Uuid;

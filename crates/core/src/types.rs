/// All primary keys are application-generated UUIDs.
pub type DbId = uuid::Uuid;

/// All stored timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Employee primary keys are PostgreSQL `gen_random_uuid()` values. UUIDs
/// rather than serial ids: record identifiers must not be guessable by
/// iteration.
pub type EmployeeId = uuid::Uuid;

/// Lookup-table primary keys (roles) are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

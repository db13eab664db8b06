/// User and group identifiers are opaque strings issued by the backend
/// (UUID-shaped, but the client never parses them).
pub type UserId = String;

/// Opaque group identifier issued by the backend.
pub type GroupId = String;

/// Task primary keys are server-assigned serials.
pub type TaskId = i64;

/// Study-plan primary keys are server-assigned serials.
pub type PlanId = i64;

/// Study-step primary keys are server-assigned serials.
pub type StepId = i64;

/// Calendar due dates, serialized on the wire as `YYYY-MM-DD`.
pub type DueDate = chrono::NaiveDate;

//! Domain records and validation for the studycircle client.
//!
//! Everything in this crate is a flat value type mapping one-to-one to a
//! backend row or request body, plus the small amount of logic the client
//! owns itself: non-empty input checks and the case-insensitive ordering
//! of group listings. No I/O happens here.

pub mod group;
pub mod plan;
pub mod profile;
pub mod task;
pub mod types;
pub mod validation;

pub use group::{sort_groups_by_name, Group, GroupMembershipRow, NewGroup, NewGroupMember};
pub use plan::{NewStudyPlan, NewStudyStep, StudyPlan, StudyStep};
pub use profile::{Credentials, Profile, UserIdentity};
pub use task::{NewTask, Task, TaskCompletionPatch};
pub use types::{DueDate, GroupId, PlanId, StepId, TaskId, UserId};

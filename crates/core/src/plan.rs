//! Study plans and their steps.

use serde::{Deserialize, Serialize};

use crate::types::{DueDate, GroupId, PlanId, StepId, UserId};

/// A row from the backend `study_plans` table. Each plan belongs to
/// exactly one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub id: PlanId,
    pub group_id: GroupId,
    pub title: String,
}

/// Request body for creating a plan in a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudyPlan {
    pub group_id: GroupId,
    pub title: String,
}

/// A row from the backend `study_steps` table. Each step belongs to
/// exactly one plan. `completed_by` lists the ids of users who marked the
/// step done; the column may be absent on rows that nobody touched yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyStep {
    pub id: StepId,
    pub plan_id: PlanId,
    pub title: String,
    pub due_date: DueDate,
    #[serde(default)]
    pub completed_by: Vec<UserId>,
}

/// Request body for creating a step in a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudyStep {
    pub plan_id: PlanId,
    pub title: String,
    pub due_date: DueDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_without_completed_by_defaults_empty() {
        let json = r#"{
            "id": 3,
            "plan_id": 11,
            "title": "Read chapter 1",
            "due_date": "2026-05-20"
        }"#;

        let step: StudyStep = serde_json::from_str(json).unwrap();
        assert!(step.completed_by.is_empty());
    }

    #[test]
    fn test_step_with_completed_by() {
        let json = r#"{
            "id": 4,
            "plan_id": 11,
            "title": "Solve exercises",
            "due_date": "2026-05-22",
            "completed_by": ["u-1", "u-2"]
        }"#;

        let step: StudyStep = serde_json::from_str(json).unwrap();
        assert_eq!(step.completed_by, ["u-1", "u-2"]);
    }
}

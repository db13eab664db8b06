//! Controller-level tests for the dataset screens: dashboard, group
//! browser, task list, planner, plan browser, and step list.

mod common;

use assert_matches::assert_matches;
use studycircle_app::{
    ControllerError, DashboardController, GroupBrowserController, PlanBrowserController,
    PlannerController, ScreenState, StepListController, TaskListController,
};

fn names(state: &ScreenState<Vec<studycircle_core::Group>>) -> Vec<String> {
    state
        .data()
        .map(|groups| groups.iter().map(|g| g.name.clone()).collect())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Dashboard & group browser
// ---------------------------------------------------------------------------

/// Group listings render sorted by name, case-insensitively.
#[tokio::test]
async fn test_dashboard_sorts_groups_case_insensitively() {
    let app = common::app().await;
    app.register_and_sign_in("Ada", "ada@example.com", "hunter2-plus")
        .await;
    let user_id = app.user_id();
    app.backend.seed_group(&user_id, "banana");
    app.backend.seed_group(&user_id, "Apple");
    app.backend.seed_group(&user_id, "cherry");

    let mut dashboard = DashboardController::new(app.gateway.clone(), app.session.clone());
    dashboard.activate().await.unwrap();

    assert_eq!(names(dashboard.state()), ["Apple", "banana", "cherry"]);
}

/// Creating a group enrolls the creator, and the new group shows up in
/// the refreshed listing.
#[tokio::test]
async fn test_create_group_appears_in_listing() {
    let app = common::app().await;
    app.register_and_sign_in("Ada", "ada@example.com", "hunter2-plus")
        .await;

    let mut browser = GroupBrowserController::new(app.gateway.clone(), app.session.clone());
    browser.activate().await.unwrap();
    let group = browser.create_group("Statistics").await.unwrap();

    assert!(!group.id.is_empty());
    assert_eq!(names(browser.state()), ["Statistics"]);
}

/// If the join after a create fails, only the join failure surfaces:
/// the group row exists on the backend but never appears in the
/// creator's listing. No rollback, no retry.
#[tokio::test]
async fn test_failed_join_leaves_group_unlisted() {
    let app = common::app().await;
    app.register_and_sign_in("Ada", "ada@example.com", "hunter2-plus")
        .await;
    app.backend.fail_joins(true);

    let mut browser = GroupBrowserController::new(app.gateway.clone(), app.session.clone());
    browser.activate().await.unwrap();
    let err = browser.create_group("Orphaned").await.unwrap_err();

    assert_matches!(err, ControllerError::Gateway(_));
    assert!(app.backend.has_group_named("Orphaned"));

    app.backend.fail_joins(false);
    browser.activate().await.unwrap();
    assert!(names(browser.state()).is_empty());
}

/// Joining an existing group by id adds it to the listing.
#[tokio::test]
async fn test_join_existing_group_by_id() {
    let app = common::app().await;
    app.register_and_sign_in("Ada", "ada@example.com", "hunter2-plus")
        .await;
    let shared_id = app.backend.seed_group("someone-else", "Shared notes");

    let mut browser = GroupBrowserController::new(app.gateway.clone(), app.session.clone());
    browser.activate().await.unwrap();
    browser.join_group(&shared_id).await.unwrap();

    assert_eq!(names(browser.state()), ["Shared notes"]);
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Add, toggle twice, and delete, with the in-memory list patched from
/// the server-returned rows at every step.
#[tokio::test]
async fn test_task_add_toggle_delete() {
    let app = common::app().await;
    app.register_and_sign_in("Ada", "ada@example.com", "hunter2-plus")
        .await;

    let mut tasks = TaskListController::new(app.gateway.clone(), app.session.clone());
    tasks.activate().await.unwrap();
    assert_eq!(tasks.state().data().unwrap().len(), 0);

    tasks.add_task("Read chapter 1", "2026-03-01").await.unwrap();
    let task_id = {
        let rows = tasks.state().data().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].completed);
        rows[0].id
    };

    tasks.toggle_completion(task_id).await.unwrap();
    assert!(tasks.state().data().unwrap()[0].completed);

    tasks.toggle_completion(task_id).await.unwrap();
    assert!(!tasks.state().data().unwrap()[0].completed);

    tasks.delete_task(task_id).await.unwrap();
    assert!(tasks.state().data().unwrap().is_empty());
}

/// A malformed due date is refused locally, before any request.
#[tokio::test]
async fn test_add_task_rejects_bad_date() {
    let app = common::app().await;
    app.register_and_sign_in("Ada", "ada@example.com", "hunter2-plus")
        .await;

    let mut tasks = TaskListController::new(app.gateway.clone(), app.session.clone());
    tasks.activate().await.unwrap();

    let err = tasks.add_task("Read", "tomorrow").await.unwrap_err();
    assert_matches!(err, ControllerError::Invalid(_));
    assert!(tasks.state().data().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Plans & steps
// ---------------------------------------------------------------------------

/// The planner needs an active group; without one it routes away.
#[tokio::test]
async fn test_planner_requires_active_group() {
    let app = common::app().await;
    app.register_and_sign_in("Ada", "ada@example.com", "hunter2-plus")
        .await;

    let mut planner = PlannerController::new(app.gateway.clone(), app.session.clone());
    assert_matches!(
        planner.activate().await.unwrap_err(),
        ControllerError::Unauthenticated
    );
}

/// Adding a plan re-reads the listing for the active group.
#[tokio::test]
async fn test_planner_add_and_list() {
    let app = common::app().await;
    app.register_and_sign_in("Ada", "ada@example.com", "hunter2-plus")
        .await;
    let group_id = app.backend.seed_group(&app.user_id(), "Calculus");
    app.session.set_active_group_id(&group_id).unwrap();

    let mut planner = PlannerController::new(app.gateway.clone(), app.session.clone());
    planner.activate().await.unwrap();
    assert!(planner.state().data().unwrap().is_empty());

    planner.add_plan("Week 1").await.unwrap();
    let plans = planner.state().data().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].title, "Week 1");
    assert_eq!(plans[0].group_id, group_id);
}

/// The plan browser offers the user's groups and loads the plans of a
/// selected one.
#[tokio::test]
async fn test_plan_browser_select_group() {
    let app = common::app().await;
    app.register_and_sign_in("Ada", "ada@example.com", "hunter2-plus")
        .await;
    let user_id = app.user_id();
    let algebra = app.backend.seed_group(&user_id, "Algebra");
    app.backend.seed_group(&user_id, "Biology");
    app.backend.seed_plan(&algebra, "Week 1");

    let mut browser = PlanBrowserController::new(app.gateway.clone(), app.session.clone());
    browser.activate().await.unwrap();
    assert_eq!(browser.groups().data().unwrap().len(), 2);

    browser.select_group(&algebra).await.unwrap();
    let plans = browser.plans().data().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].title, "Week 1");
}

/// A plan with no steps is Ready with an empty list, and adding a step
/// re-reads the listing.
#[tokio::test]
async fn test_steps_empty_then_add() {
    let app = common::app().await;
    app.register_and_sign_in("Ada", "ada@example.com", "hunter2-plus")
        .await;
    let group_id = app.backend.seed_group(&app.user_id(), "Calculus");
    let plan_id = app.backend.seed_plan(&group_id, "Week 1");

    let mut steps = StepListController::new(app.gateway.clone(), app.session.clone(), plan_id);
    steps.activate().await.unwrap();
    assert!(steps.state().is_ready());
    assert!(steps.state().data().unwrap().is_empty());

    steps.add_step("Read limits chapter", "2026-05-20").await.unwrap();
    let rows = steps.state().data().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].plan_id, plan_id);
    assert!(rows[0].completed_by.is_empty());
}

//! Screen controllers and list presenters for the studycircle client.
//!
//! One controller per use case, each following the same control pattern:
//! read the required session fields (routing to the login flow when they
//! are missing), drive one or two gateway calls, and hold the screen's
//! dataset in an explicit [`ScreenState`]. Mutations either patch the
//! in-memory list with the server-returned row (tasks) or re-issue the
//! read (groups, plans, steps).

pub mod controllers;
pub mod error;
pub mod presenter;
pub mod state;

pub use controllers::dashboard::DashboardController;
pub use controllers::groups::GroupBrowserController;
pub use controllers::login::{LoginController, LoginError, LoginFlowError, LoginStep};
pub use controllers::plan_browser::PlanBrowserController;
pub use controllers::planner::PlannerController;
pub use controllers::register::RegisterController;
pub use controllers::steps::StepListController;
pub use controllers::tasks::TaskListController;
pub use error::ControllerError;
pub use presenter::{group_row, plan_row, step_row, task_row, ListPresenter};
pub use state::ScreenState;

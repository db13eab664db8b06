//! Stub backend server and its in-memory state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use studycircle_core::{
    Credentials, Group, NewGroup, NewGroupMember, NewStudyPlan, NewStudyStep, NewTask, Profile,
    StudyPlan, StudyStep, Task, TaskCompletionPatch,
};

/// The project API key the stub accepts.
pub const API_KEY: &str = "stub-anon-key";

#[derive(Default)]
struct StubState {
    /// (email, password, user id) triples for registered accounts.
    users: Vec<(String, String, String)>,
    /// Issued bearer tokens, mapped to user ids.
    tokens: HashMap<String, String>,
    profiles: Vec<Profile>,
    tasks: Vec<Task>,
    next_task_id: i64,
    groups: Vec<Group>,
    /// (user id, group id) join records.
    memberships: Vec<(String, String)>,
    plans: Vec<StudyPlan>,
    next_plan_id: i64,
    steps: Vec<StudyStep>,
    next_step_id: i64,
    /// When set, membership inserts fail with a 500.
    fail_joins: bool,
    /// When set, profile inserts fail with a 500.
    fail_profile_creates: bool,
}

type SharedState = Arc<Mutex<StubState>>;

/// Handle to a running stub backend.
pub struct StubBackend {
    /// Base URL of the bound listener, e.g. `http://127.0.0.1:49152`.
    pub base_url: String,
    state: SharedState,
}

impl StubBackend {
    /// Bind to an ephemeral localhost port and start serving.
    pub async fn spawn() -> Self {
        let state: SharedState = Arc::new(Mutex::new(StubState {
            next_task_id: 1,
            next_plan_id: 1,
            next_step_id: 1,
            ..StubState::default()
        }));

        let app = Router::new()
            .route("/auth/signup", post(signup))
            .route("/auth/token", post(token))
            .route("/auth/user", get(current_user))
            .route("/rest/profiles", post(create_profile))
            .route(
                "/rest/tasks",
                get(list_tasks)
                    .post(create_task)
                    .patch(patch_task)
                    .delete(delete_task),
            )
            .route("/rest/groups", post(create_group))
            .route("/rest/group_members", get(list_memberships).post(join_group))
            .route("/rest/study_plans", get(list_plans).post(create_plan))
            .route("/rest/study_steps", get(list_steps).post(create_step))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap()
    }

    /// Make every subsequent membership insert fail with a 500.
    pub fn fail_joins(&self, fail: bool) {
        self.lock().fail_joins = fail;
    }

    /// Make every subsequent profile insert fail with a 500.
    pub fn fail_profile_creates(&self, fail: bool) {
        self.lock().fail_profile_creates = fail;
    }

    /// True if a group row with this name exists, member or not.
    pub fn has_group_named(&self, name: &str) -> bool {
        self.lock().groups.iter().any(|g| g.name == name)
    }

    /// Number of profile rows (duplicates included).
    pub fn profile_count(&self) -> usize {
        self.lock().profiles.len()
    }

    /// Seed a group row plus a membership for the given user.
    pub fn seed_group(&self, user_id: &str, name: &str) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let mut state = self.lock();
        state.groups.push(Group {
            id: id.clone(),
            name: name.to_string(),
            description: None,
            created_by: Some(user_id.to_string()),
        });
        state.memberships.push((user_id.to_string(), id.clone()));
        id
    }

    /// Seed a plan row in a group.
    pub fn seed_plan(&self, group_id: &str, title: &str) -> i64 {
        let mut state = self.lock();
        let id = state.next_plan_id;
        state.next_plan_id += 1;
        state.plans.push(StudyPlan {
            id,
            group_id: group_id.to_string(),
            title: title.to_string(),
        });
        id
    }
}

// ---------------------------------------------------------------------------
// Request guards
// ---------------------------------------------------------------------------

fn require_api_key(headers: &HeaderMap) -> Result<(), Response> {
    match headers.get("apikey").and_then(|v| v.to_str().ok()) {
        Some(key) if key == API_KEY => Ok(()),
        _ => Err((StatusCode::UNAUTHORIZED, Json(json!({"msg": "No API key found"})))
            .into_response()),
    }
}

fn authed_user(state: &StubState, headers: &HeaderMap) -> Result<String, Response> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token.and_then(|t| state.tokens.get(t)) {
        Some(user_id) => Ok(user_id.clone()),
        None => Err((StatusCode::UNAUTHORIZED, Json(json!({"msg": "Invalid token"})))
            .into_response()),
    }
}

/// Extract the value of a PostgREST `key=eq.value` filter.
fn eq_filter(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.strip_prefix("eq."))
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Auth handlers
// ---------------------------------------------------------------------------

async fn signup(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Credentials>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let mut state = state.lock().unwrap();

    if body.password.len() < 6 {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"msg": "Password should be at least 6 characters"})),
        )
            .into_response();
    }
    if state.users.iter().any(|(email, _, _)| *email == body.email) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"msg": "User already registered"})),
        )
            .into_response();
    }

    let user_id = uuid::Uuid::new_v4().to_string();
    state.users.push((body.email, body.password, user_id.clone()));
    (StatusCode::OK, Json(json!({"id": user_id}))).into_response()
}

async fn token(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Credentials>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let mut state = state.lock().unwrap();

    let user_id = state
        .users
        .iter()
        .find(|(email, password, _)| *email == body.email && *password == body.password)
        .map(|(_, _, id)| id.clone());

    match user_id {
        Some(user_id) => {
            let token = uuid::Uuid::new_v4().to_string();
            state.tokens.insert(token.clone(), user_id);
            (StatusCode::OK, Json(json!({"access_token": token}))).into_response()
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error_description": "Invalid login credentials"})),
        )
            .into_response(),
    }
}

async fn current_user(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let state = state.lock().unwrap();
    let user_id = match authed_user(&state, &headers) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let email = state
        .users
        .iter()
        .find(|(_, _, id)| *id == user_id)
        .map(|(email, _, _)| email.clone());

    (StatusCode::OK, Json(json!({"id": user_id, "email": email}))).into_response()
}

// ---------------------------------------------------------------------------
// Table handlers
// ---------------------------------------------------------------------------

async fn create_profile(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Profile>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    if let Err(resp) = authed_user(&state, &headers) {
        return resp;
    }

    if state.fail_profile_creates {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "profile insert failed"})),
        )
            .into_response();
    }

    state.profiles.push(body.clone());
    (StatusCode::CREATED, Json(json!([body]))).into_response()
}

async fn list_tasks(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let state = state.lock().unwrap();
    if let Err(resp) = authed_user(&state, &headers) {
        return resp;
    }

    let user_id = eq_filter(&params, "user_id").unwrap_or_default();
    let rows: Vec<&Task> = state.tasks.iter().filter(|t| t.user_id == user_id).collect();
    (StatusCode::OK, Json(json!(rows))).into_response()
}

async fn create_task(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<NewTask>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    if let Err(resp) = authed_user(&state, &headers) {
        return resp;
    }

    let id = state.next_task_id;
    state.next_task_id += 1;
    let task = Task {
        id,
        title: body.title,
        due_date: body.due_date,
        completed: body.completed,
        user_id: body.user_id,
    };
    state.tasks.push(task.clone());
    (StatusCode::CREATED, Json(json!([task]))).into_response()
}

async fn patch_task(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<TaskCompletionPatch>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    if let Err(resp) = authed_user(&state, &headers) {
        return resp;
    }

    let id: i64 = match eq_filter(&params, "id").and_then(|v| v.parse().ok()) {
        Some(id) => id,
        None => return (StatusCode::BAD_REQUEST, Json(json!({"message": "bad filter"})))
            .into_response(),
    };

    let updated: Vec<Task> = state
        .tasks
        .iter_mut()
        .filter(|t| t.id == id)
        .map(|t| {
            t.completed = body.completed;
            t.clone()
        })
        .collect();

    (StatusCode::OK, Json(json!(updated))).into_response()
}

async fn delete_task(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    if let Err(resp) = authed_user(&state, &headers) {
        return resp;
    }

    if let Some(id) = eq_filter(&params, "id").and_then(|v| v.parse::<i64>().ok()) {
        state.tasks.retain(|t| t.id != id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn create_group(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<NewGroup>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    let user_id = match authed_user(&state, &headers) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let group = Group {
        id: uuid::Uuid::new_v4().to_string(),
        name: body.name,
        description: None,
        created_by: Some(user_id),
    };
    state.groups.push(group.clone());
    (StatusCode::CREATED, Json(json!([group]))).into_response()
}

async fn join_group(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<NewGroupMember>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    if let Err(resp) = authed_user(&state, &headers) {
        return resp;
    }

    if state.fail_joins {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "membership insert failed"})),
        )
            .into_response();
    }

    state.memberships.push((body.user_id, body.group_id));
    StatusCode::CREATED.into_response()
}

async fn list_memberships(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let state = state.lock().unwrap();
    if let Err(resp) = authed_user(&state, &headers) {
        return resp;
    }

    let user_id = eq_filter(&params, "user_id").unwrap_or_default();
    let rows: Vec<serde_json::Value> = state
        .memberships
        .iter()
        .filter(|(member, _)| *member == user_id)
        .filter_map(|(_, group_id)| state.groups.iter().find(|g| g.id == *group_id))
        .map(|g| json!({"group": {"id": g.id, "name": g.name}}))
        .collect();

    (StatusCode::OK, Json(json!(rows))).into_response()
}

async fn list_plans(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let state = state.lock().unwrap();
    if let Err(resp) = authed_user(&state, &headers) {
        return resp;
    }

    let group_id = eq_filter(&params, "group_id").unwrap_or_default();
    let rows: Vec<&StudyPlan> = state
        .plans
        .iter()
        .filter(|p| p.group_id == group_id)
        .collect();
    (StatusCode::OK, Json(json!(rows))).into_response()
}

async fn create_plan(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<NewStudyPlan>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    if let Err(resp) = authed_user(&state, &headers) {
        return resp;
    }

    let id = state.next_plan_id;
    state.next_plan_id += 1;
    state.plans.push(StudyPlan {
        id,
        group_id: body.group_id,
        title: body.title,
    });
    StatusCode::CREATED.into_response()
}

async fn list_steps(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let state = state.lock().unwrap();
    if let Err(resp) = authed_user(&state, &headers) {
        return resp;
    }

    let plan_id = eq_filter(&params, "plan_id")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(-1);
    let rows: Vec<&StudyStep> = state.steps.iter().filter(|s| s.plan_id == plan_id).collect();
    (StatusCode::OK, Json(json!(rows))).into_response()
}

async fn create_step(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<NewStudyStep>,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    if let Err(resp) = authed_user(&state, &headers) {
        return resp;
    }

    let id = state.next_step_id;
    state.next_step_id += 1;
    state.steps.push(StudyStep {
        id,
        plan_id: body.plan_id,
        title: body.title,
        due_date: body.due_date,
        completed_by: Vec::new(),
    });
    StatusCode::CREATED.into_response()
}

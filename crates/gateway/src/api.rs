//! Typed operations against the backend REST surface.
//!
//! Wraps the hosted backend's auth endpoints (`auth/...`) and PostgREST
//! table endpoints (`rest/...`) using [`reqwest`]. Single-row writes ask
//! the backend to echo the persisted row (`Prefer: return=representation`)
//! and unwrap the one-element array PostgREST responds with.

use serde::Deserialize;
use studycircle_core::{
    Credentials, Group, GroupMembershipRow, NewGroup, NewGroupMember, NewStudyPlan, NewStudyStep,
    NewTask, Profile, StudyPlan, StudyStep, Task, TaskCompletionPatch, UserIdentity,
};

use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// HTTP client for one backend project.
///
/// Cheap to construct; the inner [`reqwest::Client`] pools connections.
/// Operations that act on behalf of a signed-in user take the bearer
/// token explicitly; the gateway holds no session state, and checking
/// that a required credential is present is the caller's job.
pub struct BackendGateway {
    http: reqwest::Client,
    config: GatewayConfig,
}

/// Response returned by the token endpoint on successful login.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

impl BackendGateway {
    /// Create a gateway for the given backend project.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, config: GatewayConfig) -> Self {
        Self { http, config }
    }

    // ---- auth ----

    /// Register a new account.
    ///
    /// Sends `POST auth/signup`. The backend enforces password strength
    /// and email uniqueness; rejections surface as
    /// [`GatewayError::Validation`].
    pub async fn register(&self, credentials: &Credentials) -> Result<(), GatewayError> {
        let response = self
            .anon(self.http.post(self.url("auth/signup")))
            .json(credentials)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Log in with email and password.
    ///
    /// Sends `POST auth/token?grant_type=password` and returns the opaque
    /// bearer token. No expiry is communicated to the client.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, GatewayError> {
        let response = self
            .anon(self.http.post(self.url("auth/token?grant_type=password")))
            .json(credentials)
            .send()
            .await?;

        let login: LoginResponse = Self::parse_response(response).await?;
        Ok(login.access_token)
    }

    /// Resolve the user behind a bearer token.
    ///
    /// Sends `GET auth/user`. Used immediately after login to obtain the
    /// durable user id.
    pub async fn fetch_current_user(&self, token: &str) -> Result<UserIdentity, GatewayError> {
        let response = self
            .authed(self.http.get(self.url("auth/user")), token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Create the user's profile row.
    ///
    /// Idempotency is not guaranteed: calling twice for the same user id
    /// may create duplicate rows.
    pub async fn create_profile(
        &self,
        token: &str,
        profile: &Profile,
    ) -> Result<Profile, GatewayError> {
        let response = self
            .authed(self.http.post(self.url("rest/profiles")), token)
            .header("Prefer", "return=representation")
            .json(profile)
            .send()
            .await?;

        let rows: Vec<Profile> = Self::parse_response(response).await?;
        Self::first_row(rows)
    }

    // ---- tasks ----

    /// List the user's tasks, in server return order.
    pub async fn list_tasks(&self, token: &str, user_id: &str) -> Result<Vec<Task>, GatewayError> {
        let path = format!("rest/tasks?user_id=eq.{user_id}&select=*");
        let response = self
            .authed(self.http.get(self.url(&path)), token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Create a task and return the persisted row, including the
    /// server-assigned id.
    pub async fn create_task(&self, token: &str, task: &NewTask) -> Result<Task, GatewayError> {
        let response = self
            .authed(self.http.post(self.url("rest/tasks")), token)
            .header("Prefer", "return=representation")
            .json(task)
            .send()
            .await?;

        let rows: Vec<Task> = Self::parse_response(response).await?;
        Self::first_row(rows)
    }

    /// Set a task's completion flag and return the updated row.
    /// Idempotent: re-applying the same flag returns the same row.
    pub async fn update_task_completion(
        &self,
        token: &str,
        task_id: i64,
        completed: bool,
    ) -> Result<Task, GatewayError> {
        let path = format!("rest/tasks?id=eq.{task_id}");
        let response = self
            .authed(self.http.patch(self.url(&path)), token)
            .header("Prefer", "return=representation")
            .json(&TaskCompletionPatch { completed })
            .send()
            .await?;

        let rows: Vec<Task> = Self::parse_response(response).await?;
        Self::first_row(rows)
    }

    /// Delete a task by id.
    pub async fn delete_task(&self, token: &str, task_id: i64) -> Result<(), GatewayError> {
        let path = format!("rest/tasks?id=eq.{task_id}");
        let response = self
            .authed(self.http.delete(self.url(&path)), token)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- groups ----

    /// Create a group and return the persisted row.
    ///
    /// Enrolling the creator as a member is a separate [`join_group`]
    /// call; the two are not transactional.
    ///
    /// [`join_group`]: Self::join_group
    pub async fn create_group(&self, token: &str, group: &NewGroup) -> Result<Group, GatewayError> {
        let response = self
            .authed(self.http.post(self.url("rest/groups")), token)
            .header("Prefer", "return=representation")
            .json(group)
            .send()
            .await?;

        let rows: Vec<Group> = Self::parse_response(response).await?;
        Self::first_row(rows)
    }

    /// Enroll a user in a group.
    pub async fn join_group(
        &self,
        token: &str,
        member: &NewGroupMember,
    ) -> Result<(), GatewayError> {
        let response = self
            .authed(self.http.post(self.url("rest/group_members")), token)
            .header("Prefer", "return=minimal")
            .json(member)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// List the groups a user belongs to.
    ///
    /// One relational-projection read: membership rows joined server-side
    /// to group attributes, so a second round trip per group is never
    /// needed. Returns the unwrapped groups in server order; callers
    /// sort for display.
    pub async fn list_groups_for_user(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<Vec<Group>, GatewayError> {
        let path = format!("rest/group_members?select=group:groups(id,name)&user_id=eq.{user_id}");
        let response = self
            .authed(self.http.get(self.url(&path)), token)
            .send()
            .await?;

        let rows: Vec<GroupMembershipRow> = Self::parse_response(response).await?;
        Ok(rows.into_iter().map(|row| row.group).collect())
    }

    // ---- study plans & steps ----

    /// List a group's study plans, in server return order.
    pub async fn list_plans(
        &self,
        token: &str,
        group_id: &str,
    ) -> Result<Vec<StudyPlan>, GatewayError> {
        let path = format!("rest/study_plans?group_id=eq.{group_id}");
        let response = self
            .authed(self.http.get(self.url(&path)), token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Create a study plan in a group.
    pub async fn create_plan(&self, token: &str, plan: &NewStudyPlan) -> Result<(), GatewayError> {
        let response = self
            .authed(self.http.post(self.url("rest/study_plans")), token)
            .header("Prefer", "return=minimal")
            .json(plan)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// List a plan's steps. A plan with no steps yields an empty vec,
    /// not an error.
    pub async fn list_steps(
        &self,
        token: &str,
        plan_id: i64,
    ) -> Result<Vec<StudyStep>, GatewayError> {
        let path = format!("rest/study_steps?plan_id=eq.{plan_id}");
        let response = self
            .authed(self.http.get(self.url(&path)), token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Create a step in a plan.
    pub async fn create_step(&self, token: &str, step: &NewStudyStep) -> Result<(), GatewayError> {
        let response = self
            .authed(self.http.post(self.url("rest/study_steps")), token)
            .header("Prefer", "return=minimal")
            .json(step)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    /// Attach the project API key (every request needs it).
    fn anon(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("apikey", &self.config.api_key)
    }

    /// Attach the API key plus the caller's bearer token.
    fn authed(&self, builder: reqwest::RequestBuilder, token: &str) -> reqwest::RequestBuilder {
        self.anon(builder).bearer_auth(token)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or the classified [`GatewayError`]
    /// built from the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GatewayError::from_status(status.as_u16(), body));
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let response = Self::ensure_success(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), GatewayError> {
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Unwrap the single row of a representation echo.
    fn first_row<T>(rows: Vec<T>) -> Result<T, GatewayError> {
        rows.into_iter()
            .next()
            .ok_or_else(|| GatewayError::Decode("backend returned no row".to_string()))
    }
}

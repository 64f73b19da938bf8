//! [`LmsClient`]: one method per API route.

use lms_core::dto::assessment::{
    Assessment, AssessmentListQuery, Attempt, CreateAssessmentRequest, SubmitAttemptRequest,
    UpdateAssessmentRequest,
};
use lms_core::dto::auth::{AuthResponse, LoginRequest, RefreshRequest, SignupRequest};
use lms_core::dto::content::{
    ContentItem, ContentListQuery, CreateContentRequest, UpdateContentRequest, ViewCount,
};
use lms_core::dto::course::{Course, CourseListQuery, CreateCourseRequest, UpdateCourseRequest};
use lms_core::dto::user::{CreateUserRequest, UpdateUserRequest, User, UserListQuery};
use lms_core::types::DbId;
use lms_zoom::meetings::{CreateMeeting, Meeting, MeetingList, UpdateMeeting};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{ClientError, ClientResult};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
    pub db_healthy: bool,
}

#[derive(Serialize)]
struct MeetingQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_page_token: Option<&'a str>,
}

/// Client for one LMS server.
///
/// `base_url` is the server root (for example `http://localhost:3000`);
/// API paths are resolved under `/api/v1`. After [`login`](Self::login) or
/// [`signup`](Self::signup) the access token is attached to every request.
pub struct LmsClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl LmsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    // ---- health & auth ----

    pub async fn health(&self) -> ClientResult<Health> {
        let request = self.http.get(format!("{}/health", self.base_url));
        self.send_json(request).await
    }

    pub async fn signup(&self, input: &SignupRequest) -> ClientResult<AuthResponse> {
        let auth: AuthResponse = self.post("/auth/signup", input).await?;
        self.set_token(Some(auth.access_token.clone())).await;
        Ok(auth)
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.post("/auth/login", &body).await?;
        self.set_token(Some(auth.access_token.clone())).await;
        Ok(auth)
    }

    pub async fn refresh(&self, refresh_token: &str) -> ClientResult<AuthResponse> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let auth: AuthResponse = self.post("/auth/refresh", &body).await?;
        self.set_token(Some(auth.access_token.clone())).await;
        Ok(auth)
    }

    /// Revoke the caller's sessions and forget the local token.
    pub async fn logout(&self) -> ClientResult<()> {
        let request = self.request(Method::POST, "/auth/logout").await;
        self.send_empty(request).await?;
        self.set_token(None).await;
        Ok(())
    }

    pub async fn me(&self) -> ClientResult<User> {
        self.get("/auth/me").await
    }

    // ---- users ----

    pub async fn list_users(&self, query: &UserListQuery) -> ClientResult<Vec<User>> {
        self.get_with("/users", query).await
    }

    pub async fn get_user(&self, id: DbId) -> ClientResult<User> {
        self.get(&format!("/users/{id}")).await
    }

    pub async fn create_user(&self, input: &CreateUserRequest) -> ClientResult<User> {
        self.post("/users", input).await
    }

    pub async fn update_user(&self, id: DbId, input: &UpdateUserRequest) -> ClientResult<User> {
        self.put(&format!("/users/{id}"), input).await
    }

    pub async fn delete_user(&self, id: DbId) -> ClientResult<()> {
        self.delete(&format!("/users/{id}")).await
    }

    // ---- courses ----

    pub async fn list_courses(&self, query: &CourseListQuery) -> ClientResult<Vec<Course>> {
        self.get_with("/courses", query).await
    }

    pub async fn get_course(&self, id: DbId) -> ClientResult<Course> {
        self.get(&format!("/courses/{id}")).await
    }

    pub async fn create_course(&self, input: &CreateCourseRequest) -> ClientResult<Course> {
        self.post("/courses", input).await
    }

    pub async fn update_course(
        &self,
        id: DbId,
        input: &UpdateCourseRequest,
    ) -> ClientResult<Course> {
        self.put(&format!("/courses/{id}"), input).await
    }

    pub async fn delete_course(&self, id: DbId) -> ClientResult<()> {
        self.delete(&format!("/courses/{id}")).await
    }

    // ---- content ----

    pub async fn list_content(&self, query: &ContentListQuery) -> ClientResult<Vec<ContentItem>> {
        self.get_with("/content", query).await
    }

    pub async fn get_content(&self, id: DbId) -> ClientResult<ContentItem> {
        self.get(&format!("/content/{id}")).await
    }

    pub async fn create_content(&self, input: &CreateContentRequest) -> ClientResult<ContentItem> {
        self.post("/content", input).await
    }

    pub async fn update_content(
        &self,
        id: DbId,
        input: &UpdateContentRequest,
    ) -> ClientResult<ContentItem> {
        self.put(&format!("/content/{id}"), input).await
    }

    pub async fn delete_content(&self, id: DbId) -> ClientResult<()> {
        self.delete(&format!("/content/{id}")).await
    }

    pub async fn record_view(&self, id: DbId) -> ClientResult<ViewCount> {
        let request = self.request(Method::POST, &format!("/content/{id}/view")).await;
        self.send_json(request).await
    }

    // ---- assessments ----

    pub async fn list_assessments(
        &self,
        query: &AssessmentListQuery,
    ) -> ClientResult<Vec<Assessment>> {
        self.get_with("/assessments", query).await
    }

    pub async fn get_assessment(&self, id: DbId) -> ClientResult<Assessment> {
        self.get(&format!("/assessments/{id}")).await
    }

    pub async fn create_assessment(
        &self,
        input: &CreateAssessmentRequest,
    ) -> ClientResult<Assessment> {
        self.post("/assessments", input).await
    }

    pub async fn update_assessment(
        &self,
        id: DbId,
        input: &UpdateAssessmentRequest,
    ) -> ClientResult<Assessment> {
        self.put(&format!("/assessments/{id}"), input).await
    }

    pub async fn delete_assessment(&self, id: DbId) -> ClientResult<()> {
        self.delete(&format!("/assessments/{id}")).await
    }

    pub async fn submit_attempt(
        &self,
        assessment_id: DbId,
        answers: Vec<Option<i32>>,
    ) -> ClientResult<Attempt> {
        let body = SubmitAttemptRequest { answers };
        self.post(&format!("/assessments/{assessment_id}/attempts"), &body)
            .await
    }

    pub async fn list_attempts(&self, assessment_id: DbId) -> ClientResult<Vec<Attempt>> {
        self.get(&format!("/assessments/{assessment_id}/attempts"))
            .await
    }

    // ---- meetings ----

    pub async fn list_meetings(
        &self,
        page_size: Option<u32>,
        next_page_token: Option<&str>,
    ) -> ClientResult<MeetingList> {
        let query = MeetingQuery {
            page_size,
            next_page_token,
        };
        self.get_with("/meetings", &query).await
    }

    pub async fn create_meeting(&self, input: &CreateMeeting) -> ClientResult<Meeting> {
        self.post("/meetings", input).await
    }

    pub async fn get_meeting(&self, id: i64) -> ClientResult<Meeting> {
        self.get(&format!("/meetings/{id}")).await
    }

    pub async fn update_meeting(&self, id: i64, input: &UpdateMeeting) -> ClientResult<()> {
        let request = self
            .request(Method::PATCH, &format!("/meetings/{id}"))
            .await
            .json(input);
        self.send_empty(request).await
    }

    pub async fn delete_meeting(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("/meetings/{id}")).await
    }

    // ---- crate helpers ----

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::GET, path).await;
        self.send_json(request).await
    }

    pub(crate) async fn get_with<Q, T>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path).await.query(query);
        self.send_json(request).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).await.json(body);
        self.send_json(request).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).await.json(body);
        self.send_json(request).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.request(Method::DELETE, path).await;
        self.send_empty(request).await
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .http
            .request(method, format!("{}/api/v1{path}", self.base_url));
        match self.token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = Self::ensure_success(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> ClientResult<()> {
        Self::ensure_success(request.send().await?).await?;
        Ok(())
    }

    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(ClientError::from_body(status.as_u16(), &text))
    }
}

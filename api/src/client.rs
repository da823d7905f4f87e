//! HTTP client for the attendance backend.
//!
//! Every request carries a bounded timeout and no retry: periodic callers
//! (scan loop, report refresh) simply try again on their next tick.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ApiError;
use crate::types::{
    Ack, AttendanceEdit, ChatReply, HeatmapResponse, IntelligenceStats, LoginResponse,
    RecognizeResponse, ReportRow, StudentName, StudentProfile,
};

const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const FALLBACK_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    bearer: Option<String>,
    timeout_ms: u64,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        #[cfg(not(target_arch = "wasm32"))]
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        #[cfg(target_arch = "wasm32")]
        let http = reqwest::Client::new();

        Self {
            base_url,
            bearer: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            http,
        }
    }

    /// Derives the base URL from the page origin, mirroring how the client is
    /// deployed behind the same host as the backend. Falls back to a local
    /// development address when no window exists.
    pub fn from_window() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let origin = web_sys::window()
                .and_then(|window| window.location().origin().ok())
                .unwrap_or_else(|| FALLBACK_BASE_URL.to_string());
            Self::new(origin)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new(FALLBACK_BASE_URL)
        }
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ----- scan session -----

    pub async fn start_session(&self) -> Result<Ack, ApiError> {
        self.post("/start_attendance", json!({}), false).await
    }

    pub async fn stop_session(&self) -> Result<Ack, ApiError> {
        self.post("/stop_attendance", json!({}), false).await
    }

    /// Submits one captured frame (a data-URL JPEG) for recognition.
    pub async fn submit_frame(&self, image: &str) -> Result<RecognizeResponse, ApiError> {
        self.post("/attendance", json!({ "image": image }), false)
            .await
    }

    pub async fn register_student(
        &self,
        name: &str,
        image: &str,
        details: &str,
    ) -> Result<Ack, ApiError> {
        self.post(
            "/register",
            json!({ "name": name, "image": image, "details": details }),
            false,
        )
        .await
    }

    // ----- students and reports -----

    pub async fn student_profile(&self, name: &str) -> Result<StudentProfile, ApiError> {
        let path = format!("/student/{}", encode_path_segment(name));
        self.get(&path, false).await
    }

    pub async fn students(&self) -> Result<Vec<StudentName>, ApiError> {
        self.get("/students", false).await
    }

    pub async fn report(&self) -> Result<Vec<ReportRow>, ApiError> {
        self.get("/report", false).await
    }

    pub async fn report_month(&self, month: &str) -> Result<Vec<ReportRow>, ApiError> {
        let path = format!("/report/month/{}", encode_path_segment(month));
        self.get(&path, false).await
    }

    pub async fn report_months(&self) -> Result<Vec<String>, ApiError> {
        self.get("/report/months", false).await
    }

    // ----- admin edits (admin password travels in the body) -----

    pub async fn update_student(
        &self,
        admin_password: &str,
        name: &str,
        new_name: Option<&str>,
        details: &str,
    ) -> Result<Ack, ApiError> {
        self.post(
            "/student/update",
            json!({
                "admin_password": admin_password,
                "name": name,
                "new_name": new_name,
                "details": details,
            }),
            false,
        )
        .await
    }

    pub async fn update_attendance(
        &self,
        admin_password: &str,
        edit: &AttendanceEdit,
    ) -> Result<Ack, ApiError> {
        self.post(
            "/student/attendance/update",
            json!({
                "admin_password": admin_password,
                "name": edit.name,
                "date": edit.date,
                "time": edit.time,
                "new_date": edit.new_date,
                "new_time": edit.new_time,
                "present": edit.present,
            }),
            false,
        )
        .await
    }

    // ----- auth -----

    pub async fn login(
        &self,
        role: &str,
        name: &str,
        password: Option<&str>,
    ) -> Result<LoginResponse, ApiError> {
        self.post(
            "/api/login",
            json!({ "role": role, "name": name, "password": password }),
            false,
        )
        .await
    }

    pub async fn google_login(&self, credential: &str) -> Result<LoginResponse, ApiError> {
        self.post("/api/google_login", json!({ "credential": credential }), false)
            .await
    }

    // ----- token-gated analytics and chat -----

    pub async fn analytics_intelligence(&self) -> Result<IntelligenceStats, ApiError> {
        self.get("/api/analytics/intelligence", true).await
    }

    pub async fn analytics_heatmap(&self) -> Result<HeatmapResponse, ApiError> {
        self.get("/api/analytics/heatmap", true).await
    }

    /// `role_endpoint` is `"admin"` or `"student"`, matching the session role.
    pub async fn chat(&self, role_endpoint: &str, query: &str) -> Result<ChatReply, ApiError> {
        let path = format!("/api/chat/{role_endpoint}");
        self.post(&path, json!({ "query": query }), true).await
    }

    // ----- plumbing -----

    async fn get<T: DeserializeOwned>(&self, path: &str, authorized: bool) -> Result<T, ApiError> {
        let request = self.http.get(format!("{}{}", self.base_url, path));
        let request = self.attach_bearer(request, authorized)?;
        let response = self.dispatch(request).await?;
        read_json(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
        authorized: bool,
    ) -> Result<T, ApiError> {
        let request = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&body);
        let request = self.attach_bearer(request, authorized)?;
        let response = self.dispatch(request).await?;
        read_json(response).await
    }

    fn attach_bearer(
        &self,
        request: reqwest::RequestBuilder,
        authorized: bool,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        if !authorized {
            return Ok(request);
        }
        match self.bearer.as_deref() {
            Some(token) => Ok(request.header("Authorization", format!("Bearer {token}"))),
            None => Err(ApiError::Unauthorized("sign in first".to_string())),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        request.send().await.map_err(|err| {
            if err.is_timeout() {
                ApiError::Transport(format!("request timed out after {}ms", self.timeout_ms))
            } else {
                ApiError::Transport(err.to_string())
            }
        })
    }

    /// reqwest has no timeout support on wasm, so the request races a timer.
    #[cfg(target_arch = "wasm32")]
    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        use futures_util::future::{select, Either};
        use futures_util::pin_mut;

        let send = request.send();
        let timeout = gloo_timers::future::TimeoutFuture::new(self.timeout_ms as u32);
        pin_mut!(send);
        pin_mut!(timeout);

        match select(send, timeout).await {
            Either::Left((result, _)) => result.map_err(|err| ApiError::Transport(err.to_string())),
            Either::Right(_) => Err(ApiError::Transport(format!(
                "request timed out after {}ms",
                self.timeout_ms
            ))),
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()));
    }

    let message = response
        .json::<Ack>()
        .await
        .ok()
        .and_then(|ack| ack.message)
        .unwrap_or_else(|| format!("backend returned {status}"));
    Err(ApiError::from_status(status.as_u16(), message))
}

/// Enough escaping for names and month keys in a path segment; mirrors what
/// `encodeURIComponent` covered for the characters this backend sees.
fn encode_path_segment(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            ' ' => encoded.push_str("%20"),
            '%' => encoded.push_str("%25"),
            '/' => encoded.push_str("%2F"),
            '?' => encoded.push_str("%3F"),
            '#' => encoded.push_str("%23"),
            '&' => encoded.push_str("%26"),
            _ => encoded.push(ch),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn path_segments_escape_spaces() {
        assert_eq!(encode_path_segment("SANJAY G"), "SANJAY%20G");
        assert_eq!(encode_path_segment("2024-06"), "2024-06");
        assert_eq!(encode_path_segment("A/B?C"), "A%2FB%3FC");
    }

    #[test]
    fn authorized_request_without_token_fails_fast() {
        let client = ApiClient::new("http://localhost:5000");
        let request = client.http.get("http://localhost:5000/api/analytics/heatmap");
        let result = client.attach_bearer(request, true);
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    // Nothing listens on the discard port, so the exchange fails as a
    // transport error instead of hanging or panicking.
    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn google_login_surfaces_transport_failures() {
        let client = ApiClient::new("http://127.0.0.1:9");
        let result = client.google_login("opaque-credential").await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}

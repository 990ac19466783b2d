use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::services::identity::{
    provider::{TokenVerifier, UserAdmin},
    types::{AuthenticatedUser, IdentityError},
};

const ADMIN_PAGE_SIZE: usize = 100;

/// HTTP client for the hosted (GoTrue-compatible) identity service.
///
/// - `apikey` is sent on every request.
/// - Token verification forwards the caller's bearer token.
/// - Admin calls authenticate with the service key itself.
#[derive(Clone)]
pub struct GoTrueClient {
    http: reqwest::Client,
    base: Url,
    service_key: String,
}

#[derive(Debug, Deserialize)]
struct UserPage {
    #[serde(default)]
    users: Vec<AuthenticatedUser>,
}

impl GoTrueClient {
    pub fn new(base: Url, service_key: &str) -> Result<Self, IdentityError> {
        Self::with_builder(base, service_key, reqwest::Client::builder())
    }

    fn with_builder(
        mut base: Url,
        service_key: &str,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, IdentityError> {
        // `Url::join` replaces the last path segment unless the base ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(service_key)
                .map_err(|_| IdentityError::Config("service key is not a valid header value"))?,
        );

        let http = builder
            .default_headers(headers)
            .build()
            .map_err(IdentityError::Transport)?;

        Ok(Self {
            http,
            base,
            service_key: service_key.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityError> {
        self.base
            .join(path)
            .map_err(|_| IdentityError::Config("identity service url cannot be joined"))
    }

    /// Maps a non-success response to an error, consuming the body for diagnostics.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, IdentityError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status.is_client_error() {
            return Err(IdentityError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.unwrap_or_default();
        Err(IdentityError::Upstream {
            status: status.as_u16(),
            body,
        })
    }

    async fn list_users(&self, page: usize) -> Result<Vec<AuthenticatedUser>, IdentityError> {
        let mut url = self.endpoint("auth/v1/admin/users")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &ADMIN_PAGE_SIZE.to_string());

        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(IdentityError::Transport)?;

        let page: UserPage = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(IdentityError::Decode)?;

        Ok(page.users)
    }
}

#[async_trait]
impl TokenVerifier for GoTrueClient {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, IdentityError> {
        let resp = self
            .http
            .get(self.endpoint("auth/v1/user")?)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await
            .map_err(IdentityError::Transport)?;

        Self::check(resp)
            .await?
            .json::<AuthenticatedUser>()
            .await
            .map_err(IdentityError::Decode)
    }
}

#[async_trait]
impl UserAdmin for GoTrueClient {
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AuthenticatedUser>, IdentityError> {
        let mut page = 1;
        loop {
            let users = self.list_users(page).await?;
            let exhausted = users.len() < ADMIN_PAGE_SIZE;

            if let Some(user) = users.into_iter().find(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
            }) {
                return Ok(Some(user));
            }
            if exhausted {
                return Ok(None);
            }
            page += 1;
        }
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, IdentityError> {
        let resp = self
            .http
            .post(self.endpoint("auth/v1/admin/users")?)
            .bearer_auth(&self.service_key)
            .json(&json!({
                "email": email,
                "password": password,
                "email_confirm": true,
            }))
            .send()
            .await
            .map_err(IdentityError::Transport)?;

        Self::check(resp)
            .await?
            .json::<AuthenticatedUser>()
            .await
            .map_err(IdentityError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use uuid::Uuid;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const USER_ID: &str = "6f1c1c5e-8a5e-4b8a-9d0e-6f9b1b0f5a11";
    const SERVICE_KEY: &str = "service-key";

    // Base carries a path prefix so the joins are checked to keep it.
    // Local mock: keep any proxy settings from the environment out of the way.
    fn client(server: &MockServer) -> GoTrueClient {
        let base = Url::parse(&format!("{}/prefix", server.uri())).unwrap();
        GoTrueClient::with_builder(base, SERVICE_KEY, reqwest::Client::builder().no_proxy())
            .unwrap()
    }

    fn users_page(users: Vec<Value>) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({ "users": users }))
    }

    #[tokio::test]
    async fn verify_resolves_a_valid_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/prefix/auth/v1/user"))
            .and(header("apikey", SERVICE_KEY))
            .and(header("authorization", "Bearer good-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": USER_ID,
                "email": "siswa@example.com",
                "user_metadata": { "full_name": "Siti" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client(&server).verify("good-token").await.unwrap();
        assert_eq!(user.id.to_string(), USER_ID);
        assert_eq!(user.metadata_str("full_name"), Some("Siti"));
    }

    #[tokio::test]
    async fn verify_reports_rejection_and_upstream_failures_distinctly() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/prefix/auth/v1/user"))
            .and(header("authorization", "Bearer expired"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/prefix/auth/v1/user"))
            .and(header("authorization", "Bearer broken-upstream"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;
        let client = client(&server);

        let err = client.verify("expired").await.unwrap_err();
        assert!(matches!(err, IdentityError::Rejected { status: 401 }), "{err:?}");

        let err = client.verify("broken-upstream").await.unwrap_err();
        match err {
            IdentityError::Upstream { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "bad gateway");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn admin_lookup_is_case_insensitive() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/prefix/auth/v1/admin/users"))
            .and(header("authorization", "Bearer service-key"))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "100"))
            .respond_with(users_page(vec![
                json!({ "id": USER_ID, "email": "Demo@Student.app" }),
            ]))
            .mount(&server)
            .await;
        let client = client(&server);

        let found = client.find_user_by_email("demo@student.app").await.unwrap();
        assert_eq!(found.map(|u| u.id.to_string()).as_deref(), Some(USER_ID));

        let missing = client.find_user_by_email("nobody@student.app").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn admin_lookup_walks_full_pages() {
        let server = MockServer::start().await;
        let full_page: Vec<Value> = (0..ADMIN_PAGE_SIZE)
            .map(|i| json!({ "id": Uuid::new_v4(), "email": format!("siswa{i}@student.app") }))
            .collect();
        Mock::given(method("GET"))
            .and(path("/prefix/auth/v1/admin/users"))
            .and(query_param("page", "1"))
            .respond_with(users_page(full_page))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/prefix/auth/v1/admin/users"))
            .and(query_param("page", "2"))
            .respond_with(users_page(vec![
                json!({ "id": USER_ID, "email": "demo@student.app" }),
            ]))
            .expect(1)
            .mount(&server)
            .await;

        let found = client(&server)
            .find_user_by_email("demo@student.app")
            .await
            .unwrap();
        assert_eq!(found.map(|u| u.id.to_string()).as_deref(), Some(USER_ID));
    }

    #[tokio::test]
    async fn create_user_confirms_email() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/prefix/auth/v1/admin/users"))
            .and(header("apikey", SERVICE_KEY))
            .and(header("authorization", "Bearer service-key"))
            .and(body_partial_json(json!({
                "email": "demo@student.app",
                "password": "Demo1234!",
                "email_confirm": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "0b7f3a34-3f5e-4c8c-9a57-8f0d0d1d2e3f",
                "email": "demo@student.app"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client(&server)
            .create_user("demo@student.app", "Demo1234!")
            .await
            .unwrap();
        assert_eq!(user.email.as_deref(), Some("demo@student.app"));
    }

    #[test]
    fn invalid_service_key_is_a_config_error() {
        let base = Url::parse("https://project.supabase.co").unwrap();
        let err = GoTrueClient::new(base, "bad\nkey").err().unwrap();
        assert!(matches!(err, IdentityError::Config(_)));
    }
}

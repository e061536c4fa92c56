use async_trait::async_trait;
use axum::http::HeaderMap;

use crate::models::SessionUser;

/// Capability interface over the external authentication service. Identity
/// is never implemented here; the server only asks who is signed in and
/// forwards sign-out.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Resolve the user attached to the request headers, if any.
    async fn current_user(&self, headers: &HeaderMap) -> anyhow::Result<Option<SessionUser>>;

    /// Terminate the session attached to the request headers.
    async fn sign_out(&self, headers: &HeaderMap) -> anyhow::Result<()>;
}

/// Session provider backed by an HTTP service. The caller's credentials are
/// forwarded as-is; no timeout or retry beyond the client defaults.
pub struct HttpSessionProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSessionProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn forwarded_headers(headers: &HeaderMap) -> reqwest::header::HeaderMap {
        let mut forwarded = reqwest::header::HeaderMap::new();

        for name in ["authorization", "cookie"] {
            if let Some(value) = headers.get(name) {
                if let Ok(value) = reqwest::header::HeaderValue::from_bytes(value.as_bytes()) {
                    forwarded.insert(name, value);
                }
            }
        }

        forwarded
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    async fn current_user(&self, headers: &HeaderMap) -> anyhow::Result<Option<SessionUser>> {
        let response = self
            .client
            .get(format!("{}/user", self.base_url))
            .headers(Self::forwarded_headers(headers))
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let user = response.json::<SessionUser>().await?;
        Ok(Some(user))
    }

    async fn sign_out(&self, headers: &HeaderMap) -> anyhow::Result<()> {
        self.client
            .post(format!("{}/logout", self.base_url))
            .headers(Self::forwarded_headers(headers))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

/// Fallback provider used when no session service is configured. Always
/// reports an anonymous visitor.
pub struct NoSession;

#[async_trait]
impl SessionProvider for NoSession {
    async fn current_user(&self, _headers: &HeaderMap) -> anyhow::Result<Option<SessionUser>> {
        Ok(None)
    }

    async fn sign_out(&self, _headers: &HeaderMap) -> anyhow::Result<()> {
        Ok(())
    }
}

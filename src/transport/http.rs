use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::multipart::Form;
use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::ClientConfig;
use crate::error::remote_error_message;
use crate::{Error, Result};

/// Cookie jar that can be atomically replaced, so `logout()` drops ambient
/// cookie credentials without rebuilding the HTTP client.
#[derive(Default)]
struct SwappableJar {
    inner: ArcSwap<Jar>,
}

impl SwappableJar {
    fn reset(&self) {
        self.inner.store(Arc::new(Jar::default()));
    }
}

impl CookieStore for SwappableJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.inner.load().set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.inner.load().cookies(url)
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    jar: Arc<SwappableJar>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::Configuration(format!("invalid base URL {:?}: {e}", config.base_url))
        })?;

        let jar = Arc::new(SwappableJar::default());
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .cookie_provider(jar.clone())
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            jar,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join a fixed endpoint path onto the base host.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Configuration(format!("invalid endpoint {path:?}: {e}")))
    }

    /// Drop all ambient cookie credentials.
    pub fn clear_cookies(&self) {
        self.jar.reset();
    }

    pub async fn get(&self, url: Url, bearer: Option<&str>) -> Result<Value> {
        let request = self.client.get(url.clone());
        self.dispatch(request, &url, bearer).await
    }

    pub async fn post_json(&self, url: Url, body: &Value, bearer: Option<&str>) -> Result<Value> {
        let request = self.client.post(url.clone()).json(body);
        self.dispatch(request, &url, bearer).await
    }

    /// Multipart posts leave Content-Type to reqwest so the boundary is set
    /// correctly.
    pub async fn post_multipart(&self, url: Url, form: Form, bearer: Option<&str>) -> Result<Value> {
        let request = self.client.post(url.clone()).multipart(form);
        self.dispatch(request, &url, bearer).await
    }

    async fn dispatch(
        &self,
        request: RequestBuilder,
        url: &Url,
        bearer: Option<&str>,
    ) -> Result<Value> {
        let mut request = request.header(ACCEPT, "application/json");
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let start = Instant::now();
        let response = request.send().await.map_err(Error::from)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = remote_error_message(status, &body);
            info!(
                http_status = status.as_u16(),
                endpoint = url.path(),
                duration_ms = start.elapsed().as_millis() as u64,
                "mardify request failed"
            );
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }

        debug!(
            http_status = status.as_u16(),
            endpoint = url.path(),
            duration_ms = start.elapsed().as_millis() as u64,
            "mardify request completed"
        );

        let raw = response.text().await.map_err(Error::from)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

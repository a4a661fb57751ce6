//! HTTP client for the admin server
//!
//! One reqwest client with a shared cookie jar; the `session` cookie set by
//! `/admin/login` rides along on every later request.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use reqwest::cookie::{CookieStore, Jar as CookieJar};
use reqwest::multipart;
use reqwest::{Client, header, redirect};
use serde::Serialize;

use crate::features::records::SESSION_EXPIRED;
use crate::features::submission::{
    FieldValue, FormData, Method, RawResponse, SubmissionRequest, Transport, TransportError,
};

const SESSION_COOKIE: &str = "session";

#[derive(Serialize)]
struct LoginCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Clone)]
pub struct AdminClient {
    client: Client,
    cookie_jar: Arc<CookieJar>,
    base_url: Arc<str>,
}

impl fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminClient")
            .field("client", &"<HttpClient>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AdminClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        reqwest::Url::parse(base_url).with_context(|| format!("Invalid server URL: {}", base_url))?;

        let cookie_jar = Arc::new(CookieJar::default());
        // The server answers an expired session with a redirect to the login page
        let client = Client::builder()
            .timeout(timeout)
            .cookie_provider(cookie_jar.clone())
            .redirect(redirect::Policy::none())
            .build()
            .context("Failed to initialize HTTP client")?;

        Ok(Self {
            client,
            cookie_jar,
            base_url: Arc::from(base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a server path; absolute URLs pass through
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Whether the jar holds a session cookie for the server
    pub fn has_session(&self) -> bool {
        let Ok(url) = reqwest::Url::parse(&self.resolve_url("/admin")) else {
            return false;
        };
        self.cookie_jar
            .cookies(&url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
            .map(|cookies| {
                cookies
                    .split(';')
                    .any(|c| c.trim().starts_with(&format!("{}=", SESSION_COOKIE)))
            })
            .unwrap_or(false)
    }

    /// Log in with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let response = self
            .client
            .post(self.resolve_url("/admin/login"))
            .json(&LoginCredentials { email, password })
            .send()
            .await
            .map_err(|e| anyhow!("Request failed: {}", e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            let message = body.trim();
            if message.is_empty() {
                bail!("Login failed ({})", status);
            }
            bail!("{}", message);
        }

        if !self.has_session() {
            tracing::warn!("Login succeeded but no session cookie was set");
        }
        tracing::info!("Logged in as {}", email);
        Ok(())
    }

    /// Fetch the dashboard HTML
    pub async fn fetch_dashboard(&self) -> Result<String> {
        let response = self
            .client
            .get(self.resolve_url("/admin"))
            .header(header::ACCEPT, "text/html")
            .send()
            .await
            .map_err(|e| anyhow!("Request failed: {}", e))?;

        let status = response.status();
        if status.is_redirection() || status == reqwest::StatusCode::UNAUTHORIZED {
            bail!(SESSION_EXPIRED);
        }
        if !status.is_success() {
            bail!("Failed to load dashboard ({})", status);
        }
        response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response: {}", e))
    }

    async fn execute(&self, request: SubmissionRequest) -> Result<RawResponse, TransportError> {
        let url = self.resolve_url(&request.url);
        let mut builder = self.client.request(to_reqwest_method(request.method), url);
        if !request.body.is_empty() {
            builder = builder.multipart(to_multipart(&request.body)?);
        }

        let response = builder.send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.ok();
        tracing::debug!("{} {} -> {}", request.method, request.url, status);
        Ok(RawResponse { status, body })
    }
}

impl Transport for AdminClient {
    fn send(
        &self,
        request: SubmissionRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        let client = self.clone();
        async move { client.execute(request).await }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_multipart(data: &FormData) -> Result<multipart::Form, TransportError> {
    let mut form = multipart::Form::new();
    for (name, value) in data.iter() {
        form = match value {
            FieldValue::Text(text) => form.text(name.to_string(), text.clone()),
            FieldValue::File(file) => {
                let part = multipart::Part::bytes(file.bytes.as_ref().clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime)
                    .map_err(|e| TransportError::Other(format!("invalid MIME type: {}", e)))?;
                form.part(name.to_string(), part)
            }
        };
    }
    Ok(form)
}

fn map_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}

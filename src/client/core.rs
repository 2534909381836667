use std::sync::Arc;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::client::builder::MardifyClientBuilder;
use crate::client::endpoint;
use crate::client::probe::search_candidates;
use crate::session::SessionHandle;
use crate::transport::HttpTransport;
use crate::utils::envelope::{extract_records, MESSAGE_FIELDS, USER_FIELDS};
use crate::{Error, Result};

/// Token fields a successful login response may carry, in precedence order.
const TOKEN_FIELDS: &[&str] = &["token", "accessToken", "auth_token"];

/// Client for the Mardify backend.
///
/// Each call is an independent future with its own deadline; the only
/// multi-attempt behavior is the sequential endpoint probe in
/// [`search_users`](MardifyClient::search_users). Bearer tokens are read from
/// the injected session store before every authenticated request.
#[derive(Clone)]
pub struct MardifyClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) session: SessionHandle,
}

/// Optional photo attached to a profile setup.
#[derive(Debug, Clone)]
pub struct ProfilePhoto {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Result of a successful profile setup: the merged, persisted session user.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub user: Value,
}

impl MardifyClient {
    /// Create a client against the default backend host with an in-memory
    /// session store.
    pub fn new() -> Result<Self> {
        MardifyClientBuilder::new().build()
    }

    pub fn builder() -> MardifyClientBuilder {
        MardifyClientBuilder::new()
    }

    /// Session view shared with the client (token + user persistence).
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Authenticate and persist the session.
    ///
    /// On success the token is taken from the first present, non-empty of
    /// `token`, `accessToken`, `auth_token`; the user object is the response's
    /// `user` field, else the whole body. Both are written to the session
    /// store. Returns the raw response body; errors propagate unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<Value> {
        let url = self.transport.endpoint(endpoint::LOGIN)?;
        let body = json!({ "email": email, "password": password });
        let data = self.transport.post_json(url, &body, None).await?;

        if let Some(token) = extract_token(&data) {
            self.session.save_token(token);
            let user = data.get("user").unwrap_or(&data);
            self.session.save_user(user);
            debug!(email, "login succeeded, session persisted");
        }

        Ok(data)
    }

    /// Direct pass-through registration; no local side effects.
    pub async fn register(&self, user_data: &Value) -> Result<Value> {
        let url = self.transport.endpoint(endpoint::REGISTER)?;
        self.transport.post_json(url, user_data, None).await
    }

    /// Search users by probing the candidate endpoints in order.
    ///
    /// A 404 on a candidate is swallowed and the next one tried; any other
    /// error aborts immediately. A candidate counts as usable once its
    /// response normalizes to an array (bare, or under `users`/`data`/
    /// `results`). Exhaustion fails with the last 404, else a generic
    /// could-not-connect error.
    pub async fn search_users(&self, query: &str) -> Result<Vec<Value>> {
        let token = self.session.token();
        let mut last_err: Option<Error> = None;

        for url in search_candidates(self.transport.base_url(), query) {
            let path = url.path().to_string();
            match self.transport.get(url, token.as_deref()).await {
                Ok(data) => {
                    if let Some(users) = extract_records(&data, USER_FIELDS) {
                        return Ok(users);
                    }
                    debug!(
                        endpoint = path.as_str(),
                        "unrecognized user envelope, trying next candidate"
                    );
                }
                Err(err) if err.is_not_found() => {
                    debug!(
                        endpoint = path.as_str(),
                        "user endpoint not found, trying next candidate"
                    );
                    last_err = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            Error::Network("could not connect to any user search endpoint".to_string())
        }))
    }

    /// Send a chat message.
    ///
    /// Both a non-zero user id and a trimmed, non-empty message are required;
    /// validation failures never reach the network.
    pub async fn send_message(&self, user_id: u64, message: &str) -> Result<Value> {
        let message = message.trim();
        if user_id == 0 {
            return Err(Error::validation("user id is required"));
        }
        if message.is_empty() {
            return Err(Error::validation("message must not be empty"));
        }

        let url = self.transport.endpoint(endpoint::CHAT_SEND)?;
        // The backend expects userId as a decimal string.
        let body = json!({ "userId": user_id.to_string(), "message": message });
        let token = self.session.token();
        self.transport.post_json(url, &body, token.as_deref()).await
    }

    /// Load the live chat feed.
    pub async fn load_chat(&self) -> Result<Vec<Value>> {
        self.fetch_messages(endpoint::CHAT).await
    }

    /// Load the chat history.
    pub async fn load_chat_history(&self) -> Result<Vec<Value>> {
        self.fetch_messages(endpoint::CHAT_HISTORY).await
    }

    async fn fetch_messages(&self, path: &str) -> Result<Vec<Value>> {
        let url = self.transport.endpoint(path)?;
        let token = self.session.token();
        let data = self.transport.get(url, token.as_deref()).await?;
        Ok(extract_records(&data, MESSAGE_FIELDS).unwrap_or_default())
    }

    /// Update display name and optional photo, then merge the server's answer
    /// into the persisted session.
    ///
    /// The multipart body carries `userId` (decimal string), `newName`
    /// (trimmed) and, when given, a `photo` part. The merged session keeps the
    /// existing user as base; server `user` fields override, `display_name`
    /// prefers the server value (falling back to the submitted name) and
    /// `photo_url` is the server value or null.
    pub async fn setup_profile(
        &self,
        user_id: u64,
        new_name: &str,
        photo: Option<ProfilePhoto>,
    ) -> Result<ProfileUpdate> {
        let new_name = new_name.trim();
        if user_id == 0 {
            return Err(Error::validation("user id is required"));
        }
        if new_name.is_empty() {
            return Err(Error::validation("name must not be empty"));
        }

        let mut form = Form::new()
            .text("userId", user_id.to_string())
            .text("newName", new_name.to_string());
        if let Some(photo) = photo {
            let mut part = Part::bytes(photo.data.to_vec()).file_name(photo.file_name);
            if let Some(mime) = &photo.content_type {
                part = part
                    .mime_str(mime)
                    .map_err(|e| Error::validation(format!("invalid photo content type: {e}")))?;
            }
            form = form.part("photo", part);
        }

        let url = self.transport.endpoint(endpoint::PROFILE_SETUP)?;
        let token = self.session.token();
        let data = self.transport.post_multipart(url, form, token.as_deref()).await?;

        if !is_success_payload(&data) {
            let message = data
                .get("error")
                .and_then(Value::as_str)
                .or_else(|| data.get("message").and_then(Value::as_str))
                .unwrap_or("profile update rejected")
                .to_string();
            return Err(Error::Remote { status: 200, message });
        }

        let merged = merge_profile(self.session.user(), data.get("user"), new_name);
        self.session.save_user(&merged);
        info!(user_id, "profile updated, session merged");

        Ok(ProfileUpdate { user: merged })
    }

    /// True iff the session store holds both a user object and a token.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_valid()
    }

    /// Clear the local session and ambient cookie credentials. No network
    /// call; the next request carries neither bearer token nor cookies.
    pub fn logout(&self) {
        self.session.clear();
        self.transport.clear_cookies();
        debug!("session cleared");
    }
}

fn extract_token(data: &Value) -> Option<&str> {
    TOKEN_FIELDS.iter().find_map(|field| {
        data.get(*field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|token| !token.is_empty())
    })
}

fn is_success_payload(data: &Value) -> bool {
    data.get("status").and_then(Value::as_str) == Some("SUCCESS")
        || data.get("success").and_then(Value::as_bool) == Some(true)
}

/// Merge server-returned user fields into the current session user.
fn merge_profile(current: Option<Value>, server_user: Option<&Value>, submitted_name: &str) -> Value {
    let mut merged = match current {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    let server_user = server_user.and_then(Value::as_object);
    if let Some(fields) = server_user {
        for (key, value) in fields {
            merged.insert(key.clone(), value.clone());
        }
    }

    let display_name = server_user
        .and_then(|user| user.get("display_name"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| submitted_name.to_string());
    merged.insert("display_name".to_string(), Value::String(display_name));

    let photo_url = server_user
        .and_then(|user| user.get("photo_url"))
        .filter(|v| !v.is_null() && v.as_str().map_or(true, |s| !s.is_empty()))
        .cloned()
        .unwrap_or(Value::Null);
    merged.insert("photo_url".to_string(), photo_url);

    Value::Object(merged)
}

//! Fixed endpoint paths on the backend host.

pub(crate) const LOGIN: &str = "/api/login";
pub(crate) const REGISTER: &str = "/api/register";
pub(crate) const CHAT_SEND: &str = "/api/chat/send";
pub(crate) const CHAT: &str = "/api/chat";
pub(crate) const CHAT_HISTORY: &str = "/api/chat/history";
pub(crate) const PROFILE_SETUP: &str = "/api/user/setup";

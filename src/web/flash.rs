//! One-shot notification messages carried in a cookie across a redirect.

use axum::http::{HeaderMap, header};

/// Cookie holding the pending message
pub const FLASH_COOKIE: &str = "flash";

/// `Set-Cookie` value storing `message` until the next page view.
#[must_use]
pub fn set_cookie(message: &str) -> String {
    format!(
        "{FLASH_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        urlencoding::encode(message)
    )
}

/// `Set-Cookie` value that expires the message.
#[must_use]
pub fn clear_cookie() -> String {
    format!("{FLASH_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// Reads the pending message from the request's `Cookie` headers, if any.
#[must_use]
pub fn read(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == FLASH_COOKIE)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|message| message.into_owned())
        .filter(|message| !message.is_empty())
}

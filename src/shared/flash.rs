//! One-shot flash messages carried in a cookie.
//!
//! Handlers push a message before redirecting; the next rendered page takes
//! all pending messages and clears the cookie. The cookie value is the JSON
//! list encoded as unpadded base64url so it stays within the cookie charset.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::constants::FLASH_COOKIE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

fn encode(messages: &[FlashMessage]) -> String {
    let json = serde_json::to_vec(messages).unwrap_or_default();
    BASE64_URL_SAFE_NO_PAD.encode(json)
}

fn decode(value: &str) -> Vec<FlashMessage> {
    BASE64_URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

fn flash_cookie(value: String) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Queue a message for the next rendered page.
pub fn push(jar: CookieJar, level: FlashLevel, message: impl Into<String>) -> CookieJar {
    let mut messages = jar
        .get(FLASH_COOKIE)
        .map(|c| decode(c.value()))
        .unwrap_or_default();

    messages.push(FlashMessage {
        level,
        message: message.into(),
    });

    jar.add(flash_cookie(encode(&messages)))
}

/// Take all pending messages and clear the cookie.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<FlashMessage>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, Vec::new());
    };

    let messages = decode(cookie.value());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, messages)
}

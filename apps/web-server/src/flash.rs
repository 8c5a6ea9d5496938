//! Cookie-backed flash notifications.
//!
//! A handler that redirects writes its messages into the flash cookie. The
//! next request reads them through [`IncomingFlash`], and the response that
//! renders them removes the cookie, so every message is shown exactly once.

use std::future::{Ready, ready};

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, HttpResponseBuilder, web};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use quill_shared::FlashMessage;

use crate::state::AppState;

/// Settings of the cookie carrying flash messages between requests.
#[derive(Debug, Clone)]
pub struct FlashCookie {
    pub name: String,
    pub max_age: Duration,
    pub path: String,
    pub same_site: SameSite,
    pub http_only: bool,
}

impl Default for FlashCookie {
    fn default() -> Self {
        Self {
            name: "quill.flash".into(),
            max_age: Duration::seconds(60),
            path: "/".into(),
            same_site: SameSite::Lax,
            http_only: true,
        }
    }
}

impl FlashCookie {
    /// Cookie holding `messages`, JSON encoded then base64url encoded.
    pub fn encode(&self, messages: &[FlashMessage]) -> Cookie<'static> {
        let json = serde_json::to_vec(messages).unwrap_or_default();
        Cookie::build(self.name.clone(), URL_SAFE_NO_PAD.encode(json))
            .max_age(self.max_age)
            .path(self.path.clone())
            .same_site(self.same_site)
            .http_only(self.http_only)
            .finish()
    }

    /// Cookie that makes the browser drop the flash cookie.
    pub fn removal(&self) -> Cookie<'static> {
        Cookie::build(self.name.clone(), "")
            .max_age(Duration::ZERO)
            .path(self.path.clone())
            .same_site(self.same_site)
            .http_only(self.http_only)
            .finish()
    }

    /// Read the messages carried by the request, if any.
    pub fn decode(&self, req: &HttpRequest) -> Vec<FlashMessage> {
        let Some(cookie) = req.cookie(&self.name) else {
            return Vec::new();
        };
        if cookie.value().is_empty() {
            return Vec::new();
        }

        let decoded = URL_SAFE_NO_PAD
            .decode(cookie.value())
            .map_err(|e| e.to_string())
            .and_then(|bytes| serde_json::from_slice(&bytes).map_err(|e| e.to_string()));

        match decoded {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable flash cookie");
                Vec::new()
            }
        }
    }

    /// `303 See Other` to `location`, queueing `message` for the next page.
    pub fn redirect(&self, location: &str, message: FlashMessage) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, location))
            .cookie(self.encode(&[message]))
            .finish()
    }
}

/// Flash messages carried in by the current request.
#[derive(Debug)]
pub struct IncomingFlash {
    messages: Vec<FlashMessage>,
    cookie: FlashCookie,
}

impl IncomingFlash {
    /// Hand the messages to a page being rendered. When there were any, the
    /// response also clears the cookie.
    pub fn drain_into(self, res: &mut HttpResponseBuilder) -> Vec<FlashMessage> {
        if !self.messages.is_empty() {
            res.cookie(self.cookie.removal());
        }
        self.messages
    }
}

impl FromRequest for IncomingFlash {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let cookie = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.flash.clone())
            .unwrap_or_default();
        let messages = cookie.decode(req);

        ready(Ok(IncomingFlash { messages, cookie }))
    }
}

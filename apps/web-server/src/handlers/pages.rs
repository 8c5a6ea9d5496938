//! Public pages: the post list and the contact forms.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tera::Context;

use quill_shared::{ContactForm, ContactVariant, FormErrors};

use crate::flash::IncomingFlash;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::FormView;

#[derive(Serialize)]
struct VariantLink {
    path: &'static str,
    title: &'static str,
}

/// GET /
pub async fn home(state: web::Data<AppState>, flash: IncomingFlash) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all_with_category().await?;
    tracing::debug!(count = posts.len(), "Listing posts");

    let mut context = Context::new();
    context.insert("posts", &posts);
    state
        .templates
        .page("home.html", context, flash, StatusCode::OK)
}

/// GET /contacts-v1, /contacts-v2, /contacts-v3
pub async fn contact_form(
    state: web::Data<AppState>,
    variant: web::Data<ContactVariant>,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    let variant = **variant;
    let links: Vec<VariantLink> = ContactVariant::ALL
        .iter()
        .map(|v| VariantLink {
            path: v.path(),
            title: v.title(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("heading", variant.title());
    context.insert("variants", &links);
    context.insert(
        "form",
        &FormView::new(variant.path(), &ContactForm::default(), &FormErrors::new()),
    );
    state
        .templates
        .page("contact.html", context, flash, StatusCode::OK)
}

/// POST /contacts-v1, /contacts-v2, /contacts-v3
///
/// Every submission is accepted, readable or not. The message itself is
/// dropped; only the notification survives the redirect.
pub async fn contact_submit(
    state: web::Data<AppState>,
    variant: web::Data<ContactVariant>,
    form: Option<web::Form<ContactForm>>,
) -> HttpResponse {
    let variant = **variant;
    match form {
        Some(form) => tracing::info!(
            route = variant.path(),
            has_email = !form.email.is_empty(),
            message_len = form.message.len(),
            "Contact message received"
        ),
        None => tracing::debug!(route = variant.path(), "Contact body was not a form"),
    }

    state.flash.redirect(variant.path(), variant.flash())
}

//! HTTP handlers and route configuration.

mod category;
mod health;
mod pages;
mod post;

#[cfg(test)]
mod tests;

use actix_web::{HttpRequest, HttpResponse, web};

use quill_shared::ContactVariant;

use crate::middleware::error::{AppError, AppResult};

/// Largest urlencoded body accepted. Post bodies have no length rule of
/// their own, so this only guards against runaway uploads.
pub const FORM_LIMIT: usize = 2 * 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .limit(FORM_LIMIT)
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::NotFound(err.to_string()).into()),
    )
    .route("/health", web::get().to(health::health_check))
    .route("/", web::get().to(pages::home));

    // Contact pages share one handler pair; the variant rides along as
    // resource data.
    for variant in ContactVariant::ALL {
        cfg.service(
            web::resource(variant.path())
                .app_data(web::Data::new(variant))
                .route(web::get().to(pages::contact_form))
                .route(web::post().to(pages::contact_submit)),
        );
    }

    cfg.service(
        web::scope("/category")
            .route("", web::get().to(category::index))
            .service(
                web::resource("/create")
                    .route(web::get().to(category::create_form))
                    .route(web::post().to(category::create)),
            )
            .service(
                web::resource("/{id}/edit")
                    .route(web::get().to(category::edit_form))
                    .route(web::post().to(category::edit)),
            ),
    )
    .service(
        web::scope("/post")
            .service(
                web::resource("/create")
                    .route(web::get().to(post::create_form))
                    .route(web::post().to(post::create)),
            )
            .service(
                web::resource("/{id}/edit")
                    .route(web::get().to(post::edit_form))
                    .route(web::post().to(post::edit)),
            ),
    );
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("No page at {}", req.path())))
}

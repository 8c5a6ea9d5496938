//! Category admin handlers.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tera::Context;

use quill_core::DomainError;
use quill_core::domain::{Category, NewCategory};
use quill_shared::{CategoryForm, FlashMessage, FormErrors, FormSchema};

use crate::flash::IncomingFlash;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::FormView;

const LIST_PATH: &str = "/category";
const CREATE_PATH: &str = "/category/create";

fn edit_path(id: i32) -> String {
    format!("/category/{}/edit", id)
}

async fn load(state: &AppState, id: i32) -> AppResult<Category> {
    state.categories.find_by_id(id).await?.ok_or_else(|| {
        AppError::from(DomainError::NotFound {
            entity_type: "Category",
            id,
        })
    })
}

fn render_form(
    state: &AppState,
    flash: IncomingFlash,
    heading: &str,
    form: FormView,
    status: StatusCode,
) -> AppResult<HttpResponse> {
    let mut context = Context::new();
    context.insert("heading", heading);
    context.insert("form", &form);
    state
        .templates
        .page("category/form.html", context, flash, status)
}

/// GET /category
pub async fn index(state: web::Data<AppState>, flash: IncomingFlash) -> AppResult<HttpResponse> {
    let categories = state.categories.find_all().await?;

    let mut context = Context::new();
    context.insert("categories", &categories);
    state
        .templates
        .page("category/index.html", context, flash, StatusCode::OK)
}

/// GET /category/create
pub async fn create_form(
    state: web::Data<AppState>,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    let form = FormView::new(CREATE_PATH, &CategoryForm::default(), &FormErrors::new());
    render_form(&state, flash, "New category", form, StatusCode::OK)
}

/// POST /category/create
pub async fn create(
    state: web::Data<AppState>,
    flash: IncomingFlash,
    body: web::Form<CategoryForm>,
) -> AppResult<HttpResponse> {
    match body.into_inner().check() {
        Ok(form) => {
            let category = state.categories.create(NewCategory::new(form.name)).await?;
            tracing::info!(category_id = category.id, "Category created");

            Ok(state
                .flash
                .redirect(LIST_PATH, FlashMessage::success("Category created.")))
        }
        Err((form, errors)) => {
            tracing::debug!(?errors, "Category form rejected");
            let view = FormView::new(CREATE_PATH, &form, &errors);
            render_form(
                &state,
                flash,
                "New category",
                view,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
    }
}

/// GET /category/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    flash: IncomingFlash,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let category = load(&state, id).await?;

    let form = CategoryForm {
        name: category.name,
    };
    let view = FormView::new(edit_path(id), &form, &FormErrors::new());
    render_form(
        &state,
        flash,
        &format!("Edit category #{}", id),
        view,
        StatusCode::OK,
    )
}

/// POST /category/{id}/edit
///
/// Redirects back to the same edit page, unlike create.
pub async fn edit(
    state: web::Data<AppState>,
    flash: IncomingFlash,
    path: web::Path<i32>,
    body: web::Form<CategoryForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut category = load(&state, id).await?;

    match body.into_inner().check() {
        Ok(form) => {
            category.rename(form.name);
            state.categories.update(category).await?;
            tracing::info!(category_id = id, "Category updated");

            Ok(state
                .flash
                .redirect(&edit_path(id), FlashMessage::success("Category updated.")))
        }
        Err((form, errors)) => {
            tracing::debug!(category_id = id, ?errors, "Category form rejected");
            let view = FormView::new(edit_path(id), &form, &errors);
            render_form(
                &state,
                flash,
                &format!("Edit category #{}", id),
                view,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
    }
}

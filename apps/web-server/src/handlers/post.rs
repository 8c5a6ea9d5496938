//! Post admin handlers.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tera::Context;

use quill_core::DomainError;
use quill_core::domain::{NewPost, Post};
use quill_shared::{FlashMessage, FormErrors, FormSchema, PostForm};

use crate::flash::IncomingFlash;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::FormView;

const CREATE_PATH: &str = "/post/create";
const INVALID_CHOICE: &str = "The selected choice is invalid.";

fn edit_path(id: i32) -> String {
    format!("/post/{}/edit", id)
}

async fn load(state: &AppState, id: i32) -> AppResult<Post> {
    state.posts.find_by_id(id).await?.ok_or_else(|| {
        AppError::from(DomainError::NotFound {
            entity_type: "Post",
            id,
        })
    })
}

/// Run the schema, then check the chosen category exists.
async fn bind(
    state: &AppState,
    form: PostForm,
) -> AppResult<Result<PostForm, (PostForm, FormErrors)>> {
    let (form, mut errors) = match form.check() {
        Ok(form) => (form, FormErrors::new()),
        Err((form, errors)) => (form, errors),
    };

    if errors.get("category").is_empty() {
        let exists = match form.category_id() {
            Some(id) => state.categories.find_by_id(id).await?.is_some(),
            None => false,
        };
        if !exists {
            errors.add("category", INVALID_CHOICE);
        }
    }

    if errors.is_empty() {
        Ok(Ok(form))
    } else {
        Ok(Err((form, errors)))
    }
}

async fn render_form(
    state: &AppState,
    flash: IncomingFlash,
    heading: &str,
    action: String,
    form: &PostForm,
    errors: &FormErrors,
    status: StatusCode,
) -> AppResult<HttpResponse> {
    let choices = state
        .categories
        .find_all()
        .await?
        .into_iter()
        .map(|c| (c.id.to_string(), c.name));
    let view = FormView::new(action, form, errors).with_choices("category", choices);

    let mut context = Context::new();
    context.insert("heading", heading);
    context.insert("form", &view);
    state
        .templates
        .page("post/form.html", context, flash, status)
}

/// GET /post/create
pub async fn create_form(
    state: web::Data<AppState>,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    render_form(
        &state,
        flash,
        "New post",
        CREATE_PATH.to_string(),
        &PostForm::default(),
        &FormErrors::new(),
        StatusCode::OK,
    )
    .await
}

/// POST /post/create
///
/// A stored post sends the admin back to an empty form for the next one.
pub async fn create(
    state: web::Data<AppState>,
    flash: IncomingFlash,
    body: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    match bind(&state, body.into_inner()).await? {
        Ok(form) => {
            let category_id = form.category_id();
            let post = state
                .posts
                .create(NewPost::new(category_id, form.title, form.body))
                .await?;
            tracing::info!(post_id = post.id, category_id = ?category_id, "Post created");

            Ok(state
                .flash
                .redirect(CREATE_PATH, FlashMessage::success("Post created.")))
        }
        Err((form, errors)) => {
            tracing::debug!(?errors, "Post form rejected");
            render_form(
                &state,
                flash,
                "New post",
                CREATE_PATH.to_string(),
                &form,
                &errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
    }
}

/// GET /post/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    flash: IncomingFlash,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = load(&state, id).await?;

    let form = PostForm {
        category: post.category_id.map(|c| c.to_string()).unwrap_or_default(),
        title: post.title,
        body: post.body,
    };
    render_form(
        &state,
        flash,
        &format!("Edit post #{}", id),
        edit_path(id),
        &form,
        &FormErrors::new(),
        StatusCode::OK,
    )
    .await
}

/// POST /post/{id}/edit
pub async fn edit(
    state: web::Data<AppState>,
    flash: IncomingFlash,
    path: web::Path<i32>,
    body: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut post = load(&state, id).await?;

    match bind(&state, body.into_inner()).await? {
        Ok(form) => {
            post.revise(form.category_id(), form.title, form.body);
            state.posts.update(post).await?;
            tracing::info!(post_id = id, "Post updated");

            Ok(state
                .flash
                .redirect(&edit_path(id), FlashMessage::success("Post updated.")))
        }
        Err((form, errors)) => {
            tracing::debug!(post_id = id, ?errors, "Post form rejected");
            render_form(
                &state,
                flash,
                &format!("Edit post #{}", id),
                edit_path(id),
                &form,
                &errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
    }
}

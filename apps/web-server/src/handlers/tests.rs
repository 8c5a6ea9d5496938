use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};

use quill_core::domain::{NewCategory, NewPost};
use quill_shared::FlashLevel;

use crate::flash::FlashCookie;
use crate::state::AppState;
use crate::views::Templates;

use super::{configure_routes, not_found};

fn state() -> AppState {
    AppState::in_memory(
        Arc::new(Templates::new().unwrap()),
        FlashCookie::default(),
    )
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes)
                .default_service(web::to(not_found)),
        )
        .await
    };
}

fn location(res: &ServiceResponse) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn flash_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    let name = FlashCookie::default().name;
    res.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

async fn body_text(res: ServiceResponse) -> String {
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn seed_categories(state: &AppState, names: &[&str]) {
    for name in names {
        state
            .categories
            .create(NewCategory::new(name.to_string()))
            .await
            .unwrap();
    }
}

#[actix_web::test]
async fn test_create_category_redirects_to_list() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/category/create")
        .set_form([("name", "News")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/category");
    assert!(flash_cookie(&res).is_some());

    let all = state.categories.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "News");
}

#[actix_web::test]
async fn test_create_category_rejects_blank_name() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/category/create")
        .set_form([("name", "  ")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(res).await;
    assert!(html.contains("This value should not be blank."));
    assert!(state.categories.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_edit_category_updates_in_place() {
    let state = state();
    seed_categories(&state, &["a", "b", "c", "d", "e"]).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/category/5/edit")
        .set_form([("name", "X")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/category/5/edit");

    let all = state.categories.find_all().await.unwrap();
    assert_eq!(all.len(), 5);
    let edited = state.categories.find_by_id(5).await.unwrap().unwrap();
    assert_eq!(edited.name, "X");
}

#[actix_web::test]
async fn test_edit_category_form_is_prefilled() {
    let state = state();
    seed_categories(&state, &["Releases"]).await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/category/1/edit").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("value=\"Releases\""));
}

#[actix_web::test]
async fn test_edit_missing_category_is_not_found() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/category/3/edit")
        .set_form([("name", "X")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_category_list_shows_every_category() {
    let state = state();
    seed_categories(&state, &["News", "Rust"]).await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/category").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("News"));
    assert!(html.contains("Rust"));
}

#[actix_web::test]
async fn test_create_post_redirects_to_create() {
    let state = state();
    seed_categories(&state, &["News"]).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/post/create")
        .set_form([("category", "1"), ("title", "Hello"), ("body", "World")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/post/create");

    let posts = state.posts.find_all().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].category_id, Some(1));
    assert_eq!(posts[0].title, "Hello");
}

#[actix_web::test]
async fn test_create_post_accepts_long_body() {
    let state = state();
    seed_categories(&state, &["News"]).await;
    let app = app!(state);

    let body = "a".repeat(20_000);
    let req = test::TestRequest::post()
        .uri("/post/create")
        .set_form([("category", "1"), ("title", "Long"), ("body", body.as_str())])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let posts = state.posts.find_all().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].body.len(), 20_000);
}

#[actix_web::test]
async fn test_contact_flash_levels_differ_per_variant() {
    let state = state();
    let app = app!(state);
    let store = FlashCookie::default();

    let mut levels = Vec::new();
    for path in ["/contacts-v1", "/contacts-v2", "/contacts-v3"] {
        let req = test::TestRequest::post().uri(path).to_request();
        let res = test::call_service(&app, req).await;
        let cookie = flash_cookie(&res).unwrap();

        let req = test::TestRequest::get().cookie(cookie).to_http_request();
        let messages = store.decode(&req);
        assert_eq!(messages.len(), 1);
        levels.push(messages[0].level);
    }

    assert_eq!(
        levels,
        [FlashLevel::Success, FlashLevel::Primary, FlashLevel::Info]
    );
}

#[actix_web::test]
async fn test_create_post_requires_a_category() {
    let state = state();
    seed_categories(&state, &["News"]).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/post/create")
        .set_form([("category", ""), ("title", "Hello"), ("body", "World")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(res).await;
    assert!(html.contains("Please select a category."));
    // Submitted values survive the re-render.
    assert!(html.contains("value=\"Hello\""));
    assert!(state.posts.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_create_post_rejects_unknown_category() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/post/create")
        .set_form([("category", "42"), ("title", "Hello"), ("body", "World")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(res).await.contains("The selected choice is invalid."));
    assert!(state.posts.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_create_post_form_lists_categories() {
    let state = state();
    seed_categories(&state, &["News", "Rust"]).await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/post/create").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("select one…"));
    assert!(html.contains("<option value=\"1\">News</option>"));
    assert!(html.contains("<option value=\"2\">Rust</option>"));
}

#[actix_web::test]
async fn test_edit_post_keeps_identity() {
    let state = state();
    seed_categories(&state, &["News", "Rust"]).await;
    state
        .posts
        .create(NewPost::new(Some(1), "Old".to_string(), "Body".to_string()))
        .await
        .unwrap();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/post/1/edit")
        .set_form([("category", "2"), ("title", "New"), ("body", "Body")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/post/1/edit");

    let posts = state.posts.find_all().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, 1);
    assert_eq!(posts[0].title, "New");
    assert_eq!(posts[0].category_id, Some(2));
}

#[actix_web::test]
async fn test_missing_post_is_not_found() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/post/99999/edit").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(body_text(res).await.contains("Post with id 99999 not found"));
}

#[actix_web::test]
async fn test_non_numeric_id_is_not_found() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/category/abc/edit").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_home_lists_every_post() {
    let state = state();
    seed_categories(&state, &["News"]).await;
    for title in ["First", "Second", "Third"] {
        state
            .posts
            .create(NewPost::new(Some(1), title.to_string(), "Body".to_string()))
            .await
            .unwrap();
    }
    let app = app!(state);

    let req = test::TestRequest::get().uri("/").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    let first = html.find("First").unwrap();
    let second = html.find("Second").unwrap();
    let third = html.find("Third").unwrap();
    assert!(first < second && second < third);
}

#[actix_web::test]
async fn test_contacts_accept_any_submission() {
    let state = state();
    let app = app!(state);

    for path in ["/contacts-v1", "/contacts-v2", "/contacts-v3"] {
        // No body at all.
        let req = test::TestRequest::post().uri(path).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), path);
        assert!(flash_cookie(&res).is_some());

        // Invalid email, empty message.
        let req = test::TestRequest::post()
            .uri(path)
            .set_form([("email", "nope"), ("message", "")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), path);
    }

    assert!(state.posts.find_all().await.unwrap().is_empty());
    assert!(state.categories.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_contact_page_renders_form() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/contacts-v2").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("Contact us (v2)"));
    assert!(html.contains("name=\"email\""));
    assert!(html.contains("name=\"message\""));
}

#[actix_web::test]
async fn test_flash_is_shown_once() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/category/create")
        .set_form([("name", "News")])
        .to_request();
    let res = test::call_service(&app, req).await;
    let cookie = flash_cookie(&res).unwrap();

    let req = test::TestRequest::get()
        .uri("/category")
        .cookie(cookie)
        .to_request();
    let res = test::call_service(&app, req).await;

    let removal = flash_cookie(&res).unwrap();
    assert!(removal.value().is_empty());
    assert!(body_text(res).await.contains("Category created."));

    let req = test::TestRequest::get().uri("/category").to_request();
    let res = test::call_service(&app, req).await;
    assert!(!body_text(res).await.contains("Category created."));
}

#[actix_web::test]
async fn test_health_reports_store() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

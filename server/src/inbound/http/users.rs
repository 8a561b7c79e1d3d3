//! User directory route handlers.
//!
//! ```text
//! GET  /             list all users
//! GET  /create       blank creation form
//! POST /create       validate and insert, then redirect to /
//! GET  /update/{id}  form pre-filled from the record
//! POST /update/{id}  validate and replace the record's fields
//! POST /delete/{id}  remove the record (absent id is a no-op)
//! GET  /search       filter by ?name= and ?email=
//! ```
//!
//! Successful mutations answer 303 See Other back to the index; validation
//! failures re-render the form with status 400 and the field errors inline.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, SearchQuery, StoreError, UserId, UserInput, validate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views;

/// Form body for `POST /create` and `POST /update/{id}`.
///
/// Every field defaults to empty so a sparse submission reaches the
/// validator instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub bio: String,
}

impl From<UserForm> for UserInput {
    fn from(form: UserForm) -> Self {
        let UserForm {
            first_name,
            last_name,
            email,
            age,
            bio,
        } = form;
        Self {
            first_name,
            last_name,
            email,
            age,
            bio,
        }
    }
}

/// Query string for `GET /search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub email: Option<String>,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(body)
}

fn invalid_form(body: String) -> HttpResponse {
    HttpResponse::BadRequest()
        .content_type(header::ContentType::html())
        .body(body)
}

fn redirect_to_index() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

fn parse_id(raw: &str) -> Result<UserId, Error> {
    raw.parse().map_err(|_| {
        Error::invalid_request("id must be a positive integer")
            .with_details(json!({ "field": "id", "value": raw }))
    })
}

/// Render the index listing every stored record.
#[get("/")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let store = state.read()?;
    Ok(html(views::user_list_page(store.list())))
}

/// Render an empty creation form.
#[get("/create")]
pub async fn create_form() -> HttpResponse {
    html(views::user_form_page(
        "Create user",
        "/create",
        &UserInput::default(),
        &[],
    ))
}

/// Validate the submission and insert a new record.
#[post("/create")]
pub async fn create_user(
    state: web::Data<HttpState>,
    form: web::Form<UserForm>,
) -> ApiResult<HttpResponse> {
    let input = UserInput::from(form.into_inner());
    match validate(&input) {
        Ok(draft) => {
            let id = state.write()?.add(draft);
            info!(%id, "user created");
            Ok(redirect_to_index())
        }
        Err(errors) => Ok(invalid_form(views::user_form_page(
            "Create user",
            "/create",
            &input,
            &errors,
        ))),
    }
}

/// Render the update form pre-filled from the addressed record.
#[get("/update/{id}")]
pub async fn update_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let store = state.read()?;
    let user = store.get(id).ok_or(StoreError::NotFound(id))?;
    Ok(html(views::user_form_page(
        "Update user",
        &format!("/update/{id}"),
        &UserInput::from(user),
        &[],
    )))
}

/// Validate the submission and replace the record's mutable fields.
#[post("/update/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<UserForm>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let input = UserInput::from(form.into_inner());
    match validate(&input) {
        Ok(draft) => {
            state.write()?.update(id, draft)?;
            info!(%id, "user updated");
            Ok(redirect_to_index())
        }
        Err(errors) => Ok(invalid_form(views::user_form_page(
            "Update user",
            &format!("/update/{id}"),
            &input,
            &errors,
        ))),
    }
}

/// Remove the addressed record; deleting an absent id still redirects.
#[post("/delete/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.write()?.delete(id);
    info!(%id, "user deleted");
    Ok(redirect_to_index())
}

/// Render the records matching the optional name/email criteria.
#[get("/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<HttpResponse> {
    let SearchParams { name, email } = params.into_inner();
    let query = SearchQuery::new(name.as_deref(), email.as_deref());
    let store = state.read()?;
    let matches = store.search(&query);
    Ok(html(views::search_page(
        name.as_deref().unwrap_or_default(),
        email.as_deref().unwrap_or_default(),
        &matches,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    use crate::domain::{UserDraft, UserStore};

    fn form(first: &str, last: &str, email: &str, age: &str, bio: &str) -> UserForm {
        UserForm {
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            age: age.into(),
            bio: bio.into(),
        }
    }

    fn seeded_state() -> web::Data<HttpState> {
        let mut store = UserStore::new();
        store.add(UserDraft {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "j@x.com".into(),
            age: None,
            bio: None,
        });
        store.add(UserDraft {
            first_name: "Amy".into(),
            last_name: "Lee".into(),
            email: "a@x.com".into(),
            age: None,
            bio: None,
        });
        web::Data::new(HttpState::with_store(store))
    }

    fn test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .service(list_users)
            .service(create_form)
            .service(create_user)
            .service(update_form)
            .service(update_user)
            .service(delete_user)
            .service(search_users)
    }

    async fn body_text(res: actix_web::dev::ServiceResponse) -> String {
        let bytes = actix_test::read_body(res).await;
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn location(res: &actix_web::dev::ServiceResponse) -> String {
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .expect("location header")
            .to_owned()
    }

    #[actix_web::test]
    async fn index_renders_an_empty_directory() {
        let app = actix_test::init_service(test_app(web::Data::new(HttpState::new()))).await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_text(res).await.contains("No users found."));
    }

    #[actix_web::test]
    async fn create_redirects_and_the_record_appears_on_the_index() {
        let state = web::Data::new(HttpState::new());
        let app = actix_test::init_service(test_app(state.clone())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/create")
                .set_form(form("Al", "B", "al@b.com", "30", ""))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/");

        let store = state.read().expect("store readable");
        assert_eq!(store.len(), 1);
        let user = &store.list()[0];
        assert_eq!(user.first_name, "Al");
        assert_eq!(user.last_name, "B");
        assert_eq!(user.email, "al@b.com");
        assert_eq!(user.age, Some(30));
        assert_eq!(user.bio, None);
        drop(store);

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        let body = body_text(res).await;
        assert!(body.contains("Al B"));
        assert!(body.contains("al@b.com"));
    }

    #[actix_web::test]
    async fn invalid_create_rerenders_the_form_with_the_errors() {
        let state = web::Data::new(HttpState::new());
        let app = actix_test::init_service(test_app(state.clone())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/create")
                .set_form(form("J0hn", "Doe", "not-an-email", "", ""))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_text(res).await;
        assert!(body.contains("First name must only contain letters."));
        assert!(body.contains("Email must be a valid email address."));
        // Submitted values stay in the form for correction.
        assert!(body.contains("value=\"J0hn\""));

        assert!(state.read().expect("store readable").is_empty());
    }

    #[actix_web::test]
    async fn update_form_is_prefilled_from_the_record() {
        let app = actix_test::init_service(test_app(seeded_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/update/1").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_text(res).await;
        assert!(body.contains("value=\"John\""));
        assert!(body.contains("action=\"/update/1\""));
    }

    #[actix_web::test]
    async fn update_replaces_every_field_and_keeps_the_id() {
        let state = seeded_state();
        let app = actix_test::init_service(test_app(state.clone())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/update/1")
                .set_form(form("Jane", "Roe", "jane@x.com", "", "likes rust"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);

        let store = state.read().expect("store readable");
        let user = store.get(crate::domain::UserId::new(1)).expect("record");
        assert_eq!(user.first_name, "Jane");
        assert_eq!(user.email, "jane@x.com");
        assert_eq!(user.age, None);
        assert_eq!(user.bio.as_deref(), Some("likes rust"));
    }

    #[actix_web::test]
    async fn updating_an_unknown_id_is_not_found() {
        let app = actix_test::init_service(test_app(seeded_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/update/99")
                .set_form(form("Jane", "Roe", "jane@x.com", "", ""))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_form_for_an_unknown_id_is_not_found() {
        let app = actix_test::init_service(test_app(seeded_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/update/99").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case("/update/abc")]
    #[case("/delete/-1")]
    #[actix_web::test]
    async fn non_numeric_ids_are_rejected(#[case] uri: &str) {
        let app = actix_test::init_service(test_app(seeded_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(uri)
                .set_form(UserForm::default())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn delete_removes_the_record_and_redirects() {
        let state = seeded_state();
        let app = actix_test::init_service(test_app(state.clone())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/delete/1").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/");

        let store = state.read().expect("store readable");
        assert_eq!(store.len(), 1);
        assert!(store.get(crate::domain::UserId::new(1)).is_none());
    }

    #[actix_web::test]
    async fn deleting_an_absent_id_still_redirects() {
        let state = seeded_state();
        let app = actix_test::init_service(test_app(state.clone())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/delete/99").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(state.read().expect("store readable").len(), 2);
    }

    #[actix_web::test]
    async fn search_filters_by_name_substring() {
        let app = actix_test::init_service(test_app(seeded_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/search?name=jo&email=")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_text(res).await;
        assert!(body.contains("John Doe"));
        assert!(!body.contains("Amy Lee"));
    }

    #[actix_web::test]
    async fn search_without_criteria_lists_everyone() {
        let app = actix_test::init_service(test_app(seeded_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/search").to_request(),
        )
        .await;
        let body = body_text(res).await;
        assert!(body.contains("John Doe"));
        assert!(body.contains("Amy Lee"));
    }
}

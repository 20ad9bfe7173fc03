//! JSON REST handlers for accounts.
//!
//! Every handler runs the Content-Type guard before touching the request,
//! including the bodiless list, read and delete endpoints.

use std::str::FromStr;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use accounts_app::ports::AccountRepository;
use accounts_domain::account::{Account, AccountPatch};
use accounts_domain::error::{AccountsError, NotFoundError};
use accounts_domain::id::AccountId;

use crate::content_type::{APPLICATION_JSON, check_content_type};
use crate::error::ApiError;
use crate::state::AppState;

/// Body of the list endpoint.
#[derive(Serialize)]
pub struct AccountList {
    pub account_list: Vec<Account>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<AccountList>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Account>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    /// Carries a `Location` header pointing at the new account.
    Created(Account),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(account) => {
                let location = format!("/accounts/{}", account.id);
                (StatusCode::CREATED, [(LOCATION, location)], Json(account)).into_response()
            }
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// A path id that is not an integer cannot name an account.
fn parse_account_id(raw: &str) -> Result<AccountId, ApiError> {
    AccountId::from_str(raw).map_err(|_| {
        ApiError::from(AccountsError::from(NotFoundError {
            entity: "Account",
            id: raw.to_string(),
        }))
    })
}

/// `POST /accounts`
pub async fn create<AR>(
    State(state): State<AppState<AR>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<CreateResponse, ApiError>
where
    AR: AccountRepository + Send + Sync + 'static,
{
    tracing::info!("Request to create an Account");
    check_content_type(&headers, APPLICATION_JSON)?;

    let fields = AccountPatch::from_json(&body)?.into_fields()?;
    let created = state.account_service.create_account(fields).await?;
    Ok(CreateResponse::Created(created))
}

/// `GET /accounts`
pub async fn list<AR>(
    State(state): State<AppState<AR>>,
    headers: HeaderMap,
) -> Result<ListResponse, ApiError>
where
    AR: AccountRepository + Send + Sync + 'static,
{
    tracing::info!("Request to retrieve account list");
    check_content_type(&headers, APPLICATION_JSON)?;

    let account_list = state.account_service.list_accounts().await?;
    Ok(ListResponse::Ok(Json(AccountList { account_list })))
}

/// `GET /accounts/:account_id`
pub async fn get<AR>(
    State(state): State<AppState<AR>>,
    Path(account_id): Path<String>,
    headers: HeaderMap,
) -> Result<GetResponse, ApiError>
where
    AR: AccountRepository + Send + Sync + 'static,
{
    tracing::info!(%account_id, "Request to retrieve specific account");
    check_content_type(&headers, APPLICATION_JSON)?;

    let id = parse_account_id(&account_id)?;
    let account = state.account_service.get_account(id).await?;
    Ok(GetResponse::Ok(Json(account)))
}

/// `PUT /accounts/:account_id`
pub async fn update<AR>(
    State(state): State<AppState<AR>>,
    Path(account_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<GetResponse, ApiError>
where
    AR: AccountRepository + Send + Sync + 'static,
{
    tracing::info!(%account_id, "Request to update specific account");
    check_content_type(&headers, APPLICATION_JSON)?;

    let id = parse_account_id(&account_id)?;
    let updated = state.account_service.update_account(id, &body).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /accounts/:account_id`
pub async fn delete<AR>(
    State(state): State<AppState<AR>>,
    Path(account_id): Path<String>,
    headers: HeaderMap,
) -> Result<DeleteResponse, ApiError>
where
    AR: AccountRepository + Send + Sync + 'static,
{
    tracing::info!(%account_id, "Request to delete specific account");
    check_content_type(&headers, APPLICATION_JSON)?;

    let id = parse_account_id(&account_id)?;
    state.account_service.delete_account(id).await?;
    Ok(DeleteResponse::NoContent)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use axum::Router;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use accounts_app::services::account_service::AccountService;
    use accounts_domain::account::AccountFields;

    use super::*;

    #[derive(Default)]
    struct InMemoryAccountRepo {
        store: Mutex<BTreeMap<AccountId, Account>>,
    }

    impl AccountRepository for InMemoryAccountRepo {
        async fn create(&self, fields: AccountFields) -> Result<Account, AccountsError> {
            let mut store = self.store.lock().unwrap();
            let next = store.keys().next_back().map_or(1, |id| id.as_i64() + 1);
            let account = Account::new(AccountId::from_raw(next), fields);
            store.insert(account.id, account.clone());
            Ok(account)
        }

        async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountsError> {
            Ok(self.store.lock().unwrap().get(&id).cloned())
        }

        async fn get_all(&self) -> Result<Vec<Account>, AccountsError> {
            Ok(self.store.lock().unwrap().values().cloned().collect())
        }

        async fn update(&self, account: Account) -> Result<Account, AccountsError> {
            self.store
                .lock()
                .unwrap()
                .insert(account.id, account.clone());
            Ok(account)
        }

        async fn delete(&self, id: AccountId) -> Result<(), AccountsError> {
            self.store.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    fn app() -> Router {
        let state = AppState::new(AccountService::new(InMemoryAccountRepo::default()));
        crate::router::build(state)
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        match body {
            Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    fn alice() -> Value {
        json!({
            "name": "Alice",
            "email": "alice@example.com",
            "address": "1 Main St",
            "phone_number": "555-0100",
            "date_joined": "2024-01-15"
        })
    }

    #[tokio::test]
    async fn should_create_account_with_location_header() {
        let app = app();

        let (status, headers, body) = send(&app, request("POST", "/accounts", Some(alice()))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["id"], 1);
        assert_eq!(headers[LOCATION], "/accounts/1");
    }

    #[tokio::test]
    async fn should_reject_create_without_json_content_type() {
        let app = app();
        let req = Request::builder()
            .method("POST")
            .uri("/accounts")
            .header("content-type", "text/html")
            .body(Body::from(alice().to_string()))
            .unwrap();

        let (status, _, body) = send(&app, req).await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["message"], "Content-Type must be application/json");
    }

    #[tokio::test]
    async fn should_return_bad_request_for_malformed_body() {
        let app = app();
        let req = Request::builder()
            .method("POST")
            .uri("/accounts")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();

        let (status, _, body) = send(&app, req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_required_field_missing() {
        let app = app();
        let (status, _, body) = send(
            &app,
            request("POST", "/accounts", Some(json!({"name": "Alice"}))),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid Account: missing email");
    }

    #[tokio::test]
    async fn should_list_created_accounts() {
        let app = app();
        for _ in 0..3 {
            send(&app, request("POST", "/accounts", Some(alice()))).await;
        }

        let (status, _, body) = send(&app, request("GET", "/accounts", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["account_list"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn should_read_account_by_id() {
        let app = app();
        let (_, _, created) = send(&app, request("POST", "/accounts", Some(alice()))).await;

        let (status, _, body) = send(&app, request("GET", "/accounts/1", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created);
    }

    #[tokio::test]
    async fn should_return_not_found_with_id_in_message() {
        let app = app();

        let (status, _, body) = send(&app, request("GET", "/accounts/0", None)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Account with ID 0 not found");
    }

    #[tokio::test]
    async fn should_return_not_found_for_non_integer_id() {
        let app = app();

        for method in ["GET", "PUT", "DELETE"] {
            let body = (method == "PUT").then(alice);
            let (status, _, resp) = send(&app, request(method, "/accounts/abc", body)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
            assert_eq!(resp["message"], "Account with ID abc not found");
        }
    }

    #[tokio::test]
    async fn should_return_not_found_for_non_canonical_id() {
        let app = app();
        send(&app, request("POST", "/accounts", Some(alice()))).await;

        for raw in ["+1", "01"] {
            let uri = format!("/accounts/{raw}");
            let (status, _, resp) = send(&app, request("GET", &uri, None)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{raw}");
            assert_eq!(resp["message"], format!("Account with ID {raw} not found"));
        }
    }

    #[tokio::test]
    async fn should_return_not_found_before_parsing_update_body() {
        let app = app();
        let req = Request::builder()
            .method("PUT")
            .uri("/accounts/7")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();

        let (status, _, body) = send(&app, req).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Account with ID 7 not found");
    }

    #[tokio::test]
    async fn should_update_account_partially() {
        let app = app();
        send(&app, request("POST", "/accounts", Some(alice()))).await;

        let (status, _, body) = send(
            &app,
            request("PUT", "/accounts/1", Some(json!({"name": "Alicia", "id": 99}))),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Alicia");
        assert_eq!(body["email"], "alice@example.com");
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_account() {
        let app = app();
        let (status, _, _) = send(&app, request("PUT", "/accounts/7", Some(alice()))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_delete_account_then_return_not_found() {
        let app = app();
        send(&app, request("POST", "/accounts", Some(alice()))).await;

        let (status, _, body) = send(&app, request("DELETE", "/accounts/1", None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _, _) = send(&app, request("DELETE", "/accounts/1", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_enforce_content_type_on_every_account_route() {
        let app = app();
        for (method, uri) in [
            ("GET", "/accounts"),
            ("POST", "/accounts"),
            ("GET", "/accounts/1"),
            ("PUT", "/accounts/1"),
            ("DELETE", "/accounts/1"),
        ] {
            let req = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let (status, _, _) = send(&app, req).await;
            assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE, "{method} {uri}");
        }
    }
}

//! Book store service: an ordered list of book names behind a REST surface.
//!
//! # Design
//! - `app()` builds a router over a fresh `BookStore`; `app_with_store` lets
//!   tests share a store with the router.
//! - `book_name` arrives in the query string (`?book_name=Dune`). A JSON body
//!   `{"book_name": "..."}` is accepted when the query does not carry one.

pub mod error;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request, State},
    http::request::Parts,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;
use utoipa::{IntoParams, OpenApi, ToSchema};

pub use error::{BookError, ErrorBody};
pub use store::BookStore;

pub type SharedStore = Arc<BookStore>;

/// `GET /books` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookList {
    pub books: Vec<String>,
}

/// `GET /books/{index}` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookEntry {
    pub book: String,
}

/// Confirmation returned by create, update and delete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookChange {
    pub message: String,
    pub book: String,
}

impl BookChange {
    fn new(message: &str, book: String) -> Self {
        Self {
            message: message.to_string(),
            book,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookNameParams {
    /// Name of the book to store.
    pub book_name: String,
}

/// The `book_name` input of create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookName(pub String);

impl<S> FromRequest<S> for BookName
where
    S: Send + Sync,
{
    type Rejection = BookError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if let Ok(Query(params)) = Query::<BookNameParams>::try_from_uri(req.uri()) {
            return Ok(Self(params.book_name));
        }
        let Json(params) = Json::<BookNameParams>::from_request(req, state)
            .await
            .map_err(|rejection| BookError::MissingBookName(rejection.body_text()))?;
        Ok(Self(params.book_name))
    }
}

/// The `{index}` path segment. Rejects non-integers with a JSON 422.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookIndex(pub i64);

impl<S> FromRequestParts<S> for BookIndex
where
    S: Send + Sync,
{
    type Rejection = BookError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(index) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| BookError::InvalidIndex(rejection.body_text()))?;
        Ok(Self(index))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(greet, list_books, get_book, create_book, update_book, delete_book),
    components(schemas(BookList, BookEntry, BookChange, ErrorBody)),
    tags((name = "books", description = "Ordered list of book names"))
)]
pub struct ApiDoc;

pub fn app() -> Router {
    app_with_store(Arc::new(BookStore::new()))
}

pub fn app_with_store(store: SharedStore) -> Router {
    let routes = Router::new()
        .route("/", get(greet))
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{index}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(store)
        .merge(svc_core::http::docs_router(ApiDoc::openapi()));
    svc_core::http::with_tracing(routes)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    svc_core::http::serve(listener, app()).await
}

#[utoipa::path(get, path = "/", responses((status = 200, description = "Greeting", body = String)))]
async fn greet() -> Json<&'static str> {
    Json("Hello")
}

#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses((status = 200, description = "All books in order", body = BookList))
)]
async fn list_books(State(store): State<SharedStore>) -> Json<BookList> {
    Json(BookList {
        books: store.list().await,
    })
}

#[utoipa::path(
    get,
    path = "/books/{index}",
    tag = "books",
    params(("index" = i64, Path, description = "0-based position; negative values count from the end")),
    responses(
        (status = 200, description = "Book at that index", body = BookEntry),
        (status = 404, description = "No book at that index", body = ErrorBody),
        (status = 422, description = "Index is not an integer", body = ErrorBody)
    )
)]
async fn get_book(
    State(store): State<SharedStore>,
    BookIndex(index): BookIndex,
) -> Result<Json<BookEntry>, BookError> {
    let book = store.get(index).await?;
    Ok(Json(BookEntry { book }))
}

#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    params(BookNameParams),
    responses(
        (status = 200, description = "Book appended", body = BookChange),
        (status = 422, description = "book_name missing", body = ErrorBody)
    )
)]
async fn create_book(
    State(store): State<SharedStore>,
    BookName(name): BookName,
) -> Json<BookChange> {
    let index = store.create(name.clone()).await;
    info!(index, book = %name, "book added");
    Json(BookChange::new("Book added", name))
}

#[utoipa::path(
    put,
    path = "/books/{index}",
    tag = "books",
    params(("index" = i64, Path, description = "0-based position; negative values count from the end"), BookNameParams),
    responses(
        (status = 200, description = "Book replaced", body = BookChange),
        (status = 404, description = "No book at that index", body = ErrorBody),
        (status = 422, description = "book_name missing or index not an integer", body = ErrorBody)
    )
)]
async fn update_book(
    State(store): State<SharedStore>,
    BookIndex(index): BookIndex,
    BookName(name): BookName,
) -> Result<Json<BookChange>, BookError> {
    let previous = store.update(index, name.clone()).await?;
    info!(index, book = %name, %previous, "book updated");
    Ok(Json(BookChange::new("Book updated", name)))
}

#[utoipa::path(
    delete,
    path = "/books/{index}",
    tag = "books",
    params(("index" = i64, Path, description = "0-based position; negative values count from the end")),
    responses(
        (status = 200, description = "Book removed; later indices shift down", body = BookChange),
        (status = 404, description = "No book at that index", body = ErrorBody),
        (status = 422, description = "Index is not an integer", body = ErrorBody)
    )
)]
async fn delete_book(
    State(store): State<SharedStore>,
    BookIndex(index): BookIndex,
) -> Result<Json<BookChange>, BookError> {
    let removed = store.delete(index).await?;
    info!(index, book = %removed, "book deleted");
    Ok(Json(BookChange::new("Book deleted", removed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_change_serializes_message_then_book() {
        let change = BookChange::new("Book added", "Dune".to_string());
        let json = serde_json::to_string(&change).unwrap();
        assert_eq!(json, r#"{"message":"Book added","book":"Dune"}"#);
    }

    #[test]
    fn book_list_wraps_under_books_key() {
        let list = BookList {
            books: vec!["a".into(), "b".into()],
        };
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json, serde_json::json!({"books": ["a", "b"]}));
    }

    #[test]
    fn book_name_params_require_the_field() {
        let result: Result<BookNameParams, _> = serde_json::from_str(r#"{"title":"Dune"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/"));
        assert!(paths.contains_key("/books"));
        assert!(paths.contains_key("/books/{index}"));
        let item = &paths["/books/{index}"];
        assert!(item.get("get").is_some());
        assert!(item.get("put").is_some());
        assert!(item.get("delete").is_some());
    }
}

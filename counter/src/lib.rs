//! Counter service: one signed integer behind increment, decrement and read.
//!
//! # Design
//! The value is an `AtomicI64`, so concurrent increments never lose updates.
//! There is no floor; overflow wraps like `fetch_add` does.

use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicI64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one and return the new value.
    pub fn increment(&self) -> i64 {
        self.value.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }

    /// Subtract one and return the new value.
    pub fn decrement(&self) -> i64 {
        self.value.fetch_sub(1, Ordering::SeqCst).wrapping_sub(1)
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }
}

pub type SharedCounter = Arc<Counter>;

/// Body of every counter response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CounterValue {
    pub counter: i64,
}

#[derive(OpenApi)]
#[openapi(
    paths(increment, decrement, get_counter),
    components(schemas(CounterValue)),
    tags((name = "counter", description = "Single shared integer"))
)]
pub struct ApiDoc;

pub fn app() -> Router {
    app_with_counter(Arc::new(Counter::new()))
}

pub fn app_with_counter(counter: SharedCounter) -> Router {
    let routes = Router::new()
        .route("/increment", post(increment))
        .route("/decrement", post(decrement))
        .route("/counter", get(get_counter))
        .with_state(counter)
        .merge(svc_core::http::docs_router(ApiDoc::openapi()));
    svc_core::http::with_tracing(routes)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    svc_core::http::serve(listener, app()).await
}

#[utoipa::path(
    post,
    path = "/increment",
    tag = "counter",
    responses((status = 200, description = "Value after adding one", body = CounterValue))
)]
async fn increment(State(counter): State<SharedCounter>) -> Json<CounterValue> {
    let value = counter.increment();
    info!(counter = value, "incremented");
    Json(CounterValue { counter: value })
}

#[utoipa::path(
    post,
    path = "/decrement",
    tag = "counter",
    responses((status = 200, description = "Value after subtracting one", body = CounterValue))
)]
async fn decrement(State(counter): State<SharedCounter>) -> Json<CounterValue> {
    let value = counter.decrement();
    info!(counter = value, "decremented");
    Json(CounterValue { counter: value })
}

#[utoipa::path(
    get,
    path = "/counter",
    tag = "counter",
    responses((status = 200, description = "Current value", body = CounterValue))
)]
async fn get_counter(State(counter): State<SharedCounter>) -> Json<CounterValue> {
    Json(CounterValue {
        counter: counter.get(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(Counter::new().get(), 0);
    }

    #[test]
    fn three_up_one_down_is_two() {
        let counter = Counter::new();
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.increment(), 3);
        assert_eq!(counter.decrement(), 2);
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn decrement_has_no_floor() {
        let counter = Counter::new();
        assert_eq!(counter.decrement(), -1);
        assert_eq!(counter.decrement(), -2);
    }

    #[test]
    fn get_does_not_mutate() {
        let counter = Counter::new();
        counter.increment();
        assert_eq!(counter.get(), 1);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn overflow_wraps() {
        let counter = Counter {
            value: AtomicI64::new(i64::MAX),
        };
        assert_eq!(counter.increment(), i64::MIN);
        assert_eq!(counter.decrement(), i64::MAX);
    }

    #[test]
    fn counter_value_serializes_under_counter_key() {
        let json = serde_json::to_string(&CounterValue { counter: -3 }).unwrap();
        assert_eq!(json, r#"{"counter":-3}"#);
    }
}

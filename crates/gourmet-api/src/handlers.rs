//! HTTP handlers for the place directory API.
//!
//! Implements:
//! - GET /get_places - list places, optionally filtered by type
//! - POST /query_menu - menu lookup by place name
//! - POST /create_place - register a new place
//! - PUT /update_menu - replace a place's menu
//! - DELETE /delete_place - remove a place
//! - POST /random_place - pick one place of a type at random
//! - GET / and GET /health - liveness endpoints

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use gourmet_store_core::{MenuItem, MenuQuery, NewPlace, Place, PlaceStore};

use crate::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlaceStore>,
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/get_places", get(get_places))
        .route("/query_menu", post(query_menu))
        .route("/create_place", post(create_place))
        .route("/update_menu", put(update_menu))
        .route("/delete_place", delete(delete_place))
        .route("/random_place", post(random_place))
        .with_state(state)
}

/// Query parameters for place listing.
#[derive(Deserialize)]
pub struct ListParams {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Request body naming a place.
#[derive(Deserialize)]
pub struct PlaceName {
    place_name: String,
}

/// Request body for replacing a menu.
#[derive(Deserialize)]
pub struct UpdateMenuBody {
    place_name: String,
    updated_menu: Vec<MenuItem>,
}

/// Request body for the random pick.
#[derive(Deserialize)]
pub struct PlaceKind {
    #[serde(rename = "type")]
    kind: String,
}

/// GET / - root liveness message.
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "API Server running normally." }))
}

/// GET /health - health check endpoint.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /get_places - list all places, optionally filtered by `type`.
pub async fn get_places(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Place>>, ApiError> {
    let places = state.store.list(params.kind.as_deref()).await?;
    Ok(Json(places))
}

/// POST /query_menu - look up a place's menu by name.
///
/// An unknown name is a soft failure: the response reports the place as
/// not registered instead of erroring the request.
pub async fn query_menu(
    State(state): State<AppState>,
    Json(body): Json<PlaceName>,
) -> Result<Json<Value>, ApiError> {
    require_non_empty("place_name", &body.place_name)?;

    match state.store.find_menu(&body.place_name).await? {
        MenuQuery::Found(menu) => Ok(Json(json!({ "menu": menu }))),
        MenuQuery::NotRegistered => Ok(Json(json!({ "status": "not registered" }))),
    }
}

/// POST /create_place - register a new place.
pub async fn create_place(
    State(state): State<AppState>,
    Json(body): Json<NewPlace>,
) -> Result<Json<Value>, ApiError> {
    require_non_empty("name", &body.name)?;
    require_non_empty("type", &body.kind)?;

    let place = state.store.create(body).await?;
    Ok(Json(json!({
        "message": "Place created successfully",
        "new_place": place,
    })))
}

/// PUT /update_menu - replace a place's menu wholesale.
pub async fn update_menu(
    State(state): State<AppState>,
    Json(body): Json<UpdateMenuBody>,
) -> Result<Json<Value>, ApiError> {
    require_non_empty("place_name", &body.place_name)?;

    state
        .store
        .update_menu(&body.place_name, body.updated_menu)
        .await?;
    Ok(Json(json!({ "message": "Menu updated successfully" })))
}

/// DELETE /delete_place - remove a place by name.
pub async fn delete_place(
    State(state): State<AppState>,
    Json(body): Json<PlaceName>,
) -> Result<Json<Value>, ApiError> {
    require_non_empty("place_name", &body.place_name)?;

    state.store.delete(&body.place_name).await?;
    Ok(Json(json!({ "message": "Place deleted successfully" })))
}

/// POST /random_place - pick one place of the given type at random.
pub async fn random_place(
    State(state): State<AppState>,
    Json(body): Json<PlaceKind>,
) -> Result<Json<Value>, ApiError> {
    require_non_empty("type", &body.kind)?;

    let place = state.store.pick_random(&body.kind).await?;
    Ok(Json(json!({ "random_place": place })))
}

/// Reject blank required fields before they reach the store.
fn require_non_empty(field: &'static str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidArgument(format!("{} is required", field)));
    }
    Ok(())
}

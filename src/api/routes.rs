use log::{error, warn};
use polars::frame::DataFrame;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{reject, Filter, Rejection, Reply};

use crate::api::callbacks::CallbackRegistry;
use crate::api::layout::app_layout;
use crate::api::models::{Component, ErrorMessage, UpdateRequest};
use crate::core_logic::aggregations::distinct_years;
use crate::error::DashboardError;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug)]
pub struct InternalServerError;

impl reject::Reject for InternalServerError {}

#[derive(Debug)]
pub struct UnknownOutput(pub String);

impl reject::Reject for UnknownOutput {}

/// Everything the handlers read. Built once at startup and never written again.
pub struct AppState {
    pub df: DataFrame,
    pub layout: Component,
    pub registry: CallbackRegistry,
}

impl AppState {
    pub fn new(df: DataFrame) -> Result<Self, DashboardError> {
        let years = distinct_years(&df)?;
        Ok(AppState {
            layout: app_layout(&years),
            registry: CallbackRegistry::dashboard(),
            df,
        })
    }
}

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&state))
}

pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let index_route = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_HTML));

    let layout_route = warp::path("_dash-layout")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(Arc::clone(&state)))
        .map(|state: Arc<AppState>| warp::reply::json(&state.layout));

    let dependencies_route = warp::path("_dash-dependencies")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(Arc::clone(&state)))
        .map(|state: Arc<AppState>| warp::reply::json(&state.registry.dependencies()));

    let update_route = warp::path("_dash-update-component")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state))
        .and_then(update_component);

    index_route
        .or(layout_route)
        .or(dependencies_route)
        .or(update_route)
        .recover(handle_rejection)
}

async fn update_component(
    request: UpdateRequest,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    match state.registry.dispatch(&state.df, &request) {
        Ok(response) => Ok(warp::reply::json(&response)),
        Err(DashboardError::UnknownOutput(output)) => {
            Err(warp::reject::custom(UnknownOutput(output)))
        }
        Err(err) => {
            error!("Callback for {} failed: {}", request.output, err);
            Err(warp::reject::custom(InternalServerError))
        }
    }
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(UnknownOutput(output)) = err.find::<UnknownOutput>() {
        (
            StatusCode::NOT_FOUND,
            format!("No callback registered for output `{}`", output),
        )
    } else if let Some(body_err) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, body_err.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else if err.find::<InternalServerError>().is_some() {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Callback failed".to_string(),
        )
    } else {
        warn!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unhandled rejection".to_string(),
        )
    };

    let body = warp::reply::json(&ErrorMessage {
        code: code.as_u16(),
        message,
    });
    Ok(warp::reply::with_status(body, code))
}

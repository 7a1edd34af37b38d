use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{analytics, event, health, join, location, rating, wine};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Organizer: events
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))
        .route("/api/v1/events/{event_id}/restore", post(event::restore_event))

        // Organizer: wines & crawl locations
        .route("/api/v1/events/{event_id}/wines", post(wine::create_wine).get(wine::list_wines))
        .route("/api/v1/events/{event_id}/wines/{wine_id}", get(wine::get_wine).put(wine::update_wine).delete(wine::delete_wine))
        .route("/api/v1/events/{event_id}/locations", post(location::create_location).get(location::list_locations))
        .route("/api/v1/events/{event_id}/locations/{location_id}", put(location::update_location).delete(location::delete_location))

        // Participant flow
        .route("/api/v1/booth/{code}", get(join::detect_booth))
        .route("/api/v1/join", post(join::join_event))
        .route("/api/v1/events/{event_id}/ratings", post(rating::create_rating).get(rating::list_ratings))

        // Analytics
        .route("/api/v1/events/{event_id}/analytics", get(analytics::get_event_analytics))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}

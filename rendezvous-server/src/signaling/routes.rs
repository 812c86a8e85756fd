use crate::signaling::AppState;
use crate::signaling::handlers;
use axum::Router;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

/// Builds the signaling API. `cors` opens it to browsers on any origin.
pub fn router(state: AppState, cors: bool) -> Router {
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/ice-servers", get(handlers::ice_servers))
        .route("/get-rooms", get(handlers::list_rooms))
        .route("/create-room", post(handlers::create_room))
        .route("/create-simple-room", post(handlers::create_simple_room))
        .route("/update-room", post(handlers::update_room))
        .route("/delete-room", post(handlers::delete_room))
        .route("/add-peer", post(handlers::add_peer))
        .route("/get-slot", post(handlers::get_slot))
        .route("/add-offer-candidates", post(handlers::add_offer_candidates))
        .route("/get-peers", post(handlers::get_peers))
        .route("/set-answer", post(handlers::set_answer))
        .route("/get-answer", post(handlers::get_answer))
        .route("/remove-peer", post(handlers::remove_peer))
        .with_state(state);

    if !cors {
        return app;
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    app.layer(cors)
}

//! Booking endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::db::BookingRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{Booking, NewBooking};

/// GET /api/bookings - list all bookings, ordered by id
async fn list_bookings(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings = BookingRepo::new(&state.pool).list().await?;
    Ok(Json(bookings))
}

/// POST /api/bookings - create a booking
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    req.validate()?;
    let booking = BookingRepo::new(&state.pool).create(&req).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/bookings/{id} - get a single booking
async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, ApiError> {
    let booking = BookingRepo::new(&state.pool).get(id).await?;
    Ok(Json(booking))
}

/// PUT /api/bookings/{id} - full-record replace
async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<NewBooking>,
) -> Result<Json<Booking>, ApiError> {
    req.validate()?;
    let booking = BookingRepo::new(&state.pool).update(id, &req).await?;
    Ok(Json(booking))
}

/// DELETE /api/bookings/{id} - physical delete
async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    BookingRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Booking routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route(
            "/bookings/{id}",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
}

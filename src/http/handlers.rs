use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use crate::domain::accommodation::{Accommodation, NewAccommodation};
use crate::error::Result;
use crate::http::dto::{
    CreateAccommodationRequest, DeletedDto, IdsRequest, RatingRequest, parse_search_query,
};
use crate::http::router::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `GET /api/accommodations/search`
pub async fn search(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Accommodation>>> {
    let criteria = parse_search_query(query.as_deref())?;
    let results = state.search.search(&criteria).await?;
    Ok(Json(results))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateAccommodationRequest>,
) -> Result<impl IntoResponse> {
    let (input, image) = request.into_parts()?;
    let created = state.accommodations.create(input, image).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Accommodation>>> {
    Ok(Json(state.accommodations.get_all().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Accommodation>> {
    Ok(Json(state.accommodations.get_by_id(&id).await?))
}

pub async fn find_by_ids(
    State(state): State<AppState>,
    Json(request): Json<IdsRequest>,
) -> Result<Json<Vec<Accommodation>>> {
    Ok(Json(state.accommodations.find_by_ids(&request.ids).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<NewAccommodation>,
) -> Result<Json<Accommodation>> {
    Ok(Json(state.accommodations.update(&id, input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Accommodation>> {
    Ok(Json(state.accommodations.delete(&id).await?))
}

pub async fn delete_by_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<DeletedDto>> {
    let deleted = state.accommodations.delete_by_owner(&owner_id).await?;
    Ok(Json(DeletedDto { deleted }))
}

pub async fn update_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RatingRequest>,
) -> Result<StatusCode> {
    state
        .accommodations
        .update_rating(&id, request.rating)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<impl IntoResponse> {
    let bytes = state.accommodations.get_image(&image_id).await?;
    let content_type = sniff_content_type(&bytes);
    Ok(([(header::CONTENT_TYPE, content_type)], Bytes::from_owner(bytes)))
}

fn sniff_content_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"\x89PNG") {
        "image/png"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}

//! Video handlers: listing, upload, and lifecycle operations.

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use cvault_catalog::DeleteOutcome;
use cvault_models::{public_url, RecycleBinEntry, VideoAsset};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListVideosQuery {
    #[serde(default)]
    pub folder: String,
}

#[derive(Serialize)]
pub struct VideosResponse {
    pub videos: Vec<VideoAsset>,
}

/// List the videos directly inside a folder (exact match, not recursive).
pub async fn list_videos(
    State(state): State<AppState>,
    Query(query): Query<ListVideosQuery>,
    _user: AuthUser,
) -> ApiResult<Json<VideosResponse>> {
    let videos = state.catalog.list_videos(&query.folder).await?;
    Ok(Json(VideosResponse { videos }))
}

#[derive(Serialize)]
pub struct RecycleBinResponse {
    pub entries: Vec<RecycleBinEntry>,
}

/// List the Recycle Bin with each entry's decoded original location.
pub async fn list_recycle_bin(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<RecycleBinResponse>> {
    let entries = state.catalog.list_recycle_bin().await?;
    Ok(Json(RecycleBinResponse { entries }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub key: String,
    pub url: String,
}

/// Accept a multipart upload: a `video` file part plus an optional
/// `folder` text part.
pub async fn upload_video(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut folder = String::new();
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart request: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("folder") => {
                folder = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid folder field: {}", e)))?;
            }
            Some("video") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?
                    .to_vec();
                file = Some((file_name, content_type, data));
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| ApiError::bad_request("No file provided"))?;

    let asset = state
        .catalog
        .upload_video(&folder, &file_name, data, &content_type)
        .await?;

    info!(user = %user.username, key = %asset.key, "Video uploaded");
    Ok(Json(UploadResponse {
        success: true,
        key: asset.key,
        url: asset.url,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVideoResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: DeleteOutcome,
}

/// Delete a video: recycle when active, purge when already recycled.
pub async fn delete_video(
    State(state): State<AppState>,
    Path(key): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<DeleteVideoResponse>> {
    let outcome = state.catalog.delete_video(&key).await?;

    info!(user = %user.username, key = %key, ?outcome, "Video deleted");
    Ok(Json(DeleteVideoResponse {
        success: true,
        outcome,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameVideoRequest {
    pub key: String,
    pub new_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewKeyResponse {
    pub success: bool,
    pub new_key: String,
    pub url: String,
}

/// Rename a video within its folder.
pub async fn rename_video(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<RenameVideoRequest>,
) -> ApiResult<Json<NewKeyResponse>> {
    let new_key = state
        .catalog
        .rename_video(&request.key, &request.new_name)
        .await?;

    info!(user = %user.username, old = %request.key, new = %new_key, "Video renamed");
    let url = public_url(state.catalog.public_origin(), &new_key);
    Ok(Json(NewKeyResponse {
        success: true,
        new_key,
        url,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveVideoRequest {
    pub key: String,
    pub target_folder: String,
}

/// Move a video to another folder, keeping its name.
pub async fn move_video(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<MoveVideoRequest>,
) -> ApiResult<Json<NewKeyResponse>> {
    let new_key = state
        .catalog
        .move_video(&request.key, &request.target_folder)
        .await?;

    info!(user = %user.username, old = %request.key, new = %new_key, "Video moved");
    let url = public_url(state.catalog.public_origin(), &new_key);
    Ok(Json(NewKeyResponse {
        success: true,
        new_key,
        url,
    }))
}

#[derive(Deserialize)]
pub struct RestoreVideoRequest {
    pub key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreVideoResponse {
    pub success: bool,
    pub restored_key: String,
    pub url: String,
}

/// Restore a Recycle Bin entry to its original location.
pub async fn restore_video(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<RestoreVideoRequest>,
) -> ApiResult<Json<RestoreVideoResponse>> {
    let restored_key = state.catalog.restore_video(&request.key).await?;

    info!(user = %user.username, from = %request.key, to = %restored_key, "Video restored");
    let url = public_url(state.catalog.public_origin(), &restored_key);
    Ok(Json(RestoreVideoResponse {
        success: true,
        restored_key,
        url,
    }))
}

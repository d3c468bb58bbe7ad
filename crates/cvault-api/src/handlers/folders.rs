//! Folder handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct FoldersResponse {
    pub folders: Vec<String>,
}

/// List every live folder, reserved entries first.
pub async fn list_folders(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<FoldersResponse>> {
    let folders = state.catalog.list_folders().await?;
    Ok(Json(FoldersResponse { folders }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    pub folder_name: String,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub success: bool,
}

/// Create a folder.
pub async fn create_folder(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateFolderRequest>,
) -> ApiResult<Json<OkResponse>> {
    state.catalog.create_folder(&request.folder_name).await?;

    info!(user = %user.username, folder = %request.folder_name, "Folder created");
    Ok(Json(OkResponse { success: true }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameFolderRequest {
    pub old_name: String,
    pub new_name: String,
}

/// Rename a folder, re-prefixing everything under it.
pub async fn rename_folder(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<RenameFolderRequest>,
) -> ApiResult<Json<OkResponse>> {
    state
        .catalog
        .rename_folder(&request.old_name, &request.new_name)
        .await?;

    info!(
        user = %user.username,
        old = %request.old_name,
        new = %request.new_name,
        "Folder renamed"
    );
    Ok(Json(OkResponse { success: true }))
}

/// Delete a folder; refused while it holds videos at any depth.
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(folder_name): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<OkResponse>> {
    state.catalog.delete_folder(&folder_name).await?;

    info!(user = %user.username, folder = %folder_name, "Folder deleted");
    Ok(Json(OkResponse { success: true }))
}

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_macros::debug_handler;
use std::sync::Arc;

use crate::{
    config::AppState,
    models::{Block, BlockContent, BlocksData, Contact},
    response::{ResponseError, ResponseResult},
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

#[derive(OpenApi)]
#[openapi(
    paths(health_check_handler, list_blocks_handler, create_block_handler, update_block_handler, delete_block_handler),
    components(schemas(Block, BlockContent, Contact, BlocksData, DeleteBlockParams)),
    tags(
        (name = "blocks", description = "Block record management API")
    )
)]
pub struct BlockApi;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up"),
    )
)]
pub async fn health_check_handler() -> impl IntoResponse {
    let json_response = serde_json::json!({
        "status": "success",
        "message": "blocks server health check"
    });

    (StatusCode::OK, Json(json_response))
}

/// List all blocks.
/// Returns the full store document unchanged.
#[utoipa::path(
    get,
    path = "/api/blocks",
    responses(
        (status = 200, description = "Full block list", body = BlocksData),
        (status = 500, description = "Internal server error"),
    )
)]
#[debug_handler]
pub async fn list_blocks_handler(
    State(state): State<Arc<AppState>>,
) -> Result<ResponseResult, ResponseError> {
    let data = state.store.load().await;

    Ok(ResponseResult::Blocks(data))
}

/// Create a block.
/// The record is appended at the end of the list. No duplicate-id check.
#[utoipa::path(
    post,
    path = "/api/blocks",
    request_body(content = Block, description = "Block to append", content_type = "application/json"),
    responses(
        (status = 200, description = "Block added successfully", body = Block),
        (status = 500, description = "Internal server error"),
    )
)]
#[debug_handler]
pub async fn create_block_handler(
    State(state): State<Arc<AppState>>,
    Json(block): Json<Block>,
) -> Result<ResponseResult, ResponseError> {
    let mut data = state.store.load().await;
    data.blocks.push(block.clone());

    if let Err(err) = state.store.save(&data).await {
        log::error!("failed to persist new block: {}", err);
        return Err(ResponseError::InternalServerError);
    }

    Ok(ResponseResult::BlockAdded(block))
}

/// Update a block.
/// Replaces the first record with a matching id in place, preserving its
/// position in the list.
#[utoipa::path(
    put,
    path = "/api/blocks",
    request_body(content = Block, description = "Block replacing the record with the same id", content_type = "application/json"),
    responses(
        (status = 200, description = "Block updated successfully", body = Block),
        (status = 404, description = "Block not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[debug_handler]
pub async fn update_block_handler(
    State(state): State<Arc<AppState>>,
    Json(block): Json<Block>,
) -> Result<ResponseResult, ResponseError> {
    let mut data = state.store.load().await;

    let index = match data.blocks.iter().position(|b| b.id == block.id) {
        Some(index) => index,
        None => return Err(ResponseError::NotFound("Block not found".to_string())),
    };

    data.blocks[index] = block.clone();
    if let Err(err) = state.store.save(&data).await {
        log::error!("failed to persist updated block: {}", err);
        return Err(ResponseError::InternalServerError);
    }

    Ok(ResponseResult::BlockUpdated(block))
}

/// Query parameters for deleting a block
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteBlockParams {
    /// Identifier of the block to remove
    pub id: Option<String>,
}

/// Delete a block.
/// Removes the first record with a matching id and returns it.
#[utoipa::path(
    delete,
    path = "/api/blocks",
    params(
        ("id" = Option<String>, Query, description = "Identifier of the block to remove")
    ),
    responses(
        (status = 200, description = "Block deleted successfully", body = Block),
        (status = 400, description = "Block ID is required"),
        (status = 404, description = "Block not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[debug_handler]
pub async fn delete_block_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeleteBlockParams>,
) -> Result<ResponseResult, ResponseError> {
    let id = match params.id {
        Some(id) => id,
        None => {
            return Err(ResponseError::BadRequest(
                "Block ID is required".to_string(),
            ))
        }
    };

    let mut data = state.store.load().await;

    let index = match data.blocks.iter().position(|b| b.id == id) {
        Some(index) => index,
        None => return Err(ResponseError::NotFound("Block not found".to_string())),
    };

    let block = data.blocks.remove(index);
    if let Err(err) = state.store.save(&data).await {
        log::error!("failed to persist block deletion: {}", err);
        return Err(ResponseError::InternalServerError);
    }

    Ok(ResponseResult::BlockDeleted(block))
}

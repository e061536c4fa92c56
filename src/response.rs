use askama::Template;
use axum::{
    body::Body,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Block, BlocksData};

#[derive(Debug, Serialize, ToSchema)]
pub enum ResponseError {
    InternalServerError,
    NotFound(String),
    BadRequest(String),
    TemplateError(ErrorTemplate),
}

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response<Body> {
        match self {
            ResponseError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Internal server error"})),
            )
                .into_response(),
            ResponseError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": msg})),
            )
                .into_response(),
            ResponseError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": msg})),
            )
                .into_response(),
            ResponseError::TemplateError(t) => match t.render() {
                Ok(html) => {
                    let mut resp = Html(html).into_response();
                    match t.err {
                        TemplateErr::NotFound(reason) => {
                            *resp.status_mut() = StatusCode::NOT_FOUND;
                            resp.headers_mut()
                                .insert(FAIL_REASON_HEADER_NAME, reason.parse().unwrap());
                        }
                        TemplateErr::BadRequest(reason) => {
                            *resp.status_mut() = StatusCode::BAD_REQUEST;
                            resp.headers_mut()
                                .insert(FAIL_REASON_HEADER_NAME, reason.parse().unwrap());
                        }
                        TemplateErr::InternalServerError(reason) => {
                            *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                            resp.headers_mut()
                                .insert(FAIL_REASON_HEADER_NAME, reason.parse().unwrap());
                        }
                    }
                    resp
                }
                Err(err) => {
                    tracing::error!("template render failed, err={}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to render template. Error: {}", err),
                    )
                        .into_response()
                }
            },
        }
    }
}

#[derive(Debug, ToSchema)]
pub enum ResponseResult {
    Blocks(BlocksData),
    BlockAdded(Block),
    BlockUpdated(Block),
    BlockDeleted(Block),
    Page(PageTemplate),
}

impl IntoResponse for ResponseResult {
    fn into_response(self) -> Response<Body> {
        match self {
            ResponseResult::Blocks(data) => (StatusCode::OK, Json(data)).into_response(),
            ResponseResult::BlockAdded(block) => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "message": "Block added successfully",
                    "block": block
                })),
            )
                .into_response(),
            ResponseResult::BlockUpdated(block) => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "message": "Block updated successfully",
                    "block": block
                })),
            )
                .into_response(),
            ResponseResult::BlockDeleted(block) => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "message": "Block deleted successfully",
                    "block": block
                })),
            )
                .into_response(),
            ResponseResult::Page(t) => match t.render() {
                Ok(html) => Html(html).into_response(),
                Err(err) => {
                    tracing::error!("template render failed, err={}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to render template. Error: {}", err),
                    )
                        .into_response()
                }
            },
        }
    }
}

//////// TEMPLATES ////////

/// The page shell: header menu with the identity display, the block list as
/// page content and a transient-notification container.
#[derive(Debug, Template, Serialize, ToSchema)]
#[template(path = "index.html")]
pub struct PageTemplate {
    pub user_email: Option<String>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Template, Serialize, ToSchema)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub err: TemplateErr,
    pub cur_path: String,
    pub message: String,
}

const FAIL_REASON_HEADER_NAME: &str = "blocks-server-fail-reason";

#[derive(Debug, Serialize, ToSchema)]
pub enum TemplateErr {
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
}

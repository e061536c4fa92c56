use axum::{extract::State, http::HeaderMap, response::Redirect};
use axum_macros::debug_handler;
use std::{future::Future, pin::Pin, sync::Arc};

use crate::{
    config::AppState,
    response::{ErrorTemplate, PageTemplate, ResponseError, ResponseResult, TemplateErr},
};

type Effect = Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Wraps a zero-argument side effect behind a clickable control. The effect
/// runs to completion before the user is sent back to the root page.
pub struct ActionTrigger {
    effect: Effect,
}

impl ActionTrigger {
    pub fn new<F, Fut>(effect: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            effect: Arc::new(move || Box::pin(effect())),
        }
    }

    pub async fn fire(&self) -> Redirect {
        (self.effect)().await;

        Redirect::to("/")
    }
}

/// Render the page shell. The identity display resolves the current user
/// with one suspending call per render; absence or lookup failure renders
/// the fixed placeholder.
#[debug_handler]
pub async fn index_page_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<ResponseResult, ResponseError> {
    let user_email = match state.session.current_user(&headers).await {
        Ok(Some(user)) => Some(user.email),
        Ok(None) => None,
        Err(err) => {
            log::debug!("session lookup failed: {}", err);
            None
        }
    };

    let data = state.store.load().await;

    Ok(ResponseResult::Page(PageTemplate {
        user_email,
        blocks: data.blocks,
    }))
}

/// Fallback for unknown paths, rendered as an HTML error page.
pub async fn not_found_page_handler(uri: axum::http::Uri) -> ResponseError {
    ResponseError::TemplateError(ErrorTemplate {
        err: TemplateErr::NotFound("page not found".to_string()),
        cur_path: uri.to_string(),
        message: "page not found".to_string(),
    })
}

/// Sign the user out, then navigate to the application root. The effect is
/// awaited so navigation cannot race it.
#[debug_handler]
pub async fn sign_out_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Redirect {
    let session = Arc::clone(&state.session);

    let trigger = ActionTrigger::new(move || {
        let session = Arc::clone(&session);
        let headers = headers.clone();
        async move {
            if let Err(err) = session.sign_out(&headers).await {
                log::error!("sign out failed: {}", err);
            }
        }
    });

    trigger.fire().await
}

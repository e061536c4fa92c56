use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity returned by the external session provider.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub email: String,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single profile/portfolio entry with descriptive and contact metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Block {
    /// Caller-supplied identifier. Uniqueness is assumed, not enforced.
    pub id: String,
    /// Free-form category string.
    #[serde(rename = "type")]
    pub kind: String,
    pub content: BlockContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BlockContent {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image: String,
    pub url: String,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub github: String,
    pub linkedin: String,
    pub x: String,
}

/// Root document persisted to disk, shape `{ "blocks": [...] }`. Array order
/// is insertion order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BlocksData {
    pub blocks: Vec<Block>,
}

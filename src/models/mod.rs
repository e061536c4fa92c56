pub mod block;
pub mod user;

pub use block::{Block, BlockContent, BlocksData, Contact};
pub use user::SessionUser;

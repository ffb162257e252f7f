mod auth_ctx;
mod identity;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use identity::Identity;

mod context;
pub mod negotiator;

pub use context::{IdentityContext, NegotiationResult, NegotiationState};
pub use negotiator::{Negotiator, ProxyHeaderNegotiator};

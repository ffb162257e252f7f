pub mod gate;
pub mod principal;

pub use gate::{AuthorizationDecision, AuthorizationGate};
pub use principal::{PrincipalKey, PrincipalRegistry, RegistryError};

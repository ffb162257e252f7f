pub mod authz;
pub mod identity;
pub mod status;

/*
 * Responsibility
 * - middleware entry points, each exposed as apply(router, ...)
 */
pub mod auth;
pub mod http;
pub mod negotiation;

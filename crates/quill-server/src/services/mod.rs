//! Request-processing services used by the HTTP handlers.

pub mod edit;

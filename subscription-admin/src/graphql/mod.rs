//! GraphQL documents sent to the Admin API and the wire shapes they return.

pub mod documents;
pub mod wire;

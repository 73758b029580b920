pub mod catalog;
pub mod classify;
pub mod context;
pub mod error;
pub mod mcp_api;
pub mod model;
pub mod rank;

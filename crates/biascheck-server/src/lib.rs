//! HTTP RPC surface for the extension: classify, analyze, clearResult, getConfig.

pub mod auth;
pub mod dto;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

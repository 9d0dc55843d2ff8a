//! Tonecraft CLI library.
//!
//! This crate provides the suggestion service shared by the `tonecraft`
//! binary's commands and its WebSocket server.

pub mod commands;
pub mod service;

pub use service::{
    suggest, suggest_json, suggest_with_deadline, ErrorResponse, ServiceConfig, ServiceError,
    SuggestionResponse,
};

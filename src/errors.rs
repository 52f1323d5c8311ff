//! Unified application error type.
//! All modules (core, jira, cli, server) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Start-time store error at {path}: {reason}")]
    Storage { path: String, reason: String },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid time format: {0} (use HH:MM, e.g. 09:30, or HH:MMam/pm, e.g. 12:45pm)")]
    InvalidTime(String),

    #[error("Invalid date format: {0} (use YYYY-MM-DD)")]
    InvalidDate(String),

    // ---------------------------
    // Tracker API
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Tracker returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("No '{0}' transition available for {1}")]
    NoTransition(String, String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Server
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

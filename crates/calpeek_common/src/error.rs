// --- File: crates/calpeek_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all calpeek crates.
///
/// Feature crates keep their own error enums for their wire contracts and fall
/// back to this one for configuration, client construction and collaborator
/// failures.
#[derive(Error, Debug)]
pub enum CalpeekError {
    /// An HTTP client could not be built
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Startup or serving failure annotated through [`Context`]
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for CalpeekError {
    fn status_code(&self) -> u16 {
        match self {
            CalpeekError::HttpError(_) => 500,
            CalpeekError::ConfigError(_) => 500,
            CalpeekError::ExternalServiceError { .. } => 502,
            CalpeekError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, CalpeekError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, CalpeekError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, CalpeekError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| CalpeekError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, CalpeekError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| CalpeekError::InternalError(format!("{}: {}", f(), error)))
    }
}

impl From<reqwest::Error> for CalpeekError {
    fn from(err: reqwest::Error) -> Self {
        CalpeekError::HttpError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> CalpeekError {
    CalpeekError::ConfigError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> CalpeekError {
    CalpeekError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

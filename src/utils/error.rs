use std::fmt;

use mongodb::bson;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(String),
    InvalidId(String),
    InvalidDocument(String),
    ConfigError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::InvalidId(msg) => write!(f, "Invalid id: {}", msg),
            AppError::InvalidDocument(msg) => write!(f, "Invalid document: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(error: mongodb::error::Error) -> Self {
        AppError::DatabaseError(error.to_string())
    }
}

impl From<bson::oid::Error> for AppError {
    fn from(error: bson::oid::Error) -> Self {
        AppError::InvalidId(error.to_string())
    }
}

impl From<bson::ser::Error> for AppError {
    fn from(error: bson::ser::Error) -> Self {
        AppError::InvalidDocument(error.to_string())
    }
}

pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create directory walk error, naming the entry that could not be read
pub fn walk_error(err: walkdir::Error) -> AppError {
    let path = err
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| String::from("<unknown>"));
    AppError::internal(format!("Failed to read directory entry '{}': {}", path, err))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create corpus error for roots that cannot be linted
pub fn corpus_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

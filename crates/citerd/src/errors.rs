//! Error types for the citerd CLI application.
//!
//! This module provides a comprehensive error type that encompasses all
//! possible failure modes when running the CLI, including:
//! - User interaction errors
//! - Citation request and remote service errors
//! - URL parsing for the configured endpoint
//! - File system operations
//!
//! The errors are designed to be transparent, allowing the underlying error
//! details to be displayed to the user while maintaining proper error
//! handling and propagation.

use thiserror::Error;

/// Errors that can occur during CLI operations.
///
/// This enum wraps various error types from dependencies and the underlying
/// library into a single error type for the CLI application. It uses the
/// `transparent` error handling pattern to preserve the original error
/// messages and context.
#[derive(Error, Debug)]
pub enum CiterdErrors {
  /// Errors from user interaction dialogs
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// Errors from the underlying citer library
  #[error(transparent)]
  Citer(#[from] citer::errors::CiterError),

  /// Errors from parsing the configured service endpoint
  #[error(transparent)]
  Url(#[from] url::ParseError),

  /// File system and IO operation errors
  #[error(transparent)]
  IO(#[from] std::io::Error),
}

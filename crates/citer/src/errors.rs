//! Error types for the citer library.
//!
//! This module provides a comprehensive error type that encompasses all
//! possible failure modes when working with citation requests, including:
//! - Network and service errors
//! - Authentication gating
//! - Author-listing and identifier validation
//! - Request sequencing
//!
//! # Examples
//!
//! ```
//! use citer::{document::DoiDocument, errors::CiterError};
//!
//! let mut document = DoiDocument::new();
//! match document.set_creators_from_text("Prince") {
//!   Err(CiterError::MalformedAuthor { line }) => println!("Bad author line: {}", line),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(_) => println!("Success!"),
//! }
//! ```

use thiserror::Error;

/// Errors that can occur when working with the citer library.
///
/// This enum covers the error cases that can occur when:
/// - Issuing remote calls against the DOI service
/// - Parsing author listings and identifiers
/// - Sequencing operations through the request controller
///
/// Most error variants provide additional context through either custom
/// messages or wrapped underlying errors.
#[derive(Error, Debug)]
pub enum CiterError {
  /// The session is not authenticated.
  ///
  /// Gates all controller functionality: no operation runs until the page
  /// reports a successful authentication check.
  #[error("Authentication required")]
  AuthenticationRequired,

  /// An author line doesn't match the expected format.
  ///
  /// Each non-blank line of the author listing must contain exactly one
  /// comma separating a non-empty family part from a non-empty given part.
  /// The offending line is carried for display.
  #[error("Malformed author line {line:?}, expected \"family, given\"")]
  MalformedAuthor {
    /// The line that failed to parse.
    line: String,
  },

  /// No suffix could be derived from an identifier.
  ///
  /// This occurs when the value is empty, or contains a slash without being
  /// in DOI form (registrant prefix, slash, suffix).
  #[error("Invalid DOI identifier")]
  InvalidIdentifier,

  /// A remote operation was started while another was still in flight.
  ///
  /// Only one create/fetch/delete/status call may be outstanding at a time;
  /// a second entry fails fast instead of interleaving state updates.
  #[error("Another request is already in progress")]
  OperationInFlight,

  /// A network request failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The request times out
  /// - TLS/SSL errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The service returned an error response.
  ///
  /// This occurs when the DOI service answers with a non-success status or
  /// an unparseable payload. The string parameter carries the service's
  /// failure payload for display.
  #[error("Service error: {0}")]
  Api(String),

  /// Failed to parse a URL.
  ///
  /// This occurs when the service endpoint or the page URL handed to the
  /// controller is not a valid URL.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),
}

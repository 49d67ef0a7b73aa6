//! Text formatting helpers for creator names and storage links.
//!
//! This module provides the small pure-text transformations shared by the
//! document model and the request controller: composing a creator's display
//! name from its parts, and turning a data-directory path into a link target
//! in the storage-listing view.
//!
//! # Examples
//!
//! ```
//! use citer::format;
//!
//! assert_eq!(format::creator_display_name("Jane", "Smith"), "Jane, Smith");
//! assert_eq!(format::storage_listing_link("/AB.1234/data"), "/storage/list/AB.1234/data");
//! ```

/// Path prefix of the storage-listing view data directories link into.
const STORAGE_LIST_PREFIX: &str = "/storage/list";

/// Composes a creator's display name from its parts: `"given, family"`.
///
/// The composed form is what the author listing shows and what the service
/// registers as the creator name, regardless of how much whitespace the
/// input carried.
///
/// # Examples
///
/// ```
/// use citer::format;
///
/// assert_eq!(format::creator_display_name("John", "Doe"), "John, Doe");
/// ```
pub fn creator_display_name(given: &str, family: &str) -> String {
  format!("{}, {}", given.trim(), family.trim())
}

/// Builds the storage-listing link for a DOI's data directory.
///
/// # Examples
///
/// ```
/// use citer::format;
///
/// assert_eq!(format::storage_listing_link("/AB.1234/data"), "/storage/list/AB.1234/data");
/// ```
pub fn storage_listing_link(data_directory: &str) -> String {
  format!("{}{}", STORAGE_LIST_PREFIX, data_directory)
}

//! Metadata document management for DOI citation requests.
//!
//! This module provides the in-memory model behind the citation request form:
//! one [`MetadataRecord`] per document, owned by a [`DoiDocument`] that
//! mediates between the structured record and the flat field values a form
//! works with. It also carries the identifier helpers shared by the request
//! controller (suffix derivation, the year-selector window).
//!
//! # Examples
//!
//! ```
//! use citer::document::DoiDocument;
//!
//! # fn run() -> Result<(), citer::CiterError> {
//! let mut document = DoiDocument::new();
//! document.set_title("Gas Survey Data Release");
//! document.set_creators_from_text("Smith, Jane\nDoe, John")?;
//!
//! assert_eq!(document.creators_as_text(), "Jane, Smith\nJohn, Doe\n");
//! # Ok(())
//! # }
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use super::*;

/// Identifier template a freshly initialized record carries until the service
/// assigns a real DOI.
pub const IDENTIFIER_TEMPLATE: &str = "10.11570/YY.xxxx";

/// Language tag applied to the single title entry.
pub const TITLE_LANG: &str = "en-US";

/// Resource type registered for every record. Datasets are the only resource
/// this service registers.
pub const RESOURCE_TYPE: &str = "Dataset";

/// An author entry on a metadata record.
///
/// Creators are kept in display order. Each carries its name components plus
/// the composed display form (`"given, family"`) shown in the form's author
/// listing and registered as the creator name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
  /// Composed display name, `"given, family"`
  pub full_name:   String,
  /// The creator's given (first) name
  pub given_name:  String,
  /// The creator's family (last) name
  pub family_name: String,
}

impl Creator {
  /// Builds a creator from its two name parts, composing the display form.
  pub fn from_name_parts(family: &str, given: &str) -> Self {
    Self {
      full_name:   format::creator_display_name(given, family),
      given_name:  given.to_string(),
      family_name: family.to_string(),
    }
  }
}

/// The canonical metadata record for one DOI.
///
/// A record is always in one of two provenance states: freshly initialized
/// (template values, see [`MetadataRecord::template`]) or server-populated
/// (replaced wholesale from a create/fetch response). Field-by-field merging
/// between the two never happens; local edits are applied through the
/// [`DoiDocument`] setters before a submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
  /// DOI string, or the identifier template before the first registration
  pub identifier:       String,
  /// Ordered author list; rebuilt wholesale on each author-list update
  pub creators:         Vec<Creator>,
  /// Single title, language-tagged with [`TITLE_LANG`]
  pub title:            String,
  /// Publishing organization
  pub publisher:        String,
  /// Publication year; integer-like, kept as text because the form submits it
  /// as text while the service may return a number
  pub publication_year: String,
}

impl MetadataRecord {
  /// Builds the freshly initialized record: template identifier, empty title,
  /// publisher and creator list, and the current calendar year.
  fn template() -> Self {
    Self {
      identifier:       IDENTIFIER_TEMPLATE.to_string(),
      creators:         Vec::new(),
      title:            String::new(),
      publisher:        String::new(),
      publication_year: Utc::now().year().to_string(),
    }
  }
}

/// Holds one metadata record and mediates between it and the flat field
/// values used by a request form.
///
/// All mutation is single-threaded and last-write-wins per setter. The record
/// itself is replaceable as a whole (never merged): [`DoiDocument::reset`]
/// swaps in a fresh template, [`DoiDocument::replace_with`] swaps in a server
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoiDocument {
  /// The record this document currently holds.
  record: MetadataRecord,
}

impl DoiDocument {
  /// Creates a document holding a freshly initialized record.
  pub fn new() -> Self { Self { record: MetadataRecord::template() } }

  /// Replaces the record with a freshly built template.
  pub fn reset(&mut self) { self.record = MetadataRecord::template(); }

  /// Replaces the record wholesale with a server-supplied resource.
  ///
  /// No validation is performed; the service's representation is trusted.
  /// Any previously set local field values are discarded.
  pub fn replace_with(&mut self, resource: wire::Resource) { self.record = resource.into(); }

  /// Read access to the current record.
  pub fn record(&self) -> &MetadataRecord { &self.record }

  /// Rebuilds the creator list from a newline-delimited author listing.
  ///
  /// Each non-blank line must contain exactly one comma separating a
  /// non-empty family part from a non-empty given part (`"family, given"`,
  /// tolerant of irregular spacing). The whole update is rejected on the
  /// first malformed line, leaving the current creator list untouched.
  ///
  /// # Errors
  ///
  /// Returns [`CiterError::MalformedAuthor`] carrying the offending line.
  pub fn set_creators_from_text(&mut self, text: &str) -> Result<(), CiterError> {
    self.record.creators = parse_author_lines(text)?;
    Ok(())
  }

  /// Produces the newline-delimited listing of composed display names, in
  /// sequence order, for display in the form's author box.
  ///
  /// Each entry is followed by a newline, including the last.
  pub fn creators_as_text(&self) -> String {
    let mut listing = String::new();
    for creator in &self.record.creators {
      listing.push_str(&creator.full_name);
      listing.push('\n');
    }
    listing
  }

  /// Sets the single title.
  pub fn set_title(&mut self, title: &str) { self.record.title = title.to_string(); }

  /// The current title.
  pub fn title(&self) -> &str { &self.record.title }

  /// Sets the publisher.
  pub fn set_publisher(&mut self, publisher: &str) {
    self.record.publisher = publisher.to_string();
  }

  /// The current publisher.
  pub fn publisher(&self) -> &str { &self.record.publisher }

  /// Sets the publication year.
  pub fn set_publication_year(&mut self, year: &str) {
    self.record.publication_year = year.to_string();
  }

  /// The current publication year, as text.
  pub fn publication_year(&self) -> &str { &self.record.publication_year }

  /// Sets the identifier. A no-op on the empty string: the template or a
  /// previously assigned DOI is only overwritten by a non-empty value.
  pub fn set_identifier(&mut self, identifier: &str) {
    if !identifier.is_empty() {
      self.record.identifier = identifier.to_string();
    }
  }

  /// The current identifier.
  pub fn identifier(&self) -> &str { &self.record.identifier }

  /// Projects the record into the minimal wire representation expected by
  /// the remote service. Pure projection; no side effects.
  pub fn to_wire_format(&self) -> wire::ResourceDocument {
    wire::ResourceDocument::from_record(&self.record)
  }
}

impl Default for DoiDocument {
  fn default() -> Self { Self::new() }
}

/// Parses the newline-delimited author listing into an ordered creator list.
///
/// Blank lines are skipped. Every other line must split on exactly one comma
/// into `"family, given"`.
fn parse_author_lines(text: &str) -> Result<Vec<Creator>, CiterError> {
  let mut creators = Vec::new();
  for line in text.lines() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    let mut parts = line.split(',');
    let (family, given) = match (parts.next(), parts.next(), parts.next()) {
      (Some(family), Some(given), None) => (family.trim(), given.trim()),
      _ => return Err(CiterError::MalformedAuthor { line: line.to_string() }),
    };
    if family.is_empty() || given.is_empty() {
      return Err(CiterError::MalformedAuthor { line: line.to_string() });
    }
    creators.push(Creator::from_name_parts(family, given));
  }
  Ok(creators)
}

/// Derives the DOI suffix used as the path segment for fetch, delete, and
/// status calls.
///
/// Accepts either a full DOI (e.g. `"10.11570/AB.1234"`, yielding
/// `"AB.1234"`) or a bare suffix, which passes through unchanged.
///
/// # Errors
///
/// Returns [`CiterError::InvalidIdentifier`] for empty input or for a
/// slash-containing value that is not in DOI form.
pub fn doi_suffix(input: &str) -> Result<String, CiterError> {
  lazy_static! {
    /// DOI pattern: registrant prefix, slash, suffix.
    static ref DOI: Regex = Regex::new(r"^10\.\d{4,9}/[-._;()/:\w]+$").unwrap();
  }

  let input = input.trim();
  if input.is_empty() {
    return Err(CiterError::InvalidIdentifier);
  }
  if DOI.is_match(input) {
    return input
      .split('/')
      .nth(1)
      .map(ToString::to_string)
      .ok_or(CiterError::InvalidIdentifier);
  }
  if input.contains('/') {
    return Err(CiterError::InvalidIdentifier);
  }
  Ok(input.to_string())
}

/// The year-selector window: `from` plus the next two years, in order.
pub fn publication_years(from: i32) -> Vec<i32> { (from..from + 3).collect() }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_author_listing_composition() {
    let mut document = DoiDocument::new();
    document.set_creators_from_text("Smith, Jane\nDoe, John").unwrap();
    assert_eq!(document.creators_as_text(), "Jane, Smith\nJohn, Doe\n");

    let creators = &document.record().creators;
    assert_eq!(creators.len(), 2);
    assert_eq!(creators[0].family_name, "Smith");
    assert_eq!(creators[0].given_name, "Jane");
    assert_eq!(creators[1].full_name, "John, Doe");
  }

  #[test]
  fn test_author_listing_tolerates_irregular_spacing() {
    let mut document = DoiDocument::new();
    document.set_creators_from_text("  Smith ,   Jane \n\nDoe,John\n").unwrap();
    assert_eq!(document.creators_as_text(), "Jane, Smith\nJohn, Doe\n");
  }

  #[test]
  fn test_author_listing_round_trip_preserves_order() {
    let mut document = DoiDocument::new();
    document.set_creators_from_text("Smith, Jane\nDoe, John").unwrap();

    // The composed listing re-parses under the same grammar, keeping entry
    // count and order; a second pass restores the original listing.
    let listing = document.creators_as_text();
    document.set_creators_from_text(&listing).unwrap();
    assert_eq!(document.record().creators.len(), 2);
    document.set_creators_from_text(&document.creators_as_text()).unwrap();
    assert_eq!(document.creators_as_text(), "Jane, Smith\nJohn, Doe\n");
  }

  #[test]
  fn test_malformed_author_lines_rejected() {
    let mut document = DoiDocument::new();
    document.set_creators_from_text("Smith, Jane").unwrap();

    for listing in ["Prince", "Smith, Jane, Jr.", ", Jane", "Smith,  "] {
      let error = document.set_creators_from_text(listing).unwrap_err();
      assert!(matches!(error, CiterError::MalformedAuthor { .. }), "accepted {listing:?}");
    }

    // A rejected update leaves the previous creator list untouched.
    assert_eq!(document.creators_as_text(), "Jane, Smith\n");
  }

  #[test]
  fn test_fresh_record_template() {
    let document = DoiDocument::new();
    let record = document.record();
    assert_eq!(record.identifier, IDENTIFIER_TEMPLATE);
    assert!(record.creators.is_empty());
    assert!(record.title.is_empty());
    assert!(record.publisher.is_empty());
    assert_eq!(record.publication_year, Utc::now().year().to_string());
  }

  #[test]
  fn test_reset_projects_template_wire_document() {
    let mut document = DoiDocument::new();
    document.set_title("Gas Survey Data Release");
    document.set_identifier("10.11570/AB.1234");
    document.reset();

    let wire = document.to_wire_format();
    assert_eq!(wire.resource.identifier.value, IDENTIFIER_TEMPLATE);
    assert!(wire.resource.creators.entries.is_empty());
    assert_eq!(wire.resource.titles.entries[0].title.value, "");
    assert_eq!(wire.resource.publisher.value, "");
    assert_eq!(
      wire.resource.publication_year.value,
      wire::YearValue::Number(Utc::now().year())
    );
  }

  #[test]
  fn test_reset_discards_local_edits() {
    let mut document = DoiDocument::new();
    document.set_title("Gas Survey Data Release");
    document.set_identifier("10.11570/AB.1234");
    document.reset();
    assert_eq!(document.identifier(), IDENTIFIER_TEMPLATE);
    assert!(document.title().is_empty());
  }

  #[test]
  fn test_identifier_only_overwritten_by_non_empty_value() {
    let mut document = DoiDocument::new();
    document.set_identifier("");
    assert_eq!(document.identifier(), IDENTIFIER_TEMPLATE);

    document.set_identifier("10.123/abc");
    assert_eq!(document.identifier(), "10.123/abc");

    document.set_identifier("");
    assert_eq!(document.identifier(), "10.123/abc");
  }

  #[test]
  fn test_doi_suffix() {
    assert_eq!(doi_suffix("10.11570/AB.1234").unwrap(), "AB.1234");
    assert_eq!(doi_suffix("AB.1234").unwrap(), "AB.1234");
    assert_eq!(doi_suffix("  AB.1234 ").unwrap(), "AB.1234");
    assert!(matches!(doi_suffix(""), Err(CiterError::InvalidIdentifier)));
    assert!(matches!(doi_suffix("not/a/doi"), Err(CiterError::InvalidIdentifier)));
  }

  #[test]
  fn test_publication_years_window() {
    assert_eq!(publication_years(2024), vec![2024, 2025, 2026]);
  }
}

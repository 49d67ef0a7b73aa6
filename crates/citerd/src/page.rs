//! Terminal rendition of the citation request page.
//!
//! This module implements the library's [`PageView`] contract for a console
//! session: the progress indicator, alerts, and the informational dialog
//! become styled terminal lines, the form becomes a printed panel backed by
//! an in-memory copy of its field values, and the service call target is the
//! endpoint the CLI was configured with.

use std::sync::Mutex;

use async_trait::async_trait;
use citer::{errors::CiterError, FormFields, PageView, Progress};
use console::{style, Emoji};
use url::Url;

/// Marker shown while a remote call is in flight.
static HOURGLASS: Emoji<'_, '_> = Emoji("⏳ ", "");
/// Marker for the printed metadata record panel.
static PAPER: Emoji<'_, '_> = Emoji("📄 ", "");
/// Marker for success notices.
static SUCCESS: Emoji<'_, '_> = Emoji("✨ ", "");
/// Marker for failure notices.
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "");

/// Console implementation of the page collaborator.
///
/// Display state (the form's field values, the shown metadata) lives behind
/// interior mutability so the page can be driven through `&self`, matching
/// the trait contract.
pub struct ConsolePage {
  /// The configured service endpoint.
  endpoint: Url,
  /// Field values currently shown in the form panel.
  form:     Mutex<FormFields>,
  /// Year options offered by the publication-year selector.
  years:    Mutex<Vec<i32>>,
  /// Currently shown registration status and data-directory link.
  metadata: Mutex<Option<(String, String)>>,
}

impl ConsolePage {
  /// Creates a page bound to the given service endpoint.
  pub fn new(endpoint: Url) -> Self {
    Self {
      endpoint,
      form: Mutex::new(FormFields::default()),
      years: Mutex::new(Vec::new()),
      metadata: Mutex::new(None),
    }
  }

  /// The field values currently shown in the form panel.
  pub fn form(&self) -> FormFields { self.form.lock().unwrap().clone() }

  /// The year options offered by the publication-year selector.
  pub fn year_options(&self) -> Vec<i32> { self.years.lock().unwrap().clone() }
}

#[async_trait]
impl PageView for ConsolePage {
  async fn resolve_service_endpoint(&self) -> Result<Url, CiterError> {
    Ok(self.endpoint.clone())
  }

  fn set_progress(&self, progress: Progress) {
    if progress == Progress::Busy {
      println!("{} {}", style(HOURGLASS).cyan(), style("Contacting the DOI service...").cyan());
    }
  }

  fn clear_alert(&self) {}

  fn show_failure_alert(&self, message: &str) {
    eprintln!("{} {}", style(FAILURE).red(), style(message).red());
  }

  fn show_success_alert(&self, message: &str) {
    println!("{} {}", style(SUCCESS).green(), message);
  }

  fn show_modal(&self, title: &str, message: &str, _blocking: bool) {
    println!("{} {} {}", style("ℹ").blue(), style(title).bold(), style(message).dim());
  }

  fn hide_modal(&self) {}

  fn populate_year_options(&self, years: &[i32]) {
    *self.years.lock().unwrap() = years.to_vec();
  }

  fn set_form(&self, fields: &FormFields) {
    *self.form.lock().unwrap() = fields.clone();

    let authors = fields.creators.lines().collect::<Vec<_>>().join("; ");
    println!("\n{} Metadata record:", style(PAPER).green());
    println!("   {} {}", style("DOI:").green().bold(), style(&fields.identifier).white());
    println!("   {} {}", style("Title:").green().bold(), style(&fields.title).white());
    println!("   {} {}", style("Authors:").green().bold(), style(authors).white());
    println!("   {} {}", style("Publisher:").green().bold(), style(&fields.publisher).white());
    println!(
      "   {} {}",
      style("Year:").green().bold(),
      style(&fields.publication_year).white()
    );
  }

  fn form_identifier(&self) -> String { self.form.lock().unwrap().identifier.clone() }

  fn show_metadata(&self, status: &str, data_directory_link: &str) {
    *self.metadata.lock().unwrap() =
      Some((status.to_string(), data_directory_link.to_string()));

    println!("   {} {}", style("Status:").green().bold(), style(status).cyan());
    println!(
      "   {} {}",
      style("Data directory:").green().bold(),
      style(data_directory_link).blue().underlined()
    );
  }

  fn clear_metadata(&self) { *self.metadata.lock().unwrap() = None; }

  fn reset_form_inputs(&self) {
    *self.form.lock().unwrap() = FormFields::default();
    println!("{} Form cleared", style("ℹ").blue());
  }
}

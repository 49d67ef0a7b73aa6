//! The page collaborator contract consumed by the request controller.
//!
//! The controller never renders anything itself. Everything the user sees —
//! the progress indicator, alerts, the blocking "processing" modal, the form
//! fields, and the metadata display region — is driven through the
//! [`PageView`] trait, and the service call target is resolved through it as
//! well. The library ships no implementation; each surface (a web page, the
//! `citerd` console) provides its own.

use async_trait::async_trait;
use url::Url;

use super::*;

/// Progress indicator states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
  /// Idle, last operation succeeded (or nothing has run yet).
  Okay,
  /// A remote call is in flight.
  Busy,
  /// The last operation failed.
  Error,
}

/// Flat field values of the request form.
///
/// This is the controller's exchange format with the page: submissions carry
/// the values read from the form, and the controller hands back a refreshed
/// set after the model changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
  /// The DOI field; empty until the service assigns one.
  pub identifier:       String,
  /// Newline-delimited author listing.
  pub creators:         String,
  /// Dataset title.
  pub title:            String,
  /// Publishing organization.
  pub publisher:        String,
  /// Publication year, as text.
  pub publication_year: String,
}

/// Operations the hosting page exposes to the request controller.
///
/// Methods take `&self`; implementations that track display state (the
/// recorded form values, alert text) do so behind interior mutability.
#[async_trait]
pub trait PageView: Send + Sync {
  /// Resolves the base URL of the DOI service. May itself suspend (the
  /// original page looks the target up in a capability registry).
  async fn resolve_service_endpoint(&self) -> Result<Url, CiterError>;

  /// Drives the visual progress indicator.
  fn set_progress(&self, progress: Progress);

  /// Clears any transient alert.
  fn clear_alert(&self);

  /// Surfaces a failure message.
  fn show_failure_alert(&self, message: &str);

  /// Surfaces a success notice.
  fn show_success_alert(&self, message: &str);

  /// Shows the informational dialog, optionally blocking interaction.
  fn show_modal(&self, title: &str, message: &str, blocking: bool);

  /// Hides the informational dialog. A no-op when none is shown.
  fn hide_modal(&self);

  /// Fills the publication-year selector with the given options, in order.
  fn populate_year_options(&self, years: &[i32]);

  /// Writes the given field values into the form.
  fn set_form(&self, fields: &FormFields);

  /// The identifier currently shown in the form's DOI field.
  fn form_identifier(&self) -> String;

  /// Shows the metadata display region with the registration status and the
  /// data-directory link.
  fn show_metadata(&self, status: &str, data_directory_link: &str);

  /// Hides the metadata display region and clears the status and
  /// data-directory areas.
  fn clear_metadata(&self);

  /// Performs the form's native reset, restoring input defaults. Invoked on
  /// explicit resets only.
  fn reset_form_inputs(&self);
}

//! Request controller for the citation request page.
//!
//! This module sequences user- and URL-triggered operations against the DOI
//! service: submit (create or update), fetch, delete, and the status poll.
//! The controller owns the [`DoiDocument`] behind the form and keeps the
//! page's UI state — progress indicator, button mode, modal visibility —
//! consistent with the outcome of each call, delegating all rendering and
//! network transport to its two collaborators.
//!
//! Every remote operation shares the same failure policy: no retry, the
//! failure is surfaced through the page, the model keeps its pre-call state,
//! and the progress indicator always leaves Busy (ending on Okay or Error).
//! One operation may be in flight at a time; a second entry fails fast with
//! [`CiterError::OperationInFlight`].
//!
//! # Examples
//!
//! ```no_run
//! use citer::{CitationClient, RequestController};
//!
//! # async fn example(page: impl citer::PageView) -> Result<(), citer::CiterError> {
//! let mut controller = RequestController::new(page, CitationClient::new()?);
//!
//! // Page load: the URL carries a requested identifier, so this fetches it.
//! controller.on_authenticated(Some("https://example.net/citation?doi=AB.1234")).await?;
//! # Ok(())
//! # }
//! ```

use url::Url;

use super::*;

/// Which action buttons the form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonMode {
  /// No record is loaded; the create button is visible.
  Create,
  /// A record was fetched or created; update and delete are visible.
  Update,
}

/// Sequences remote operations and keeps UI state consistent with their
/// outcomes.
///
/// The controller is generic over its two collaborators: the hosting page
/// (rendering, alerts, endpoint resolution) and the service transport. It
/// starts unauthenticated with a freshly initialized document and the create
/// button mode.
pub struct RequestController<P, S> {
  /// The hosting page.
  page:          P,
  /// The remote service transport.
  service:       S,
  /// The document behind the form.
  document:      DoiDocument,
  /// Current action-button mode.
  button_mode:   ButtonMode,
  /// Whether the authentication check has passed.
  authenticated: bool,
  /// Whether a remote operation is currently in flight.
  in_flight:     bool,
}

impl<P: PageView, S: CitationService> RequestController<P, S> {
  /// Creates a controller with a freshly initialized document.
  pub fn new(page: P, service: S) -> Self {
    Self {
      page,
      service,
      document: DoiDocument::new(),
      button_mode: ButtonMode::Create,
      authenticated: false,
      in_flight: false,
    }
  }

  /// Read access to the document behind the form.
  pub fn document(&self) -> &DoiDocument { &self.document }

  /// The current action-button mode.
  pub fn button_mode(&self) -> ButtonMode { self.button_mode }

  /// Read access to the hosting page.
  pub fn page(&self) -> &P { &self.page }

  /// Read access to the service transport.
  pub fn service(&self) -> &S { &self.service }

  /// Handles a successful authentication check on page load.
  ///
  /// Populates the publication-year selector with the current year and the
  /// next two, then parses the page URL's `=`-delimited query value and, if
  /// one is present, fetches that identifier.
  pub async fn on_authenticated(&mut self, page_url: Option<&str>) -> Result<(), CiterError> {
    self.authenticated = true;
    self.page.populate_year_options(&document::publication_years(Utc::now().year()));

    if let Some(page_url) = page_url {
      if let Some(identifier) = requested_identifier(page_url)? {
        debug!("Page URL requests identifier: {identifier}");
        return self.fetch_by_identifier(&identifier).await;
      }
    }
    Ok(())
  }

  /// Handles a failed authentication check: surfaces the auth prompt and
  /// leaves all functionality gated.
  pub fn on_auth_failed(&mut self, message: &str) {
    self.authenticated = false;
    self.page.show_modal("Authorization required", message, true);
  }

  /// Handles a form submission: applies the field values to the document and
  /// POSTs its wire format to the service.
  ///
  /// On success the assigned identifier is reflected back into the form, the
  /// buttons switch to update mode, the local record is replaced with the
  /// response body, and a status fetch runs for the derived suffix. On
  /// failure the button mode and record keep their pre-call state.
  pub async fn submit(&mut self, fields: &FormFields) -> Result<(), CiterError> {
    self.page.clear_alert();
    if let Err(error) = self.apply_form(fields) {
      self.page.show_failure_alert(&error.to_string());
      return Err(error);
    }

    self.begin_operation()?;
    let outcome = self.submit_request().await;
    self.in_flight = false;
    if let Err(error) = &outcome {
      self.page.set_progress(Progress::Error);
      self.page.show_failure_alert(&error.to_string());
    }
    outcome
  }

  /// Fetches the record registered under an identifier and loads it into the
  /// form, following up with a status fetch.
  pub async fn fetch_by_identifier(&mut self, identifier: &str) -> Result<(), CiterError> {
    self.page.clear_alert();
    self.begin_operation()?;
    let outcome = self.fetch_request(identifier).await;
    self.in_flight = false;
    if let Err(error) = &outcome {
      self.page.hide_modal();
      self.page.set_progress(Progress::Error);
      self.page.show_failure_alert(&error.to_string());
    }
    outcome
  }

  /// Deletes the record whose identifier the form currently shows, then
  /// resets the page to its create state.
  pub async fn delete_current(&mut self) -> Result<(), CiterError> {
    self.page.clear_alert();
    self.begin_operation()?;
    let outcome = self.delete_request().await;
    self.in_flight = false;
    if let Err(error) = &outcome {
      self.page.hide_modal();
      self.page.set_progress(Progress::Error);
      self.page.show_failure_alert(&error.to_string());
    }
    outcome
  }

  /// Fetches and renders the registration status for a DOI suffix.
  pub async fn fetch_status(&mut self, suffix: &str) -> Result<(), CiterError> {
    self.begin_operation()?;
    let outcome = self.status_request(suffix).await;
    self.in_flight = false;
    if let Err(error) = &outcome {
      self.page.hide_modal();
      self.page.set_progress(Progress::Error);
      self.page.show_failure_alert(&error.to_string());
    }
    outcome
  }

  /// Resets the page to its create state: metadata region hidden, alert
  /// cleared, progress okay, create button mode, and a fresh document.
  ///
  /// `explicit` distinguishes a user-invoked reset, which also performs the
  /// form's native input reset, from the reset that follows a delete.
  pub fn reset_form(&mut self, explicit: bool) {
    self.page.clear_metadata();
    self.page.clear_alert();
    self.page.set_progress(Progress::Okay);
    self.button_mode = ButtonMode::Create;
    self.document.reset();
    if explicit {
      self.page.reset_form_inputs();
    }
  }

  /// Gates an operation on authentication and the single-in-flight rule,
  /// surfacing either failure through the page.
  fn begin_operation(&mut self) -> Result<(), CiterError> {
    if !self.authenticated {
      let error = CiterError::AuthenticationRequired;
      self.page.show_failure_alert(&error.to_string());
      return Err(error);
    }
    if self.in_flight {
      let error = CiterError::OperationInFlight;
      self.page.show_failure_alert(&error.to_string());
      return Err(error);
    }
    self.in_flight = true;
    Ok(())
  }

  /// Applies submitted field values to the document. Creators first: a
  /// malformed author listing rejects the submission before any scalar field
  /// is touched.
  fn apply_form(&mut self, fields: &FormFields) -> Result<(), CiterError> {
    self.document.set_creators_from_text(&fields.creators)?;
    self.document.set_title(&fields.title);
    self.document.set_publisher(&fields.publisher);
    self.document.set_publication_year(&fields.publication_year);
    self.document.set_identifier(&fields.identifier);
    Ok(())
  }

  /// The submit operation body, run inside the in-flight guard.
  async fn submit_request(&mut self) -> Result<(), CiterError> {
    self.page.set_progress(Progress::Busy);
    let endpoint = self.page.resolve_service_endpoint().await?;
    let payload = self.document.to_wire_format();
    let response = self.service.create(&endpoint, &payload).await?;
    self.page.set_progress(Progress::Okay);

    let identifier = response.resource.identifier.value.clone();
    let suffix = document::doi_suffix(&identifier)?;
    self.button_mode = ButtonMode::Update;
    self.document.replace_with(response.resource);
    self.refresh_form();
    self.status_request(&suffix).await
  }

  /// The fetch operation body, run inside the in-flight guard.
  async fn fetch_request(&mut self, identifier: &str) -> Result<(), CiterError> {
    self.page.set_progress(Progress::Busy);
    self.page.show_modal("Please wait", "Processing request...", true);
    let endpoint = self.page.resolve_service_endpoint().await?;
    let response = self.service.fetch(&endpoint, identifier).await?;
    self.page.hide_modal();

    self.button_mode = ButtonMode::Update;
    let suffix = document::doi_suffix(&response.resource.identifier.value)?;
    self.document.replace_with(response.resource);
    self.refresh_form();
    self.status_request(&suffix).await
  }

  /// The delete operation body, run inside the in-flight guard.
  async fn delete_request(&mut self) -> Result<(), CiterError> {
    let suffix = document::doi_suffix(&self.page.form_identifier())?;
    self.page.set_progress(Progress::Busy);
    self.page.show_modal("Please wait", "Processing request...", true);
    let endpoint = self.page.resolve_service_endpoint().await?;
    self.service.delete(&endpoint, &suffix).await?;
    self.page.hide_modal();
    self.page.set_progress(Progress::Okay);
    self.reset_form(false);
    self.page.show_success_alert("DOI deleted");
    Ok(())
  }

  /// The status-poll body. Also chained after successful submits and
  /// fetches, inside the originating operation's guard.
  async fn status_request(&mut self, suffix: &str) -> Result<(), CiterError> {
    self.page.set_progress(Progress::Busy);
    let endpoint = self.page.resolve_service_endpoint().await?;
    let status = self.service.status(&endpoint, suffix).await?;
    self.page.hide_modal();
    self.page.set_progress(Progress::Okay);

    let link = format::storage_listing_link(&status.doistatus.data_directory.value);
    self.page.show_metadata(&status.doistatus.status.value, &link);
    Ok(())
  }

  /// Writes the document's current field values back into the form.
  fn refresh_form(&self) {
    let fields = FormFields {
      identifier:       self.document.identifier().to_string(),
      creators:         self.document.creators_as_text(),
      title:            self.document.title().to_string(),
      publisher:        self.document.publisher().to_string(),
      publication_year: self.document.publication_year().to_string(),
    };
    self.page.set_form(&fields);
  }
}

/// Extracts the requested identifier from the page URL: everything after the
/// first `=` in the query string, if any.
fn requested_identifier(page_url: &str) -> Result<Option<String>, CiterError> {
  let url = Url::parse(page_url)?;
  let Some(query) = url.query() else {
    return Ok(None);
  };
  Ok(
    query
      .splitn(2, '=')
      .nth(1)
      .filter(|value| !value.is_empty())
      .map(str::to_string),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tests::{StubPage, StubService};

  #[test]
  fn test_requested_identifier() {
    assert_eq!(
      requested_identifier("https://example.net/citation?doi=AB.1234").unwrap(),
      Some("AB.1234".to_string())
    );
    assert_eq!(requested_identifier("https://example.net/citation").unwrap(), None);
    assert_eq!(requested_identifier("https://example.net/citation?doi=").unwrap(), None);
    assert!(requested_identifier("not a url").is_err());
  }

  #[tokio::test]
  async fn test_operations_gated_until_authenticated() {
    let mut controller = RequestController::new(StubPage::default(), StubService::default());
    let error = controller.fetch_by_identifier("AB.1234").await.unwrap_err();
    assert!(matches!(error, CiterError::AuthenticationRequired));
  }

  #[tokio::test]
  async fn test_second_operation_fails_while_one_is_in_flight() {
    let mut controller = RequestController::new(StubPage::default(), StubService::default());
    controller.on_authenticated(None).await.unwrap();
    controller.in_flight = true;

    let error = controller.fetch_status("AB.1234").await.unwrap_err();
    assert!(matches!(error, CiterError::OperationInFlight));
    // The guard belongs to the operation still running; it must not be
    // released by the rejected entry.
    assert!(controller.in_flight);
  }
}

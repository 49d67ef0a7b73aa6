//! A library for creating, viewing, updating, and deleting DOI (Digital Object
//! Identifier) metadata records for datasets against a remote registration
//! service.
//!
//! The library keeps one in-memory metadata record per controller, converts it
//! to and from the flat field values of a request form, and sequences the four
//! remote operations (submit, fetch, delete, status poll) while keeping the
//! page's progress indicator and button mode consistent with each outcome.
//! Rendering and session handling live behind the [`PageView`] trait, so any
//! surface (a web page, a terminal) can host the controller.
//!
//! # Example
//! ```rust,no_run
//! use citer::{CitationClient, FormFields, RequestController};
//!
//! # async fn run(page: impl citer::PageView) -> Result<(), citer::CiterError> {
//! let service = CitationClient::new()?;
//! let mut controller = RequestController::new(page, service);
//! controller.on_authenticated(None).await?;
//!
//! let fields = FormFields {
//!   creators: "Smith, Jane".to_string(),
//!   title: "Gas Survey Data Release".to_string(),
//!   ..FormFields::default()
//! };
//! controller.submit(&fields).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
#[cfg(test)] use tracing_test::traced_test;

pub mod client;
pub mod controller;
pub mod document;
pub mod errors;
pub mod format;
pub mod page;
pub mod wire;

pub use client::{CitationClient, CitationService};
pub use controller::{ButtonMode, RequestController};
pub use document::{Creator, DoiDocument, MetadataRecord};
pub use errors::CiterError;
pub use page::{FormFields, PageView, Progress};
pub use wire::{ResourceDocument, StatusDocument};

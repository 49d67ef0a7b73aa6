use citer::{document, CitationClient, FormFields, RequestController};
use clap::{builder::ArgAction, Parser, Subcommand};
use console::{style, Emoji};
use errors::CiterdErrors;
use page::ConsolePage;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

pub mod errors;
pub mod page;

static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "");
static PENCIL: Emoji<'_, '_> = Emoji("✏️  ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✨ ", "");

#[derive(Parser)]
#[command(author, version, about = "Console front-end for DOI dataset citation requests")]
struct Cli {
  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Base URL of the DOI registration service
  #[arg(
    long,
    global = true,
    env = "CITER_ENDPOINT",
    default_value = "https://apps.canfar.net/doi/instances"
  )]
  endpoint: String,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Request a DOI for a dataset (interactive)
  Create,
  /// Fetch a DOI metadata record and its registration status
  Get {
    /// DOI (10.xxxx/suffix) or bare suffix
    identifier: String,
  },
  /// Fetch a record, edit its fields, and resubmit it
  Update {
    /// DOI (10.xxxx/suffix) or bare suffix
    identifier: String,
  },
  /// Delete a DOI metadata record
  Delete {
    /// DOI (10.xxxx/suffix) or bare suffix
    identifier: String,
  },
  /// Show the registration status of a DOI
  Status {
    /// DOI (10.xxxx/suffix) or bare suffix
    identifier: String,
  },
  /// Load the citation page from a URL, auto-fetching any requested identifier
  Open {
    /// Page URL carrying a `?doi=<identifier>` style query
    url: String,
  },
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Prompts for the form's field values, starting from the given defaults.
fn prompt_fields(page: &ConsolePage, defaults: &FormFields) -> Result<FormFields, CiterdErrors> {
  let title = dialoguer::Input::<String>::new()
    .with_prompt("Title")
    .with_initial_text(defaults.title.clone())
    .interact_text()?;

  let publisher = dialoguer::Input::<String>::new()
    .with_prompt("Publisher")
    .with_initial_text(defaults.publisher.clone())
    .allow_empty(true)
    .interact_text()?;

  println!(
    "{} Authors, one per line as {} (empty line to finish):",
    style(PENCIL).cyan(),
    style("\"family, given\"").yellow()
  );
  let mut creators = String::new();
  loop {
    let line = dialoguer::Input::<String>::new()
      .with_prompt("Author")
      .allow_empty(true)
      .interact_text()?;
    if line.trim().is_empty() {
      break;
    }
    creators.push_str(line.trim());
    creators.push('\n');
  }
  if creators.is_empty() {
    // Keep the fetched author listing when the user enters nothing.
    creators = defaults.creators.clone();
  }

  let years = page.year_options();
  let publication_year = if years.is_empty() {
    defaults.publication_year.clone()
  } else {
    let labels = years.iter().map(ToString::to_string).collect::<Vec<_>>();
    let default_index =
      labels.iter().position(|year| *year == defaults.publication_year).unwrap_or(0);
    let index = dialoguer::Select::new()
      .with_prompt("Publication year")
      .items(&labels)
      .default(default_index)
      .interact()?;
    labels[index].clone()
  };

  Ok(FormFields {
    identifier: defaults.identifier.clone(),
    creators,
    title,
    publisher,
    publication_year,
  })
}

/// Double confirmation before a delete, mirroring the page's warning flow.
fn confirm_delete() -> Result<bool, CiterdErrors> {
  if !dialoguer::Confirm::new()
    .with_prompt("Are you sure you want to delete this DOI?")
    .default(false)
    .interact()?
  {
    return Ok(false);
  }

  let input = dialoguer::Input::<String>::new()
    .with_prompt(format!(
      "{} Type {} to confirm deletion",
      style(WARNING).red(),
      style("DELETE").red().bold()
    ))
    .interact_text()?;

  Ok(input == "DELETE")
}

#[tokio::main]
async fn main() -> Result<(), CiterdErrors> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let endpoint = Url::parse(&cli.endpoint)?;
  debug!("Using DOI service endpoint: {endpoint}");

  let page = ConsolePage::new(endpoint);
  let service = CitationClient::new()?;
  let mut controller = RequestController::new(page, service);

  // The console session stands in for an authenticated browser session. The
  // open command replays a page URL, so any requested identifier loads here.
  let page_url = match &cli.command {
    Commands::Open { url } => Some(url.clone()),
    _ => None,
  };
  controller.on_authenticated(page_url.as_deref()).await?;

  match cli.command {
    Commands::Create => {
      println!("{} Describe the dataset to register:", style(ROCKET).cyan());
      let fields = prompt_fields(controller.page(), &FormFields::default())?;
      controller.submit(&fields).await?;
      println!(
        "\n{} DOI requested: {}",
        style(SUCCESS).green(),
        style(controller.document().identifier()).yellow()
      );
    },

    Commands::Get { identifier } => {
      let suffix = document::doi_suffix(&identifier)?;
      println!("{} Fetching DOI: {}", style(LOOKING_GLASS).cyan(), style(&suffix).yellow());
      controller.fetch_by_identifier(&suffix).await?;
    },

    Commands::Update { identifier } => {
      let suffix = document::doi_suffix(&identifier)?;
      println!("{} Fetching DOI: {}", style(LOOKING_GLASS).cyan(), style(&suffix).yellow());
      controller.fetch_by_identifier(&suffix).await?;

      println!("\n{} Edit the record:", style(PENCIL).cyan());
      let current = controller.page().form();
      let fields = prompt_fields(controller.page(), &current)?;
      controller.submit(&fields).await?;
      println!(
        "\n{} DOI updated: {}",
        style(SUCCESS).green(),
        style(controller.document().identifier()).yellow()
      );
    },

    Commands::Delete { identifier } => {
      let suffix = document::doi_suffix(&identifier)?;
      println!("{} Fetching DOI: {}", style(LOOKING_GLASS).cyan(), style(&suffix).yellow());
      controller.fetch_by_identifier(&suffix).await?;

      if !confirm_delete()? {
        println!("{} Operation cancelled", style("✖").red());
        return Ok(());
      }
      controller.delete_current().await?;
    },

    Commands::Status { identifier } => {
      let suffix = document::doi_suffix(&identifier)?;
      println!(
        "{} Checking status of DOI: {}",
        style(LOOKING_GLASS).cyan(),
        style(&suffix).yellow()
      );
      controller.fetch_status(&suffix).await?;
    },

    // Handled above: the page URL was passed to the authentication step.
    Commands::Open { .. } => {},
  }

  Ok(())
}

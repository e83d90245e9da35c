//! `pubmd` publish command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use clap::builder::FalseyValueParser;
use pubmd_api::{
    ArticleClient, ArticlePublisher, DryRunResult, PublishAction, PublishResult, Transport,
    UreqTransport,
};
use pubmd_article::{ArticleSource, build_payload};
use pubmd_config::{CliSettings, Config};
use tracing::debug;

use crate::error::CliError;
use crate::output::Output;

/// Folder used when running locally in the DEV environment.
const DEV_ARTICLE_FOLDER: &str = "test";

/// Arguments for publishing an article.
#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Folder holding the article `.md` file and an optional `photos/` folder.
    #[arg(env = "INPUT_ARTICLE_FOLDER")]
    folder: Option<PathBuf>,

    /// API host, without scheme.
    #[arg(long, env = "BASE_DOMAIN")]
    base_domain: Option<String>,

    /// Path for creating and updating articles.
    #[arg(long, env = "ENDPOINT")]
    endpoint: Option<String>,

    /// Path listing existing articles.
    #[arg(long, env = "GET_ENDPOINT")]
    get_endpoint: Option<String>,

    /// Basic auth user.
    #[arg(long, env = "USERNAME")]
    username: Option<String>,

    /// Basic auth password.
    #[arg(long, env = "PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Environment mode: DEV (http, debug logs) or PROD (https).
    #[arg(long = "env", env = "ENV", value_name = "MODE")]
    environment: Option<String>,

    /// Build the payload without sending any request.
    #[arg(long, env = "DRY_RUN", value_parser = FalseyValueParser::new())]
    dry_run: bool,

    /// Path to configuration file (default: auto-discover pubmd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log requests and responses.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// What a run did.
#[derive(Debug)]
pub(crate) enum Outcome {
    DryRun(DryRunResult),
    Published(PublishResult),
}

impl PublishArgs {
    /// Load `pubmd.toml` and layer the flags and environment on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value is invalid.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        Ok(Config::load(
            self.config.as_deref(),
            Some(&self.cli_settings()),
        )?)
    }

    /// Log filter directive implied by the flags and loaded config.
    ///
    /// `None` defers to `RUST_LOG`.
    pub(crate) fn log_directive(&self, config: &Config) -> Option<&'static str> {
        if self.verbose {
            Some("info")
        } else if config.environment.is_development() {
            Some("debug")
        } else {
            None
        }
    }

    /// Execute the publish command.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery, payload building, lookup, or the
    /// create/update call fails.
    pub(crate) fn execute(self, config: &Config) -> Result<(), CliError> {
        let output = Output::new();

        let folder = self.resolve_folder(config)?;
        output.info(&format!("Publishing {}...", folder.display()));

        match run(&folder, config, UreqTransport::new())? {
            Outcome::DryRun(result) => print_dry_run_result(&output, &result),
            Outcome::Published(result) => print_publish_result(&output, &result),
        }
        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            base_domain: self.base_domain.clone(),
            endpoint: self.endpoint.clone(),
            get_endpoint: self.get_endpoint.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            environment: self.environment.clone(),
            dry_run: self.dry_run.then_some(true),
        }
    }

    fn resolve_folder(&self, config: &Config) -> Result<PathBuf, CliError> {
        if let Some(folder) = &self.folder {
            return Ok(folder.clone());
        }
        if config.environment.is_development() {
            debug!("No article folder given, using local '{DEV_ARTICLE_FOLDER}' folder");
            return Ok(PathBuf::from(DEV_ARTICLE_FOLDER));
        }
        Err(CliError::Validation(
            "article folder required (pass FOLDER or set INPUT_ARTICLE_FOLDER)".to_owned(),
        ))
    }
}

/// Discover, build, and publish the article in `folder`.
///
/// The API configuration is validated before anything is read. A dry run
/// skips that check and never touches `transport`.
pub(crate) fn run<T: Transport>(
    folder: &Path,
    config: &Config,
    transport: T,
) -> Result<Outcome, CliError> {
    let api = if config.dry_run {
        None
    } else {
        Some(config.require_api()?)
    };

    let source = ArticleSource::discover(folder)?;
    debug!(
        name = %source.name,
        article = %source.article_path.display(),
        photos = ?source.photos_dir,
        "Discovered article"
    );
    let article = build_payload(&source)?;

    let Some(api) = api else {
        return Ok(Outcome::DryRun(DryRunResult::new(&article)));
    };

    let client = ArticleClient::with_transport(&api, transport);
    let result = ArticlePublisher::new(&client).publish(&article)?;
    Ok(Outcome::Published(result))
}

fn print_dry_run_result(output: &Output, result: &DryRunResult) {
    output.highlight("\n[DRY RUN] No requests sent.");
    output.field("Title", &result.title);
    output.field("Content", format!("{} bytes", result.content_length));

    if result.image_names.is_empty() {
        output.info("No images.");
    } else {
        output.info(&format!("\nImages ({}):", result.image_names.len()));
        for name in &result.image_names {
            output.item(name);
        }
    }

    if result.pending_images > 0 {
        output.warning(&format!(
            "\n{} image(s) would be sent without data",
            result.pending_images
        ));
    }
}

fn print_publish_result(output: &Output, result: &PublishResult) {
    match result.action {
        PublishAction::Create => output.success("\nArticle created successfully!"),
        PublishAction::Update { .. } => output.success("\nArticle updated successfully!"),
    }
    if let Some(id) = result.article_id {
        output.field("ID", id);
    }
    output.field("Status", result.status);

    if result.images_uploaded > 0 {
        output.field("Images uploaded", result.images_uploaded);
    }

    if !result.failed_uploads.is_empty() {
        output.warning(&format!(
            "\nWarning: {} image upload(s) failed:",
            result.failed_uploads.len()
        ));
        for failure in &result.failed_uploads {
            output.item(&format!("{} ({}): {}", failure.filename, failure.url, failure.error));
        }
    }
}

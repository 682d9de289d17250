//! Descriptify CLI - stands in for the hosting runtime.
//!
//! This is the main binary entry point. See the `descriptify` library for
//! the core functionality.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use descriptify::commands::{self, ConsoleSink};
use descriptify::notifications::NotificationScheduler;
use descriptify::{
    Config, HostContext, OpenAiGenerator, Orchestrator, RecordStore, SecretStore, StripeClient,
    StripeProductStore, StripeSecretStore, TextGenerator,
};

// CLI
#[derive(Parser)]
#[command(name = "descriptify")]
#[command(version)]
#[command(about = "Store a per-user OpenAI key and generate product descriptions")]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Identity the host would normally supply.
#[derive(clap::Args)]
struct UserArgs {
    /// User id the secret is scoped to
    #[arg(long)]
    user: String,
    /// Display name used in greetings
    #[arg(long, default_value = "there")]
    user_name: String,
}

impl UserArgs {
    fn context(&self) -> HostContext {
        HostContext::new(&self.user, &self.user_name)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the user's stored OpenAI key
    Secret {
        #[command(flatten)]
        user: UserArgs,
        #[command(subcommand)]
        action: SecretAction,
    },
    /// Show whether the user's OpenAI key is configured
    Status {
        #[command(flatten)]
        user: UserArgs,
    },
    /// Work with a product's description
    Product {
        #[command(flatten)]
        user: UserArgs,
        /// Product id
        #[arg(long)]
        product: String,
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum SecretAction {
    /// Store the key, replacing any existing one
    Create {
        /// Key value
        #[arg(long)]
        payload: String,
        /// Expiry as Unix seconds
        #[arg(long)]
        expires_at: Option<i64>,
    },
    /// Show the stored key (masked)
    Find,
    /// Delete the stored key
    Delete,
    /// List every secret in the user's scope
    List,
}

#[derive(Subcommand)]
enum ProductAction {
    /// Show product details
    Show,
    /// Generate a description suggestion
    Generate {
        /// Feature tags, comma-separated
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Save a (reviewed) description onto the product
    Save {
        /// Description text
        #[arg(long)]
        description: String,
    },
}

/// Clients shared by every command in one invocation.
struct Session {
    secrets: Arc<dyn SecretStore>,
    orchestrator: Orchestrator,
}

impl Session {
    fn connect(config: &Config) -> Result<Self> {
        if !config.has_api_key() {
            anyhow::bail!("DESCRIPTIFY_STRIPE_API_KEY is not set");
        }

        let api = StripeClient::new(
            &config.stripe_api_base,
            &config.stripe_api_key,
            config.store_timeout(),
        )
        .context("Failed to create API client")?;

        let secrets: Arc<dyn SecretStore> = Arc::new(StripeSecretStore::new(api.clone()));
        let records: Arc<dyn RecordStore> = Arc::new(StripeProductStore::new(api));
        let generator: Arc<dyn TextGenerator> = Arc::new(
            OpenAiGenerator::new(
                &config.generation_api_base,
                &config.model,
                config.max_tokens,
                config.request_timeout(),
            )
            .context("Failed to create generation client")?,
        );

        let notifications = NotificationScheduler::new(Arc::new(ConsoleSink));
        let orchestrator =
            Orchestrator::new(Arc::clone(&secrets), generator, records, notifications);

        Ok(Self {
            secrets,
            orchestrator,
        })
    }
}

fn init_logging() -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format_timestamp_secs();

    // DESCRIPTIFY_LOG_FILE keeps log lines out of command output. Appends so
    // each invocation adds to the history.
    if let Ok(path) = std::env::var("DESCRIPTIFY_LOG_FILE") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file at {path}"))?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Config => {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&config)?)?;
        }
        Commands::Secret { user, action } => {
            let session = Session::connect(&config)?;
            let ctx = user.context();
            let store = session.secrets.as_ref();
            match action {
                SecretAction::Create {
                    payload,
                    expires_at,
                } => {
                    commands::secrets::create(store, &ctx, &payload, expires_at, &mut stdout)
                        .await?;
                }
                SecretAction::Find => commands::secrets::find(store, &ctx, &mut stdout).await?,
                SecretAction::Delete => commands::secrets::delete(store, &ctx, &mut stdout).await?,
                SecretAction::List => commands::secrets::list(store, &ctx, &mut stdout).await?,
            }
        }
        Commands::Status { user } => {
            let session = Session::connect(&config)?;
            commands::home::status(&session.orchestrator, &user.context(), &mut stdout).await?;
        }
        Commands::Product {
            user,
            product,
            action,
        } => {
            let session = Session::connect(&config)?;
            let ctx = user.context().with_object(product);
            let orchestrator = &session.orchestrator;
            match action {
                ProductAction::Show => {
                    commands::product::show(orchestrator, &ctx, &mut stdout).await?;
                }
                ProductAction::Generate { tags } => {
                    commands::product::generate(orchestrator, &ctx, &tags, &mut stdout).await?;
                }
                ProductAction::Save { description } => {
                    commands::product::save(orchestrator, &ctx, &description, &mut stdout).await?;
                }
            }
        }
    }

    Ok(())
}

//! Formquiz - Main Entry Point
//!
//! Parses the command line, builds the configuration once, obtains a
//! Google credential and assembles the quiz form.

mod prompt;
mod questions;
mod report;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use formquiz_application::config::{
    DEFAULT_API_BASE, DEFAULT_CALLBACK_PORT, DEFAULT_CLIENT_SECRETS, DEFAULT_TOKEN_CACHE,
};
use formquiz_application::{
    AppConfig, ApplicationError, ApplicationResult, AuthEvent, CredentialProvider, FormAssembler,
};
use formquiz_domain::{Credential, QuestionRecord, sample_questions};
use formquiz_infrastructure::{
    FileClientSecrets, FileCredentialCache, GoogleOAuth2Provider, ReqwestFormsClient,
    SystemClock, TokioFileSystem, to_json_stable,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::prompt::Prompter;

#[derive(Parser)]
#[command(name = "formquiz")]
#[command(version, about = "Create Google Forms quizzes from the command line")]
struct Cli {
    /// OAuth 2.0 client secrets downloaded from the Google Cloud Console
    #[arg(long, global = true, env = "FORMQUIZ_CLIENT_SECRETS", default_value = DEFAULT_CLIENT_SECRETS)]
    client_secrets: PathBuf,

    /// Where the credential is cached between runs
    #[arg(long, global = true, env = "FORMQUIZ_TOKEN_CACHE", default_value = DEFAULT_TOKEN_CACHE)]
    token_cache: PathBuf,

    /// Local port receiving the authorization redirect
    #[arg(long, global = true, env = "FORMQUIZ_CALLBACK_PORT", default_value_t = DEFAULT_CALLBACK_PORT)]
    callback_port: u16,

    /// Forms API base URL
    #[arg(long, global = true, env = "FORMQUIZ_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config(&self) -> AppConfig {
        AppConfig::default()
            .with_client_secrets(&self.client_secrets)
            .with_token_cache(&self.token_cache)
            .with_callback_port(self.callback_port)
            .with_api_base(&self.api_base)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Obtain and cache a credential, then exit
    Login,

    /// Create a quiz form
    Create(CreateArgs),
}

#[derive(Args)]
struct CreateArgs {
    /// Form title (prompted for when omitted)
    #[arg(short, long)]
    title: Option<String>,

    /// Document title shown in Drive (defaults to the form title)
    #[arg(short, long)]
    doc_title: Option<String>,

    /// JSON file with an array of {text, options, correct_index, points}
    #[arg(short, long, conflicts_with = "sample")]
    questions: Option<PathBuf>,

    /// Use the built-in general-knowledge questions
    #[arg(long)]
    sample: bool,

    /// Print the question batch instead of calling the API
    #[arg(long)]
    dry_run: bool,
}

impl CreateArgs {
    /// True when any answer will be read from the terminal.
    const fn prompts(&self) -> bool {
        self.title.is_none()
            || self.doc_title.is_none()
            || (self.questions.is_none() && !self.sample)
    }

    /// Interactive runs authenticate before the first prompt.
    const fn authenticates_first(&self) -> bool {
        !self.dry_run && self.prompts()
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    let outcome = match cli.command {
        Commands::Login => login(&config).await,
        Commands::Create(args) => create(args, &config).await,
    };

    if let Err(error) = outcome {
        for line in report::error_lines(&error, &config.client_secrets_path) {
            eprintln!("{line}");
        }
    }
}

async fn login(config: &AppConfig) -> ApplicationResult<()> {
    authenticate(config).await?;
    println!("Credentials saved to {}", config.token_cache_path.display());
    Ok(())
}

async fn create(args: CreateArgs, config: &AppConfig) -> ApplicationResult<()> {
    let early = if args.authenticates_first() {
        Some(authenticate(config).await?)
    } else {
        None
    };

    let (title, doc_title, questions) = gather_input(&args).await?;

    if args.dry_run {
        return print_batch(&questions);
    }

    if questions.is_empty() {
        println!("No questions were added. Exiting.");
        return Ok(());
    }

    let credential = match early {
        Some(credential) => credential,
        None => authenticate(config).await?,
    };
    let client = ReqwestFormsClient::new(&config.api_base_url, &credential)?;
    let assembler = FormAssembler::new(Arc::new(client));

    let result = assembler.create(&title, &doc_title, &questions).await;
    for line in report::summary_lines(&result) {
        println!("{line}");
    }
    Ok(())
}

/// Resolves title, document title and questions from flags or prompts.
async fn gather_input(
    args: &CreateArgs,
) -> ApplicationResult<(String, String, Vec<QuestionRecord>)> {
    let from_file = match &args.questions {
        Some(path) => Some(questions::load_questions(&TokioFileSystem::new(), path).await?),
        None if args.sample => Some(sample_questions()),
        None => None,
    };

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let title = match &args.title {
        Some(title) => title.clone(),
        None => prompter.title()?,
    };
    let doc_title = match &args.doc_title {
        Some(doc_title) => doc_title.clone(),
        None => prompter.document_title(&title)?,
    };
    let questions = match from_file {
        Some(questions) => questions,
        None => prompter.questions()?,
    };

    Ok((title, doc_title, questions))
}

fn print_batch(questions: &[QuestionRecord]) -> ApplicationResult<()> {
    let (batch, rejected) =
        FormAssembler::<ReqwestFormsClient>::prepare_batch(questions).into_parts();
    let json = to_json_stable(&batch).map_err(|e| ApplicationError::Io(io::Error::other(e)))?;

    println!("{json}");
    for line in report::rejected_lines(&rejected) {
        eprintln!("{line}");
    }
    info!(valid = batch.len(), rejected = rejected.len(), "Dry run, nothing sent");
    Ok(())
}

async fn authenticate(config: &AppConfig) -> ApplicationResult<Credential> {
    let fs = TokioFileSystem::new();
    let server = GoogleOAuth2Provider::new()
        .with_callback_port(config.callback_port)
        .with_notifier(|event| match event {
            AuthEvent::AwaitingUser { .. } => println!("{}", event.message()),
            other => info!("{}", other.message()),
        });

    let provider = CredentialProvider::new(
        Arc::new(FileCredentialCache::new(fs, &config.token_cache_path)),
        Arc::new(FileClientSecrets::new(fs, &config.client_secrets_path)),
        Arc::new(server),
        Arc::new(SystemClock),
        config,
    );

    Ok(provider.obtain().await?)
}

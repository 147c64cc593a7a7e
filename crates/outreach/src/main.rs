use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use outreach_common::{logger, AppConfig};
use outreach_llm::Category;
use outreach_server::{AppState, OutreachForm};
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
            return;
        }
    }

    dotenv::dotenv().ok();
}

#[derive(Parser)]
#[command(name = "outreach")]
#[command(about = "Outreach - draft short outreach emails with a hosted language model", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web form server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Draft one email in the terminal
    Draft(DraftArgs),
}

#[derive(Args)]
struct DraftArgs {
    /// Kind of opportunity (job or grant)
    #[arg(long, default_value = "job")]
    category: Category,

    /// Core description of the opportunity
    #[arg(long, default_value = "")]
    description: String,

    /// What the email should focus on
    #[arg(long, default_value = "")]
    key_message: String,

    /// Contact name
    #[arg(long, default_value = "")]
    name: String,

    /// Contact title (the hiring manager, not the role being hired)
    #[arg(long, default_value = "")]
    title: String,

    /// Append a starter email as a style reference
    #[arg(long)]
    style_sample: bool,
}

impl From<DraftArgs> for OutreachForm {
    fn from(args: DraftArgs) -> Self {
        Self {
            category: args.category,
            description: args.description,
            key_message: args.key_message,
            contact_name: args.name,
            contact_title: args.title,
            include_style_sample: args.style_sample,
        }
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;
    if let Some(level) = &cli.log_level {
        config.log_level = logger::parse_log_level(level).to_string().to_lowercase();
    }

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            config.validate()?;

            logger::init_from_config(&config)?;
            tracing::info!("Outreach starting...");
            tracing::info!("Configuration loaded: {:?}", config);

            println!("Server listening on http://{}", config.server_bind_address());
            outreach_server::start_server(config).await?;
        }
        Some(Commands::Draft(args)) => {
            config.validate()?;
            logger::init_from_config(&config)?;
            run_draft(config, args.into()).await?;
        }
        None => {
            config.validate()?;
            logger::init_from_config(&config)?;
            tracing::info!("Outreach starting with default configuration...");

            println!("Server listening on http://{}", config.server_bind_address());
            outreach_server::start_server(config).await?;
        }
    }

    Ok(())
}

/// Run one submission and print both stages
async fn run_draft(config: AppConfig, form: OutreachForm) -> Result<()> {
    let state = AppState::new(config)?;
    let outcome = state.workflow.run(&form).await;

    if let Some(shortened) = &outcome.shortened {
        println!("== Shortened description ==\n{}\n", shortened);
    }
    if let Some(email) = &outcome.email {
        println!("== Email ==\n{}", email);
    }

    if let Some(err) = outcome.error {
        bail!("{}", err.message);
    }

    Ok(())
}

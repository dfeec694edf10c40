use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use editquote::cli::quote::{QuoteOutput, QuoteRequest};
use editquote::core::RawSelection;
use editquote::core::log::init_logging;
use editquote::core::summary::InquiryForm;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show whether requests are currently accepted
    Status,
    /// Display the published price tables
    Tables,
    /// Estimate the price of an edit
    Quote(QuoteArgs),
}

#[derive(Args)]
struct QuoteArgs {
    /// Source video length: a bracket label, or minutes with the range layout
    #[arg(short, long)]
    raw_length: Option<String>,

    /// Length of the finished video in minutes
    #[arg(short, long)]
    final_minutes: Option<String>,

    /// Package id, e.g. economy or standard
    #[arg(short, long)]
    package: Option<String>,

    /// Edit point within the package
    #[arg(short, long)]
    edit_point: Option<String>,

    /// Extra to add, in the order chosen (repeatable)
    #[arg(short = 'x', long = "extra")]
    extras: Vec<String>,

    /// Number of additional moments
    #[arg(short, long)]
    moments: Option<String>,

    /// Number of people on screen
    #[arg(long)]
    collab: Option<String>,

    /// Print the selection and result as JSON
    #[arg(long, conflicts_with = "copy")]
    json: bool,

    /// Print the calculator summary and inquiry form for pasting
    #[arg(long)]
    copy: bool,

    /// Channel link for the inquiry form
    #[arg(long, requires = "copy")]
    channel: Option<String>,

    /// Link to the source footage for the inquiry form
    #[arg(long, requires = "copy")]
    share: Option<String>,

    /// Concept and references for the inquiry form
    #[arg(long, requires = "copy")]
    concept: Option<String>,

    /// Other requirements for the inquiry form
    #[arg(long, requires = "copy")]
    notes: Option<String>,
}

impl From<QuoteArgs> for QuoteRequest {
    fn from(args: QuoteArgs) -> QuoteRequest {
        let output = if args.json {
            QuoteOutput::Json
        } else if args.copy {
            QuoteOutput::Copy
        } else {
            QuoteOutput::Table
        };
        QuoteRequest {
            selection: RawSelection {
                raw_length: args.raw_length,
                final_length: args.final_minutes,
                package: args.package,
                edit_point: args.edit_point,
                extras: args.extras,
                moments: args.moments,
                collab: args.collab,
            },
            form: InquiryForm {
                channel: args.channel.unwrap_or_default(),
                share: args.share.unwrap_or_default(),
                concept: args.concept.unwrap_or_default(),
                notes: args.notes.unwrap_or_default(),
            },
            output,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => editquote::cli::setup::setup(),
        Some(Commands::Status) => {
            editquote::run_command(editquote::AppCommand::Status, config_path).await
        }
        Some(Commands::Tables) => {
            editquote::run_command(editquote::AppCommand::Tables, config_path).await
        }
        Some(Commands::Quote(args)) => {
            editquote::run_command(editquote::AppCommand::Quote(args.into()), config_path).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

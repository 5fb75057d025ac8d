use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "planix", version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_TIMESTAMP"), ")"), about = "AI-assisted secure architecture reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Manage API users
    User(UserArgs),
    /// Generate one report from the command line without storing it
    Analyze(AnalyzeArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Provider overrides shared by commands that talk to the model.
#[derive(Args, Clone, Default)]
pub struct LlmArgs {
    /// LLM provider: gemini, openai, demo
    #[arg(long)]
    pub provider: Option<String>,

    /// LLM model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// LLM API key (or use env vars)
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Args, Clone)]
pub struct UserArgs {
    #[command(subcommand)]
    pub action: UserCommand,
}

#[derive(Subcommand, Clone)]
pub enum UserCommand {
    /// Create a user and print their API token
    Add(UserAddArgs),
}

#[derive(Args, Clone)]
pub struct UserAddArgs {
    /// Login name
    pub username: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,
}

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Project name
    #[arg(long)]
    pub name: String,

    /// What the system does
    #[arg(long, default_value = "")]
    pub description: String,

    /// web, mobile, api, iot, cloud, other
    #[arg(long)]
    pub platform: String,

    /// Technologies in use
    #[arg(long, default_value = "")]
    pub tech_stack: String,

    /// small, medium or large
    #[arg(long, default_value = "small")]
    pub scale: String,

    /// Budget in whole currency units
    #[arg(long, default_value = "0")]
    pub budget: u64,

    /// low, medium, high
    #[arg(long, default_value = "medium")]
    pub risk_level: String,

    /// Print the analysis as JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}

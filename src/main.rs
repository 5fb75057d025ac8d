use clap::Parser;
use planix::{cli, config, errors};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.with_ansi(!cli.no_color).init();
    }

    let result = match cli.command {
        cli::Commands::Serve(args) => cli::serve::handle_serve(args).await,
        cli::Commands::User(args) => cli::user::handle_user(args).await,
        cli::Commands::Analyze(args) => cli::analyze::handle_analyze(args).await,
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            errors::PlanixError::Config(_) => 2,
            errors::PlanixError::Authentication(_) => 4,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), errors::PlanixError> {
    let path = std::path::PathBuf::from(&args.config);
    let config = config::parse_config(&path).await?;
    let llm = config.llm();
    println!("Configuration is valid: {}", args.config);
    println!("  server:   {}:{}", config.host(), config.port());
    println!("  database: {}", config.db_path());
    println!("  provider: {}", llm.provider());
    Ok(())
}

use anyhow::Result;
use clap::Parser;
use stagevisor::{signals, DemoComponent, LoggingConfig, StopSignal, Supervisor, SupervisorConfig};
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(name = "stagevisor")]
#[command(about = "Staged lifecycle supervisor for managed components")]
#[command(version)]
#[command(long_about = "Drives managed components through critical and non-critical \
resource acquisition, a repeated work step, and release, retrying non-critical \
resources and shutting down in order on SIGINT or SIGTERM.")]
struct Args {
    /// TOML file with [logging] and [demo] sections; missing file means defaults
    #[arg(short, long, default_value = "stagevisor.toml")]
    config: String,

    /// Log every state transition and phase result
    #[arg(short, long)]
    debug: bool,

    /// Log phase failures, retries and stop requests
    #[arg(short, long)]
    verbose: bool,

    /// Only log component failures and startup errors
    #[arg(short, long, conflicts_with_all = ["debug", "verbose"])]
    quiet: bool,

    /// Check the configuration and exit without running any phase
    #[arg(long)]
    validate_config: bool,

    /// Print the built-in configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Log output format, overriding logging.format
    #[arg(long, value_name = "FORMAT", value_parser = ["pretty", "compact", "json"])]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        println!("# Stagevisor Configuration File");
        print!("{}", SupervisorConfig::default().to_toml()?);
        return Ok(());
    }

    let config = SupervisorConfig::load_from_file(&args.config)?;

    if args.validate_config {
        match config.validate() {
            Ok(()) => {
                println!("✓ Configuration is valid");
                return Ok(());
            }
            Err(e) => {
                eprintln!("✗ Configuration validation failed: {}", e);
                std::process::exit(1);
            }
        }
    }
    config.validate()?;

    init_logging(&args, &config.logging);

    info!("Starting stagevisor v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {}", args.config);
    debug!("Effective configuration: {:?}", config);

    let stop = StopSignal::new();
    let mut supervisor = Supervisor::new(stop.clone());

    if config.demo.enabled {
        supervisor.register(Box::new(DemoComponent::from_config(&config.demo)))?;
    }

    // Shutdown capability must exist before the first phase runs
    let _listener = signals::install(stop).map_err(|e| {
        error!("Failed to set up signal handling: {}", e);
        e
    })?;

    let exit_code = tokio::task::spawn_blocking(move || supervisor.run())
        .await
        .map_err(|e| {
            error!("Supervisor loop terminated abnormally: {}", e);
            e
        })?;

    info!("Stagevisor exited with code: {}", exit_code);
    std::process::exit(exit_code);
}

fn init_logging(args: &Args, logging: &LoggingConfig) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    // CLI flags win over the config file; RUST_LOG wins over both
    let log_level = match (args.debug, args.verbose, args.quiet) {
        (true, _, _) => "debug",
        (_, true, _) => "info",
        (_, _, true) => "error",
        _ => logging.level.as_str(),
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stagevisor={}", log_level)));

    // The supervisor loop runs on a blocking thread, the signal listener on a worker
    let fmt_layer = match args.log_format.as_deref().unwrap_or(logging.format.as_str()) {
        "json" => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_names(true)
            .boxed(),
        "compact" => fmt::layer().compact().with_target(false).boxed(),
        _ => fmt::layer()
            .pretty()
            .with_target(args.debug)
            .with_thread_names(args.debug)
            .with_file(args.debug)
            .with_line_number(args.debug)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["stagevisor"]).unwrap();

        assert_eq!(args.config, "stagevisor.toml");
        assert!(!args.debug && !args.verbose && !args.quiet);
        assert_eq!(args.log_format, None);
    }

    #[test]
    fn test_log_format_is_restricted() {
        let args = Args::try_parse_from(["stagevisor", "--log-format", "json"]).unwrap();
        assert_eq!(args.log_format.as_deref(), Some("json"));

        assert!(Args::try_parse_from(["stagevisor", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_debug() {
        assert!(Args::try_parse_from(["stagevisor", "--quiet", "--debug"]).is_err());
        assert!(Args::try_parse_from(["stagevisor", "-q", "-c", "other.toml"]).is_ok());
    }
}

use clap::Parser;
use job_agent::cli::{handle_command, Cli};
use job_agent::error::MatchError;
use job_agent::report::render_error;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "job_agent=info,rocket::server=off";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    if let Err(e) = handle_command(cli).await {
        match e.downcast_ref::<MatchError>() {
            Some(err) => eprint!("{}", render_error(err)),
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool, log_json: bool) {
    let filter = if verbose {
        EnvFilter::new("job_agent=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init();
    }
}

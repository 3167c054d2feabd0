mod cli;
mod run;

use clap::Parser;
use clap::error::ErrorKind;

fn main() {
    // Initialize tracing; stdout may carry masked data, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let code = match run::run(cli) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("{:#}", err);
            run::exit_code(&err)
        }
    };

    std::process::exit(code);
}

mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hassfly_core::{Session, backend_for};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands never touch the probe or the server
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "hassfly", &mut std::io::stdout());
            Ok(())
        }

        // Network commands need the probe backend but no server session
        Command::Networks(args) => commands::networks::handle(args, &cli.global).await,

        // Entity and template commands need a resolved server session
        Command::Entities(args) => {
            let session = connect(&cli.global).await?;
            commands::entities::handle(&session, args, &cli.global).await
        }
        Command::Template(args) => {
            let session = connect(&cli.global).await?;
            commands::template::handle(&session, args, &cli.global).await
        }
    }
}

/// Build config, probe the network, and connect a session.
async fn connect(global: &cli::GlobalOpts) -> Result<Session, CliError> {
    let (server_config, home) = config::build_server_config(global)?;
    let backend = backend_for(server_config.network_tool);
    let session = Session::connect(&server_config, &home, backend.as_ref()).await?;
    tracing::debug!(
        base_url = %session.endpoint().base_url,
        via_home_network = session.endpoint().via_home_network,
        "session connected"
    );
    Ok(session)
}

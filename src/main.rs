use clap::Parser;
use depview::cli::{Cli, Command, ServeArgs};
use depview::{cmd_export, cmd_init, cmd_serve};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let exit_code = match cli.command {
        Some(Command::Serve(args)) => cmd_serve(args),
        Some(Command::Export(args)) => cmd_export(args),
        Some(Command::Init(args)) => cmd_init(args),
        None => cmd_serve(ServeArgs::default()),
    };

    std::process::exit(exit_code);
}

/// `RUST_LOG` wins over the verbosity flags.
fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("depview={level},tower_http={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

use clap::Parser;

use cascade::cli::{self, Cli, Commands};

fn main() {
    let args = Cli::parse();
    let config_path = args.config.as_deref();

    let result = match &args.command {
        Commands::Serve { host, port } => cli::commands::serve::execute(
            config_path,
            host.as_deref(),
            *port,
            args.verbose,
            args.quiet,
        ),
        Commands::Config => cli::commands::config::execute(config_path),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

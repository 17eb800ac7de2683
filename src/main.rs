use clap::Parser;
use checklist::cli::commands::{Cli, Commands};
use checklist::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => handlers::start_dir(cli.dir.as_deref())
            .and_then(|start| checklist::tui::run(&start)),
        // Init is handled before discovery
        Some(Commands::Init(args)) => handlers::start_dir(cli.dir.as_deref())
            .and_then(|start| handlers::cmd_init(args, &start)),
        Some(_) => handlers::dispatch(cli),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

use clap::Parser;
use skita::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encrypt {
            ref files,
            ref out_dir,
            ref algorithm,
            force,
        } => skita::cli::commands::encrypt::execute(
            files,
            out_dir.as_deref(),
            algorithm.as_deref(),
            force,
        ),
        Commands::Decrypt {
            ref files,
            ref out_dir,
            force,
        } => skita::cli::commands::decrypt::execute(files, out_dir.as_deref(), force),
        Commands::Inspect { ref file, json } => {
            skita::cli::commands::inspect::execute(file, json)
        }
        Commands::History { last } => skita::cli::commands::history::execute(last),
        Commands::Genpass { words } => skita::cli::commands::genpass::execute(words),
        Commands::Completions { shell } => skita::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        skita::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

use clap::Parser;
use geomux::cli::{
    handle_completions, handle_config_init, handle_key, handle_providers, init_tracing,
    load_config_with_overrides, run_lookup, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Lookup(args) => match load_config_with_overrides(&args) {
            Ok(config) => {
                if let Err(e) = init_tracing(&config.logging) {
                    eprintln!("Warning: Failed to initialize logging: {}", e);
                }
                match run_lookup(config, &args).await {
                    Ok(output) => {
                        println!("{}", output);
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        },
        Commands::Key(args) => {
            println!("{}", handle_key(&args));
            Ok(())
        }
        Commands::Providers(args) => match handle_providers(&args) {
            Ok(output) => {
                println!("{}", output);
                Ok(())
            }
            Err(e) => Err(e),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use clap::{Parser, Subcommand};
use plugscript::{
    commands::{
        build::{self, BuildCommand},
        check::{self, CheckCommand},
        config::{self, ConfigAction},
        translate::{self, TranslateCommand},
    },
    init_tracing, GlobalOpts,
};
use plugscript_logger as logger;

#[derive(Parser)]
#[command(name = "plugscript")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Bukkit plugin translator",
    long_about = "plugscript translates a JavaScript-like plugin script into Bukkit Java sources, a plugin.yml manifest and a packaged jar."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate, compile and package a plugin script
    Build(BuildCommand),
    /// Translate a plugin script into Java sources and plugin.yml
    Translate(TranslateCommand),
    /// Show what a plugin script translates to without writing anything
    Check(CheckCommand),
    /// Configure plugscript
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

fn main() {
    let cli = Cli::parse();
    let verbosity = cli.global.verbosity_level();

    if let Err(e) = logger::init_with_verbosity(verbosity) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    init_tracing(verbosity);

    let result = match cli.command {
        Commands::Build(cmd) => build::handle_build(cmd, cli.global),
        Commands::Translate(cmd) => translate::handle_translate(cmd, cli.global),
        Commands::Check(cmd) => check::handle_check(cmd, cli.global),
        Commands::Config { action } => {
            if !config::handle_config(action, cli.global) {
                std::process::exit(1);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        logger::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

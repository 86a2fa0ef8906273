//! swagger-ui-env CLI
//!
//! Entry point for the `swagger-ui-env` command-line tool.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use swagger_ui_env::render::oauth_options;
use swagger_ui_env::{
    inject_file, serialize, translate, utf8_vars, BaseConfig, InjectError, OverridesFile,
    SchemaTable, TranslateOptions,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swagger-ui-env")]
#[command(about = "Generate Swagger UI configuration from environment variables", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the config fragment for the current environment
    Render {
        /// Seed the output with the built-in base config
        #[arg(long)]
        base: bool,

        /// Render the fragment passed to `ui.initOAuth` instead of the main config
        #[arg(long, conflicts_with_all = ["base", "config"])]
        oauth: bool,

        /// Path to an overrides file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Show how each recognized variable was resolved
    Explain {
        /// Seed with the built-in base config
        #[arg(long)]
        base: bool,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,

        /// Path to an overrides file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Rewrite the Swagger UI call region of an HTML template in place
    Inject {
        /// Template file to rewrite
        template: PathBuf,

        /// Path to an overrides file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            base,
            oauth,
            config,
        } => run_render(base, oauth, config),
        Commands::Explain {
            base,
            human,
            config,
        } => run_explain(base, human, config),
        Commands::Inject { template, config } => run_inject(template, config),
    }
}

fn process_env() -> Vec<(String, String)> {
    utf8_vars(std::env::vars_os())
}

fn load_options(config_path: Option<PathBuf>, inject_base_config: bool) -> TranslateOptions {
    let mut schema = SchemaTable::standard();
    let mut base_config = BaseConfig::default();

    if let Some(path) = config_path {
        match OverridesFile::load(&path) {
            Ok(overrides) => overrides.apply(&mut schema, &mut base_config),
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }

    TranslateOptions {
        inject_base_config,
        schema,
        base_config,
    }
}

fn run_render(base: bool, oauth: bool, config_path: Option<PathBuf>) {
    let options = if oauth {
        oauth_options()
    } else {
        load_options(config_path, base)
    };
    let output = serialize(process_env(), &options);

    println!("{}", output);
}

fn run_explain(base: bool, human: bool, config_path: Option<PathBuf>) {
    let options = load_options(config_path, base);
    let translation = translate(process_env(), &options);

    if human {
        println!("{}", translation.to_human());
    } else {
        match translation.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    }
}

fn run_inject(template: PathBuf, config_path: Option<PathBuf>) {
    let options = load_options(config_path, true);

    match inject_file(&template, &process_env(), &options) {
        Ok(()) => {
            tracing::info!(template = %template.display(), "Injected Swagger UI configuration");
        }
        // Custom templates without the call region are served unchanged.
        Err(InjectError::MarkersNotFound) => {
            tracing::error!(
                template = %template.display(),
                "Unable to inject configuration: call region markers not found. \
                 Environment-based settings will not take effect."
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

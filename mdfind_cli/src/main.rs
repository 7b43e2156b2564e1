use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use mdfind_cli::commands::{self, ConfigAction, ListOptions, UpdateOptions};
use mdfind_cli::config::ConfigManager;
use mdfind_cli::error::CliResult;
use mdfind_cli::output::OutputFormat;
use mdfind_cli::terminal;
use mdfind_core::StderrSink;

#[derive(Parser)]
#[command(name = "mdfind")]
#[command(author, version, about = "Find source documents and the outputs that need rebuilding", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List files whose name matches a glob pattern
    List {
        /// Directory to search (defaults to the current directory)
        dir: Option<PathBuf>,

        /// Glob pattern for file names
        #[arg(short, long, value_name = "PATTERN")]
        pattern: Option<String>,

        /// List every file regardless of name
        #[arg(short, long, conflicts_with = "pattern")]
        all: bool,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Diagnostics on stderr (-v summary, -vv every entry)
        #[arg(short, long, action = ArgAction::Count)]
        verbose: u8,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List sources whose output is missing or older than the source
    Update {
        /// Source directory (defaults to the current directory)
        source: Option<PathBuf>,

        /// Destination directory (defaults to beside each source)
        #[arg(short, long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Glob pattern for source file names
        #[arg(short, long, value_name = "PATTERN")]
        pattern: Option<String>,

        /// Output extension, including the dot
        #[arg(short = 'x', long, value_name = "EXT")]
        extension: Option<String>,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Diagnostics on stderr (-v summary, -vv every entry)
        #[arg(short, long, action = ArgAction::Count)]
        verbose: u8,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key (e.g. discovery.pattern)
        key: String,
    },

    /// Show the configuration file path
    Path,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("mdfind_core", log::LevelFilter::Debug)
            .filter_module("mdfind_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let debug = cli.debug;
    if let Err(error) = run(cli) {
        eprint!("{}", error.format_for_user(debug));
        std::process::exit(error.exit_code().code());
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let manager = ConfigManager::new();

    match cli.command {
        Commands::List {
            dir,
            pattern,
            all,
            recursive,
            verbose,
            format,
        } => {
            let config = manager.load()?;
            apply_color_preference(config.output.color_enabled);

            let options = ListOptions {
                dir,
                pattern,
                all,
                recursive,
                verbose,
                format,
            };
            let use_color = terminal::should_color_stdout(config.output.color_enabled);
            let output = commands::list(&options, &config, &StderrSink, use_color)?;
            print_output(&output);
        }
        Commands::Update {
            source,
            dest,
            pattern,
            extension,
            recursive,
            verbose,
            format,
        } => {
            let config = manager.load()?;
            apply_color_preference(config.output.color_enabled);

            let options = UpdateOptions {
                source,
                dest,
                pattern,
                extension,
                recursive,
                verbose,
                format,
            };
            let use_color = terminal::should_color_stdout(config.output.color_enabled);
            let output = commands::update(&options, &config, &StderrSink, use_color)?;
            print_output(&output);
        }
        Commands::Config { action } => {
            let action = match action {
                ConfigCommands::Show => ConfigAction::Show,
                ConfigCommands::Get { key } => ConfigAction::Get(key),
                ConfigCommands::Path => ConfigAction::Path,
            };
            print_output(&commands::config(&action, &manager)?);
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Disable colored output globally when neither stream should be colored
fn apply_color_preference(color_enabled: bool) {
    if !terminal::should_color_stderr(color_enabled)
        && !terminal::should_color_stdout(color_enabled)
    {
        colored::control::set_override(false);
    }
}

fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}

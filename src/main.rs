use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;

use psqlgml::config::{DEFAULT_CONFIG_FILE, Settings};
use psqlgml::dictionary::readers::DICTIONARY_HOME_ENV;
use psqlgml::flavors::FlavorRegistry;
use psqlgml::validation::ValidatorSelection;

mod commands;

#[derive(Parser)]
#[command(
    name = "psqlgml",
    about = "Validate and describe graph data files against versioned data dictionaries",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file declaring dictionary flavors
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Root of locally stored dictionaries
    #[arg(long, env = DICTIONARY_HOME_ENV, global = true)]
    dictionary_home: Option<PathBuf>,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a data graph file and the files it extends
    Validate {
        /// Dictionary flavor to validate against
        #[arg(short, long, default_value = "GPAS")]
        dictionary: String,

        /// Directory holding the data files
        #[arg(long)]
        data_dir: PathBuf,

        /// Data file name, relative to the data directory
        #[arg(short = 'f', long = "file")]
        file: String,

        /// Validators to run: ALL, DATA or SCHEMA
        #[arg(long, default_value_t = ValidatorSelection::All)]
        validator: ValidatorSelection,
    },

    /// Generate the graph data JSON Schema of a flavor
    Generate {
        #[arg(short, long, default_value = "GPAS")]
        dictionary: String,

        /// Output directory for the generated schema files
        #[arg(short, long, default_value = "schemas")]
        output: PathBuf,
    },

    /// Inspect dictionaries and data graphs
    Inspect {
        #[command(subcommand)]
        target: commands::InspectTarget,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let settings =
        Settings::load(&cli.config).map_err(|error| miette::miette!("{error:#}"))?;
    let registry = FlavorRegistry::from_settings(&settings, cli.dictionary_home);

    match cli.command {
        Commands::Validate {
            dictionary,
            data_dir,
            file,
            validator,
        } => commands::validate_command(&registry, &dictionary, &data_dir, &file, validator),
        Commands::Generate { dictionary, output } => {
            commands::generate_command(&registry, &dictionary, &output)
        }
        Commands::Inspect { target } => commands::inspect_command(&registry, target),
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("psqlgml=warn"),
        1 => EnvFilter::new("psqlgml=info"),
        _ => EnvFilter::new("psqlgml=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

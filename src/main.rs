use clap::{Parser as ClapParser, Subcommand};
use crossweb_filter::{
    cli::{
        self, CheckOptions, CliError, EvalOptions, ShapeOptions, TaskOptions, execute_check,
        execute_eval, execute_shape, execute_task,
    },
    config::Config,
    task::ReportType,
};
use std::{
    io::{self, Read},
    path::PathBuf,
};
use tracing::debug;

#[derive(ClapParser)]
#[command(name = "cwfilter")]
#[command(about = "cwfilter - build, check, and submit audience filter expressions")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./cwfilter.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a filter, validate it, and print its canonical form
    Check {
        /// The filter expression
        filter: String,

        /// Catalog snapshot (JSON) to validate against
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Print groups on indented lines
        #[arg(short, long)]
        pretty: bool,
    },

    /// Evaluate a filter against one JSON record
    Eval {
        /// The filter expression
        filter: String,

        /// JSON record (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Print the JSON descriptor of a report task
    Task {
        /// Report type: media or total
        #[arg(long, default_value = "media")]
        kind: ReportType,

        /// Display name of the report
        #[arg(long)]
        name: String,

        /// Period as FROM:TO, e.g. 2021-09-01:2021-09-30 (repeatable)
        #[arg(long = "date", required = true)]
        dates: Vec<String>,

        /// Internet usage type codes, e.g. 1,2,3
        #[arg(long = "usetype", value_delimiter = ',')]
        usage_types: Vec<u32>,

        /// Geography filter
        #[arg(long)]
        geo: Option<String>,

        /// Demography filter
        #[arg(long)]
        demo: Option<String>,

        /// Media filter
        #[arg(long)]
        media: Option<String>,

        /// Slice dimension (repeatable)
        #[arg(long = "slice")]
        slices: Vec<String>,

        /// Statistic name (repeatable)
        #[arg(long = "stat", required = true)]
        statistics: Vec<String>,

        /// Catalog snapshot (JSON) to validate the filters against
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Flatten raw result rows into a table
    Shape {
        /// Slice dimension (repeatable)
        #[arg(long = "slice")]
        slices: Vec<String>,

        /// Display label for the first column
        #[arg(long)]
        label: String,

        /// Raw rows as JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Print the table as JSON instead of tab-separated text
        #[arg(long)]
        json: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'cwfilter docs' to list categories)
        category: String,
    },

    /// Walkthrough of common audience filters
    Onboard,
}

fn main() {
    let cli = Cli::parse();

    let result = Config::load(cli.config.as_deref())
        .map_err(CliError::from)
        .and_then(|config| {
            init_logging(&config);
            run(cli.command, &config)
        });

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.logging.level.to_lowercase())
            }),
        )
        .with_writer(io::stderr)
        .try_init()
        .ok(); // Ignore error if already initialized
}

fn run(command: Commands, config: &Config) -> Result<(), CliError> {
    match command {
        Commands::Check {
            filter,
            schema,
            pretty,
        } => {
            let options = CheckOptions {
                filter,
                schema: schema.or_else(|| config.catalog.path.clone()),
                pretty,
            };
            let result = execute_check(&options)?;
            if result.validated {
                debug!("filter matches the catalog");
            }
            println!("{}", result.rendered);
        }
        Commands::Eval { filter, input } => {
            let options = EvalOptions {
                filter,
                input: read_input(input)?,
            };
            println!("{}", execute_eval(&options)?);
        }
        Commands::Task {
            kind,
            name,
            dates,
            usage_types,
            geo,
            demo,
            media,
            slices,
            statistics,
            schema,
            pretty,
        } => {
            let options = TaskOptions {
                report_type: kind,
                name,
                dates,
                usage_types,
                geo,
                demo,
                media,
                slices,
                statistics,
                schema: schema.or_else(|| config.catalog.path.clone()),
            };
            let body = execute_task(&options)?;
            let json = if pretty {
                serde_json::to_string_pretty(&body)?
            } else {
                serde_json::to_string(&body)?
            };
            println!("{}", json);
        }
        Commands::Shape {
            slices,
            label,
            input,
            json,
        } => {
            let options = ShapeOptions {
                input: read_input(input)?,
                slices,
                label,
            };
            let table = execute_shape(&options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print!("{}", table);
            }
        }
        Commands::Docs => print!("{}", cli::get_docs_overview()),
        Commands::Doc { category } => print!("{}", cli::get_doc_category(&category)?),
        Commands::Onboard => print!("{}", cli::get_onboarding_content()),
    }
    Ok(())
}

/// Falls back to piped stdin when no inline input was given.
fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

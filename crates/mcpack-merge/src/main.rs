use std::process::ExitCode;

use clap::builder::{styling::AnsiColor, Styles};
use clap::ColorChoice;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use commands::{info_pack, merge_packs, InfoPackArgs, MergePacksArgs};
use errors::CliError;
use tracing_subscriber::EnvFilter;

mod commands;
mod errors;

#[macro_export]
macro_rules! println_pad {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        for __line in __s.lines() {
            println!("    {}", __line);
        }
    }};
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge resource packs into a single output pack
    Merge {
        /// Pack directories, lowest to highest priority (autodetect when omitted)
        #[arg(short, long, num_args = 0..)]
        packs: Vec<String>,

        /// Output directory for the merged pack
        #[arg(short, long, default_value = "merged_pack")]
        output: String,

        /// Don't write files; just report planned actions
        #[arg(long)]
        dry_run: bool,

        /// Remove the output directory before merging
        #[arg(long)]
        clean: bool,

        /// Print a summary of actions at the end
        #[arg(long)]
        summary: bool,

        /// Glob pattern to exclude files (can be passed multiple times)
        #[arg(long)]
        exclude: Vec<String>,

        /// Override pack_format for the generated pack.mcmeta
        #[arg(long)]
        pack_format: Option<i64>,

        /// Override description for the generated pack.mcmeta
        #[arg(long)]
        description: Option<String>,

        /// Also create a .zip of the merged pack
        #[arg(long)]
        zip: bool,
    },
    /// Show information about a resource pack
    Info {
        /// The path to the pack directory
        #[arg(short, long)]
        path: String,
    },
}

fn parse_args() -> Args {
    // Configure colored/styled help output
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Blue.on_default());

    let matches = Args::command()
        .styles(styles)
        .color(ColorChoice::Auto)
        .get_matches();

    Args::from_arg_matches(&matches).expect("failed to parse arguments")
}

fn init_tracing() {
    // Default to info so dry-run intent and per-file warnings are visible
    // without RUST_LOG.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let args = parse_args();
    let result = match args.command {
        Commands::Merge {
            packs,
            output,
            dry_run,
            clean,
            summary,
            exclude,
            pack_format,
            description,
            zip,
        } => merge_packs(MergePacksArgs {
            packs,
            output,
            dry_run,
            clean,
            summary,
            exclude,
            pack_format,
            description,
            zip,
        }),
        Commands::Info { path } => info_pack(InfoPackArgs { path }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{report:?}");
            match report.downcast_ref::<CliError>() {
                Some(err) => ExitCode::from(err.exit_code()),
                None => ExitCode::FAILURE,
            }
        }
    }
}

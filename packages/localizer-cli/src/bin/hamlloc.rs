/**
 * hamlloc - Haml localization tool
 *
 * Extracts localizable strings from Haml templates and writes localized
 * copies from a translations file.
 */
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use haml_localizer::Project;
use haml_localizer_cli::{run_extract, run_localize};

#[derive(Parser)]
#[command(name = "hamlloc", version, about = "Haml template localization")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Project config JSON file
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Project id used in resource keys
    #[arg(long, default_value = "webapp", global = true)]
    id: String,

    /// Source locale of the templates
    #[arg(long, global = true)]
    source_locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract localizable strings into a JSON resource file
    Extract {
        /// Directory to scan for templates
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Output resource file
        #[arg(short, long, default_value = "haml-strings.json")]
        out: PathBuf,
    },
    /// Write localized copies of the templates
    Localize {
        /// Directory to scan for templates
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Translations JSON resource file
        #[arg(short, long)]
        translations: PathBuf,

        /// Target locales, comma separated
        #[arg(short, long, value_delimiter = ',')]
        locales: Vec<String>,

        /// Write strings still needing translation to this file
        #[arg(long)]
        new_strings: Option<PathBuf>,

        /// Wrap localized strings in identifying spans
        #[arg(long)]
        identify: bool,

        /// Directory localized files are written under
        #[arg(long)]
        target: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_project(cli: &Cli) -> anyhow::Result<Project> {
    let mut project = match &cli.project {
        Some(path) => Project::load(path)?,
        None => Project::new(&cli.id),
    };
    if let Some(locale) = &cli.source_locale {
        project.source_locale = locale.clone();
    }
    Ok(project)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut project = build_project(&cli)?;
    match &cli.command {
        Command::Extract { root, out } => {
            let summary = run_extract(Arc::new(project), root, out)?;
            println!(
                "{} strings extracted from {} files",
                summary.strings, summary.files
            );
        }
        Command::Localize {
            root,
            translations,
            locales,
            new_strings,
            identify,
            target,
        } => {
            if !locales.is_empty() {
                project.settings.locales = locales.clone();
            }
            if *identify {
                project.settings.identify = true;
            }
            if let Some(target) = target {
                project.target_dir = target.clone();
            }
            let summary = run_localize(
                Arc::new(project),
                root,
                translations,
                new_strings.as_deref(),
            )?;
            println!(
                "{} files localized, {} strings still need translation",
                summary.files, summary.new_strings
            );
            if summary.failed > 0 {
                eprintln!("{} files could not be localized", summary.failed);
                process::exit(1);
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

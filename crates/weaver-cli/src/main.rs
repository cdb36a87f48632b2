use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{Diagnostic, IntoDiagnostic, Result};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use weaver_editor_dom::Dom;
use weaver_editor_selection::read;
use weaver_editor_table::{EditorParams, Loader, ParamStore, SettingsError, TableSettings};

mod point;

use point::{PointSpec, RangeSpec};

#[derive(Parser)]
#[command(version, about = "Weaver - extract editor selections as HTML fragments", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Default log filter when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a selection out of an HTML document and print the fragment
    Read {
        /// HTML document to read from
        file: PathBuf,

        /// Selection start, as PATH:OFFSET from <body> (e.g. 0.1:3)
        #[arg(long, requires = "end")]
        start: Option<PointSpec>,

        /// Selection end, as PATH:OFFSET from <body>
        #[arg(long, requires = "start")]
        end: Option<PointSpec>,

        /// Additional ranges as START..END, read after --start/--end
        #[arg(long = "range")]
        ranges: Vec<RangeSpec>,
    },
    /// Resolve table plugin settings and print them as JSON
    TableSettings {
        /// Parameter file (.json or .toml); defaults apply without one
        #[arg(long)]
        params: Option<PathBuf>,

        /// Editor body width in pixels, for fixed-size table defaults
        #[arg(long, default_value_t = 800)]
        body_width: u32,
    },
}

/// Every problem found in a parameter file.
#[derive(Debug, Error, Diagnostic)]
#[error("{} invalid table parameter(s)", .errors.len())]
#[diagnostic(code(weaver::table::settings))]
struct InvalidSettings {
    #[related]
    errors: Vec<SettingsError>,
}

fn main() -> Result<()> {
    init_miette()?;

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Read {
            file,
            start,
            end,
            ranges,
        } => read_selection(file, start.zip(end), ranges),
        Commands::TableSettings { params, body_width } => table_settings(params, body_width),
    }
}

fn read_selection(
    file: PathBuf,
    first: Option<(PointSpec, PointSpec)>,
    ranges: Vec<RangeSpec>,
) -> Result<()> {
    let html = std::fs::read_to_string(&file).into_diagnostic()?;
    let (dom, body) = Dom::parse_html(&html)?;
    tracing::debug!(path = %file.display(), nodes = dom.len(), "parsed document");

    let specs = first
        .map(|(start, end)| RangeSpec { start, end })
        .into_iter()
        .chain(ranges);
    let ranges = specs
        .map(|spec| spec.resolve(&dom, body))
        .collect::<Result<Vec<_>>>()?;

    let fragment = read(&dom, body, &ranges);
    tracing::debug!(nodes = fragment.len(), "read fragment");
    println!("{}", fragment.to_html());
    Ok(())
}

fn table_settings(params: Option<PathBuf>, body_width: u32) -> Result<()> {
    let params = match params {
        Some(path) => ParamStore::new(path).load()?,
        None => EditorParams::new(),
    };

    let settings = TableSettings::resolve(&params, body_width)
        .map_err(|errors| InvalidSettings { errors })?;
    println!(
        "{}",
        serde_json::to_string_pretty(&settings).into_diagnostic()?
    );
    Ok(())
}

fn init_miette() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();
    Ok(())
}

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use meshcorr::{
    measure_edges, write_rigid, BulkFile, ConnectionFile, ConnectionFileConfig, IndependentSide,
    RigidExportConfig, SortSummary,
};
use meshcorr::source::SourceText;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(
    about = "meshcorr - inspect bulk-data decks and filter, sort or export correspondence files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the nodes and elements of a bulk-data deck
    Inspect {
        /// Bulk-data file
        path: PathBuf,

        /// Measure element edge lengths from node coordinates
        #[arg(long)]
        measure: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Drop connections outside a correlation tolerance
    Reduce {
        /// Connection file to filter
        input: PathBuf,

        /// Node files keep values <= tolerance; mode files keep values >= tolerance
        #[arg(long)]
        tolerance: f64,

        /// Treat the input as a mode connection file
        #[arg(long)]
        modes: bool,

        /// Output connection file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Reorder and subset connections by first key
    Sort {
        /// Connection file to reorder
        input: PathBuf,

        #[command(flatten)]
        order: KeyOrder,

        /// Treat the input as a mode connection file
        #[arg(long)]
        modes: bool,

        /// Output connection file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write one rigid element per node connection
    ExportRigid {
        /// Node connection file
        input: PathBuf,

        /// Output bulk-data file
        #[arg(short, long)]
        output: PathBuf,

        /// Identifier of the first element
        #[arg(long, default_value_t = 1)]
        start_id: u64,

        /// Coupled degrees of freedom
        #[arg(long, default_value = "123456")]
        dof: String,

        /// Key used as the independent node
        #[arg(long, value_enum, default_value_t = Side::First)]
        independent: Side,

        /// Author written into the header
        #[arg(long)]
        author: Option<String>,

        /// Mesh the first keys belong to, for the header
        #[arg(long)]
        first_mesh: Option<String>,

        /// Mesh the last keys belong to, for the header
        #[arg(long)]
        last_mesh: Option<String>,
    },
}

/// Where `sort` takes its key order from
#[derive(Args)]
#[group(required = true, multiple = false)]
struct KeyOrder {
    /// Text file with one key per line
    #[arg(long)]
    keys: Option<PathBuf>,

    /// Bulk-data deck whose node order is used as the key list
    #[arg(long)]
    nodes: Option<PathBuf>,
}

impl KeyOrder {
    fn read(&self) -> meshcorr::Result<Vec<String>> {
        match (&self.keys, &self.nodes) {
            (Some(path), None) => read_key_list(path),
            (None, Some(path)) => read_node_order(path),
            _ => unreachable!("clap admits exactly one of --keys and --nodes"),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    First,
    Last,
}

impl From<Side> for IndependentSide {
    fn from(side: Side) -> Self {
        match side {
            Side::First => IndependentSide::First,
            Side::Last => IndependentSide::Last,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let start_time = std::time::Instant::now();

    match &cli.command {
        Commands::Inspect {
            path,
            measure,
            json,
        } => handle_inspect(path, *measure, *json)?,
        Commands::Reduce {
            input,
            tolerance,
            modes,
            output,
        } => handle_reduce(input, *tolerance, *modes, output)?,
        Commands::Sort {
            input,
            order,
            modes,
            output,
        } => handle_sort(input, order, *modes, output)?,
        Commands::ExportRigid {
            input,
            output,
            start_id,
            dof,
            independent,
            author,
            first_mesh,
            last_mesh,
        } => {
            let mut config = RigidExportConfig::default()
                .with_start_id(*start_id)
                .with_dof_code(dof.as_str())
                .with_independent((*independent).into());
            if let Some(author) = author {
                config = config.with_author(author.as_str());
            }
            if let Some(name) = first_mesh {
                config = config.with_first_source(name.as_str());
            }
            if let Some(name) = last_mesh {
                config = config.with_last_source(name.as_str());
            }
            let matrix = ConnectionFile::read(input)?;
            let written = write_rigid(output, &matrix, &config)?;
            println!("Wrote {written} rigid elements to {}", output.display());
        }
    }

    eprintln!("Completed in {:.2?}", start_time.elapsed());
    Ok(())
}

fn handle_inspect(path: &Path, measure: bool, json: bool) -> meshcorr::Result<()> {
    let (mut model, report) = BulkFile::read(path)?;
    let unresolved = if measure {
        Some(measure_edges(&mut model))
    } else {
        None
    };

    if json {
        let summary = serde_json::json!({
            "path": path.display().to_string(),
            "counts": report.counts,
            "merge": report.merge,
            "edge_slots": report.counts.edge_slots(),
            "unresolved_edges": unresolved,
        });
        println!("{summary:#}");
        return Ok(());
    }

    let counts = &report.counts;
    println!("{}", path.display());
    println!("  nodes:       {}", counts.nodes);
    println!("  bars:        {}", counts.bars);
    println!("  triangles:   {}", counts.triangles);
    println!("  quads:       {}", counts.quads);
    println!("  edge slots:  {}", counts.edge_slots());
    println!(
        "  lines:       {} ({} comments, {} continuations, {} orphans)",
        report.merge.lines, report.merge.comments, report.merge.continuations, report.merge.orphans
    );
    if let Some(unresolved) = unresolved {
        println!("  unmeasured:  {unresolved}");
    }
    Ok(())
}

fn handle_reduce(
    input: &Path,
    tolerance: f64,
    modes: bool,
    output: &Path,
) -> meshcorr::Result<()> {
    let config = ConnectionFileConfig::default();
    let summary = if modes {
        let mut matrix = ConnectionFile::read_modes(input)?;
        let summary = matrix.reduce(tolerance);
        ConnectionFile::write_modes(output, &matrix, &config)?;
        summary
    } else {
        let mut matrix = ConnectionFile::read(input)?;
        let summary = matrix.reduce(tolerance);
        ConnectionFile::write(output, &matrix, &config)?;
        summary
    };
    println!(
        "Kept {} of {} connections",
        summary.retained,
        summary.retained + summary.dropped
    );
    Ok(())
}

fn handle_sort(input: &Path, order: &KeyOrder, modes: bool, output: &Path) -> meshcorr::Result<()> {
    let ordered = order.read()?;

    let config = ConnectionFileConfig::default();
    let summary = if modes {
        let mut matrix = ConnectionFile::read_modes(input)?;
        let summary = matrix.sort_rows(&ordered);
        ConnectionFile::write_modes(output, &matrix, &config)?;
        summary
    } else {
        let mut matrix = ConnectionFile::read(input)?;
        let summary = matrix.sort_rows(&ordered);
        ConnectionFile::write(output, &matrix, &config)?;
        summary
    };
    print_sort_summary(&summary);
    Ok(())
}

fn print_sort_summary(summary: &SortSummary) {
    if summary.unmatched_keys > 0 {
        warn!(unmatched = summary.unmatched_keys, "keys without a connection were skipped");
    }
    println!(
        "Placed {} connections; {} keys unmatched, {} duplicate keys, {} rows dropped",
        summary.matched, summary.unmatched_keys, summary.duplicate_keys, summary.dropped_rows
    );
}

/// One key per line; blank lines and `$` comments are skipped
fn read_key_list(path: &Path) -> meshcorr::Result<Vec<String>> {
    let text = SourceText::load(path)?;
    Ok(text
        .as_str()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('$'))
        .map(str::to_string)
        .collect())
}

fn read_node_order(path: &Path) -> meshcorr::Result<Vec<String>> {
    let (model, _) = BulkFile::read(path)?;
    Ok((0..model.nodes.node_count())
        .filter_map(|i| model.nodes.key_at(i).ok().map(str::to_string))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_takes_exactly_one_key_source() {
        let base = ["meshcorr", "sort", "pairs.txt", "-o", "out.txt"];

        let cli = Cli::try_parse_from(base.iter().chain(&["--keys", "order.txt"])).unwrap();
        match cli.command {
            Commands::Sort { order, .. } => {
                assert_eq!(order.keys, Some(PathBuf::from("order.txt")));
                assert_eq!(order.nodes, None);
            }
            _ => panic!("expected sort"),
        }

        assert!(Cli::try_parse_from(base).is_err());
        let both = ["--keys", "order.txt", "--nodes", "fe.bdf"];
        assert!(Cli::try_parse_from(base.iter().chain(&both)).is_err());
    }

    #[test]
    fn test_key_list_skips_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.txt");
        std::fs::write(&path, "$ order\n  102 \n\n101\n").unwrap();
        assert_eq!(read_key_list(&path).unwrap(), vec!["102", "101"]);
    }
}

//! Tricount CLI: count triangles in a graph file, or benchmark every algorithm

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tricount::{
    load_config, load_graph, Algorithm, CountConfig, CountReport, CsrGraph, GraphFormat, GraphSpec,
    IntersectionStrategy, Orientation, TriangleCounter,
};

#[derive(Parser)]
#[command(name = "tricount", version, about = "Triangle counting on sparse undirected graphs")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// More logging (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
struct CountOptions {
    /// JSON or YAML file with a CountConfig; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Intersection primitive: merge, hash, binary, partitioned, hybrid
    #[arg(long)]
    intersection: Option<IntersectionStrategy>,

    /// Vertex precedence: id, degree, bfs-level
    #[arg(long)]
    orientation: Option<Orientation>,

    /// Worker threads for parallel-edge-iterator
    #[arg(long)]
    threads: Option<usize>,
}

impl CountOptions {
    fn resolve(&self) -> Result<CountConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path).with_context(|| format!("loading {}", path.display()))?,
            None => CountConfig::default(),
        };
        if let Some(intersection) = self.intersection {
            config.intersection = intersection;
        }
        if let Some(orientation) = self.orientation {
            config.orientation = orientation;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Count triangles with one algorithm
    Count {
        /// Edge list or Matrix Market file
        file: PathBuf,

        /// Input format: auto, edge-list, matrix-market
        #[arg(long, default_value = "auto")]
        graph_format: GraphFormat,

        #[arg(long, default_value = "bader-hybrid")]
        algorithm: Algorithm,

        #[command(flatten)]
        options: CountOptions,
    },
    /// Run every algorithm on one graph, check they agree and print timings
    Bench {
        /// Edge list or Matrix Market file
        #[arg(required_unless_present = "generate", conflicts_with = "generate")]
        file: Option<PathBuf>,

        /// Synthetic graph instead of a file, e.g. complete:50 or gnp:10000:0.001:42
        #[arg(long)]
        generate: Option<GraphSpec>,

        /// Input format: auto, edge-list, matrix-market
        #[arg(long, default_value = "auto")]
        graph_format: GraphFormat,

        /// Runs per algorithm; the fastest is reported
        #[arg(long, default_value_t = 1)]
        repeat: usize,

        #[command(flatten)]
        options: CountOptions,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Count { file, graph_format, algorithm, options } => {
            run_count(file, *graph_format, *algorithm, options, &cli.format)
        }
        Commands::Bench { file, generate, graph_format, repeat, options } => {
            run_bench(file.as_deref(), generate.as_ref(), *graph_format, *repeat, options, &cli.format)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load(file: &Path, format: GraphFormat) -> Result<CsrGraph> {
    load_graph(file, format).with_context(|| format!("reading {}", file.display()))
}

fn run_count(
    file: &Path,
    graph_format: GraphFormat,
    algorithm: Algorithm,
    options: &CountOptions,
    format: &OutputFormat,
) -> Result<()> {
    let counter = TriangleCounter::new(options.resolve()?);
    let graph = load(file, graph_format)?;
    let report = counter.count(&graph, algorithm)?;

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "file": file.display().to_string(),
                "vertices": graph.num_vertices(),
                "edges": graph.num_edges(),
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            println!("Graph:     {} ({} vertices, {} edges)", file.display(), graph.num_vertices(), graph.num_edges());
            println!("Algorithm: {}", report.algorithm);
            println!("Triangles: {}", report.triangles);
            println!("Time:      {:.3} ms", report.elapsed.as_secs_f64() * 1e3);
        }
    }
    Ok(())
}

fn run_bench(
    file: Option<&Path>,
    generate: Option<&GraphSpec>,
    graph_format: GraphFormat,
    repeat: usize,
    options: &CountOptions,
    format: &OutputFormat,
) -> Result<()> {
    if repeat == 0 {
        bail!("--repeat must be at least 1");
    }
    let counter = TriangleCounter::new(options.resolve()?);
    let (name, graph, expected) = match (file, generate) {
        (_, Some(spec)) => (format!("{spec:?}"), spec.build()?, spec.expected_triangles()),
        (Some(file), None) => (file.display().to_string(), load(file, graph_format)?, None),
        (None, None) => bail!("either a FILE or --generate is required"),
    };

    let mut reports = counter.run_all(&graph)?;
    for _ in 1..repeat {
        for (best, again) in reports.iter_mut().zip(counter.run_all(&graph)?) {
            best.elapsed = best.elapsed.min(again.elapsed);
        }
    }
    if let (Some(expected), Some(first)) = (expected, reports.first()) {
        if first.triangles != expected {
            bail!("{name}: counted {} triangles, the generator guarantees {expected}", first.triangles);
        }
    }

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "graph": name,
                "vertices": graph.num_vertices(),
                "edges": graph.num_edges(),
                "reports": reports,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => print_bench_table(&name, &graph, &reports),
    }
    Ok(())
}

fn print_bench_table(name: &str, graph: &CsrGraph, reports: &[CountReport]) {
    println!("{} ({} vertices, {} edges)", name, graph.num_vertices(), graph.num_edges());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["algorithm", "triangles", "time (ms)"]);
    for report in reports {
        table.add_row(vec![
            report.algorithm.to_string(),
            report.triangles.to_string(),
            format!("{:.3}", report.elapsed.as_secs_f64() * 1e3),
        ]);
    }
    println!("{}", table);
    println!("{} algorithm(s) agree", reports.len());
}

//! Transgraph CLI
//!
//! # Usage
//!
//! ```bash
//! # Build the graph, write IR and a Graphviz rendering
//! cargo run --bin transgraph -- build --root src app.py models.py --ir pre_ir.json --dot graph.dot
//!
//! # Print the processing order, classes only
//! cargo run --bin transgraph -- order --root src app.py --kind class
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use transgraph_ir::{
    write_ir_json, BuildConfig, BuildOutput, GraphBuildPipeline, NodeKind, StubAnnotator,
};

#[derive(Parser)]
#[command(name = "transgraph")]
#[command(about = "Definition dependency graph and translation schedule for Python sources", long_about = None)]
struct Cli {
    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Directory the source paths are relative to
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Source files, processed in the order given
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// YAML build configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build graph, schedule and IR
    Build {
        #[command(flatten)]
        sources: SourceArgs,

        /// Write IR records as JSON
        #[arg(long)]
        ir: Option<PathBuf>,

        /// Write the graph as Graphviz DOT
        #[arg(long)]
        dot: Option<PathBuf>,

        /// Stub files supplying signatures (repeatable)
        #[arg(long)]
        stubs: Vec<PathBuf>,
    },

    /// Print the processing order
    Order {
        #[command(flatten)]
        sources: SourceArgs,

        /// Only one kind of definition
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Class,
    Function,
}

impl From<KindArg> for NodeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Class => NodeKind::Class,
            KindArg::Function => NodeKind::Function,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> transgraph_ir::Result<BuildConfig> {
    match path {
        Some(path) => Ok(BuildConfig::from_yaml(path)?),
        None => Ok(BuildConfig::default()),
    }
}

fn run_build(
    sources: &SourceArgs,
    pipeline: GraphBuildPipeline,
) -> transgraph_ir::Result<BuildOutput> {
    pipeline.build_files(&sources.root, &sources.files)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Commands) -> transgraph_ir::Result<()> {
    match command {
        Commands::Build {
            sources,
            ir,
            dot,
            stubs,
        } => {
            let config = load_config(sources.config.as_ref())?;
            let mut pipeline = GraphBuildPipeline::new(config)?;
            for stub in &stubs {
                pipeline = pipeline.with_annotator(Box::new(StubAnnotator::from_file(stub)?));
            }
            let output = run_build(&sources, pipeline)?;

            if let Some(path) = ir {
                write_ir_json(path, &output.ir)?;
            }
            if let Some(path) = dot {
                std::fs::write(&path, output.graph.to_dot())?;
                tracing::info!(path = %path.display(), "graph written");
            }

            println!("{}", output.stats);
            for (i, qname) in output.schedule.qnames().into_iter().enumerate() {
                println!("{:>4}  {}", i + 1, qname);
            }
        }
        Commands::Order { sources, kind } => {
            let config = load_config(sources.config.as_ref())?;
            let output = run_build(&sources, GraphBuildPipeline::new(config)?)?;
            let names = match kind {
                Some(kind) => output.schedule.of_kind(kind.into()),
                None => output.schedule.qnames(),
            };
            for qname in names {
                println!("{}", qname);
            }
        }
    }
    Ok(())
}

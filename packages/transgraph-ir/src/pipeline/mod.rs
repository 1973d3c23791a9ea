//! Pipeline orchestration
//!
//! Files → parse → graph → annotate → schedule → IR. Files are handled
//! strictly in the order given; the first fatal error aborts the run and
//! no partial output is returned.

pub mod result;

pub use result::BuildOutput;

use std::path::Path;

use crate::config::BuildConfig;
use crate::errors::Result;
use crate::features::annotation::SignatureAnnotator;
use crate::features::dependency_graph::schedule;
use crate::features::graph_builder::GraphBuilder;
use crate::features::ir_generation::IrAssembler;
use crate::features::parsing::{Parser, TreeSitterParser};
use crate::shared::models::CodegraphError;

/// End-to-end build over a fixed set of sources
pub struct GraphBuildPipeline {
    config: BuildConfig,
    parser: Box<dyn Parser>,
    annotators: Vec<Box<dyn SignatureAnnotator>>,
}

impl GraphBuildPipeline {
    /// Validates the config and sets up the Python tree-sitter parser
    pub fn new(config: BuildConfig) -> Result<Self> {
        config.validate()?;
        let parser = TreeSitterParser::python().allow_syntax_errors(config.allow_syntax_errors);
        Ok(Self {
            config,
            parser: Box::new(parser),
            annotators: Vec::new(),
        })
    }

    pub fn with_parser(mut self, parser: Box<dyn Parser>) -> Self {
        self.parser = parser;
        self
    }

    /// Annotators are applied in the order added; later ones overwrite
    pub fn with_annotator(mut self, annotator: Box<dyn SignatureAnnotator>) -> Self {
        self.annotators.push(annotator);
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Read `files` (relative to `root`) and build. Paths are recorded as given.
    pub fn build_files<P: AsRef<Path>>(&self, root: &Path, files: &[P]) -> Result<BuildOutput> {
        let mut sources = Vec::with_capacity(files.len());
        for file in files {
            let file = file.as_ref();
            let shown = file.display().to_string();
            let ext = file.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !self.parser.supports_extension(ext) {
                tracing::warn!(
                    file = %shown,
                    language = self.parser.language_name(),
                    "unexpected file extension; parsing anyway"
                );
            }
            let bytes = std::fs::read(root.join(file)).map_err(|e| {
                CodegraphError::io(format!("cannot read source: {}", e))
                    .with_file(shown.clone())
                    .with_source(e)
            })?;
            let text = String::from_utf8(bytes).map_err(|e| {
                CodegraphError::parse("source is not valid UTF-8")
                    .with_file(shown.clone())
                    .with_source(e)
            })?;
            sources.push((shown, text));
        }
        self.build_sources(&sources)
    }

    /// Build from in-memory `(path, source)` pairs
    pub fn build_sources<S: AsRef<str>, T: AsRef<str>>(&self, sources: &[(S, T)]) -> Result<BuildOutput> {
        let mut builder = GraphBuilder::new(self.config.clone());
        for (path, source) in sources {
            let tree = self.parser.parse(source.as_ref(), path.as_ref())?;
            builder.add_tree(&tree)?;
        }
        let (mut graph, stats) = builder.finish();

        for annotator in &self.annotators {
            let updated = graph.annotate(annotator.as_ref());
            tracing::debug!(updated, "signatures applied");
        }

        let schedule = schedule(&graph)?;
        let assembler = IrAssembler::new(&self.config.receiver_name)?;
        let ir = assembler.assemble(&mut graph, Some(&schedule));

        tracing::info!(
            files = stats.files,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            scheduled = schedule.len(),
            "build complete: {}",
            stats
        );

        Ok(BuildOutput {
            graph,
            schedule,
            ir,
            stats,
        })
    }
}

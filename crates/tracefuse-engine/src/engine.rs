//! Fixed-order pipeline over already extracted models and text

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use tracefuse_domain::{link_targets, ArchitectureModel, CodeModel, Metamodel, ModelEntity, TraceLink};
use tracefuse_inconsistency::{Inconsistency, InconsistencyFilter};
use tracefuse_scoring::{NodeId, ScoringContext, ScoringTree, TraceLinkDerivation};
use tracefuse_text::{ConsolidationMetrics, MappingConsolidator, TextState};
use tracing::{debug, info};

use crate::{EngineConfig, EngineError};

/// Everything one run consumes
#[derive(Debug, Clone, Default)]
pub struct EngineInput {
    /// Architecture model (link sources)
    pub architecture: ArchitectureModel,
    /// Code model (link targets)
    pub code: CodeModel,
    /// Phrase and noun mappings extracted from the documentation
    pub text_state: TextState,
    /// Accepted links from documentation to architecture elements
    pub documentation_links: Vec<TraceLink>,
}

/// Everything one run produces
#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// Text state after consolidation
    pub text_state: TextState,
    /// Accepted links keyed by the metamodel of their targets
    pub trace_links: BTreeMap<Metamodel, BTreeSet<TraceLink>>,
    /// Undocumented elements per metamodel
    pub inconsistencies: BTreeMap<Metamodel, Vec<Inconsistency>>,
    /// Consolidation counters
    pub consolidation: ConsolidationMetrics,
}

impl EngineOutput {
    /// Accepted links whose targets belong to `metamodel`
    pub fn links(&self, metamodel: Metamodel) -> impl Iterator<Item = &TraceLink> + '_ {
        self.trace_links.get(&metamodel).into_iter().flatten()
    }

    /// Undocumented elements of `metamodel`
    pub fn inconsistencies(&self, metamodel: Metamodel) -> &[Inconsistency] {
        self.inconsistencies.get(&metamodel).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Runs consolidation, scoring, link derivation and inconsistency detection
///
/// Stages always run in that order; each stage sees the complete output of
/// the previous one.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    tree: ScoringTree,
    root: NodeId,
    derivation: TraceLinkDerivation,
    consolidator: MappingConsolidator,
    filter: InconsistencyFilter,
}

impl Engine {
    /// Build an engine whose scoring tree comes from the configuration
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let (tree, root) = ScoringTree::from_config(&config.scoring)?;
        Self::with_scoring_tree(config, tree, root)
    }

    /// Build an engine around a hand-wired scoring tree
    ///
    /// The configured heuristic list and root aggregation function are
    /// ignored; the link threshold still applies.
    pub fn with_scoring_tree(config: EngineConfig, tree: ScoringTree, root: NodeId) -> Result<Self, EngineError> {
        config.validate()?;
        if tree.node(root).is_none() {
            return Err(EngineError::Config(format!("Scoring root {} is not part of the tree", root)));
        }

        let derivation = TraceLinkDerivation::new(config.scoring.link_threshold)?;
        let consolidator = MappingConsolidator::new(config.consolidation.clone())?;
        let filter = InconsistencyFilter::new(config.inconsistency.clone())?;

        Ok(Self {
            config,
            tree,
            root,
            derivation,
            consolidator,
            filter,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execute one run
    pub fn run(&self, input: EngineInput) -> Result<EngineOutput, EngineError> {
        let EngineInput {
            architecture,
            code,
            mut text_state,
            documentation_links,
        } = input;
        let run_start = Instant::now();

        let stage = Instant::now();
        let consolidation = self.consolidator.consolidate(&mut text_state)?;
        info!(
            stage = "consolidation",
            elapsed_ms = stage.elapsed().as_millis() as u64,
            phrase_mappings = text_state.phrase_mapping_count(),
            noun_mappings = text_state.noun_mapping_count(),
            "Stage finished"
        );

        let stage = Instant::now();
        let ctx = ScoringContext::new(&architecture, &code);
        let scores = self.tree.evaluate(self.root, &ctx)?;
        info!(
            stage = "scoring",
            elapsed_ms = stage.elapsed().as_millis() as u64,
            pairs = scores.len(),
            "Stage finished"
        );

        let stage = Instant::now();
        let code_links = self.derivation.derive(&scores);
        info!(
            stage = "derivation",
            elapsed_ms = stage.elapsed().as_millis() as u64,
            links = code_links.len(),
            "Stage finished"
        );

        let mut trace_links = BTreeMap::new();
        trace_links.insert(Metamodel::Architecture, documentation_links.into_iter().collect::<BTreeSet<_>>());
        trace_links.insert(Metamodel::Code, code_links);

        let stage = Instant::now();
        let mut inconsistencies = BTreeMap::new();
        for (metamodel, links) in &trace_links {
            let entities: Vec<&ModelEntity> = match metamodel {
                Metamodel::Architecture => architecture.entities().collect(),
                Metamodel::Code => code.entities().collect(),
            };
            let found = self
                .filter
                .find_undocumented(*metamodel, link_targets(links), entities);
            debug!(metamodel = %metamodel, count = found.len(), "Inconsistencies found");
            inconsistencies.insert(*metamodel, found);
        }
        info!(
            stage = "inconsistency",
            elapsed_ms = stage.elapsed().as_millis() as u64,
            "Stage finished"
        );

        info!(
            elapsed_ms = run_start.elapsed().as_millis() as u64,
            "Engine run finished. Consolidation metrics:\n{}",
            consolidation.summary()
        );

        Ok(EngineOutput {
            text_state,
            trace_links,
            inconsistencies,
            consolidation,
        })
    }
}

//! Primary loot filter interface.
//!
//! [`LootFilter`] ties the parser and the evaluator together: one tooltip
//! block in, one [`Outcome`] out. Parse failures are logged with the raw
//! block and skipped; a single bad item never stops a scan.

use crate::config::GlobalConfig;
use crate::dictionary::Dictionaries;
use crate::error::{IngestError, ParseError};
use crate::filter::{should_keep, FilterResult};
use crate::ingest::IngestPipeline;
use crate::item::Item;
use crate::parser::ItemParser;
use crate::profile::{ProfileSet, ProfileStore};
use rayon::prelude::*;
use std::sync::Arc;

/// A parsed item and the decision taken on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub item: Item,
    pub result: FilterResult,
}

/// Counters from one [`LootFilter::run`] session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Blocks received from the pipeline
    pub blocks: usize,
    /// Blocks that failed to parse and were skipped
    pub failed: usize,
    /// Items the evaluator decided to keep
    pub kept: usize,
}

/// Parse and evaluate tooltip blocks against a profile snapshot.
///
/// # Examples
///
/// ```rust,ignore
/// use loot_filter_engine::{Dictionaries, GlobalConfig, LootFilter, ProfileSet, ProfileStore};
/// use std::sync::Arc;
///
/// let dictionaries = Arc::new(Dictionaries::from_dir("assets/lang/enUS")?);
/// let (profiles, errors) = ProfileSet::from_documents(documents, &dictionaries);
/// let store = Arc::new(ProfileStore::new(profiles));
/// let filter = LootFilter::new(dictionaries, Arc::clone(&store), GlobalConfig::default());
///
/// if let Some(outcome) = filter.process_block(&block) {
///     println!("keep = {}", outcome.result.keep);
/// }
///
/// // Reload: later calls see the new profiles
/// store.replace(new_profiles);
/// ```
#[derive(Debug, Clone)]
pub struct LootFilter {
    parser: ItemParser,
    profiles: Arc<ProfileStore>,
    config: GlobalConfig,
}

impl LootFilter {
    pub fn new(
        dictionaries: Arc<Dictionaries>,
        profiles: Arc<ProfileStore>,
        config: GlobalConfig,
    ) -> Self {
        Self {
            parser: ItemParser::new(dictionaries),
            profiles,
            config,
        }
    }

    /// Filter over a fixed profile set.
    pub fn with_profiles(
        dictionaries: Arc<Dictionaries>,
        profiles: ProfileSet,
        config: GlobalConfig,
    ) -> Self {
        Self::new(dictionaries, Arc::new(ProfileStore::new(profiles)), config)
    }

    pub fn profiles(&self) -> &Arc<ProfileStore> {
        &self.profiles
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    pub fn parser(&self) -> &ItemParser {
        &self.parser
    }

    /// Parse a block without evaluating it.
    pub fn parse(&self, block: &[String]) -> Result<Item, ParseError> {
        self.parser.parse(block)
    }

    fn evaluate_with(&self, block: &[String], profiles: &ProfileSet) -> Option<Outcome> {
        let item = match self.parser.parse(block) {
            Ok(item) => item,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    stale_data = e.is_stale_data(),
                    block = ?block,
                    "Failed to parse item, skipping"
                );
                return None;
            }
        };
        let result = should_keep(&item, profiles, &self.config);
        tracing::debug!(
            name = %item.name,
            rarity = %item.rarity,
            keep = result.keep,
            matched = ?result.matched_names(),
            "Evaluated item"
        );
        Some(Outcome { item, result })
    }

    /// Parse and evaluate one block. `None` when the block could not be
    /// parsed; the failure has already been logged.
    pub fn process_block(&self, block: &[String]) -> Option<Outcome> {
        let profiles = self.profiles.snapshot();
        self.evaluate_with(block, &profiles)
    }

    /// Evaluate many blocks in parallel against one profile snapshot.
    /// Results keep the input order.
    pub fn evaluate_batch(&self, blocks: &[Vec<String>]) -> Vec<Option<Outcome>> {
        let profiles = self.profiles.snapshot();
        blocks
            .par_iter()
            .map(|block| self.evaluate_with(block, &profiles))
            .collect()
    }

    /// Consume blocks from `pipeline` until it closes, handing every
    /// evaluated item to `sink`.
    pub fn run<F>(&self, pipeline: IngestPipeline, mut sink: F) -> Result<RunStats, IngestError>
    where
        F: FnMut(Outcome),
    {
        let mut stats = RunStats::default();
        while let Some(block) = pipeline.recv() {
            stats.blocks += 1;
            match self.process_block(&block) {
                Some(outcome) => {
                    if outcome.result.keep {
                        stats.kept += 1;
                    }
                    sink(outcome);
                }
                None => stats.failed += 1,
            }
        }
        pipeline.join()?;
        tracing::info!(
            blocks = stats.blocks,
            failed = stats.failed,
            kept = stats.kept,
            "Ingestion session finished"
        );
        Ok(stats)
    }
}

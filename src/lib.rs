//! # Loot Filter Engine
//!
//! Turns the line-oriented text a screen reader emits for game item tooltips
//! into typed items and decides, per item, whether user profiles want it kept.
//!
//! ```text
//! fragments ─> ingest (item boundaries) ─> parser (Item) ─> filter (FilterResult)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use loot_filter_engine::{
//!     Dictionaries, GlobalConfig, IngestConfig, IngestPipeline, LootFilter, ProfileSet,
//!     ReaderSource,
//! };
//! use std::sync::Arc;
//!
//! let dictionaries = Arc::new(Dictionaries::from_dir("assets/lang/enUS")?);
//!
//! let barb = std::fs::read_to_string("profiles/barb.yaml")?;
//! let (profiles, errors) = ProfileSet::from_documents([("barb", barb.as_str())], &dictionaries);
//! for error in &errors {
//!     eprintln!("{error}");
//! }
//!
//! let filter = LootFilter::with_profiles(dictionaries, profiles, GlobalConfig::default());
//!
//! let pipe = std::io::BufReader::new(std::fs::File::open("/run/tts.pipe")?);
//! let pipeline = IngestPipeline::spawn(ReaderSource::new(pipe), &IngestConfig::default())?;
//! let stats = filter.run(pipeline, |outcome| {
//!     println!("{} keep={}", outcome.item.name, outcome.result.keep);
//! })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Evaluating a Parsed Item
//!
//! ```rust
//! use loot_filter_engine::{should_keep, GlobalConfig, Item, ItemType, ProfileSet, Rarity};
//!
//! let mut item = Item::new(Rarity::Magic, Some(ItemType::Helm));
//! item.power = Some(400);
//!
//! let result = should_keep(&item, &ProfileSet::default(), &GlobalConfig::default());
//! assert!(!result.keep);
//! assert!(result.matched.is_empty());
//! ```

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod item;
pub mod parser;
pub mod profile;

// Primary interface
pub use engine::{LootFilter, Outcome, RunStats};

// Configuration
pub use config::{AspectPolicy, CosmeticPolicy, GlobalConfig, IngestConfig, UniquePolicy};

// Core types and errors
pub use dictionary::Dictionaries;
pub use error::{IngestError, ParseError, ProfileError, Result};
pub use item::{Affix, AffixKind, Aspect, Item, ItemType, Rarity};

// Pipeline stages
pub use filter::{should_keep, FilterResult, MatchedFilter};
pub use ingest::{FragmentSource, IngestPipeline, ItemDetector, IterSource, ReaderSource};
pub use parser::ItemParser;
pub use profile::{
    load_profile, AffixPool, AffixRequirement, AspectRequirement, Comparison, ItemFilter, Profile,
    ProfileSet, ProfileStore, SigilCondition, SigilFilter, SigilPriority, TributeFilter,
    UniqueFilter,
};

//! Speech-ready text segmentation
//!
//! Turns arbitrary text into an ordered list of fragments that a speech
//! synthesis engine can take one at a time. Each fragment:
//!
//! - ends on a sentence or phrase boundary where the locale rules allow,
//! - stays within a character budget (tighter for CJK text),
//! - stays within a UTF-8 byte budget,
//! - is not a trivially short leftover unless it is a list marker, an
//!   initial or a short abbreviation.
//!
//! # Architecture
//!
//! Data flows strictly forward:
//!
//! - **rules**: rule resources are located through an ordered provider chain
//!   and reduced to boundary expressions
//! - **splitter**: the expressions are compiled into one alternation and the
//!   text is cut at every match end
//! - **enforcer**: oversized fragments are subdivided by characters, then
//!   by bytes
//! - **merger**: short fragments are folded into their successors
//! - **segmenter**: wires the stages together with a single-slot cache
//!
//! # Example
//!
//! ```rust
//! use speakseg_core::{Segmenter, SegmenterConfig};
//!
//! let config = SegmenterConfig::builder()
//!     .max_chars(40)
//!     .rules_dir(None::<std::path::PathBuf>)
//!     .build()
//!     .unwrap();
//! let segmenter = Segmenter::new(config).unwrap();
//!
//! let text = "Dr. Smith arrived late, tired and hungry, and went straight to bed.";
//! let fragments = segmenter.segment(text, "en_US");
//!
//! assert_eq!(fragments[0], "Dr.");
//! assert!(fragments.iter().all(|f| f.chars().count() <= 40));
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod enforcer;
pub mod error;
pub mod language;
pub mod merger;
pub mod rules;
pub mod script;
pub mod segmenter;
pub mod splitter;

pub use cache::{CachedRules, PatternCache};
pub use config::{SegmenterConfig, SegmenterConfigBuilder};
pub use enforcer::{Budgets, LengthEnforcer};
pub use error::{Result, SegmentError};
pub use language::LanguageCode;
pub use merger::{is_valid_short_form, FragmentMerger};
pub use rules::{ResolvedRules, RuleChain, RuleExtractor, RulePattern};
pub use script::{contains_cjk, is_cjk_char};
pub use segmenter::Segmenter;
pub use splitter::{compile_boundaries, split_heuristic, split_sentences};

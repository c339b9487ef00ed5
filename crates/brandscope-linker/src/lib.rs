//! Cross-source entity linking for Brandscope.
//!
//! Matches externally-sourced campaign/property rows (web analytics, SEO
//! trackers) to a brand by URL, grading each match with a confidence level.
//! Ambiguity is resolved deterministically by a first-match-wins ladder;
//! unmatched rows are excluded, never guessed.

pub mod link;
pub mod normalize;

pub use link::link_rows;
pub use normalize::{normalize_url, split_host_path};

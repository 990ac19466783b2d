/**
 * Responsibility
 *  - Bundle core (extractor) and types (per-resource tags)
 */
mod core;
mod types;

pub use types::*;

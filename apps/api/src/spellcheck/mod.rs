// Resume spell-check scoring pipeline for foreign workers writing Korean.
// Implements: rule tables, category detectors, external checker adapter,
// category scoring, suggestion aggregation, orchestration.
// Everything except the external adapter is pure and synchronous.

pub mod detectors;
pub mod external;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod resume_rules;
pub mod rules;
pub mod scoring;
pub mod suggestions;

//! Context resolution for weft.
//!
//! For every incoming conversational request the engine decides which body
//! of information is the authoritative context and how subordinate sources
//! merge into it, then shapes the result into a directive for the
//! downstream generation service.
//!
//! # Priority hierarchy (first match wins)
//!
//! 1. **Uploaded file** — classified and analyzed, no secondary material
//! 2. **Template focus** — enriched with lower-priority workspace material
//! 3. **Page focus** — same enrichment rule as templates
//! 4. **Workspace** — the whole tree, flattened, all primary material
//! 5. **Default** — the sentinel; resolution never fails outright
//!
//! Every rung degrades downward on store failure; the only user-visible
//! trace of a fallback is a provenance note on the default context.
//!
//! # Determinism
//!
//! Resolution is stateless and deterministic: the same request against
//! unchanged stores yields a structurally identical context and directive.
//! Nothing is cached or retried inside the engine.

pub mod analyze;
pub mod classify;
pub mod directive;
pub mod enrich;
pub mod resolver;

pub use analyze::{AnalyzerSet, ContentAnalyzer, NarrativeAnalyzer, TabularAnalyzer};
pub use classify::DocumentClassifier;
pub use directive::DirectiveBuilder;
pub use enrich::EnrichmentComposer;
pub use resolver::ContextResolver;

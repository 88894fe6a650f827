//! OpenTelemetry GenAI Semantic Convention attribute values.
//!
//! Field names in `tracing` macros must be literal identifiers, so spans
//! spell out `gen_ai.operation.name`, `gen_ai.request.model` etc. directly;
//! these constants are the attribute *values* recorded under them.

// --- Operation name values (`gen_ai.operation.name`) ---

/// Raw prompt completion (no chat message structure on the wire).
pub const OP_TEXT_COMPLETION: &str = "text_completion";

/// Worker lookup against a model-serving controller.
pub const OP_RESOLVE_WORKER: &str = "resolve_worker";

// --- Provider name values (`gen_ai.provider.name`) ---

/// Controller/worker model-serving stack.
pub const PROVIDER_FASTCHAT: &str = "fastchat";

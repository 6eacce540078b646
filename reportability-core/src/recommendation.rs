//! Structured output of the Extraction agent (C5).

use serde::{Deserialize, Serialize};

/// A confidence rating attached to a [`Recommendation`].
///
/// Modeled as raw JSON rather than a fixed enum or numeric type: the
/// Extraction agent parses whatever shape the Recommendation agent's
/// prose happened to produce (a category like `"High"`, or a numeric
/// score), and the engine must preserve it as-is rather than force a
/// normalization it has no basis for.
pub type Confidence = serde_json::Value;

/// One regulatory reporting recommendation extracted from the
/// Recommendation agent's prose output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Name of the regulation or reporting requirement.
    #[serde(rename = "regulationName")]
    pub regulation_name: String,
    /// Confidence in this recommendation, preserved as produced.
    #[serde(rename = "confidenceScore")]
    pub confidence_score: Confidence,
    /// Supporting reasoning text.
    pub reasoning: String,
}

//! AI suggestion input contract.
//!
//! Suggestions arrive as JSON produced by an LLM, so the boundary is
//! tolerant: a missing severity falls back to the default bucket, an
//! unrecognized severity keyword widens to the most permissive bucket, and a
//! missing line is represented rather than rejected so the orchestrator can
//! skip that one suggestion instead of failing the list.

use diff_map::Severity;
use serde::{Deserialize, Deserializer};

/// One AI-produced review finding, as received from the model.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// New-side path of the file the finding refers to.
    #[serde(default)]
    pub file: String,
    /// Suggested new-file line (possibly off; the validator corrects it).
    pub start_line: Option<u32>,
    /// Optional range end for multi-line findings.
    #[serde(default)]
    pub end_line: Option<u32>,
    /// Finding severity; scales how far line correction may move it.
    #[serde(default, deserialize_with = "severity_from_key")]
    pub severity: Severity,
    /// Short imperative description of what to change.
    #[serde(default)]
    pub action: String,
    /// Why the change matters.
    #[serde(default)]
    pub reason: String,
    /// Optional suggested patch, rendered as a fenced diff block.
    #[serde(default)]
    pub patch: Option<String>,
}

fn severity_from_key<'de, D>(deserializer: D) -> Result<Severity, D::Error>
where
    D: Deserializer<'de>,
{
    let key = String::deserialize(deserializer)?;
    Ok(Severity::from_key(&key))
}

/// Parse a JSON array of suggestions.
pub fn parse_suggestions(json: &str) -> anyhow::Result<Vec<Suggestion>> {
    Ok(serde_json::from_str(json)?)
}

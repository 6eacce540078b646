//! The polymorphic search-hit model (C8): `PluginResult` and its
//! kind-specific rendering.
//!
//! Field sets for each variant are grounded in the original implementation's
//! `search_models.py`: `NUREGSection32`, `ReportabilityManual`, and
//! `NaiveSearch`, each a concrete subclass of a common base carrying blob
//! storage coordinates and a citation flag.

use serde::{Deserialize, Serialize};

/// Which concrete document shape a [`PluginResult`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginResultKind {
    /// A section of NUREG-0000 series guidance.
    NuregSection,
    /// A section of the plant's reportability manual.
    ReportabilityManual,
    /// An undifferentiated text chunk with no structured section metadata.
    NaiveChunk,
}

/// Storage coordinates shared by every plugin result, used to build a
/// signed, time-limited blob URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobLocation {
    /// Storage account name.
    pub storage_account: String,
    /// Container within the account.
    pub container: String,
    /// Blob name (object key) within the container.
    pub blob_name: String,
    /// 1-indexed page to anchor the viewer to, if known.
    pub page_number: Option<u32>,
}

/// A single search hit, tagged by [`PluginResultKind`].
///
/// Carries the fields common to every kind (id, location, citation
/// bookkeeping) plus a kind-specific payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginResult {
    /// Stable identifier, unique within one request's result registry.
    pub id: String,
    /// Which search index/mode produced this hit.
    pub search_type: String,
    /// The query text that produced this hit.
    pub search_query: String,
    /// Storage coordinates for the source document.
    pub location: BlobLocation,
    /// Whether an agent has cited this result in its final output. Starts
    /// `false`, may transition to `true`, never back.
    pub cited: bool,
    /// The kind-specific payload.
    pub payload: PluginResultPayload,
}

/// Kind-specific fields, one variant per [`PluginResultKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PluginResultPayload {
    /// NUREG guidance section.
    NuregSection {
        /// Section number, e.g. `"3.2.1"`.
        section: String,
        /// Numbered subsection label (roman numeral in the source, kept
        /// as a string here).
        lxxii: String,
        /// Second numbered subsection label.
        lxxiii: String,
        /// Section description.
        description: String,
        /// Discussion text.
        discussion: String,
        /// Worked examples attached to the section.
        examples: String,
    },
    /// Plant reportability manual entry.
    ReportabilityManual {
        /// Section name within the manual.
        section_name: String,
        /// Cross-references to regulatory sections.
        references: String,
        /// The text of the referenced regulation.
        reference_content: String,
        /// Discussion text.
        discussion: String,
        /// Required notifications text.
        required_notifications: String,
        /// Required written reports text.
        required_written_reports: String,
    },
    /// Undifferentiated chunk.
    NaiveChunk {
        /// Chunk title.
        title: String,
        /// Source URL, used verbatim instead of a signed blob URL.
        url: String,
        /// Chunk text.
        content: String,
    },
}

impl PluginResult {
    /// Kind discriminant, derived from the payload.
    pub fn kind(&self) -> PluginResultKind {
        match &self.payload {
            PluginResultPayload::NuregSection { .. } => PluginResultKind::NuregSection,
            PluginResultPayload::ReportabilityManual { .. } => {
                PluginResultKind::ReportabilityManual
            }
            PluginResultPayload::NaiveChunk { .. } => PluginResultKind::NaiveChunk,
        }
    }

    /// Short, human-facing label for citation lists (`ContextDelta.documents[].section`).
    pub fn display_value(&self) -> String {
        match &self.payload {
            PluginResultPayload::NuregSection { section, .. } => {
                format!("NUREG Section {section}")
            }
            PluginResultPayload::ReportabilityManual { section_name, .. } => {
                section_name.clone()
            }
            PluginResultPayload::NaiveChunk { title, .. } => title.clone(),
        }
    }

    /// Resolve a URL to the source document: a signed blob URL with a
    /// page anchor for the two structured kinds, or the chunk's own URL
    /// verbatim for `NaiveChunk`.
    pub fn resolve_url(&self) -> String {
        if let PluginResultPayload::NaiveChunk { url, .. } = &self.payload {
            return url.clone();
        }
        let base = format!(
            "https://{}.blob.core.windows.net/{}/{}",
            self.location.storage_account, self.location.container, self.location.blob_name
        );
        match self.location.page_number {
            Some(page) => format!("{base}#page={page}"),
            None => base,
        }
    }

    /// Dense, LLM-facing text representation used when feeding search
    /// results back to an agent as tool output.
    pub fn agent_string(&self) -> String {
        match &self.payload {
            PluginResultPayload::NuregSection {
                section,
                description,
                discussion,
                examples,
                ..
            } => format!(
                "[{id}] NUREG {section}: {description}\n{discussion}\nExamples: {examples}",
                id = self.id
            ),
            PluginResultPayload::ReportabilityManual {
                section_name,
                reference_content,
                discussion,
                required_notifications,
                required_written_reports,
                ..
            } => format!(
                "[{id}] {section_name}\nReference: {reference_content}\n{discussion}\nRequired notifications: {required_notifications}\nRequired written reports: {required_written_reports}",
                id = self.id
            ),
            PluginResultPayload::NaiveChunk { title, content, .. } => {
                format!("[{id}] {title}\n{content}", id = self.id)
            }
        }
    }
}

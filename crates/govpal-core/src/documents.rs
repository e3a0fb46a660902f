//! Document analysis records.
//!
//! Produced by the external upload/classification workflow and pushed to
//! the engine in batches. Read-only once received — the engine never
//! mutates or re-classifies them. All types use `camelCase` serde renaming
//! for wire compatibility with the upload collaborator.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Classification assigned by the external document categorizer.
///
/// `Other` doubles as the total-function default: an unrecognized category
/// string deserializes to `Other`, which no document rule matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    /// Building permit application or issuance.
    BuildingPermit,
    /// Zoning change or variance application.
    ZoningApplication,
    /// Service or vendor contract.
    Contract,
    /// Insurance policy or certificate.
    Insurance,
    /// Budget or financial document.
    Budget,
    /// Legal filing or opinion.
    Legal,
    /// Anything else.
    #[default]
    #[serde(other)]
    Other,
}

/// Risk level assigned to a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No concerning signals.
    #[default]
    Low,
    /// Some signals worth review.
    Medium,
    /// Requires prompt attention.
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Boolean/enum flags the classifier attaches to a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentFlags {
    /// Document appears superseded or expired.
    pub is_outdated: bool,
    /// Document is a contract.
    pub is_contract: bool,
    /// Document is an insurance instrument.
    pub is_insurance: bool,
    /// Flagged for human review.
    pub requires_attention: bool,
    /// Assessed risk level.
    pub risk_level: RiskLevel,
    /// Expiration date, if one was extracted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

/// Structured data extracted from the document text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyData {
    /// Dates found in the document.
    pub dates: Vec<String>,
    /// Monetary amounts.
    pub amounts: Vec<String>,
    /// Street addresses.
    pub addresses: Vec<String>,
    /// Named parties.
    pub parties: Vec<String>,
    /// Reference/permit/case numbers.
    pub reference_numbers: Vec<String>,
}

/// One classified document, as emitted by the external analysis workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysisResult {
    /// Original filename.
    pub filename: String,
    /// Assigned category.
    #[serde(default)]
    pub category: DocumentCategory,
    /// Finer-grained subcategory label.
    #[serde(default)]
    pub subcategory: String,
    /// Classifier confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f64,
    /// Review flags.
    #[serde(default)]
    pub flags: DocumentFlags,
    /// Extracted structured data.
    #[serde(default)]
    pub key_data: KeyData,
    /// Widget ids the classifier suggests (advisory only).
    #[serde(default)]
    pub recommended_widgets: Vec<String>,
}

impl DocumentAnalysisResult {
    /// Boundary validation: filename must be non-empty and confidence in range.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.filename.trim().is_empty() {
            return Err(CoreError::InvalidDocument("empty filename".into()));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(CoreError::InvalidDocument(format!(
                "confidence {} out of range",
                self.confidence
            )));
        }
        Ok(())
    }

    /// Whether any review flag marks this document as needing attention.
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.flags.requires_attention
            || self.flags.is_outdated
            || self.flags.risk_level == RiskLevel::High
    }
}

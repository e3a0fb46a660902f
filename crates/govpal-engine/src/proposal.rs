//! Project proposal synthesis.
//!
//! A pure function of the accumulated document set. The proposal is
//! recomputed and replaced wholesale on every batch — there is no merging
//! with a previous proposal, so stale groupings cannot survive.

use serde::{Deserialize, Serialize};

use govpal_core::documents::{DocumentAnalysisResult, DocumentCategory, RiskLevel};
use govpal_core::ids;

/// Documents grouped by proposal-relevant category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileGroups {
    /// Building permit filenames.
    pub permits: Vec<String>,
    /// Zoning application filenames.
    pub zoning: Vec<String>,
    /// Contract filenames.
    pub contracts: Vec<String>,
    /// Insurance filenames.
    pub insurance: Vec<String>,
    /// Everything else (budget, legal, uncategorized).
    pub other: Vec<String>,
}

/// Aggregate risk over the document set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Overall level: >2 flagged ⇒ high, >0 ⇒ medium, else low.
    pub level: RiskLevel,
    /// Number of flagged documents.
    pub flagged_count: usize,
    /// One-line summary for display.
    pub summary: String,
}

/// Derived summary of the accumulated document set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProposal {
    /// Proposal id (`prop_<uuidv7>`), fresh on every recompute.
    pub id: String,
    /// Inferred project type display string.
    #[serde(rename = "type")]
    pub project_type: String,
    /// Short derived description.
    pub description: String,
    /// Lifecycle status; always `draft` — the engine never advances it.
    pub status: String,
    /// Filenames grouped by category.
    pub file_groups: FileGroups,
    /// Filenames of flagged documents.
    pub flagged_documents: Vec<String>,
    /// Aggregate risk.
    pub risk_assessment: RiskAssessment,
    /// Ordered suggested next steps.
    pub next_steps: Vec<String>,
}

/// Infer the project type from which category groups are populated.
///
/// Fixed precedence: permits with zoning, permits, contracts, zoning,
/// then the general fallback.
fn infer_type(groups: &FileGroups) -> &'static str {
    let permits = !groups.permits.is_empty();
    let zoning = !groups.zoning.is_empty();
    let contracts = !groups.contracts.is_empty();
    if permits && zoning {
        "Development Project"
    } else if permits {
        "Building Project"
    } else if contracts {
        "Service Contract"
    } else if zoning {
        "Planning Project"
    } else {
        "General Project"
    }
}

fn risk_level(flagged_count: usize) -> RiskLevel {
    if flagged_count > 2 {
        RiskLevel::High
    } else if flagged_count > 0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn next_steps(groups: &FileGroups, any_flagged: bool) -> Vec<String> {
    let mut steps = Vec::new();
    if any_flagged {
        steps.push("Review flagged documents requiring attention".to_string());
    }
    if !groups.permits.is_empty() {
        steps.push("Verify permit applications are complete".to_string());
    }
    if !groups.zoning.is_empty() {
        steps.push("Confirm zoning compliance for affected parcels".to_string());
    }
    if !groups.contracts.is_empty() {
        steps.push("Review contract terms and renewal dates".to_string());
    }
    if !groups.insurance.is_empty() {
        steps.push("Confirm insurance coverage is current".to_string());
    }
    steps.push("Compile summary for department review".to_string());
    steps
}

/// Synthesize a proposal from the full document history.
///
/// `None` while no documents have arrived — an empty session has no
/// proposal rather than an empty one.
#[must_use]
pub fn synthesize(documents: &[DocumentAnalysisResult]) -> Option<ProjectProposal> {
    if documents.is_empty() {
        return None;
    }

    let mut groups = FileGroups::default();
    for doc in documents {
        let bucket = match doc.category {
            DocumentCategory::BuildingPermit => &mut groups.permits,
            DocumentCategory::ZoningApplication => &mut groups.zoning,
            DocumentCategory::Contract => &mut groups.contracts,
            DocumentCategory::Insurance => &mut groups.insurance,
            DocumentCategory::Budget | DocumentCategory::Legal | DocumentCategory::Other => {
                &mut groups.other
            }
        };
        bucket.push(doc.filename.clone());
    }

    let flagged_documents: Vec<String> = documents
        .iter()
        .filter(|d| d.is_flagged())
        .map(|d| d.filename.clone())
        .collect();
    let flagged_count = flagged_documents.len();

    let project_type = infer_type(&groups);
    let steps = next_steps(&groups, flagged_count > 0);

    Some(ProjectProposal {
        id: ids::proposal_id(),
        project_type: project_type.to_string(),
        description: format!(
            "{project_type} synthesized from {} analyzed document{}",
            documents.len(),
            if documents.len() == 1 { "" } else { "s" }
        ),
        status: "draft".to_string(),
        file_groups: groups,
        flagged_documents,
        risk_assessment: RiskAssessment {
            level: risk_level(flagged_count),
            flagged_count,
            summary: format!("{flagged_count} of {} documents flagged", documents.len()),
        },
        next_steps: steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use govpal_core::documents::{DocumentFlags, KeyData};

    fn doc(filename: &str, category: DocumentCategory) -> DocumentAnalysisResult {
        DocumentAnalysisResult {
            filename: filename.into(),
            category,
            subcategory: String::new(),
            confidence: 0.9,
            flags: DocumentFlags::default(),
            key_data: KeyData::default(),
            recommended_widgets: Vec::new(),
        }
    }

    fn flagged(filename: &str, category: DocumentCategory) -> DocumentAnalysisResult {
        let mut d = doc(filename, category);
        d.flags.requires_attention = true;
        d
    }

    #[test]
    fn empty_history_has_no_proposal() {
        assert!(synthesize(&[]).is_none());
    }

    #[test]
    fn type_precedence() {
        let cases: &[(&[DocumentCategory], &str)] = &[
            (
                &[DocumentCategory::BuildingPermit, DocumentCategory::ZoningApplication],
                "Development Project",
            ),
            (&[DocumentCategory::BuildingPermit], "Building Project"),
            (
                &[DocumentCategory::BuildingPermit, DocumentCategory::Contract],
                "Building Project",
            ),
            (&[DocumentCategory::Contract], "Service Contract"),
            (&[DocumentCategory::ZoningApplication], "Planning Project"),
            (&[DocumentCategory::Budget], "General Project"),
        ];
        for (categories, expected) in cases {
            let docs: Vec<_> = categories
                .iter()
                .enumerate()
                .map(|(i, c)| doc(&format!("d{i}.pdf"), *c))
                .collect();
            let p = synthesize(&docs).unwrap();
            assert_eq!(&p.project_type, expected, "categories {categories:?}");
        }
    }

    #[test]
    fn files_are_grouped_by_category() {
        let p = synthesize(&[
            doc("permit.pdf", DocumentCategory::BuildingPermit),
            doc("memo.pdf", DocumentCategory::Legal),
            doc("policy.pdf", DocumentCategory::Insurance),
        ])
        .unwrap();
        assert_eq!(p.file_groups.permits, vec!["permit.pdf"]);
        assert_eq!(p.file_groups.insurance, vec!["policy.pdf"]);
        assert_eq!(p.file_groups.other, vec!["memo.pdf"]);
        assert!(p.file_groups.contracts.is_empty());
    }

    #[test]
    fn risk_thresholds() {
        let clean = synthesize(&[doc("a.pdf", DocumentCategory::Contract)]).unwrap();
        assert_eq!(clean.risk_assessment.level, RiskLevel::Low);

        let one = synthesize(&[flagged("a.pdf", DocumentCategory::Contract)]).unwrap();
        assert_eq!(one.risk_assessment.level, RiskLevel::Medium);

        let three = synthesize(&[
            flagged("a.pdf", DocumentCategory::Contract),
            flagged("b.pdf", DocumentCategory::Contract),
            flagged("c.pdf", DocumentCategory::Contract),
        ])
        .unwrap();
        assert_eq!(three.risk_assessment.level, RiskLevel::High);
        assert_eq!(three.risk_assessment.flagged_count, 3);
    }

    #[test]
    fn next_steps_are_ordered_and_end_with_summary() {
        let p = synthesize(&[
            flagged("permit.pdf", DocumentCategory::BuildingPermit),
            doc("contract.pdf", DocumentCategory::Contract),
        ])
        .unwrap();
        assert_eq!(
            p.next_steps,
            vec![
                "Review flagged documents requiring attention",
                "Verify permit applications are complete",
                "Review contract terms and renewal dates",
                "Compile summary for department review",
            ]
        );
    }

    #[test]
    fn recompute_replaces_wholesale() {
        let first = synthesize(&[doc("a.pdf", DocumentCategory::Contract)]).unwrap();
        let both = synthesize(&[
            doc("a.pdf", DocumentCategory::Contract),
            doc("z.pdf", DocumentCategory::ZoningApplication),
        ])
        .unwrap();
        assert_ne!(first.id, both.id);
        assert_eq!(both.project_type, "Service Contract");
        assert_eq!(both.file_groups.zoning, vec!["z.pdf"]);
    }

    #[test]
    fn proposal_serializes_camel_case() {
        let p = synthesize(&[flagged("a.pdf", DocumentCategory::BuildingPermit)]).unwrap();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "Building Project");
        assert_eq!(json["status"], "draft");
        assert_eq!(json["riskAssessment"]["level"], "medium");
        assert_eq!(json["fileGroups"]["permits"][0], "a.pdf");
    }
}

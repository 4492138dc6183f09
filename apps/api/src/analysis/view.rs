//! UI-facing rendering of an `AnalysisResult`: score tier, placeholder text, and
//! which feedback sections start expanded.

use serde::Serialize;

use crate::analysis::models::AnalysisResult;

const NO_SUMMARY: &str = "No summary provided.";
const NO_STRENGTHS: &str = "No specific strengths identified.";
const NO_WEAKNESSES: &str = "No specific weaknesses identified.";
const NO_KEYWORDS: &str = "No specific keywords were matched.";

/// Qualitative band for a relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Excellent,
    Good,
    NeedsImprovement,
}

impl MatchTier {
    /// ≥80 excellent, ≥60 good, otherwise needs improvement.
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            MatchTier::Excellent
        } else if score >= 60 {
            MatchTier::Good
        } else {
            MatchTier::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchTier::Excellent => "Excellent Match",
            MatchTier::Good => "Good Match",
            MatchTier::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// A togglable list. When the source list was empty, `items` holds the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackSection {
    pub title: &'static str,
    pub items: Vec<String>,
    pub is_placeholder: bool,
    pub expanded: bool,
}

impl FeedbackSection {
    fn list(title: &'static str, items: &[String], placeholder: &str, expanded: bool) -> Self {
        if items.is_empty() {
            Self {
                title,
                items: vec![placeholder.to_string()],
                is_placeholder: true,
                expanded,
            }
        } else {
            Self {
                title,
                items: items.to_vec(),
                is_placeholder: false,
                expanded,
            }
        }
    }

    /// Keywords render as one comma-separated line.
    fn joined(title: &'static str, items: &[String], placeholder: &str, expanded: bool) -> Self {
        let mut section = Self::list(title, items, placeholder, expanded);
        if !section.is_placeholder {
            section.items = vec![items.join(", ")];
        }
        section
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    pub score: u8,
    /// e.g. "88%"
    pub score_label: String,
    /// 0.0 – 1.0, for a progress bar.
    pub progress: f32,
    pub tier: MatchTier,
    pub tier_label: &'static str,
    pub summary: String,
    pub strengths: FeedbackSection,
    pub weaknesses: FeedbackSection,
    pub keywords: FeedbackSection,
}

impl AnalysisView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let tier = MatchTier::from_score(result.score);
        let summary = if result.summary.trim().is_empty() {
            NO_SUMMARY.to_string()
        } else {
            result.summary.clone()
        };

        Self {
            score: result.score,
            score_label: format!("{}%", result.score),
            progress: f32::from(result.score) / 100.0,
            tier,
            tier_label: tier.label(),
            summary,
            strengths: FeedbackSection::list(
                "Strengths Aligned with Job",
                &result.strengths,
                NO_STRENGTHS,
                true,
            ),
            weaknesses: FeedbackSection::list(
                "Missing from Resume",
                &result.weaknesses,
                NO_WEAKNESSES,
                true,
            ),
            keywords: FeedbackSection::joined(
                "Keywords Matched",
                &result.keywords_matched,
                NO_KEYWORDS,
                false,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: u8) -> AnalysisResult {
        AnalysisResult {
            score,
            summary: "Strong match.".to_string(),
            strengths: vec!["Python".to_string(), "Django".to_string()],
            weaknesses: vec![],
            keywords_matched: vec!["Python".to_string(), "Django".to_string()],
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(MatchTier::from_score(100), MatchTier::Excellent);
        assert_eq!(MatchTier::from_score(80), MatchTier::Excellent);
        assert_eq!(MatchTier::from_score(79), MatchTier::Good);
        assert_eq!(MatchTier::from_score(60), MatchTier::Good);
        assert_eq!(MatchTier::from_score(59), MatchTier::NeedsImprovement);
        assert_eq!(MatchTier::from_score(0), MatchTier::NeedsImprovement);
    }

    #[test]
    fn test_view_of_strong_match() {
        let view = AnalysisView::from_result(&result(88));
        assert_eq!(view.score_label, "88%");
        assert!((view.progress - 0.88).abs() < f32::EPSILON);
        assert_eq!(view.tier, MatchTier::Excellent);
        assert_eq!(view.tier_label, "Excellent Match");
        assert_eq!(view.summary, "Strong match.");
        assert_eq!(view.strengths.items, vec!["Python", "Django"]);
        assert!(!view.strengths.is_placeholder);
        assert_eq!(view.keywords.items, vec!["Python, Django"]);
    }

    #[test]
    fn test_empty_weaknesses_use_placeholder() {
        let view = AnalysisView::from_result(&result(88));
        assert!(view.weaknesses.is_placeholder);
        assert_eq!(view.weaknesses.items, vec![NO_WEAKNESSES]);
    }

    #[test]
    fn test_empty_fields_all_fall_back() {
        let empty = AnalysisResult {
            score: 12,
            summary: "  ".to_string(),
            strengths: vec![],
            weaknesses: vec![],
            keywords_matched: vec![],
        };
        let view = AnalysisView::from_result(&empty);
        assert_eq!(view.tier_label, "Needs Improvement");
        assert_eq!(view.summary, NO_SUMMARY);
        assert_eq!(view.strengths.items, vec![NO_STRENGTHS]);
        assert_eq!(view.keywords.items, vec![NO_KEYWORDS]);
        assert!(view.keywords.is_placeholder);
    }

    #[test]
    fn test_keywords_start_collapsed() {
        let view = AnalysisView::from_result(&result(65));
        assert!(view.strengths.expanded);
        assert!(view.weaknesses.expanded);
        assert!(!view.keywords.expanded);
        assert_eq!(view.tier, MatchTier::Good);
    }
}

use serde::{Deserialize, Serialize};

/// The five-field record the model returns for one analysis.
///
/// All fields are required; a payload missing any of them is rejected rather
/// than partially filled. Placeholders for empty lists belong to the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// 0 – 100
    pub score: u8,
    pub summary: String,
    /// Expected 3 – 4 items, not enforced.
    pub strengths: Vec<String>,
    /// Expected 2 – 3 items, not enforced.
    pub weaknesses: Vec<String>,
    pub keywords_matched: Vec<String>,
}

/// Model output as it arrives on the wire. `score` is a JSON number that may be
/// written as `72` or `72.0`; range checking happens when converting.
#[derive(Debug, Deserialize)]
pub struct RawAnalysis {
    pub score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub keywords_matched: Vec<String>,
}

impl RawAnalysis {
    /// Rounds the score and checks it lies in 0 – 100. Returns the offending
    /// value on failure.
    pub fn into_result(self) -> Result<AnalysisResult, f64> {
        let rounded = self.score.round();
        if !(0.0..=100.0).contains(&rounded) {
            return Err(self.score);
        }
        Ok(AnalysisResult {
            score: rounded as u8,
            summary: self.summary,
            strengths: self.strengths,
            weaknesses: self.weaknesses,
            keywords_matched: self.keywords_matched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(score: f64) -> RawAnalysis {
        RawAnalysis {
            score,
            summary: "Good fit.".to_string(),
            strengths: vec!["Python".to_string()],
            weaknesses: vec![],
            keywords_matched: vec![],
        }
    }

    #[test]
    fn test_integer_score_is_kept() {
        assert_eq!(raw(72.0).into_result().unwrap().score, 72);
    }

    #[test]
    fn test_fractional_score_is_rounded() {
        assert_eq!(raw(79.6).into_result().unwrap().score, 80);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(raw(0.0).into_result().unwrap().score, 0);
        assert_eq!(raw(100.0).into_result().unwrap().score, 100);
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        assert_eq!(raw(101.0).into_result().unwrap_err(), 101.0);
        assert_eq!(raw(-3.0).into_result().unwrap_err(), -3.0);
    }

    #[test]
    fn test_raw_analysis_requires_every_key() {
        let missing_keywords = r#"{"score": 50, "summary": "s", "strengths": [], "weaknesses": []}"#;
        assert!(serde_json::from_str::<RawAnalysis>(missing_keywords).is_err());
    }

    #[test]
    fn test_raw_analysis_ignores_extra_keys() {
        let json = r#"{"score": 50, "summary": "s", "strengths": [], "weaknesses": [],
                       "keywords_matched": [], "confidence": "high"}"#;
        assert!(serde_json::from_str::<RawAnalysis>(json).is_ok());
    }

    #[test]
    fn test_result_serializes_with_wire_key_names() {
        let value = serde_json::to_value(raw(88.0).into_result().unwrap()).unwrap();
        assert_eq!(value["score"], 88);
        assert!(value.get("keywords_matched").is_some());
    }
}

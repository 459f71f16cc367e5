use serde::{Deserialize, Serialize};

/// Response of `/api/career-recommendations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendations {
    #[serde(default)]
    pub career_recommendations: Vec<CareerRecommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendation {
    #[serde(default)]
    pub career_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub why_recommended: String,
}

/// Response of `/api/career-guidance`: what it takes to enter a career.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerGuidance {
    #[serde(default)]
    pub relevant_exams: Vec<Exam>,
    #[serde(default)]
    pub scholarships: Vec<Scholarship>,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    #[serde(default)]
    pub programs: Vec<Program>,
}

impl CareerGuidance {
    pub fn is_empty(&self) -> bool {
        self.relevant_exams.is_empty()
            && self.scholarships.is_empty()
            && self.prerequisites.is_empty()
            && self.programs.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    #[serde(default)]
    pub exam_title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    #[serde(default)]
    pub scholarship_title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prerequisite {
    #[serde(default)]
    pub prerequisite_title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(default)]
    pub program_title: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendations_deserialize_from_camel_case() {
        let json = r#"{
            "careerRecommendations": [
                {"careerTitle": "Data Scientist", "description": "Builds models", "whyRecommended": "You like statistics"}
            ]
        }"#;
        let parsed: CareerRecommendations = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.career_recommendations.len(), 1);
        assert_eq!(parsed.career_recommendations[0].career_title, "Data Scientist");
        assert_eq!(
            parsed.career_recommendations[0].why_recommended,
            "You like statistics"
        );
    }

    #[test]
    fn test_guidance_missing_groups_default_to_empty() {
        let json = r#"{"relevantExams": [{"examTitle": "GATE", "description": "Graduate aptitude"}]}"#;
        let parsed: CareerGuidance = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.relevant_exams[0].exam_title, "GATE");
        assert!(parsed.scholarships.is_empty());
        assert!(!parsed.is_empty());
        assert!(CareerGuidance::default().is_empty());
    }
}

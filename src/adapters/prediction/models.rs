//! Wire models for the prediction service
//!
//! Response shapes as the inference endpoints emit them, plus the
//! conversions into domain types. Scores are sanitized here: finite
//! out-of-range values are clamped into [0, 1], non-finite values reject
//! the response.

use crate::domain::errors::PredictionError;
use crate::domain::{DiseaseCandidate, DiseaseResult, OutcomeResult, RiskLevel};
use serde::Deserialize;

/// `POST /predict-disease` response body
#[derive(Debug, Deserialize)]
pub struct DiseaseResponse {
    #[serde(default)]
    pub top3: Vec<DiseaseCandidateWire>,
}

/// One ranked candidate on the wire
#[derive(Debug, Deserialize)]
pub struct DiseaseCandidateWire {
    pub disease: String,
    pub confidence: f64,
}

/// `POST /predict-outcome` response body
#[derive(Debug, Deserialize)]
pub struct OutcomeResponse {
    pub risk: String,
    pub probability: f64,
}

/// One entry of the `GET /feature-importance` response
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Sanitize a score from the wire: clamp finite values into [0, 1],
/// reject non-finite ones
pub(crate) fn sanitize_score(value: f64, context: &str) -> Result<f64, PredictionError> {
    if !value.is_finite() {
        return Err(PredictionError::NonFiniteScore(format!(
            "{context}: {value}"
        )));
    }
    Ok(value.clamp(0.0, 1.0))
}

impl TryFrom<DiseaseResponse> for DiseaseResult {
    type Error = PredictionError;

    fn try_from(response: DiseaseResponse) -> Result<Self, Self::Error> {
        let mut top3 = Vec::with_capacity(3);
        for candidate in response.top3.into_iter().take(3) {
            if candidate.disease.trim().is_empty() {
                return Err(PredictionError::InvalidResponse(
                    "Empty disease label in top3".to_string(),
                ));
            }
            let confidence = sanitize_score(candidate.confidence, "top3 confidence")?;
            top3.push(DiseaseCandidate {
                disease: candidate.disease,
                confidence,
            });
        }
        Ok(DiseaseResult { top3 })
    }
}

impl TryFrom<OutcomeResponse> for OutcomeResult {
    type Error = PredictionError;

    fn try_from(response: OutcomeResponse) -> Result<Self, Self::Error> {
        let risk = RiskLevel::parse(&response.risk)
            .map_err(PredictionError::InvalidResponse)?;
        let probability = sanitize_score(response.probability, "outcome probability")?;
        Ok(OutcomeResult { risk, probability })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disease_response_conversion() {
        let response: DiseaseResponse = serde_json::from_str(
            r#"{"top3": [{"disease": "Flu", "confidence": 0.8}, {"disease": "Cold", "confidence": 0.15}]}"#,
        )
        .unwrap();
        let result = DiseaseResult::try_from(response).unwrap();
        assert_eq!(result.top3.len(), 2);
        assert_eq!(result.primary().unwrap().disease, "Flu");
    }

    #[test]
    fn test_disease_response_truncated_to_three() {
        let response = DiseaseResponse {
            top3: (0..5)
                .map(|i| DiseaseCandidateWire {
                    disease: format!("d{i}"),
                    confidence: 0.1,
                })
                .collect(),
        };
        let result = DiseaseResult::try_from(response).unwrap();
        assert_eq!(result.top3.len(), 3);
    }

    #[test]
    fn test_out_of_range_confidence_clamped() {
        let response = DiseaseResponse {
            top3: vec![DiseaseCandidateWire {
                disease: "Flu".to_string(),
                confidence: 1.3,
            }],
        };
        let result = DiseaseResult::try_from(response).unwrap();
        assert_eq!(result.top3[0].confidence, 1.0);
    }

    #[test]
    fn test_non_finite_probability_rejected() {
        let response = OutcomeResponse {
            risk: "High Risk".to_string(),
            probability: f64::NAN,
        };
        let result = OutcomeResult::try_from(response);
        assert!(matches!(result, Err(PredictionError::NonFiniteScore(_))));
    }

    #[test]
    fn test_outcome_response_conversion() {
        let response: OutcomeResponse =
            serde_json::from_str(r#"{"risk": "HighRisk", "probability": 0.7}"#).unwrap();
        let result = OutcomeResult::try_from(response).unwrap();
        assert_eq!(result.risk, RiskLevel::HighRisk);
        assert_eq!(result.probability, 0.7);
    }

    #[test]
    fn test_unknown_risk_label_rejected() {
        let response = OutcomeResponse {
            risk: "Medium".to_string(),
            probability: 0.5,
        };
        assert!(OutcomeResult::try_from(response).is_err());
    }
}

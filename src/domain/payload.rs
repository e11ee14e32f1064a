//! Clinical payload schema and normalization
//!
//! The console accepts loosely-keyed JSON payloads from the submission form
//! and normalizes them into a closed, typed schema before anything touches
//! the inference service. Missing numeric fields default to 0, missing
//! categorical fields default to their baseline category (Female / Normal),
//! and missing symptom flags default to "No".

use super::record::FeatureValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Patient gender as encoded for the classifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    /// Baseline category
    #[default]
    Female,
    Male,
}

/// Three-level categorical measurement (blood pressure, cholesterol)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Level {
    Low,
    /// Baseline category
    #[default]
    Normal,
    High,
}

impl Level {
    /// Ordinal encoding used in the model feature vector
    pub fn encoded(self) -> f64 {
        match self {
            Level::Low => 0.0,
            Level::Normal => 1.0,
            Level::High => 2.0,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Level::Low),
            "normal" => Some(Level::Normal),
            "high" => Some(Level::High),
            _ => None,
        }
    }
}

/// Normalized clinical feature payload
///
/// This is the closed schema every submission is shaped into. All fields
/// carry documented defaults so a partially filled form still produces a
/// valid payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClinicalPayload {
    /// Patient age in years, default 0
    pub age: f64,

    /// Patient gender, default Female
    pub gender: Gender,

    /// Fever symptom flag, default "No"
    pub fever: bool,

    /// Cough symptom flag, default "No"
    pub cough: bool,

    /// Fatigue symptom flag, default "No"
    pub fatigue: bool,

    /// Difficulty-breathing symptom flag, default "No"
    pub difficulty_breathing: bool,

    /// Blood pressure category, default Normal
    pub blood_pressure: Level,

    /// Cholesterol category, default Normal
    pub cholesterol: Level,
}

impl ClinicalPayload {
    /// Normalize a loosely-keyed JSON payload
    ///
    /// Tolerates the key variants the submission form has historically
    /// produced ("Fever"/"fever", "Blood Pressure"/"BloodPressure"/"bp_cat",
    /// "Difficulty Breathing"/"dbreath") and truthy flag spellings
    /// (yes/y/true/1). Unknown keys are ignored; missing keys take their
    /// documented defaults.
    pub fn from_loose_json(payload: &Value) -> Self {
        let age = lookup(payload, &["Age", "age"])
            .and_then(numeric)
            .map(|a| a.max(0.0))
            .unwrap_or(0.0);

        let gender = lookup(payload, &["Gender", "gender"])
            .and_then(Value::as_str)
            .map(|g| {
                if matches!(g.trim().to_lowercase().as_str(), "male" | "m" | "1") {
                    Gender::Male
                } else {
                    Gender::Female
                }
            })
            .unwrap_or_default();

        let blood_pressure = lookup(payload, &["BloodPressure", "Blood Pressure", "bp_cat"])
            .and_then(Value::as_str)
            .and_then(Level::parse)
            .unwrap_or_default();

        let cholesterol = lookup(payload, &["Cholesterol", "Cholesterol Level", "chol"])
            .and_then(Value::as_str)
            .and_then(Level::parse)
            .unwrap_or_default();

        Self {
            age,
            gender,
            fever: flag(payload, &["Fever", "fever"]),
            cough: flag(payload, &["Cough", "cough"]),
            fatigue: flag(payload, &["Fatigue", "fatigue"]),
            difficulty_breathing: flag(
                payload,
                &["DifficultyBreathing", "Difficulty Breathing", "dbreath"],
            ),
            blood_pressure,
            cholesterol,
        }
    }

    /// The model feature vector in the fixed order the classifiers expect:
    /// `[fever, cough, fatigue, difficulty_breathing, age, gender,
    /// blood_pressure, cholesterol]`
    pub fn feature_vector(&self) -> [f64; 8] {
        [
            encode_flag(self.fever),
            encode_flag(self.cough),
            encode_flag(self.fatigue),
            encode_flag(self.difficulty_breathing),
            self.age,
            match self.gender {
                Gender::Male => 1.0,
                Gender::Female => 0.0,
            },
            self.blood_pressure.encoded(),
            self.cholesterol.encoded(),
        ]
    }

    /// The canonical request body sent to the inference endpoints
    pub fn to_request_body(&self) -> Value {
        serde_json::json!({
            "Age": self.age,
            "Gender": match self.gender { Gender::Male => "Male", Gender::Female => "Female" },
            "Fever": yes_no(self.fever),
            "Cough": yes_no(self.cough),
            "Fatigue": yes_no(self.fatigue),
            "DifficultyBreathing": yes_no(self.difficulty_breathing),
            "BloodPressure": level_label(self.blood_pressure),
            "Cholesterol": level_label(self.cholesterol),
        })
    }

    /// The feature snapshot stored on the diagnostic record
    pub fn feature_snapshot(&self) -> BTreeMap<String, FeatureValue> {
        let mut features = BTreeMap::new();
        features.insert("Age".to_string(), FeatureValue::Number(self.age));
        features.insert(
            "Gender".to_string(),
            FeatureValue::Text(
                match self.gender {
                    Gender::Male => "Male",
                    Gender::Female => "Female",
                }
                .to_string(),
            ),
        );
        features.insert("Fever".to_string(), FeatureValue::Flag(self.fever));
        features.insert("Cough".to_string(), FeatureValue::Flag(self.cough));
        features.insert("Fatigue".to_string(), FeatureValue::Flag(self.fatigue));
        features.insert(
            "DifficultyBreathing".to_string(),
            FeatureValue::Flag(self.difficulty_breathing),
        );
        features.insert(
            "BloodPressure".to_string(),
            FeatureValue::Text(level_label(self.blood_pressure).to_string()),
        );
        features.insert(
            "Cholesterol".to_string(),
            FeatureValue::Text(level_label(self.cholesterol).to_string()),
        );
        features
    }
}

fn lookup<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| payload.get(k)).filter(|v| !v.is_null())
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn flag(payload: &Value, keys: &[&str]) -> bool {
    match lookup(payload, keys) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            matches!(s.trim().to_lowercase().as_str(), "yes" | "y" | "true" | "1")
        }
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        _ => false,
    }
}

fn encode_flag(set: bool) -> f64 {
    if set {
        1.0
    } else {
        0.0
    }
}

fn yes_no(set: bool) -> &'static str {
    if set {
        "Yes"
    } else {
        "No"
    }
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::Low => "Low",
        Level::Normal => "Normal",
        Level::High => "High",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_defaults_for_empty_payload() {
        let payload = ClinicalPayload::from_loose_json(&json!({}));
        assert_eq!(payload, ClinicalPayload::default());
        assert_eq!(payload.age, 0.0);
        assert_eq!(payload.gender, Gender::Female);
        assert_eq!(payload.blood_pressure, Level::Normal);
        assert!(!payload.fever);
    }

    #[test]
    fn test_key_variants_tolerated() {
        let a = ClinicalPayload::from_loose_json(&json!({
            "Age": 45, "Fever": "Yes", "BloodPressure": "High"
        }));
        let b = ClinicalPayload::from_loose_json(&json!({
            "age": "45", "fever": "y", "Blood Pressure": "High"
        }));
        assert_eq!(a, b);
        assert_eq!(a.age, 45.0);
        assert!(a.fever);
        assert_eq!(a.blood_pressure, Level::High);
    }

    #[test_case("yes", true; "yes is truthy")]
    #[test_case("Y", true; "y is truthy")]
    #[test_case("TRUE", true; "true is truthy")]
    #[test_case("1", true; "one is truthy")]
    #[test_case("No", false; "no is falsy")]
    #[test_case("maybe", false; "unknown is falsy")]
    fn test_flag_spellings(input: &str, expected: bool) {
        let payload = ClinicalPayload::from_loose_json(&json!({ "Cough": input }));
        assert_eq!(payload.cough, expected);
    }

    #[test]
    fn test_feature_vector_order() {
        let payload = ClinicalPayload::from_loose_json(&json!({
            "Age": 45, "Gender": "Male", "Fever": "Yes",
            "BloodPressure": "Low", "Cholesterol": "High"
        }));
        assert_eq!(
            payload.feature_vector(),
            [1.0, 0.0, 0.0, 0.0, 45.0, 1.0, 0.0, 2.0]
        );
    }

    #[test]
    fn test_negative_age_floored_to_zero() {
        let payload = ClinicalPayload::from_loose_json(&json!({ "Age": -3 }));
        assert_eq!(payload.age, 0.0);
    }

    #[test]
    fn test_request_body_uses_canonical_keys() {
        let payload = ClinicalPayload::from_loose_json(&json!({ "fever": "yes", "Age": 30 }));
        let body = payload.to_request_body();
        assert_eq!(body["Fever"], "Yes");
        assert_eq!(body["Cough"], "No");
        assert_eq!(body["Age"], 30.0);
        assert_eq!(body["Gender"], "Female");
        assert_eq!(body["BloodPressure"], "Normal");
    }

    #[test]
    fn test_feature_snapshot_round_trips() {
        let payload = ClinicalPayload::from_loose_json(&json!({ "Age": 61, "Fatigue": "Yes" }));
        let snapshot = payload.feature_snapshot();
        assert_eq!(snapshot["Age"], FeatureValue::Number(61.0));
        assert_eq!(snapshot["Fatigue"], FeatureValue::Flag(true));
        assert_eq!(snapshot.len(), 8);
    }
}

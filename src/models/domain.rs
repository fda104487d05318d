use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::MatchError;

/// Youngest age any profile may carry
pub const MIN_AGE: u8 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::NonBinary => "non-binary",
            Gender::Other => "other",
        }
    }
}

/// What a user is looking for on the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipGoal {
    Marriage,
    Relationship,
    Casual,
    Friendship,
    NotSure,
}

impl RelationshipGoal {
    pub const ALL: [RelationshipGoal; 5] = [
        RelationshipGoal::Marriage,
        RelationshipGoal::Relationship,
        RelationshipGoal::Casual,
        RelationshipGoal::Friendship,
        RelationshipGoal::NotSure,
    ];

    /// Wire spelling, also used verbatim in match reasons
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipGoal::Marriage => "marriage",
            RelationshipGoal::Relationship => "relationship",
            RelationshipGoal::Casual => "casual",
            RelationshipGoal::Friendship => "friendship",
            RelationshipGoal::NotSure => "not-sure",
        }
    }

    /// Row/column position in the goal compatibility matrix
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Smoking / drinking frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Habit {
    Never,
    Socially,
    Regularly,
    PreferNotSay,
}

/// GeoJSON point as stored with the profile document (`[longitude, latitude]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "default_point_type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

fn default_point_type() -> String {
    "Point".to_string()
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            kind: default_point_type(),
            coordinates: [longitude, latitude],
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Display location plus optional coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
}

/// Inclusive age bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    #[inline]
    pub fn contains(&self, age: u8) -> bool {
        age >= self.min && age <= self.max
    }
}

/// Discovery preferences set by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<AgeRange>,
    /// Kilometres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
    #[serde(default)]
    pub show_me_gender: Vec<String>,
    #[serde(default)]
    pub dealbreakers: Vec<String>,
}

/// Profile document as materialised from the profile store
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[validate(range(min = 18))]
    pub age: u8,
    pub gender: Gender,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_goal: Option<RelationshipGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoking: Option<Habit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drinking: Option<Habit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub profile_completed: bool,
}

impl UserProfile {
    /// Minimal profile, mostly useful for building fixtures
    pub fn new(id: impl Into<String>, age: u8, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            age,
            gender,
            interests: Vec::new(),
            traits: Vec::new(),
            relationship_goal: None,
            location: None,
            smoking: None,
            drinking: None,
            education: None,
            occupation: None,
            bio: None,
            preferences: None,
            is_verified: None,
            profile_completed: true,
        }
    }

    pub fn coordinates(&self) -> Option<&GeoPoint> {
        self.location.as_ref().and_then(|l| l.coordinates.as_ref())
    }

    pub fn age_range(&self) -> Option<&AgeRange> {
        self.preferences.as_ref().and_then(|p| p.age_range.as_ref())
    }

    /// Configured max distance, or `None` when unset or not positive
    pub fn max_distance_km(&self) -> Option<f64> {
        self.preferences
            .as_ref()
            .and_then(|p| p.max_distance)
            .filter(|d| *d > 0.0)
    }

    pub fn shown_genders(&self) -> &[String] {
        self.preferences
            .as_ref()
            .map(|p| p.show_me_gender.as_slice())
            .unwrap_or(&[])
    }

    /// Non-empty education value, if any
    pub fn education(&self) -> Option<&str> {
        self.education.as_deref().filter(|e| !e.is_empty())
    }
}

/// Per-factor sub-scores, each in `0.0..=100.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub interests: f64,
    pub traits: f64,
    pub goals: f64,
    pub location: f64,
    pub age: f64,
    pub lifestyle: f64,
}

/// Compatibility of one candidate relative to one requester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub user_id: String,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub interests: f64,
    pub traits: f64,
    pub goals: f64,
    pub location: f64,
    pub age: f64,
    pub lifestyle: f64,
}

impl ScoringWeights {
    const SUM_TOLERANCE: f64 = 1e-6;

    pub fn sum(&self) -> f64 {
        self.interests + self.traits + self.goals + self.location + self.age + self.lifestyle
    }

    /// Weights must be non-negative and sum to 1.0
    pub fn validate(&self) -> Result<(), MatchError> {
        let all = [
            self.interests,
            self.traits,
            self.goals,
            self.location,
            self.age,
            self.lifestyle,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(MatchError::InvalidWeights(format!(
                "weights must be finite and non-negative: {:?}",
                self
            )));
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(MatchError::InvalidWeights(format!(
                "weights must sum to 1.0, got {}",
                sum
            )));
        }

        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interests: 0.25,
            traits: 0.20,
            goals: 0.20,
            location: 0.15,
            age: 0.10,
            lifestyle: 0.10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_valid() {
        let weights = ScoringWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_weights_rejected_when_sum_is_off() {
        let weights = ScoringWeights {
            interests: 0.5,
            ..ScoringWeights::default()
        };
        assert!(matches!(weights.validate(), Err(MatchError::InvalidWeights(_))));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ScoringWeights {
            interests: 0.45,
            traits: -0.2,
            goals: 0.4,
            ..ScoringWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_profile_deserializes_from_document() {
        let json = r#"{
            "id": "u1",
            "name": "Robin",
            "age": 29,
            "gender": "non-binary",
            "interests": ["Hiking"],
            "relationshipGoal": "not-sure",
            "location": {
                "city": "Lisbon",
                "coordinates": { "type": "Point", "coordinates": [-9.1393, 38.7223] }
            },
            "smoking": "prefer-not-say",
            "preferences": {
                "ageRange": { "min": 25, "max": 35 },
                "maxDistance": 30,
                "showMeGender": ["everyone"]
            }
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.gender, Gender::NonBinary);
        assert_eq!(profile.relationship_goal, Some(RelationshipGoal::NotSure));
        assert_eq!(profile.smoking, Some(Habit::PreferNotSay));
        assert!(profile.traits.is_empty());
        let point = profile.coordinates().unwrap();
        assert_eq!(point.latitude(), 38.7223);
        assert_eq!(point.longitude(), -9.1393);
        assert_eq!(profile.age_range(), Some(&AgeRange { min: 25, max: 35 }));
        assert_eq!(profile.max_distance_km(), Some(30.0));
        assert_eq!(profile.shown_genders(), ["everyone".to_string()]);
    }

    #[test]
    fn test_zero_max_distance_treated_as_unset() {
        let mut profile = UserProfile::new("u1", 30, Gender::Female);
        profile.preferences = Some(Preferences {
            max_distance: Some(0.0),
            ..Preferences::default()
        });
        assert_eq!(profile.max_distance_km(), None);
    }

    #[test]
    fn test_underage_profile_fails_validation() {
        let profile = UserProfile::new("u1", 17, Gender::Male);
        assert!(profile.validate().is_err());

        let profile = UserProfile::new("u1", MIN_AGE, Gender::Male);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_match_score_serializes_camel_case() {
        let score = MatchScore {
            user_id: "u2".to_string(),
            score: 77,
            breakdown: ScoreBreakdown {
                interests: 50.0,
                traits: 50.0,
                goals: 50.0,
                location: 70.0,
                age: 100.0,
                lifestyle: 50.0,
            },
            reasons: vec![],
        };
        let value = serde_json::to_value(&score).unwrap();
        assert_eq!(value["userId"], "u2");
        assert_eq!(value["breakdown"]["location"], 70.0);
    }
}

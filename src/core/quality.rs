use serde::{Deserialize, Serialize};

/// Colour bucket shown next to a match score in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchColor {
    Green,
    Blue,
    Purple,
    Yellow,
    Gray,
}

impl MatchColor {
    /// Style token the web client maps onto its palette
    pub fn token(&self) -> &'static str {
        match self {
            MatchColor::Green => "text-green-600",
            MatchColor::Blue => "text-blue-600",
            MatchColor::Purple => "text-purple-600",
            MatchColor::Yellow => "text-yellow-600",
            MatchColor::Gray => "text-gray-600",
        }
    }
}

/// Label for a 0-100 match score
pub fn get_match_quality(score: u8) -> &'static str {
    match score {
        90.. => "Excellent Match",
        80..=89 => "Great Match",
        70..=79 => "Good Match",
        60..=69 => "Decent Match",
        _ => "Potential Match",
    }
}

/// Colour bucket for a 0-100 match score, same thresholds as [`get_match_quality`]
pub fn get_match_color(score: u8) -> MatchColor {
    match score {
        90.. => MatchColor::Green,
        80..=89 => MatchColor::Blue,
        70..=79 => MatchColor::Purple,
        60..=69 => MatchColor::Yellow,
        _ => MatchColor::Gray,
    }
}

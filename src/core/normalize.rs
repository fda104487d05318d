use std::collections::HashSet;

use crate::models::UserProfile;

/// A profile paired with lowercased interest and trait sets
///
/// Built once per profile per scoring pass so the set comparisons in the
/// sub-scores never re-fold case.
#[derive(Debug, Clone)]
pub struct NormalizedProfile<'a> {
    pub profile: &'a UserProfile,
    pub interests: HashSet<String>,
    pub traits: HashSet<String>,
}

impl<'a> NormalizedProfile<'a> {
    pub fn new(profile: &'a UserProfile) -> Self {
        Self {
            profile,
            interests: lowercase_set(&profile.interests),
            traits: lowercase_set(&profile.traits),
        }
    }
}

/// Lowercase every entry and collapse duplicates
pub fn lowercase_set(items: &[String]) -> HashSet<String> {
    items.iter().map(|item| item.to_lowercase()).collect()
}

/// Entries of `items` (original spelling and order) whose lowercase form is in `other`
pub fn shared_in_order<'a>(items: &'a [String], other: &HashSet<String>) -> Vec<&'a str> {
    items
        .iter()
        .filter(|item| other.contains(&item.to_lowercase()))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    #[test]
    fn test_sets_are_case_insensitive() {
        let mut profile = UserProfile::new("u1", 30, Gender::Female);
        profile.interests = vec!["Music".to_string(), "music".to_string(), "ART".to_string()];

        let normalized = NormalizedProfile::new(&profile);

        assert_eq!(normalized.interests.len(), 2);
        assert!(normalized.interests.contains("music"));
        assert!(normalized.interests.contains("art"));
        assert!(normalized.traits.is_empty());
    }

    #[test]
    fn test_shared_keeps_original_spelling() {
        let mine = vec!["Hiking".to_string(), "Chess".to_string(), "Jazz".to_string()];
        let theirs = lowercase_set(&["jazz".to_string(), "HIKING".to_string()]);

        assert_eq!(shared_in_order(&mine, &theirs), vec!["Hiking", "Jazz"]);
    }
}

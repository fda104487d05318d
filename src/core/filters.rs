use crate::models::UserProfile;

/// `showMeGender` entry that accepts every gender
pub const EVERYONE: &str = "everyone";

/// Check the requester's gender preference against a candidate
///
/// An empty preference list, or one containing "everyone", accepts anyone.
#[inline]
pub fn matches_gender_preference(requester: &UserProfile, candidate: &UserProfile) -> bool {
    let shown = requester.shown_genders();
    if shown.is_empty() || shown.iter().any(|g| g == EVERYONE) {
        return true;
    }

    shown.iter().any(|g| g == candidate.gender.as_str())
}

/// Check the candidate's age against the requester's age range, if any
#[inline]
pub fn matches_age_preference(requester: &UserProfile, candidate: &UserProfile) -> bool {
    requester
        .age_range()
        .map_or(true, |range| range.contains(candidate.age))
}

/// Hard filters applied before a candidate is scored at all
///
/// This covers self-exclusion plus the gender and age preferences.
#[inline]
pub fn passes_hard_filters(requester: &UserProfile, candidate: &UserProfile) -> bool {
    if candidate.id == requester.id {
        return false;
    }

    matches_gender_preference(requester, candidate) && matches_age_preference(requester, candidate)
}

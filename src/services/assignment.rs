//! Reviewer assignment policy.
//!
//! Pure selection logic over a team roster snapshot. The roster is sorted by
//! ascending user_id before any selection, so reviewer choice is
//! deterministic no matter what order the storage layer returned the rows
//! in. Selection is first-eligible-in-roster-order; there is no load
//! balancing.

use crate::models::User;

/// Number of reviewer slots to fill on PR creation.
pub const INITIAL_REVIEWER_SLOTS: usize = 2;

/// Roster order: ascending user_id.
fn ordered(roster: &[User]) -> Vec<&User> {
    let mut members: Vec<&User> = roster.iter().collect();
    members.sort_by(|a, b| a.user_id.cmp(&b.user_id));
    members
}

fn is_eligible(member: &User, author_id: &str, assigned: &[String]) -> bool {
    member.is_active
        && member.user_id != author_id
        && !assigned.iter().any(|r| r == &member.user_id)
}

/// Select up to [`INITIAL_REVIEWER_SLOTS`] reviewers for a new pull request.
///
/// Partial or empty results are valid: a team with fewer than two eligible
/// members simply yields fewer reviewers.
pub fn select_initial_reviewers(author_id: &str, roster: &[User]) -> Vec<String> {
    let mut reviewers: Vec<String> = Vec::with_capacity(INITIAL_REVIEWER_SLOTS);
    for member in ordered(roster) {
        if reviewers.len() == INITIAL_REVIEWER_SLOTS {
            break;
        }
        if is_eligible(member, author_id, &reviewers) {
            reviewers.push(member.user_id.clone());
        }
    }
    reviewers
}

/// Select a replacement for `old_user_id` on an open pull request.
///
/// The replacement must be active, must not be the author, must not already
/// be assigned, and must not be the reviewer being replaced. Returns `None`
/// when no team member qualifies.
pub fn select_replacement(
    author_id: &str,
    assigned: &[String],
    old_user_id: &str,
    roster: &[User],
) -> Option<String> {
    ordered(roster)
        .into_iter()
        .find(|m| m.user_id != old_user_id && is_eligible(m, author_id, assigned))
        .map(|m| m.user_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(user_id: &str, is_active: bool) -> User {
        User {
            user_id: user_id.to_string(),
            username: format!("user-{}", user_id),
            team_name: Some("backend4".to_string()),
            is_active,
        }
    }

    #[test]
    fn test_initial_selection_takes_first_two_in_roster_order() {
        // Deliberately shuffled: order must come from the policy, not the input.
        let roster = vec![
            member("u9", true),
            member("u1", true),
            member("u3", true),
            member("u2", true),
        ];
        let reviewers = select_initial_reviewers("u1", &roster);
        assert_eq!(reviewers, vec!["u2".to_string(), "u3".to_string()]);
    }

    #[test]
    fn test_author_is_never_selected() {
        let roster = vec![member("u1", true), member("u2", true)];
        let reviewers = select_initial_reviewers("u1", &roster);
        assert_eq!(reviewers, vec!["u2".to_string()]);
    }

    #[test]
    fn test_inactive_members_are_skipped() {
        let roster = vec![
            member("u2", false),
            member("u3", true),
            member("u4", true),
            member("u5", true),
        ];
        let reviewers = select_initial_reviewers("u1", &roster);
        assert_eq!(reviewers, vec!["u3".to_string(), "u4".to_string()]);
    }

    #[test]
    fn test_empty_selection_when_no_eligible_members() {
        let roster = vec![member("u1", true), member("u2", false)];
        assert!(select_initial_reviewers("u1", &roster).is_empty());
    }

    #[test]
    fn test_replacement_excludes_old_reviewer_and_assigned() {
        let roster = vec![
            member("u1", true),
            member("u2", true),
            member("u3", true),
            member("u9", true),
        ];
        let assigned = vec!["u3".to_string()];
        let replacement = select_replacement("u1", &assigned, "u2", &roster);
        assert_eq!(replacement, Some("u9".to_string()));
    }

    #[test]
    fn test_no_replacement_candidate() {
        let roster = vec![member("u1", true), member("u2", true), member("u3", false)];
        let assigned: Vec<String> = vec![];
        assert_eq!(select_replacement("u1", &assigned, "u2", &roster), None);
    }
}

use super::types::{User, UserProfile};
use super::update::UserUpdate;

/// Merges a partial update over an existing record.
///
/// Each mutable field takes the incoming value when it is present and not
/// blank, otherwise the existing value is kept. Fields are never cleared.
pub fn merge_patch(existing: &User, patch: &UserUpdate) -> User {
    fn pick(incoming: Option<&String>, current: &str) -> String {
        match incoming {
            Some(value) if !value.trim().is_empty() => value.clone(),
            _ => current.to_string(),
        }
    }

    User {
        id: existing.id,
        username: pick(patch.username.as_ref(), &existing.username),
        email: pick(patch.email.as_ref(), &existing.email),
        password: pick(patch.password.as_ref(), &existing.password),
    }
}

/// Picks one result from an email index query.
///
/// The index is not unique; when several records share an email the one with
/// the lowest id (the oldest) wins. `matches` must hold every page of the
/// query, otherwise the winner depends on where the page boundary fell.
pub fn select_email_match(matches: Vec<UserProfile>) -> Option<UserProfile> {
    matches.into_iter().min_by_key(|profile| profile.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::NewUser;

    fn existing() -> User {
        User::from_new(10, NewUser::new("a", "b", "c"))
    }

    fn profile(id: i64, username: &str) -> UserProfile {
        UserProfile {
            id,
            username: username.to_string(),
            email: "dup@x.com".to_string(),
        }
    }

    #[test]
    fn test_merge_replaces_only_supplied_fields() {
        let merged = merge_patch(&existing(), &UserUpdate::new().with_username("u"));

        assert_eq!(merged.id, 10);
        assert_eq!(merged.username, "u");
        assert_eq!(merged.email, "b");
        assert_eq!(merged.password, "c");
    }

    #[test]
    fn test_merge_ignores_blank_values() {
        let patch = UserUpdate::new().with_username("").with_email("   ");
        let merged = merge_patch(&existing(), &patch);

        assert_eq!(merged, existing());
    }

    #[test]
    fn test_merge_with_empty_patch_is_identity() {
        assert_eq!(merge_patch(&existing(), &UserUpdate::new()), existing());
    }

    #[test]
    fn test_merge_all_fields() {
        let patch = UserUpdate::new()
            .with_username("x")
            .with_email("y")
            .with_password("z");
        let merged = merge_patch(&existing(), &patch);

        assert_eq!(merged, User::from_new(10, NewUser::new("x", "y", "z")));
    }

    #[test]
    fn test_select_email_match_empty() {
        assert_eq!(select_email_match(Vec::new()), None);
    }

    #[test]
    fn test_select_email_match_lowest_id_wins() {
        let picked = select_email_match(vec![profile(30, "late"), profile(20, "early")]);
        assert_eq!(picked, Some(profile(20, "early")));

        let picked = select_email_match(vec![profile(20, "early"), profile(30, "late")]);
        assert_eq!(picked, Some(profile(20, "early")));
    }
}

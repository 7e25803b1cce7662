use std::collections::HashSet;

use super::accommodation::Accommodation;

/// Drop every accommodation whose id is in `conflicting`, keeping the rest in order.
pub fn remove_conflicting(
    candidates: Vec<Accommodation>,
    conflicting: &HashSet<String>,
) -> Vec<Accommodation> {
    if conflicting.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|acc| !conflicting.contains(&acc.id))
        .collect()
}

pub fn ids_of(accommodations: &[Accommodation]) -> Vec<String> {
    accommodations.iter().map(|a| a.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_accommodation;

    fn ids(list: &[Accommodation]) -> Vec<&str> {
        list.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn removes_only_conflicting_and_keeps_order() {
        let candidates = vec![
            make_accommodation("a", "u1"),
            make_accommodation("b", "u1"),
            make_accommodation("c", "u2"),
            make_accommodation("d", "u2"),
        ];
        let conflicting: HashSet<String> = ["b".to_string(), "d".to_string()].into();
        let kept = remove_conflicting(candidates, &conflicting);
        assert_eq!(ids(&kept), vec!["a", "c"]);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let candidates = vec![make_accommodation("a", "u1")];
        let conflicting: HashSet<String> = ["zzz".to_string()].into();
        assert_eq!(ids(&remove_conflicting(candidates, &conflicting)), vec!["a"]);
    }

    #[test]
    fn empty_conflicts_is_identity() {
        let candidates = vec![make_accommodation("a", "u1"), make_accommodation("b", "u1")];
        let kept = remove_conflicting(candidates.clone(), &HashSet::new());
        assert_eq!(kept, candidates);
    }

    #[test]
    fn ids_of_preserves_order() {
        let list = vec![make_accommodation("x", "u"), make_accommodation("y", "u")];
        assert_eq!(ids_of(&list), vec!["x".to_string(), "y".to_string()]);
    }
}

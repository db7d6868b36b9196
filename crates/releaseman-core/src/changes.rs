//! Working tree change tracking.

use std::collections::HashSet;

/// Returns the entries of `all` that are not in `before`, in `all`'s order.
///
/// A file that was already dirty before `prepare` and is still dirty after it
/// was not caused by this run, so it is left out.
#[must_use]
pub fn diff_changes(all: &[String], before: &[String]) -> Vec<String> {
    let before: HashSet<&str> = before.iter().map(String::as_str).collect();
    all.iter()
        .filter(|change| !before.contains(change.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_nothing_before() {
        let all = strings(&["CHANGELOG.md", "version.go"]);
        assert_eq!(diff_changes(&all, &[]), all);
    }

    #[test]
    fn test_excludes_previously_dirty() {
        let all = strings(&["README.md", "CHANGELOG.md", "version.go"]);
        let before = strings(&["README.md"]);
        assert_eq!(
            diff_changes(&all, &before),
            strings(&["CHANGELOG.md", "version.go"])
        );
    }

    #[test]
    fn test_preserves_order_of_all() {
        let all = strings(&["z.txt", "a.txt", "m.txt"]);
        let before = strings(&["a.txt"]);
        assert_eq!(diff_changes(&all, &before), strings(&["z.txt", "m.txt"]));
    }

    #[test]
    fn test_before_only_entries_are_ignored() {
        let all = strings(&["a.txt"]);
        let before = strings(&["gone.txt"]);
        assert_eq!(diff_changes(&all, &before), strings(&["a.txt"]));
    }

    #[test]
    fn test_keeps_duplicates_from_all_only() {
        let all = strings(&["a.txt", "b.txt", "a.txt"]);
        let before = strings(&["b.txt", "b.txt"]);
        assert_eq!(diff_changes(&all, &before), strings(&["a.txt", "a.txt"]));
    }

    #[test]
    fn test_everything_already_dirty() {
        let all = strings(&["a.txt", "b.txt"]);
        assert!(diff_changes(&all, &all).is_empty());
    }
}

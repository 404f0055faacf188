//! Breadcrumb trail of visited directories.

use crate::fs::entry::Entry;

/// Immutable navigation stack.
///
/// Every mutation returns a **new** `NavigationStack`, following the
/// project-wide immutability convention. The stack never holds the same
/// directory twice: pushing a directory that is already present truncates
/// everything after it instead, which is how breadcrumb clicks collapse
/// forward history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStack {
    entries: Vec<Entry>,
}

impl NavigationStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `dir`, or truncates back to it if already present.
    ///
    /// Either way `dir` is the last element of the returned stack.
    #[must_use]
    pub fn push(&self, dir: Entry) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter().position(|e| *e == dir) {
            Some(index) => entries.truncate(index + 1),
            None => entries.push(dir),
        }
        Self { entries }
    }

    /// Removes the last element. Returns the new stack and its new top, or
    /// `None` if the stack is already empty.
    pub fn pop(&self) -> Option<(Self, Option<Entry>)> {
        if self.entries.is_empty() {
            return None;
        }
        let mut entries = self.entries.clone();
        entries.pop();
        let top = entries.last().cloned();
        Some((Self { entries }, top))
    }

    /// Returns an empty stack (the root-list state).
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::new()
    }

    /// The most recently visited directory.
    pub fn top(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// The trail, oldest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn contains(&self, dir: &Entry) -> bool {
        self.entries.contains(dir)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::classify::Classifier;
    use crate::fs::accessor::NodeStat;

    fn dir(path: &str) -> Entry {
        let stat = NodeStat {
            is_dir: true,
            exists: true,
            ..NodeStat::default()
        };
        Entry::from_stat(PathBuf::from(path), stat, Arc::new(Classifier::default()))
    }

    fn paths(stack: &NavigationStack) -> Vec<&str> {
        stack
            .entries()
            .iter()
            .map(|e| e.path().to_str().unwrap())
            .collect()
    }

    #[test]
    fn new_stack_is_empty() {
        let stack = NavigationStack::new();
        assert!(stack.is_empty());
        assert!(stack.top().is_none());
    }

    #[test]
    fn push_appends_in_visitation_order() {
        let stack = NavigationStack::new()
            .push(dir("/a"))
            .push(dir("/a/b"))
            .push(dir("/a/b/c"));

        assert_eq!(paths(&stack), vec!["/a", "/a/b", "/a/b/c"]);
        assert_eq!(stack.top(), Some(&dir("/a/b/c")));
    }

    #[test]
    fn push_does_not_mutate_original() {
        let stack = NavigationStack::new();
        let _pushed = stack.push(dir("/a"));
        assert!(stack.is_empty());
    }

    #[test]
    fn pushing_the_top_twice_keeps_the_length() {
        let once = NavigationStack::new().push(dir("/a")).push(dir("/a/b"));
        let twice = once.push(dir("/a/b"));

        assert_eq!(once.len(), twice.len());
        assert_eq!(once, twice);
    }

    #[test]
    fn pushing_an_ancestor_truncates_forward_history() {
        let stack = NavigationStack::new()
            .push(dir("/a"))
            .push(dir("/a/b"))
            .push(dir("/a/b/c"))
            .push(dir("/a"));

        assert_eq!(paths(&stack), vec!["/a"]);
        assert_eq!(stack.top(), Some(&dir("/a")));
    }

    #[test]
    fn pushed_directory_is_always_the_top() {
        let base = NavigationStack::new()
            .push(dir("/x"))
            .push(dir("/y"))
            .push(dir("/z"));
        for target in ["/x", "/y", "/z", "/new"] {
            let stack = base.push(dir(target));
            assert_eq!(stack.top(), Some(&dir(target)), "{target}");
        }
    }

    #[test]
    fn pop_returns_new_top() {
        let stack = NavigationStack::new().push(dir("/a")).push(dir("/a/b"));

        let (stack, top) = stack.pop().unwrap();
        assert_eq!(top, Some(dir("/a")));
        assert_eq!(stack.len(), 1);

        let (stack, top) = stack.pop().unwrap();
        assert_eq!(top, None);
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_on_empty_returns_none() {
        assert!(NavigationStack::new().pop().is_none());
    }

    #[test]
    fn clear_resets_to_root_state() {
        let stack = NavigationStack::new().push(dir("/a")).push(dir("/b"));
        assert!(stack.clear().is_empty());
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn contains_uses_path_identity() {
        let stack = NavigationStack::new().push(dir("/a"));
        assert!(stack.contains(&dir("/a")));
        assert!(!stack.contains(&dir("/b")));
    }
}

//! Outbound request header sets.

/// Ordered, immutable collection of (name, value) header pairs.
///
/// [`add`](HeaderSet::add) returns a new set and leaves the receiver
/// untouched, so a base set can be branched freely. Iteration yields the most
/// recently added pair first; the transport preserves that order on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    /// The set with no headers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A new set with `(name, value)` added in front of the existing pairs.
    pub fn add(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = self.entries.clone();
        entries.push((name.into(), value.into()));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in emission order, most recently added first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .rev()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let set = HeaderSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn test_add_leaves_receiver_unchanged() {
        let base = HeaderSet::empty().add("Accept", "application/json");
        let extended = base.add("Authorization", "Bearer t0k3n");

        assert_eq!(base.len(), 1);
        assert_eq!(extended.len(), 2);
    }

    #[test]
    fn test_iteration_is_newest_first() {
        let set = HeaderSet::empty()
            .add("X-First", "1")
            .add("X-Second", "2")
            .add("X-Third", "3");

        let names: Vec<&str> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["X-Third", "X-Second", "X-First"]);
    }

    #[test]
    fn test_branched_sets_are_independent() {
        let base = HeaderSet::empty().add("Accept", "text/plain");
        let a = base.add("X-Variant", "a");
        let b = base.add("X-Variant", "b");

        assert_eq!(a.iter().next(), Some(("X-Variant", "a")));
        assert_eq!(b.iter().next(), Some(("X-Variant", "b")));
    }
}

use convert_case::{Case, Casing};

/// A node name, shown by tree dumps and diagnostics.
///
/// Names are lowercase ASCII alphanumerics plus underscores. They are
/// munged into that shape on construction rather than validated, so every
/// node always has a printable name regardless of what it was derived
/// from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName {
    /// The munged name.
    name: String,
}

impl NodeName {
    /// Munge a string into a node name: snake case it, then drop any
    /// characters outside the name charset.
    pub fn convert(name: &str) -> Self {
        let snake = name.to_case(Case::Snake);
        Self {
            name: snake
                .chars()
                .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
                .collect(),
        }
    }

    /// Derive a node name from a Rust type path, the default for widget
    /// nodes: generic arguments are cut, the last path segment is kept,
    /// and the result is munged.
    pub fn from_type(path: &str) -> Self {
        let base = match path.find('<') {
            Some(idx) => &path[..idx],
            None => path,
        };
        let short = base.rsplit("::").next().unwrap_or(base);
        Self::convert(short)
    }
}

impl std::fmt::Display for NodeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq<&str> for NodeName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

/// The lifecycle of a node in the scene arena.
///
/// Nodes are `Created` detached, become `Ready` once when first attached
/// under a ready ancestor, are flagged `Destroying` by a deferred
/// [`free`](crate::core::Scene::free), and read `Destroyed` after the
/// batch-free sweep tears them down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed but not yet attached to a ready tree.
    Created,
    /// Attached and live.
    Ready,
    /// Flagged for teardown; still in the tree until the batch-free sweep.
    Destroying,
    /// Torn down and removed from the arena.
    Destroyed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_munged_not_validated() {
        assert_eq!(NodeName::convert("Foo"), "foo");
        assert_eq!(NodeName::convert("FlexRow"), "flex_row");
        assert_eq!(NodeName::convert("FlexRow Demo"), "flex_row_demo");
        assert_eq!(NodeName::convert("wat?!"), "wat");
    }

    #[test]
    fn type_paths_reduce_to_the_last_segment() {
        assert_eq!(NodeName::from_type("easel::widgets::flex::Flex"), "flex");
        assert_eq!(NodeName::from_type("demo::Panel<demo::Item>"), "panel");
        assert_eq!(NodeName::from_type("Probe"), "probe");
    }
}

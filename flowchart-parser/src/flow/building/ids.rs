//! Node identifiers
//!
//! Top-level nodes are numbered from 1 in discovery order. Nodes inside a nested group are
//! numbered under the node the group hangs from, so the second step under node 2 is `2.2`.
//! Ids are kept as a path of ordinals and only turned into text by the formats.

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Vec<usize>);

impl NodeId {
    /// A node on the main line
    pub fn top(ordinal: usize) -> Self {
        NodeId(vec![ordinal])
    }

    /// The `ordinal`-th node scoped under this one
    pub fn child(&self, ordinal: usize) -> Self {
        let mut path = self.0.clone();
        path.push(ordinal);
        NodeId(path)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ordinal) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", ordinal)?;
        }
        Ok(())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(NodeId::top(3).to_string(), "3");
        assert_eq!(NodeId::top(2).child(1).child(4).to_string(), "2.1.4");
    }

    #[test]
    fn test_ordering_is_numeric_not_textual() {
        assert!(NodeId::top(2) < NodeId::top(10));
        assert!(NodeId::top(2) < NodeId::top(2).child(1));
        assert!(NodeId::top(2).child(9) < NodeId::top(2).child(10));
        assert!(NodeId::top(2).child(10) < NodeId::top(3));
    }
}

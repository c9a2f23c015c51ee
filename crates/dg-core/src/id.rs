use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner shared by node and edge identifiers.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Spur);

        impl $name {
            /// Intern a string as an identifier, or return the existing one.
            pub fn intern(s: &str) -> Self {
                $name(INTERNER.get_or_intern(s))
            }

            /// Resolve back to a string slice.
            pub fn as_str(&self) -> &str {
                INTERNER.resolve(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok($name::intern(&s))
            }
        }
    };
}

interned_id!(
    /// Identifier of a node on the canvas. 4 bytes, `Copy`, O(1) `Eq`/`Hash`.
    NodeId
);

interned_id!(
    /// Identifier of an edge (connector) between two nodes.
    EdgeId
);

/// Monotonic identifier generator owned by the graph store.
///
/// Produces `node-N` / `edge-N`. The counter never goes backwards, so ids
/// handed out before an undo are never reissued afterwards.
#[derive(Debug, Clone, Default)]
pub struct IdGen {
    next: u64,
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    /// Next node id for which `is_taken` returns false.
    pub fn node_id(&mut self, is_taken: impl Fn(NodeId) -> bool) -> NodeId {
        loop {
            let id = NodeId::intern(&format!("node-{}", self.bump()));
            if !is_taken(id) {
                return id;
            }
        }
    }

    /// Next edge id for which `is_taken` returns false.
    pub fn edge_id(&mut self, is_taken: impl Fn(EdgeId) -> bool) -> EdgeId {
        loop {
            let id = EdgeId::intern(&format!("edge-{}", self.bump()));
            if !is_taken(id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = NodeId::intern("node-a");
        let b = NodeId::intern("node-a");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "node-a");
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut ids = IdGen::new();
        let a = ids.node_id(|_| false);
        let b = ids.node_id(|_| false);
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "node-1");
        assert_eq!(b.as_str(), "node-2");
    }

    #[test]
    fn generator_skips_taken_ids() {
        let mut ids = IdGen::new();
        let taken = EdgeId::intern("edge-1");
        let id = ids.edge_id(|candidate| candidate == taken);
        assert_eq!(id.as_str(), "edge-2");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = NodeId::intern("node-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"node-42\"");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

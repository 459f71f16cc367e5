use serde::{Deserialize, Serialize};

/// One node of a roadmap returned by `/api/tree-data`. Nesting depth is
/// whatever the model produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadmapNode {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<RoadmapNode>,
}

impl RoadmapNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<RoadmapNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Total node count, walked without recursion.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

// The derived drop would recurse once per level.
impl Drop for RoadmapNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

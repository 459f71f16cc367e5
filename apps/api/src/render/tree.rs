//! Roadmap tree layout.
//!
//! Pre-order walk with an explicit stack so arbitrarily deep roadmaps cannot
//! exhaust the call stack. Each line carries the connector prefix that
//! reproduces the nesting:
//!
//! ```text
//! Web Development
//! ├── Frontend
//! │   └── HTML
//! └── Backend
//! ```

use std::fmt;

use crate::models::roadmap::RoadmapNode;

#[derive(Debug, Clone, PartialEq)]
pub struct TreeLine {
    pub depth: usize,
    pub prefix: String,
    pub name: String,
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.name)
    }
}

struct Pending<'a> {
    node: &'a RoadmapNode,
    depth: usize,
    /// Indentation inherited from ancestors.
    indent: String,
    is_last: bool,
}

pub fn layout(root: &RoadmapNode) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    let mut stack = vec![Pending {
        node: root,
        depth: 0,
        indent: String::new(),
        is_last: true,
    }];

    while let Some(Pending {
        node,
        depth,
        indent,
        is_last,
    }) = stack.pop()
    {
        let (prefix, child_indent) = if depth == 0 {
            (String::new(), String::new())
        } else if is_last {
            (format!("{indent}└── "), format!("{indent}    "))
        } else {
            (format!("{indent}├── "), format!("{indent}│   "))
        };

        lines.push(TreeLine {
            depth,
            prefix,
            name: node.name.clone(),
        });

        // Reverse so the first child is popped first.
        let last = node.children.len().saturating_sub(1);
        for (i, child) in node.children.iter().enumerate().rev() {
            stack.push(Pending {
                node: child,
                depth: depth + 1,
                indent: child_indent.clone(),
                is_last: i == last,
            });
        }
    }

    lines
}

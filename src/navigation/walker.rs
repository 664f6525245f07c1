use serde::Serialize;
use ts_rs::TS;
use utoipa::ToSchema;

use super::{
    ConfigIssue, ExpansionState, IconRef, IconRegistry, NavError, NodeKind, Role, RouteMap,
    RouteNode, classify, is_visible, node::join_id,
};

/// RenderEntry
///
/// One visible line of the menu, in display order. Children of an expanded entry
/// follow it directly with `depth + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RenderEntry {
    /// Key trail from the root, e.g. `reports/sales`. Used to address the entry
    /// when it is clicked.
    pub id: String,
    pub key: String,
    pub label: String,
    pub icon: Option<IconRef>,
    pub kind: NodeKind,
    pub has_children: bool,
    pub expanded: bool,
    pub depth: usize,
}

/// Menu
///
/// A fully walked menu plus the configuration issues met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    pub entries: Vec<RenderEntry>,
    pub issues: Vec<ConfigIssue>,
}

/// Walk
///
/// Lazy pre-order traversal of a route map for one viewer. A fresh `Walk` (or a
/// clone taken before iterating) replays the same sequence.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    role: &'a Role,
    expansion: &'a ExpansionState,
    icons: &'a IconRegistry,
    stack: Vec<Level<'a>>,
}

#[derive(Debug, Clone)]
struct Level<'a> {
    prefix: Option<String>,
    nodes: std::slice::Iter<'a, (String, RouteNode)>,
}

/// walk
///
/// Starts a traversal of `nodes` for `role`. Hidden nodes are skipped together with
/// their whole subtree, collapsed composites contribute only themselves, and a
/// misconfigured node the viewer can see yields an `Err` in its place without
/// ending the walk.
pub fn walk<'a>(
    nodes: &'a RouteMap,
    role: &'a Role,
    expansion: &'a ExpansionState,
    icons: &'a IconRegistry,
) -> Walk<'a> {
    Walk {
        role,
        expansion,
        icons,
        stack: vec![Level {
            prefix: None,
            nodes: nodes.iter(),
        }],
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<RenderEntry, NavError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let level = self.stack.last_mut()?;
            let Some((key, node)) = level.nodes.next() else {
                self.stack.pop();
                continue;
            };
            let id = join_id(level.prefix.as_deref(), key);

            if !is_visible(node, self.role) {
                continue;
            }
            if let Some(defect) = node.defect() {
                return Some(Err(NavError::Misconfigured { id, defect }));
            }

            let kind = classify(node);
            let has_children = kind == NodeKind::Composite;
            let expanded = self.expansion.is_expanded(key);
            let entry = RenderEntry {
                id: id.clone(),
                key: key.clone(),
                label: label_for(key),
                icon: node
                    .icon
                    .as_deref()
                    .and_then(|name| self.icons.resolve(name))
                    .cloned(),
                kind,
                has_children,
                expanded,
                depth,
            };

            if has_children && expanded {
                if let Some(children) = &node.children {
                    self.stack.push(Level {
                        prefix: Some(id),
                        nodes: children.iter(),
                    });
                }
            }
            return Some(Ok(entry));
        }
    }
}

/// render
///
/// Walks the whole menu, logging and collecting configuration errors instead of
/// failing: the worst outcome is a shorter menu.
pub fn render(
    nodes: &RouteMap,
    role: &Role,
    expansion: &ExpansionState,
    icons: &IconRegistry,
) -> Menu {
    let mut menu = Menu::default();
    for item in walk(nodes, role, expansion, icons) {
        match item {
            Ok(entry) => menu.entries.push(entry),
            Err(NavError::Misconfigured { id, defect }) => {
                tracing::warn!(route = %id, %defect, "skipping misconfigured menu entry");
                menu.issues.push(ConfigIssue { id, defect });
            }
            Err(e) => tracing::warn!(error = %e, "skipping menu entry"),
        }
    }
    menu
}

/// Display label for a route key: the key with its first character upper-cased.
pub fn label_for(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

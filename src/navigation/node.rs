use std::{fmt, path::Path};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
};

use super::{NavError, NodeKind, Role, classify, is_visible};

/// RouteNode
///
/// One entry of the static navigation configuration. The same file is read by the
/// backend role gate (`guard::require_role`) and by the menu walker, so both sides
/// always agree on the `roles` of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    /// Internal navigation target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// External navigation target, only meaningful when `external` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Symbolic icon name, resolved against the `IconRegistry` at render time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Roles allowed to see the node. Absent is treated exactly like an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    #[serde(default)]
    pub frontend_visible: bool,
    #[serde(default)]
    pub external: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<RouteMap>,
}

impl RouteNode {
    /// A node is composite only when it carries at least one child.
    pub fn is_composite(&self) -> bool {
        self.children.as_ref().is_some_and(|children| !children.is_empty())
    }

    /// Iterates the roles of the node; an absent list yields nothing.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter().flatten()
    }

    /// Configuration defect that makes the node unrenderable, if any.
    ///
    /// Hidden nodes are never reported: they cannot reach the menu.
    pub fn defect(&self) -> Option<Defect> {
        if !self.frontend_visible {
            return None;
        }
        if self.external {
            return self.url.is_none().then_some(Defect::ExternalWithoutUrl);
        }
        if !self.is_composite() && self.path.is_none() && self.url.is_none() {
            return Some(Defect::MissingTarget);
        }
        None
    }
}

/// Defect
///
/// The ways a frontend-visible node can be misconfigured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ts_rs::TS, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Defect {
    /// A non-external leaf without `path` or `url`.
    MissingTarget,
    /// An external node without `url`.
    ExternalWithoutUrl,
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Defect::MissingTarget => f.write_str("leaf has neither `path` nor `url`"),
            Defect::ExternalWithoutUrl => f.write_str("external link has no `url`"),
        }
    }
}

/// RouteMap
///
/// Child mapping of a node. Keys are unique within one mapping and the order of the
/// source document is the display order, so the map is kept as an ordered list of
/// entries rather than a hash map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMap(Vec<(String, RouteNode)>);

impl RouteMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&RouteNode> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, RouteNode)> {
        self.0.iter()
    }

    /// Depth-first, pre-order search for the first node named `key`.
    pub fn find(&self, key: &str) -> Option<&RouteNode> {
        self.iter().find_map(|(k, node)| {
            if k == key {
                Some(node)
            } else {
                node.children.as_ref().and_then(|children| children.find(key))
            }
        })
    }
}

impl<'a> IntoIterator for &'a RouteMap {
    type Item = &'a (String, RouteNode);
    type IntoIter = std::slice::Iter<'a, (String, RouteNode)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for RouteMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, node) in &self.0 {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RouteMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RouteMapVisitor;

        impl<'de> Visitor<'de> for RouteMapVisitor {
            type Value = RouteMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of route keys to route nodes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RouteMap, A::Error> {
                let mut routes = RouteMap::new();
                while let Some((key, node)) = access.next_entry::<String, RouteNode>()? {
                    if routes.get(&key).is_some() {
                        return Err(de::Error::custom(format_args!("duplicate route key `{key}`")));
                    }
                    routes.0.push((key, node));
                }
                Ok(routes)
            }
        }

        deserializer.deserialize_map(RouteMapVisitor)
    }
}

/// ConfigIssue
///
/// A defect found while auditing the whole tree, independent of any viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ts_rs::TS, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ConfigIssue {
    pub id: String,
    pub defect: Defect,
}

/// RouteTree
///
/// The loaded navigation configuration (`{ "routes": { ... } }`). Immutable once
/// built; only the viewer role and the expansion state vary at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteTree {
    pub routes: RouteMap,
}

impl RouteTree {
    pub fn from_json(source: &str) -> Result<Self, NavError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NavError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Looks a node up by key anywhere in the tree (first match, pre-order).
    pub fn find(&self, key: &str) -> Option<&RouteNode> {
        self.routes.find(key)
    }

    /// Resolves a `/`-joined key trail such as `reports/sales`.
    pub fn resolve(&self, id: &str) -> Option<&RouteNode> {
        let mut keys = id.split('/');
        let mut node = self.routes.get(keys.next()?)?;
        for key in keys {
            node = node.children.as_ref()?.get(key)?;
        }
        Some(node)
    }

    /// Like `resolve`, but the trail must be one the menu can render for `role`:
    /// every node visible, every ancestor a composite. Children of a hidden parent
    /// or of an external link are never reachable.
    pub fn resolve_visible(&self, id: &str, role: &Role) -> Option<&RouteNode> {
        let mut keys = id.split('/');
        let mut node = self.routes.get(keys.next()?)?;
        for key in keys {
            if !is_visible(node, role) || classify(node) != NodeKind::Composite {
                return None;
            }
            node = node.children.as_ref()?.get(key)?;
        }
        is_visible(node, role).then_some(node)
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        fn count(map: &RouteMap) -> usize {
            map.iter()
                .map(|(_, node)| 1 + node.children.as_ref().map_or(0, count))
                .sum()
        }
        count(&self.routes)
    }

    /// Lists every misconfigured node regardless of roles or expansion.
    pub fn audit(&self) -> Vec<ConfigIssue> {
        fn visit(map: &RouteMap, prefix: Option<&str>, issues: &mut Vec<ConfigIssue>) {
            for (key, node) in map {
                let id = join_id(prefix, key);
                if let Some(defect) = node.defect() {
                    issues.push(ConfigIssue { id: id.clone(), defect });
                }
                if let Some(children) = &node.children {
                    visit(children, Some(&id), issues);
                }
            }
        }

        let mut issues = Vec::new();
        visit(&self.routes, None, &mut issues);
        issues
    }
}

/// Builds the id of a child from its parent's id.
pub(crate) fn join_id(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}/{key}"),
        None => key.to_string(),
    }
}

use std::collections::HashMap;

use serde::Serialize;
use ts_rs::TS;
use utoipa::ToSchema;

/// IconRef
///
/// A renderable icon: the symbolic name used in the route configuration and the
/// glyph the front end draws for it (a Material Symbols ligature).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS, ToSchema)]
#[ts(export)]
pub struct IconRef {
    pub name: String,
    pub glyph: String,
}

// Icon names as they appear in route configurations, with their glyph.
const BUILTIN_ICONS: &[(&str, &str)] = &[
    ("Home", "home"),
    ("Dashboard", "dashboard"),
    ("Inventory", "inventory_2"),
    ("List", "list"),
    ("Assessment", "assessment"),
    ("BarChart", "bar_chart"),
    ("People", "group"),
    ("Person", "person"),
    ("Settings", "settings"),
    ("AdminPanelSettings", "admin_panel_settings"),
    ("Description", "description"),
    ("Help", "help"),
    ("Info", "info"),
    ("OpenInNew", "open_in_new"),
    ("Login", "login"),
    ("Logout", "logout"),
];

/// IconRegistry
///
/// Explicit icon lookup table, built once at startup. Lookups never fail: a name
/// that was not registered resolves to `None`, which callers render as "no icon".
#[derive(Debug, Clone, Default)]
pub struct IconRegistry {
    icons: HashMap<String, IconRef>,
}

impl IconRegistry {
    /// An empty registry; every lookup resolves to `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry pre-populated with the icons the shipped configuration uses.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, glyph) in BUILTIN_ICONS {
            registry.register(*name, *glyph);
        }
        registry
    }

    /// Adds or replaces the icon registered under `name`.
    pub fn register(&mut self, name: impl Into<String>, glyph: impl Into<String>) -> &mut Self {
        let name = name.into();
        let icon = IconRef {
            name: name.clone(),
            glyph: glyph.into(),
        };
        self.icons.insert(name, icon);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&IconRef> {
        let icon = self.icons.get(name);
        if icon.is_none() {
            tracing::debug!(icon = name, "icon not registered, rendering without it");
        }
        icon
    }
}

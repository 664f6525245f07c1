//! Role-filtered navigation menu.
//!
//! The static route tree (`node`) is walked per viewer (`walker`), each node being
//! checked by `visibility::is_visible`. Expansion of composite entries lives in
//! `expansion`, clicks go through `dispatch`, and `shell` bundles the per-view
//! state a front end holds on to.

pub mod dispatch;
pub mod expansion;
pub mod icons;
pub mod node;
pub mod role;
pub mod shell;
pub mod visibility;
pub mod walker;

use std::sync::Arc;

use thiserror::Error;

pub use dispatch::{BrowsingContext, DispatchAction, Navigator, NodeKind, classify, dispatch};
pub use expansion::ExpansionState;
pub use icons::{IconRef, IconRegistry};
pub use node::{ConfigIssue, Defect, RouteMap, RouteNode, RouteTree};
pub use role::Role;
pub use shell::{HeaderModel, IdentitySession, NavigationShell, UserInfo};
pub use visibility::is_visible;
pub use walker::{Menu, RenderEntry, Walk, render, walk};

/// NavError
///
/// Everything that can go wrong while loading or using the route tree. None of
/// these abort a menu render; the walker turns node-level errors into issues.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("failed to read route configuration `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid route configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("route `{id}` is misconfigured: {defect}")]
    Misconfigured { id: String, defect: Defect },

    #[error("no route `{0}`")]
    UnknownRoute(String),
}

/// Navigation
///
/// The immutable, startup-built half of the menu: the route tree plus the icon
/// registry it is rendered against.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    pub routes: RouteTree,
    pub icons: IconRegistry,
}

impl Navigation {
    pub fn new(routes: RouteTree, icons: IconRegistry) -> Self {
        Self { routes, icons }
    }
}

/// NavigationState
///
/// Shared, read-only handle placed in the application state.
pub type NavigationState = Arc<Navigation>;

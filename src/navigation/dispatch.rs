use serde::Serialize;
use ts_rs::TS;
use utoipa::ToSchema;

use super::{Defect, ExpansionState, NavError, RouteNode};

/// NodeKind
///
/// Static classification of a node, fixed by its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum NodeKind {
    /// Navigates inside the application through the router.
    LeafInternal,
    /// Opens its `url` in a new browsing context.
    LeafExternal,
    /// Expands or collapses its children; never navigates.
    Composite,
}

/// External links win over children: an external node is always a link.
pub fn classify(node: &RouteNode) -> NodeKind {
    if node.external {
        NodeKind::LeafExternal
    } else if node.is_composite() {
        NodeKind::Composite
    } else {
        NodeKind::LeafInternal
    }
}

/// Navigator
///
/// The application router. Receives internal paths only.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// BrowsingContext
///
/// Opens a target in a new, independent browsing context (a new tab), leaving the
/// current one where it is.
pub trait BrowsingContext {
    fn open_external(&self, url: &str);
}

/// DispatchAction
///
/// The effect of clicking an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS, ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum DispatchAction {
    Navigate { path: String },
    OpenExternal { url: String },
    Toggled { key: String, expanded: bool },
}

impl DispatchAction {
    /// Hands the action to the collaborator that carries it out. `Toggled` has
    /// already been applied to the expansion state by `dispatch`.
    pub fn perform(&self, router: &dyn Navigator, browser: &dyn BrowsingContext) {
        match self {
            DispatchAction::Navigate { path } => router.navigate(path),
            DispatchAction::OpenExternal { url } => browser.open_external(url),
            DispatchAction::Toggled { .. } => {}
        }
    }
}

/// dispatch
///
/// Resolves a click on the node stored under `key`. Composite nodes toggle their
/// entry in `expansion`; leaves produce a navigation for the caller to perform.
/// An internal leaf without `path` falls back to its `url`.
pub fn dispatch(
    key: &str,
    node: &RouteNode,
    expansion: &mut ExpansionState,
) -> Result<DispatchAction, NavError> {
    match classify(node) {
        NodeKind::LeafExternal => node
            .url
            .clone()
            .map(|url| DispatchAction::OpenExternal { url })
            .ok_or_else(|| NavError::Misconfigured {
                id: key.to_string(),
                defect: Defect::ExternalWithoutUrl,
            }),
        NodeKind::Composite => Ok(DispatchAction::Toggled {
            key: key.to_string(),
            expanded: expansion.toggle(key),
        }),
        NodeKind::LeafInternal => node
            .path
            .as_ref()
            .or(node.url.as_ref())
            .cloned()
            .map(|path| DispatchAction::Navigate { path })
            .ok_or_else(|| NavError::Misconfigured {
                id: key.to_string(),
                defect: Defect::MissingTarget,
            }),
    }
}

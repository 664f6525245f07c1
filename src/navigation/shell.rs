use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use super::{
    BrowsingContext, DispatchAction, ExpansionState, Menu, NavError, Navigation, Navigator, Role,
    dispatch, render,
};

pub const LOGIN_PATH: &str = "/login";
pub const PROFILE_PATH: &str = "/profile";

/// UserInfo
///
/// Display-only profile of the signed-in viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
}

/// IdentitySession
///
/// The authentication side of the shell. The menu only reads the role; logging
/// out is the single place it writes back.
pub trait IdentitySession {
    fn role(&self) -> Role;
    fn user_info(&self) -> Option<UserInfo>;
    fn set_role(&mut self, role: Role);
    /// Drops the stored session token.
    fn clear_token(&mut self);
}

/// HeaderModel
///
/// Right-hand side of the top bar: a login button for `unlogged` viewers, the
/// profile menu for everyone else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS, ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum HeaderModel {
    Login {
        path: String,
    },
    Profile {
        initial: String,
        name: String,
        email: String,
        #[serde(rename = "profilePath")]
        profile_path: String,
    },
}

impl HeaderModel {
    pub fn for_viewer(role: &Role, user: Option<&UserInfo>) -> Self {
        match user {
            Some(user) if !role.is_unlogged() => HeaderModel::Profile {
                initial: avatar_initial(user),
                name: user.name.clone(),
                email: user.email.clone(),
                profile_path: PROFILE_PATH.to_string(),
            },
            _ => HeaderModel::Login {
                path: LOGIN_PATH.to_string(),
            },
        }
    }
}

// First letter of the name, upper-cased; the email stands in for an empty name.
fn avatar_initial(user: &UserInfo) -> String {
    user.name
        .chars()
        .chain(user.email.chars())
        .find(|c| !c.is_whitespace())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// NavigationShell
///
/// Per-view state of the admin shell: menu expansion, sidebar width and the
/// profile menu. The owning view keeps it and passes it around by reference;
/// every change goes through one of the methods below.
#[derive(Debug, Clone, Default)]
pub struct NavigationShell {
    expansion: ExpansionState,
    sidebar_collapsed: bool,
    profile_menu_open: bool,
}

impl NavigationShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// The menu as `role` currently sees it.
    pub fn menu(&self, navigation: &Navigation, role: &Role) -> Menu {
        render(&navigation.routes.routes, role, &self.expansion, &navigation.icons)
    }

    pub fn toggle(&mut self, key: &str) -> bool {
        self.expansion.toggle(key)
    }

    /// Handles a click on the entry `id`. The entry must be reachable by `role`
    /// through visible ancestors.
    pub fn click(
        &mut self,
        navigation: &Navigation,
        role: &Role,
        id: &str,
        router: &dyn Navigator,
        browser: &dyn BrowsingContext,
    ) -> Result<DispatchAction, NavError> {
        let node = navigation
            .routes
            .resolve_visible(id, role)
            .ok_or_else(|| NavError::UnknownRoute(id.to_string()))?;
        let key = id.rsplit('/').next().unwrap_or(id);
        let action = dispatch(key, node, &mut self.expansion)?;
        action.perform(router, browser);
        Ok(action)
    }

    /// Collapses or widens the sidebar, returning the new collapsed flag.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }

    /// A collapsed sidebar shows icons only.
    pub fn show_labels(&self) -> bool {
        !self.sidebar_collapsed
    }

    pub fn open_profile_menu(&mut self) {
        self.profile_menu_open = true;
    }

    pub fn close_profile_menu(&mut self) {
        self.profile_menu_open = false;
    }

    pub fn profile_menu_open(&self) -> bool {
        self.profile_menu_open
    }

    pub fn header(&self, identity: &dyn IdentitySession) -> HeaderModel {
        HeaderModel::for_viewer(&identity.role(), identity.user_info().as_ref())
    }

    /// Ends the session: token gone, role back to `unlogged`, router sent to the
    /// login page.
    pub fn logout(&mut self, identity: &mut dyn IdentitySession, router: &dyn Navigator) {
        identity.clear_token();
        identity.set_role(Role::UNLOGGED);
        router.navigate(LOGIN_PATH);
        self.close_profile_menu();
        tracing::info!("viewer logged out");
    }
}

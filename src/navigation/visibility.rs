use super::{Role, RouteNode};

/// is_visible
///
/// Decides whether `node` may appear in the menu of a viewer holding `role`.
/// The rules are applied in order and the first match wins:
///
/// 1. not `frontend_visible` → hidden, whatever else is set;
/// 2. `external` → shown to everyone, including `unlogged`;
/// 3. `admin` → shown;
/// 4. `role` listed in `roles` → shown;
/// 5. otherwise hidden. An absent `roles` list is an empty one.
///
/// Only the client-side menu uses this; it is not a security boundary; the API
/// enforces its own gate in `guard::require_role`.
pub fn is_visible(node: &RouteNode, role: &Role) -> bool {
    if !node.frontend_visible {
        return false;
    }
    if node.external || role.is_admin() {
        return true;
    }
    node.roles().any(|allowed| allowed == role)
}

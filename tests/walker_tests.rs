use admin_shell::navigation::{
    ConfigIssue, Defect, ExpansionState, IconRegistry, NavError, NodeKind, Role, RouteTree,
    render, walk,
};

// --- Fixtures ---

fn reports_tree() -> RouteTree {
    RouteTree::from_json(
        r#"{
            "routes": {
                "reports": {
                    "roles": ["viewer", "admin"],
                    "frontendVisible": true,
                    "icon": "Assessment",
                    "children": {
                        "sales": {
                            "roles": ["admin"],
                            "frontendVisible": true,
                            "path": "/reports/sales"
                        }
                    }
                }
            }
        }"#,
    )
    .expect("valid tree")
}

fn shop_tree() -> RouteTree {
    RouteTree::from_json(
        r#"{
            "routes": {
                "home": { "path": "/", "roles": ["viewer"], "frontendVisible": true, "icon": "Home" },
                "admin": {
                    "roles": ["admin"],
                    "frontendVisible": true,
                    "children": {
                        "audit": { "path": "/admin/audit", "roles": ["viewer"], "frontendVisible": true }
                    }
                },
                "catalog": {
                    "roles": ["viewer"],
                    "frontendVisible": true,
                    "children": {
                        "books": {
                            "roles": ["viewer"],
                            "frontendVisible": true,
                            "children": {
                                "fiction": { "path": "/catalog/books/fiction", "roles": ["viewer"], "frontendVisible": true }
                            }
                        },
                        "music": { "path": "/catalog/music", "roles": ["viewer"], "frontendVisible": true }
                    }
                },
                "docs": { "url": "https://docs.example.com", "external": true, "frontendVisible": true, "icon": "NoSuchIcon" }
            }
        }"#,
    )
    .expect("valid tree")
}

fn ids(tree: &RouteTree, role: &Role, expansion: &ExpansionState) -> Vec<String> {
    render(&tree.routes, role, expansion, &IconRegistry::builtin())
        .entries
        .into_iter()
        .map(|entry| entry.id)
        .collect()
}

// --- Scenarios ---

#[test]
fn test_viewer_never_sees_admin_only_child() {
    let tree = reports_tree();
    let viewer = Role::from("viewer");

    assert_eq!(ids(&tree, &viewer, &ExpansionState::new()), vec!["reports"]);

    let expanded = ExpansionState::from_iter(["reports"]);
    assert_eq!(ids(&tree, &viewer, &expanded), vec!["reports"]);
}

#[test]
fn test_admin_sees_expanded_children() {
    let tree = reports_tree();
    let expanded = ExpansionState::from_iter(["reports"]);

    let menu = render(&tree.routes, &Role::ADMIN, &expanded, &IconRegistry::builtin());
    assert_eq!(menu.entries.len(), 2);
    assert!(menu.issues.is_empty());

    let reports = &menu.entries[0];
    assert_eq!(reports.label, "Reports");
    assert_eq!(reports.kind, NodeKind::Composite);
    assert!(reports.has_children);
    assert!(reports.expanded);
    assert_eq!(reports.depth, 0);
    assert_eq!(reports.icon.as_ref().map(|icon| icon.glyph.as_str()), Some("assessment"));

    let sales = &menu.entries[1];
    assert_eq!(sales.id, "reports/sales");
    assert_eq!(sales.label, "Sales");
    assert_eq!(sales.kind, NodeKind::LeafInternal);
    assert!(!sales.has_children);
    assert_eq!(sales.depth, 1);
    assert!(sales.icon.is_none());
}

#[test]
fn test_collapsed_composite_yields_only_itself() {
    let tree = reports_tree();
    let menu = render(&tree.routes, &Role::ADMIN, &ExpansionState::new(), &IconRegistry::builtin());
    assert_eq!(menu.entries.len(), 1);
    assert!(!menu.entries[0].expanded);
}

#[test]
fn test_hidden_parent_hides_visible_children() {
    // `admin/audit` is open to viewers, but its parent is not.
    let tree = shop_tree();
    let expanded = ExpansionState::from_iter(["admin"]);
    let seen = ids(&tree, &Role::from("viewer"), &expanded);
    assert!(!seen.iter().any(|id| id.starts_with("admin")));
}

#[test]
fn test_nested_expansion_and_display_order() {
    let tree = shop_tree();
    let viewer = Role::from("viewer");

    assert_eq!(
        ids(&tree, &viewer, &ExpansionState::new()),
        vec!["home", "catalog", "docs"]
    );

    // Expanding only the inner branch shows nothing until the outer one is open.
    let inner_only = ExpansionState::from_iter(["books"]);
    assert_eq!(ids(&tree, &viewer, &inner_only), vec!["home", "catalog", "docs"]);

    let both = ExpansionState::from_iter(["catalog", "books"]);
    assert_eq!(
        ids(&tree, &viewer, &both),
        vec![
            "home",
            "catalog",
            "catalog/books",
            "catalog/books/fiction",
            "catalog/music",
            "docs"
        ]
    );
}

#[test]
fn test_branches_expand_independently() {
    let tree = shop_tree();
    let mut expansion = ExpansionState::new();
    assert!(expansion.toggle("catalog"));
    assert!(expansion.toggle("admin"));

    let seen = ids(&tree, &Role::ADMIN, &expansion);
    assert!(seen.contains(&"admin/audit".to_string()));
    assert!(seen.contains(&"catalog/books".to_string()));

    assert!(!expansion.toggle("admin"));
    assert!(expansion.is_expanded("catalog"));
}

#[test]
fn test_external_link_shown_to_unlogged_with_unresolved_icon() {
    let tree = shop_tree();
    let menu = render(&tree.routes, &Role::UNLOGGED, &ExpansionState::new(), &IconRegistry::builtin());
    assert_eq!(menu.entries.len(), 1);

    let docs = &menu.entries[0];
    assert_eq!(docs.kind, NodeKind::LeafExternal);
    assert!(docs.icon.is_none());
    assert!(menu.issues.is_empty());
}

#[test]
fn test_unknown_role_sees_only_external_links() {
    let tree = shop_tree();
    let seen = ids(&tree, &Role::from("intruder"), &ExpansionState::new());
    assert_eq!(seen, vec!["docs"]);
}

// --- Configuration Errors ---

#[test]
fn test_malformed_node_is_isolated() {
    let tree = RouteTree::from_json(
        r#"{
            "routes": {
                "first": { "path": "/first", "roles": ["viewer"], "frontendVisible": true },
                "broken": { "roles": ["viewer"], "frontendVisible": true },
                "last": { "path": "/last", "roles": ["viewer"], "frontendVisible": true }
            }
        }"#,
    )
    .expect("valid json");

    let menu = render(&tree.routes, &Role::from("viewer"), &ExpansionState::new(), &IconRegistry::new());
    let seen: Vec<&str> = menu.entries.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(seen, vec!["first", "last"]);
    assert_eq!(
        menu.issues,
        vec![ConfigIssue {
            id: "broken".to_string(),
            defect: Defect::MissingTarget
        }]
    );
}

#[test]
fn test_external_without_url_is_reported() {
    let tree = RouteTree::from_json(
        r#"{ "routes": { "docs": { "external": true, "frontendVisible": true } } }"#,
    )
    .expect("valid json");
    let menu = render(&tree.routes, &Role::ADMIN, &ExpansionState::new(), &IconRegistry::new());
    assert!(menu.entries.is_empty());
    assert_eq!(menu.issues[0].defect, Defect::ExternalWithoutUrl);
}

#[test]
fn test_composite_without_path_is_not_malformed() {
    let tree = reports_tree();
    assert!(tree.audit().is_empty());
}

#[test]
fn test_empty_children_make_a_leaf() {
    let tree = RouteTree::from_json(
        r#"{ "routes": { "lonely": { "path": "/lonely", "roles": ["viewer"], "frontendVisible": true, "children": {} } } }"#,
    )
    .expect("valid json");
    let expansion = ExpansionState::from_iter(["lonely"]);
    let menu = render(&tree.routes, &Role::from("viewer"), &expansion, &IconRegistry::new());
    assert_eq!(menu.entries.len(), 1);
    assert_eq!(menu.entries[0].kind, NodeKind::LeafInternal);
    assert!(!menu.entries[0].has_children);
}

#[test]
fn test_duplicate_keys_are_rejected_at_load() {
    let result = RouteTree::from_json(
        r#"{ "routes": { "a": { "path": "/a" }, "a": { "path": "/b" } } }"#,
    );
    assert!(matches!(result, Err(NavError::Parse(_))));
}

// --- Walk ---

#[test]
fn test_walk_is_lazy_and_restartable() {
    let tree = shop_tree();
    let viewer = Role::from("viewer");
    let expansion = ExpansionState::from_iter(["catalog"]);
    let icons = IconRegistry::builtin();

    let walk = walk(&tree.routes, &viewer, &expansion, &icons);
    let first: Vec<_> = walk.clone().take(2).map(|item| item.map(|e| e.id)).collect();
    assert_eq!(first.len(), 2);

    let full: Vec<String> = walk.clone().filter_map(Result::ok).map(|e| e.id).collect();
    let again: Vec<String> = walk.filter_map(Result::ok).map(|e| e.id).collect();
    assert_eq!(full, again);
    assert_eq!(full[..2], ["home".to_string(), "catalog".to_string()]);
}

#[test]
fn test_walk_yields_error_in_place() {
    let tree = RouteTree::from_json(
        r#"{
            "routes": {
                "a": { "path": "/a", "roles": ["viewer"], "frontendVisible": true },
                "b": { "roles": ["viewer"], "frontendVisible": true },
                "c": { "path": "/c", "roles": ["viewer"], "frontendVisible": true }
            }
        }"#,
    )
    .expect("valid json");
    let viewer = Role::from("viewer");
    let expansion = ExpansionState::new();
    let icons = IconRegistry::new();

    let items: Vec<_> = walk(&tree.routes, &viewer, &expansion, &icons).collect();
    assert_eq!(items.len(), 3);
    assert!(items[0].is_ok());
    assert!(matches!(&items[1], Err(NavError::Misconfigured { id, .. }) if id == "b"));
    assert!(items[2].is_ok());
}

// --- Tree Helpers ---

#[test]
fn test_resolve_and_find() {
    let tree = shop_tree();
    assert!(tree.resolve("catalog/books/fiction").is_some());
    assert!(tree.resolve("catalog/fiction").is_none());
    assert!(tree.resolve("home/anything").is_none());
    assert!(tree.find("fiction").is_some());
    assert_eq!(tree.node_count(), 8);

    let viewer = Role::from("viewer");
    assert!(tree.resolve_visible("catalog/music", &viewer).is_some());
    assert!(tree.resolve_visible("admin/audit", &viewer).is_none());
    assert!(tree.resolve_visible("admin/audit", &Role::ADMIN).is_some());
}

#[test]
fn test_labels_capitalize_first_character_only() {
    use admin_shell::navigation::walker::label_for;
    assert_eq!(label_for("reports"), "Reports");
    assert_eq!(label_for("myItems"), "MyItems");
    assert_eq!(label_for("école"), "École");
    assert_eq!(label_for(""), "");
}

#[test]
fn test_children_of_external_link_are_unreachable() {
    let tree = RouteTree::from_json(
        r#"{
            "routes": {
                "docs": {
                    "url": "https://docs.example.com",
                    "external": true,
                    "frontendVisible": true,
                    "children": {
                        "internal": { "url": "https://intranet.example.com", "external": true, "frontendVisible": true }
                    }
                }
            }
        }"#,
    )
    .expect("valid tree");
    let expansion = ExpansionState::from_iter(["docs"]);

    assert_eq!(ids(&tree, &Role::UNLOGGED, &expansion), vec!["docs"]);
    assert!(tree.resolve_visible("docs", &Role::UNLOGGED).is_some());
    assert!(tree.resolve_visible("docs/internal", &Role::UNLOGGED).is_none());
    assert!(tree.resolve_visible("docs/internal", &Role::ADMIN).is_none());
    // The raw lookup still sees the node.
    assert!(tree.resolve("docs/internal").is_some());
}

#[test]
fn test_malformed_node_hidden_from_viewer_is_not_reported() {
    let tree = RouteTree::from_json(
        r#"{
            "routes": {
                "home": { "path": "/", "roles": ["viewer"], "frontendVisible": true },
                "broken": { "roles": ["admin"], "frontendVisible": true }
            }
        }"#,
    )
    .expect("valid json");

    let viewer = render(&tree.routes, &Role::from("viewer"), &ExpansionState::new(), &IconRegistry::new());
    assert_eq!(viewer.entries.len(), 1);
    assert!(viewer.issues.is_empty());

    let admin = render(&tree.routes, &Role::ADMIN, &ExpansionState::new(), &IconRegistry::new());
    assert_eq!(admin.issues.len(), 1);
    assert_eq!(admin.issues[0].id, "broken");
    // The load-time audit reports it regardless of role.
    assert_eq!(tree.audit().len(), 1);
}

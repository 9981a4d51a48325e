use super::*;

fn registry_with(keys: &[&'static str]) -> RevealRegistry<&'static str> {
    let mut registry = RevealRegistry::new();
    registry.discover(keys.iter().map(|k| (*k, false)));
    registry
}

// =============================================================
// Discovery
// =============================================================

#[test]
fn discover_returns_new_keys_in_order() {
    let mut registry = RevealRegistry::new();
    let fresh = registry.discover([("a", false), ("b", false), ("c", false)]);
    assert_eq!(fresh, vec!["a", "b", "c"]);
    assert_eq!(registry.state(&"b"), Some(RevealState::Watching));
}

#[test]
fn rediscovery_only_returns_incremental_set() {
    let mut registry = registry_with(&["a", "b"]);
    let fresh = registry.discover([("a", false), ("b", false), ("c", false)]);
    assert_eq!(fresh, vec!["c"]);
    assert_eq!(registry.len(), 3);
}

#[test]
fn already_visible_candidates_are_never_watched() {
    let mut registry = RevealRegistry::new();
    let fresh = registry.discover([("a", true), ("b", false)]);
    assert_eq!(fresh, vec!["b"]);
    assert_eq!(registry.state(&"a"), Some(RevealState::Visible));
}

#[test]
fn duplicate_candidates_in_one_pass_register_once() {
    let mut registry = RevealRegistry::new();
    let fresh = registry.discover([("a", false), ("a", false)]);
    assert_eq!(fresh, vec!["a"]);
    assert_eq!(registry.len(), 1);
}

// =============================================================
// One-way transitions
// =============================================================

#[test]
fn trigger_moves_watching_to_scheduled_once() {
    let mut registry = registry_with(&["a"]);
    assert!(registry.trigger(&"a"));
    assert_eq!(registry.state(&"a"), Some(RevealState::Scheduled));
    assert!(!registry.trigger(&"a"));
}

#[test]
fn visible_is_terminal() {
    let mut registry = registry_with(&["a"]);
    registry.trigger(&"a");
    assert!(registry.mark_visible(&"a"));
    assert!(!registry.mark_visible(&"a"));
    assert!(!registry.trigger(&"a"));
    assert_eq!(registry.state(&"a"), Some(RevealState::Visible));
}

#[test]
fn visible_elements_are_not_rewatched_on_rediscovery() {
    let mut registry = registry_with(&["a"]);
    registry.trigger(&"a");
    registry.mark_visible(&"a");
    // The element lost its class somehow; the registry still remembers.
    let fresh = registry.discover([("a", false)]);
    assert!(fresh.is_empty());
    assert_eq!(registry.state(&"a"), Some(RevealState::Visible));
}

#[test]
fn reduced_motion_path_marks_watching_visible_directly() {
    let mut registry = registry_with(&["a", "b"]);
    assert!(registry.mark_visible(&"a"));
    assert!(registry.mark_visible(&"b"));
    assert!(!registry.trigger(&"a"));
}

#[test]
fn unknown_keys_are_ignored() {
    let mut registry = registry_with(&["a"]);
    assert!(!registry.trigger(&"z"));
    assert!(!registry.mark_visible(&"z"));
    assert_eq!(registry.state(&"z"), None);
}

use super::*;

fn router() -> Router {
    let pages = ["home", "about", "programmes", "contact"]
        .iter()
        .map(|p| p.to_string())
        .collect();
    Router::new(pages, "home", 250)
}

fn ticket_of(step: &Step) -> u64 {
    match step {
        Step::Schedule { ticket, .. } | Step::Retargeted { ticket, .. } => *ticket,
        other => panic!("expected a scheduled swap, got {other:?}"),
    }
}

/// Navigates and immediately completes the swap.
fn settle(router: &mut Router, route: &str) -> Option<String> {
    let step = router.navigate(route);
    router.finish(ticket_of(&step)).map(|swap| swap.to)
}

// =============================================================
// Fragment parsing
// =============================================================

#[test]
fn hash_strips_leading_marker() {
    assert_eq!(route_from_hash("#about"), Some("about"));
    assert_eq!(route_from_hash("about"), Some("about"));
}

#[test]
fn empty_hash_names_no_route() {
    assert_eq!(route_from_hash(""), None);
    assert_eq!(route_from_hash("#"), None);
}

// =============================================================
// Resolution
// =============================================================

#[test]
fn known_routes_resolve_to_themselves() {
    let r = router();
    for key in ["home", "about", "programmes", "contact"] {
        assert_eq!(r.resolve(key), key);
    }
}

#[test]
fn unknown_routes_resolve_to_default() {
    let r = router();
    for key in ["", "nope", "HOME", "about/team"] {
        assert_eq!(r.resolve(key), "home");
    }
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn first_load_swaps_without_delay() {
    let mut r = router();
    let step = r.navigate("programmes");
    assert_eq!(
        step,
        Step::Schedule {
            fade: None,
            to: "programmes".to_string(),
            delay_ms: 0,
            ticket: 1,
        }
    );
    assert_eq!(r.finish(1).map(|swap| swap.to).as_deref(), Some("programmes"));
    assert_eq!(r.active(), Some("programmes"));
    assert_eq!(r.phase(), &Phase::Idle);
}

#[test]
fn later_navigation_fades_current_section() {
    let mut r = router();
    settle(&mut r, "home");

    let step = r.navigate("about");
    assert_eq!(
        step,
        Step::Schedule {
            fade: Some("home".to_string()),
            to: "about".to_string(),
            delay_ms: 250,
            ticket: 2,
        }
    );
    // Still showing home until the fade finishes.
    assert_eq!(r.active(), Some("home"));
    assert_eq!(r.finish(2).map(|swap| swap.to).as_deref(), Some("about"));
    assert_eq!(r.active(), Some("about"));
}

#[test]
fn navigating_to_active_section_is_noop() {
    let mut r = router();
    settle(&mut r, "about");
    assert_eq!(r.navigate("about"), Step::Unchanged);
    assert_eq!(r.phase(), &Phase::Idle);
}

#[test]
fn unknown_route_lands_on_default() {
    let mut r = router();
    settle(&mut r, "about");
    assert_eq!(settle(&mut r, "does-not-exist").as_deref(), Some("home"));
    assert_eq!(r.active(), Some("home"));
}

#[test]
fn unknown_route_while_on_default_is_noop() {
    let mut r = router();
    settle(&mut r, "home");
    assert_eq!(r.navigate("missing"), Step::Unchanged);
}

#[test]
fn exactly_one_section_active_after_any_sequence() {
    let mut r = router();
    for route in ["contact", "x", "about", "about", "home", "programmes"] {
        if let step @ Step::Schedule { .. } = r.navigate(route) {
            r.finish(ticket_of(&step));
        }
        assert!(r.active().is_some());
        assert!(r.knows(r.active().unwrap()));
    }
    assert_eq!(r.active(), Some("programmes"));
}

// =============================================================
// Rapid navigation
// =============================================================

#[test]
fn rapid_navigation_keeps_only_latest_target() {
    let mut r = router();
    settle(&mut r, "home");

    let first = r.navigate("about");
    let second = r.navigate("contact");
    assert!(matches!(
        &second,
        Step::Retargeted { to, delay_ms: 250, fade: Some(f), .. } if to == "contact" && f == "home"
    ));

    // The superseded timer firing late changes nothing.
    assert_eq!(r.finish(ticket_of(&first)), None);
    assert_eq!(r.active(), Some("home"));

    assert_eq!(r.finish(ticket_of(&second)).map(|swap| swap.to).as_deref(), Some("contact"));
    assert_eq!(r.active(), Some("contact"));
}

#[test]
fn repeating_pending_target_is_noop() {
    let mut r = router();
    settle(&mut r, "home");
    let step = r.navigate("about");
    assert_eq!(r.navigate("about"), Step::Unchanged);
    assert_eq!(r.finish(ticket_of(&step)).map(|swap| swap.to).as_deref(), Some("about"));
}

#[test]
fn returning_to_fading_section_cancels_swap() {
    let mut r = router();
    settle(&mut r, "home");
    let step = r.navigate("about");
    assert_eq!(
        r.navigate("home"),
        Step::Cancelled {
            restore: "home".to_string()
        }
    );
    assert_eq!(r.phase(), &Phase::Idle);
    assert_eq!(r.finish(ticket_of(&step)), None);
    assert_eq!(r.active(), Some("home"));
}

#[test]
fn retarget_during_first_load_stays_immediate() {
    let mut r = router();
    r.navigate("about");
    let step = r.navigate("contact");
    assert!(matches!(step, Step::Retargeted { delay_ms: 0, fade: None, .. }));
    assert_eq!(r.finish(ticket_of(&step)).map(|swap| swap.to).as_deref(), Some("contact"));
}

#[test]
fn tickets_are_never_reused() {
    let mut r = router();
    let a = ticket_of(&r.navigate("home"));
    r.finish(a);
    let b = ticket_of(&r.navigate("about"));
    let c = ticket_of(&r.navigate("contact"));
    assert!(a < b && b < c);
}

// =============================================================
// Default route
// =============================================================

fn pages(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

#[test]
fn missing_default_falls_back_to_first_page() {
    let mut r = Router::new(pages(&["about", "contact"]), "home", 250);
    assert_eq!(r.default_route(), "about");
    assert_eq!(r.resolve("nowhere"), "about");

    settle(&mut r, "contact");
    assert_eq!(settle(&mut r, "nowhere").as_deref(), Some("about"));
    assert!(r.knows(r.active().unwrap()));
}

#[test]
fn known_default_is_kept() {
    let r = Router::new(pages(&["about", "home"]), "home", 250);
    assert_eq!(r.default_route(), "home");
}

// =============================================================
// Swap plan
// =============================================================

#[test]
fn arriving_home_rearms_counters() {
    let mut r = router();
    let step = r.navigate("home");
    assert_eq!(
        r.finish(ticket_of(&step)),
        Some(Swap {
            to: "home".to_string(),
            rearm_counters: true,
        })
    );

    for route in ["about", "contact", "programmes"] {
        let step = r.navigate(route);
        let swap = r.finish(ticket_of(&step)).unwrap();
        assert!(!swap.rearm_counters, "{route} re-armed the counters");
    }

    let step = r.navigate("home");
    assert!(r.finish(ticket_of(&step)).unwrap().rearm_counters);
}

#[test]
fn unknown_route_landing_home_rearms_counters() {
    let mut r = router();
    settle(&mut r, "about");
    let step = r.navigate("missing");
    assert!(r.finish(ticket_of(&step)).unwrap().rearm_counters);
}

#[test]
fn home_route_can_differ_from_default() {
    let mut r = router().with_home_route("programmes");
    let step = r.navigate("home");
    assert!(!r.finish(ticket_of(&step)).unwrap().rearm_counters);
    let step = r.navigate("programmes");
    assert!(r.finish(ticket_of(&step)).unwrap().rearm_counters);
}

#[test]
fn cancelled_swap_leaves_nothing_to_rearm() {
    let mut r = router();
    settle(&mut r, "home");
    let step = r.navigate("about");
    assert!(matches!(r.navigate("home"), Step::Cancelled { .. }));
    assert_eq!(r.finish(ticket_of(&step)), None);
}

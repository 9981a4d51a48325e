use super::*;

#[test]
fn defaults_match_site_timings() {
    let config = SiteConfig::default();
    assert_eq!(config.default_route, "home");
    assert_eq!(config.home_route, "home");
    assert_eq!(config.fade_ms, 250);
    assert_eq!(config.counter_duration_ms, 2000.0);
    assert_eq!(config.particle_count, 40);
    assert_eq!(config.loader_delay_ms, 1000);
    assert_eq!(config.loader_fade_ms, 600);
    assert_eq!(config.reveal_root_margin, "0px 0px -40px 0px");
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let config = SiteConfig::from_json(r#"{ "fade_ms": 400, "default_route": "about" }"#)
        .expect("valid config");
    assert_eq!(config.fade_ms, 400);
    assert_eq!(config.default_route, "about");
    assert_eq!(config.home_route, "home");
    assert_eq!(config.particle_count, 40);
}

#[test]
fn empty_object_is_default() {
    let config = SiteConfig::from_json("{}").expect("valid config");
    assert_eq!(config, SiteConfig::default());
}

#[test]
fn malformed_json_is_config_error() {
    let err = SiteConfig::from_json("{ fade_ms: ").unwrap_err();
    assert!(matches!(err, crate::error::SiteError::Config(_)));
}

use log::Level;
use serde::Deserialize;

use crate::dom;
use crate::error::SiteResult;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Every timing and threshold the site behaviors use.
///
/// A page can override any subset of these with a JSON block:
/// `<script type="application/json" id="siteConfig">{"fade_ms": 400}</script>`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub default_route: String,
    pub home_route: String,
    pub fade_ms: u32,

    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub reveal_will_change_reset_ms: u32,

    pub counter_duration_ms: f64,
    pub counter_threshold: f64,

    pub particle_count: usize,
    pub particle_threshold: f64,

    pub nav_scrolled_offset: f64,
    pub parallax_factor: f64,
    pub text_reveal_base_ms: u32,
    pub text_reveal_step_ms: u32,
    /// Degrees per unit of pointer offset. Offsets span [-0.5, 0.5], so the
    /// steepest lean is half this value.
    pub tilt_factor_deg: f64,

    pub loader_delay_ms: u32,
    pub loader_fade_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_route: "home".to_string(),
            home_route: "home".to_string(),
            fade_ms: 250,
            reveal_threshold: 0.15,
            reveal_root_margin: "0px 0px -40px 0px".to_string(),
            reveal_will_change_reset_ms: 1000,
            counter_duration_ms: 2000.0,
            counter_threshold: 0.2,
            particle_count: 40,
            particle_threshold: 0.1,
            nav_scrolled_offset: 50.0,
            parallax_factor: 0.4,
            text_reveal_base_ms: 300,
            text_reveal_step_ms: 80,
            tilt_factor_deg: 10.0,
            loader_delay_ms: 1000,
            loader_fade_ms: 600,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> SiteResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Defaults, overridden by the page's config block when it has one.
    pub fn load() -> Self {
        let raw = dom::document()
            .ok()
            .and_then(|doc| doc.get_element_by_id(dom::anchors::CONFIG))
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => match Self::from_json(&raw) {
                Ok(config) => {
                    log::debug!("Loaded site config override");
                    config
                }
                Err(err) => {
                    err.log("site config");
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }
}

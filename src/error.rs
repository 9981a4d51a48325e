use thiserror::Error;
use wasm_bindgen::JsValue;

pub type SiteResult<T> = Result<T, SiteError>;

/// Reasons a site component could not attach itself to the page.
///
/// None of these reach the visitor. [`SiteError::log`] reports them to the
/// console and the component is simply left inactive.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("markup anchor `{0}` not found")]
    MissingAnchor(&'static str),
    #[error("{0} is not supported here")]
    Unsupported(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        SiteError::Js(message)
    }
}

impl SiteError {
    /// Missing markup is routine on pages that leave out a feature, anything
    /// else is worth a warning.
    pub fn log(&self, component: &str) {
        match self {
            SiteError::MissingAnchor(_) | SiteError::Unsupported(_) => {
                log::debug!("{} disabled: {}", component, self)
            }
            _ => log::warn!("{} failed: {}", component, self),
        }
    }
}

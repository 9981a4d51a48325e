use web_sys::{Document, HtmlElement};

use crate::dom::{self, anchors};
use crate::error::SiteResult;

#[cfg(all(test, target_arch = "wasm32"))]
#[path = "menu_test.rs"]
mod menu_test;

const EXPANDED: &str = "aria-expanded";

/// The "Programmes" submenu in the top navigation.
#[derive(Clone)]
pub struct Dropdown {
    container: HtmlElement,
    button: HtmlElement,
}

impl Dropdown {
    pub fn find(document: &Document) -> SiteResult<Self> {
        Ok(Self {
            container: dom::by_id(document, anchors::DROPDOWN)?,
            button: dom::by_id(document, anchors::DROPDOWN_BUTTON)?,
        })
    }

    pub fn button(&self) -> &HtmlElement {
        &self.button
    }

    pub fn is_open(&self) -> bool {
        self.container.class_list().contains("open")
    }

    pub fn open(&self) {
        dom::add_class(&self.container, "open");
        let _ = self.button.set_attribute(EXPANDED, "true");
    }

    pub fn close(&self) {
        dom::remove_class(&self.container, "open");
        let _ = self.button.set_attribute(EXPANDED, "false");
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }
}

/// The mobile navigation panel and the burger button that drives it.
///
/// The burger's `aria-expanded` attribute is the only record of whether the
/// drawer is open.
#[derive(Clone)]
pub struct Drawer {
    burger: HtmlElement,
    panel: HtmlElement,
}

impl Drawer {
    pub fn find(document: &Document) -> SiteResult<Self> {
        Ok(Self {
            burger: dom::by_id(document, anchors::BURGER)?,
            panel: dom::by_id(document, anchors::DRAWER)?,
        })
    }

    pub fn burger(&self) -> &HtmlElement {
        &self.burger
    }

    pub fn is_open(&self) -> bool {
        self.burger.get_attribute(EXPANDED).as_deref() == Some("true")
    }

    fn set_open(&self, open: bool) {
        let _ = self
            .burger
            .set_attribute(EXPANDED, if open { "true" } else { "false" });
        self.panel.set_hidden(!open);
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }
}

/// Both navigation menus. Either one may be missing from the markup, in
/// which case its operations do nothing.
#[derive(Clone, Default)]
pub struct Menus {
    pub dropdown: Option<Dropdown>,
    pub drawer: Option<Drawer>,
}

impl Menus {
    pub fn find(document: &Document) -> Self {
        let dropdown = Dropdown::find(document)
            .map_err(|err| err.log("dropdown"))
            .ok();
        let drawer = Drawer::find(document)
            .map_err(|err| err.log("mobile drawer"))
            .ok();
        Self { dropdown, drawer }
    }

    pub fn close_dropdown(&self) {
        if let Some(dropdown) = &self.dropdown {
            dropdown.close();
        }
    }

    pub fn toggle_dropdown(&self) {
        if let Some(dropdown) = &self.dropdown {
            dropdown.toggle();
        }
    }

    /// Burger press: flips the drawer and always folds the dropdown away.
    pub fn toggle_drawer(&self) {
        if let Some(drawer) = &self.drawer {
            drawer.toggle();
        }
        self.close_dropdown();
    }

    pub fn close_all(&self) {
        self.close_dropdown();
        if let Some(drawer) = &self.drawer {
            drawer.close();
        }
    }
}

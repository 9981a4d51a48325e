use wasm_bindgen_test::wasm_bindgen_test;

use super::*;
use crate::dom::fixture::Fixture;

const PAGES: &str = r#"
    <section class="page is-active" data-page="home"></section>
    <section class="page" data-page="about"></section>
    <section class="page" data-page="contact"></section>
"#;

fn opacity(page: &HtmlElement) -> String {
    page.style().get_property_value("opacity").unwrap_or_default()
}

#[wasm_bindgen_test]
fn discovers_pages_in_document_order() {
    let fixture = Fixture::mount(PAGES);
    let pages = PageSwitcher::discover(fixture.document());
    assert_eq!(pages.keys(), ["home", "about", "contact"]);
}

#[wasm_bindgen_test]
fn activate_leaves_exactly_one_active_section() {
    let fixture = Fixture::mount(PAGES);
    let pages = PageSwitcher::discover(fixture.document());

    pages.activate("contact");
    let active = dom::query_all_in(fixture.document(), ".page.is-active");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].get_attribute("data-page").as_deref(), Some("contact"));
}

#[wasm_bindgen_test]
fn clear_fade_restores_inline_styles() {
    let fixture = Fixture::mount(PAGES);
    let pages = PageSwitcher::discover(fixture.document());
    let home = fixture.find("[data-page=home]");

    pages.fade_out("home", 250);
    assert_eq!(opacity(&home), "0");

    pages.clear_fade("home");
    assert_eq!(opacity(&home), "");
    assert_eq!(home.style().get_property_value("transform").unwrap_or_default(), "");
    assert!(home.class_list().contains("is-active"));
}

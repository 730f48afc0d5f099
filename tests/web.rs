//! Browser tests for the mounted widget. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use visited_cases::{
    VisitedPageRecord, extract_case_id, notify_location_change, push_state, replace_state, start_visited_cases,
    stop_visited_cases, visited_cases,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement, Window};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> Window {
    web_sys::window().unwrap()
}

fn document() -> Document {
    window().document().unwrap()
}

fn reset_storage() {
    let storage = window().local_storage().unwrap().unwrap();
    storage.remove_item("visitedCasePages").unwrap();
}

/// Put the address bar on a page that is not a case page
fn reset_address() {
    window()
        .history()
        .unwrap()
        .replace_state_with_url(&JsValue::NULL, "", Some("/"))
        .unwrap();
}

fn stored_pages() -> Vec<VisitedPageRecord> {
    serde_wasm_bindgen::from_value(visited_cases()).unwrap()
}

fn stored_ids() -> Vec<String> {
    stored_pages().into_iter().map(|page| page.id).collect()
}

/// Let pending renders, microtasks and observers run
async fn next_tick() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn root() -> Element {
    document().get_element_by_id("visited-cases-root").unwrap()
}

fn find(selector: &str) -> Option<HtmlElement> {
    root()
        .query_selector(selector)
        .unwrap()
        .map(|element| element.dyn_into::<HtmlElement>().unwrap())
}

fn click(selector: &str) {
    find(selector)
        .unwrap_or_else(|| panic!("nothing matches {}", selector))
        .click();
}

fn toggle() -> Option<HtmlElement> {
    find("div[title='Visited cases']")
}

/// `display` of the panel, None when nothing is rendered
fn panel_display() -> Option<&'static str> {
    let panel = toggle()?.next_element_sibling()?;
    let style = panel.get_attribute("style")?;
    if style.contains("display: block") {
        Some("block")
    } else if style.contains("display: none") {
        Some("none")
    } else {
        None
    }
}

fn row_count() -> u32 {
    root().query_selector_all("a").unwrap().length()
}

fn remove_button(case_path: &str) -> HtmlElement {
    find(&format!("a[href*='{}']", case_path))
        .and_then(|link| link.parent_element())
        .and_then(|row| row.query_selector("button[title='Remove']").unwrap())
        .map(|button| button.dyn_into::<HtmlElement>().unwrap())
        .unwrap()
}

fn ensure_title_element() {
    let document = document();
    if document.query_selector("title").unwrap().is_none() {
        let title = document.create_element("title").unwrap();
        let head = document.query_selector("head").unwrap().unwrap();
        head.append_child(&title).unwrap();
    }
}

#[wasm_bindgen_test]
fn test_extract_case_id_default_pattern() {
    assert_eq!(extract_case_id("https://app.test/case/42?tab=notes"), Some("42".to_string()));
    assert_eq!(extract_case_id("https://app.test/dashboard"), None);
}

#[wasm_bindgen_test]
fn test_mount_track_and_unmount() {
    reset_storage();
    reset_address();

    start_visited_cases(JsValue::UNDEFINED);
    assert!(document().get_element_by_id("visited-cases-root").is_some());

    push_state("/case/77");
    push_state("/settings");
    replace_state("/case/78?tab=notes");

    assert_eq!(stored_ids(), vec!["78", "77"]);

    let raw = window()
        .local_storage()
        .unwrap()
        .unwrap()
        .get_item("visitedCasePages")
        .unwrap();
    assert!(raw.unwrap().contains("\"id\":\"78\""));

    stop_visited_cases();
    assert!(document().get_element_by_id("visited-cases-root").is_none());
    assert!(stored_pages().is_empty());
    reset_storage();
    reset_address();
}

#[wasm_bindgen_test]
fn test_native_popstate_and_announced_changes_are_recorded() {
    reset_storage();
    reset_address();
    start_visited_cases(JsValue::UNDEFINED);
    let history = window().history().unwrap();

    // a router writing history itself goes unnoticed...
    history
        .push_state_with_url(&JsValue::NULL, "", Some("/case/301"))
        .unwrap();
    assert!(stored_ids().is_empty());

    // ...until the browser reports a popstate
    let popstate = web_sys::Event::new("popstate").unwrap();
    window().dispatch_event(&popstate).unwrap();
    assert_eq!(stored_ids(), vec!["301"]);

    // or the router announces the change
    history
        .push_state_with_url(&JsValue::NULL, "", Some("/case/302"))
        .unwrap();
    notify_location_change();
    assert_eq!(stored_ids(), vec!["302", "301"]);

    // a second popstate for the same address records nothing new
    window().dispatch_event(&popstate).unwrap();
    assert_eq!(stored_ids(), vec!["302", "301"]);

    stop_visited_cases();
    reset_storage();
    reset_address();
}

#[wasm_bindgen_test]
async fn test_title_change_updates_record() {
    reset_storage();
    reset_address();
    ensure_title_element();
    document().set_title("Loading...");
    start_visited_cases(JsValue::UNDEFINED);

    push_state("/case/501");
    assert_eq!(stored_pages()[0].title, "Loading...");

    document().set_title("Printer on fire");
    next_tick().await;

    let pages = stored_pages();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].id, "501");
    assert_eq!(pages[0].title, "Printer on fire");

    stop_visited_cases();
    reset_storage();
    reset_address();
}

#[wasm_bindgen_test]
async fn test_panel_interactions() {
    reset_storage();
    reset_address();
    start_visited_cases(JsValue::UNDEFINED);
    next_tick().await;

    // empty store renders nothing
    assert!(toggle().is_none());
    assert!(root().first_element_child().is_none());

    push_state("/case/301");
    next_tick().await;
    assert_eq!(panel_display(), Some("none"));

    click("div[title='Visited cases']");
    next_tick().await;
    assert_eq!(panel_display(), Some("block"));

    // click outside
    document().body().unwrap().click();
    next_tick().await;
    assert_eq!(panel_display(), Some("none"));

    click("div[title='Visited cases']");
    push_state("/case/302");
    next_tick().await;
    assert_eq!(panel_display(), Some("block"));
    assert_eq!(row_count(), 2);

    // label click navigates in place and keeps the panel open
    click("a[href*='/case/301']");
    next_tick().await;
    assert_eq!(window().location().pathname().unwrap(), "/case/301");
    assert_eq!(panel_display(), Some("block"));
    let link_style = find("a[href*='/case/301']").unwrap().get_attribute("style").unwrap();
    assert!(link_style.contains("font-weight: bold"));

    // removing another page keeps it open
    remove_button("/case/302").click();
    next_tick().await;
    assert_eq!(panel_display(), Some("block"));
    assert_eq!(row_count(), 1);
    assert_eq!(stored_ids(), vec!["301"]);

    // removing the page on screen empties the store: nothing rendered
    remove_button("/case/301").click();
    next_tick().await;
    assert!(toggle().is_none());

    // next visit brings the panel back collapsed
    push_state("/case/303");
    next_tick().await;
    assert_eq!(panel_display(), Some("none"));

    // clear all, with the confirmation accepted
    let accept = js_sys::Function::new_no_args("return true;");
    js_sys::Reflect::set(&window(), &JsValue::from_str("confirm"), &accept).unwrap();
    click("div[title='Visited cases']");
    next_tick().await;
    assert_eq!(panel_display(), Some("block"));
    click("button[title='Clear all visited cases']");
    next_tick().await;
    assert!(toggle().is_none());
    assert!(stored_ids().is_empty());

    push_state("/case/304");
    next_tick().await;
    assert_eq!(panel_display(), Some("none"));

    js_sys::Reflect::delete_property(&window(), &JsValue::from_str("confirm")).unwrap();
    stop_visited_cases();
    reset_storage();
    reset_address();
}

//! WASM browser tests for keybar-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

#![cfg(all(target_arch = "wasm32", target_os = "unknown"))]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use keybar_browser::clipboard::create_proxy;
use keybar_browser::layout::{self, AvoidBehavior, LayoutConfig};
use keybar_browser::{
    BrowserClipboard, BrowserViewport, ClipboardPlatform, Command, ContainerGeometry, EditorView,
    KeyboardState, PasteCapability, Platform, RafScheduler, Selection, TextareaView, Transaction,
    ViewHandle, ViewportSource, apply_geometry, browser_dispatcher, config_from_js, platform,
};
use web_sys::{HtmlElement, HtmlTextAreaElement};

fn mount_textarea(content: &str) -> HtmlTextAreaElement {
    let document = gloo_utils::document();
    let textarea = document
        .create_element("textarea")
        .unwrap()
        .dyn_into::<HtmlTextAreaElement>()
        .unwrap();
    textarea.set_value(content);
    gloo_utils::body().append_child(&textarea).unwrap();
    textarea
}

fn mount_div() -> HtmlElement {
    let div = gloo_utils::document()
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    gloo_utils::body().append_child(&div).unwrap();
    div
}

// === Platform detection tests ===

#[wasm_bindgen_test]
fn test_platform_matches_running_navigator() {
    let navigator = gloo_utils::window().navigator();
    let expected = Platform::detect(
        &navigator.user_agent().unwrap(),
        &navigator.platform().unwrap(),
        navigator.max_touch_points(),
    );
    assert_eq!(*platform(), expected);
    assert!(!(expected.mac && expected.ios));
}

#[wasm_bindgen_test]
fn test_detect_iphone() {
    let plat = Platform::detect(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
        "iPhone",
        5,
    );
    assert!(plat.ios && plat.safari && plat.mobile);
    assert!(!plat.mac && !plat.gecko && !plat.chrome);
}

#[wasm_bindgen_test]
fn test_detect_ipad_reporting_mac() {
    let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";
    assert!(Platform::detect(ua, "MacIntel", 5).ios);
    assert!(Platform::detect(ua, "MacIntel", 0).mac);
}

#[wasm_bindgen_test]
fn test_detect_android_chrome() {
    let plat = Platform::detect(
        "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
        "Linux armv8l",
        5,
    );
    assert!(plat.android && plat.chrome && plat.mobile);
    assert!(!plat.safari);
}

#[wasm_bindgen_test]
fn test_detect_desktop_firefox() {
    let plat = Platform::detect(
        "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0",
        "Linux x86_64",
        0,
    );
    assert!(plat.gecko);
    assert!(!plat.mobile);
}

#[wasm_bindgen_test]
fn test_paste_path_choice() {
    let mobile = Platform {
        mobile: true,
        ..Platform::default()
    };
    let desktop = Platform::default();

    assert_eq!(mobile.paste_capability(true, true), PasteCapability::Proxy);
    assert_eq!(mobile.paste_capability(false, true), PasteCapability::Direct);
    assert_eq!(desktop.paste_capability(true, true), PasteCapability::Direct);
    assert_eq!(desktop.paste_capability(true, false), PasteCapability::Proxy);
    assert_eq!(desktop.paste_capability(false, false), PasteCapability::Unavailable);
}

// === Viewport tests ===

#[wasm_bindgen_test]
fn test_viewport_sample() {
    let viewport = BrowserViewport::new().unwrap();
    let sample = viewport.sample().unwrap();
    assert!(sample.window_height > 0.0);

    if sample.visual_height.is_some() {
        assert!(viewport.subscribe(Rc::new(|| {})).is_some());
    }
}

#[wasm_bindgen_test]
fn test_apply_geometry() {
    let div = mount_div();
    let state = KeyboardState {
        visible: true,
        keyboard_height: 300.0,
        viewport_height: 500.0,
    };
    let config = LayoutConfig {
        behavior: AvoidBehavior::Translate,
        vertical_offset: 50.0,
        ..LayoutConfig::default()
    };

    let geometry = layout::adjust(&state, &config, &ContainerGeometry::default());
    apply_geometry(&div, &geometry).unwrap();
    let style = div.style();
    assert_eq!(style.get_property_value("transform").unwrap(), "translateY(-250px)");

    // Switching back clears what the previous behaviour set.
    apply_geometry(&div, &ContainerGeometry::default()).unwrap();
    assert_eq!(style.get_property_value("transform").unwrap(), "");
}

// === Config tests ===

#[wasm_bindgen_test]
fn test_config_from_js() {
    let config = config_from_js(wasm_bindgen::JsValue::UNDEFINED).unwrap();
    assert_eq!(config.paste_timeout_ms, 100);

    let value = js_sys::JSON::parse(r#"{"paste_timeout_ms": 250, "layout": {"behavior": "padding"}}"#).unwrap();
    let config = config_from_js(value).unwrap();
    assert_eq!(config.paste_timeout_ms, 250);
    assert_eq!(config.layout.behavior, AvoidBehavior::Pad);

    let value = js_sys::JSON::parse(r#"{"paste_timeout_ms": 0}"#).unwrap();
    assert!(config_from_js(value).is_err());
}

// === Textarea view tests ===

#[wasm_bindgen_test]
fn test_textarea_utf16_selection() {
    let mut view = TextareaView::new(mount_textarea("a😀b"));
    view.dispatch(Transaction::select(Selection::cursor(2)));
    assert_eq!(view.element().selection_start().unwrap(), Some(3));
    assert_eq!(view.selection(), Selection::cursor(2));

    view.dispatch(Transaction::select(Selection::new(3, 1)));
    assert_eq!(view.selection(), Selection::new(3, 1));
}

#[wasm_bindgen_test]
fn test_textarea_dispatch_replaces() {
    let mut view = TextareaView::new(mount_textarea("let x = 1;"));
    view.dispatch(Transaction::replace(8..9, "42"));
    assert_eq!(view.element().value(), "let x = 42;");
    assert_eq!(view.doc_len(), 11);
    assert_eq!(view.selection(), Selection::cursor(10));
}

#[wasm_bindgen_test]
fn test_dispatcher_on_textarea() {
    let handle = ViewHandle::new(TextareaView::new(mount_textarea("fn main")));
    handle.with_mut(|v| v.dispatch(Transaction::select(Selection::cursor(7))));

    let clipboard = Rc::new(BrowserClipboard::new());
    let dispatcher = browser_dispatcher(handle.clone(), clipboard, &Default::default());

    dispatcher.insert_text("()");
    assert_eq!(handle.with(|v| v.element().value()), Some("fn main()".to_string()));

    dispatcher.execute_action(Command::Left);
    assert_eq!(handle.with(|v| v.selection()), Some(Selection::cursor(8)));

    // Between the parens: no word. One more step lands on `main`'s edge.
    dispatcher.execute_action(Command::SelectWord);
    assert_eq!(handle.with(|v| v.selection()), Some(Selection::cursor(8)));
    dispatcher.execute_action(Command::Left);
    dispatcher.execute_action(Command::SelectWord);
    assert_eq!(handle.with(|v| v.selection()), Some(Selection::new(3, 7)));
}

#[wasm_bindgen_test]
fn test_raf_scheduler_runs_later() {
    use keybar_browser::FrameScheduler;

    let ran = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&ran);
    RafScheduler.request_frame(Box::new(move || *flag.borrow_mut() = true));
    assert!(!*ran.borrow());
}

// === Clipboard tests ===

#[wasm_bindgen_test]
fn test_proxy_textarea_attributes() {
    let parent = mount_div();
    let proxy = create_proxy(&parent).unwrap();
    assert_eq!(proxy.get_attribute("tabindex").as_deref(), Some("-1"));
    assert_eq!(proxy.get_attribute("aria-hidden").as_deref(), Some("true"));
    assert_eq!(parent.child_element_count(), 1);
}

#[wasm_bindgen_test]
fn test_capture_without_proxy_resolves_none() {
    let clipboard = BrowserClipboard::new();
    let result = Rc::new(RefCell::new(Some(Some("unset".to_string()))));
    let sink = Rc::clone(&result);
    clipboard.capture_paste(
        Duration::from_millis(100),
        Box::new(move |text| *sink.borrow_mut() = Some(text)),
    );
    assert_eq!(*result.borrow(), Some(None));
}

#[wasm_bindgen_test]
fn test_capture_receives_paste_event() {
    let clipboard = BrowserClipboard::with_proxy_in(&mount_div()).unwrap();
    let received = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&received);
    clipboard.capture_paste(
        Duration::from_secs(10),
        Box::new(move |text| sink.borrow_mut().push(text)),
    );
    assert!(clipboard.is_capturing());

    // A second request resolves the first with nothing.
    let sink = Rc::clone(&received);
    clipboard.capture_paste(
        Duration::from_secs(10),
        Box::new(move |text| sink.borrow_mut().push(text)),
    );
    assert_eq!(*received.borrow(), vec![None]);

    let data = web_sys::DataTransfer::new().unwrap();
    data.set_data("text/plain", "pasted").unwrap();
    let init = web_sys::ClipboardEventInit::new();
    init.set_clipboard_data(Some(&data));
    let event = web_sys::ClipboardEvent::new_with_event_init_dict("paste", &init).unwrap();
    clipboard.proxy().unwrap().dispatch_event(&event).unwrap();

    assert_eq!(*received.borrow(), vec![None, Some("pasted".to_string())]);
    assert!(!clipboard.is_capturing());
}

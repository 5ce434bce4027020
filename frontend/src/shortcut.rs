//! Ctrl+/ opens the quick-add box from anywhere on the page.

pub const QUICK_ADD_TOGGLE: &str = "quick-add-toggle";
pub const QUICK_ADD_INPUT: &str = "quick-add-input";

pub fn is_quick_add(key: &str, ctrl: bool) -> bool {
    ctrl && key == "/"
}

/// Listens on the window for the shortcut and presses the header's quick-add
/// button when the box is closed, so the message goes through the app's
/// normal update loop.
#[cfg(target_arch = "wasm32")]
pub fn listen_for_quick_add() {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{console, window, HtmlElement, KeyboardEvent};

    let callback = Closure::wrap(Box::new(|event: KeyboardEvent| {
        if !is_quick_add(&event.key(), event.ctrl_key()) {
            return;
        }
        event.prevent_default();
        let Some(document) = window().and_then(|w| w.document()) else {
            return;
        };
        if document.get_element_by_id(QUICK_ADD_INPUT).is_some() {
            return;
        }
        if let Some(button) = document
            .get_element_by_id(QUICK_ADD_TOGGLE)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        {
            button.click();
        }
    }) as Box<dyn FnMut(_)>);

    let registered = window().map(|w| {
        w.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())
    });
    if !matches!(registered, Some(Ok(()))) {
        console::log_1(&"Failed to register the quick-add shortcut".into());
    }
    callback.forget();
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod form;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod shortcut;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod style;

#[cfg(target_arch = "wasm32")]
mod api;
#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    use sauron::prelude::*;

    console_error_panic_hook::set_once();
    Program::mount_to_body(app::Model::default());
}

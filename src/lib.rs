//! Browser front end of the document generator: an animated particle
//! backdrop and the generate form with its result preview.
//!
//! The decision logic lives in plain modules that build and test on any
//! target; the `wasm` module wires it to the page.

pub mod config;
pub mod error;
pub mod page;
pub mod particles;
pub mod preview;
pub mod submission;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::Document;

    use crate::config::FrontendConfig;

    mod dom;
    mod form;
    mod page;
    mod render;

    pub use dom::render_preview;
    pub use page::{toggle_html_options, update_tooltip};

    /// Body attribute holding an optional JSON config override.
    const CONFIG_ATTRIBUTE: &str = "data-frontend-config";

    thread_local! {
        static CONFIG: RefCell<Rc<FrontendConfig>> = RefCell::new(Rc::new(FrontendConfig::default()));
    }

    /// Config the page was booted with.
    pub(crate) fn config() -> Rc<FrontendConfig> {
        CONFIG.with(|config| Rc::clone(&config.borrow()))
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let config = Rc::new(load_config(&document));
        CONFIG.with(|slot| *slot.borrow_mut() = Rc::clone(&config));

        match document.get_element_by_id(&config.elements.canvas) {
            Some(canvas) => render::start(canvas.dyn_into::<web_sys::HtmlCanvasElement>()?)?,
            None => dom::warn(&format!(
                "canvas #{} not found, particle backdrop disabled",
                config.elements.canvas
            )),
        }

        if document.get_element_by_id(&config.elements.form).is_some() {
            form::bind(&document, Rc::clone(&config))?;
        } else {
            dom::warn(&format!(
                "form #{} not found, submissions disabled",
                config.elements.form
            ));
        }

        dom::log(&format!("front end ready, posting to {}", config.endpoint));
        Ok(())
    }

    fn load_config(document: &Document) -> FrontendConfig {
        let raw = document
            .body()
            .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE));
        match raw {
            Some(json) => FrontendConfig::from_json(&json).unwrap_or_else(|err| {
                dom::warn(&format!("{err}; using defaults"));
                FrontendConfig::default()
            }),
            None => FrontendConfig::default(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{render_preview, toggle_html_options, update_tooltip};

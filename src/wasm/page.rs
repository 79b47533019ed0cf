use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlInputElement};

use super::{config, dom};
use crate::page::{tooltip_text, HtmlOptions};
use crate::submission::STYLE_FIELD;

/// Mirror the topic input into the tooltip element.
#[wasm_bindgen(js_name = updateTooltip)]
pub fn update_tooltip(value: Option<String>) -> Result<(), JsValue> {
    let config = config();
    let tooltip: Element = dom::by_id(&dom::document()?, &config.elements.tooltip)?;
    tooltip.set_text_content(Some(tooltip_text(value.as_deref())));
    Ok(())
}

/// Show the presentation styles only for HTML output, preselecting the
/// default style when none is chosen.
#[wasm_bindgen(js_name = toggleHtmlOptions)]
pub fn toggle_html_options() -> Result<(), JsValue> {
    let config = config();
    let ids = &config.elements;
    let document = dom::document()?;

    let html: HtmlInputElement = dom::by_id(&document, &ids.html_radio)?;
    let style_checked = document
        .query_selector(&format!("input[name=\"{STYLE_FIELD}\"]:checked"))?
        .is_some();
    let options = HtmlOptions::for_selection(html.checked(), style_checked);

    dom::set_hidden(&dom::by_id(&document, &ids.html_options)?, options.hidden)?;
    if let Some(style) = options.select {
        // Style radios are identified by the style name.
        let radio: HtmlInputElement = dom::by_id(&document, style.as_str())?;
        radio.set_checked(true);
    }
    Ok(())
}

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node, Window};

use crate::particles::Viewport;
use crate::preview::PreviewNode;

/// Class that hides a status region.
pub(crate) const HIDDEN: &str = "hidden";

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| "no window".into())
}

pub(crate) fn document() -> Result<Document, JsValue> {
    window()?.document().ok_or_else(|| "no document".into())
}

/// Element `#id`, cast to the expected interface.
pub(crate) fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("element #{id} not found")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has an unexpected type")))
}

pub(crate) fn set_hidden(element: &Element, hidden: bool) -> Result<(), JsValue> {
    element.class_list().toggle_with_force(HIDDEN, hidden)?;
    Ok(())
}

/// Current `innerWidth` x `innerHeight`.
pub(crate) fn viewport(window: &Window) -> Result<Viewport, JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or("innerWidth is not a number")?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or("innerHeight is not a number")?;
    Ok(Viewport::new(width, height))
}

/// Replace the children of `container` with `nodes`.
///
/// Text is inserted with `createTextNode`, so it is never parsed as HTML.
pub fn render_preview(
    document: &Document,
    container: &Element,
    nodes: &[PreviewNode],
) -> Result<(), JsValue> {
    container.set_text_content(None);
    for node in nodes {
        container.append_child(&build(document, node)?)?;
    }
    Ok(())
}

fn build(document: &Document, node: &PreviewNode) -> Result<Node, JsValue> {
    match node {
        PreviewNode::Text(text) => Ok(document.create_text_node(text).into()),
        PreviewNode::Element {
            tag,
            classes,
            children,
        } => {
            let element = document.create_element(tag)?;
            let list = element.class_list();
            for class in *classes {
                list.add_1(class)?;
            }
            for child in children {
                element.append_child(&build(document, child)?)?;
            }
            Ok(element.into())
        }
    }
}

pub(crate) fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub(crate) fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Operator-facing report, shown as `Error: <detail>` in the console.
pub(crate) fn error(detail: &str) {
    web_sys::console::error_2(&JsValue::from_str("Error:"), &JsValue::from_str(detail));
}

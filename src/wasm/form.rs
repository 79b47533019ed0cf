use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, FormData, HtmlAnchorElement, HtmlButtonElement, HtmlFormElement,
    HtmlImageElement, Request, RequestInit, Response,
};

use super::dom;
use crate::config::FrontendConfig;
use crate::error::TransportError;
use crate::preview::build_preview;
use crate::submission::{parse_response, FormFields, GenerateResponse, Generated, Outcome, Panels};

/// Class marking the submit button busy.
const BUSY: &str = "opacity-70";

/// Take over submission of the generate form.
pub(crate) fn bind(document: &Document, config: Rc<FrontendConfig>) -> Result<(), JsValue> {
    let form: HtmlFormElement = dom::by_id(document, &config.elements.form)?;
    let controller = Rc::new(Controller {
        document: document.clone(),
        config,
    });

    let submit_closure = {
        let form = form.clone();
        Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            if let Err(err) = controller.submit(&form) {
                dom::error(&format!("{err:?}"));
            }
        }) as Box<dyn FnMut(Event)>)
    };
    form.add_event_listener_with_callback("submit", submit_closure.as_ref().unchecked_ref())?;
    submit_closure.forget();
    Ok(())
}

struct Controller {
    document: Document,
    config: Rc<FrontendConfig>,
}

impl Controller {
    fn submit(self: &Rc<Self>, form: &HtmlFormElement) -> Result<(), JsValue> {
        let mut fields = read_fields(form)?;
        if fields.normalize() {
            dom::log("no presentation style chosen, defaulting to minimalist");
        }
        self.apply(&Panels::loading())?;

        let this = Rc::clone(self);
        spawn_local(async move {
            let outcome = Outcome::from_result(post(&this.config.endpoint, &fields).await);
            if let Outcome::NetworkFailure(err) = &outcome {
                dom::error(&err.to_string());
            }
            if let Err(err) = this.settle(&outcome, &fields) {
                dom::error(&format!("{err:?}"));
            }
        });
        Ok(())
    }

    fn settle(&self, outcome: &Outcome, fields: &FormFields) -> Result<(), JsValue> {
        self.apply(&Panels::settled(outcome))?;
        if let Outcome::Generated(generated) = outcome {
            self.show(generated, fields)?;
        }
        Ok(())
    }

    fn element(&self, id: &str) -> Result<Element, JsValue> {
        dom::by_id(&self.document, id)
    }

    /// Push `panels` to the page. The button goes first and every region is
    /// attempted even if another one is missing; the first failure is
    /// returned afterwards.
    fn apply(&self, panels: &Panels) -> Result<(), JsValue> {
        let ids = &self.config.elements;
        let button: HtmlButtonElement = dom::by_id(&self.document, &ids.submit_button)?;
        button.set_disabled(!panels.submit_enabled);
        button
            .class_list()
            .toggle_with_force(BUSY, !panels.submit_enabled)?;

        let mut first_err = None;
        for (id, visible) in [
            (&ids.loading, panels.loading),
            (&ids.result, panels.result),
            (&ids.error, panels.error),
        ] {
            if let Err(err) = self
                .element(id)
                .and_then(|region| dom::set_hidden(&region, !visible))
            {
                first_err.get_or_insert(err);
            }
        }

        if let Some(message) = &panels.error_message {
            match self.element(&ids.error_message) {
                Ok(target) => target.set_text_content(Some(message.as_str())),
                Err(err) => {
                    first_err.get_or_insert(err);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn show(&self, generated: &Generated, fields: &FormFields) -> Result<(), JsValue> {
        let ids = &self.config.elements;
        if let Some(url) = &generated.file_url {
            let link: HtmlAnchorElement = dom::by_id(&self.document, &ids.download_link)?;
            link.set_href(url);
        }

        if let Some(images) = &generated.preview_images {
            for (style, url) in images.updates() {
                let selector = ids.preview_image_selector(style.label());
                match self.document.query_selector(&selector)? {
                    Some(img) => img.dyn_into::<HtmlImageElement>()?.set_src(url),
                    None => dom::warn(&format!("no sample image matches {selector}")),
                }
            }
        }

        let nodes = build_preview(
            generated.slides.as_deref(),
            fields.file_type(),
            fields.presentation_style(),
        );
        dom::render_preview(&self.document, &self.element(&ids.preview_content)?, &nodes)
    }
}

/// String entries of the form. The generate form has no file inputs; any
/// non-text entry is skipped with a warning.
fn read_fields(form: &HtmlFormElement) -> Result<FormFields, JsValue> {
    let data = FormData::new_with_form(form)?;
    let mut fields = FormFields::new();
    let entries = js_sys::try_iter(&data)?.ok_or("form data is not iterable")?;
    for entry in entries {
        let entry = js_sys::Array::from(&entry?);
        let name = entry.get(0).as_string().unwrap_or_default();
        match entry.get(1).as_string() {
            Some(value) => fields.append(name, value),
            None => dom::warn(&format!("form field {name:?} is not text and was not sent")),
        }
    }
    Ok(fields)
}

fn to_form_data(fields: &FormFields) -> Result<FormData, JsValue> {
    let data = FormData::new()?;
    for (name, value) in fields.iter() {
        data.append_with_str(name, value)?;
    }
    Ok(data)
}

/// POST the fields and decode the JSON reply. The HTTP status is not
/// inspected; error replies carry their own `success: false`.
async fn post(endpoint: &str, fields: &FormFields) -> Result<GenerateResponse, TransportError> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&to_form_data(fields).map_err(request_error)?);
    let request = Request::new_with_str_and_init(endpoint, &init).map_err(request_error)?;

    let window = dom::window().map_err(request_error)?;
    let reply = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(request_error)?;
    let response: Response = reply.dyn_into().map_err(request_error)?;
    let text = JsFuture::from(response.text().map_err(request_error)?)
        .await
        .map_err(request_error)?;
    let body = text
        .as_string()
        .ok_or_else(|| TransportError::Request("response body is not text".into()))?;
    parse_response(&body)
}

fn request_error(err: JsValue) -> TransportError {
    TransportError::Request(format!("{err:?}"))
}

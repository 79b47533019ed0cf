//! Form submission: the posted field set, the server's reply and the panel
//! state shown for each stage of a request.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::TransportError;

pub const FILE_TYPE_FIELD: &str = "file_type";
pub const STYLE_FIELD: &str = "html_presentation_type";

pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";

/// Output document formats offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pptx,
    Docx,
    Pdf,
    Html,
}

impl FileType {
    pub fn from_field(value: &str) -> Option<Self> {
        match value {
            "pptx" => Some(Self::Pptx),
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            "html" => Some(Self::Html),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pptx => "pptx",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
            Self::Html => "html",
        }
    }
}

/// Visual template of an HTML presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PresentationStyle {
    #[default]
    Minimalist,
    Modern,
    Professional,
}

impl PresentationStyle {
    pub const ALL: [Self; 3] = [Self::Minimalist, Self::Modern, Self::Professional];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimalist => "minimalist",
            Self::Modern => "modern",
            Self::Professional => "professional",
        }
    }

    /// Capitalized name used in the sample images' alt text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Minimalist => "Minimalist",
            Self::Modern => "Modern",
            Self::Professional => "Professional",
        }
    }
}

/// Ordered name/value pairs of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    entries: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replace every value of `name` with a single one, keeping the position
    /// of the first occurrence.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter().position(|(key, _)| key == name) {
            Some(first) => {
                self.entries[first].1 = value;
                let mut index = 0;
                self.entries.retain(|(key, _)| {
                    let keep = index <= first || key != name;
                    index += 1;
                    keep
                });
            }
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn file_type(&self) -> Option<FileType> {
        self.get(FILE_TYPE_FIELD).and_then(FileType::from_field)
    }

    /// The chosen presentation style, as posted.
    pub fn presentation_style(&self) -> Option<&str> {
        self.get(STYLE_FIELD).filter(|s| !s.is_empty())
    }

    /// Default the presentation style for HTML output when none was picked.
    /// Returns whether a value was filled in.
    pub fn normalize(&mut self) -> bool {
        if self.file_type() == Some(FileType::Html) && self.presentation_style().is_none() {
            self.set(STYLE_FIELD, PresentationStyle::default().as_str());
            return true;
        }
        false
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Reply of the generate endpoint.
///
/// Anything malformed below the top level reads as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub preview_images: Option<PreviewImages>,
    #[serde(default, deserialize_with = "lenient")]
    pub preview: Option<PreviewDocument>,
}

/// Replacement sample images, one per presentation style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PreviewImages {
    #[serde(default, deserialize_with = "lenient")]
    pub minimalist: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub modern: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub professional: Option<String>,
}

impl PreviewImages {
    pub fn get(&self, style: PresentationStyle) -> Option<&str> {
        let url = match style {
            PresentationStyle::Minimalist => &self.minimalist,
            PresentationStyle::Modern => &self.modern,
            PresentationStyle::Professional => &self.professional,
        };
        url.as_deref().filter(|u| !u.is_empty())
    }

    /// Styles that got a new image, with its URL.
    pub fn updates(&self) -> impl Iterator<Item = (PresentationStyle, &str)> {
        PresentationStyle::ALL
            .into_iter()
            .filter_map(move |style| self.get(style).map(|url| (style, url)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PreviewDocument {
    #[serde(default, deserialize_with = "lenient")]
    pub presentation: Option<Presentation>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Presentation {
    #[serde(default, deserialize_with = "lenient")]
    pub slides: Option<Vec<Slide>>,
}

pub const UNTITLED_SLIDE: &str = "Untitled Slide";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slide {
    pub title: Option<String>,
    pub bullets: Vec<String>,
}

impl Slide {
    pub fn new(title: Option<&str>, bullets: &[&str]) -> Self {
        Self {
            title: title.map(str::to_string),
            bullets: bullets.iter().map(|b| (*b).to_string()).collect(),
        }
    }

    pub fn heading(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED_SLIDE)
    }

    fn from_value(value: &Value) -> Self {
        let bullets = match value.get("bullets") {
            Some(Value::Array(items)) => items.iter().map(bullet_text).collect(),
            _ => Vec::new(),
        };
        Self {
            title: value.get("title").and_then(title_text),
            bullets,
        }
    }
}

impl<'de> Deserialize<'de> for Slide {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl GenerateResponse {
    /// Slides to preview, if the reply carried any.
    pub fn slides(&self) -> Option<&[Slide]> {
        self.preview
            .as_ref()?
            .presentation
            .as_ref()?
            .slides
            .as_deref()
    }
}

/// Decode a response body.
///
/// `null` has no fields to read and counts as a failed request; any other
/// non-object reads as a reply without `success`.
pub fn parse_response(body: &str) -> Result<GenerateResponse, TransportError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Null => Err(TransportError::Request("response body is null".into())),
        value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
        _ => Ok(GenerateResponse::default()),
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn title_text(value: &Value) -> Option<String> {
    is_truthy(value).then(|| scalar_text(value))
}

fn bullet_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// How one submission ended.
#[derive(Debug)]
pub enum Outcome {
    Generated(Generated),
    /// The server answered but reported failure.
    Rejected(String),
    /// No usable reply at all.
    NetworkFailure(TransportError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generated {
    pub file_url: Option<String>,
    pub preview_images: Option<PreviewImages>,
    pub slides: Option<Vec<Slide>>,
}

impl Outcome {
    pub fn from_result(result: Result<GenerateResponse, TransportError>) -> Self {
        match result {
            Ok(response) if response.success => {
                let slides = response.slides().map(<[Slide]>::to_vec);
                Self::Generated(Generated {
                    file_url: response.file_url,
                    preview_images: response.preview_images,
                    slides,
                })
            }
            Ok(response) => Self::Rejected(
                response
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            ),
            Err(err) => Self::NetworkFailure(err),
        }
    }

    /// Text for the error region, if this outcome shows one.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Generated(_) => None,
            Self::Rejected(message) => Some(message),
            Self::NetworkFailure(_) => Some(NETWORK_ERROR_MESSAGE),
        }
    }
}

/// Visibility of the form's status regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panels {
    pub loading: bool,
    pub result: bool,
    pub error: bool,
    pub submit_enabled: bool,
    /// New text for the error message, when it changes.
    pub error_message: Option<String>,
}

impl Panels {
    /// While a request is in flight.
    pub fn loading() -> Self {
        Self {
            loading: true,
            result: false,
            error: false,
            submit_enabled: false,
            error_message: None,
        }
    }

    /// After the request settled, whatever the outcome.
    pub fn settled(outcome: &Outcome) -> Self {
        let error_message = outcome.error_message().map(str::to_string);
        Self {
            loading: false,
            result: matches!(outcome, Outcome::Generated(_)),
            error: error_message.is_some(),
            submit_enabled: true,
            error_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_form(style: Option<&str>) -> FormFields {
        let mut fields = FormFields::new();
        fields.append("topic", "Rust");
        fields.append(FILE_TYPE_FIELD, "html");
        if let Some(style) = style {
            fields.append(STYLE_FIELD, style);
        }
        fields
    }

    #[test]
    fn test_html_without_style_defaults_to_minimalist() {
        let mut fields = html_form(None);
        assert!(fields.normalize());
        assert_eq!(fields.get(STYLE_FIELD), Some("minimalist"));
    }

    #[test]
    fn test_empty_style_counts_as_unselected() {
        let mut fields = html_form(Some(""));
        assert!(fields.normalize());
        assert_eq!(fields.get(STYLE_FIELD), Some("minimalist"));
        assert_eq!(fields.iter().filter(|(k, _)| *k == STYLE_FIELD).count(), 1);
    }

    #[test]
    fn test_chosen_style_is_kept() {
        let mut fields = html_form(Some("modern"));
        assert!(!fields.normalize());
        assert_eq!(fields.get(STYLE_FIELD), Some("modern"));
    }

    #[test]
    fn test_pptx_gets_no_style() {
        let mut fields: FormFields = [("topic", "Rust"), (FILE_TYPE_FIELD, "pptx")]
            .into_iter()
            .collect();
        assert!(!fields.normalize());
        assert_eq!(fields.get(STYLE_FIELD), None);
    }

    #[test]
    fn test_set_collapses_duplicates() {
        let mut fields: FormFields = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        fields.set("a", "9");
        let pairs: Vec<_> = fields.iter().collect();
        assert_eq!(pairs, vec![("a", "9"), ("b", "2")]);
    }

    #[test]
    fn test_success_response() {
        let response = parse_response(
            r#"{"success":true,"file_url":"/f.pptx","preview":{"presentation":{"slides":[{"title":"A","bullets":["b1","b2"]}]}}}"#,
        )
        .unwrap();
        let outcome = Outcome::from_result(Ok(response));
        let Outcome::Generated(generated) = &outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(generated.file_url.as_deref(), Some("/f.pptx"));
        assert_eq!(
            generated.slides.as_deref(),
            Some(&[Slide::new(Some("A"), &["b1", "b2"])][..])
        );

        let panels = Panels::settled(&outcome);
        assert!(panels.result);
        assert!(!panels.error);
        assert!(!panels.loading);
        assert!(panels.submit_enabled);
    }

    #[test]
    fn test_rejected_response_shows_server_error() {
        let response = parse_response(r#"{"success":false,"error":"Invalid topic"}"#).unwrap();
        let outcome = Outcome::from_result(Ok(response));
        let panels = Panels::settled(&outcome);
        assert!(panels.error);
        assert!(!panels.result);
        assert!(panels.submit_enabled);
        assert_eq!(panels.error_message.as_deref(), Some("Invalid topic"));
    }

    #[test]
    fn test_rejected_without_error_uses_default() {
        for body in [r#"{"success":false}"#, r#"{"error":""}"#, "{}"] {
            let outcome = Outcome::from_result(parse_response(body));
            assert_eq!(outcome.error_message(), Some(DEFAULT_ERROR_MESSAGE), "{body}");
        }
    }

    #[test]
    fn test_network_failure_ignores_error_field() {
        let outcome = Outcome::from_result(Err(TransportError::Request("offline".into())));
        assert_eq!(outcome.error_message(), Some(NETWORK_ERROR_MESSAGE));

        let outcome = Outcome::from_result(parse_response(r#"{"success":false,"error":"Invalid"#));
        assert!(matches!(outcome, Outcome::NetworkFailure(TransportError::Decode(_))));
        assert_eq!(
            Panels::settled(&outcome).error_message.as_deref(),
            Some(NETWORK_ERROR_MESSAGE)
        );
    }

    #[test]
    fn test_null_body_is_transport_failure() {
        let outcome = Outcome::from_result(parse_response("null"));
        assert!(matches!(outcome, Outcome::NetworkFailure(_)));
        assert_eq!(outcome.error_message(), Some(NETWORK_ERROR_MESSAGE));
    }

    #[test]
    fn test_other_non_object_bodies_are_rejections() {
        for body in ["[true]", "5", r#""ok""#, "true"] {
            let outcome = Outcome::from_result(parse_response(body));
            assert!(matches!(outcome, Outcome::Rejected(_)), "{body}");
            assert_eq!(outcome.error_message(), Some(DEFAULT_ERROR_MESSAGE), "{body}");
        }
    }

    #[test]
    fn test_loading_panels() {
        let panels = Panels::loading();
        assert!(panels.loading);
        assert!(!panels.result && !panels.error);
        assert!(!panels.submit_enabled);
    }

    #[test]
    fn test_missing_preview_has_no_slides() {
        let response = parse_response(r#"{"success":true,"file_url":"/f.html"}"#).unwrap();
        assert!(response.slides().is_none());
    }

    #[test]
    fn test_malformed_preview_reads_as_absent() {
        let response = parse_response(
            r#"{"success":true,"preview":{"presentation":{"slides":"oops"}},"preview_images":[1]}"#,
        )
        .unwrap();
        assert!(response.success);
        assert!(response.slides().is_none());
        assert!(response.preview_images.is_none());
    }

    #[test]
    fn test_odd_slides_are_tolerated() {
        let response = parse_response(
            r#"{"success":true,"preview":{"presentation":{"slides":[
                "just text",
                {"title":"","bullets":"nope"},
                {"title":42,"bullets":[1,null,"<b>x</b>",true]}
            ]}}}"#,
        )
        .unwrap();
        let slides = response.slides().unwrap();
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[0].heading(), UNTITLED_SLIDE);
        assert_eq!(slides[1].heading(), UNTITLED_SLIDE);
        assert!(slides[1].bullets.is_empty());
        assert_eq!(slides[2].heading(), "42");
        assert_eq!(slides[2].bullets, vec!["1", "", "<b>x</b>", "true"]);
    }

    #[test]
    fn test_partial_preview_images() {
        let response = parse_response(
            r#"{"success":true,"preview_images":{"modern":"/m.png","professional":"","minimalist":null}}"#,
        )
        .unwrap();
        let images = response.preview_images.unwrap();
        let updates: Vec<_> = images.updates().collect();
        assert_eq!(updates, vec![(PresentationStyle::Modern, "/m.png")]);
    }
}

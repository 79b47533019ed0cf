//! Endpoint and DOM ids the front end binds to.

use serde::Deserialize;

use crate::error::ConfigError;

/// Path the form is posted to.
pub const DEFAULT_ENDPOINT: &str = "/generate";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub endpoint: String,
    pub elements: ElementIds,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            elements: ElementIds::default(),
        }
    }
}

impl FrontendConfig {
    /// Parse a (possibly partial) JSON override; missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Invalid)
    }
}

/// Ids of the elements the host page must provide.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub canvas: String,
    pub form: String,
    pub loading: String,
    pub result: String,
    pub error: String,
    pub error_message: String,
    pub download_link: String,
    pub preview_content: String,
    pub submit_button: String,
    pub tooltip: String,
    pub html_options: String,
    pub html_radio: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: "particleCanvas".into(),
            form: "generationForm".into(),
            loading: "loadingIndicator".into(),
            result: "resultContainer".into(),
            error: "errorContainer".into(),
            error_message: "errorMessage".into(),
            download_link: "downloadLink".into(),
            preview_content: "previewContent".into(),
            submit_button: "generateBtn".into(),
            tooltip: "tooltip".into(),
            html_options: "htmlOptions".into(),
            html_radio: "html".into(),
        }
    }
}

impl ElementIds {
    /// Selector for the sample image of one presentation style inside the
    /// HTML-options region, e.g. `#htmlOptions img[alt="Modern Preview"]`.
    pub fn preview_image_selector(&self, label: &str) -> String {
        format!("#{} img[alt=\"{label} Preview\"]", self.html_options)
    }
}

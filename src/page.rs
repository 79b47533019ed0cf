//! Small input-driven rules of the form page.

use crate::submission::PresentationStyle;

pub const TOOLTIP_PLACEHOLDER: &str = "Your input will show here...";

/// Text for the live tooltip mirroring the topic input.
pub fn tooltip_text(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(TOOLTIP_PLACEHOLDER)
}

/// What the HTML-options region should do after the file type changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlOptions {
    pub hidden: bool,
    /// Style radio to check because none is selected yet.
    pub select: Option<PresentationStyle>,
}

impl HtmlOptions {
    /// Same default as the one applied to the posted form.
    pub fn for_selection(html_selected: bool, style_selected: bool) -> Self {
        Self {
            hidden: !html_selected,
            select: (html_selected && !style_selected).then(PresentationStyle::default),
        }
    }
}

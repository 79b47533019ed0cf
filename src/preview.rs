//! Slide preview as a small element tree.
//!
//! Server-supplied strings only ever become [`PreviewNode::Text`], which the
//! DOM layer inserts as text nodes, never as markup.

use crate::submission::{FileType, Slide};

pub const NO_PREVIEW: &str = "No preview available";
pub const PPTX_IMAGE_NOTE: &str = "Will include Pexels image slide after this content";

const NO_CLASSES: &[&str] = &[];
const SLIDE_SEPARATOR: &[&str] = &["mt-4", "pt-4", "border-t", "border-gray-200"];
const TITLE_CLASSES: &[&str] = &["font-semibold", "text-gray-900", "mb-3"];
const LIST_CLASSES: &[&str] = &["list-disc", "pl-6", "space-y-2"];
const BULLET_CLASSES: &[&str] = &["text-gray-700", "text-sm"];
const NOTE_CLASSES: &[&str] = &["text-xs", "text-indigo-600", "mt-2", "italic"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewNode {
    Element {
        tag: &'static str,
        classes: &'static [&'static str],
        children: Vec<PreviewNode>,
    },
    Text(String),
}

impl PreviewNode {
    fn element(tag: &'static str, classes: &'static [&'static str], children: Vec<Self>) -> Self {
        Self::Element {
            tag,
            classes,
            children,
        }
    }

    fn text_element(tag: &'static str, classes: &'static [&'static str], text: &str) -> Self {
        Self::element(tag, classes, vec![Self::Text(text.to_string())])
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Element { children, .. } => children.iter().map(Self::text_content).collect(),
        }
    }

    /// Descendants (including self) with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&PreviewNode> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: &str, found: &mut Vec<&'a PreviewNode>) {
        if let Self::Element {
            tag: own, children, ..
        } = self
        {
            if *own == tag {
                found.push(self);
            }
            for child in children {
                child.collect(tag, found);
            }
        }
    }
}

/// Note appended to every slide of an HTML presentation.
pub fn html_style_note(style: &str) -> String {
    format!("HTML version includes interactive navigation ({style} style)")
}

/// Children of the preview container for one successful reply.
///
/// `style` is the posted presentation style, used by the HTML note.
pub fn build_preview(
    slides: Option<&[Slide]>,
    file_type: Option<FileType>,
    style: Option<&str>,
) -> Vec<PreviewNode> {
    let slides = match slides {
        Some(slides) if !slides.is_empty() => slides,
        _ => return vec![PreviewNode::Text(NO_PREVIEW.to_string())],
    };

    slides
        .iter()
        .enumerate()
        .map(|(index, slide)| {
            let classes = if index > 0 { SLIDE_SEPARATOR } else { NO_CLASSES };
            let mut children = vec![PreviewNode::text_element("h4", TITLE_CLASSES, slide.heading())];
            if !slide.bullets.is_empty() {
                let items = slide
                    .bullets
                    .iter()
                    .map(|bullet| PreviewNode::text_element("li", BULLET_CLASSES, bullet))
                    .collect();
                children.push(PreviewNode::element("ul", LIST_CLASSES, items));
            }
            match file_type {
                Some(FileType::Pptx) => {
                    children.push(PreviewNode::text_element("p", NOTE_CLASSES, PPTX_IMAGE_NOTE));
                }
                Some(FileType::Html) => {
                    let note = html_style_note(style.unwrap_or_default());
                    children.push(PreviewNode::text_element("p", NOTE_CLASSES, &note));
                }
                _ => {}
            }
            PreviewNode::element("div", classes, children)
        })
        .collect()
}

//! A parsed page standing in for the browser.

use rustc_hash::FxHashMap;

use super::{Host, Listeners, ScrollBehavior};
use crate::utils::html::unescape;

/// Rendered page with element ids and outgoing references, no layout.
///
/// Element offsets are positions in document order, which keeps them
/// monotonic like real offsets.
#[derive(Debug)]
pub struct StaticDocument {
    path: String,
    ids: FxHashMap<String, f64>,
    /// Ids that appear more than once; the first element wins.
    duplicates: Vec<String>,
    refs: Vec<Reference>,
    behavior: ScrollBehavior,
    listeners: Listeners,
}

/// An `href` or `src` found in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub attr: &'static str,
    pub url: String,
}

impl StaticDocument {
    /// Parse `html` served at `path` (prefix included).
    pub fn parse(path: &str, html: &str) -> Result<Self, tl::ParseError> {
        let dom = tl::parse(html, tl::ParserOptions::default())?;
        let mut ids = FxHashMap::default();
        let mut duplicates = Vec::new();
        let mut refs = Vec::new();

        for (position, node) in dom.nodes().iter().enumerate() {
            let Some(tag) = node.as_tag() else {
                continue;
            };
            let attrs = tag.attributes();
            if let Some(id) = attrs.id() {
                #[allow(clippy::cast_precision_loss)]
                let offset = position as f64;
                let id = unescape(&id.as_utf8_str()).into_owned();
                if ids.contains_key(&id) {
                    if !duplicates.contains(&id) {
                        duplicates.push(id);
                    }
                } else {
                    ids.insert(id, offset);
                }
            }
            for attr in ["href", "src"] {
                if let Some(Some(value)) = attrs.get(attr) {
                    refs.push(Reference {
                        attr,
                        url: unescape(&value.as_utf8_str()).into_owned(),
                    });
                }
            }
        }

        Ok(Self {
            path: path.to_string(),
            ids,
            duplicates,
            refs,
            behavior: ScrollBehavior::Auto,
            listeners: Listeners::default(),
        })
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Ids carried by more than one element, in document order.
    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicates
    }

    pub fn refs(&self) -> &[Reference] {
        &self.refs
    }

    /// Links only (`href` attributes).
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.refs
            .iter()
            .filter(|r| r.attr == "href")
            .map(|r| r.url.as_str())
    }
}

impl Host for StaticDocument {
    fn current_path(&self) -> &str {
        &self.path
    }

    fn target_offset(&self, id: &str) -> Option<f64> {
        self.ids.get(id).copied()
    }

    // No layout, nothing to move
    fn scroll_to(&mut self, _y: f64, _behavior: ScrollBehavior) {}

    fn scroll_behavior(&self) -> ScrollBehavior {
        self.behavior
    }

    fn set_scroll_behavior(&mut self, behavior: ScrollBehavior) {
        self.behavior = behavior;
    }

    fn listeners(&mut self) -> &mut Listeners {
        &mut self.listeners
    }
}

//! Markdown bodies.
//!
//! Bodies are read once at load time and rendered per page, so the same
//! source can be emitted under any base path. Root-relative link and image
//! destinations are resolved through the page's [`BasePath`]; headings
//! without an explicit `{#id}` get a slug id so they can be anchor targets.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream, html};
use rustc_hash::FxHashSet;

use crate::core::BasePath;
use crate::utils::path::slug::slugify;

/// Markdown source with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markdown {
    pub path: PathBuf,
    pub source: String,
}

impl Markdown {
    pub fn new(path: impl AsRef<Path>, source: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    pub fn render(&self, base: &BasePath) -> String {
        render(&self.source, base)
    }

    /// Render for a page that already owns the `reserved` ids, so generated
    /// heading ids never shadow them.
    pub fn render_with_reserved(&self, base: &BasePath, reserved: &[&str]) -> String {
        render_into_page(&self.source, base, reserved)
    }

    /// Root-relative destinations of every link and image in the body.
    pub fn site_refs(&self) -> Vec<String> {
        site_refs(&self.source)
    }
}

fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    opts
}

/// Render markdown to HTML under `base`.
pub fn render(source: &str, base: &BasePath) -> String {
    render_into_page(source, base, &[])
}

fn render_into_page(source: &str, base: &BasePath, reserved: &[&str]) -> String {
    let mut events: Vec<Event<'_>> = Parser::new_ext(source, options()).collect();
    assign_heading_ids(&mut events, reserved);

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter().map(|e| rewrite_urls(e, base)));
    out
}

fn rewrite_urls<'a>(event: Event<'a>, base: &BasePath) -> Event<'a> {
    match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: resolve(dest_url, base),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: resolve(dest_url, base),
            title,
            id,
        }),
        other => other,
    }
}

fn resolve<'a>(url: CowStr<'a>, base: &BasePath) -> CowStr<'a> {
    let resolved = match base.resolve(&url) {
        Cow::Owned(s) => Some(s),
        Cow::Borrowed(_) => None,
    };
    resolved.map_or(url, CowStr::from)
}

/// Give every heading without an explicit id a slug id, unique within the
/// body and distinct from `reserved`.
fn assign_heading_ids(events: &mut [Event<'_>], reserved: &[&str]) {
    let mut used: FxHashSet<String> = events
        .iter()
        .filter_map(|e| match e {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .chain(reserved.iter().map(|id| id.to_string()))
        .collect();

    for i in 0..events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }
        let base_slug = slugify(&heading_text(&events[i + 1..]));
        let base_slug = if base_slug.is_empty() {
            "section".to_string()
        } else {
            base_slug
        };

        let mut slug = base_slug.clone();
        let mut n = 1;
        while used.contains(&slug) {
            slug = format!("{base_slug}-{n}");
            n += 1;
        }
        used.insert(slug.clone());

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(slug));
        }
    }
}

fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Render markdown, wrapping every occurrence of a phrase in
/// `<mark data-highlight>`.
///
/// The longest phrase wins when two start at the same position. Soft line
/// breaks become spaces, so a phrase may wrap across source lines; text is
/// merged first so a phrase is never split between two events.
pub fn render_highlighted(source: &str, base: &BasePath, phrases: &[String]) -> String {
    let parser = Parser::new_ext(source, options()).map(|e| match e {
        Event::SoftBreak => Event::Text(CowStr::Borrowed(" ")),
        other => other,
    });
    let events = TextMergeStream::new(parser)
        .map(|e| rewrite_urls(e, base))
        .flat_map(|e| highlight(e, phrases));

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn highlight<'a>(event: Event<'a>, phrases: &[String]) -> Vec<Event<'a>> {
    let Event::Text(text) = event else {
        return vec![event];
    };

    let mut out = Vec::new();
    let mut rest: &str = &text;
    while let Some((pos, phrase)) = phrases
        .iter()
        .filter(|p| !p.is_empty())
        .filter_map(|p| rest.find(p.as_str()).map(|i| (i, p)))
        .min_by_key(|(i, p)| (*i, std::cmp::Reverse(p.len())))
    {
        if pos > 0 {
            out.push(Event::Text(CowStr::from(rest[..pos].to_string())));
        }
        out.push(Event::InlineHtml(CowStr::Borrowed("<mark data-highlight>")));
        out.push(Event::Text(CowStr::from(phrase.clone())));
        out.push(Event::InlineHtml(CowStr::Borrowed("</mark>")));
        rest = &rest[pos + phrase.len()..];
    }
    if !rest.is_empty() {
        out.push(Event::Text(CowStr::from(rest.to_string())));
    }
    out
}

/// Root-relative link and image destinations in a markdown source.
pub fn site_refs(source: &str) -> Vec<String> {
    Parser::new_ext(source, options())
        .filter_map(|event| match event {
            Event::Start(Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. })
                if dest_url.starts_with('/') && !dest_url.starts_with("//") =>
            {
                Some(dest_url.into_string())
            }
            _ => None,
        })
        .collect()
}

//! Shared page chrome: `<head>`, navbar and footer.

use std::fmt::Write;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use super::RenderContext;
use crate::content::{ContentRegistry, Link, LinkRole};
use crate::route::CASE_STUDIES;
use crate::utils::html::{escape, escape_attr};

/// Body and metadata of one page.
pub(super) struct Page<'a> {
    /// `None` for the home page, which uses the bare site title.
    pub title: Option<&'a str>,
    pub description: &'a str,
    /// Home page: section links are plain `#id` fragments.
    pub on_root: bool,
    pub main: String,
}

/// Resolved, attribute-escaped href.
pub(super) fn href(ctx: &RenderContext<'_>, url: &str) -> String {
    escape_attr(&ctx.base.resolve(url)).into_owned()
}

/// Bytes that would end or break out of a quoted CSS `url('...')`.
const CSS_URL: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'\\')
    .add(b'<')
    .add(b'>');

/// Resolved URL for a `url('...')` inside a `style` attribute.
pub(super) fn css_url(ctx: &RenderContext<'_>, url: &str) -> String {
    let resolved = ctx.base.resolve(url);
    let encoded = utf8_percent_encode(&resolved, CSS_URL).to_string();
    escape_attr(&encoded).into_owned()
}

/// Link to a home page section.
///
/// `#id` on the home page, `/#id` (resolved) everywhere else.
pub(super) fn section_href(ctx: &RenderContext<'_>, id: &str, on_root: bool) -> String {
    if on_root {
        format!("#{id}")
    } else {
        href(ctx, &format!("/#{id}"))
    }
}

/// A content link as a button. External and download links open in a new tab.
pub(super) fn link_button(out: &mut String, ctx: &RenderContext<'_>, link: &Link) {
    let (class, new_tab) = match link.kind {
        LinkRole::External => ("button external", true),
        LinkRole::Download => ("button download", true),
        LinkRole::Internal => ("button internal", false),
    };
    let target = if new_tab {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    };
    write!(
        out,
        r#"<a class="{class}" href="{}"{target}>{}</a>"#,
        href(ctx, &link.url),
        escape(&link.label)
    )
    .unwrap();
}

pub(super) fn link_row<'l>(
    out: &mut String,
    ctx: &RenderContext<'_>,
    links: impl IntoIterator<Item = &'l Link>,
) {
    let mut links = links.into_iter().peekable();
    if links.peek().is_none() {
        return;
    }
    out.push_str(r#"<div class="links">"#);
    for link in links {
        link_button(out, ctx, link);
    }
    out.push_str("</div>");
}

/// Markdown paragraphs, each rendered on its own.
pub(super) fn paragraphs(
    out: &mut String,
    ctx: &RenderContext<'_>,
    sources: &[String],
    highlights: &[String],
) {
    for source in sources {
        out.push_str(&crate::content::render_highlighted(source, ctx.base, highlights));
    }
}

/// Back link at the top of a detail page.
pub(super) fn back_link(out: &mut String, ctx: &RenderContext<'_>, url: &str, label: &str) {
    write!(
        out,
        r#"<a class="back-link" href="{}"><span aria-hidden="true">&larr;</span> {}</a>"#,
        href(ctx, url),
        escape(label)
    )
    .unwrap();
}

/// Wrap a page body in the full document.
pub(super) fn document(ctx: &RenderContext<'_>, registry: &ContentRegistry, page: &Page<'_>) -> String {
    let mut out = String::with_capacity(page.main.len() + 4096);
    head(&mut out, ctx, page);
    navbar(&mut out, ctx, registry, page.on_root);
    out.push_str(r#"<main class="page">"#);
    out.push_str(&page.main);
    out.push_str("</main>");
    footer(&mut out, ctx, registry, page.on_root);
    write!(
        out,
        r#"<script src="{}" defer></script></body></html>"#,
        href(ctx, &ctx.assets.script)
    )
    .unwrap();
    out.push('\n');
    out
}

fn head(out: &mut String, ctx: &RenderContext<'_>, page: &Page<'_>) {
    let site = ctx.site;
    let title = match page.title {
        Some(title) => format!("{} | {}", title, site.title),
        None => site.title.clone(),
    };
    let description = if page.description.is_empty() {
        site.description.as_str()
    } else {
        page.description
    };

    write!(
        out,
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="{lang}" data-base="{base}" data-prefix-match="{mode}">"#,
            "<head>",
            r#"<meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title}</title>",
            r#"<meta name="description" content="{description}">"#,
            r#"<meta name="author" content="{author}">"#,
            r#"<link rel="stylesheet" href="{style}">"#,
            "</head><body>"
        ),
        lang = escape_attr(&site.language),
        base = escape_attr(ctx.base.as_str()),
        mode = ctx.prefix_match.as_str(),
        title = escape(&title),
        description = escape_attr(description),
        author = escape_attr(&site.author),
        style = href(ctx, &ctx.assets.style),
    )
    .unwrap();
}

fn navbar(out: &mut String, ctx: &RenderContext<'_>, registry: &ContentRegistry, on_root: bool) {
    write!(
        out,
        r#"<header class="navbar"><nav><a class="brand" href="{}">{}</a><ul>"#,
        href(ctx, "/"),
        escape(&ctx.site.title)
    )
    .unwrap();

    let mut item = |url: String, label: &str| {
        write!(out, r#"<li><a href="{url}">{label}</a></li>"#).unwrap();
    };
    item(section_href(ctx, "about", on_root), "About");
    if !registry.profile.education.is_empty() {
        item(section_href(ctx, "education", on_root), "Education");
    }
    item(section_href(ctx, "projects", on_root), "Projects");
    if registry.profile.domain.is_some() {
        item(section_href(ctx, "domain", on_root), "Domain Description");
    }
    item(href(ctx, CASE_STUDIES), "Case Studies");
    item(section_href(ctx, "contact", on_root), "Contact");

    out.push_str("</ul></nav></header>");
}

fn footer(out: &mut String, ctx: &RenderContext<'_>, registry: &ContentRegistry, on_root: bool) {
    let profile = &registry.profile;
    out.push_str(r#"<footer class="footer"><div class="footer-grid">"#);

    write!(
        out,
        concat!(
            r#"<div><h3>Quick Links</h3><ul>"#,
            r#"<li><a href="{home}">Home</a></li>"#,
            r#"<li><a href="{studies}">Case Studies</a></li>"#,
            r#"<li><a href="{about}">About</a></li>"#,
            r#"<li><a href="{contact}">Contact</a></li>"#,
            "</ul></div>"
        ),
        home = href(ctx, "/"),
        studies = href(ctx, CASE_STUDIES),
        about = section_href(ctx, "about", on_root),
        contact = section_href(ctx, "contact", on_root),
    )
    .unwrap();

    write!(
        out,
        r#"<div><h3>Contact</h3><ul><li><a href="mailto:{}">{}</a></li></ul></div>"#,
        escape_attr(&profile.contact.email),
        escape(&profile.contact.email)
    )
    .unwrap();

    if !profile.social.is_empty() {
        out.push_str("<div><h3>Connect</h3><ul>");
        for social in &profile.social {
            write!(
                out,
                r#"<li><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></li>"#,
                href(ctx, &social.url),
                escape(&social.label)
            )
            .unwrap();
        }
        out.push_str("</ul></div>");
    }

    if !ctx.site.description.is_empty() {
        write!(
            out,
            "<div><h3>About</h3><p>{}</p></div>",
            escape(&ctx.site.description)
        )
        .unwrap();
    }

    write!(
        out,
        r#"</div><p class="copyright">&copy; {} {}. All rights reserved.</p></footer>"#,
        ctx.site.year,
        escape(&ctx.site.author)
    )
    .unwrap();
}

//! Case study index and case study pages.

use std::fmt::Write;

use super::RenderContext;
use super::layout::{self, Page, css_url, href};
use crate::content::{CaseStudy, ContentRegistry};
use crate::route::CASE_STUDIES;
use crate::utils::html::{escape, escape_attr};

/// Entrance animation step between consecutive index cards.
const STAGGER_MS: usize = 100;

pub(super) fn render_index(registry: &ContentRegistry, ctx: &RenderContext<'_>) -> String {
    let intro = &registry.intro;
    let mut main = String::with_capacity(8 * 1024);

    main.push_str(r#"<section class="banner""#);
    if let Some(banner) = &intro.banner {
        write!(
            main,
            r#" style="background-image: url('{}')""#,
            css_url(ctx, banner)
        )
        .unwrap();
    }
    write!(main, "><h1>{}</h1>", escape(&intro.title)).unwrap();
    if let Some(credit) = &intro.banner_credit {
        write!(main, r#"<p class="banner-credit">{}</p>"#, escape(credit)).unwrap();
    }
    main.push_str("</section>");

    if !intro.paragraphs.is_empty() {
        main.push_str(r#"<section class="intro prose" data-reveal>"#);
        layout::paragraphs(&mut main, ctx, &intro.paragraphs, &[]);
        main.push_str("</section>");
    }

    main.push_str(r#"<section class="case-study-grid">"#);
    for (i, study) in registry.case_studies().enumerate() {
        write!(
            main,
            concat!(
                r#"<a class="card case-study-card" href="{href}" data-reveal style="animation-delay: {delay}ms">"#,
                "<h2>{title}</h2><p>{description}</p>",
                r#"<span class="read-more">Read case study &rarr;</span></a>"#
            ),
            href = href(ctx, &format!("{CASE_STUDIES}{}/", study.slug)),
            delay = i * STAGGER_MS,
            title = escape(&study.record.title),
            description = escape(&study.record.description),
        )
        .unwrap();
    }
    main.push_str("</section>");

    layout::document(
        ctx,
        registry,
        &Page {
            title: Some(&intro.title),
            description: "",
            on_root: false,
            main,
        },
    )
}

pub(super) fn render(study: &CaseStudy, registry: &ContentRegistry, ctx: &RenderContext<'_>) -> String {
    let record = &study.record;
    let mut main = String::with_capacity(study.body.source.len() * 2 + 2048);

    main.push_str(r#"<article class="case-study">"#);
    layout::back_link(&mut main, ctx, CASE_STUDIES, "Back to Case Studies");
    write!(
        main,
        r#"<header class="page-header"><h1>{}</h1><p class="lead">{}</p></header>"#,
        escape(&record.title),
        escape(&record.description)
    )
    .unwrap();
    layout::link_row(&mut main, ctx, &record.links);
    write!(main, r#"<div class="prose">{}</div>"#, study.body.render(ctx.base)).unwrap();

    if !study.code.is_empty() {
        main.push_str(r#"<section class="code-listings"><h2>Code</h2><ul>"#);
        for listing in &study.code {
            write!(
                main,
                r#"<li><a href="{}" download="{}">{}</a></li>"#,
                href(ctx, &listing.url),
                escape_attr(&listing.name),
                escape(&listing.name)
            )
            .unwrap();
        }
        main.push_str("</ul></section>");
    }

    if !study.references.is_empty() {
        main.push_str(r#"<details class="references"><summary><h2>References</h2></summary><ol>"#);
        for reference in &study.references {
            write!(main, "<li>{}</li>", escape(reference)).unwrap();
        }
        main.push_str("</ol></details>");
    }
    main.push_str("</article>");

    layout::document(
        ctx,
        registry,
        &Page {
            title: Some(&record.title),
            description: &record.description,
            on_root: false,
            main,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixture::{fixture, load_fixture};
    use crate::core::{BasePath, PrefixMatch};
    use crate::render::tests::{assets, site};

    #[test]
    fn test_index_lists_visible_studies_with_stagger() {
        let dir = fixture();
        let registry = load_fixture(&dir).unwrap();
        let base = BasePath::new("/portfolio");
        let (site, assets) = (site(), assets());
        let ctx = RenderContext {
            base: &base,
            site: &site,
            assets: &assets,
            prefix_match: PrefixMatch::Segment,
        };
        let html = render_index(&registry, &ctx);

        assert!(html.contains(r#"href="/portfolio/case-studies/kd-trees/" data-reveal style="animation-delay: 0ms""#));
        assert!(html.contains(r#"href="/portfolio/case-studies/xcode-build/" data-reveal style="animation-delay: 100ms""#));
        assert!(!html.contains("icloud-sync"));
        // navbar sections point back at the home page
        assert!(html.contains(r#"<a href="/portfolio/#about">About</a>"#));
    }

    #[test]
    fn test_case_study_page() {
        let dir = fixture();
        let registry = load_fixture(&dir).unwrap();
        let base = BasePath::root();
        let (site, assets) = (site(), assets());
        let ctx = RenderContext {
            base: &base,
            site: &site,
            assets: &assets,
            prefix_match: PrefixMatch::Segment,
        };

        let kd = registry.case_study("kd-trees").unwrap();
        let html = render(kd, &registry, &ctx);
        assert!(html.contains(r#"<a class="back-link" href="/case-studies/">"#));
        assert!(html.contains(">View on GitHub</a>"));
        assert!(!html.contains(">View Paper</a>"));
        assert!(html.contains(r#"<a href="/codes/kd-trees/kd-heap.py" download="kd-heap.py">kd-heap.py</a>"#));
        assert!(html.contains(r#"<details class="references">"#));
        assert!(html.contains("<title>Kd-trees in Recognition | Jane Doe</title>"));

        let xcode = registry.case_study("xcode-build").unwrap();
        let html = render(xcode, &registry, &ctx);
        assert!(!html.contains("<details"));
        assert!(!html.contains("code-listings"));
        assert!(!html.contains(r#"<div class="links">"#));
    }

    #[test]
    fn test_banner_url_cannot_close_css_url() {
        let dir = fixture();
        let mut registry = load_fixture(&dir).unwrap();
        registry.intro.banner = Some("/image/it's (new).jpg".to_string());
        let base = BasePath::new("/portfolio");
        let (site, assets) = (site(), assets());
        let ctx = RenderContext {
            base: &base,
            site: &site,
            assets: &assets,
            prefix_match: PrefixMatch::Segment,
        };
        let html = render_index(&registry, &ctx);

        assert!(html.contains(
            r#"style="background-image: url('/portfolio/image/it%27s%20%28new%29.jpg')""#
        ));
    }
}

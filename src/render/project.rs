//! Project detail pages and the not-found page.

use std::fmt::Write;

use super::RenderContext;
use super::layout::{self, Page, href};
use crate::content::{ContentRegistry, LinkRole, Project};
use crate::utils::html::{escape, escape_attr};

pub(super) fn render(project: &Project, registry: &ContentRegistry, ctx: &RenderContext<'_>) -> String {
    let record = &project.record;
    let mut main = String::with_capacity(4096);

    main.push_str(r#"<article class="project">"#);
    layout::back_link(&mut main, ctx, "/", "Back to Home");
    write!(
        main,
        r#"<header class="page-header"><h1>{}</h1><p class="lead">{}</p></header>"#,
        escape(&record.title),
        escape(&record.description)
    )
    .unwrap();
    if let Some(media) = &record.media_path {
        write!(
            main,
            r#"<img class="hero" src="{}" alt="{}">"#,
            href(ctx, media),
            escape_attr(&record.title)
        )
        .unwrap();
    }
    // The card's "Details" link points at this page.
    layout::link_row(
        &mut main,
        ctx,
        record.links.iter().filter(|l| l.kind != LinkRole::Internal),
    );
    if let Some(body) = &project.body {
        write!(main, r#"<div class="prose">{}</div>"#, body.render(ctx.base)).unwrap();
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

pub(super) fn render_not_found(registry: &ContentRegistry, ctx: &RenderContext<'_>) -> String {
    let mut main = String::new();
    main.push_str(r#"<section class="not-found"><h1>Page not found</h1><p>The page you are looking for does not exist or has moved.</p>"#);
    layout::back_link(&mut main, ctx, "/", "Back to Home");
    main.push_str("</section>");

    layout::document(
        ctx,
        registry,
        &Page {
            title: Some("Page not found"),
            description: "",
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
    fn test_project_page() {
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

        let cevi = registry.project("CEVI").unwrap();
        let html = render(cevi, &registry, &ctx);
        assert!(html.contains(r#"<a class="back-link" href="/portfolio/">"#));
        assert!(html.contains(r#"<img class="hero" src="/portfolio/projects/CEVI.jpg""#));
        assert!(html.contains(r#"href="/portfolio/Mini_Project_Report.pdf""#));
        assert!(!html.contains(">Details</a>"));
        // markdown body links are resolved too
        assert!(html.contains(r#"<img src="/portfolio/projects/CEVI.jpg" alt="patches""#));
    }

    #[test]
    fn test_not_found_page() {
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
        let html = render_not_found(&registry, &ctx);
        assert!(html.contains("<h1>Page not found</h1>"));
        assert!(html.contains(r#"<a class="back-link" href="/">"#));
    }
}

//! Home page: About, Education, Projects, Domain Description, Contact.

use std::fmt::Write;

use super::RenderContext;
use super::layout::{self, Page, href};
use crate::content::{ContentRegistry, Link, Project};
use crate::utils::html::{escape, escape_attr};

/// Ids of the fixed home page sections, the navbar's anchor targets.
const SECTION_IDS: &[&str] = &["about", "education", "projects", "domain", "contact"];

pub(super) fn render(registry: &ContentRegistry, ctx: &RenderContext<'_>) -> String {
    let mut main = String::with_capacity(16 * 1024);
    about(&mut main, registry, ctx);
    education(&mut main, registry);
    projects(&mut main, registry, ctx);
    domain(&mut main, registry, ctx);
    contact(&mut main, registry);

    layout::document(
        ctx,
        registry,
        &Page {
            title: None,
            description: "",
            on_root: true,
            main,
        },
    )
}

fn about(out: &mut String, registry: &ContentRegistry, ctx: &RenderContext<'_>) {
    let about = &registry.profile.about;
    write!(
        out,
        r#"<section id="about" class="about" data-reveal><div class="about-text"><h1>Hi, I'm {}</h1>"#,
        escape(&about.name)
    )
    .unwrap();
    if let Some(location) = &about.location {
        write!(out, r#"<p class="location">{}</p>"#, escape(location)).unwrap();
    }
    layout::paragraphs(out, ctx, &about.paragraphs, &about.highlights);

    let links: Vec<Link> = about
        .github
        .iter()
        .map(|url| Link::external("GitHub", url))
        .chain(about.resume.iter().map(|url| Link::download("Download CV", url)))
        .collect();
    layout::link_row(out, ctx, &links);
    out.push_str("</div>");

    if let Some(portrait) = &about.portrait {
        write!(
            out,
            r#"<img class="portrait" src="{}" alt="{}">"#,
            href(ctx, portrait),
            escape_attr(&about.name)
        )
        .unwrap();
    }
    out.push_str("</section>");
}

fn education(out: &mut String, registry: &ContentRegistry) {
    let entries = &registry.profile.education;
    if entries.is_empty() {
        return;
    }

    out.push_str(r#"<section id="education" class="education" data-reveal><h2>Education</h2><ol class="education-list">"#);
    for entry in entries {
        write!(
            out,
            r#"<li class="education-entry"><h3>{}</h3><p class="institution">{}</p>"#,
            escape(&entry.degree),
            escape(&entry.institution)
        )
        .unwrap();
        if let Some(period) = &entry.period {
            write!(out, r#"<p class="period">{}</p>"#, escape(period)).unwrap();
        }
        if !entry.details.is_empty() {
            out.push_str("<ul>");
            for detail in &entry.details {
                write!(out, "<li>{}</li>", escape(detail)).unwrap();
            }
            out.push_str("</ul>");
        }
        out.push_str("</li>");
    }
    out.push_str("</ol></section>");
}

fn projects(out: &mut String, registry: &ContentRegistry, ctx: &RenderContext<'_>) {
    out.push_str(r#"<section id="projects" class="projects" data-reveal><h2>Projects</h2><div class="project-grid">"#);
    for project in &registry.projects {
        project_card(out, project, ctx);
    }
    out.push_str("</div></section>");
}

fn project_card(out: &mut String, project: &Project, ctx: &RenderContext<'_>) {
    let record = &project.record;
    out.push_str(r#"<article class="card project-card">"#);
    if let Some(media) = &record.media_path {
        write!(
            out,
            r#"<img class="card-media" src="{}" alt="{}" loading="lazy">"#,
            href(ctx, media),
            escape_attr(&record.title)
        )
        .unwrap();
    }
    write!(
        out,
        r#"<div class="card-body"><h3>{}</h3><p>{}</p>"#,
        escape(&record.title),
        escape(&record.description)
    )
    .unwrap();
    layout::link_row(out, ctx, &record.links);
    out.push_str("</div></article>");
}

fn domain(out: &mut String, registry: &ContentRegistry, ctx: &RenderContext<'_>) {
    let Some(domain) = &registry.profile.domain else {
        return;
    };
    write!(
        out,
        r#"<section id="domain" class="domain" data-reveal><h2>{}</h2><div class="prose">{}</div></section>"#,
        escape(&domain.title),
        domain.body.render_with_reserved(ctx.base, SECTION_IDS)
    )
    .unwrap();
}

fn contact(out: &mut String, registry: &ContentRegistry) {
    let contact = &registry.profile.contact;
    write!(
        out,
        r#"<section id="contact" class="contact" data-reveal><h2>{}</h2>"#,
        escape(&contact.heading)
    )
    .unwrap();
    if !contact.message.is_empty() {
        write!(out, "<p>{}</p>", escape(&contact.message)).unwrap();
    }
    write!(
        out,
        r#"<p>Feel free to reach out via email: <a class="mail" href="mailto:{}">{}</a></p></section>"#,
        escape_attr(&contact.email),
        escape(&contact.email)
    )
    .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixture::{fixture, load_fixture};
    use crate::core::{BasePath, PrefixMatch};
    use crate::render::tests::{assets, site};

    fn render_home(registry: &ContentRegistry) -> String {
        let base = BasePath::root();
        let (site, assets) = (site(), assets());
        let ctx = RenderContext {
            base: &base,
            site: &site,
            assets: &assets,
            prefix_match: PrefixMatch::Segment,
        };
        render(registry, &ctx)
    }

    #[test]
    fn test_home_structure() {
        let dir = fixture();
        let registry = load_fixture(&dir).unwrap();
        let html = render_home(&registry);

        assert_eq!(html.matches(r#"<section id="about""#).count(), 1);
        assert_eq!(html.matches(r#"<ol class="education-list">"#).count(), 1);
        assert_eq!(html.matches(r#"<div class="project-grid">"#).count(), 1);
        assert_eq!(html.matches(r#"<section id="contact""#).count(), 1);
        assert_eq!(
            html.matches(r#"<a class="mail" href="mailto:jane@example.com">"#).count(),
            1
        );

        // one card per project, in input order
        assert_eq!(html.matches(r#"<article class="card project-card">"#).count(), 2);
        let first = html.find("Underwater Image Restoration").unwrap();
        let second = html.find("Optical Flow Vehicle Tracking").unwrap();
        assert!(first < second);

        // education in input order
        let bachelor = html.find("Bachelor of Engineering").unwrap();
        let school = html.find("Higher Secondary Graduation").unwrap();
        assert!(bachelor < school);
    }

    #[test]
    fn test_highlights_marked() {
        let dir = fixture();
        let registry = load_fixture(&dir).unwrap();
        let html = render_home(&registry);
        assert!(html.contains("<mark data-highlight>computer vision</mark>"));
    }

    #[test]
    fn test_optional_links_omitted() {
        let dir = fixture();
        let registry = load_fixture(&dir).unwrap();
        let html = render_home(&registry);

        // The first project has no repository, so only the second card links to code.
        assert_eq!(html.matches(">View Code</a>").count(), 1);
        assert_eq!(html.matches(">View Paper</a>").count(), 2);
        assert_eq!(html.matches(r#"href="/CEVI/""#).count(), 1);
    }

    #[test]
    fn test_card_without_media_or_links() {
        let dir = fixture();
        let mut registry = load_fixture(&dir).unwrap();
        registry.projects[1].record.media_path = None;
        registry.projects[1].record.links.clear();
        let html = render_home(&registry);
        assert_eq!(html.matches(r#"<img class="card-media""#).count(), 1);
        assert!(!html.contains("Optical Flow Vehicle Tracking</h3><p>Lucas-Kanade with motion saliency.</p><div"));
    }

    #[test]
    fn test_domain_heading_does_not_shadow_sections() {
        let dir = fixture();
        std::fs::write(dir.path().join("content/domain.md"), "## Contact\n\nSilicon.\n").unwrap();
        let registry = load_fixture(&dir).unwrap();
        let html = render_home(&registry);

        for id in SECTION_IDS {
            assert!(html.matches(&format!(r#"id="{id}""#)).count() <= 1, "duplicate id `{id}`");
        }
        assert!(html.contains(r#"<h2 id="contact-1">Contact</h2>"#));

        // the navbar link lands on the Contact section, after the domain heading
        let doc = crate::nav::StaticDocument::parse("/", &html).unwrap();
        assert!(doc.duplicate_ids().is_empty());
        let heading = html.find(r#"id="contact-1""#).unwrap();
        let section = html.find(r#"<section id="contact""#).unwrap();
        assert!(heading < section);
    }

    #[test]
    fn test_domain_section() {
        let dir = fixture();
        let registry = load_fixture(&dir).unwrap();
        let html = render_home(&registry);
        assert!(html.contains(r#"<section id="domain""#));
        assert!(html.contains(r#"<h2 id="hardware">Hardware</h2>"#));
        assert!(html.contains(r##"<a href="#domain">Domain Description</a>"##));
    }
}

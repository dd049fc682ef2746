//! Navigation controller.
//!
//! Intercepts clicks on in-page anchor links and turns them into a scroll
//! to `target offset - header offset`. The same state machine runs in the
//! browser as the embedded `nav.js`; here it drives [`StaticDocument`] for
//! anchor validation and is the reference the script is tested against.
//!
//! ```text
//!            click(#x), target found
//!   Idle ───────────────────────────────► Scrolling { target_y }
//!    ▲                                       │  │
//!    │             scroll_end                │  │ click(#y): last writer wins
//!    └───────────────────────────────────────┘  └──► Scrolling { y' }
//! ```
//!
//! A click whose target does not exist changes nothing and lets the host
//! follow the link normally.

mod document;

pub use document::StaticDocument;

use crate::config::section::NavConfig;
use crate::core::{BasePath, NavigationLink, PrefixMatch};

/// Event the controller listens for.
pub const CLICK: &str = "click";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Explicit subscribe/unsubscribe registry, one per document.
#[derive(Debug, Default)]
pub struct Listeners {
    next: u64,
    active: Vec<(ListenerId, &'static str)>,
}

impl Listeners {
    pub fn subscribe(&mut self, event: &'static str) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.active.push((id, event));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.active.len();
        self.active.retain(|(active, _)| *active != id);
        self.active.len() != before
    }

    #[cfg(test)]
    pub fn count(&self, event: &str) -> usize {
        self.active.iter().filter(|(_, e)| *e == event).count()
    }
}

/// The page the controller is mounted on.
pub trait Host {
    /// Path of the loaded page, including any deployment prefix.
    fn current_path(&self) -> &str;

    /// Document offset of the element with `id`, if present.
    fn target_offset(&self, id: &str) -> Option<f64>;

    /// Start scrolling. Must not block.
    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior);

    fn scroll_behavior(&self) -> ScrollBehavior;

    fn set_scroll_behavior(&mut self, behavior: ScrollBehavior);

    fn listeners(&mut self) -> &mut Listeners;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavState {
    Idle,
    Scrolling { target_y: f64 },
}

/// What the host should do with a click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Not an in-page anchor. Follow the link.
    Ignored,
    /// Anchor without a matching element. Follow the link.
    Missing,
    /// Default prevented, scrolling to `target_y`.
    Scrolled { target_y: f64 },
}

#[derive(Debug, Clone)]
pub struct NavSettings {
    pub header_offset: f64,
    pub smooth: bool,
    /// Configured deployment prefix, detected against the page path on mount.
    pub prefix: BasePath,
    pub prefix_match: PrefixMatch,
}

impl NavSettings {
    pub fn from_config(nav: &NavConfig, prefix: BasePath) -> Self {
        Self {
            header_offset: f64::from(nav.header_offset),
            smooth: nav.smooth,
            prefix,
            prefix_match: nav.prefix_match,
        }
    }
}

#[derive(Debug)]
pub struct NavigationController {
    settings: NavSettings,
    state: NavState,
}

impl NavigationController {
    pub fn new(settings: NavSettings) -> Self {
        Self {
            settings,
            state: NavState::Idle,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    /// Attach to a page.
    ///
    /// Registers the click listener and switches the page to smooth
    /// scrolling. Both are undone when the returned guard is dropped.
    pub fn mount<'a, H: Host>(&'a mut self, host: &'a mut H) -> Mounted<'a, H> {
        let previous = host.scroll_behavior();
        if self.settings.smooth {
            host.set_scroll_behavior(ScrollBehavior::Smooth);
        }
        let listener = host.listeners().subscribe(CLICK);
        let base = BasePath::detect(
            host.current_path(),
            self.settings.prefix.as_str(),
            self.settings.prefix_match,
        );
        crate::debug!("nav"; "mounted on {} (prefix `{}`)", host.current_path(), base);

        Mounted {
            controller: self,
            host,
            listener,
            previous,
            base,
        }
    }
}

/// A controller attached to a host. Dropping it detaches.
pub struct Mounted<'a, H: Host> {
    controller: &'a mut NavigationController,
    host: &'a mut H,
    listener: ListenerId,
    previous: ScrollBehavior,
    base: BasePath,
}

impl<H: Host> Mounted<'_, H> {
    /// Prefix detected for the mounted page.
    pub fn base(&self) -> &BasePath {
        &self.base
    }

    pub fn state(&self) -> NavState {
        self.controller.state
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        self.host
    }

    fn on_root(&self) -> bool {
        let path = self.host.current_path();
        matches!(
            self.base.strip(path).unwrap_or(path),
            "/" | "" | "/index.html"
        )
    }

    pub fn click(&mut self, href: &str) -> ClickOutcome {
        let link = NavigationLink::parse(href, &self.base);
        let Some(id) = link.in_page_target(self.on_root()) else {
            return ClickOutcome::Ignored;
        };
        let Some(offset) = self.host.target_offset(id) else {
            return ClickOutcome::Missing;
        };

        let settings = &self.controller.settings;
        let target_y = offset - settings.header_offset;
        let behavior = if settings.smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Auto
        };
        self.controller.state = NavState::Scrolling { target_y };
        self.host.scroll_to(target_y, behavior);
        ClickOutcome::Scrolled { target_y }
    }

    /// The host finished (or abandoned) the current scroll.
    pub fn scroll_end(&mut self) {
        self.controller.state = NavState::Idle;
    }
}

impl<H: Host> Drop for Mounted<'_, H> {
    fn drop(&mut self) {
        self.host.listeners().unsubscribe(self.listener);
        self.host.set_scroll_behavior(self.previous);
        self.controller.state = NavState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[derive(Default)]
    struct FakePage {
        path: String,
        targets: FxHashMap<String, f64>,
        behavior: ScrollBehavior,
        scrolls: Vec<(f64, ScrollBehavior)>,
        listeners: Listeners,
    }

    impl FakePage {
        fn new(path: &str, targets: &[(&str, f64)]) -> Self {
            Self {
                path: path.into(),
                targets: targets.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
                ..Self::default()
            }
        }
    }

    impl Host for FakePage {
        fn current_path(&self) -> &str {
            &self.path
        }
        fn target_offset(&self, id: &str) -> Option<f64> {
            self.targets.get(id).copied()
        }
        fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
            self.scrolls.push((y, behavior));
        }
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

    fn settings(prefix: &str) -> NavSettings {
        NavSettings {
            header_offset: 80.0,
            smooth: true,
            prefix: BasePath::new(prefix),
            prefix_match: PrefixMatch::Segment,
        }
    }

    #[test]
    fn test_click_scrolls_below_header() {
        let mut page = FakePage::new("/", &[("projects", 1200.0)]);
        let mut nav = NavigationController::new(settings(""));
        {
            let mut mounted = nav.mount(&mut page);
            assert_eq!(
                mounted.click("#projects"),
                ClickOutcome::Scrolled { target_y: 1120.0 }
            );
            assert_eq!(mounted.state(), NavState::Scrolling { target_y: 1120.0 });
            mounted.scroll_end();
            assert_eq!(mounted.state(), NavState::Idle);
        }
        assert_eq!(page.scrolls, [(1120.0, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut page = FakePage::new("/", &[("about", 0.0)]);
        let mut nav = NavigationController::new(settings(""));
        let mut mounted = nav.mount(&mut page);
        assert_eq!(mounted.click("#nowhere"), ClickOutcome::Missing);
        assert_eq!(mounted.state(), NavState::Idle);
        assert!(mounted.host().scrolls.is_empty());
    }

    #[test]
    fn test_last_click_wins() {
        let mut page = FakePage::new("/", &[("about", 100.0), ("contact", 3000.0)]);
        let mut nav = NavigationController::new(settings(""));
        let mut mounted = nav.mount(&mut page);
        mounted.click("#about");
        mounted.click("#contact");
        assert_eq!(mounted.state(), NavState::Scrolling { target_y: 2920.0 });

        // a missing target while scrolling keeps the current scroll
        assert_eq!(mounted.click("#gone"), ClickOutcome::Missing);
        assert_eq!(mounted.state(), NavState::Scrolling { target_y: 2920.0 });
    }

    #[test]
    fn test_root_anchor_only_on_root_page() {
        let mut home = FakePage::new("/portfolio/", &[("contact", 500.0)]);
        let mut nav = NavigationController::new(settings("/portfolio"));
        {
            let mut mounted = nav.mount(&mut home);
            assert_eq!(mounted.base().as_str(), "/portfolio");
            assert_eq!(
                mounted.click("/portfolio/#contact"),
                ClickOutcome::Scrolled { target_y: 420.0 }
            );
        }

        let mut study = FakePage::new("/portfolio/case-studies/kd-trees/", &[("contact", 500.0)]);
        let mut mounted = nav.mount(&mut study);
        assert_eq!(mounted.click("/portfolio/#contact"), ClickOutcome::Ignored);
        assert_eq!(mounted.click("#contact"), ClickOutcome::Scrolled { target_y: 420.0 });
    }

    #[test]
    fn test_non_anchor_links_ignored() {
        let mut page = FakePage::new("/", &[("x", 0.0)]);
        let mut nav = NavigationController::new(settings(""));
        let mut mounted = nav.mount(&mut page);
        assert_eq!(mounted.click("https://github.com/x#x"), ClickOutcome::Ignored);
        assert_eq!(mounted.click("/case-studies/"), ClickOutcome::Ignored);
        assert_eq!(mounted.click("mailto:jane@example.com"), ClickOutcome::Ignored);
        assert_eq!(mounted.click("#"), ClickOutcome::Ignored);
    }

    #[test]
    fn test_mount_unmount_cycles_leave_no_handlers() {
        let mut page = FakePage::new("/", &[]);
        let mut nav = NavigationController::new(settings(""));

        for _ in 0..2 {
            let mut mounted = nav.mount(&mut page);
            assert_eq!(mounted.host.listeners().count(CLICK), 1);
            assert_eq!(mounted.host().behavior, ScrollBehavior::Smooth);
        }
        assert_eq!(page.listeners.count(CLICK), 0);
        assert_eq!(page.behavior, ScrollBehavior::Auto);
    }

    #[test]
    fn test_unmount_restores_previous_behavior() {
        let mut page = FakePage::new("/", &[]);
        page.behavior = ScrollBehavior::Smooth;
        let mut nav = NavigationController::new(NavSettings {
            smooth: false,
            ..settings("")
        });
        drop(nav.mount(&mut page));
        assert_eq!(page.behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn test_unmount_during_scroll_returns_to_idle() {
        let mut page = FakePage::new("/", &[("about", 300.0)]);
        let mut nav = NavigationController::new(settings(""));
        nav.mount(&mut page).click("#about");
        assert_eq!(nav.state(), NavState::Idle);
    }

    #[test]
    fn test_listeners() {
        let mut listeners = Listeners::default();
        let a = listeners.subscribe(CLICK);
        let b = listeners.subscribe("scroll");
        assert_ne!(a, b);
        assert_eq!(listeners.count(CLICK), 1);
        assert!(listeners.unsubscribe(a));
        assert!(!listeners.unsubscribe(a));
        assert_eq!(listeners.count(CLICK), 0);
        assert_eq!(listeners.count("scroll"), 1);
    }
}

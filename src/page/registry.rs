use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Top-level pages of the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    RoutePlanner,
    Traffic,
    About,
}

impl PageId {
    pub const ALL: [PageId; 3] = [PageId::RoutePlanner, PageId::Traffic, PageId::About];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::RoutePlanner => "route-planner",
            PageId::Traffic => "traffic",
            PageId::About => "about",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PageId::RoutePlanner => "Route Planner",
            PageId::Traffic => "Traffic",
            PageId::About => "About",
        }
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PageId::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| Error::Config(format!("unknown page '{s}'")))
    }
}

/// A page container and whether it is currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: PageId,
    pub visible: bool,
}

/// A navigation link pointing at a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub target: PageId,
    pub label: String,
    pub active: bool,
}

/// Tracks which page is visible and which navigation link is highlighted
#[derive(Debug, Clone)]
pub struct ViewRegistry {
    pages: Vec<Page>,
    links: Vec<NavLink>,
}

impl ViewRegistry {
    /// Registers `pages` (with one link each) and shows the first one
    pub fn new(pages: &[PageId]) -> Self {
        let mut registry = Self {
            pages: pages
                .iter()
                .map(|&id| Page { id, visible: false })
                .collect(),
            links: pages
                .iter()
                .map(|&target| NavLink {
                    target,
                    label: target.title().to_string(),
                    active: false,
                })
                .collect(),
        };
        if let Some(home) = pages.first() {
            registry.show_page(*home);
        }
        registry
    }

    /// Adds a link whose target may or may not be a registered page
    pub fn with_link(mut self, target: PageId, label: impl Into<String>) -> Self {
        self.links.push(NavLink {
            target,
            label: label.into(),
            active: false,
        });
        self
    }

    /// Shows `page_id` and highlights its links.
    ///
    /// An unregistered page leaves the current page visible. Links are
    /// always recomputed, so a link still matches only if it targets
    /// `page_id`. Returns whether the visible page switched to `page_id`.
    pub fn show_page(&mut self, page_id: PageId) -> bool {
        let registered = self.is_registered(page_id);
        if registered {
            for page in &mut self.pages {
                page.visible = page.id == page_id;
            }
        } else {
            log::warn!("page '{page_id}' is not registered; keeping current page");
        }

        for link in &mut self.links {
            link.active = link.target == page_id;
        }

        log::debug!("show page '{page_id}' (registered: {registered})");
        registered
    }

    /// The visible page, if any
    pub fn visible_page(&self) -> Option<PageId> {
        self.pages.iter().find(|page| page.visible).map(|page| page.id)
    }

    pub fn is_registered(&self, page_id: PageId) -> bool {
        self.pages.iter().any(|page| page.id == page_id)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn active_links(&self) -> impl Iterator<Item = &NavLink> {
        self.links.iter().filter(|link| link.active)
    }
}

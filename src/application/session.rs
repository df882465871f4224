//! Explorer session: cursor and carousel page held together.
//!
//! The page index belongs to the entries of the node under the cursor. Any
//! transition that lands on a different node resets it to the first page.

use std::sync::Arc;

use tracing::debug;

use crate::application::navigation::{Entry, Navigator};
use crate::application::pagination::Carousel;
use crate::domain::{CatalogTree, SiblingOrder};

/// Snapshot of what a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub path: Vec<String>,
    /// Current page, padded when the entries span several pages
    pub slots: Vec<Option<Entry>>,
    pub total_entries: usize,
    pub page: usize,
    pub page_count: usize,
    pub can_go_up: bool,
    pub can_go_to_prev: bool,
    pub can_go_to_next: bool,
    pub can_page_left: bool,
    pub can_page_right: bool,
}

#[derive(Debug, Clone)]
pub struct ExplorerSession {
    navigator: Navigator,
    carousel: Carousel,
}

impl ExplorerSession {
    pub fn new(tree: Arc<CatalogTree>, order: SiblingOrder, page_size: usize) -> Self {
        Self {
            navigator: Navigator::new(tree, order),
            carousel: Carousel::new(page_size),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn push(&mut self, name: &str) -> bool {
        self.transition(|nav| nav.push(name))
    }

    pub fn up(&mut self) -> bool {
        self.transition(Navigator::up)
    }

    pub fn prev(&mut self) -> bool {
        self.transition(Navigator::prev)
    }

    pub fn next(&mut self) -> bool {
        self.transition(Navigator::next)
    }

    pub fn reset(&mut self) -> bool {
        self.transition(Navigator::reset)
    }

    pub fn set_path(&mut self, path: Vec<String>) -> bool {
        self.transition(|nav| nav.set_path(path))
    }

    pub fn page_left(&mut self) -> bool {
        let len = self.navigator.entries().len();
        self.carousel.page_left(len)
    }

    pub fn page_right(&mut self) -> bool {
        let len = self.navigator.entries().len();
        self.carousel.page_right(len)
    }

    pub fn view(&self) -> View {
        let entries = self.navigator.entries();
        let len = entries.len();
        View {
            path: self.navigator.path().to_vec(),
            slots: self
                .carousel
                .slots(&entries)
                .into_iter()
                .map(|slot| slot.cloned())
                .collect(),
            total_entries: len,
            page: self.carousel.current_page(),
            page_count: self.carousel.page_count(len),
            can_go_up: self.navigator.can_go_up(),
            can_go_to_prev: self.navigator.can_go_to_prev(),
            can_go_to_next: self.navigator.can_go_to_next(),
            can_page_left: self.carousel.can_page_left(len),
            can_page_right: self.carousel.can_page_right(len),
        }
    }

    fn transition<F>(&mut self, apply: F) -> bool
    where
        F: FnOnce(&mut Navigator) -> bool,
    {
        let before = self.navigator.node_index();
        let moved = apply(&mut self.navigator);
        if self.navigator.node_index() != before {
            debug!("resolved node changed, carousel back to first page");
            self.carousel.reset();
        }
        moved
    }
}

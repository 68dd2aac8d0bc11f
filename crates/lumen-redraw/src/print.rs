//! Paged output state.
//!
//! When printing, each page is one redraw pass whose clip ends at the
//! page bottom. A small box that would be cut by the page edge is held
//! back so it can start the next page instead; the topmost such box
//! tells the print driver where that page should begin. Boxes fully above
//! the page edge are recorded as printed and skipped on later pages.

use std::collections::HashSet;

use crate::boxes::BoxId;

/// Print state carried across the pages of one print job.
#[derive(Debug, Clone, Default)]
pub struct PrintSession {
    page_bottom: i32,
    top_cropped: Option<i32>,
    printed: HashSet<BoxId>,
}

impl PrintSession {
    /// Start a print job whose first page ends at `page_bottom` (device
    /// pixels, same space as the redraw clip).
    pub fn new(page_bottom: i32) -> Self {
        Self {
            page_bottom,
            top_cropped: None,
            printed: HashSet::new(),
        }
    }

    /// Prepare for the next page. Printed boxes are kept.
    pub fn begin_page(&mut self, page_bottom: i32) {
        self.page_bottom = page_bottom;
        self.top_cropped = None;
    }

    pub fn page_bottom(&self) -> i32 {
        self.page_bottom
    }

    /// Top of the highest box deferred to the next page on this pass.
    pub fn top_cropped(&self) -> Option<i32> {
        self.top_cropped
    }

    pub fn is_printed(&self, id: BoxId) -> bool {
        self.printed.contains(&id)
    }

    pub fn printed_count(&self) -> usize {
        self.printed.len()
    }

    pub(crate) fn mark_printed(&mut self, id: BoxId) {
        self.printed.insert(id);
    }

    pub(crate) fn defer(&mut self, y0: i32) {
        self.top_cropped = Some(self.top_cropped.map_or(y0, |t| t.min(y0)));
    }

    /// Forget every printed box, ready for a new print job.
    pub fn clear(&mut self) {
        self.printed.clear();
        self.top_cropped = None;
    }
}

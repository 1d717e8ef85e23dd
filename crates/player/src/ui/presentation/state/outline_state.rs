//! Outline state management
//!
//! Holds the section outline for the faction page currently on screen.

use std::rc::Rc;

use tacref_domain::{build_outline, FactionRecord, OutlinePosition, SectionOutline};

/// Outline of the displayed faction, rebuilt only when the record changes
#[derive(Debug, Default)]
pub struct OutlineState {
    /// Record the outline was built from (compared by identity)
    record: Option<Rc<FactionRecord>>,
    outline: SectionOutline,
    /// Section/subsection currently scrolled into view
    active: Option<OutlinePosition>,
}

impl OutlineState {
    /// Create a new OutlineState with empty values
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `record`. The outline is rebuilt in full when `record` is a
    /// different allocation from the last one, otherwise reused.
    pub fn show(&mut self, record: &Rc<FactionRecord>) -> &SectionOutline {
        let unchanged = self
            .record
            .as_ref()
            .is_some_and(|current| Rc::ptr_eq(current, record));
        if !unchanged {
            self.outline = build_outline(record);
            self.record = Some(Rc::clone(record));
            self.active = None;
            tracing::debug!("Outline rebuilt with {} sections", self.outline.len());
        }
        &self.outline
    }

    pub fn outline(&self) -> &SectionOutline {
        &self.outline
    }

    pub fn record(&self) -> Option<&Rc<FactionRecord>> {
        self.record.as_ref()
    }

    /// Mark the section or subsection with the given anchor id as active.
    ///
    /// Unknown anchors clear the active position.
    pub fn set_active(&mut self, anchor: &str) -> Option<OutlinePosition> {
        self.active = self.outline.locate(anchor);
        self.active
    }

    pub fn active(&self) -> Option<OutlinePosition> {
        self.active
    }

    /// Clear everything (e.g., when leaving the faction page)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

//! FAQ disclosure state
//!
//! Every FAQ item is its own disclosure widget. Items toggle
//! independently; expanding one never collapses another.

use crate::content::{Faq, FaqsBlock};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisclosureState {
    #[default]
    Collapsed,
    Expanded,
}

impl DisclosureState {
    pub fn toggled(self) -> Self {
        match self {
            DisclosureState::Collapsed => DisclosureState::Expanded,
            DisclosureState::Expanded => DisclosureState::Collapsed,
        }
    }

    pub fn is_open(self) -> bool {
        self == DisclosureState::Expanded
    }
}

/// The renderable items of a FAQs block with their disclosure states
#[derive(Debug, Clone)]
pub struct FaqAccordion<'a> {
    items: Vec<(&'a Faq, DisclosureState)>,
}

impl<'a> FaqAccordion<'a> {
    /// All complete items, collapsed
    pub fn new(block: &'a FaqsBlock) -> Self {
        Self {
            items: block
                .complete_faqs()
                .map(|faq| (faq, DisclosureState::Collapsed))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self, id: &str) -> Option<DisclosureState> {
        self.position(id).map(|i| self.items[i].1)
    }

    /// Flip the item with `id` and return its new state
    pub fn toggle(&mut self, id: &str) -> Option<DisclosureState> {
        let i = self.position(id)?;
        let state = self.items[i].1.toggled();
        self.items[i].1 = state;
        Some(state)
    }

    pub fn items(&self) -> impl Iterator<Item = (&'a Faq, DisclosureState)> + '_ {
        self.items.iter().copied()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|(faq, _)| faq.id.as_deref() == Some(id))
    }
}

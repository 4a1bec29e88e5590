//! The in-memory collection of open tabs.

use crate::error::{DomainError, DomainResult};
use crate::id::{TabId, TabIdAllocator};
use crate::response::NormalizedResponse;

use super::{Tab, TabEdit};

/// Proof that a send was started, used to commit its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendTicket {
    /// Tab the send was started from.
    pub tab_id: TabId,
    /// Per-tab sequence number of the send.
    pub sequence: u64,
}

/// What happened to a completed send's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The response was written into the tab.
    Committed,
    /// A newer send was started from the tab; the response was dropped.
    Superseded,
    /// The tab was closed while the send was in flight.
    TabClosed,
}

/// Ordered collection of tabs plus the active tab.
///
/// Tab [`TabId::FIRST`] is created with the store and can never be closed,
/// so the store is never empty and the active id always names an open tab.
#[derive(Debug, Clone)]
pub struct TabStore {
    tabs: Vec<Tab>,
    active: TabId,
    ids: TabIdAllocator,
}

impl TabStore {
    /// Creates a store holding only the permanent first tab.
    #[must_use]
    pub fn new() -> Self {
        let mut ids = TabIdAllocator::new();
        let first = ids.allocate();
        Self {
            tabs: vec![Tab::new(first)],
            active: first,
            ids,
        }
    }

    /// Returns the tabs in display order.
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Returns the number of open tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Always false: the first tab cannot be closed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Looks up a tab.
    #[must_use]
    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.id == id)
    }

    /// Returns the id of the visible tab.
    #[must_use]
    pub const fn active_tab_id(&self) -> TabId {
        self.active
    }

    /// Returns the visible tab.
    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        self.tab(self.active)
    }

    /// Appends a tab with default fields and makes it active.
    pub fn create_tab(&mut self) -> TabId {
        let id = self.ids.allocate();
        self.tabs.push(Tab::new(id));
        self.active = id;
        id
    }

    /// Replaces one field on one tab.
    ///
    /// Returns false, changing nothing, when the tab does not exist.
    pub fn update_field(&mut self, id: TabId, edit: TabEdit) -> bool {
        match self.tab_mut(id) {
            Some(tab) => {
                tab.apply(edit);
                true
            }
            None => false,
        }
    }

    /// Makes a tab the visible one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TabNotFound` for unknown ids; the active tab
    /// stays as it was.
    pub fn select_tab(&mut self, id: TabId) -> DomainResult<()> {
        if self.tab(id).is_none() {
            return Err(DomainError::TabNotFound(id));
        }
        self.active = id;
        Ok(())
    }

    /// Removes a tab and returns it.
    ///
    /// Closing the active tab activates the first remaining tab.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PermanentTab` for the first tab and
    /// `DomainError::TabNotFound` for unknown ids.
    pub fn close_tab(&mut self, id: TabId) -> DomainResult<Tab> {
        if id.is_permanent() {
            return Err(DomainError::PermanentTab(id));
        }
        let index = self
            .tabs
            .iter()
            .position(|tab| tab.id == id)
            .ok_or(DomainError::TabNotFound(id))?;
        let removed = self.tabs.remove(index);

        if removed.id == self.active
            && let Some(first) = self.tabs.first()
        {
            self.active = first.id;
        }
        Ok(removed)
    }

    /// Flips whether the bearer token field is shown.
    ///
    /// Returns the new value, or `None` when the tab does not exist.
    pub fn toggle_bearer_input(&mut self, id: TabId) -> Option<bool> {
        let tab = self.tab_mut(id)?;
        tab.show_bearer_token_input = !tab.show_bearer_token_input;
        Some(tab.show_bearer_token_input)
    }

    /// Records that a send was started from a tab.
    ///
    /// Each call supersedes every earlier ticket for the same tab.
    pub fn begin_send(&mut self, id: TabId) -> Option<SendTicket> {
        let tab = self.tab_mut(id)?;
        tab.latest_send += 1;
        Some(SendTicket {
            tab_id: id,
            sequence: tab.latest_send,
        })
    }

    /// Writes a completed send's response into its tab.
    ///
    /// The response is kept only when the ticket belongs to the most
    /// recently started send of a tab that is still open.
    pub fn complete_send(
        &mut self,
        ticket: SendTicket,
        response: NormalizedResponse,
    ) -> SendOutcome {
        let Some(tab) = self.tab_mut(ticket.tab_id) else {
            return SendOutcome::TabClosed;
        };
        if ticket.sequence != tab.latest_send {
            return SendOutcome::Superseded;
        }
        tab.response = Some(response);
        SendOutcome::Committed
    }
}

impl Default for TabStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use pretty_assertions::assert_eq;

    fn ids(store: &TabStore) -> Vec<u64> {
        store.tabs().iter().map(|tab| tab.id().get()).collect()
    }

    #[test]
    fn test_new_store_has_permanent_tab() {
        let store = TabStore::new();
        assert_eq!(ids(&store), vec![1]);
        assert_eq!(store.active_tab_id(), TabId::FIRST);
        assert!(store.active_tab().is_some());
        assert!(!store.is_empty());
    }

    #[test]
    fn test_create_tab_activates_it() {
        let mut store = TabStore::new();
        let second = store.create_tab();
        let third = store.create_tab();
        assert_eq!(second, TabId::new(2));
        assert_eq!(third, TabId::new(3));
        assert_eq!(store.active_tab_id(), third);
        assert!(store.tab(third).unwrap().response.is_none());
    }

    #[test]
    fn test_first_tab_cannot_be_closed() {
        let mut store = TabStore::new();
        store.create_tab();
        assert_eq!(
            store.close_tab(TabId::FIRST),
            Err(DomainError::PermanentTab(TabId::FIRST))
        );
        assert_eq!(ids(&store), vec![1, 2]);
    }

    #[test]
    fn test_close_unknown_tab() {
        let mut store = TabStore::new();
        assert_eq!(
            store.close_tab(TabId::new(9)),
            Err(DomainError::TabNotFound(TabId::new(9)))
        );
    }

    #[test]
    fn test_close_active_tab_activates_first_remaining() {
        let mut store = TabStore::new();
        store.create_tab();
        store.create_tab();
        let removed = store.close_tab(TabId::new(3)).unwrap();
        assert_eq!(removed.id(), TabId::new(3));
        assert_eq!(store.active_tab_id(), TabId::FIRST);
    }

    #[test]
    fn test_close_inactive_tab_keeps_active() {
        let mut store = TabStore::new();
        store.create_tab();
        let third = store.create_tab();
        store.close_tab(TabId::new(2)).unwrap();
        assert_eq!(store.active_tab_id(), third);
    }

    #[test]
    fn test_closing_any_subset_keeps_invariants() {
        const EXTRA: u64 = 6;
        for mask in 0u32..(1 << EXTRA) {
            let mut store = TabStore::new();
            for _ in 0..EXTRA {
                store.create_tab();
            }
            for raw in 1..=EXTRA + 1 {
                if raw == 1 || mask & (1 << (raw - 2)) != 0 {
                    let _ = store.close_tab(TabId::new(raw));
                }
            }
            assert!(store.tab(TabId::FIRST).is_some(), "mask {mask:b}");
            assert!(store.active_tab().is_some(), "mask {mask:b}");
            assert_eq!(store.len() as u32, 1 + EXTRA as u32 - mask.count_ones());
        }
    }

    #[test]
    fn test_ids_never_reused() {
        let mut store = TabStore::new();
        store.create_tab();
        store.create_tab();
        store.close_tab(TabId::new(2)).unwrap();
        let next = store.create_tab();
        assert_eq!(next, TabId::new(4));
        assert_eq!(ids(&store), vec![1, 3, 4]);
    }

    #[test]
    fn test_select_tab() {
        let mut store = TabStore::new();
        store.create_tab();
        store.select_tab(TabId::FIRST).unwrap();
        assert_eq!(store.active_tab_id(), TabId::FIRST);
    }

    #[test]
    fn test_select_unknown_tab_rejected() {
        let mut store = TabStore::new();
        let second = store.create_tab();
        assert_eq!(
            store.select_tab(TabId::new(42)),
            Err(DomainError::TabNotFound(TabId::new(42)))
        );
        assert_eq!(store.active_tab_id(), second);
    }

    #[test]
    fn test_update_field_changes_only_that_field() {
        let mut store = TabStore::new();
        let second = store.create_tab();
        store.create_tab();
        let before = store.tabs().to_vec();

        assert!(store.update_field(second, TabEdit::Body(r#"{"a":1}"#.to_string())));

        for (old, new) in before.iter().zip(store.tabs()) {
            if new.id() == second {
                let mut expected = old.clone();
                expected.request.body = r#"{"a":1}"#.to_string();
                assert_eq!(new, &expected);
            } else {
                assert_eq!(new, old);
            }
        }
    }

    #[test]
    fn test_update_unknown_tab_is_noop() {
        let mut store = TabStore::new();
        let before = store.tabs().to_vec();
        assert!(!store.update_field(TabId::new(5), TabEdit::Method(HttpMethod::Post)));
        assert_eq!(store.tabs(), before.as_slice());
    }

    #[test]
    fn test_toggle_bearer_input() {
        let mut store = TabStore::new();
        assert_eq!(store.toggle_bearer_input(TabId::FIRST), Some(true));
        assert_eq!(store.toggle_bearer_input(TabId::FIRST), Some(false));
        assert_eq!(store.toggle_bearer_input(TabId::new(3)), None);
    }

    #[test]
    fn test_complete_send_commits_latest() {
        let mut store = TabStore::new();
        let ticket = store.begin_send(TabId::FIRST).unwrap();
        let outcome = store.complete_send(ticket, NormalizedResponse::error("boom"));
        assert_eq!(outcome, SendOutcome::Committed);
        assert_eq!(
            store.tab(TabId::FIRST).unwrap().response,
            Some(NormalizedResponse::error("boom"))
        );
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut store = TabStore::new();
        let first = store.begin_send(TabId::FIRST).unwrap();
        let second = store.begin_send(TabId::FIRST).unwrap();
        assert!(second.sequence > first.sequence);

        assert_eq!(
            store.complete_send(second, NormalizedResponse::error("newer")),
            SendOutcome::Committed
        );
        assert_eq!(
            store.complete_send(first, NormalizedResponse::error("older")),
            SendOutcome::Superseded
        );
        assert_eq!(
            store.tab(TabId::FIRST).unwrap().response,
            Some(NormalizedResponse::error("newer"))
        );
    }

    #[test]
    fn test_completion_for_closed_tab() {
        let mut store = TabStore::new();
        let second = store.create_tab();
        let ticket = store.begin_send(second).unwrap();
        store.close_tab(second).unwrap();
        assert_eq!(
            store.complete_send(ticket, NormalizedResponse::error("late")),
            SendOutcome::TabClosed
        );
    }

    #[test]
    fn test_send_only_touches_its_tab() {
        let mut store = TabStore::new();
        let second = store.create_tab();
        let ticket = store.begin_send(second).unwrap();
        store.complete_send(ticket, NormalizedResponse::error("x"));
        assert!(store.tab(TabId::FIRST).unwrap().response.is_none());
        assert_eq!(store.tab(TabId::FIRST).unwrap().latest_send(), 0);
    }
}

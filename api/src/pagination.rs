pub const PAGE_STEP: usize = 10;

/// Incremental page growth for the tournament list.
///
/// A load-more request is two-phase: [`Pager::begin_load_more`] claims the
/// single in-flight slot and hands out a [`LoadToken`],
/// [`Pager::finish_load_more`] redeems it to grow the page. Triggers that
/// arrive while a request is settling are dropped. [`Pager::reset`] starts a
/// new generation, so tokens issued before it are refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    in_flight: bool,
    generation: u64,
}

/// Proof of a started load-more request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

impl Default for Pager {
    fn default() -> Self {
        Self { page_size: PAGE_STEP, in_flight: false, generation: 0 }
    }
}

impl Pager {
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading_more(&self) -> bool {
        self.in_flight
    }

    /// Number of rows to show out of `total` filtered results.
    pub fn visible_len(&self, total: usize) -> usize {
        self.page_size.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.page_size < total
    }

    /// Returns `None` (and changes nothing) when a request is already in
    /// flight or every result is already visible.
    pub fn begin_load_more(&mut self, total: usize) -> Option<LoadToken> {
        if self.in_flight || !self.has_more(total) {
            return None;
        }
        self.in_flight = true;
        Some(LoadToken(self.generation))
    }

    /// Complete the request `token` belongs to. Returns whether the page grew.
    /// A token from before the last reset, or with nothing in flight, is
    /// ignored.
    pub fn finish_load_more(&mut self, token: LoadToken, total: usize) -> bool {
        if !self.in_flight || token.0 != self.generation {
            return false;
        }
        self.in_flight = false;
        let grown = (self.page_size + PAGE_STEP).min(total).max(self.page_size);
        let changed = grown != self.page_size;
        self.page_size = grown;
        changed
    }

    /// Back to the first page. An in-flight request is forgotten and its
    /// token goes stale.
    pub fn reset(&mut self) {
        *self = Self { generation: self.generation.wrapping_add(1), ..Self::default() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_more(pager: &mut Pager, total: usize) -> bool {
        pager
            .begin_load_more(total)
            .is_some_and(|token| pager.finish_load_more(token, total))
    }

    #[test]
    fn starts_at_one_page() {
        let pager = Pager::default();
        assert_eq!(pager.page_size(), 10);
        assert_eq!(pager.visible_len(4), 4);
        assert_eq!(pager.visible_len(25), 10);
    }

    #[test]
    fn grows_until_cap_then_noops() {
        let total = 27;
        let mut pager = Pager::default();
        let mut seen = vec![pager.visible_len(total)];
        while load_more(&mut pager, total) {
            let now = pager.visible_len(total);
            assert!(now > *seen.last().unwrap());
            assert!(now <= total);
            seen.push(now);
        }
        assert_eq!(seen, vec![10, 20, 27]);
        assert!(!load_more(&mut pager, total));
        assert_eq!(pager.visible_len(total), 27);
    }

    #[test]
    fn small_result_sets_never_grow() {
        let mut pager = Pager::default();
        assert!(!load_more(&mut pager, 10));
        assert!(!load_more(&mut pager, 3));
        assert_eq!(pager.page_size(), 10);
    }

    #[test]
    fn second_trigger_while_settling_is_ignored() {
        let mut pager = Pager::default();
        let token = pager.begin_load_more(50).unwrap();
        assert!(pager.is_loading_more());
        assert!(pager.begin_load_more(50).is_none());
        assert!(pager.finish_load_more(token, 50));
        assert_eq!(pager.page_size(), 20);
        assert!(!pager.finish_load_more(token, 50), "a token is redeemed once");
        assert_eq!(pager.page_size(), 20);
    }

    #[test]
    fn results_shrinking_mid_flight_do_not_shrink_the_page() {
        let mut pager = Pager::default();
        assert!(load_more(&mut pager, 40));
        let token = pager.begin_load_more(40).unwrap();
        assert!(!pager.finish_load_more(token, 5));
        assert_eq!(pager.page_size(), 20);
        assert!(!pager.is_loading_more());
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut pager = Pager::default();
        load_more(&mut pager, 100);
        pager.begin_load_more(100);
        pager.reset();
        assert_eq!(pager.page_size(), 10);
        assert!(!pager.is_loading_more());
    }

    #[test]
    fn token_from_before_reset_cannot_settle_a_newer_request() {
        let mut pager = Pager::default();
        let stale = pager.begin_load_more(50).unwrap();
        pager.reset();
        let current = pager.begin_load_more(50).unwrap();

        assert!(!pager.finish_load_more(stale, 50));
        assert_eq!(pager.page_size(), 10);
        assert!(pager.is_loading_more(), "the newer request is still pending");

        assert!(pager.finish_load_more(current, 50));
        assert_eq!(pager.page_size(), 20);
    }
}

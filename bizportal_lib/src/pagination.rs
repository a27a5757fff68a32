//! Pagination reconciliation for list views.
//!
//! The backend does not always report how many records a list holds. When it
//! does, its totals are trusted. When it does not, totals are estimated from
//! the size of the page that came back: a short page is the last one, and a
//! full page means at least one more record exists.
//!
//! Once a view has seen its first page it keeps the same strategy (server or
//! estimate) for every later page, so the displayed total does not flicker
//! while paging.

use std::future::Future;

use bizportal_api::types::Page;
use bizportal_api::PageMeta;

use crate::error::PortalError;

/// Page size used for the one-time count probe on an ambiguous first page.
pub const PROBE_PAGE_SIZE: u64 = 1000;

/// Totals for one fetched page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reconciled {
    pub total_items: u64,
    /// Never less than 1.
    pub total_pages: u64,
    /// `true` when the totals came from the backend.
    pub authoritative: bool,
}

/// Number of pages needed for `total_items`, never less than 1.
pub fn page_count(total_items: u64, page_size: u64) -> u64 {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Derives totals for page `page` (1-based) of size `page_size` that returned
/// `items_returned` records.
///
/// A server-reported total count or total page count is trusted as is.
/// Without either, a short page gives exact totals, and a full page gives the
/// conservative estimate `page × page_size + 1` items over `page + 1` pages.
pub fn reconcile(
    page_size: u64,
    page: u64,
    items_returned: u64,
    server_total: Option<u64>,
    server_total_pages: Option<u64>,
) -> Reconciled {
    let page_size = page_size.max(1);
    let page = page.max(1);

    match (server_total, server_total_pages) {
        (Some(total), pages) => Reconciled {
            total_items: total,
            total_pages: pages.unwrap_or_else(|| page_count(total, page_size)).max(1),
            authoritative: true,
        },
        (None, Some(pages)) => {
            let pages = pages.max(1);
            let total_items = if page >= pages {
                (pages - 1)
                    .saturating_mul(page_size)
                    .saturating_add(items_returned.min(page_size))
            } else {
                pages.saturating_mul(page_size)
            };
            Reconciled {
                total_items,
                total_pages: pages,
                authoritative: true,
            }
        }
        (None, None) if items_returned < page_size => Reconciled {
            total_items: items_before(page, page_size).saturating_add(items_returned),
            total_pages: page,
            authoritative: false,
        },
        (None, None) => Reconciled {
            total_items: page.saturating_mul(page_size).saturating_add(1),
            total_pages: page.saturating_add(1),
            authoritative: false,
        },
    }
}

/// Records on the pages before `page`. Saturates on absurd page numbers.
fn items_before(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(page_size)
}

/// Which strategy a view settled on after its first fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaginationMode {
    #[default]
    Undetermined,
    /// The backend reports totals.
    Authoritative,
    /// Totals are inferred from page sizes.
    Estimated,
}

/// Pagination state of one list view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationState {
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub mode: PaginationMode,
    /// Exact record count learned from the probe, used while estimating.
    counted_total: Option<u64>,
    probe_attempted: bool,
    probe_enabled: bool,
}

impl PaginationState {
    pub fn new(page_size: u64) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_items: 0,
            total_pages: 1,
            mode: PaginationMode::Undetermined,
            counted_total: None,
            probe_attempted: false,
            probe_enabled: true,
        }
    }

    /// Disables the count probe; full first pages then use the conservative estimate.
    pub fn without_probe(mut self) -> Self {
        self.probe_enabled = false;
        self
    }

    /// Forgets the settled mode, e.g. after the search filter changed.
    pub fn reset(&mut self) {
        *self = Self {
            probe_enabled: self.probe_enabled,
            ..Self::new(self.page_size)
        };
    }

    pub fn is_authoritative(&self) -> bool {
        self.mode == PaginationMode::Authoritative
    }

    /// Records the outcome of fetching `page` and returns the totals to display.
    pub fn apply(&mut self, page: u64, items_returned: u64, meta: &PageMeta) -> Reconciled {
        let page = page.max(1);
        let result = match self.mode {
            PaginationMode::Undetermined => {
                let r = reconcile(
                    self.page_size,
                    page,
                    items_returned,
                    meta.total,
                    meta.total_pages,
                );
                self.mode = if r.authoritative {
                    PaginationMode::Authoritative
                } else {
                    PaginationMode::Estimated
                };
                r
            }
            PaginationMode::Authoritative if meta.is_authoritative() => reconcile(
                self.page_size,
                page,
                items_returned,
                meta.total,
                meta.total_pages,
            ),
            // The backend went quiet on a later page: keep the totals it gave
            // before, but never below what this page proves exists.
            PaginationMode::Authoritative => Reconciled {
                total_items: self
                    .total_items
                    .max(items_before(page, self.page_size).saturating_add(items_returned)),
                total_pages: self.total_pages.max(page),
                authoritative: true,
            },
            PaginationMode::Estimated => match self.counted_total {
                Some(total) => Reconciled {
                    total_items: total,
                    total_pages: page_count(total, self.page_size),
                    authoritative: false,
                },
                None => reconcile(self.page_size, page, items_returned, None, None),
            },
        };
        self.page = page;
        self.total_items = result.total_items;
        self.total_pages = result.total_pages;
        result
    }

    /// Whether the page just applied is the ambiguous case worth probing:
    /// a full first page with no server totals, and no probe yet.
    pub fn needs_probe(&self, page: u64, items_returned: u64) -> bool {
        self.probe_enabled
            && !self.probe_attempted
            && self.mode == PaginationMode::Estimated
            && page == 1
            && items_returned >= self.page_size
    }

    /// Records the outcome of the count probe. `None` means the probe failed.
    ///
    /// A probe reporting totals makes the view authoritative. A probe shorter
    /// than [`PROBE_PAGE_SIZE`] holds every record, so its length is exact.
    /// Otherwise the conservative estimate stays.
    pub fn apply_probe(&mut self, probe: Option<(u64, &PageMeta)>) -> Reconciled {
        self.probe_attempted = true;
        let current = Reconciled {
            total_items: self.total_items,
            total_pages: self.total_pages,
            authoritative: self.is_authoritative(),
        };
        let Some((probe_items, meta)) = probe else {
            return current;
        };

        let result = if let Some(total) = meta.total {
            self.mode = PaginationMode::Authoritative;
            Reconciled {
                total_items: total,
                total_pages: page_count(total, self.page_size),
                authoritative: true,
            }
        } else if probe_items < PROBE_PAGE_SIZE {
            self.counted_total = Some(probe_items);
            Reconciled {
                total_items: probe_items,
                total_pages: page_count(probe_items, self.page_size),
                authoritative: false,
            }
        } else {
            return current;
        };
        self.total_items = result.total_items;
        self.total_pages = result.total_pages;
        result
    }
}

/// Fetches `page` for a list view and updates its pagination state.
///
/// `fetch(page, limit)` performs one list request. On an ambiguous first page
/// a single extra request with [`PROBE_PAGE_SIZE`] is issued to learn the real
/// count; its failure is logged and the estimate stands.
pub async fn load_page<T, F, Fut>(
    state: &mut PaginationState,
    page: u64,
    fetch: F,
) -> Result<Vec<T>, PortalError>
where
    F: Fn(u64, u64) -> Fut,
    Fut: Future<Output = Result<Page<T>, PortalError>>,
{
    let page = page.max(1);
    let result = fetch(page, state.page_size).await?;
    let returned = result.items.len() as u64;
    state.apply(page, returned, &result.meta);

    if state.needs_probe(page, returned) {
        tracing::debug!(
            "Page 1 is full and carries no totals; probing with page size {}",
            PROBE_PAGE_SIZE
        );
        match fetch(1, PROBE_PAGE_SIZE).await {
            Ok(probe) => {
                state.apply_probe(Some((probe.items.len() as u64, &probe.meta)));
            }
            Err(e) => {
                tracing::warn!("Count probe failed, keeping estimate: {}", e);
                state.apply_probe(None);
            }
        }
    }

    Ok(result.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn short_first_page_is_everything() {
        let r = reconcile(10, 1, 7, None, None);
        assert_eq!(
            r,
            Reconciled {
                total_items: 7,
                total_pages: 1,
                authoritative: false
            }
        );
    }

    #[test]
    fn full_later_page_assumes_one_more() {
        let r = reconcile(10, 2, 10, None, None);
        assert_eq!((r.total_items, r.total_pages), (21, 3));
        assert!(!r.authoritative);
    }

    #[test]
    fn short_later_page_is_last() {
        let r = reconcile(10, 3, 4, None, None);
        assert_eq!((r.total_items, r.total_pages), (24, 3));
    }

    #[test]
    fn server_totals_are_trusted() {
        let r = reconcile(10, 2, 10, Some(95), None);
        assert_eq!((r.total_items, r.total_pages), (95, 10));
        assert!(r.authoritative);

        let r = reconcile(10, 1, 10, Some(95), Some(12));
        assert_eq!(r.total_pages, 12);
    }

    #[test]
    fn server_page_count_alone() {
        let r = reconcile(10, 4, 3, None, Some(4));
        assert_eq!((r.total_items, r.total_pages), (33, 4));
        let r = reconcile(10, 1, 10, None, Some(4));
        assert_eq!((r.total_items, r.total_pages), (40, 4));
    }

    #[test]
    fn pages_never_zero() {
        assert_eq!(reconcile(10, 1, 0, None, None).total_pages, 1);
        assert_eq!(reconcile(10, 1, 0, Some(0), None).total_pages, 1);
        assert_eq!(reconcile(10, 1, 0, Some(0), Some(0)).total_pages, 1);
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(21, 10), 3);
    }

    #[test]
    fn huge_page_counts_saturate() {
        let r = reconcile(10, 1, 10, None, Some(u64::MAX));
        assert_eq!((r.total_items, r.total_pages), (u64::MAX, u64::MAX));
        assert!(r.authoritative);

        let r = reconcile(10, u64::MAX, 3, None, Some(u64::MAX));
        assert_eq!(r.total_items, u64::MAX);
    }

    #[test]
    fn huge_page_number_saturates() {
        let r = reconcile(10, 2_000_000_000_000_000_000, 10, None, None);
        assert_eq!((r.total_items, r.total_pages), (u64::MAX, 2_000_000_000_000_000_001));

        let r = reconcile(10, u64::MAX, 10, None, None);
        assert_eq!((r.total_items, r.total_pages), (u64::MAX, u64::MAX));

        let r = reconcile(10, u64::MAX, 4, None, None);
        assert_eq!((r.total_items, r.total_pages), (u64::MAX, u64::MAX));
    }

    #[test]
    fn float_page_count_from_backend_does_not_overflow() {
        let body = serde_json::json!({
            "data": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            "totalPages": 1e20
        });
        let normalized = bizportal_api::normalize(body).into_listing();
        let r = reconcile(
            10,
            1,
            normalized.items.len() as u64,
            normalized.meta.total,
            normalized.meta.total_pages,
        );
        assert_eq!(r.total_pages, u64::MAX);
        assert_eq!(r.total_items, u64::MAX);
    }

    #[test]
    fn mode_is_sticky_once_estimated() {
        let mut state = PaginationState::new(10).without_probe();
        state.apply(1, 10, &PageMeta::default());
        assert_eq!(state.mode, PaginationMode::Estimated);

        let meta = PageMeta {
            total: Some(500),
            ..Default::default()
        };
        let r = state.apply(2, 10, &meta);
        assert_eq!((r.total_items, r.total_pages), (21, 3));
        assert!(!r.authoritative);
    }

    #[test]
    fn authoritative_keeps_totals_when_backend_goes_quiet() {
        let mut state = PaginationState::new(10);
        let meta = PageMeta {
            total: Some(42),
            ..Default::default()
        };
        state.apply(1, 10, &meta);
        let r = state.apply(2, 10, &PageMeta::default());
        assert_eq!((r.total_items, r.total_pages), (42, 5));
        assert!(r.authoritative);
    }

    #[test]
    fn quiet_authoritative_page_past_the_end_raises_item_total() {
        let mut state = PaginationState::new(10);
        let meta = PageMeta {
            total: Some(42),
            ..Default::default()
        };
        state.apply(1, 10, &meta);
        let r = state.apply(7, 4, &PageMeta::default());
        assert_eq!((r.total_items, r.total_pages), (64, 7));
        assert!(r.authoritative);
        assert_eq!(r.total_pages, page_count(r.total_items, 10));
    }

    #[test]
    fn reset_forgets_mode() {
        let mut state = PaginationState::new(10).without_probe();
        state.apply(3, 4, &PageMeta::default());
        state.reset();
        assert_eq!(state, PaginationState::new(10).without_probe());
    }

    fn page_of(n: usize, meta: PageMeta) -> Page<u32> {
        Page {
            items: (0..n as u32).collect(),
            total: n as u64,
            meta,
        }
    }

    #[tokio::test]
    async fn probe_counts_ambiguous_first_page_once() {
        let calls = RefCell::new(Vec::new());
        let fetch = |page: u64, limit: u64| {
            calls.borrow_mut().push((page, limit));
            let n = if limit == PROBE_PAGE_SIZE { 13 } else { 10 };
            async move { Ok::<_, PortalError>(page_of(n, PageMeta::default())) }
        };

        let mut state = PaginationState::new(10);
        let items = load_page(&mut state, 1, &fetch).await.unwrap();
        assert_eq!(items.len(), 10);
        assert_eq!((state.total_items, state.total_pages), (13, 2));
        assert_eq!(state.mode, PaginationMode::Estimated);

        load_page(&mut state, 2, &fetch).await.unwrap();
        load_page(&mut state, 1, &fetch).await.unwrap();
        assert_eq!((state.total_items, state.total_pages), (13, 2));
        assert_eq!(*calls.borrow(), vec![(1, 10), (1, 1000), (2, 10), (1, 10)]);
    }

    #[tokio::test]
    async fn probe_with_server_total_turns_authoritative() {
        let fetch = |_page: u64, limit: u64| async move {
            if limit == PROBE_PAGE_SIZE {
                Ok::<_, PortalError>(page_of(
                    3,
                    PageMeta {
                        total: Some(250),
                        ..Default::default()
                    },
                ))
            } else {
                Ok(page_of(10, PageMeta::default()))
            }
        };
        let mut state = PaginationState::new(10);
        load_page(&mut state, 1, fetch).await.unwrap();
        assert!(state.is_authoritative());
        assert_eq!((state.total_items, state.total_pages), (250, 25));
    }

    #[tokio::test]
    async fn failed_or_full_probe_keeps_conservative_estimate() {
        let fetch = |_page: u64, limit: u64| async move {
            if limit == PROBE_PAGE_SIZE {
                Err(PortalError::InvalidInput("probe refused".into()))
            } else {
                Ok(page_of(10, PageMeta::default()))
            }
        };
        let mut state = PaginationState::new(10);
        load_page(&mut state, 1, fetch).await.unwrap();
        assert_eq!((state.total_items, state.total_pages), (11, 2));

        let fetch = |_page: u64, limit: u64| async move {
            Ok::<_, PortalError>(page_of(limit as usize, PageMeta::default()))
        };
        let mut state = PaginationState::new(10);
        load_page(&mut state, 1, fetch).await.unwrap();
        assert_eq!((state.total_items, state.total_pages), (11, 2));
    }

    #[tokio::test]
    async fn later_full_page_never_probes() {
        let calls = RefCell::new(0);
        let fetch = |_page: u64, _limit: u64| {
            *calls.borrow_mut() += 1;
            async { Ok::<_, PortalError>(page_of(10, PageMeta::default())) }
        };
        let mut state = PaginationState::new(10);
        load_page(&mut state, 3, &fetch).await.unwrap();
        assert_eq!(*calls.borrow(), 1);
        assert_eq!((state.total_items, state.total_pages), (31, 4));
    }
}

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use tracing::debug;

use crate::domain::errors::{FetchError, PageError};
use crate::domain::ids::PageId;
use crate::domain::images::Image;
use crate::domain::pages::{CatPage, RequestTicket};
use crate::domain::sources::ImageSource;

pub const DEFAULT_MAX_PAGES: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(capacity) => capacity,
    None => panic!("default page capacity must be non-zero"),
};

/// A cat page shared between the handlers that render and update it.
///
/// The lock is only held for single state transitions, never across the fetch.
#[derive(Clone)]
pub struct SharedPage {
    id: PageId,
    page: Arc<Mutex<CatPage>>,
}

impl SharedPage {
    fn new(id: PageId, page: CatPage) -> Self {
        Self {
            id,
            page: Arc::new(Mutex::new(page)),
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn snapshot(&self) -> CatPage {
        self.lock().clone()
    }

    /// Run the "request new image" transition against `source`.
    ///
    /// A fetch failure is recorded on the page and also returned. If this
    /// future is dropped mid-fetch the page goes back to its previous image.
    pub async fn request_new_image(&self, source: &dyn ImageSource) -> Result<Image, PageError> {
        let ticket = self.lock().begin_request()?;
        let mut pending = PendingRequest {
            page: self,
            ticket: Some(ticket),
        };

        let outcome = source.fetch_image().await;
        pending.finish(outcome).map_err(PageError::from)
    }

    fn lock(&self) -> MutexGuard<'_, CatPage> {
        self.page.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the loading state however the request ends.
struct PendingRequest<'a> {
    page: &'a SharedPage,
    ticket: Option<RequestTicket>,
}

impl PendingRequest<'_> {
    fn finish(&mut self, outcome: Result<Image, FetchError>) -> Result<Image, FetchError> {
        if let Some(ticket) = self.ticket.take() {
            self.page.lock().complete_request(ticket, &outcome);
        }
        outcome
    }
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            debug!(page.id = %self.page.id, "image request dropped before completion");
            self.page.lock().abandon_request(ticket);
        }
    }
}

/// Live cat pages, bounded by count. The least recently used page is evicted
/// when a new one would exceed the capacity.
pub struct PageStore {
    pages: Mutex<LruCache<PageId, SharedPage>>,
}

impl PageStore {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            pages: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn create(&self, initial: Image) -> SharedPage {
        let id = PageId::generate();
        let page = SharedPage::new(id, CatPage::new(initial));

        if let Some((evicted, _)) = self.lock().push(id, page.clone()) {
            debug!(page.id = %evicted, "evicted least recently used page");
        }

        page
    }

    pub fn get(&self, id: PageId) -> Option<SharedPage> {
        self.lock().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.lock().cap()
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<PageId, SharedPage>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGES)
    }
}

// Page cursor shared by the systems listing and the per-system waypoint listing
use crate::client::GalaxyApi;
use crate::models::{PageMeta, System, Waypoint};
use crate::v_debug;

/// Lazy, restartable position in a paginated listing.
///
/// The cursor stops when the response metadata says the last page was
/// served (`page * limit >= total`), when a page comes back empty, when a
/// response carries no metadata at all, or once `max_pages` pages have
/// been fetched. `max_pages == 0` means no cap.
#[derive(Debug, Clone)]
pub struct PageCursor {
    next_page: u32,
    limit: u32,
    max_pages: u32,
    fetched: u32,
    exhausted: bool,
}

impl PageCursor {
    pub fn new(limit: u32, max_pages: u32) -> Self {
        Self {
            next_page: 1,
            limit,
            max_pages,
            fetched: 0,
            exhausted: false,
        }
    }

    /// Page number to request next, or `None` once the listing is done.
    pub fn next_page(&self) -> Option<u32> {
        if self.exhausted {
            None
        } else {
            Some(self.next_page)
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn pages_fetched(&self) -> u32 {
        self.fetched
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn advance(&mut self, meta: Option<&PageMeta>, returned: usize) {
        self.fetched += 1;
        self.next_page += 1;

        let capped = self.max_pages > 0 && self.fetched >= self.max_pages;
        let last = match meta {
            Some(meta) => meta.is_last_page(),
            None => true,
        };
        if returned == 0 || last || capped {
            self.exhausted = true;
        }
    }

    pub fn restart(&mut self) {
        self.next_page = 1;
        self.fetched = 0;
        self.exhausted = false;
    }
}

/// Batches of systems pulled one page at a time.
pub struct SystemPages<'a, A: GalaxyApi + ?Sized> {
    api: &'a A,
    cursor: PageCursor,
}

impl<'a, A: GalaxyApi + ?Sized> SystemPages<'a, A> {
    pub fn new(api: &'a A, limit: u32, max_pages: u32) -> Self {
        Self {
            api,
            cursor: PageCursor::new(limit, max_pages),
        }
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn restart(&mut self) {
        self.cursor.restart();
    }

    /// Fetch the next page of systems. `Ok(None)` once the listing is done.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<System>>, Box<dyn std::error::Error>> {
        let Some(page) = self.cursor.next_page() else {
            return Ok(None);
        };

        let response = self.api.list_systems(page, self.cursor.limit()).await?;
        v_debug!(
            "📄 Systems page {} returned {} systems (meta: {:?})",
            page,
            response.data.len(),
            response.meta
        );
        self.cursor.advance(response.meta.as_ref(), response.data.len());

        Ok(Some(response.data))
    }
}

/// Every waypoint of a system, following the waypoint listing to its end.
pub async fn fetch_all_waypoints<A: GalaxyApi + ?Sized>(
    api: &A,
    system_symbol: &str,
    limit: u32,
) -> Result<Vec<Waypoint>, Box<dyn std::error::Error>> {
    let mut cursor = PageCursor::new(limit, 0);
    let mut waypoints = Vec::new();

    while let Some(page) = cursor.next_page() {
        let response = api.list_system_waypoints(system_symbol, page, limit).await?;
        cursor.advance(response.meta.as_ref(), response.data.len());
        waypoints.extend(response.data);
    }

    Ok(waypoints)
}

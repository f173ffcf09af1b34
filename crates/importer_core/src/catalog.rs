use crate::{
    CatalogPage, CatalogRecord, CatalogSource, ListingError, ListingRequest, PageOutOfRange,
    Pagination,
};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A listing request tagged with the ticket its response must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogQuery {
    pub ticket: u64,
    pub request: ListingRequest,
}

/// Records, pagination and filter of the catalog view.
///
/// Navigation issues [`CatalogQuery`]s; only the response to the most recent
/// one is applied. Pagination is copied from responses, never computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    page_size: u32,
    filter: Option<CatalogSource>,
    requested_page: u32,
    pagination: Pagination,
    /// Filter of the response `pagination` came from.
    loaded_filter: Option<CatalogSource>,
    records: Vec<CatalogRecord>,
    has_loaded: bool,
    error: Option<ListingError>,
    in_flight: Option<u64>,
    next_ticket: u64,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogState {
    pub fn new(page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            filter: None,
            requested_page: 1,
            pagination: Pagination::initial(page_size),
            loaded_filter: None,
            records: Vec::new(),
            has_loaded: false,
            error: None,
            in_flight: None,
            next_ticket: 1,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn filter(&self) -> Option<CatalogSource> {
        self.filter
    }

    pub fn requested_page(&self) -> u32 {
        self.requested_page
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn error(&self) -> Option<&ListingError> {
        self.error.as_ref()
    }

    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Pagination keeps the last confirmed response until this one succeeds.
    pub fn load(&mut self, page: u32, filter: Option<CatalogSource>) -> CatalogQuery {
        self.filter = filter;
        self.requested_page = page.max(1);
        self.issue()
    }

    /// Always refetches from page 1, even when the filter is unchanged.
    pub fn set_filter(&mut self, filter: Option<CatalogSource>) -> CatalogQuery {
        self.filter = filter;
        self.requested_page = 1;
        self.issue()
    }

    pub fn set_page(&mut self, page: u32) -> Result<CatalogQuery, PageOutOfRange> {
        if !self.pagination.contains(page) {
            return Err(PageOutOfRange {
                requested: page,
                pages: self.pagination.pages,
            });
        }
        self.requested_page = page;
        Ok(self.issue())
    }

    pub fn next_page(&mut self) -> Result<CatalogQuery, PageOutOfRange> {
        self.set_page(self.pagination.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Result<CatalogQuery, PageOutOfRange> {
        self.set_page(self.pagination.page.saturating_sub(1))
    }

    /// Re-issues the current filter at the last confirmed page.
    ///
    /// A page that was requested but never loaded is not retried. When the
    /// filter changed since the last successful load, page 1 is requested.
    pub fn refresh(&mut self) -> CatalogQuery {
        if self.has_loaded {
            self.requested_page = if self.loaded_filter == self.filter {
                self.pagination.page.max(1)
            } else {
                1
            };
        }
        self.issue()
    }

    /// Returns `false` when the response belongs to a superseded query.
    pub fn apply_loaded(&mut self, ticket: u64, page: CatalogPage) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        self.records = page.records;
        self.pagination = page.pagination;
        self.loaded_filter = self.filter;
        self.requested_page = page.pagination.page.max(1);
        self.error = None;
        self.has_loaded = true;
        true
    }

    /// Keeps the previously loaded records and pagination.
    pub fn apply_failed(&mut self, ticket: u64, error: ListingError) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        self.error = Some(error);
        true
    }

    fn issue(&mut self) -> CatalogQuery {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.error = None;
        CatalogQuery {
            ticket,
            request: ListingRequest {
                page: self.requested_page,
                limit: self.page_size,
                source: self.filter,
            },
        }
    }
}

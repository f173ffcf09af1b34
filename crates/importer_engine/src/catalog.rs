use std::sync::Arc;

use importer_core::{
    CatalogPage, CatalogQuery, CatalogRecord, CatalogSource, CatalogState, CatalogView,
    ListingError, PageOutOfRange, RecordId,
};
use importer_logging::{importer_debug, importer_warn};
use thiserror::Error;

use crate::{Gateway, GatewayError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowseError {
    #[error(transparent)]
    OutOfRange(#[from] PageOutOfRange),
    #[error(transparent)]
    Listing(#[from] ListingError),
}

/// Paginated, filterable view over the imported catalog.
pub struct CatalogBrowser {
    gateway: Arc<dyn Gateway>,
    state: CatalogState,
}

impl CatalogBrowser {
    pub fn new(gateway: Arc<dyn Gateway>, page_size: u32) -> Self {
        Self {
            gateway,
            state: CatalogState::new(page_size),
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn view(&self) -> CatalogView {
        CatalogView::from_state(&self.state)
    }

    pub async fn load(
        &mut self,
        page: u32,
        filter: Option<CatalogSource>,
    ) -> Result<CatalogPage, BrowseError> {
        let query = self.state.load(page, filter);
        self.execute(query).await
    }

    pub async fn refresh(&mut self) -> Result<CatalogPage, BrowseError> {
        let query = self.state.refresh();
        self.execute(query).await
    }

    pub async fn set_filter(
        &mut self,
        filter: Option<CatalogSource>,
    ) -> Result<CatalogPage, BrowseError> {
        let query = self.state.set_filter(filter);
        self.execute(query).await
    }

    /// Rejects pages outside the last reported range without a request.
    pub async fn set_page(&mut self, page: u32) -> Result<CatalogPage, BrowseError> {
        let query = self.state.set_page(page)?;
        self.execute(query).await
    }

    pub async fn next_page(&mut self) -> Result<CatalogPage, BrowseError> {
        let query = self.state.next_page()?;
        self.execute(query).await
    }

    pub async fn previous_page(&mut self) -> Result<CatalogPage, BrowseError> {
        let query = self.state.previous_page()?;
        self.execute(query).await
    }

    pub async fn record(&self, id: RecordId) -> Result<CatalogRecord, GatewayError> {
        self.gateway.get_image(id).await
    }

    async fn execute(&mut self, query: CatalogQuery) -> Result<CatalogPage, BrowseError> {
        importer_debug!(
            "Listing page {} (limit {}, source {:?})",
            query.request.page,
            query.request.limit,
            query.request.source
        );
        match self.gateway.list_images(&query.request).await {
            Ok(page) => {
                self.state.apply_loaded(query.ticket, page.clone());
                Ok(page)
            }
            Err(err) => {
                importer_warn!("Listing failed: {}", err);
                let error = ListingError::from(err);
                self.state.apply_failed(query.ticket, error.clone());
                Err(error.into())
            }
        }
    }
}

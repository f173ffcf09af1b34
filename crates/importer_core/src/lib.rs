//! Importer core: pure state machines and view-model helpers.
mod catalog;
mod effect;
mod error;
mod form;
mod msg;
mod poller;
mod registry;
mod state;
mod types;
mod update;
mod view_model;

pub use catalog::{CatalogQuery, CatalogState, DEFAULT_PAGE_SIZE};
pub use effect::Effect;
pub use error::{
    ListingError, PageOutOfRange, PollTransientError, SubmissionError, SubmitError,
    ValidationError, GENERIC_SUBMISSION_FAILURE, LISTING_FAILURE, POLL_FAILURE,
};
pub use form::{validate_folder_url, ImportForm};
pub use msg::Msg;
pub use poller::{
    FetchTicket, JobPoller, PollEffect, PollTiming, PollerState, DEFAULT_COMPLETION_DELAY,
    DEFAULT_POLL_INTERVAL,
};
pub use registry::JobRegistry;
pub use state::{AppState, TrackedStatus};
pub use types::{
    ActiveJob, CatalogPage, CatalogRecord, CatalogSource, ImportSource, JobId, JobSnapshot,
    JobStatus, ListingRequest, Pagination, RecordId,
};
pub use update::update;
pub use view_model::{
    format_file_size, mime_kind, short_id, AppViewModel, CatalogBody, CatalogRowView,
    CatalogView, ImportFormView, JobRowView, ProgressView,
};

//! Send Request Use Case
//!
//! Turns one tab's fields into exactly one outbound HTTP call and maps the
//! outcome into the normalized response shown in that tab.

use std::sync::Arc;

use courier_domain::{
    NormalizedResponse, OutboundRequest, RequestDraft, ResponseMeta, Tab, TabId,
};
use tracing::{info, warn};

use crate::error::SendError;
use crate::ports::{HttpClient, TransportResponse};

/// A validated snapshot of a tab's request fields.
///
/// Taking the snapshot at send time means later edits to the tab do not
/// leak into a request that is already in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSend {
    tab_id: TabId,
    draft: RequestDraft,
}

impl PreparedSend {
    /// Validates a tab and snapshots its request fields.
    ///
    /// # Errors
    ///
    /// Returns `SendError::EmptyUrl` when the URL is blank.
    pub fn from_tab(tab: &Tab) -> Result<Self, SendError> {
        if tab.request.url_is_blank() {
            return Err(SendError::EmptyUrl);
        }
        Ok(Self {
            tab_id: tab.id(),
            draft: tab.request.clone(),
        })
    }

    /// Returns the originating tab.
    #[must_use]
    pub const fn tab_id(&self) -> TabId {
        self.tab_id
    }

    /// Returns the request fields as captured.
    #[must_use]
    pub const fn draft(&self) -> &RequestDraft {
        &self.draft
    }
}

/// Use case for sending a tab's request.
///
/// Every outcome other than a blank URL, including malformed header or body
/// JSON, ends up as a `NormalizedResponse`.
///
/// # Example
///
/// ```ignore
/// let use_case = SendRequest::new(Arc::new(ReqwestHttpClient::new()?));
/// let response = use_case.execute(store.active_tab().unwrap()).await?;
/// ```
pub struct SendRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> SendRequest<C> {
    /// Creates a new `SendRequest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Validates and sends a tab's request.
    ///
    /// # Errors
    ///
    /// Returns `SendError` when the send is refused; nothing is dispatched.
    pub async fn execute(&self, tab: &Tab) -> Result<NormalizedResponse, SendError> {
        let prepared = PreparedSend::from_tab(tab)?;
        Ok(self.dispatch(prepared).await)
    }

    /// Builds and sends an already validated request.
    pub async fn dispatch(&self, prepared: PreparedSend) -> NormalizedResponse {
        let tab_id = prepared.tab_id();
        let request = match OutboundRequest::from_draft(prepared.draft()) {
            Ok(request) => request,
            Err(e) => {
                warn!(tab = %tab_id, error = %e, "request could not be built");
                return NormalizedResponse::error(e.to_string());
            }
        };

        info!(tab = %tab_id, method = %request.method, url = %request.url, "sending request");

        match self.client.execute(request).await {
            Ok(response) => {
                let normalized = normalize(response);
                info!(tab = %tab_id, status = ?normalized.status(), "response received");
                normalized
            }
            Err(e) => {
                warn!(tab = %tab_id, error = %e, "request failed without a response");
                NormalizedResponse::error(e.to_string())
            }
        }
    }
}

/// Maps a transport response to the normalized shape.
///
/// Statuses outside 2xx become failures that still carry the response.
#[must_use]
pub fn normalize(response: TransportResponse) -> NormalizedResponse {
    let meta = ResponseMeta {
        status: response.status,
        status_text: response.status_text,
        headers: response.headers,
        data: ResponseMeta::decode_data(&response.body),
    };
    if meta.is_success() {
        NormalizedResponse::success(meta)
    } else {
        let message = format!("Request failed with status code {}", meta.status);
        NormalizedResponse::http_error(message, meta)
    }
}

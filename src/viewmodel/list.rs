use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::client::ProductClient;
use crate::events::{Event, EventSender};
use crate::models::{Product, ProductId};
use crate::prompt::ConfirmationPrompt;

/// Where the list stands relative to the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    /// No fetch attempted yet
    Idle,

    /// A fetch is in flight
    Loading,

    /// The cached rows match the last successful fetch
    Loaded,

    /// The last operation failed; the message is operator-facing
    Failed(String),
}

/// Result of a delete request, including the paths that never reach the
/// service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No product with that id is currently listed
    UnknownId,

    /// The operator declined the confirmation
    Declined,

    /// The product was deleted and the catalog refetched
    Deleted,

    /// The service rejected the delete; the cached rows are unchanged
    Failed,
}

/// View-model for the product table: owns the cached rows, the load
/// phase, and the destructive flows that act on listed products.
pub struct ProductListModel {
    client: ProductClient,
    events: EventSender,
    prompt: Arc<dyn ConfirmationPrompt>,
    products: Vec<Product>,
    phase: ListPhase,
}

impl ProductListModel {
    pub fn new(
        client: ProductClient,
        events: EventSender,
        prompt: Arc<dyn ConfirmationPrompt>,
    ) -> Self {
        Self {
            client,
            events,
            prompt,
            products: Vec::new(),
            phase: ListPhase::Idle,
        }
    }

    /// Rows from the last successful fetch. Stale while the phase is
    /// [`ListPhase::Failed`], empty before the first fetch.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    /// Operator-facing message when the last operation failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            ListPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Refetches the catalog, replacing the cached rows wholesale.
    ///
    /// On failure the previous rows stay cached so a retry starts from
    /// the same place, but the phase carries the error.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) {
        self.phase = ListPhase::Loading;
        match self.client.list().await {
            Ok(products) => {
                debug!("Loaded {} products", products.len());
                self.products = products;
                self.phase = ListPhase::Loaded;
            }
            Err(e) => {
                error!("Failed to load products: {}", e);
                self.phase = ListPhase::Failed(format!("Failed to load products: {}", e));
            }
        }
    }

    /// Confirms and deletes a listed product, then refetches the catalog
    /// rather than patching the cached rows locally.
    #[instrument(skip(self))]
    pub async fn request_delete(&mut self, id: ProductId) -> DeleteOutcome {
        let Some(product) = self.find(id) else {
            warn!("Delete requested for unlisted product {}", id);
            return DeleteOutcome::UnknownId;
        };

        let question = format!(
            "Are you sure you want to delete the product \"{}\"?",
            product.name
        );
        if !self.prompt.confirm(&question) {
            debug!("Delete of product {} declined", id);
            return DeleteOutcome::Declined;
        }

        match self.client.delete(id).await {
            Ok(()) => {
                info!("Deleted product {}", id);
                self.refresh().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!("Failed to delete product {}: {}", id, e);
                self.phase = ListPhase::Failed(format!("Failed to delete product: {}", e));
                DeleteOutcome::Failed
            }
        }
    }

    /// Announces that a listed product should be staged for editing.
    /// Returns false when the id is not currently listed.
    #[instrument(skip(self))]
    pub async fn request_edit(&self, id: ProductId) -> bool {
        if self.find(id).is_none() {
            warn!("Edit requested for unlisted product {}", id);
            return false;
        }
        self.events.send(Event::EditRequested(id)).await;
        true
    }
}

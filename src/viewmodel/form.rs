use rust_decimal::Decimal;
use tracing::{error, info, instrument, warn};

use crate::client::ProductClient;
use crate::errors::DraftError;
use crate::events::{Event, EventSender};
use crate::models::{Product, ProductDraft, ProductId};

/// Which lifecycle the form is in. `Editing` carries the id of the
/// product whose canonical state was staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditingSession {
    Creating,
    Editing(ProductId),
}

/// The three staged inputs, addressable by the shell's `set` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Price,
    StockQuantity,
}

/// Raw operator input, kept as text until submit so invalid intermediate
/// states can be displayed and corrected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftFields {
    pub name: String,
    pub price: String,
    pub stock_quantity: String,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The draft was stored as a new product
    Created(Product),

    /// The canonical state of the edited product was replaced
    Updated(Product),

    /// Validation or the service rejected the draft; the staged fields
    /// survive and the stored error says why
    Rejected,
}

/// View-model for the product form: owns the editing session, the staged
/// field texts, and the submit lifecycle.
pub struct ProductFormModel {
    client: ProductClient,
    events: EventSender,
    session: EditingSession,
    fields: DraftFields,
    error: Option<String>,
    busy: bool,
}

impl ProductFormModel {
    pub fn new(client: ProductClient, events: EventSender) -> Self {
        Self {
            client,
            events,
            session: EditingSession::Creating,
            fields: DraftFields::default(),
            error: None,
            busy: false,
        }
    }

    pub fn session(&self) -> EditingSession {
        self.session
    }

    pub fn fields(&self) -> &DraftFields {
        &self.fields
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the form to a blank create session.
    pub fn enter_create(&mut self) {
        self.reset();
    }

    /// Stages the canonical server state of `id` for editing.
    ///
    /// The product is refetched rather than copied from the list, so the
    /// form never starts from a stale row. When the fetch fails the
    /// current session and fields are left untouched and the error is
    /// stored for display.
    #[instrument(skip(self))]
    pub async fn enter_edit(&mut self, id: ProductId) -> bool {
        self.busy = true;
        let staged = match self.client.get(id).await {
            Ok(product) => {
                self.session = EditingSession::Editing(product.id);
                self.stage(&product);
                true
            }
            Err(e) => {
                error!("Failed to load product {} for editing: {}", id, e);
                self.error = Some(format!("Failed to load product for editing: {}", e));
                false
            }
        };
        self.busy = false;
        staged
    }

    /// Overwrites one staged field with raw operator input and clears any
    /// displayed error.
    pub fn update_field(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.fields.name = value.to_string(),
            Field::Price => self.fields.price = value.to_string(),
            Field::StockQuantity => self.fields.stock_quantity = value.to_string(),
        }
        self.error = None;
    }

    /// Validates the staged fields in field order: name, then price, then
    /// stock quantity. Only the first failure is reported. On success the
    /// returned draft carries the trimmed name and parsed numbers.
    pub fn validate(&self) -> Result<ProductDraft, DraftError> {
        let name = self.fields.name.trim();
        if name.is_empty() {
            return Err(DraftError::NameRequired);
        }

        let price = self
            .fields
            .price
            .trim()
            .parse::<Decimal>()
            .ok()
            .filter(|p| *p > Decimal::ZERO)
            .ok_or(DraftError::InvalidPrice)?;

        let stock_quantity = self
            .fields
            .stock_quantity
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|q| *q >= 0)
            .ok_or(DraftError::InvalidStockQuantity)?;

        Ok(ProductDraft {
            name: name.to_string(),
            price,
            stock_quantity,
        })
    }

    /// Validates and persists the staged fields.
    ///
    /// A successful create resets the form to a blank create session; a
    /// successful update restages the stored version. On any rejection
    /// the staged fields survive untouched so the operator can correct
    /// them.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.busy {
            warn!("Submit ignored, a previous submit is still running");
            return SubmitOutcome::Rejected;
        }

        let draft = match self.validate() {
            Ok(draft) => draft,
            Err(e) => {
                self.error = Some(e.to_string());
                return SubmitOutcome::Rejected;
            }
        };

        self.busy = true;
        let outcome = match self.session {
            EditingSession::Creating => match self.client.create(&draft).await {
                Ok(product) => {
                    info!("Created product {}", product.id);
                    self.reset();
                    self.events.send(Event::Saved(product.id)).await;
                    SubmitOutcome::Created(product)
                }
                Err(e) => {
                    error!("Failed to create product: {}", e);
                    self.error = Some(format!("Failed to create product: {}", e));
                    SubmitOutcome::Rejected
                }
            },
            EditingSession::Editing(id) => match self.client.update(id, &draft).await {
                Ok(product) => {
                    info!("Updated product {}", id);
                    self.stage(&product);
                    self.events.send(Event::Saved(product.id)).await;
                    SubmitOutcome::Updated(product)
                }
                Err(e) => {
                    error!("Failed to update product {}: {}", id, e);
                    self.error = Some(format!("Failed to update product: {}", e));
                    SubmitOutcome::Rejected
                }
            },
        };
        self.busy = false;
        outcome
    }

    /// Abandons the current session, clears the fields, and announces the
    /// dismissal.
    #[instrument(skip(self))]
    pub async fn cancel(&mut self) {
        self.reset();
        self.events.send(Event::Cancelled).await;
    }

    fn reset(&mut self) {
        self.session = EditingSession::Creating;
        self.fields = DraftFields::default();
        self.error = None;
    }

    fn stage(&mut self, product: &Product) {
        self.fields = DraftFields {
            name: product.name.clone(),
            price: product.price.to_string(),
            stock_quantity: product.stock_quantity.to_string(),
        };
        self.error = None;
    }
}

pub mod form;
pub mod list;

pub use form::{DraftFields, EditingSession, Field, ProductFormModel, SubmitOutcome};
pub use list::{DeleteOutcome, ListPhase, ProductListModel};

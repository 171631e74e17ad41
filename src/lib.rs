//! Product Catalog Console Library
//!
//! This crate provides the REST client and view-models behind the
//! `produtos-console` binary: a list model mirroring the remote catalog
//! and a form model owning the create/edit lifecycle.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod client;
pub mod config;
pub mod display;
pub mod errors;
pub mod events;
pub mod models;
pub mod prompt;
pub mod viewmodel;

pub use client::ProductClient;
pub use errors::{ApiError, DraftError};
pub use events::{Event, EventSender};
pub use models::{Product, ProductDraft, ProductId};
pub use viewmodel::{
    DeleteOutcome, DraftFields, EditingSession, Field, ListPhase, ProductFormModel,
    ProductListModel, SubmitOutcome,
};

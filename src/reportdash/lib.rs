//! # Reportdash Architecture
//!
//! Reportdash is the core of a clinical report dashboard: an in-memory
//! collection of patient reports with a filtered, reorderable view, plus an
//! AI assistant that drafts and summarizes reports. The bundled CLI is one
//! client of it; a web or desktop front end would sit in the same place.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, owns the runtime       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - DashboardApi: store + assist pipeline behind one facade  │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                               │
//!                  ▼                               ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Commands (commands/*.rs)     │ │  Assist (assist/)         │
//! │  save, list, view, reorder,   │ │  draft + summary slots    │
//! │  remove, config               │ │  over a TextGenerator     │
//! └───────────────────────────────┘ └───────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/)                                             │
//! │  - RecordStore: ordered records, selection, filter          │
//! │  - SeedSource: bundled samples or a JSON file               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store and the assist pipeline never reference each other. Generated
//! text reaches the store only through a [`form::RecordForm`] that is saved.
//!
//! ## Positions
//!
//! The dashboard shows a filtered view; the store reorders by canonical
//! position. [`index`] translates between the two.
//!
//! ## No I/O in the Core
//!
//! From `api.rs` inward nothing prints, exits, or reads the terminal. The
//! only outbound I/O is the generator's HTTP call and reading seed/config
//! files.
//!
//! ## Module Overview
//!
//! - [`api`]: facade used by clients
//! - [`commands`]: one module per user-facing operation, returning `CmdResult`
//! - [`store`]: record collection and seeding
//! - [`filter`]: search, category and status selectors
//! - [`index`]: view/canonical position translation
//! - [`form`]: edit buffer and validation
//! - [`assist`]: draft/summary pipeline and the chat-completions generator
//! - [`model`]: records and their enums
//! - [`config`]: `config.json` handling
//! - [`error`]: error types

pub mod api;
pub mod assist;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod index;
pub mod model;
pub mod store;

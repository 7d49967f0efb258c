//! The content pipeline: raw markdown documents in, rendered pages out.
//!
//! # Pipeline
//!
//! ```text
//! raw file ──► front_matter::extract() ──► (metadata text, body)
//!                                               │          │
//!                                               ▼          ▼
//!                                   metadata::decode()  markdown::render()
//!                                               │          │
//!                                               ▼          ▼
//!                                          page::load_page() ──► Page
//! ```
//!
//! Each stage is pure: it returns a structured result or error and never
//! touches the terminal. Logging happens at the orchestrator layer.

pub mod front_matter;
pub mod markdown;
pub mod metadata;
pub mod page;

pub use page::{LoadedPage, Page, load_page};

//! Q&A search API abstraction.
//!
//! The retrieval pipeline talks to a `dyn SearchClient`; the shipped
//! implementation targets Stack Exchange API v2.3.

mod client;
mod types;

pub use client::{SearchClient, SearchConfig, StackExchangeClient};
pub use types::{SearchAnswer, SearchComment, SearchQuestion};

//! Wikipedia document retriever for agentwiki.
//!
//! Implements the `Retriever` capability against the MediaWiki query API:
//! one `generator=search` request per query returns plain-text intro
//! extracts for the best-matching articles, which become the passages the
//! agent cites as evidence.
//!
//! The agent loop treats this as a black box — no retry, no backoff;
//! failures propagate unchanged to the request boundary.

pub mod wikipedia;

pub use wikipedia::WikipediaRetriever;

//! splynx-api: Splynx REST transport implementing [`splynx_core::TicketSource`].

pub mod client;
pub mod envelope;

pub use client::{Credentials, SplynxClient, BULK_TIMEOUT, RECORD_TIMEOUT};

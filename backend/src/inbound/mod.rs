//! Inbound adapters translating domain results for external callers.

pub mod http;

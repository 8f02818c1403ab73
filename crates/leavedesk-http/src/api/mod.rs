//! HTTP transport for the LeaveDesk API.

mod client;
pub(crate) mod endpoints;

pub use client::HttpApi;

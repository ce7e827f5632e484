// flaremon-api: Async Rust client for the Cloudflare v4 analytics API and status page

pub mod analytics;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod status;
pub mod transport;
pub mod zones;

pub use analytics::{DashboardOptions, DnsReportOptions};
pub use auth::Credentials;
pub use client::CloudflareClient;
pub use error::Error;
pub use status::StatusPageClient;
pub use transport::TransportConfig;

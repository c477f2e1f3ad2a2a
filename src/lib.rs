//! Client library for administering merchant records over REST.
//!
//! The crate is split into layers:
//!
//! - [`models`]: the merchant record, its status and the list body shapes.
//! - [`client`]: async and blocking HTTP clients for the `/merchant/`
//!   endpoint (features `async` / `blocking`).
//! - [`repository`]: the traits the dashboard talks to, plus an in-memory
//!   implementation.
//! - [`dashboard`]: the list cache and editing session state machine.
//!
//! ```no_run
//! # async fn demo() -> merchant_admin::error::Result<()> {
//! use merchant_admin::client::MerchantClient;
//! use merchant_admin::dashboard::Dashboard;
//!
//! let client = MerchantClient::builder()
//!     .base_url("http://localhost:8000/api")
//!     .build()?;
//! let mut dashboard = Dashboard::new(client);
//! dashboard.start().await?;
//! for merchant in dashboard.merchants() {
//!     println!("{} [{:?}]", merchant.label(), merchant.status.style());
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(any(feature = "async", feature = "blocking"))]
pub mod client;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod repository;
pub mod session;
pub mod state;

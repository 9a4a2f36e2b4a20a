//! Async client for the OpenSky Network REST API.
//!
//! This library provides functionality to:
//! - Authenticate via the OAuth2 client-credentials grant and keep the
//!   bearer token fresh across calls
//! - Query live or historical aircraft state vectors, filtered by time,
//!   transponder address or geographic bounding box
//! - Track the remaining rate-limit credits reported by the service
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │    Query    │───▶│   Gateway   │───▶│   Decoder   │
//! │  (filters)  │    │  (dispatch) │    │  (records)  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                           │
//!                           ▼
//!                    ┌─────────────┐
//!                    │   Tokens    │
//!                    │  (OAuth2)   │
//!                    └─────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use opensky_client::{BoundingBox, ClientConfig, OpenSkyClient, StateFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenSkyClient::new(
//!         ClientConfig::new().with_credentials("client-id", "client-secret"),
//!     )?;
//!
//!     // Bounding box covering Switzerland
//!     let filter = StateFilter::new()
//!         .with_bounding_box(BoundingBox::new(45.8389, 47.8229, 5.9962, 10.5226));
//!
//!     for sv in client.get_states(&filter).await? {
//!         println!("{} {:?}", sv.icao24, sv.callsign);
//!     }
//!
//!     println!("credits remaining: {:?}", client.remaining_credits());
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod protocol;
pub mod query;
pub mod types;

pub use auth::{AuthError, Credentials, TokenManager};
pub use client::{ClientConfig, Error, OpenSkyClient};
pub use protocol::{decode_state_vector, decode_states, DecodeError, StatesResponse};
pub use query::{BoundingBox, StateFilter, ValidationError};
pub use types::{AircraftCategory, PositionSource, StateVector};

//! HTTP clients for the services the UI consumes.
//!
//! This crate provides:
//! - `RecommendationClient` for the recommendation backend
//!   (`GET /recommendations?user_id=&top_k=`)
//! - `TmdbClient` for per-card poster lookups
//!
//! Both sit behind object-safe async traits so the UI layer can be tested
//! against scripted sources. Neither client retries.

pub mod error;
pub mod posters;
pub mod recommendations;

pub use error::{ClientError, LookupError};
pub use posters::{
    DEFAULT_POSTER_API_BASE, DEFAULT_POSTER_IMAGE_BASE, PosterConfig, PosterSource, TmdbClient,
};
pub use recommendations::{
    ClientConfig, DEFAULT_BACKEND_URL, RecommendationClient, RecommendationSource, ServiceStatus,
};

//! # Model Crate
//!
//! Value types shared by the recommendation client and the UI layer.
//!
//! ## Main Components
//!
//! - **types**: Recommendation records, the validated user query, request parameters
//! - **state**: `RequestState` and `PosterLookupState`
//! - **error**: Input validation errors
//!
//! ## Example Usage
//!
//! ```
//! use model::{RecommendationRequest, UserQuery, DEFAULT_TOP_K};
//!
//! let query = UserQuery::parse(" 42 ").unwrap();
//! let request = RecommendationRequest::new(query, DEFAULT_TOP_K);
//! assert_eq!(request.user_id.as_str(), "42");
//! ```

pub mod error;
pub mod state;
pub mod types;

pub use error::{Result, VALIDATION_MESSAGE, ValidationError};
pub use state::{FAILURE_MESSAGE, PosterLookupState, RequestState};
pub use types::{
    DEFAULT_TOP_K, MovieId, Recommendation, RecommendationRequest, RecommendationResult, TmdbId,
    UserQuery,
};

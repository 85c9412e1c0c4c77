//! API Module
//!
//! HTTP handlers and routing for the post REST API.
//!
//! # Endpoints
//! - `POST /api/v1/posts` - Create a post
//! - `GET /api/v1/posts` - List posts with optional status/type filters
//! - `GET /api/v1/posts/search?q=` - Search titles and content
//! - `GET /api/v1/posts/:id` - Fetch a post (served through the cache)
//! - `PUT /api/v1/posts/:id` - Partially update a post
//! - `DELETE /api/v1/posts/:id` - Delete a post
//! - `GET /api/v1/cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

//! HTTP protocol layer module
//!
//! Response builders and cache headers, decoupled from the route table.

pub mod cache;
pub mod response;

// Re-export commonly used types
pub use cache::CachePolicy;
pub use response::{
    build_404_response, build_405_response, build_503_response, build_json_response,
    build_options_response,
};

//! HTTP protocol layer module
//!
//! Response builders and cache validation, independent of how pages are assembled.

pub mod cache;
pub mod response;

pub use response::{
    build_304_response, build_404_response, build_405_response, build_health_response,
    build_options_response, build_page_response,
};

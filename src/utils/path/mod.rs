//! Path and URL utilities.
//!
//! - [`fs`]: filesystem path normalization
//! - [`route`]: URL string helpers (`is_external_link`, `split_path_fragment`)
//! - [`slug`]: slugification for ids and route segments

pub mod fs;
pub mod route;
pub mod slug;

pub use fs::normalize_path;

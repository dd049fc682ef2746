//! Auxiliary files derived from the route table.
//!
//! - **Sitemap**: Search engine indexing (`sitemap.xml`)

pub mod sitemap;

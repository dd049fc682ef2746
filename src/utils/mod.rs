//! Shared helpers with no site state.

pub mod hash;
pub mod html;
pub mod mime;
pub mod path;
mod plural;
mod time;

pub use plural::plural_count;
pub use time::current_year;

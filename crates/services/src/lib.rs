//! services/src/lib.rs
//!
//! Feed content producers: the per-flavour defaults written into a new
//! feed and the mapping of CMS posts onto items.

pub mod cms_items;
pub mod default_content;

pub use cms_items::truncate_with_ellipses;
pub use default_content::DefaultContentGenerator;

//! Dashboard module
//!
//! Location-keyed fragment resolution and page assembly:
//! - Location defaulting and fragment naming
//! - Page template descriptors
//! - Fragment stores and data freshness sources
//! - Assembly into a `PageModel` and rendering to HTML

pub mod assembler;
pub mod error;
pub mod freshness;
pub mod location;
pub mod render;
pub mod store;
pub mod template;

pub use assembler::PageAssembler;
pub use freshness::{FreshnessSource, FsFreshnessSource};
pub use location::{LocationKey, LocationResolver, SuffixTable};
pub use render::render_page;
pub use store::{FragmentStore, FsFragmentStore};
pub use template::{load_templates, PageTemplateDescriptor};

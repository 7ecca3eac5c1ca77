//! Catalog content model and content collaborators.
//!
//! # Data Flow
//! ```text
//! catalog fixture (JSON)
//!     → memory.rs (validate tree, build indexes)
//!     → InMemoryCatalog
//!         ├─ ContentRepository   (get, children)
//!         └─ SeoUriResolver      (flat SEO index per locale)
//!     → path.rs (StructuralPathBuilder walks parents up to the commerce root)
//! ```
//!
//! # Design Decisions
//! - Routers only read content; nodes are shared as `Arc<ContentNode>`
//! - Identity comparison for routing ignores the draft (work) version
//! - URL segments and SEO paths are compared case-insensitively

pub mod memory;
pub mod path;
pub mod repository;
pub mod types;

pub use memory::{CatalogError, InMemoryCatalog};
pub use path::StructuralPathBuilder;
pub use repository::{ContentRepository, SeoUriResolver, VirtualPathBuilder};
pub use types::{ContentKind, ContentNode, ContentRef, Locale};

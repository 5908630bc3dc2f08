//! Content module - loads, filters and indexes blog posts

mod date;
mod error;
mod frontmatter;
mod index;
pub mod loader;
mod markdown;
mod post;
pub mod scan;
mod slug;
mod store;

pub use date::{parse_date, DateError};
pub use error::LoadError;
pub use frontmatter::{split as split_front_matter, FrontMatter};
pub use index::PostIndex;
pub use loader::{is_visible, Clock, StoreOptions};
pub use markdown::{MarkdownRenderer, Render, RenderError};
pub use post::Post;
pub use slug::{slugify, FALLBACK_SLUG};
pub use store::PostStore;

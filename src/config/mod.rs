//! Configuration module

mod runtime;
mod site;

pub use runtime::{Env, RuntimeConfig};
pub use site::{Links, NavItem, SiteConfig};

//! folio — personal portfolio page server.
//!
//! Renders one themed page per request: a profile sidebar with a contact
//! form that emails the owner, and the owner's public GitHub repositories
//! with their READMEs.

pub mod config;
pub mod github;
pub mod logging;
pub mod markdown;
pub mod notifier;
pub mod page;
pub mod profile;
pub mod server;
pub mod theme;

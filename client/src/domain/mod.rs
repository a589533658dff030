//! Domain layer
//!
//! Contains pure view-layer models with no I/O.
//! - `entities`: Posts, feeds and votes
//! - `ports`: Trait definitions for the collaborators the components need

pub mod entities;
pub mod ports;

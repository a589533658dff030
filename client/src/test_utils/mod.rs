//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Manual mocks instead of mockall: the components need endpoints that can be
//! held open mid-request to observe optimistic and loading states, which is
//! simpler to express with a oneshot per endpoint than with expectations.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

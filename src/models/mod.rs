//! Data models for the community portal.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod contact;
mod event;
mod forum;
mod gallery;
mod portal;
mod profile;
mod publication;

pub use contact::*;
pub use event::*;
pub use forum::*;
pub use gallery::*;
pub use portal::*;
pub use profile::*;
pub use publication::*;

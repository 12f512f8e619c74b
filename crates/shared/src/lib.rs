//! Types shared between the profile loader and the desktop client.

pub mod domain;
pub mod error;
pub mod protocol;

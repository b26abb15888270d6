//! Common re-usable types shared by the transport and the API surface.

mod common;
mod response;

pub use common::*;
pub use response::*;

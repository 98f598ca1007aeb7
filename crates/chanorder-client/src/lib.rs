//! Emby live-TV channel-management client.
//!
//! Implements the `chanorder-core` capability traits over HTTP. Every
//! request carries the `X-Emby-Token` header.

pub mod emby;

pub use emby::{EmbyClient, TOKEN_HEADER};

//! Rust client for the VideoDB composition API.
//!
//! A [`Timeline`] arranges stored media into one composed stream:
//!
//! - inline [`VideoAsset`]s play back-to-back on the primary track
//! - overlay [`AudioAsset`]s, [`ImageAsset`]s and [`TextAsset`]s sit above it at fixed offsets
//! - [`Timeline::generate_stream`] sends the composition to a [`StreamResolver`]
//!   (normally a [`Connection`]) and returns the resulting [`StreamRef`]
//!
//! The multi-track [`editor`] model covers the richer clip-based endpoint.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod composition;
mod foundation;

/// Multi-track editor timelines.
pub mod editor;

pub use crate::foundation::core::{MAX_FADE_DURATION_SEC, SourceRange};
pub use crate::foundation::error::{VideodbError, VideodbResult};

pub use crate::composition::asset::{
    Asset, AssetKind, AudioAsset, AudioAssetBuilder, ImageAsset, ImageAssetBuilder, TextAsset,
    TextAssetBuilder, VideoAsset, VideoAssetBuilder,
};
pub use crate::composition::fingerprint::TimelineFingerprint;
pub use crate::composition::request::{REQUEST_TYPE_COMPILE, TIMELINE_PATH, TimelineRequest};
pub use crate::composition::stream::{StreamRef, StreamResolver};
pub use crate::composition::style::{Coord, TextStyle};
pub use crate::composition::timeline::{InlineSlot, Overlay, Placement, Timeline};

pub use crate::client::config::{API_KEY_ENV, BASE_URL_ENV, ClientConfig, VIDEO_DB_API};
pub use crate::client::connection::{Connection, connect};
pub use crate::client::http::{HttpClient, client_header_value};

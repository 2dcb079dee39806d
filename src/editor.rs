//! Multi-track editor timelines.
//!
//! An [`EditorTimeline`] holds [`Track`]s of [`Clip`]s; each clip shows one
//! [`EditorAsset`] for a time window with its own fit, position, filter and
//! transitions. The whole timeline is rendered server-side by
//! [`EditorTimeline::generate_stream`].

mod dsl;
mod model;
mod timeline;

pub use dsl::{ClipBuilder, TrackBuilder};
pub use model::{
    Alignment, AudioAsset, Background, Border, BorderAndShadow, CaptionAlignment,
    CaptionAnimation, CaptionAsset, CaptionBorderStyle, Clip, Crop, EditorAsset, Filter, Fit,
    Font, FontStyling, HorizontalAlignment, ImageAsset, Offset, Position, Positioning, Shadow,
    TextAlignment, TextAsset, Track, Transition, VerticalAlignment, VideoAsset,
};
pub use timeline::{DOWNLOAD_PATH, EDITOR_PATH, EditorTimeline};

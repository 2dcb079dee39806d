use crate::{
    composition::asset::{Asset, AudioAsset, ImageAsset, TextAsset, VideoAsset},
    composition::fingerprint::{TimelineFingerprint, fingerprint_placements},
    composition::stream::{StreamRef, StreamResolver},
    composition::style::TextStyle,
    composition::timeline::{self, InlineSlot, Overlay, Placement},
    foundation::error::{VideodbError, VideodbResult},
};

/// API path that compiles a timeline into a stream.
pub const TIMELINE_PATH: &str = "timeline";
/// `request_type` sent with every timeline compile request.
pub const REQUEST_TYPE_COMPILE: &str = "compile";

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(try_from = "WireTimelineIn")]
/// Immutable, serializable form of a [`crate::Timeline`].
///
/// Serializes to the compile request body:
///
/// ```json
/// {"request_type": "compile", "timeline": [{"asset_id": "m-1", "start": 0.0, "end": 30.0}]}
/// ```
///
/// Entries keep overall insertion order; overlay entries carry `overlay_start`.
pub struct TimelineRequest {
    placements: Vec<Placement>,
}

impl TimelineRequest {
    pub(crate) fn from_placements(placements: Vec<Placement>) -> Self {
        Self { placements }
    }

    pub(crate) fn into_placements(self) -> Vec<Placement> {
        self.placements
    }

    /// All placements in insertion order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Inline assets in track order.
    pub fn inline_assets(&self) -> impl Iterator<Item = &VideoAsset> {
        timeline::inline_assets(&self.placements)
    }

    /// Overlays in stacking order.
    pub fn overlays(&self) -> impl Iterator<Item = &Overlay> {
        timeline::overlays(&self.placements)
    }

    /// Effective start and length of every inline asset.
    pub fn inline_schedule(&self) -> Vec<InlineSlot<'_>> {
        timeline::inline_schedule(&self.placements)
    }

    /// Total inline-track length, when every segment is bounded.
    pub fn inline_duration(&self) -> Option<f64> {
        timeline::inline_duration(&self.placements)
    }

    /// Stable content hash; equal requests hash equally.
    pub fn fingerprint(&self) -> TimelineFingerprint {
        fingerprint_placements(&self.placements)
    }

    /// Compile request body.
    pub fn to_json(&self) -> VideodbResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse a compile request body (the local inverse of [`Self::to_json`]).
    ///
    /// Every entry is re-validated through the asset builders.
    pub fn from_json(value: &serde_json::Value) -> VideodbResult<Self> {
        let wire: WireTimelineIn = serde_json::from_value(value.clone())?;
        Self::try_from(wire)
    }

    /// Send the request to `resolver` and return the stream it produced.
    ///
    /// May be called repeatedly; the resolver decides whether to re-render.
    #[tracing::instrument(skip_all, fields(fingerprint = %self.fingerprint(), placements = self.placements.len()))]
    pub fn resolve(&self, resolver: &dyn StreamResolver) -> VideodbResult<StreamRef> {
        let body = self.to_json()?;
        let data = resolver.send(TIMELINE_PATH, &body)?;
        let stream = StreamRef::from_data(&data)?;
        tracing::debug!(stream_url = %stream.stream_url, "timeline resolved");
        Ok(stream)
    }
}

impl serde::Serialize for TimelineRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireTimelineOut {
            request_type: REQUEST_TYPE_COMPILE,
            timeline: self.placements.iter().map(WireEntryOut::from).collect(),
        }
        .serialize(serializer)
    }
}

#[derive(serde::Serialize)]
struct WireTimelineOut<'a> {
    request_type: &'static str,
    timeline: Vec<WireEntryOut<'a>>,
}

#[derive(serde::Serialize)]
struct WireEntryOut<'a> {
    #[serde(flatten)]
    asset: WireAssetOut<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    overlay_start: Option<f64>,
}

#[derive(serde::Serialize)]
#[serde(untagged)]
enum WireAssetOut<'a> {
    Inline(&'a VideoAsset),
    Overlay(&'a Asset),
}

impl<'a> From<&'a Placement> for WireEntryOut<'a> {
    fn from(p: &'a Placement) -> Self {
        match p {
            Placement::Inline(v) => Self {
                asset: WireAssetOut::Inline(v),
                overlay_start: None,
            },
            Placement::Overlay(o) => Self {
                asset: WireAssetOut::Overlay(o.asset()),
                overlay_start: Some(o.start_offset()),
            },
        }
    }
}

#[derive(serde::Deserialize)]
struct WireTimelineIn {
    #[serde(default)]
    request_type: Option<String>,
    timeline: Vec<WireEntryIn>,
}

#[derive(Default, serde::Deserialize)]
#[serde(default)]
struct WireEntryIn {
    asset_id: Option<String>,
    start: Option<f64>,
    end: Option<f64>,
    disable_other_tracks: Option<bool>,
    fade_in_duration: Option<f64>,
    fade_out_duration: Option<f64>,
    width: Option<u32>,
    height: Option<u32>,
    x: Option<i64>,
    y: Option<i64>,
    duration: Option<f64>,
    text: Option<String>,
    style: Option<TextStyle>,
    overlay_start: Option<f64>,
}

impl TryFrom<WireTimelineIn> for TimelineRequest {
    type Error = VideodbError;

    fn try_from(wire: WireTimelineIn) -> VideodbResult<Self> {
        if let Some(kind) = wire.request_type.as_deref()
            && kind != REQUEST_TYPE_COMPILE
        {
            return Err(VideodbError::invalid_argument(format!(
                "unsupported request_type '{kind}'"
            )));
        }

        let mut timeline = timeline::Timeline::new();
        for (idx, entry) in wire.timeline.into_iter().enumerate() {
            let annotate = |e: VideodbError| match e {
                VideodbError::InvalidArgument(msg) => {
                    VideodbError::invalid_argument(format!("timeline entry {idx}: {msg}"))
                }
                other => other,
            };
            match entry.overlay_start {
                None => timeline.add_inline(entry.into_inline().map_err(annotate)?),
                Some(offset) => {
                    let asset = entry.into_overlay_asset().map_err(annotate)?;
                    timeline.add_overlay(offset, asset).map_err(annotate)?;
                }
            }
        }
        Ok(timeline.build())
    }
}

impl WireEntryIn {
    fn into_inline(self) -> VideodbResult<VideoAsset> {
        if self.text.is_some() {
            return Err(VideodbError::invalid_argument(
                "inline entries must be video assets",
            ));
        }
        self.into_video()
    }

    fn into_video(self) -> VideodbResult<VideoAsset> {
        let mut b = VideoAsset::builder(self.asset_id.unwrap_or_default());
        if let Some(start) = self.start {
            b = b.start(start);
        }
        if let Some(end) = self.end {
            b = b.end(end);
        }
        b.build()
    }

    fn into_overlay_asset(self) -> VideodbResult<Asset> {
        if let Some(text) = self.text {
            let mut b = TextAsset::builder(text).style(self.style.unwrap_or_default());
            if let Some(d) = self.duration {
                b = b.duration(d);
            }
            return Ok(b.build()?.into());
        }

        let is_audio = self.disable_other_tracks.is_some()
            || self.fade_in_duration.is_some()
            || self.fade_out_duration.is_some();
        if is_audio {
            let mut b = AudioAsset::builder(self.asset_id.unwrap_or_default());
            if let Some(start) = self.start {
                b = b.start(start);
            }
            if let Some(end) = self.end {
                b = b.end(end);
            }
            if let Some(v) = self.disable_other_tracks {
                b = b.disable_other_tracks(v);
            }
            if let Some(v) = self.fade_in_duration {
                b = b.fade_in_duration(v);
            }
            if let Some(v) = self.fade_out_duration {
                b = b.fade_out_duration(v);
            }
            return Ok(b.build()?.into());
        }

        if self.start.is_some() || self.end.is_some() {
            return Err(VideodbError::invalid_argument(
                "image overlay entries take no start/end; audio entries need a fade or disable_other_tracks key",
            ));
        }
        let mut b = ImageAsset::builder(self.asset_id.unwrap_or_default());
        if let Some(v) = self.width {
            b = b.width(v);
        }
        if let Some(v) = self.height {
            b = b.height(v);
        }
        if let Some(v) = self.x {
            b = b.x(v);
        }
        if let Some(v) = self.y {
            b = b.y(v);
        }
        if let Some(d) = self.duration {
            b = b.duration(d);
        }
        Ok(b.build()?.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/request.rs"]
mod tests;

use crate::{
    composition::stream::{StreamRef, StreamResolver},
    editor::model::{Clip, Track},
    foundation::{
        core::ensure_non_empty,
        error::{VideodbError, VideodbResult},
    },
};

/// API path that renders an editor timeline into a stream.
pub const EDITOR_PATH: &str = "editor";
/// API path that exports a rendered stream as a downloadable file.
pub const DOWNLOAD_PATH: &str = "timeline_v2/download";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Multi-track editor timeline.
///
/// Serializes (under a `timeline` key, see [`Self::to_json`]) to:
///
/// ```json
/// {"timeline": {"background": "#000000", "resolution": "1280x720", "tracks": [{"clips": []}]}}
/// ```
pub struct EditorTimeline {
    /// Canvas color behind all tracks.
    #[serde(default = "default_background")]
    pub background: String,
    /// Output size as `"<width>x<height>"`.
    #[serde(default = "default_resolution")]
    pub resolution: String,
    /// Tracks, bottom to top.
    #[serde(default)]
    pub tracks: Vec<Track>,
}

fn default_background() -> String {
    "#000000".to_string()
}

fn default_resolution() -> String {
    "1280x720".to_string()
}

impl Default for EditorTimeline {
    fn default() -> Self {
        Self {
            background: default_background(),
            resolution: default_resolution(),
            tracks: Vec::new(),
        }
    }
}

impl EditorTimeline {
    /// Empty 1280x720 timeline on black.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track above existing ones.
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Append `clip` to the track at `track_index`.
    pub fn add_clip(&mut self, track_index: usize, clip: Clip) -> VideodbResult<()> {
        let count = self.tracks.len();
        let track = self.tracks.get_mut(track_index).ok_or_else(|| {
            VideodbError::invalid_argument(format!(
                "track index {track_index} out of range ({count} tracks)"
            ))
        })?;
        track.add_clip(clip);
        Ok(())
    }

    /// Output width and height parsed from [`Self::resolution`].
    pub fn dimensions(&self) -> VideodbResult<(u32, u32)> {
        let bad = || {
            VideodbError::invalid_argument(format!(
                "resolution must look like 1280x720 (got '{}')",
                self.resolution
            ))
        };
        let (w, h) = self.resolution.split_once('x').ok_or_else(bad)?;
        let w: u32 = w.trim().parse().map_err(|_| bad())?;
        let h: u32 = h.trim().parse().map_err(|_| bad())?;
        if w == 0 || h == 0 {
            return Err(bad());
        }
        Ok((w, h))
    }

    /// Validate canvas settings and every clip.
    pub fn validate(&self) -> VideodbResult<()> {
        ensure_non_empty(&self.background, "timeline background")?;
        self.dimensions()?;
        for (ti, track) in self.tracks.iter().enumerate() {
            for (ci, clip) in track.clips.iter().enumerate() {
                clip.validate().map_err(|e| match e {
                    VideodbError::InvalidArgument(msg) => VideodbError::invalid_argument(
                        format!("track {ti} clip {ci}: {msg}"),
                    ),
                    other => other,
                })?;
            }
        }
        Ok(())
    }

    /// Number of clips across all tracks.
    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(|t| t.clips.len()).sum()
    }

    /// Latest clip end across all tracks, in seconds.
    pub fn duration_sec(&self) -> f64 {
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter())
            .map(|c| c.start + c.length)
            .fold(0.0, f64::max)
    }

    /// Render request body.
    pub fn to_json(&self) -> VideodbResult<serde_json::Value> {
        Ok(serde_json::json!({ "timeline": serde_json::to_value(self)? }))
    }

    /// Parse a render request body, or a bare timeline object.
    pub fn from_json(value: &serde_json::Value) -> VideodbResult<Self> {
        let inner = value.get("timeline").unwrap_or(value);
        let timeline: Self = serde_json::from_value(inner.clone())?;
        timeline.validate()?;
        Ok(timeline)
    }

    /// Validate, send to `resolver`, and return the rendered stream.
    #[tracing::instrument(skip_all, fields(tracks = self.tracks.len(), clips = self.clip_count()))]
    pub fn generate_stream(&self, resolver: &dyn StreamResolver) -> VideodbResult<StreamRef> {
        self.validate()?;
        let body = self.to_json()?;
        let data = resolver.send(EDITOR_PATH, &body)?;
        let stream = StreamRef::from_data(&data)?;
        tracing::debug!(stream_url = %stream.stream_url, "editor timeline rendered");
        Ok(stream)
    }

    /// Ask the service to export `stream_url` as a file; returns the response data.
    #[tracing::instrument(skip(self, resolver))]
    pub fn download_stream(
        &self,
        resolver: &dyn StreamResolver,
        stream_url: &str,
    ) -> VideodbResult<serde_json::Value> {
        ensure_non_empty(stream_url, "stream_url")?;
        resolver.send(
            DOWNLOAD_PATH,
            &serde_json::json!({ "stream_url": stream_url }),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/timeline.rs"]
mod tests;

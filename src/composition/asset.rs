use crate::{
    composition::style::TextStyle,
    foundation::core::{
        MAX_FADE_DURATION_SEC, SourceRange, canonical_zero, ensure_non_empty,
        ensure_non_negative, ensure_positive,
    },
    foundation::error::{VideodbError, VideodbResult},
};

/// Discriminant of an [`Asset`], used in diagnostics and placement checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Stored video media.
    Video,
    /// Stored audio media.
    Audio,
    /// Stored image media.
    Image,
    /// Inline text.
    Text,
}

impl AssetKind {
    /// Lowercase name as used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Image => "image",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
/// An asset placed on a [`crate::Timeline`].
///
/// Assets are immutable once built. Adding one to a timeline moves it, so every
/// value backs exactly one placement.
pub enum Asset {
    /// Video asset.
    Video(VideoAsset),
    /// Audio asset.
    Audio(AudioAsset),
    /// Image asset.
    Image(ImageAsset),
    /// Text asset.
    Text(TextAsset),
}

impl Asset {
    /// Variant discriminant.
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Video(_) => AssetKind::Video,
            Self::Audio(_) => AssetKind::Audio,
            Self::Image(_) => AssetKind::Image,
            Self::Text(_) => AssetKind::Text,
        }
    }

    /// Stored-media reference; `None` for text.
    pub fn asset_id(&self) -> Option<&str> {
        match self {
            Self::Video(a) => Some(a.asset_id()),
            Self::Audio(a) => Some(a.asset_id()),
            Self::Image(a) => Some(a.asset_id()),
            Self::Text(_) => None,
        }
    }

    /// Known play length in seconds, if the asset bounds it.
    pub fn duration_sec(&self) -> Option<f64> {
        match self {
            Self::Video(a) => a.range().duration_sec(),
            Self::Audio(a) => a.range().duration_sec(),
            Self::Image(a) => a.duration(),
            Self::Text(a) => a.duration(),
        }
    }
}

impl From<VideoAsset> for Asset {
    fn from(a: VideoAsset) -> Self {
        Self::Video(a)
    }
}

impl From<AudioAsset> for Asset {
    fn from(a: AudioAsset) -> Self {
        Self::Audio(a)
    }
}

impl From<ImageAsset> for Asset {
    fn from(a: ImageAsset) -> Self {
        Self::Image(a)
    }
}

impl From<TextAsset> for Asset {
    fn from(a: TextAsset) -> Self {
        Self::Text(a)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A sub-range of a stored video.
pub struct VideoAsset {
    asset_id: String,
    #[serde(flatten)]
    range: SourceRange,
}

impl VideoAsset {
    /// Start a builder for the video stored under `asset_id`.
    pub fn builder(asset_id: impl Into<String>) -> VideoAssetBuilder {
        VideoAssetBuilder {
            asset_id: asset_id.into(),
            start: 0.0,
            end: None,
        }
    }

    /// The whole stored video.
    pub fn new(asset_id: impl Into<String>) -> VideodbResult<Self> {
        Self::builder(asset_id).build()
    }

    /// Stored-media reference.
    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    /// Selected source range.
    pub fn range(&self) -> SourceRange {
        self.range
    }
}

/// Builder for [`VideoAsset`] values.
pub struct VideoAssetBuilder {
    asset_id: String,
    start: f64,
    end: Option<f64>,
}

impl VideoAssetBuilder {
    /// Source start in seconds (default `0`).
    pub fn start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    /// Source end in seconds (default: end of media).
    pub fn end(mut self, end: f64) -> Self {
        self.end = Some(end);
        self
    }

    /// Build a validated [`VideoAsset`].
    pub fn build(self) -> VideodbResult<VideoAsset> {
        ensure_non_empty(&self.asset_id, "video asset asset_id")?;
        let range = SourceRange::new(self.start, self.end).map_err(|e| prefixed("video", e))?;
        Ok(VideoAsset {
            asset_id: self.asset_id,
            range,
        })
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A sub-range of a stored audio track, mixed over the timeline.
pub struct AudioAsset {
    asset_id: String,
    #[serde(flatten)]
    range: SourceRange,
    disable_other_tracks: bool,
    fade_in_duration: f64,
    fade_out_duration: f64,
}

impl AudioAsset {
    /// Start a builder for the audio stored under `asset_id`.
    pub fn builder(asset_id: impl Into<String>) -> AudioAssetBuilder {
        AudioAssetBuilder {
            asset_id: asset_id.into(),
            start: 0.0,
            end: None,
            disable_other_tracks: true,
            fade_in_duration: 0.0,
            fade_out_duration: 0.0,
        }
    }

    /// The whole stored audio with default mixing.
    pub fn new(asset_id: impl Into<String>) -> VideodbResult<Self> {
        Self::builder(asset_id).build()
    }

    /// Stored-media reference.
    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    /// Selected source range.
    pub fn range(&self) -> SourceRange {
        self.range
    }

    /// Whether other audio is muted while this one plays.
    pub fn disable_other_tracks(&self) -> bool {
        self.disable_other_tracks
    }

    /// Fade-in length in seconds.
    pub fn fade_in_duration(&self) -> f64 {
        self.fade_in_duration
    }

    /// Fade-out length in seconds.
    pub fn fade_out_duration(&self) -> f64 {
        self.fade_out_duration
    }
}

/// Builder for [`AudioAsset`] values.
pub struct AudioAssetBuilder {
    asset_id: String,
    start: f64,
    end: Option<f64>,
    disable_other_tracks: bool,
    fade_in_duration: f64,
    fade_out_duration: f64,
}

impl AudioAssetBuilder {
    /// Source start in seconds (default `0`).
    pub fn start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    /// Source end in seconds (default: end of media).
    pub fn end(mut self, end: f64) -> Self {
        self.end = Some(end);
        self
    }

    /// Mute the other tracks while this audio plays (default `true`).
    pub fn disable_other_tracks(mut self, v: bool) -> Self {
        self.disable_other_tracks = v;
        self
    }

    /// Fade-in length in seconds (default `0`).
    pub fn fade_in_duration(mut self, sec: f64) -> Self {
        self.fade_in_duration = sec;
        self
    }

    /// Fade-out length in seconds (default `0`).
    pub fn fade_out_duration(mut self, sec: f64) -> Self {
        self.fade_out_duration = sec;
        self
    }

    /// Build a validated [`AudioAsset`].
    pub fn build(self) -> VideodbResult<AudioAsset> {
        ensure_non_empty(&self.asset_id, "audio asset asset_id")?;
        let range = SourceRange::new(self.start, self.end).map_err(|e| prefixed("audio", e))?;
        check_fade(self.fade_in_duration, "audio asset fade_in_duration")?;
        check_fade(self.fade_out_duration, "audio asset fade_out_duration")?;
        Ok(AudioAsset {
            asset_id: self.asset_id,
            range,
            disable_other_tracks: self.disable_other_tracks,
            fade_in_duration: canonical_zero(self.fade_in_duration),
            fade_out_duration: canonical_zero(self.fade_out_duration),
        })
    }
}

fn check_fade(sec: f64, field: &str) -> VideodbResult<()> {
    ensure_non_negative(sec, field)?;
    if sec > MAX_FADE_DURATION_SEC {
        tracing::warn!(
            field,
            sec,
            max = MAX_FADE_DURATION_SEC,
            "fade is longer than the supported maximum"
        );
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A stored image shown as an overlay.
pub struct ImageAsset {
    asset_id: String,
    width: u32,
    height: u32,
    x: i64,
    y: i64,
    duration: Option<f64>,
}

impl ImageAsset {
    /// Start a builder for the image stored under `asset_id`.
    pub fn builder(asset_id: impl Into<String>) -> ImageAssetBuilder {
        ImageAssetBuilder {
            asset_id: asset_id.into(),
            width: 100,
            height: 100,
            x: 80,
            y: 20,
            duration: None,
        }
    }

    /// Stored-media reference.
    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    /// Rendered width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Rendered height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Left edge in pixels.
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Top edge in pixels.
    pub fn y(&self) -> i64 {
        self.y
    }

    /// Visible time in seconds; `None` leaves it to the service.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }
}

/// Builder for [`ImageAsset`] values.
pub struct ImageAssetBuilder {
    asset_id: String,
    width: u32,
    height: u32,
    x: i64,
    y: i64,
    duration: Option<f64>,
}

impl ImageAssetBuilder {
    /// Rendered width in pixels (default `100`).
    pub fn width(mut self, px: u32) -> Self {
        self.width = px;
        self
    }

    /// Rendered height in pixels (default `100`).
    pub fn height(mut self, px: u32) -> Self {
        self.height = px;
        self
    }

    /// Left edge in pixels (default `80`).
    pub fn x(mut self, px: i64) -> Self {
        self.x = px;
        self
    }

    /// Top edge in pixels (default `20`).
    pub fn y(mut self, px: i64) -> Self {
        self.y = px;
        self
    }

    /// Visible time in seconds.
    pub fn duration(mut self, sec: f64) -> Self {
        self.duration = Some(sec);
        self
    }

    /// Build a validated [`ImageAsset`].
    pub fn build(self) -> VideodbResult<ImageAsset> {
        ensure_non_empty(&self.asset_id, "image asset asset_id")?;
        if self.width == 0 || self.height == 0 {
            return Err(VideodbError::invalid_argument(
                "image asset width/height must be > 0",
            ));
        }
        if let Some(d) = self.duration {
            ensure_positive(d, "image asset duration")?;
        }
        Ok(ImageAsset {
            asset_id: self.asset_id,
            width: self.width,
            height: self.height,
            x: self.x,
            y: self.y,
            duration: self.duration,
        })
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Literal text drawn as an overlay.
pub struct TextAsset {
    text: String,
    duration: Option<f64>,
    style: TextStyle,
}

impl TextAsset {
    /// Start a builder for `text`.
    pub fn builder(text: impl Into<String>) -> TextAssetBuilder {
        TextAssetBuilder {
            text: text.into(),
            duration: None,
            style: TextStyle::default(),
        }
    }

    /// Text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Visible time in seconds; `None` leaves it to the service.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Rendering style.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }
}

/// Builder for [`TextAsset`] values.
pub struct TextAssetBuilder {
    text: String,
    duration: Option<f64>,
    style: TextStyle,
}

impl TextAssetBuilder {
    /// Visible time in seconds.
    pub fn duration(mut self, sec: f64) -> Self {
        self.duration = Some(sec);
        self
    }

    /// Rendering style (default [`TextStyle::default`]).
    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Build a validated [`TextAsset`].
    pub fn build(self) -> VideodbResult<TextAsset> {
        ensure_non_empty(&self.text, "text asset text")?;
        if let Some(d) = self.duration {
            ensure_positive(d, "text asset duration")?;
        }
        if !(0.0..=1.0).contains(&self.style.alpha) {
            return Err(VideodbError::invalid_argument(
                "text asset style alpha must be between 0 and 1",
            ));
        }
        Ok(TextAsset {
            text: self.text,
            duration: self.duration,
            style: self.style,
        })
    }
}

fn prefixed(kind: &str, err: VideodbError) -> VideodbError {
    match err {
        VideodbError::InvalidArgument(msg) => {
            VideodbError::invalid_argument(format!("{kind} asset {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/asset.rs"]
mod tests;

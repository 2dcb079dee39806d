use crate::foundation::{
    core::{ensure_in_range, ensure_non_empty, ensure_non_negative, ensure_positive},
    error::{VideodbError, VideodbResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How an asset is fitted into the output frame.
pub enum Fit {
    /// Fill the frame, cropping overflow.
    #[default]
    Crop,
    /// Scale to cover the frame.
    Cover,
    /// Scale to fit inside the frame.
    Contain,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Anchor position of a clip in the frame.
pub enum Position {
    /// Top edge, centered.
    Top,
    /// Bottom edge, centered.
    Bottom,
    /// Left edge, centered.
    Left,
    /// Right edge, centered.
    Right,
    /// Frame center.
    #[default]
    Center,
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Filter effect applied to a clip.
pub enum Filter {
    /// Blur.
    Blur,
    /// Boost contrast and saturation.
    Boost,
    /// Increase contrast.
    Contrast,
    /// Darken.
    Darken,
    /// Greyscale.
    Greyscale,
    /// Lighten.
    Lighten,
    /// Mute colors.
    Muted,
    /// Invert colors.
    Negative,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Placement of text inside its background box.
pub enum TextAlignment {
    /// Top.
    Top,
    /// Top-right.
    TopRight,
    /// Right.
    Right,
    /// Bottom-right.
    BottomRight,
    /// Bottom.
    Bottom,
    /// Bottom-left.
    BottomLeft,
    /// Left.
    Left,
    /// Top-left.
    TopLeft,
    /// Center.
    #[default]
    Center,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Horizontal text alignment.
pub enum HorizontalAlignment {
    /// Left.
    Left,
    /// Center.
    #[default]
    Center,
    /// Right.
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Vertical text alignment.
pub enum VerticalAlignment {
    /// Top.
    Top,
    /// Center.
    #[default]
    Center,
    /// Bottom.
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Caption border rendering.
pub enum CaptionBorderStyle {
    /// Outline plus drop shadow.
    #[default]
    OutlineAndShadow,
    /// Opaque box behind the caption.
    OpaqueBox,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Caption anchor in the frame.
pub enum CaptionAlignment {
    /// Bottom-left.
    BottomLeft,
    /// Bottom-center.
    #[default]
    BottomCenter,
    /// Bottom-right.
    BottomRight,
    /// Middle-left.
    MiddleLeft,
    /// Middle-center.
    MiddleCenter,
    /// Middle-right.
    MiddleRight,
    /// Top-left.
    TopLeft,
    /// Top-center.
    TopCenter,
    /// Top-right.
    TopRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Word-level caption animation.
pub enum CaptionAnimation {
    /// Box behind the active word.
    BoxHighlight,
    /// Recolor the active word.
    ColorHighlight,
    /// Reveal words progressively.
    Reveal,
    /// Karaoke-style sweep. The service spells it `karioke`.
    #[serde(rename = "karioke")]
    Karaoke,
    /// Punch-in emphasis.
    Impact,
    /// Enlarge the active word.
    Supersize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Offset from the anchor position, relative to frame size.
pub struct Offset {
    /// Horizontal offset.
    #[serde(default)]
    pub x: f64,
    /// Vertical offset.
    #[serde(default)]
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Pixels cropped from each edge of the source.
pub struct Crop {
    /// Top edge.
    #[serde(default)]
    pub top: u32,
    /// Right edge.
    #[serde(default)]
    pub right: u32,
    /// Bottom edge.
    #[serde(default)]
    pub bottom: u32,
    /// Left edge.
    #[serde(default)]
    pub left: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Named transitions at clip edges.
pub struct Transition {
    /// Transition into the clip.
    #[serde(rename = "in", default)]
    pub in_: Option<String>,
    /// Transition out of the clip.
    #[serde(default)]
    pub out: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Font styling for text assets.
pub struct Font {
    /// Font family.
    pub family: String,
    /// Size in points, `>= 1`.
    pub size: u32,
    /// Fill color.
    pub color: String,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Weight in `[100, 900]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Clear Sans".to_string(),
            size: 48,
            color: "#FFFFFF".to_string(),
            opacity: 1.0,
            weight: None,
        }
    }
}

impl Font {
    /// Validate size, opacity and weight ranges.
    pub fn validate(&self) -> VideodbResult<()> {
        if self.size < 1 {
            return Err(VideodbError::invalid_argument("font size must be at least 1"));
        }
        ensure_in_range(self.opacity, 0.0, 1.0, "font opacity")?;
        if let Some(w) = self.weight
            && !(100..=900).contains(&w)
        {
            return Err(VideodbError::invalid_argument(
                "font weight must be between 100 and 900",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Text outline.
pub struct Border {
    /// Outline color.
    pub color: String,
    /// Outline width, `>= 0`.
    pub width: f64,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            width: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Text drop shadow.
pub struct Shadow {
    /// Shadow color.
    pub color: String,
    /// Horizontal distance, `>= 0`.
    pub x: f64,
    /// Vertical distance, `>= 0`.
    pub y: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            x: 0.0,
            y: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Box drawn behind text.
pub struct Background {
    /// Box width, `>= 0`.
    pub width: f64,
    /// Box height, `>= 0`.
    pub height: f64,
    /// Box color.
    pub color: String,
    /// Box border width, `>= 0`.
    pub border_width: f64,
    /// Box opacity in `[0, 1]`.
    pub opacity: f64,
    /// Text placement inside the box.
    pub text_alignment: TextAlignment,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            color: "#000000".to_string(),
            border_width: 0.0,
            opacity: 1.0,
            text_alignment: TextAlignment::Center,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Text alignment on both axes.
pub struct Alignment {
    /// Horizontal alignment.
    pub horizontal: HorizontalAlignment,
    /// Vertical alignment.
    pub vertical: VerticalAlignment,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Font styling for caption assets (ASS subtitle semantics).
pub struct FontStyling {
    /// Font name.
    #[serde(rename = "font_name")]
    pub name: String,
    /// Font size.
    #[serde(rename = "font_size")]
    pub size: u32,
    /// Bold.
    pub bold: bool,
    /// Italic.
    pub italic: bool,
    /// Underline.
    pub underline: bool,
    /// Strikeout.
    pub strikeout: bool,
    /// Horizontal scale in percent.
    pub scale_x: f64,
    /// Vertical scale in percent.
    pub scale_y: f64,
    /// Extra letter spacing.
    pub spacing: f64,
    /// Rotation in degrees.
    pub angle: f64,
}

impl Default for FontStyling {
    fn default() -> Self {
        Self {
            name: "Clear Sans".to_string(),
            size: 30,
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
            scale_x: 100.0,
            scale_y: 100.0,
            spacing: 0.0,
            angle: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Caption border and shadow.
pub struct BorderAndShadow {
    /// Border style.
    pub style: CaptionBorderStyle,
    /// Outline width.
    pub outline: u32,
    /// Outline color in ASS `&HAABBGGRR` form.
    pub outline_color: String,
    /// Shadow depth.
    pub shadow: u32,
}

impl Default for BorderAndShadow {
    fn default() -> Self {
        Self {
            style: CaptionBorderStyle::OutlineAndShadow,
            outline: 1,
            outline_color: "&H00000000".to_string(),
            shadow: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Caption anchor and margins.
pub struct Positioning {
    /// Anchor.
    pub alignment: CaptionAlignment,
    /// Left margin in pixels.
    pub margin_l: u32,
    /// Right margin in pixels.
    pub margin_r: u32,
    /// Vertical margin in pixels.
    pub margin_v: u32,
}

impl Default for Positioning {
    fn default() -> Self {
        Self {
            alignment: CaptionAlignment::BottomCenter,
            margin_l: 30,
            margin_r: 30,
            margin_v: 30,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Asset displayed by a [`Clip`].
pub enum EditorAsset {
    /// Stored video.
    Video(VideoAsset),
    /// Stored image.
    Image(ImageAsset),
    /// Stored audio.
    Audio(AudioAsset),
    /// Styled text.
    Text(TextAsset),
    /// Generated captions.
    Caption(CaptionAsset),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Stored video, trimmed and with adjustable volume.
pub struct VideoAsset {
    /// Stored-media id.
    pub id: String,
    /// Seconds skipped from the source start.
    #[serde(default)]
    pub trim: f64,
    /// Volume multiplier in `[0, 5]`.
    #[serde(default = "default_volume")]
    pub volume: f64,
    /// Source crop.
    #[serde(default)]
    pub crop: Crop,
}

impl VideoAsset {
    /// Untrimmed video at unit volume.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            trim: 0.0,
            volume: 1.0,
            crop: Crop::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Stored image.
pub struct ImageAsset {
    /// Stored-media id.
    pub id: String,
    /// Source crop.
    #[serde(default)]
    pub crop: Crop,
}

impl ImageAsset {
    /// Uncropped image.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            crop: Crop::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Stored audio.
pub struct AudioAsset {
    /// Stored-media id.
    pub id: String,
    /// Seconds skipped from the source start.
    #[serde(default)]
    pub trim: f64,
    /// Volume multiplier.
    #[serde(default = "default_volume")]
    pub volume: f64,
}

impl AudioAsset {
    /// Untrimmed audio at unit volume.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            trim: 0.0,
            volume: 1.0,
        }
    }
}

fn default_volume() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Styled text block.
pub struct TextAsset {
    /// Text content.
    pub text: String,
    /// Font styling.
    #[serde(default)]
    pub font: Font,
    /// Optional outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    /// Optional drop shadow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    /// Optional background box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    /// Alignment on both axes.
    #[serde(default)]
    pub alignment: Alignment,
    /// Tab width in spaces, `>= 1`.
    #[serde(default = "default_tabsize")]
    pub tabsize: u32,
    /// Extra line spacing, `>= 0`.
    #[serde(default)]
    pub line_spacing: f64,
    /// Fixed text box width, `>= 1` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Fixed text box height, `>= 1` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl TextAsset {
    /// Text with default styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
            border: None,
            shadow: None,
            background: None,
            alignment: Alignment::default(),
            tabsize: default_tabsize(),
            line_spacing: 0.0,
            width: None,
            height: None,
        }
    }
}

fn default_tabsize() -> u32 {
    4
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Captions generated from (or supplied for) the timeline's speech.
pub struct CaptionAsset {
    /// Caption source; `"auto"` transcribes the timeline.
    #[serde(default = "default_caption_src")]
    pub src: String,
    /// Font styling.
    #[serde(default)]
    pub font: FontStyling,
    /// Primary fill color (ASS form).
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    /// Secondary (karaoke) color (ASS form).
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    /// Background color (ASS form).
    #[serde(default = "default_back_color")]
    pub back_color: String,
    /// Border and shadow.
    #[serde(default)]
    pub border: BorderAndShadow,
    /// Anchor and margins.
    #[serde(default)]
    pub position: Positioning,
    /// Optional word animation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<CaptionAnimation>,
}

impl Default for CaptionAsset {
    fn default() -> Self {
        Self {
            src: default_caption_src(),
            font: FontStyling::default(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            back_color: default_back_color(),
            border: BorderAndShadow::default(),
            position: Positioning::default(),
            animation: None,
        }
    }
}

fn default_caption_src() -> String {
    "auto".to_string()
}

fn default_primary_color() -> String {
    "&H00FFFFFF".to_string()
}

fn default_secondary_color() -> String {
    "&H000000FF".to_string()
}

fn default_back_color() -> String {
    "&H00000000".to_string()
}

impl From<VideoAsset> for EditorAsset {
    fn from(a: VideoAsset) -> Self {
        Self::Video(a)
    }
}

impl From<ImageAsset> for EditorAsset {
    fn from(a: ImageAsset) -> Self {
        Self::Image(a)
    }
}

impl From<AudioAsset> for EditorAsset {
    fn from(a: AudioAsset) -> Self {
        Self::Audio(a)
    }
}

impl From<TextAsset> for EditorAsset {
    fn from(a: TextAsset) -> Self {
        Self::Text(a)
    }
}

impl From<CaptionAsset> for EditorAsset {
    fn from(a: CaptionAsset) -> Self {
        Self::Caption(a)
    }
}

impl EditorAsset {
    /// Validate per-variant ranges.
    pub fn validate(&self) -> VideodbResult<()> {
        match self {
            Self::Video(a) => {
                ensure_non_empty(&a.id, "video asset id")?;
                ensure_non_negative(a.trim, "video asset trim")?;
                ensure_in_range(a.volume, 0.0, 5.0, "video asset volume")?;
            }
            Self::Image(a) => ensure_non_empty(&a.id, "image asset id")?,
            Self::Audio(a) => {
                ensure_non_empty(&a.id, "audio asset id")?;
                ensure_non_negative(a.trim, "audio asset trim")?;
                ensure_non_negative(a.volume, "audio asset volume")?;
            }
            Self::Text(a) => {
                a.font.validate()?;
                if let Some(b) = &a.border {
                    ensure_non_negative(b.width, "text border width")?;
                }
                if let Some(s) = &a.shadow {
                    ensure_non_negative(s.x, "text shadow x")?;
                    ensure_non_negative(s.y, "text shadow y")?;
                }
                if let Some(bg) = &a.background {
                    ensure_non_negative(bg.width, "text background width")?;
                    ensure_non_negative(bg.height, "text background height")?;
                    ensure_non_negative(bg.border_width, "text background border_width")?;
                    ensure_in_range(bg.opacity, 0.0, 1.0, "text background opacity")?;
                }
                if a.tabsize < 1 {
                    return Err(VideodbError::invalid_argument(
                        "text asset tabsize must be at least 1",
                    ));
                }
                ensure_non_negative(a.line_spacing, "text asset line_spacing")?;
                if a.width == Some(0) || a.height == Some(0) {
                    return Err(VideodbError::invalid_argument(
                        "text asset width/height must be at least 1 when set",
                    ));
                }
            }
            Self::Caption(a) => ensure_non_empty(&a.src, "caption asset src")?,
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Places one asset on a track for `[start, start + length)` seconds.
pub struct Clip {
    /// Displayed asset.
    pub asset: EditorAsset,
    /// Timeline start in seconds, `>= 0`.
    pub start: f64,
    /// Visible length in seconds, `> 0`.
    pub length: f64,
    /// Optional edge transitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    /// Optional named motion effect.
    #[serde(default)]
    pub effect: Option<String>,
    /// Optional color filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Scale factor in `[0, 10]`.
    #[serde(default = "default_unit")]
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_unit")]
    pub opacity: f64,
    /// Fit mode; `None` leaves the asset unfitted.
    #[serde(default = "default_fit")]
    pub fit: Option<Fit>,
    /// Anchor position.
    #[serde(default)]
    pub position: Position,
    /// Offset from the anchor.
    #[serde(default)]
    pub offset: Offset,
}

fn default_unit() -> f64 {
    1.0
}

fn default_fit() -> Option<Fit> {
    Some(Fit::Crop)
}

impl Clip {
    /// Validate clip timing, scale and opacity, then the asset.
    pub fn validate(&self) -> VideodbResult<()> {
        ensure_non_negative(self.start, "clip start")?;
        ensure_positive(self.length, "clip length")?;
        ensure_in_range(self.scale, 0.0, 10.0, "clip scale")?;
        ensure_in_range(self.opacity, 0.0, 1.0, "clip opacity")?;
        self.asset.validate()
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// An ordered set of clips; later tracks render above earlier ones.
pub struct Track {
    /// Clips in this track.
    #[serde(default)]
    pub clips: Vec<Clip>,
}

impl Track {
    /// Empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clip.
    pub fn add_clip(&mut self, clip: Clip) {
        self.clips.push(clip);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/model.rs"]
mod tests;

/// A text overlay coordinate: fixed pixels or a drawtext-style expression.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Coord {
    /// Absolute pixel offset.
    Px(i64),
    /// Expression evaluated by the renderer, e.g. `(main_w-text_w)/2`.
    Expr(String),
}

impl From<i64> for Coord {
    fn from(v: i64) -> Self {
        Self::Px(v)
    }
}

impl From<&str> for Coord {
    fn from(v: &str) -> Self {
        Self::Expr(v.to_string())
    }
}

/// Rendering configuration for [`crate::TextAsset`] overlays.
///
/// Every field is optional on the wire; missing fields take the defaults below.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font size in pixels. Default `24`.
    pub fontsize: u32,
    /// Font color name or hex. Default `"black"`.
    pub fontcolor: String,
    /// Expression overriding `fontcolor` when non-empty. Default `""`.
    pub fontcolor_expr: String,
    /// Text alpha in `[0, 1]`. Default `1.0`.
    pub alpha: f64,
    /// Font family. Default `"Sans"`.
    pub font: String,
    /// Draw a box behind the text. Default `true`.
    #[serde(rename = "box")]
    pub box_: bool,
    /// Box color. Default `"white"`.
    pub boxcolor: String,
    /// Box border width (expression). Default `"10"`.
    pub boxborderw: String,
    /// Fixed box width, `0` for auto. Default `0`.
    pub boxw: u32,
    /// Fixed box height, `0` for auto. Default `0`.
    pub boxh: u32,
    /// Extra spacing between lines in pixels. Default `0`.
    pub line_spacing: i32,
    /// Text alignment flags. Default `"T"`.
    pub text_align: String,
    /// Vertical reference for `y`. Default `"text"`.
    pub y_align: String,
    /// Text border width. Default `0`.
    pub borderw: u32,
    /// Text border color. Default `"black"`.
    pub bordercolor: String,
    /// Text expansion mode. Default `"normal"`.
    pub expansion: String,
    /// Base time for time expansion. Default `0`.
    pub basetime: i64,
    /// Keep the text inside the frame. Default `false`.
    pub fix_bounds: bool,
    /// Enable text shaping. Default `true`.
    pub text_shaping: bool,
    /// Shadow color. Default `"black"`.
    pub shadowcolor: String,
    /// Shadow x offset. Default `0`.
    pub shadowx: i32,
    /// Shadow y offset. Default `0`.
    pub shadowy: i32,
    /// Tab size in spaces. Default `4`.
    pub tabsize: u32,
    /// Horizontal position. Default centered.
    pub x: Coord,
    /// Vertical position. Default centered.
    pub y: Coord,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            fontsize: 24,
            fontcolor: "black".to_string(),
            fontcolor_expr: String::new(),
            alpha: 1.0,
            font: "Sans".to_string(),
            box_: true,
            boxcolor: "white".to_string(),
            boxborderw: "10".to_string(),
            boxw: 0,
            boxh: 0,
            line_spacing: 0,
            text_align: "T".to_string(),
            y_align: "text".to_string(),
            borderw: 0,
            bordercolor: "black".to_string(),
            expansion: "normal".to_string(),
            basetime: 0,
            fix_bounds: false,
            text_shaping: true,
            shadowcolor: "black".to_string(),
            shadowx: 0,
            shadowy: 0,
            tabsize: 4,
            x: Coord::Expr("(main_w-text_w)/2".to_string()),
            y: Coord::Expr("(main_h-text_h)/2".to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/style.rs"]
mod tests;

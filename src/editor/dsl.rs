use crate::{
    editor::model::{Clip, EditorAsset, Filter, Fit, Offset, Position, Track, Transition},
    foundation::error::VideodbResult,
};

/// Builder for editor [`Clip`](crate::editor::Clip) values.
pub struct ClipBuilder {
    asset: EditorAsset,
    start: f64,
    length: f64,
    transition: Option<Transition>,
    effect: Option<String>,
    filter: Option<Filter>,
    scale: f64,
    opacity: f64,
    fit: Option<Fit>,
    position: Position,
    offset: Offset,
}

impl ClipBuilder {
    /// Create a clip builder showing `asset` from `start` for `length` seconds.
    pub fn new(asset: impl Into<EditorAsset>, start: f64, length: f64) -> Self {
        Self {
            asset: asset.into(),
            start,
            length,
            transition: None,
            effect: None,
            filter: None,
            scale: 1.0,
            opacity: 1.0,
            fit: Some(Fit::Crop),
            position: Position::Center,
            offset: Offset::default(),
        }
    }

    /// Set named transitions at the clip edges.
    pub fn transition(mut self, in_: Option<&str>, out: Option<&str>) -> Self {
        self.transition = Some(Transition {
            in_: in_.map(str::to_string),
            out: out.map(str::to_string),
        });
        self
    }

    /// Set a named motion effect.
    pub fn effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    /// Set a color filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set scale factor.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set fit mode; `None` disables fitting.
    pub fn fit(mut self, fit: Option<Fit>) -> Self {
        self.fit = fit;
        self
    }

    /// Set anchor position.
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set offset from the anchor.
    pub fn offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Offset { x, y };
        self
    }

    /// Build validated [`Clip`](crate::editor::Clip).
    pub fn build(self) -> VideodbResult<Clip> {
        let clip = Clip {
            asset: self.asset,
            start: self.start,
            length: self.length,
            transition: self.transition,
            effect: self.effect,
            filter: self.filter,
            scale: self.scale,
            opacity: self.opacity,
            fit: self.fit,
            position: self.position,
            offset: self.offset,
        };
        clip.validate()?;
        Ok(clip)
    }
}

/// Builder for editor [`Track`](crate::editor::Track) values.
#[derive(Default)]
pub struct TrackBuilder {
    clips: Vec<Clip>,
}

impl TrackBuilder {
    /// Create an empty track builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clip.
    pub fn clip(mut self, clip: Clip) -> Self {
        self.clips.push(clip);
        self
    }

    /// Build a [`Track`](crate::editor::Track), validating every clip.
    pub fn build(self) -> VideodbResult<Track> {
        for clip in &self.clips {
            clip.validate()?;
        }
        Ok(Track { clips: self.clips })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/dsl.rs"]
mod tests;

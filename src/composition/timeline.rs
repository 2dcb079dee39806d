use crate::{
    composition::asset::{Asset, AssetKind, VideoAsset},
    composition::request::TimelineRequest,
    composition::stream::{StreamRef, StreamResolver},
    foundation::core::{canonical_zero, ensure_non_negative},
    foundation::error::{VideodbError, VideodbResult},
};

#[derive(Clone, Debug, PartialEq)]
/// One entry of a timeline, in the order it was added.
pub enum Placement {
    /// Sequential segment of the primary track.
    Inline(VideoAsset),
    /// Asset rendered above the primary track from a fixed offset.
    Overlay(Overlay),
}

#[derive(Clone, Debug, PartialEq)]
/// An overlay placement: an audio, image or text asset anchored at `start_offset`.
pub struct Overlay {
    start_offset: f64,
    asset: Asset,
}

impl Overlay {
    pub(crate) fn new(start_offset: f64, asset: Asset) -> VideodbResult<Self> {
        ensure_non_negative(start_offset, "overlay start_offset")?;
        if asset.kind() == AssetKind::Video {
            return Err(VideodbError::invalid_argument(
                "overlay asset must be an audio, image or text asset",
            ));
        }
        Ok(Self {
            start_offset: canonical_zero(start_offset),
            asset,
        })
    }

    /// Seconds into the composed inline track where the overlay begins.
    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    /// The overlaid asset.
    pub fn asset(&self) -> &Asset {
        &self.asset
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Derived timing of one inline asset.
pub struct InlineSlot<'a> {
    /// The inline asset.
    pub asset: &'a VideoAsset,
    /// Effective start on the composed track; unknown once an earlier segment is open-ended.
    pub start_sec: Option<f64>,
    /// Segment length; unknown for open-ended source ranges.
    pub duration_sec: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Mutable composition of inline and overlay placements.
///
/// Build one with [`Timeline::add_inline`] / [`Timeline::add_overlay`], then either
/// freeze it with [`Timeline::build`] or hand it to [`Timeline::generate_stream`].
/// Nothing touches the network before that last call.
pub struct Timeline {
    placements: Vec<Placement>,
}

impl Timeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a video segment to the inline track.
    pub fn add_inline(&mut self, asset: VideoAsset) {
        self.placements.push(Placement::Inline(asset));
    }

    /// Overlay `asset` starting `start_offset` seconds into the inline track.
    ///
    /// Later overlays stack above earlier ones. Overlays running past the end of the
    /// inline track are sent as-is.
    pub fn add_overlay(&mut self, start_offset: f64, asset: impl Into<Asset>) -> VideodbResult<()> {
        let overlay = Overlay::new(start_offset, asset.into())?;
        self.placements.push(Placement::Overlay(overlay));
        Ok(())
    }

    /// All placements in insertion order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Inline assets in track order.
    pub fn inline_assets(&self) -> impl Iterator<Item = &VideoAsset> {
        inline_assets(&self.placements)
    }

    /// Overlays in stacking (insertion) order.
    pub fn overlays(&self) -> impl Iterator<Item = &Overlay> {
        overlays(&self.placements)
    }

    /// Effective start and length of every inline asset.
    pub fn inline_schedule(&self) -> Vec<InlineSlot<'_>> {
        inline_schedule(&self.placements)
    }

    /// Total inline-track length, when every segment is bounded.
    pub fn inline_duration(&self) -> Option<f64> {
        inline_duration(&self.placements)
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// `true` when nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Freeze the composition into the resolver request form.
    pub fn build(self) -> TimelineRequest {
        TimelineRequest::from_placements(self.placements)
    }

    /// Resolve the composition into a playable stream.
    pub fn generate_stream(self, resolver: &dyn StreamResolver) -> VideodbResult<StreamRef> {
        self.build().resolve(resolver)
    }
}

impl From<TimelineRequest> for Timeline {
    fn from(req: TimelineRequest) -> Self {
        Self {
            placements: req.into_placements(),
        }
    }
}

pub(crate) fn inline_assets(placements: &[Placement]) -> impl Iterator<Item = &VideoAsset> {
    placements.iter().filter_map(|p| match p {
        Placement::Inline(v) => Some(v),
        Placement::Overlay(_) => None,
    })
}

pub(crate) fn overlays(placements: &[Placement]) -> impl Iterator<Item = &Overlay> {
    placements.iter().filter_map(|p| match p {
        Placement::Overlay(o) => Some(o),
        Placement::Inline(_) => None,
    })
}

pub(crate) fn inline_schedule(placements: &[Placement]) -> Vec<InlineSlot<'_>> {
    let mut cursor = Some(0.0);
    inline_assets(placements)
        .map(|asset| {
            let duration_sec = asset.range().duration_sec();
            let slot = InlineSlot {
                asset,
                start_sec: cursor,
                duration_sec,
            };
            cursor = cursor.zip(duration_sec).map(|(t, d)| t + d);
            slot
        })
        .collect()
}

pub(crate) fn inline_duration(placements: &[Placement]) -> Option<f64> {
    inline_assets(placements).try_fold(0.0, |acc, v| Some(acc + v.range().duration_sec()?))
}

#[cfg(test)]
#[path = "../../tests/unit/composition/timeline.rs"]
mod tests;

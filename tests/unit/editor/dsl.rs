use super::*;
use crate::editor::model::{ImageAsset, TextAsset, VideoAsset};

#[test]
fn clip_builder_defaults() {
    let clip = ClipBuilder::new(VideoAsset::new("m-1"), 0.0, 10.0)
        .build()
        .unwrap();
    assert_eq!(clip.scale, 1.0);
    assert_eq!(clip.opacity, 1.0);
    assert_eq!(clip.fit, Some(Fit::Crop));
    assert_eq!(clip.position, Position::Center);
    assert_eq!(clip.offset, Offset::default());
    assert!(clip.transition.is_none());
    assert!(clip.filter.is_none());
    assert!(clip.effect.is_none());
}

#[test]
fn clip_builder_sets_styling() {
    let clip = ClipBuilder::new(ImageAsset::new("i-1"), 2.0, 3.0)
        .transition(Some("fade"), Some("slideLeft"))
        .effect("zoomIn")
        .filter(Filter::Boost)
        .scale(0.5)
        .opacity(0.8)
        .fit(None)
        .position(Position::BottomRight)
        .offset(0.1, -0.2)
        .build()
        .unwrap();
    let t = clip.transition.as_ref().unwrap();
    assert_eq!(t.in_.as_deref(), Some("fade"));
    assert_eq!(t.out.as_deref(), Some("slideLeft"));
    assert_eq!(clip.effect.as_deref(), Some("zoomIn"));
    assert_eq!(clip.fit, None);
    assert_eq!(clip.offset, Offset { x: 0.1, y: -0.2 });

    let v = serde_json::to_value(&clip).unwrap();
    assert_eq!(v["fit"], serde_json::Value::Null);
    assert_eq!(v["filter"], "boost");
    assert_eq!(v["position"], "bottom_right");
}

#[test]
fn clip_builder_validates() {
    assert!(
        ClipBuilder::new(VideoAsset::new("m-1"), 0.0, -1.0)
            .build()
            .is_err()
    );
    assert!(
        ClipBuilder::new(VideoAsset::new("m-1"), 0.0, 1.0)
            .scale(11.0)
            .build()
            .is_err()
    );
    assert!(
        ClipBuilder::new(VideoAsset::new(""), 0.0, 1.0)
            .build()
            .is_err()
    );
}

#[test]
fn track_builder_collects_clips() {
    let a = ClipBuilder::new(VideoAsset::new("m-1"), 0.0, 5.0)
        .build()
        .unwrap();
    let b = ClipBuilder::new(TextAsset::new("Hi"), 1.0, 2.0)
        .build()
        .unwrap();
    let track = TrackBuilder::new().clip(a).clip(b).build().unwrap();
    assert_eq!(track.clips.len(), 2);
    assert_eq!(track.clips[1].start, 1.0);
}

#[test]
fn track_builder_rejects_hand_built_invalid_clip() {
    let mut clip = ClipBuilder::new(VideoAsset::new("m-1"), 0.0, 5.0)
        .build()
        .unwrap();
    clip.opacity = 2.0;
    assert!(TrackBuilder::new().clip(clip).build().is_err());
}

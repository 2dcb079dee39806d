use super::*;

#[test]
fn media_assets_require_asset_id() {
    for err in [
        VideoAsset::new("").unwrap_err(),
        AudioAsset::new("   ").unwrap_err(),
        ImageAsset::builder("").build().unwrap_err(),
    ] {
        assert!(matches!(err, VideodbError::InvalidArgument(_)));
        assert!(err.to_string().contains("asset_id"));
    }
}

#[test]
fn text_asset_requires_text() {
    let err = TextAsset::builder("").build().unwrap_err();
    assert!(matches!(err, VideodbError::InvalidArgument(_)));
}

#[test]
fn end_must_follow_start() {
    for (start, end) in [(0.0, 0.0), (10.0, 5.0), (3.0, 3.0)] {
        let v = VideoAsset::builder("v1").start(start).end(end).build();
        assert!(matches!(v, Err(VideodbError::InvalidArgument(_))));
        let a = AudioAsset::builder("a1").start(start).end(end).build();
        assert!(matches!(a, Err(VideodbError::InvalidArgument(_))));
    }
    let err = VideoAsset::builder("v1").start(-1.0).build().unwrap_err();
    assert!(err.to_string().contains("video asset start"));
}

#[test]
fn video_serializes_wire_fields() {
    let v = VideoAsset::builder("m-1").start(2.0).end(12.0).build().unwrap();
    assert_eq!(v.range().duration_sec(), Some(10.0));
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"asset_id": "m-1", "start": 2.0, "end": 12.0})
    );

    let open = serde_json::to_value(VideoAsset::new("m-2").unwrap()).unwrap();
    assert_eq!(open["end"], serde_json::Value::Null);
    assert_eq!(open["start"], serde_json::json!(0.0));
}

#[test]
fn audio_defaults_and_fades() {
    let a = AudioAsset::new("a-1").unwrap();
    assert!(a.disable_other_tracks());
    assert_eq!(a.fade_in_duration(), 0.0);
    assert!(
        AudioAsset::builder("a-1")
            .fade_in_duration(-0.1)
            .build()
            .is_err()
    );
    // Over the supported maximum is accepted (warned only).
    let long = AudioAsset::builder("a-1")
        .fade_out_duration(MAX_FADE_DURATION_SEC + 1.0)
        .build()
        .unwrap();
    assert_eq!(long.fade_out_duration(), 6.0);

    let json = serde_json::to_value(&long).unwrap();
    for key in [
        "asset_id",
        "start",
        "end",
        "disable_other_tracks",
        "fade_in_duration",
        "fade_out_duration",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn image_placement_checks() {
    let img = ImageAsset::builder("img-1").build().unwrap();
    assert_eq!((img.width(), img.height(), img.x(), img.y()), (100, 100, 80, 20));
    assert_eq!(img.duration(), None);
    assert!(ImageAsset::builder("img-1").width(0).build().is_err());
    assert!(ImageAsset::builder("img-1").duration(0.0).build().is_err());
    let placed = ImageAsset::builder("img-1")
        .width(320)
        .height(180)
        .x(-10)
        .y(40)
        .duration(3.0)
        .build()
        .unwrap();
    assert_eq!(Asset::from(placed).duration_sec(), Some(3.0));
}

#[test]
fn text_style_alpha_is_checked() {
    let style = TextStyle {
        alpha: 1.5,
        ..TextStyle::default()
    };
    assert!(TextAsset::builder("Hi").style(style).build().is_err());
    let t = TextAsset::builder("Hi").duration(3.0).build().unwrap();
    assert_eq!(t.text(), "Hi");
    assert_eq!(t.style().fontsize, 24);
}

#[test]
fn asset_kind_and_id() {
    let a: Asset = TextAsset::builder("Hi").build().unwrap().into();
    assert_eq!(a.kind(), AssetKind::Text);
    assert_eq!(a.asset_id(), None);
    assert_eq!(a.duration_sec(), None);
    let v: Asset = VideoAsset::new("m-1").unwrap().into();
    assert_eq!(v.kind().to_string(), "video");
    assert_eq!(v.asset_id(), Some("m-1"));
}

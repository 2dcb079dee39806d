use super::*;
use serde_json::json;

fn clip(asset: impl Into<EditorAsset>) -> Clip {
    Clip {
        asset: asset.into(),
        start: 0.0,
        length: 5.0,
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

#[test]
fn assets_serialize_with_type_tag() {
    let v = serde_json::to_value(EditorAsset::from(VideoAsset::new("m-1"))).unwrap();
    assert_eq!(
        v,
        json!({
            "type": "video",
            "id": "m-1",
            "trim": 0.0,
            "volume": 1.0,
            "crop": {"top": 0, "right": 0, "bottom": 0, "left": 0},
        })
    );

    let img = serde_json::to_value(EditorAsset::from(ImageAsset::new("i-1"))).unwrap();
    assert_eq!(img["type"], "image");
    assert!(img.get("trim").is_none());

    let audio = serde_json::to_value(EditorAsset::from(AudioAsset::new("a-1"))).unwrap();
    assert_eq!(audio, json!({"type": "audio", "id": "a-1", "trim": 0.0, "volume": 1.0}));
}

#[test]
fn text_asset_defaults_and_optional_keys() {
    let v = serde_json::to_value(EditorAsset::from(TextAsset::new("Hello"))).unwrap();
    assert_eq!(v["type"], "text");
    assert_eq!(v["font"]["family"], "Clear Sans");
    assert_eq!(v["font"]["size"], 48);
    assert_eq!(v["font"]["color"], "#FFFFFF");
    assert!(v["font"].get("weight").is_none());
    assert_eq!(v["alignment"], json!({"horizontal": "center", "vertical": "center"}));
    assert_eq!(v["tabsize"], 4);
    for key in ["border", "shadow", "background", "width", "height"] {
        assert!(v.get(key).is_none(), "{key} should be omitted");
    }
}

#[test]
fn caption_asset_uses_ass_keys() {
    let caption = CaptionAsset {
        animation: Some(CaptionAnimation::Karaoke),
        ..CaptionAsset::default()
    };
    let v = serde_json::to_value(EditorAsset::from(caption)).unwrap();
    assert_eq!(v["type"], "caption");
    assert_eq!(v["src"], "auto");
    assert_eq!(v["font"]["font_name"], "Clear Sans");
    assert_eq!(v["font"]["font_size"], 30);
    assert_eq!(v["primary_color"], "&H00FFFFFF");
    assert_eq!(v["border"]["style"], "outline_and_shadow");
    assert_eq!(v["position"]["alignment"], "bottom_center");
    assert_eq!(v["position"]["margin_v"], 30);
    assert_eq!(v["animation"], "karioke");
}

#[test]
fn clip_emits_transition_and_filter_only_when_set() {
    let plain = serde_json::to_value(clip(VideoAsset::new("m-1"))).unwrap();
    assert!(plain.get("transition").is_none());
    assert!(plain.get("filter").is_none());
    assert_eq!(plain["effect"], serde_json::Value::Null);
    assert_eq!(plain["fit"], "crop");
    assert_eq!(plain["position"], "center");

    let mut styled = clip(ImageAsset::new("i-1"));
    styled.filter = Some(Filter::Greyscale);
    styled.position = Position::TopLeft;
    styled.transition = Some(Transition {
        in_: Some("fade".into()),
        out: None,
    });
    let v = serde_json::to_value(styled).unwrap();
    assert_eq!(v["filter"], "greyscale");
    assert_eq!(v["position"], "top_left");
    assert_eq!(v["transition"], json!({"in": "fade", "out": null}));
}

#[test]
fn clip_json_inverse() {
    let original = clip(TextAsset::new("Hi"));
    let back: Clip = serde_json::from_value(serde_json::to_value(&original).unwrap()).unwrap();
    assert_eq!(back, original);

    let sparse: Clip = serde_json::from_value(json!({
        "asset": {"type": "video", "id": "m-1", "trim": 2},
        "start": 1,
        "length": 3,
    }))
    .unwrap();
    assert_eq!(sparse.scale, 1.0);
    assert_eq!(sparse.fit, Some(Fit::Crop));
    match sparse.asset {
        EditorAsset::Video(v) => {
            assert_eq!(v.trim, 2.0);
            assert_eq!(v.volume, 1.0);
        }
        other => panic!("expected video, got {other:?}"),
    }
}

#[test]
fn clip_validation_bounds() {
    assert!(clip(VideoAsset::new("m-1")).validate().is_ok());

    let mut c = clip(VideoAsset::new("m-1"));
    c.length = 0.0;
    assert!(matches!(c.validate(), Err(VideodbError::InvalidArgument(_))));

    let mut c = clip(VideoAsset::new("m-1"));
    c.start = -1.0;
    assert!(c.validate().is_err());

    let mut c = clip(VideoAsset::new("m-1"));
    c.scale = 10.5;
    assert!(c.validate().is_err());

    let mut c = clip(VideoAsset::new("m-1"));
    c.opacity = 1.5;
    assert!(c.validate().is_err());
}

#[test]
fn asset_validation_bounds() {
    let mut v = VideoAsset::new("m-1");
    v.volume = 6.0;
    assert!(EditorAsset::from(v).validate().is_err());

    let mut v = VideoAsset::new("m-1");
    v.trim = -0.5;
    assert!(EditorAsset::from(v).validate().is_err());

    let mut t = TextAsset::new("x");
    t.tabsize = 0;
    assert!(EditorAsset::from(t).validate().is_err());

    let mut t = TextAsset::new("x");
    t.font.weight = Some(950);
    assert!(EditorAsset::from(t).validate().is_err());

    let mut t = TextAsset::new("x");
    t.background = Some(Background {
        opacity: 1.2,
        ..Background::default()
    });
    assert!(EditorAsset::from(t).validate().is_err());

    let mut t = TextAsset::new("x");
    t.width = Some(0);
    assert!(EditorAsset::from(t).validate().is_err());

    let mut t = TextAsset::new("x");
    t.font.weight = Some(700);
    t.border = Some(Border::default());
    t.shadow = Some(Shadow::default());
    assert!(EditorAsset::from(t).validate().is_ok());
}

#[test]
fn track_appends_in_order() {
    let mut track = Track::new();
    track.add_clip(clip(VideoAsset::new("a")));
    track.add_clip(clip(VideoAsset::new("b")));
    let ids: Vec<_> = track
        .clips
        .iter()
        .map(|c| match &c.asset {
            EditorAsset::Video(v) => v.id.as_str(),
            _ => "",
        })
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

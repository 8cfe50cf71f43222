use pixdiff_core::annotate::{
    AnnotationSet, AnnotationStore, ImageSlot, StrokePoint, ToolKind,
};
use pixdiff_core::error::PixdiffError;
use pixdiff_core::share::ShareMetadata;

fn point(x: f32, y: f32) -> StrokePoint {
    StrokePoint::new(x, y, 0.5)
}

fn draw_stroke(store: &mut AnnotationStore, xs: &[f32]) {
    store.begin_stroke(point(xs[0], 0.0));
    for &x in &xs[1..] {
        store.extend_stroke(point(x, 0.0));
    }
    store.end_stroke();
}

// ---------------------------------------------------------------------------
// Stroke lifecycle
// ---------------------------------------------------------------------------

#[test]
fn committed_stroke_lands_on_the_active_image() {
    let mut store = AnnotationStore::new();
    draw_stroke(&mut store, &[0.0, 10.0, 20.0]);

    assert_eq!(store.strokes(ImageSlot::A).len(), 1);
    assert!(store.strokes(ImageSlot::B).is_empty());
    assert_eq!(store.strokes(ImageSlot::A)[0].points.len(), 3);
    assert_eq!(store.strokes(ImageSlot::A)[0].color, "#ff0000");
}

#[test]
fn end_without_points_commits_nothing() {
    let mut store = AnnotationStore::new();
    store.end_stroke();
    assert!(store.strokes(ImageSlot::A).is_empty());
}

#[test]
fn extend_without_begin_is_ignored() {
    let mut store = AnnotationStore::new();
    store.extend_stroke(point(1.0, 1.0));
    store.end_stroke();
    assert!(store.strokes(ImageSlot::A).is_empty());
}

#[test]
fn stroke_size_is_divided_by_base_scale_at_commit() {
    let mut store = AnnotationStore::new();
    store.set_brush_size(10.0).unwrap();
    store.set_base_scale(2.0).unwrap();
    draw_stroke(&mut store, &[0.0, 5.0]);

    // Stored size is fit-scale compensated: 10 / 2.
    assert_eq!(store.strokes(ImageSlot::A)[0].size, 5.0);

    // A later resize does not rewrite committed strokes.
    store.set_base_scale(4.0).unwrap();
    assert_eq!(store.strokes(ImageSlot::A)[0].size, 5.0);
}

#[test]
fn invalid_sizes_are_rejected() {
    let mut store = AnnotationStore::new();
    assert!(store.set_brush_size(0.0).is_err());
    assert!(store.set_font_size(-2.0).is_err());
    assert!(store.set_base_scale(f32::NAN).is_err());
    assert!(store.set_color_index(99).is_err());
}

// ---------------------------------------------------------------------------
// Text lifecycle
// ---------------------------------------------------------------------------

#[test]
fn confirmed_text_is_committed_trimmed() {
    let mut store = AnnotationStore::new();
    store.set_tool(ToolKind::Text);
    let handle = store.place_text(5.0, -3.0);
    store.confirm_text(handle, "  note here  ").unwrap();

    let texts = store.texts(ImageSlot::A);
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].text, "note here");
    assert_eq!((texts[0].x, texts[0].y), (5.0, -3.0));
}

#[test]
fn whitespace_only_text_discards_the_placement() {
    let mut store = AnnotationStore::new();
    let handle = store.place_text(0.0, 0.0);
    store.confirm_text(handle, "   \n\t ").unwrap();
    assert!(store.texts(ImageSlot::A).is_empty());
    // Placement is gone: confirming again is a stale-handle error.
    assert!(store.confirm_text(handle, "late").is_err());
}

#[test]
fn cancel_discards_and_stale_handles_are_invalid() {
    let mut store = AnnotationStore::new();
    let first = store.place_text(0.0, 0.0);
    let second = store.place_text(1.0, 1.0);

    // Placing again already discarded the first.
    assert!(matches!(
        store.confirm_text(first, "hi"),
        Err(PixdiffError::InvalidArgument(_))
    ));
    store.cancel_text(second).unwrap();
    assert!(store.texts(ImageSlot::A).is_empty());
}

#[test]
fn font_size_is_divided_by_base_scale_at_commit() {
    let mut store = AnnotationStore::new();
    store.set_font_size(24.0).unwrap();
    store.set_base_scale(2.0).unwrap();
    let handle = store.place_text(0.0, 0.0);
    store.confirm_text(handle, "scaled").unwrap();
    assert_eq!(store.texts(ImageSlot::A)[0].font_size, 12.0);
}

// ---------------------------------------------------------------------------
// Undo and clear scoping
// ---------------------------------------------------------------------------

#[test]
fn undo_only_touches_the_active_image() {
    let mut store = AnnotationStore::new();
    draw_stroke(&mut store, &[0.0, 5.0]);
    store.set_active_image(ImageSlot::B);
    draw_stroke(&mut store, &[10.0, 15.0]);

    store.set_active_image(ImageSlot::A);
    store.undo();

    assert!(store.strokes(ImageSlot::A).is_empty());
    assert_eq!(store.strokes(ImageSlot::B).len(), 1);
}

#[test]
fn undo_only_touches_the_active_tool_list() {
    let mut store = AnnotationStore::new();
    draw_stroke(&mut store, &[0.0, 5.0]);
    let handle = store.place_text(0.0, 0.0);
    store.confirm_text(handle, "label").unwrap();

    // Draw tool active: undo removes the stroke, not the text.
    store.set_tool(ToolKind::Draw);
    store.undo();
    assert!(store.strokes(ImageSlot::A).is_empty());
    assert_eq!(store.texts(ImageSlot::A).len(), 1);

    store.set_tool(ToolKind::Text);
    store.undo();
    assert!(store.texts(ImageSlot::A).is_empty());
}

#[test]
fn clear_is_per_image_and_clear_all_is_not() {
    let mut store = AnnotationStore::new();
    draw_stroke(&mut store, &[0.0, 5.0]);
    store.set_active_image(ImageSlot::B);
    draw_stroke(&mut store, &[0.0, 5.0]);

    store.set_active_image(ImageSlot::A);
    store.clear();
    assert!(store.strokes(ImageSlot::A).is_empty());
    assert_eq!(store.strokes(ImageSlot::B).len(), 1);

    store.clear_all();
    assert!(store.strokes(ImageSlot::B).is_empty());
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn serialize_round_trips_through_json() {
    let mut store = AnnotationStore::new();
    draw_stroke(&mut store, &[0.0, 5.0, 10.0]);
    store.set_active_image(ImageSlot::B);
    store.cycle_color();
    draw_stroke(&mut store, &[1.0, 2.0]);
    let handle = store.place_text(3.0, 4.0);
    store.confirm_text(handle, "on B").unwrap();

    let set = store.serialize();
    let json = set.to_json().unwrap();
    let restored = AnnotationSet::from_json(&json).unwrap();
    assert_eq!(restored, set);
}

#[test]
fn wire_shape_matches_the_share_contract() {
    let mut store = AnnotationStore::new();
    draw_stroke(&mut store, &[0.0, 5.0]);
    let handle = store.place_text(7.0, 8.0);
    store.confirm_text(handle, "hi").unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&store.serialize().to_json().unwrap()).unwrap();

    // Points serialize as bare [x, y, pressure] triples.
    let first_point = &value["strokes"]["A"][0]["points"][0];
    assert!(first_point.is_array());
    assert_eq!(first_point.as_array().unwrap().len(), 3);
    // Text font size uses the camelCase wire key.
    assert!(value["texts"]["A"][0]["fontSize"].is_number());
    assert!(value["strokes"]["B"].as_array().unwrap().is_empty());
}

#[test]
fn legacy_bare_array_becomes_strokes_a() {
    let json = r##"[{"points":[[1.0,2.0,0.5],[3.0,4.0,0.5]],"color":"#00ff00","size":4.0}]"##;
    let set = AnnotationSet::from_json(json).unwrap();

    assert_eq!(set.strokes.a.len(), 1);
    assert!(set.strokes.b.is_empty());
    assert!(set.texts.a.is_empty());
    assert!(set.texts.b.is_empty());
    assert_eq!(set.strokes.a[0].color, "#00ff00");
    assert_eq!(set.strokes.a[0].points[1], StrokePoint::new(3.0, 4.0, 0.5));
}

#[test]
fn share_metadata_round_trips_with_camel_case_keys() {
    let mut store = AnnotationStore::new();
    draw_stroke(&mut store, &[0.0, 5.0]);

    let meta = ShareMetadata {
        name: "before vs after".to_string(),
        annotations: store.serialize(),
        view_mode: Some("match-A".to_string()),
        is_single: false,
        parent_id: Some("abc123".to_string()),
    };

    let json = serde_json::to_string(&meta).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["viewMode"], "match-A");
    assert_eq!(value["isSingle"], false);
    assert_eq!(value["parentId"], "abc123");
    assert_eq!(value["annotations"]["strokes"]["A"].as_array().unwrap().len(), 1);

    let restored: ShareMetadata = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, meta);
}

#[test]
fn share_metadata_omits_empty_annotations() {
    let meta = ShareMetadata {
        name: "plain".to_string(),
        ..ShareMetadata::default()
    };

    let value: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&meta).unwrap()).unwrap();
    assert!(value.get("annotations").is_none());

    // Absent fields fall back to their defaults on the way in.
    let restored: ShareMetadata = serde_json::from_str(r#"{"name":"plain"}"#).unwrap();
    assert_eq!(restored, meta);
}

#[test]
fn deserialize_replaces_session_state() {
    let mut store = AnnotationStore::new();
    store.begin_stroke(point(0.0, 0.0));

    let mut other = AnnotationStore::new();
    other.set_active_image(ImageSlot::B);
    draw_stroke(&mut other, &[0.0, 5.0]);

    store.deserialize(other.serialize());
    assert!(!store.is_drawing());
    assert_eq!(store.strokes(ImageSlot::B).len(), 1);
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn render_paths_preserve_creation_order() {
    let mut store = AnnotationStore::new();
    draw_stroke(&mut store, &[0.0, 10.0, 20.0, 30.0]);
    store.cycle_color();
    draw_stroke(&mut store, &[0.0, 10.0, 20.0, 30.0]);

    let paths = store.render_paths(ImageSlot::A);
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].color, "#ff0000");
    assert_eq!(paths[1].color, "#00ff00");
    for p in &paths {
        assert!(p.path.starts_with("M "));
        assert!(p.path.ends_with("Z"));
    }
}

#[test]
fn current_path_tracks_the_stroke_in_progress() {
    let mut store = AnnotationStore::new();
    assert!(store.current_path().is_none());

    store.begin_stroke(point(0.0, 0.0));
    store.extend_stroke(point(10.0, 0.0));
    let live = store.current_path().unwrap();
    assert!(!live.path.is_empty());

    store.end_stroke();
    assert!(store.current_path().is_none());
}

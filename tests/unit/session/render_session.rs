use super::*;
use crate::{foundation::error::CoverError, render::recording::RecordingSurface};

fn solid(width: u32, height: u32) -> SourceImage {
    SourceImage::from_rgba8(width, height, [10, 20, 30, 255].repeat((width * height) as usize))
        .unwrap()
}

fn session(container_width: u32) -> CoverSession {
    CoverSession::new(&EngineConfig::default(), container_width).unwrap()
}

fn surfaces() -> (RecordingSurface, RecordingSurface) {
    (RecordingSurface::new(0.5), RecordingSurface::new(0.5))
}

#[test]
fn nothing_renders_without_an_image() {
    let mut s = session(600);
    assert!(s.request_render(RenderTrigger::StyleEdit).unwrap().is_none());
    assert!(s.update_style(|st| st.caption = "Hola".into()).unwrap().is_none());
    assert!(s.resize(300).unwrap().is_none());
    assert!(!s.has_unsaved_changes());
}

#[test]
fn crop_before_image_is_rejected() {
    let mut s = session(600);
    let err = s.set_crop(0.0, 0.0, 10.0, 10.0).unwrap_err();
    assert!(matches!(err, CoverError::Validation(_)));
}

#[test]
fn load_installs_and_renders_both_surfaces() {
    let mut s = session(400);
    let ticket = s.begin_load();
    let LoadOutcome::Installed(pending) = s.finish_load(ticket, Ok(solid(80, 60))).unwrap()
    else {
        panic!("latest load must install");
    };
    assert_eq!(pending.trigger(), RenderTrigger::SourceLoaded);
    assert_eq!(pending.preview_spec().side_px, 368);
    assert_eq!(pending.export_spec().side_px, 500);
    assert!(s.has_unsaved_changes());

    let (mut preview, mut export) = surfaces();
    let outcome = s.complete(&pending, &mut preview, &mut export).unwrap();
    let RenderOutcome::Rendered { preview: p, export: e } = outcome else {
        panic!("latest request must render");
    };
    assert_eq!(p.spec.side_px, 368);
    assert_eq!(e.spec.side_px, 500);
    assert!(!preview.calls().is_empty());
    assert!(!export.calls().is_empty());
}

#[test]
fn stale_load_is_dropped() {
    let mut s = session(600);
    let first = s.begin_load();
    let second = s.begin_load();

    assert!(matches!(
        s.finish_load(second, Ok(solid(40, 40))).unwrap(),
        LoadOutcome::Installed(_)
    ));
    assert!(matches!(
        s.finish_load(first, Ok(solid(90, 30))).unwrap(),
        LoadOutcome::Superseded
    ));
    assert_eq!(s.image().map(|i| (i.width, i.height)), Some((40, 40)));
}

#[test]
fn stale_load_error_is_ignored_but_latest_error_surfaces() {
    let mut s = session(600);
    let first = s.begin_load();
    let second = s.begin_load();

    let stale = s.finish_load(first, Err(CoverError::decode("truncated")));
    assert!(matches!(stale, Ok(LoadOutcome::Superseded)));

    let latest = s.finish_load(second, Err(CoverError::decode("truncated")));
    assert!(matches!(latest, Err(CoverError::Decode(_))));
    assert!(s.image().is_none());
}

#[test]
fn new_image_resets_crop() {
    let mut s = session(600);
    s.load_image(solid(80, 60)).unwrap();
    s.set_crop(10.0, 5.0, 50.0, 50.0).unwrap();
    assert!(s.crop().is_some());

    s.update_style(|st| st.caption = "x".into()).unwrap();
    assert!(s.crop().is_some());

    s.load_image(solid(30, 30)).unwrap();
    assert!(s.crop().is_none());
}

#[test]
fn invalid_crop_keeps_previous_crop() {
    let mut s = session(600);
    s.load_image(solid(80, 60)).unwrap();
    s.set_crop(0.0, 0.0, 60.0, 60.0).unwrap();

    assert!(s.set_crop(40.0, 0.0, 60.0, 60.0).is_err());
    assert!(s.set_crop(0.0, 0.0, 30.0, 40.0).is_err());
    assert_eq!(s.crop().map(|c| c.side()), Some(60.0));
}

#[test]
fn only_latest_render_reaches_the_surfaces() {
    let mut s = session(600);
    s.load_image(solid(64, 64)).unwrap();

    let older = s.update_style(|st| st.caption = "Primera".into()).unwrap().unwrap();
    let newer = s.update_style(|st| st.caption = "Segunda".into()).unwrap().unwrap();
    assert!(newer.generation() > older.generation());

    let (mut preview, mut export) = surfaces();
    assert!(matches!(
        s.complete(&newer, &mut preview, &mut export).unwrap(),
        RenderOutcome::Rendered { .. }
    ));
    let outcome = s.complete(&older, &mut preview, &mut export).unwrap();
    assert!(matches!(
        outcome,
        RenderOutcome::Superseded { generation, latest } if generation == older.generation() && latest == newer.generation()
    ));

    for surface in [&preview, &export] {
        let texts = surface.texts();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].starts_with("Segunda"));
    }
}

#[test]
fn pending_render_snapshots_style() {
    let mut s = session(600);
    s.load_image(solid(64, 64)).unwrap();
    let pending = s.update_style(|st| st.caption = "Antes".into()).unwrap().unwrap();
    assert_eq!(pending.style().caption, "Antes");
    assert_eq!(s.style().caption, "Antes");
}

#[test]
fn resize_does_not_mark_changes() {
    let mut s = session(600);
    s.load_image(solid(64, 64)).unwrap();
    s.mark_saved();

    let pending = s.resize(400).unwrap().unwrap();
    assert_eq!(pending.trigger(), RenderTrigger::Resize);
    assert_eq!(pending.preview_spec().side_px, 368);
    let (mut preview, mut export) = surfaces();
    s.complete(&pending, &mut preview, &mut export).unwrap();
    assert!(!s.has_unsaved_changes());

    s.update_style(|st| st.copy_bar_color_to_text()).unwrap();
    assert!(s.has_unsaved_changes());
}

#[test]
fn container_too_narrow_for_preview_fails() {
    let mut s = session(600);
    s.load_image(solid(64, 64)).unwrap();
    assert!(s.resize(20).is_err());
}

#[test]
fn rejected_resize_keeps_previous_width_and_edits_stay_tracked() {
    let mut s = session(400);
    s.load_image(solid(64, 64)).unwrap();
    s.mark_saved();

    assert!(matches!(s.resize(20), Err(CoverError::Validation(_))));
    assert!(!s.has_unsaved_changes());

    let pending = s
        .update_style(|st| st.caption = "nuevo".into())
        .unwrap()
        .unwrap();
    assert_eq!(pending.preview_spec().side_px, 368);
    assert_eq!(s.style().caption, "nuevo");
    assert!(s.has_unsaved_changes());
}

#[test]
fn edit_counts_as_unsaved_even_when_surfaces_cannot_be_sized() {
    let mut s = session(10);
    s.update_style(|st| st.caption = "antes".into()).unwrap();
    assert!(s.load_image(solid(64, 64)).is_err());
    s.mark_saved();

    assert!(s.update_style(|st| st.caption = "después".into()).is_err());
    assert_eq!(s.style().caption, "después");
    assert!(s.has_unsaved_changes());
}

#[test]
fn swapping_shown_logo_requests_a_redraw() {
    let mut s = session(600);
    let logo = LogoImage::Raster(solid(4, 4));
    assert!(s.set_logo(Some(logo.clone())).unwrap().is_none());

    s.load_image(solid(64, 64)).unwrap();
    assert!(s.set_logo(Some(logo.clone())).unwrap().is_none());

    let before = s.update_style(|st| st.show_logo = true).unwrap().unwrap();
    let swapped = s.set_logo(Some(logo)).unwrap().unwrap();
    assert!(swapped.generation() > before.generation());
    assert_eq!(swapped.trigger(), RenderTrigger::StyleEdit);

    let (mut preview, mut export) = surfaces();
    let RenderOutcome::Rendered { preview: p, .. } =
        s.complete(&swapped, &mut preview, &mut export).unwrap()
    else {
        panic!("latest request must render");
    };
    assert!(p.logo_drawn);
}

#[test]
fn export_name_follows_caption() {
    let mut s = session(600);
    assert_eq!(s.export_file_name(), "cover.jpg");
    s.update_style(|st| st.caption = "Lluvia de Abril".into()).unwrap();
    assert_eq!(s.export_file_name(), "lluvia-de-abril.jpg");
}

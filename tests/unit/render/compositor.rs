use super::*;
use crate::{
    foundation::color::Rgba8,
    render::{
        cpu::CpuSurface,
        recording::{DrawCall, RecordingSurface},
    },
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> SourceImage {
    SourceImage::from_rgba8(width, height, rgba.repeat((width * height) as usize)).unwrap()
}

fn style(caption: &str, show_logo: bool) -> StyleConfig {
    StyleConfig {
        bar_color: Rgba8::opaque(255, 0, 0),
        text_color: Rgba8::opaque(0, 255, 0),
        caption: caption.to_owned(),
        show_logo,
    }
}

#[test]
fn draws_in_fixed_order() {
    let image = solid(8, 6, [0, 0, 0, 255]);
    let logo = LogoImage::Raster(solid(2, 2, [9, 9, 9, 255]));
    let style = style("Noches de verano", true);
    let mut surface = RecordingSurface::new(0.5);

    let layout = render_cover(
        &mut surface,
        SurfaceSpec::export(500).unwrap(),
        CoverInputs {
            image: &image,
            crop: None,
            style: &style,
            logo: Some(&logo),
        },
    )
    .unwrap();

    let calls = surface.calls();
    assert_eq!(calls.len(), 5);
    assert!(matches!(calls[0], DrawCall::Image { image_size: (8, 6), .. }));
    assert!(
        matches!(calls[1], DrawCall::FillRect { rect, color } if rect == layout.geometry.bottom_bar() && color == style.bar_color)
    );
    assert!(
        matches!(calls[2], DrawCall::FillRect { rect, .. } if rect == layout.geometry.side_bar())
    );
    assert!(
        matches!(&calls[3], DrawCall::Text { text, color, size, .. } if text == "Noches de verano " && *color == style.text_color && approx(*size, 45.0))
    );
    assert!(
        matches!(calls[4], DrawCall::Image { image_size: (2, 2), dst, .. } if dst == layout.geometry.logo_rect())
    );
    assert!(layout.logo_drawn);
}

#[test]
fn image_fills_surface_from_centered_square() {
    let image = solid(8, 6, [0, 0, 0, 255]);
    let style = style("", false);
    let mut surface = RecordingSurface::new(0.5);
    render_cover(
        &mut surface,
        SurfaceSpec::preview(120).unwrap(),
        CoverInputs {
            image: &image,
            crop: None,
            style: &style,
            logo: None,
        },
    )
    .unwrap();

    let DrawCall::Image { src, dst, .. } = surface.calls()[0] else {
        panic!("first call must draw the image");
    };
    assert_eq!(
        src,
        SampleRect {
            sx: 1.0,
            sy: 0.0,
            swidth: 6.0,
            sheight: 6.0
        }
    );
    assert_eq!(dst, Rect::new(0.0, 0.0, 120.0, 120.0));
}

#[test]
fn empty_caption_draws_bars_and_logo_only() {
    let image = solid(4, 4, [0, 0, 0, 255]);
    let logo = LogoImage::Raster(solid(1, 1, [1, 1, 1, 255]));
    let style = style("   ", true);
    let mut surface = RecordingSurface::new(0.5);

    let layout = render_cover(
        &mut surface,
        SurfaceSpec::export(500).unwrap(),
        CoverInputs {
            image: &image,
            crop: None,
            style: &style,
            logo: Some(&logo),
        },
    )
    .unwrap();

    assert!(layout.lines.is_empty());
    assert!(surface.texts().is_empty());
    assert_eq!(surface.calls().len(), 4);
    assert!(layout.caption_top().is_none());
}

#[test]
fn caption_block_is_bottom_anchored_in_side_bar() {
    let image = solid(4, 4, [0, 0, 0, 255]);
    let style = style("Canciones para una noche larga", false);
    let mut surface = RecordingSurface::new(0.5);

    let layout = render_cover(
        &mut surface,
        SurfaceSpec::export(500).unwrap(),
        CoverInputs {
            image: &image,
            crop: None,
            style: &style,
            logo: None,
        },
    )
    .unwrap();

    assert_eq!(surface.texts(), vec!["Canciones para una ", "noche larga "]);
    assert!(approx(layout.lines[0].y, 370.0));
    assert!(approx(layout.lines[1].y, 415.0));
    assert!(layout.lines.iter().all(|l| approx(l.x, 50.0)));

    let g = layout.geometry;
    let side_bar_bottom = g.side_bar_y + g.side_bar_height;
    assert!(approx(
        layout.lines[1].y,
        side_bar_bottom - g.text_height / 2.0
    ));
}

#[test]
fn long_captions_rise_above_the_side_bar() {
    let image = solid(4, 4, [0, 0, 0, 255]);
    let caption = "uno dos tres cuatro cinco seis siete ocho nueve diez once doce trece catorce";
    let style = style(caption, false);
    let mut surface = RecordingSurface::new(0.5);

    let layout = render_cover(
        &mut surface,
        SurfaceSpec::export(500).unwrap(),
        CoverInputs {
            image: &image,
            crop: None,
            style: &style,
            logo: None,
        },
    )
    .unwrap();

    assert!(layout.lines.len() >= 4);
    let g = layout.geometry;
    let last = layout.lines.last().unwrap();
    assert!(approx(last.y, g.side_bar_y + g.side_bar_height - g.text_height / 2.0));
    assert!(layout.caption_top().unwrap() < g.side_bar_y);
}

#[test]
fn preview_and_export_layouts_are_congruent() {
    let image = solid(40, 30, [0, 0, 0, 255]);
    let crop = CropRect::for_image(5.0, 2.0, 25.0, &image).unwrap();
    let style = style("Canciones para una noche larga de verano", true);
    let logo = LogoImage::Raster(solid(3, 3, [1, 1, 1, 255]));

    // 0.45 keeps line breaks away from exact width ties at either size.
    let render = |side: u32| {
        let mut surface = RecordingSurface::new(0.45);
        render_cover(
            &mut surface,
            SurfaceSpec::preview(side).unwrap(),
            CoverInputs {
                image: &image,
                crop: Some(&crop),
                style: &style,
                logo: Some(&logo),
            },
        )
        .unwrap()
    };
    let small = render(300);
    let large = render(500);

    assert_eq!(small.sample, large.sample);
    for (a, b) in small
        .geometry
        .normalized()
        .iter()
        .zip(large.geometry.normalized().iter())
    {
        assert!(approx(*a, *b));
    }
    assert_eq!(small.lines.len(), large.lines.len());
    for (a, b) in small.lines.iter().zip(&large.lines) {
        assert_eq!(a.text, b.text);
        assert!(approx(a.x / 300.0, b.x / 500.0));
        assert!(approx(a.y / 300.0, b.y / 500.0));
    }
}

#[test]
fn logo_requested_without_image_is_skipped() {
    let image = solid(4, 4, [0, 0, 0, 255]);
    let style = style("", true);
    let mut surface = RecordingSurface::new(0.5);
    let layout = render_cover(
        &mut surface,
        SurfaceSpec::export(100).unwrap(),
        CoverInputs {
            image: &image,
            crop: None,
            style: &style,
            logo: None,
        },
    )
    .unwrap();
    assert!(!layout.logo_drawn);
    assert_eq!(surface.calls().len(), 3);
}

#[test]
fn cpu_surface_end_to_end_pixels() {
    let image = solid(64, 48, [10, 20, 30, 255]);
    let logo = LogoImage::Raster(solid(2, 2, [250, 250, 0, 255]));
    let style = style("", true);
    let mut surface = CpuSurface::new();

    render_cover(
        &mut surface,
        SurfaceSpec::export(200).unwrap(),
        CoverInputs {
            image: &image,
            crop: None,
            style: &style,
            logo: Some(&logo),
        },
    )
    .unwrap();
    let frame = surface.readback().unwrap();

    let close = |got: [u8; 4], want: [u8; 4]| {
        got.iter()
            .zip(want.iter())
            .all(|(g, w)| (*g as i16 - *w as i16).abs() <= 2)
    };
    // Photo area.
    assert!(close(frame.pixel(100, 80).unwrap(), [10, 20, 30, 255]));
    // Bottom bar (y 190..200).
    assert!(close(frame.pixel(100, 195).unwrap(), [255, 0, 0, 255]));
    // Side bar (x 0..10, y 145..175).
    assert!(close(frame.pixel(5, 160).unwrap(), [255, 0, 0, 255]));
    // Logo box (5..25).
    assert!(close(frame.pixel(15, 15).unwrap(), [250, 250, 0, 255]));
}

#[test]
fn cpu_surface_without_font_fails_loudly_on_caption() {
    let image = solid(4, 4, [0, 0, 0, 255]);
    let style = style("hola", false);
    let mut surface = CpuSurface::new();
    let err = render_cover(
        &mut surface,
        SurfaceSpec::export(50).unwrap(),
        CoverInputs {
            image: &image,
            crop: None,
            style: &style,
            logo: None,
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("no caption font"));
}

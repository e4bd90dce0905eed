use super::*;

fn frame(width: u32, height: u32, px: [u8; 4]) -> CoverFrame {
    CoverFrame {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied: true,
    }
}

#[test]
fn slugify_matches_download_rules() {
    assert_eq!(slugify_name("  Mi Playlist Favorita  "), "mi-playlist-favorita");
    assert_eq!(slugify_name("Rock & Roll -- 80's"), "rock-roll-80s");
    assert_eq!(slugify_name("snake_case__name"), "snake-case-name");
    assert_eq!(slugify_name("---edge---"), "edge");
    assert_eq!(slugify_name("Canción Ñandú"), "cancin-and");
    assert_eq!(slugify_name("!!!"), "");
}

#[test]
fn export_name_falls_back_for_empty_slug() {
    assert_eq!(export_file_name("Noches de Verano"), "noches-de-verano.jpg");
    assert_eq!(export_file_name("   "), "cover.jpg");
}

#[test]
fn jpeg_round_trips_dimensions() {
    let f = frame(16, 16, [200, 100, 50, 255]);
    let bytes = encode_jpeg(&f, 100).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (16, 16));
    let p = decoded.get_pixel(8, 8).0;
    assert!((p[0] as i16 - 200).abs() <= 4);
    assert!((p[1] as i16 - 100).abs() <= 4);
    assert!((p[2] as i16 - 50).abs() <= 4);
}

#[test]
fn jpeg_quality_is_validated() {
    let f = frame(1, 1, [0, 0, 0, 255]);
    assert!(encode_jpeg(&f, 0).is_err());
    assert!(encode_jpeg(&f, 101).is_err());
}

#[test]
fn png_keeps_alpha() {
    let f = frame(2, 2, [64, 0, 0, 128]);
    let bytes = encode_png(&f).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    let p = decoded.get_pixel(0, 0).0;
    assert_eq!(p[3], 128);
    assert!((p[0] as i16 - 128).abs() <= 1);
}

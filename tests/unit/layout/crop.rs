use super::*;

fn blank(width: u32, height: u32) -> SourceImage {
    SourceImage::from_rgba8(width, height, vec![0; (width * height * 4) as usize]).unwrap()
}

#[test]
fn fallback_is_centered_square_landscape() {
    let img = blank(800, 600);
    assert_eq!(
        resolve_sample_rect(&img, None),
        SampleRect {
            sx: 100.0,
            sy: 0.0,
            swidth: 600.0,
            sheight: 600.0
        }
    );
}

#[test]
fn fallback_is_centered_square_portrait() {
    let img = blank(30, 51);
    assert_eq!(
        resolve_sample_rect(&img, None),
        SampleRect {
            sx: 0.0,
            sy: 10.5,
            swidth: 30.0,
            sheight: 30.0
        }
    );
}

#[test]
fn explicit_crop_is_returned_verbatim() {
    let img = blank(800, 600);
    let crop = CropRect::for_image(10.0, 20.0, 300.0, &img).unwrap();
    assert_eq!(
        resolve_sample_rect(&img, Some(&crop)),
        SampleRect {
            sx: 10.0,
            sy: 20.0,
            swidth: 300.0,
            sheight: 300.0
        }
    );
}

#[test]
fn crop_validation_rejects_bad_payloads() {
    assert!(CropRect::new(0.0, 0.0, 10.0, 11.0, 100, 100).is_err());
    assert!(CropRect::new(-1.0, 0.0, 10.0, 10.0, 100, 100).is_err());
    assert!(CropRect::new(0.0, 0.0, 0.0, 0.0, 100, 100).is_err());
    assert!(CropRect::new(95.0, 0.0, 10.0, 10.0, 100, 100).is_err());
    assert!(CropRect::new(0.0, 95.0, 10.0, 10.0, 100, 100).is_err());
    assert!(CropRect::new(f64::NAN, 0.0, 10.0, 10.0, 100, 100).is_err());
    assert!(CropRect::new(90.0, 90.0, 10.0, 10.0, 100, 100).is_ok());
}

use super::*;

#[test]
fn bgr_is_swapped_to_rgb() {
    let image = Image::from_bgr8(2, 1, &[1, 2, 3, 10, 20, 30]).unwrap();
    assert_eq!(image.get(0, 0), Color([3, 2, 1, 255]));
    assert_eq!(image.get(1, 0), Color([30, 20, 10, 255]));

    let image = Image::from_rgb8(2, 1, &[1, 2, 3, 10, 20, 30]).unwrap();
    assert_eq!(image.get(0, 0), Color([1, 2, 3, 255]));
    assert_eq!(image.get(1, 0), Color([10, 20, 30, 255]));
}

#[test]
fn wrong_buffer_size() {
    let err = Image::from_bgr8(2, 2, &[0; 11]).unwrap_err();
    assert_eq!(
        err,
        InvalidInput::BufferSize {
            expected: 12,
            actual: 11
        }
    );
}

#[test]
fn marker_is_clipped() {
    let mut image = Image::new(3, 3);
    draw::marker(&mut image, 0, 0).color(Color::WHITE);
    draw::marker(&mut image, -100, 500);
    assert_eq!(image.get(0, 0), Color::WHITE);
    assert_eq!(image.get(2, 2), Color::NULL);
}

#[test]
fn single_pixel_marker() {
    let mut image = Image::new(3, 3);
    draw::marker(&mut image, 1, 1).size(1).color(Color::RED);
    assert_eq!(image.get(1, 1), Color::RED);
    assert_eq!(image.get(0, 1), Color::NULL);
    assert_eq!(image.get(1, 0), Color::NULL);
}

#[test]
#[should_panic(expected = "uneven")]
fn even_marker_size() {
    let mut image = Image::new(3, 3);
    draw::marker(&mut image, 1, 1).size(4);
}

#[test]
fn line() {
    let mut image = Image::new(4, 1);
    draw::line(&mut image, (0, 0), (3, 0)).color(Color::BLUE);
    for x in 0..4 {
        assert_eq!(image.get(x, 0), Color::BLUE);
    }
}

#[test]
fn thick_line() {
    let mut image = Image::new(5, 5);
    draw::line(&mut image, (0, 2), (4, 2))
        .stroke_width(3)
        .color(Color::WHITE);
    for x in 1..4 {
        assert_eq!(image.get(x, 1), Color::WHITE);
        assert_eq!(image.get(x, 2), Color::WHITE);
        assert_eq!(image.get(x, 3), Color::WHITE);
    }
    for x in 0..5 {
        assert_eq!(image.get(x, 0), Color::NULL);
        assert_eq!(image.get(x, 4), Color::NULL);
    }
}

#[test]
fn far_off_primitives_are_skipped() {
    let mut image = Image::new(4, 4);
    draw::marker(&mut image, i32::MAX, i32::MIN);
    draw::line(&mut image, (1, 1), (i32::MAX, i32::MIN)).stroke_width(3);
    draw::line(&mut image, (i32::MIN, 2), (2, 2));
    assert!(image.data().iter().all(|b| *b == 0));

    // Slightly outside is still drawn and clipped.
    draw::line(&mut image, (-1000, 1), (1000, 1)).color(Color::RED);
    assert_eq!(image.get(0, 1), Color::RED);
    assert_eq!(image.get(3, 1), Color::RED);
}

#[test]
fn save_and_load() {
    let path = std::env::temp_dir().join(format!("fingertips-{}.png", std::process::id()));
    let mut image = Image::new(3, 2);
    image.clear(Color::BLUE);
    image.set(2, 1, Color::RED);
    image.save(&path).unwrap();

    let loaded = Image::load(&path);
    std::fs::remove_file(&path).unwrap();
    let loaded = loaded.unwrap();
    assert_eq!(loaded.resolution(), Resolution::new(3, 2));
    assert_eq!(loaded.get(0, 0), Color::BLUE);
    assert_eq!(loaded.get(2, 1), Color::RED);

    let err = Image::load(std::env::temp_dir().join("fingertips-missing.png")).unwrap_err();
    assert!(err.to_string().contains("failed to load image"));
}

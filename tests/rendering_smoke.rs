#![cfg(feature = "raster")]

use codeshot::{new_studio, Background, ExportOptions, RenderConfig};

#[test]
fn smoke_render_frame() {
    let mut studio = new_studio(RenderConfig::default()).expect("create studio");
    studio.set_code("const x = 1;");

    let options = ExportOptions {
        background: Background::color("#ff0000"),
        ..ExportOptions::default()
    };
    let frame = studio.render_frame(&options).expect("render frame");

    assert!(frame.width > 64);
    assert!(frame.height > 32);

    // The frame corner lies in the backdrop margin, outside the window.
    assert_eq!(frame.pixel(0, 0), (255, 0, 0, 255));

    // The frame center lies inside the window, which Night Owl paints #011627.
    let center = frame.pixel(frame.width / 2, frame.height / 2);
    assert_eq!((center.0, center.1, center.2), (0x01, 0x16, 0x27));
}

#[test]
fn smoke_scale_doubles_output() {
    let mut studio = new_studio(RenderConfig::default()).expect("create studio");
    studio.set_code("let y = 2;");

    let base = studio.render_frame(&ExportOptions::default()).unwrap();
    let doubled = studio
        .render_frame(&ExportOptions {
            size_multiplier: 2.0,
            ..ExportOptions::default()
        })
        .unwrap();

    let ratio = doubled.width as f32 / base.width as f32;
    assert!((ratio - 2.0).abs() < 0.1, "width ratio was {ratio}");
}

//! Raster backend: draw a display list into an RGBA frame.

use ab_glyph::PxScale;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect as PixelRect;

use crate::color::Rgba8;
use crate::error::{Error, Result};
use crate::rendering::font::FontFamily;
use crate::rendering::paint::{PaintCommand, Scene};
use crate::rendering::Frame;

/// Rasterize a scene. Commands are drawn in order, back to front.
pub fn rasterize(scene: &Scene, fonts: &FontFamily) -> Result<Frame> {
    let width = scene.width.max(1);
    let height = scene.height.max(1);
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    for command in &scene.commands {
        match command {
            PaintCommand::SolidRect {
                x,
                y,
                width,
                height,
                rgba,
            } => fill_rect(&mut canvas, *x, *y, *width, *height, *rgba),
            PaintCommand::RoundedRect {
                x,
                y,
                width,
                height,
                radius,
                rgba,
            } => fill_rounded_rect(&mut canvas, *x, *y, *width, *height, *radius, *rgba),
            PaintCommand::Circle {
                cx,
                cy,
                radius,
                rgba,
            } => draw_filled_circle_mut(&mut canvas, (*cx, *cy), *radius, pixel(*rgba)),
            PaintCommand::BackdropImage { path } => {
                draw_backdrop(&mut canvas, path, width, height)?
            }
            PaintCommand::Text {
                x,
                baseline,
                size,
                rgba,
                bold,
                italic,
                underline,
                content,
            } => {
                let font = fonts.select(*bold, *italic);
                let scaled = fonts.metrics(*size);
                let top = (*baseline - scaled.ascent).round() as i32;
                draw_text_mut(
                    &mut canvas,
                    pixel(*rgba),
                    x.round() as i32,
                    top,
                    PxScale::from(*size),
                    font,
                    content,
                );
                if *underline {
                    let thickness = (size / 14.0).max(1.0) as u32;
                    let run_width = fonts.string_width(content, *size).ceil() as u32;
                    fill_rect(
                        &mut canvas,
                        x.round() as i32,
                        (baseline + size / 16.0).round() as i32,
                        run_width,
                        thickness,
                        *rgba,
                    );
                }
            }
        }
    }

    Ok(Frame {
        width,
        height,
        image: canvas,
    })
}

fn pixel((r, g, b, a): Rgba8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}

fn fill_rect(canvas: &mut RgbaImage, x: i32, y: i32, width: u32, height: u32, rgba: Rgba8) {
    if width == 0 || height == 0 {
        return;
    }
    draw_filled_rect_mut(
        canvas,
        PixelRect::at(x, y).of_size(width, height),
        pixel(rgba),
    );
}

/// Rounded rectangle as three rects plus four corner discs.
fn fill_rounded_rect(
    canvas: &mut RgbaImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    radius: u32,
    rgba: Rgba8,
) {
    let r = radius.min(width / 2).min(height / 2);
    if r == 0 {
        fill_rect(canvas, x, y, width, height, rgba);
        return;
    }
    let ri = r as i32;
    let color = pixel(rgba);

    fill_rect(canvas, x, y + ri, width, height - 2 * r, rgba);
    fill_rect(canvas, x + ri, y, width - 2 * r, r, rgba);
    fill_rect(canvas, x + ri, y + height as i32 - ri, width - 2 * r, r, rgba);

    let right = x + width as i32 - 1 - ri;
    let bottom = y + height as i32 - 1 - ri;
    for (cx, cy) in [
        (x + ri, y + ri),
        (right, y + ri),
        (x + ri, bottom),
        (right, bottom),
    ] {
        draw_filled_circle_mut(canvas, (cx, cy), ri, color);
    }
}

/// Load a backdrop picture and draw it cover-scaled over the frame.
fn draw_backdrop(
    canvas: &mut RgbaImage,
    path: &std::path::Path,
    width: u32,
    height: u32,
) -> Result<()> {
    let picture = image::open(path)
        .map_err(|e| Error::RenderError(format!("backdrop {}: {e}", path.display())))?
        .to_rgba8();
    let (pw, ph) = picture.dimensions();
    if pw == 0 || ph == 0 {
        return Err(Error::RenderError(format!(
            "backdrop {} is empty",
            path.display()
        )));
    }

    // Cover: scale up until both axes are filled, then center-crop.
    let scale = f32::max(width as f32 / pw as f32, height as f32 / ph as f32);
    let rw = ((pw as f32 * scale).ceil() as u32).max(width);
    let rh = ((ph as f32 * scale).ceil() as u32).max(height);
    let resized = image::imageops::resize(&picture, rw, rh, image::imageops::FilterType::Triangle);
    let ox = (rw - width) / 2;
    let oy = (rh - height) / 2;

    for y in 0..height {
        for x in 0..width {
            canvas.put_pixel(x, y, *resized.get_pixel(x + ox, y + oy));
        }
    }
    Ok(())
}

/// [`crate::ExportBackend`] producing PNG, JPEG or blob bytes.
pub struct RasterBackend {
    format: crate::FileExtension,
}

impl RasterBackend {
    pub fn new(format: crate::FileExtension) -> Self {
        Self { format }
    }
}

impl crate::ExportBackend for RasterBackend {
    fn extension(&self) -> crate::FileExtension {
        self.format
    }

    fn render(&self, scene: &Scene, fonts: &FontFamily) -> Result<Vec<u8>> {
        let frame = rasterize(scene, fonts)?;
        match self.format {
            crate::FileExtension::Jpeg => crate::export::encode_jpeg(&frame),
            _ => crate::export::encode_png(&frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fonts() -> FontFamily {
        FontFamily::embedded().unwrap()
    }

    #[test]
    fn solid_rect_fills_pixels() {
        let scene = Scene {
            width: 16,
            height: 16,
            commands: vec![PaintCommand::SolidRect {
                x: 0,
                y: 0,
                width: 16,
                height: 16,
                rgba: (10, 20, 30, 255),
            }],
        };
        let frame = rasterize(&scene, &fonts()).unwrap();
        assert_eq!(frame.pixel(0, 0), (10, 20, 30, 255));
        assert_eq!(frame.pixel(15, 15), (10, 20, 30, 255));
    }

    #[test]
    fn rounded_rect_leaves_corners_clear() {
        let scene = Scene {
            width: 40,
            height: 40,
            commands: vec![PaintCommand::RoundedRect {
                x: 0,
                y: 0,
                width: 40,
                height: 40,
                radius: 10,
                rgba: (255, 0, 0, 255),
            }],
        };
        let frame = rasterize(&scene, &fonts()).unwrap();
        // Extreme corner stays transparent, center is filled.
        assert_eq!(frame.pixel(0, 0).3, 0);
        assert_eq!(frame.pixel(20, 20), (255, 0, 0, 255));
        // Edge midpoints are filled too.
        assert_eq!(frame.pixel(20, 0), (255, 0, 0, 255));
        assert_eq!(frame.pixel(0, 20), (255, 0, 0, 255));
    }

    #[test]
    fn text_marks_pixels() {
        let scene = Scene {
            width: 60,
            height: 30,
            commands: vec![
                PaintCommand::SolidRect {
                    x: 0,
                    y: 0,
                    width: 60,
                    height: 30,
                    rgba: (0, 0, 0, 255),
                },
                PaintCommand::Text {
                    x: 2.0,
                    baseline: 20.0,
                    size: 18.0,
                    rgba: (255, 255, 255, 255),
                    bold: false,
                    italic: false,
                    underline: false,
                    content: "W".to_string(),
                },
            ],
        };
        let frame = rasterize(&scene, &fonts()).unwrap();
        let lit = frame
            .image
            .pixels()
            .filter(|p| p[0] > 128 && p[1] > 128 && p[2] > 128)
            .count();
        assert!(lit > 0, "glyph should light up some pixels");
    }

    #[test]
    fn missing_backdrop_is_a_render_error() {
        let scene = Scene {
            width: 8,
            height: 8,
            commands: vec![PaintCommand::BackdropImage {
                path: std::path::PathBuf::from("/nonexistent/backdrop.png"),
            }],
        };
        assert!(matches!(
            rasterize(&scene, &fonts()),
            Err(Error::RenderError(_))
        ));
    }

    #[test]
    fn zero_sized_scene_still_produces_a_frame() {
        let scene = Scene {
            width: 0,
            height: 0,
            commands: Vec::new(),
        };
        let frame = rasterize(&scene, &fonts()).unwrap();
        assert_eq!(frame.width, 1);
        assert_eq!(frame.height, 1);
    }
}

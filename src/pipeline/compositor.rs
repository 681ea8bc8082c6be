use image::imageops;
use image::{Rgb, Rgba, RgbaImage};

/// Draws `image` at the origin of a `width` x `height` canvas filled with
/// `background`. The result has no transparent pixels.
pub fn composite(image: &RgbaImage, background: Rgb<u8>, width: u32, height: u32) -> RgbaImage {
    let [r, g, b] = background.0;
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));
    // clipped to the canvas
    imageops::overlay(&mut canvas, image, 0, 0);
    canvas
}

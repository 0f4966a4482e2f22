//! Conversion of raw dataset arrays into upright image buffers.
//!
//! The arrays in the container are stored rotated 90° counter-clockwise
//! relative to the conventional upright orientation, with the color channel
//! axis first. Every conversion therefore ends with a 90° clockwise rotation
//! (which swaps width and height), and the color conversion additionally
//! moves the channel axis last.

use image::{imageops, GrayImage, ImageBuffer, Luma, RgbImage};
use ndarray::{ArrayView2, ArrayView3};

/// A single-channel floating-point depth image, in meters.
pub type DepthImage = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Converts a raw `(3, H, W)` color array into an upright RGB image.
pub(crate) fn color_image(map: ArrayView3<'_, u8>) -> RgbImage {
    let (_, h, w) = map.dim();
    // (3, H, W) -> (H, W, 3), then collect in logical (row-major) order.
    let hwc = map.permuted_axes([1, 2, 0]);
    let buf: Vec<u8> = hwc.iter().copied().collect();
    let image = RgbImage::from_raw(w as u32, h as u32, buf)
        .expect("pixel buffer length matches image dimensions");
    imageops::rotate90(&image)
}

/// Converts a raw `(H, W)` depth array into an upright depth image.
pub(crate) fn depth_image(map: ArrayView2<'_, f32>) -> DepthImage {
    let (h, w) = map.dim();
    let buf: Vec<f32> = map.iter().copied().collect();
    let image = DepthImage::from_raw(w as u32, h as u32, buf)
        .expect("pixel buffer length matches image dimensions");
    imageops::rotate90(&image)
}

/// Converts a raw `(H, W)` label array into an upright 8-bit label image.
///
/// Label values are narrowed with a wrapping cast, matching the modular
/// `uint8` conversion the dataset's reference tooling applies.
pub(crate) fn label_image(map: ArrayView2<'_, u16>) -> GrayImage {
    let (h, w) = map.dim();
    let buf: Vec<u8> = map.iter().map(|&v| v as u8).collect();
    let image = GrayImage::from_raw(w as u32, h as u32, buf)
        .expect("pixel buffer length matches image dimensions");
    imageops::rotate90(&image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array3};

    #[test]
    fn color_moves_channels_and_rotates() {
        // 2x3 image; pixel (x, y) has value 10*y + x in every channel.
        let raw = Array3::from_shape_fn((3, 2, 3), |(_, y, x)| (10 * y + x) as u8);
        let image = color_image(raw.view());

        // 90° clockwise rotation swaps the dimensions.
        assert_eq!(image.dimensions(), (2, 3));
        // Input pixel (x, y) lands at (h - 1 - y, x).
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0]); // was (0, 0)
        assert_eq!(image.get_pixel(0, 2).0, [12, 12, 12]); // was (2, 1)
    }

    #[test]
    fn depth_passes_values_through() {
        let raw = arr2(&[[1.5f32, 2.5], [3.5, 4.5]]);
        let image = depth_image(raw.view());
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(1, 0).0, [1.5]); // was (0, 0)
        assert_eq!(image.get_pixel(0, 0).0, [3.5]); // was (0, 1)
    }

    #[test]
    fn label_cast_wraps_modulo_256() {
        let raw = arr2(&[[300u16, 5], [255, 0]]);
        let image = label_image(raw.view());
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(1, 0).0, [44]); // 300 % 256, was (0, 0)
    }
}

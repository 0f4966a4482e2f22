//! Dumps one sample of the labeled dataset to PNG files.
//!
//! ```text
//! cargo run --example show_sample -- dataset/nyu_depth_v2_labeled.mat [index]
//! ```

use image::{GrayImage, Luma};
use nyuv2::LabeledDataset;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: show_sample <nyu_depth_v2_labeled.mat> [index]")?;
    let index: usize = args.next().map(|arg| arg.parse()).transpose()?.unwrap_or(0);

    let dataset = LabeledDataset::open(&path)?;
    println!(
        "{} samples, {} label names",
        dataset.len()?,
        dataset.label_names()?.len()
    );

    let sample = dataset.get(index)?;
    println!("No. {index}: {}, {}", sample.scene_type, sample.scene_name);

    sample.color.save(format!("sample{index}_color.png"))?;
    sample.label.save(format!("sample{index}_label.png"))?;

    // Depth is in float meters; scale into 8 bits for viewing.
    let max = sample
        .depth
        .pixels()
        .map(|p| p.0[0])
        .fold(0.0f32, f32::max)
        .max(f32::EPSILON);
    let depth = GrayImage::from_fn(sample.depth.width(), sample.depth.height(), |x, y| {
        Luma([(sample.depth.get_pixel(x, y).0[0] / max * 255.0) as u8])
    });
    depth.save(format!("sample{index}_depth.png"))?;

    Ok(())
}

//! Sharpen effect example
//! Sharpens a generated soft gradient disc

use image::{DynamicImage, GrayImage, Luma};
use image_effect::{Effect, ImageEffect, stylized_effect::SharpenConfig};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = DynamicImage::ImageLuma8(GrayImage::from_fn(200, 200, |x, y| {
        let dx = x as f32 - 100.0;
        let dy = y as f32 - 100.0;
        let d = (dx * dx + dy * dy).sqrt();
        Luma([(255.0 - (d * 2.0).min(255.0)) as u8])
    }));

    let effect = ImageEffect::Sharpen(SharpenConfig::new());
    let output = effect.apply(&img)?;

    img.save(output_dir.join("sharpen_input.png"))?;
    output.save(output_dir.join("sharpen_effect.png"))?;

    println!("✓ Sharpen effect applied successfully!");
    println!("  Original: tmp/sharpen_input.png");
    println!("  Effect:   tmp/sharpen_effect.png");

    Ok(())
}

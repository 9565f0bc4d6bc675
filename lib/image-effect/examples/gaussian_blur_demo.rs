//! Gaussian blur effect example
//! Demonstrates different kernel sizes on a generated checkerboard

use image::{DynamicImage, Rgb, RgbImage};
use image_effect::{Effect, ImageEffect, blur_effect::GaussianBlurConfig};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(256, 256, |x, y| {
        if (x / 32 + y / 32) % 2 == 0 {
            Rgb([230, 60, 40])
        } else {
            Rgb([20, 40, 200])
        }
    }));
    img.save(output_dir.join("checkerboard.png"))?;

    for kernel_size in [3, 5, 9, 15, 31] {
        let effect =
            ImageEffect::GaussianBlur(GaussianBlurConfig::new().with_kernel_size(kernel_size));
        let output = effect.apply(&img)?;

        let filename = format!("gaussian_blur_k{kernel_size}.png");
        output.save(output_dir.join(&filename))?;
        println!("✓ Generated {filename}");
    }

    println!("\n✓ All gaussian blur effects applied successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}

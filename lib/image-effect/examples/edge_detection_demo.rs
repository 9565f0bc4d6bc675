//! Edge detection example
//! Runs Canny with a few threshold pairs on generated shapes

use image::{DynamicImage, Rgb, RgbImage};
use image_effect::{Effect, ImageEffect, stylized_effect::EdgeDetectionConfig};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(240, 160, |x, y| {
        let in_rect = (30..110).contains(&x) && (30..130).contains(&y);
        let dx = x as i32 - 170;
        let dy = y as i32 - 80;
        let in_disc = dx * dx + dy * dy < 45 * 45;

        match (in_rect, in_disc) {
            (true, _) => Rgb([250, 250, 250]),
            (_, true) => Rgb([120, 200, 60]),
            _ => Rgb([10, 10, 30]),
        }
    }));
    img.save(output_dir.join("shapes.png"))?;

    for (low, high) in [(50.0, 100.0), (100.0, 200.0), (200.0, 400.0)] {
        let effect = ImageEffect::EdgeDetection(
            EdgeDetectionConfig::new()
                .with_low_threshold(low)
                .with_high_threshold(high),
        );
        let output = effect.apply(&img)?;

        let filename = format!("edge_detection_{low}_{high}.png");
        output.save(output_dir.join(&filename))?;
        println!("✓ Generated {filename}");
    }

    println!("\n✓ Edge detection applied successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}

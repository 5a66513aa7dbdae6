use alphamesh::math::Real;
use alphamesh::transformation::Resolution;
use alphamesh::{convert, ConvertOptions, RasterImage};

const SIZE: usize = 64;

fn main() {
    // A ring-shaped sprite with a notch cut into it.
    let mut pixels = Vec::with_capacity(SIZE * SIZE * 4);
    for row in 0..SIZE {
        for col in 0..SIZE {
            let dx = col as Real + 0.5 - SIZE as Real / 2.0;
            let dy = row as Real + 0.5 - SIZE as Real / 2.0;
            let dist = (dx * dx + dy * dy).sqrt();
            let notch = dx > 0.0 && dy.abs() < 4.0;
            let alpha = if dist < 28.0 && !notch { 1.0 } else { 0.0 };
            pixels.extend_from_slice(&[1.0, 0.8, 0.2, alpha]);
        }
    }

    let image = RasterImage {
        pixels: &pixels,
        width: SIZE,
        height: SIZE,
        resolution: Resolution::uniform(72.0),
        name: "pacman",
    };

    for subdivide in [false, true] {
        let options = ConvertOptions {
            subdivide,
            ..Default::default()
        };

        match convert(&image, &options) {
            Ok(sprite) => {
                println!(
                    "subdivide = {subdivide}: {} outline points, {} vertices, {} triangles, area {:.4} m²",
                    sprite.outline.len(),
                    sprite.mesh.vertices().len(),
                    sprite.mesh.faces().len(),
                    sprite.mesh.planar_area(),
                );
                for warning in &sprite.warnings {
                    println!("  warning: {warning}");
                }
            }
            Err(err) => println!("subdivide = {subdivide}: conversion failed: {err}"),
        }
    }
}

use alphamesh::math::Real;
use alphamesh::shape::OccupancyGrid;
use oorandom::Rand32;

/// An RGBA buffer where the pixels for which `opaque(row, col)` holds have a unit alpha.
pub fn rgba(width: usize, height: usize, opaque: impl Fn(usize, usize) -> bool) -> Vec<Real> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for row in 0..height {
        for col in 0..width {
            let alpha = if opaque(row, col) { 1.0 } else { 0.0 };
            pixels.extend_from_slice(&[0.5, 0.5, 0.5, alpha]);
        }
    }
    pixels
}

/// A star-shaped blob centered in a `size × size` image, with a radius
/// randomly varying with the angle.
pub fn random_blob(rng: &mut Rand32, size: usize) -> OccupancyGrid {
    let num_lobes = rng.rand_range(2..7) as Real;
    let phase = rng.rand_float() as Real * 6.0;
    let amplitude = 0.1 + rng.rand_float() as Real * 0.2;
    let center = size as Real / 2.0;
    let base_radius = center * 0.7;

    let mask: Vec<bool> = (0..size * size)
        .map(|i| {
            let dx = (i % size) as Real + 0.5 - center;
            let dy = (i / size) as Real + 0.5 - center;
            let angle = dy.atan2(dx);
            let radius = base_radius * (1.0 + amplitude * (num_lobes * angle + phase).sin());
            dx * dx + dy * dy <= radius * radius
        })
        .collect();

    OccupancyGrid::from_mask(&mask, size, size).unwrap()
}

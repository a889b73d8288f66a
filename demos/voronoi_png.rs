use std::time::Instant;

use kdvoronoi::{render, DistanceMetric, Point, VoronoiOptions};
use plotters::prelude::*;
use rand::Rng;

const SIZE: usize = 800;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let points: Vec<Point> = (0..50)
        .map(|_| [rng.gen_range(0.0..SIZE as f64), rng.gen_range(0.0..SIZE as f64)])
        .collect();

    let start = Instant::now();
    for metric in DistanceMetric::ALL {
        let filename = format!("voronoi_{}.png", metric.name());
        let options = VoronoiOptions::new(SIZE, SIZE).with_metric(metric).with_seed(2024);
        let image = render(&points, &options)?;

        let root = BitMapBackend::new(&filename, (SIZE as u32, SIZE as u32)).into_drawing_area();
        for y in 0..image.height() {
            for x in 0..image.width() {
                if let Some(c) = image.pixel(x, y) {
                    root.draw_pixel((x as i32, y as i32), &RGBColor(c.r(), c.g(), c.b()))?;
                }
            }
        }
        root.present()?;
        println!("Output saved to {}", filename);
    }
    println!("avg time per diagram (s): {:.3}", start.elapsed().as_secs_f64() / 3.0);
    Ok(())
}

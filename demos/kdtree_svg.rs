use std::time::Instant;

use kdvoronoi::{BoundingBox, DistanceMetric, KdTree, Point, TraversalOrder};
use plotters::prelude::*;
use rand::Rng;

const MAX: f64 = 800.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let points: Vec<Point> = (0..40)
        .map(|_| [rng.gen_range(0.0..MAX), rng.gen_range(0.0..MAX)])
        .collect();
    let query = [MAX / 2.0, MAX / 3.0];
    let k = 5;

    let start = Instant::now();
    let tree: KdTree = KdTree::build_within(&points, BoundingBox::new([0.0, 0.0], [MAX, MAX]));
    println!("tree build time (ms): {:.3}", start.elapsed().as_secs_f64() * 1000.0);

    let start = Instant::now();
    let neighbors = tree.k_nearest(query, k, DistanceMetric::Euclidean);
    println!("search took (ms): {:.3}", start.elapsed().as_secs_f64() * 1000.0);
    println!("the {} nearest neighbors to {:?} are:", k, query);
    for n in &neighbors {
        println!("  {:?} (d² = {:.1})", n.point, n.distance);
    }

    let filename = "kdtree_partition.svg";
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root).build_cartesian_2d(0.0..MAX, 0.0..MAX)?;

    // Vertical line for x splits, horizontal line for y splits, clipped to the node's range.
    let mut lines = Vec::new();
    tree.traverse(TraversalOrder::PreOrder, |node| {
        let p = node.point();
        let r = node.range();
        let (segment, color) = if node.axis() == 0 {
            (vec![(p[0], r.min[1]), (p[0], r.max[1])], RED)
        } else {
            (vec![(r.min[0], p[1]), (r.max[0], p[1])], BLUE)
        };
        lines.push(PathElement::new(segment, color.stroke_width(1)));
    });
    chart.draw_series(lines)?;

    chart.draw_series(points.iter().map(|p| Circle::new((p[0], p[1]), 3, BLACK.filled())))?;
    chart.draw_series(neighbors.iter().map(|n| Circle::new((n.point[0], n.point[1]), 6, GREEN.stroke_width(2))))?;
    chart.draw_series(std::iter::once(Cross::new((query[0], query[1]), 6, GREEN.stroke_width(2))))?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}

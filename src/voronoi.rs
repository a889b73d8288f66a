use ecolor::{Color32, Rgba};
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::error::{Result, VoronoiError};
use crate::kdtree::{KdTree, Point, TraversalOrder};
use crate::metric::DistanceMetric;

/// Payload attached to every tree node by the rasterizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Site {
    /// Position of the point in the input slice.
    pub index: u32,
    pub color: Color32,
}

/// Bytes allocated per pixel: the color plus the owning site.
const PIXEL_BYTES: usize = std::mem::size_of::<Color32>() + std::mem::size_of::<Option<u32>>();

/// Settings for [`render`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoronoiOptions {
    pub width: usize,
    pub height: usize,
    pub metric: DistanceMetric,
    /// Seed for the site colors. `None` draws a fresh palette on every render.
    pub seed: Option<u64>,
    /// Color used to mark the input points, `None` to leave them out.
    pub marker: Option<Color32>,
    /// Fill color when there are no points at all.
    pub background: Color32,
    /// Size of a dedicated thread pool. `None` runs on the current rayon pool.
    pub threads: Option<usize>,
}

impl Default for VoronoiOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            metric: DistanceMetric::Euclidean,
            seed: None,
            marker: Some(Color32::BLACK),
            background: Color32::WHITE,
            threads: None,
        }
    }
}

impl VoronoiOptions {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_marker(mut self, marker: Option<Color32>) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_background(mut self, background: Color32) -> Self {
        self.background = background;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Checks the options and returns the number of pixels to render.
    pub fn validate(&self) -> Result<usize> {
        if self.threads == Some(0) {
            return Err(VoronoiError::ZeroThreads);
        }
        self.width
            .checked_mul(self.height)
            .filter(|&n| n <= isize::MAX as usize / PIXEL_BYTES)
            .ok_or(VoronoiError::ImageTooLarge { width: self.width, height: self.height })
    }
}

/// A rasterized Voronoi diagram, stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiImage {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
    sites: Vec<Option<u32>>,
}

impl VoronoiImage {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    /// Index of the input point owning each pixel, `None` when there were no points.
    ///
    /// Marker pixels keep the owner computed by the fill pass.
    pub fn sites(&self) -> &[Option<u32>] {
        &self.sites
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn site(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.sites[y * self.width + x]
    }

    /// Pixels as interleaved RGBA bytes, e.g. for an image encoder or a canvas.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }

    pub fn into_pixels(self) -> Vec<Color32> {
        self.pixels
    }
}

/// Builds a tree over `points` and gives every site a random saturated color.
///
/// Colors are drawn in pre-order from a generator seeded with `seed`, so the
/// same points in the same order and the same seed always get the same palette.
pub fn build_sites(points: &[Point], seed: Option<u64>) -> KdTree<Site> {
    let items = points
        .iter()
        .enumerate()
        .map(|(i, &p)| (p, Site { index: i as u32, color: Color32::TRANSPARENT }))
        .collect();
    let mut tree = KdTree::build_with(items);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tree.traverse_mut(TraversalOrder::PreOrder, |_, site| {
        site.color = random_hue(&mut rng);
    });
    tree
}

fn random_hue<R: Rng>(rng: &mut R) -> Color32 {
    let [r, g, b] = ecolor::rgb_from_hsv((rng.gen_range(0.0..1.0), 1.0, 1.0));
    Color32::from(Rgba::from_rgb(r, g, b))
}

/// Renders the Voronoi diagram of `points` into a `width x height` grid.
///
/// Pixel `(x, y)` takes the color of the site nearest to `[x, y]` under the
/// configured metric. Rows are filled in parallel; the input points are then
/// drawn on top in the marker color.
pub fn render(points: &[Point], options: &VoronoiOptions) -> Result<VoronoiImage> {
    let count = options.validate()?;
    log::debug!(
        "rendering {}x{} voronoi of {} points ({} metric, {} threads)",
        options.width,
        options.height,
        points.len(),
        options.metric,
        options.threads.map_or_else(|| "pool".to_string(), |n| n.to_string())
    );

    // Colors are assigned before any query runs.
    let tree = build_sites(points, options.seed);

    let image = match options.threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            pool.install(|| rasterize(&tree, points, options, count))
        }
        None => rasterize(&tree, points, options, count),
    };
    Ok(image)
}

fn rasterize(tree: &KdTree<Site>, points: &[Point], options: &VoronoiOptions, count: usize) -> VoronoiImage {
    let width = options.width;
    let height = options.height;
    let metric = options.metric;

    let mut pixels = vec![options.background; count];
    let mut sites = vec![None; count];

    if !tree.is_empty() && width > 0 {
        pixels
            .par_chunks_mut(width)
            .zip(sites.par_chunks_mut(width))
            .enumerate()
            .for_each(|(y, (row, row_sites))| {
                for (x, (pixel, site)) in row.iter_mut().zip(row_sites.iter_mut()).enumerate() {
                    if let Some(hit) = tree.nearest([x as f64, y as f64], metric) {
                        *pixel = hit.payload.color;
                        *site = Some(hit.payload.index);
                    }
                }
            });
    }

    if let Some(marker) = options.marker {
        for p in points {
            let x = p[0].round();
            let y = p[1].round();
            if x >= 0.0 && y >= 0.0 && x < width as f64 && y < height as f64 {
                pixels[y as usize * width + x as usize] = marker;
            }
        }
    }

    VoronoiImage { width, height, pixels, sites }
}

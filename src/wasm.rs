use crate::kdtree::{KdTree, Point};
use crate::metric::DistanceMetric;
use crate::voronoi::{render, VoronoiOptions};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

// --- Metric ---

#[wasm_bindgen(js_name = DistanceMetric)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceMetricWASM {
    Euclidean = 0,
    Manhattan = 1,
    Chebyshev = 2,
}

impl From<DistanceMetricWASM> for DistanceMetric {
    fn from(m: DistanceMetricWASM) -> Self {
        match m {
            DistanceMetricWASM::Euclidean => DistanceMetric::Euclidean,
            DistanceMetricWASM::Manhattan => DistanceMetric::Manhattan,
            DistanceMetricWASM::Chebyshev => DistanceMetric::Chebyshev,
        }
    }
}

fn parse_points(coords: &[f64]) -> Vec<Point> {
    coords.chunks_exact(2).map(|c| [c[0], c[1]]).collect()
}

// --- Tree ---

#[wasm_bindgen(js_name = KdTree)]
pub struct KdTreeWASM {
    inner: KdTree<u32>,
}

#[wasm_bindgen(js_class = KdTree)]
impl KdTreeWASM {
    /// Builds a tree from a flat array of coordinates `[x, y, x, y, ...]`.
    /// A trailing odd coordinate is ignored.
    #[wasm_bindgen(constructor)]
    pub fn new(points: &[f64]) -> KdTreeWASM {
        let items = parse_points(points)
            .into_iter()
            .enumerate()
            .map(|(i, p)| (p, i as u32))
            .collect();
        KdTreeWASM { inner: KdTree::build_with(items) }
    }

    #[wasm_bindgen(getter)]
    pub fn count_points(&self) -> usize { self.inner.len() }

    #[wasm_bindgen(getter)]
    pub fn depth(&self) -> usize { self.inner.depth() }

    /// Returns `[index, x, y, distance]` of the nearest point, or an empty array
    /// for an empty tree.
    pub fn nearest(&self, x: f64, y: f64, metric: DistanceMetricWASM) -> Vec<f64> {
        self.inner
            .nearest([x, y], metric.into())
            .map(|n| vec![*n.payload as f64, n.point[0], n.point[1], n.distance])
            .unwrap_or_default()
    }

    /// Returns flat `[index, x, y, distance, ...]` quadruples, nearest first.
    pub fn k_nearest(&self, x: f64, y: f64, k: usize, metric: DistanceMetricWASM) -> Vec<f64> {
        self.inner
            .k_nearest([x, y], k, metric.into())
            .iter()
            .flat_map(|n| [*n.payload as f64, n.point[0], n.point[1], n.distance])
            .collect()
    }
}

// --- Voronoi ---

/// Renders a Voronoi diagram as RGBA bytes, ready for `ImageData`.
///
/// Throws if the image is too large to allocate.
#[wasm_bindgen]
pub fn render_voronoi(points: &[f64], width: usize, height: usize, metric: DistanceMetricWASM, seed: Option<u64>) -> Result<Vec<u8>, JsValue> {
    render_rgba(points, width, height, metric, seed)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn render_rgba(points: &[f64], width: usize, height: usize, metric: DistanceMetricWASM, seed: Option<u64>) -> crate::Result<Vec<u8>> {
    let mut options = VoronoiOptions::new(width, height).with_metric(metric.into());
    options.seed = seed;
    Ok(render(&parse_points(points), &options)?.to_rgba8())
}

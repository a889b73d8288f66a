/// Errors reported by the rasterizer configuration and parsing helpers.
///
/// Tree construction and queries are infallible; an empty tree simply yields no
/// results.
#[derive(Debug, thiserror::Error)]
pub enum VoronoiError {
    #[error("image of {width}x{height} pixels does not fit in memory")]
    ImageTooLarge { width: usize, height: usize },

    #[error("thread count must be at least 1")]
    ZeroThreads,

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("unknown distance metric: {0:?}")]
    UnknownMetric(String),
}

pub type Result<T> = std::result::Result<T, VoronoiError>;

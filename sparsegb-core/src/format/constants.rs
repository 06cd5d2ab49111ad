//! Format constants and defaults

/// Banner opening a Matrix Market file
pub const MM_BANNER: &str = "%%MatrixMarket";

/// Comment line carrying the exact GraphBLAS type of the stored values
pub const GRAPHBLAS_BANNER: &str = "%%GraphBLAS";

/// Hyper switch that forces hypersparse storage
pub const ALWAYS_HYPER: f64 = 1.0;

/// Hyper switch that disables hypersparse storage
pub const NEVER_HYPER: f64 = -1.0;

/// Default hyper switch for new containers
pub const DEFAULT_HYPER_SWITCH: f64 = 0.0625;

/// Minimum number of rows before row-parallel kernels fan out
pub const PARALLEL_ROW_THRESHOLD: usize = 256;

//! Configuration and system parameters for sparse matrix-vector products

/// System parameters for performance tuning
#[derive(Debug, Clone)]
pub struct SystemParameters {
    /// Number of threads to use
    pub n_threads: usize,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
        }
    }
}

/// Configuration for the row-parallel matvec
#[derive(Debug, Clone)]
pub struct MatvecConfig {
    /// System parameters for performance tuning
    pub system_params: SystemParameters,

    /// Matrices with fewer rows than this use the serial loop
    pub parallel_threshold: usize,

    /// Lower bound on the rows handed to a single rayon task
    pub min_rows_per_task: usize,
}

impl Default for MatvecConfig {
    fn default() -> Self {
        Self {
            system_params: SystemParameters::default(),
            parallel_threshold: 4096,
            min_rows_per_task: 256,
        }
    }
}

impl MatvecConfig {
    /// Sets the row count below which the serial loop is used
    pub fn with_parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_threshold = rows;
        self
    }

    /// Sets the minimum number of rows per rayon task
    pub fn with_min_rows_per_task(mut self, rows: usize) -> Self {
        self.min_rows_per_task = rows.max(1);
        self
    }

    /// Sets the number of threads the work is split for
    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.system_params.n_threads = n_threads.max(1);
        self
    }

    /// Rows per rayon task for a matrix with `n_rows` rows
    ///
    /// Aims for four tasks per thread without going below
    /// `min_rows_per_task`.
    pub fn rows_per_task(&self, n_rows: usize) -> usize {
        let tasks = self.system_params.n_threads.max(1) * 4;
        (n_rows / tasks).max(self.min_rows_per_task).max(1)
    }
}

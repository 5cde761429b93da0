/// Configuration options for a batch transfer.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Replace files that already exist in the target directory
    pub overwrite: bool,

    /// Create the target directory when it is missing
    pub create_target: bool,

    /// Number of parallel copy threads (0 = auto)
    pub jobs: usize,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            overwrite: true,
            create_target: false,
            jobs: 0,
        }
    }
}

impl TransferOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_create_target(mut self, create: bool) -> Self {
        self.create_target = create;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }
}

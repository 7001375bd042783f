/// Default nesting budget for a single sanitize call.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum nesting depth below the root before the call fails with
    /// `Error::DepthExceeded`.
    pub max_depth: usize,
    /// Run the canonical JSON check on terminal scalars.
    pub validate_scalars: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            validate_scalars: true,
        }
    }
}

impl Options {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

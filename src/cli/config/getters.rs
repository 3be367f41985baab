use std::path::Path;

use super::{Config, Stage, ZeroDepth};
use crate::info::DepthField;

impl Config {
    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    pub fn trimmed_dir(&self) -> &Path {
        &self.trimmed_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn depth_field(&self) -> &DepthField {
        &self.depth_field
    }

    pub fn n_alleles(&self) -> usize {
        self.n_alleles
    }

    pub fn zero_depth(&self) -> ZeroDepth {
        self.zero_depth
    }

    /// Whether an input file with this name should be processed
    pub fn include(&self, name: &str) -> bool {
        match &self.include {
            Some(re) => re.is_match(name),
            None => true,
        }
    }
}

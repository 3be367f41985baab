use std::{fmt, path::PathBuf};

use crate::annotate::ExtractStats;

#[derive(Debug)]
pub struct Failure {
    pub file: PathBuf,
    pub reason: String,
}

/// Outcome of running one stage over a directory
#[derive(Debug)]
pub struct Summary {
    pub stage: &'static str,
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<Failure>,
    pub stats: ExtractStats,
}

impl Summary {
    pub fn new(stage: &'static str) -> Self {
        Self {
            stage,
            succeeded: Vec::new(),
            failed: Vec::new(),
            stats: ExtractStats::default(),
        }
    }

    pub fn add_stats(&mut self, s: &ExtractStats) {
        let t = &mut self.stats;
        t.records += s.records;
        t.written += s.written;
        t.zero_depth += s.zero_depth;
        t.dropped_rows += s.dropped_rows;
        t.dropped_depth += s.dropped_depth;
    }

    pub fn n_files(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn log(&self) {
        info!("{}", self);
        for f in self.failed.iter() {
            info!("  failed: {}: {}", f.file.display(), f.reason)
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} file(s), {} succeeded, {} failed",
            self.stage,
            self.n_files(),
            self.succeeded.len(),
            self.failed.len()
        )?;
        let s = &self.stats;
        if s.records > 0 {
            write!(
                f,
                "; {} records read, {} written, {} with zero depth, {} with dropped alleles",
                s.records, s.written, s.zero_depth, s.dropped_rows
            )?;
        }
        Ok(())
    }
}

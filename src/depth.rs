/// Rectangular table of per-allele depths, one row per record.
/// Rows shorter than the table width are padded with zeros
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthMatrix {
    width: usize,
    n_alleles: usize,
    data: Vec<u64>,
}

impl DepthMatrix {
    /// Build from ragged rows.  Width is the widest row, but never less than
    /// `n_alleles` so the retained columns always exist
    pub fn from_rows(rows: &[Vec<u64>], n_alleles: usize) -> Self {
        assert!(n_alleles > 0, "At least one allele must be retained");
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0).max(n_alleles);
        let mut data = vec![0; width * rows.len()];
        for (r, d) in rows.iter().zip(data.chunks_exact_mut(width)) {
            d[..r.len()].copy_from_slice(r)
        }
        trace!("Depth matrix {} x {}", rows.len(), width);
        Self {
            width,
            n_alleles,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn n_rows(&self) -> usize {
        self.data.len().checked_div(self.width).unwrap_or(0)
    }

    pub fn row(&self, ix: usize) -> &[u64] {
        &self.data[ix * self.width..(ix + 1) * self.width]
    }

    /// Retained (leading) columns of row `ix`
    pub fn retained(&self, ix: usize) -> &[u64] {
        &self.row(ix)[..self.n_alleles]
    }

    /// Sum of the retained columns only
    pub fn total_depth(&self, ix: usize) -> u64 {
        self.retained(ix).iter().sum()
    }

    /// Depth in columns beyond the retained ones
    pub fn dropped_depth(&self, ix: usize) -> u64 {
        self.row(ix)[self.n_alleles..].iter().sum()
    }

    /// Retained depths divided by the total.  None if the total is zero
    pub fn frequencies(&self, ix: usize) -> Option<Vec<f64>> {
        let tot = self.total_depth(ix);
        if tot == 0 {
            None
        } else {
            let z = tot as f64;
            Some(self.retained(ix).iter().map(|&d| d as f64 / z).collect())
        }
    }
}

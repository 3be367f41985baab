use std::{
    fmt,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    cli::{Config, ZeroDepth},
    depth::DepthMatrix,
    error::PileupError,
    info::{parse_depths, DepthField, InfoField},
    output::AtomicWriter,
    table::{parse_table, TrimmedRecord},
};

/// Settings that control annotation of a single table
#[derive(Debug, Clone)]
pub struct ExtractParams<'a> {
    pub marker: &'a str,
    pub depth_field: &'a DepthField,
    pub n_alleles: usize,
    pub zero_depth: ZeroDepth,
}

impl<'a> ExtractParams<'a> {
    pub fn from_config(cfg: &'a Config) -> Self {
        Self {
            marker: cfg.marker(),
            depth_field: cfg.depth_field(),
            n_alleles: cfg.n_alleles(),
            zero_depth: cfg.zero_depth(),
        }
    }
}

/// An input record with its derived and computed columns
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRecord<'a> {
    pub index: usize,
    pub rec: TrimmedRecord<'a>,
    pub bases: String,
    pub depths: &'a str,
    pub most_abundant_edit: char,
    pub total_depth: u64,
    /// None when the total depth is zero
    pub freqs: Option<Vec<f64>>,
}

/// Counts collected while annotating a table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
    pub records: usize,
    pub written: usize,
    pub zero_depth: usize,
    pub dropped_rows: usize,
    pub dropped_depth: u64,
}

pub struct Annotation<'a> {
    pub n_alleles: usize,
    pub records: Vec<AnnotatedRecord<'a>>,
    pub stats: ExtractStats,
}

/// REF and ALT joined with a comma
pub fn bases(ref_all: &str, alt_all: &str) -> String {
    format!("{},{}", ref_all, alt_all)
}

/// First base of the first ALT allele, or '.' if there is none
pub fn most_abundant_edit(alt_all: &str) -> char {
    alt_all
        .split(',')
        .next()
        .and_then(|s| s.chars().next())
        .unwrap_or('.')
}

/// Annotate a trimmed table held in memory
pub fn extract_table<'a>(s: &'a str, par: &ExtractParams) -> Result<Annotation<'a>, PileupError> {
    let recs = parse_table(s, par.marker)?;

    let mut depth_strs = Vec::with_capacity(recs.len());
    let mut rows = Vec::with_capacity(recs.len());
    for (i, r) in recs.iter().enumerate() {
        let info = InfoField::parse(r.info);
        let ds = info.depth_string(par.depth_field, i)?;
        let v = parse_depths(ds, i)?;
        trace!("Record {}: {}:{} depths {:?}", i, r.chrom, r.pos, v);
        depth_strs.push(ds);
        rows.push(v);
    }

    let m = DepthMatrix::from_rows(&rows, par.n_alleles);
    drop(rows);
    debug!("Depth table: {} records, {} columns", m.n_rows(), m.width());

    let mut stats = ExtractStats {
        records: recs.len(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(recs.len());

    for (index, (rec, depths)) in recs.into_iter().zip(depth_strs).enumerate() {
        let dropped = m.dropped_depth(index);
        if dropped > 0 {
            stats.dropped_rows += 1;
            stats.dropped_depth += dropped;
        }
        let freqs = m.frequencies(index);
        if freqs.is_none() {
            stats.zero_depth += 1;
            match par.zero_depth {
                ZeroDepth::Fail => return Err(PileupError::ZeroTotalDepth { record: index }),
                ZeroDepth::Skip => {
                    warn!(
                        "Zero total depth at record {} ({}:{}), record skipped",
                        index, rec.chrom, rec.pos
                    );
                    continue;
                }
                ZeroDepth::Na => warn!(
                    "Zero total depth at record {} ({}:{}), frequencies set to NA",
                    index, rec.chrom, rec.pos
                ),
            }
        }
        records.push(AnnotatedRecord {
            index,
            bases: bases(rec.ref_all, rec.alt_all),
            most_abundant_edit: most_abundant_edit(rec.alt_all),
            total_depth: m.total_depth(index),
            depths,
            freqs,
            rec,
        })
    }
    stats.written = records.len();

    if stats.dropped_rows > 0 {
        warn!(
            "{} record(s) had depth beyond the first {} alleles ({} reads not used)",
            stats.dropped_rows, par.n_alleles, stats.dropped_depth
        )
    }

    Ok(Annotation {
        n_alleles: par.n_alleles,
        records,
        stats,
    })
}

// Shortest representation that reads back to the same value
struct Freq(Option<f64>);

impl fmt::Display for Freq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(x) => write!(f, "{:?}", x),
            None => write!(f, "NA"),
        }
    }
}

impl Annotation<'_> {
    pub fn write<W: Write>(&self, wrt: &mut W) -> std::io::Result<()> {
        write!(
            wrt,
            "\tCHROM\tPOS\tREF\tALT\tBASES\tDEPTHS\tMOST_ABUNDANT_EDIT\tTOTAL_DEPTH"
        )?;
        for i in 1..=self.n_alleles {
            write!(wrt, "\tFREQ{}", i)?;
        }
        writeln!(wrt)?;
        for r in self.records.iter() {
            write!(
                wrt,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                r.index,
                r.rec.chrom,
                r.rec.pos,
                r.rec.ref_all,
                r.rec.alt_all,
                r.bases,
                r.depths,
                r.most_abundant_edit,
                r.total_depth
            )?;
            match r.freqs.as_ref() {
                Some(v) => {
                    for x in v.iter() {
                        write!(wrt, "\t{}", Freq(Some(*x)))?
                    }
                }
                None => {
                    for _ in 0..self.n_alleles {
                        write!(wrt, "\t{}", Freq(None))?
                    }
                }
            }
            writeln!(wrt)?;
        }
        Ok(())
    }
}

/// Name of the annotated table produced from trimmed table `name`
pub fn output_name(name: &str) -> String {
    format!("clipped_{}", name)
}

/// Annotate one trimmed table and write the result to the output directory
pub fn extract_file<P: AsRef<Path>>(
    file: P,
    cfg: &Config,
) -> anyhow::Result<(PathBuf, ExtractStats)> {
    let file = file.as_ref();
    let name = file
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("Invalid file name {}", file.display()))?;

    let s = fs::read_to_string(file)?;
    debug!("Read {} bytes from {}", s.len(), file.display());
    let ann = extract_table(&s, &ExtractParams::from_config(cfg))?;

    let out = cfg.output_dir().join(output_name(name));
    let mut wrt = AtomicWriter::create(&out)?;
    ann.write(&mut wrt)?;
    wrt.commit()?;
    Ok((out, ann.stats))
}

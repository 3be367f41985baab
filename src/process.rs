use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{annotate::extract_file, cli::Config, trim::trim_file};

mod summary;

pub use summary::{Failure, Summary};

/// Regular files in `dir` sorted by name.  Hidden and temporary files are
/// skipped, as are files not matching the include pattern
fn list_dir(dir: &Path, cfg: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut v = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Could not read {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let keep = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|s| !s.starts_with('.') && !s.ends_with(".tmp") && cfg.include(s))
            .unwrap_or(false);
        if keep {
            v.push(path)
        } else {
            trace!("Skipping {}", path.display())
        }
    }
    v.sort();
    debug!("{} input file(s) found in {}", v.len(), dir.display());
    Ok(v)
}

/// Run `f` on each file, isolating failures to the file concerned
fn run_stage<T, F>(stage: &'static str, files: &[PathBuf], mut f: F) -> (Summary, Vec<T>)
where
    F: FnMut(&Path, &mut Summary) -> anyhow::Result<T>,
{
    let mut summary = Summary::new(stage);
    let mut res = Vec::with_capacity(files.len());
    for file in files {
        info!("{}: processing {}", stage, file.display());
        match f(file, &mut summary).with_context(|| format!("Error processing {}", file.display())) {
            Ok(x) => {
                summary.succeeded.push(file.to_owned());
                res.push(x)
            }
            Err(e) => {
                error!("{:#}", e);
                summary.failed.push(Failure {
                    file: file.to_owned(),
                    reason: format!("{:#}", e.root_cause()),
                })
            }
        }
    }
    (summary, res)
}

pub fn trim_stage(files: &[PathBuf], cfg: &Config) -> (Summary, Vec<PathBuf>) {
    run_stage("trim", files, |file, _| trim_file(file, cfg))
}

pub fn extract_stage(files: &[PathBuf], cfg: &Config) -> Summary {
    run_stage("extract", files, |file, summary| {
        let (out, stats) = extract_file(file, cfg)?;
        summary.add_stats(&stats);
        Ok(out)
    })
    .0
}

/// Run the selected stages and report per-file outcomes
pub fn run(cfg: &Config) -> anyhow::Result<Vec<Summary>> {
    let stage = cfg.stage();
    let mut summaries = Vec::with_capacity(2);

    let trimmed = if stage.trim() {
        let raw = list_dir(cfg.raw_dir(), cfg)?;
        let (s, out) = trim_stage(&raw, cfg);
        summaries.push(s);
        Some(out)
    } else {
        None
    };

    if stage.extract() {
        let inputs = match trimmed {
            Some(v) => v,
            None => list_dir(cfg.trimmed_dir(), cfg)?,
        };
        summaries.push(extract_stage(&inputs, cfg));
    }
    Ok(summaries)
}

pub fn process_data(cfg: Config) -> anyhow::Result<()> {
    let summaries = run(&cfg)?;
    for s in summaries.iter() {
        s.log()
    }
    let n_failed: usize = summaries.iter().map(|s| s.failed.len()).sum();
    if n_failed > 0 {
        Err(anyhow!("Processing failed for {} file(s)", n_failed))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::config_from_args;

    const HDR: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\ts1";

    struct Dirs {
        _root: tempfile::TempDir,
        raw: PathBuf,
        trimmed: PathBuf,
        output: PathBuf,
    }

    fn dirs() -> Dirs {
        let root = tempfile::tempdir().unwrap();
        let mk = |s: &str| {
            let p = root.path().join(s);
            fs::create_dir(&p).unwrap();
            p
        };
        let (raw, trimmed, output) = (mk("raw"), mk("trimmed"), mk("output"));
        Dirs {
            _root: root,
            raw,
            trimmed,
            output,
        }
    }

    fn config(d: &Dirs, extra: &[&str]) -> Config {
        let mut args = vec![
            "pileup-depth".to_owned(),
            "-i".to_owned(),
            d.raw.to_str().unwrap().to_owned(),
            "-t".to_owned(),
            d.trimmed.to_str().unwrap().to_owned(),
            "-o".to_owned(),
            d.output.to_str().unwrap().to_owned(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        config_from_args(args).unwrap()
    }

    fn report(infos: &[&str]) -> String {
        let mut s = "##fileformat=VCFv4.2\n##source=bcftools_mpileup\n".to_string();
        s.push_str(HDR);
        s.push('\n');
        for (i, info) in infos.iter().enumerate() {
            s.push_str(&format!("chrM\t{}\t.\tA\tG,<*>\t0\t.\t{}\tPL\t0\n", i + 1, info));
        }
        s
    }

    #[test]
    fn failing_file_does_not_stop_batch() {
        let d = dirs();
        fs::write(d.raw.join("s1.vcf"), report(&["DP=10;AD=6,4", "DP=4;AD=1,1,2"])).unwrap();
        fs::write(d.raw.join("s2.vcf"), report(&["DP=10;AD=6,4", "DP=4;AD=1,oops"])).unwrap();
        fs::write(d.raw.join("s3.vcf"), report(&["DP=2;AD=2,0"])).unwrap();

        let cfg = config(&d, &[]);
        let s = run(&cfg).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].succeeded.len(), 3);
        assert!(s[0].failed.is_empty());

        let ex = &s[1];
        assert_eq!(ex.succeeded.len(), 2);
        assert_eq!(ex.failed.len(), 1);
        assert_eq!(ex.failed[0].file, d.trimmed.join("trm_s2.vcf.tsv"));
        assert!(ex.failed[0].reason.contains("record 1"));
        assert_eq!(ex.stats.records, 3);

        let o1 = fs::read_to_string(d.output.join("clipped_trm_s1.vcf.tsv")).unwrap();
        let l1: Vec<_> = o1.lines().collect();
        assert_eq!(l1.len(), 3);
        assert_eq!(l1[1], "0\tchrM\t1\tA\tG,<*>\tA,G,<*>\t6,4\tG\t10\t0.6\t0.4\t0.0\t0.0");
        assert_eq!(l1[2], "1\tchrM\t2\tA\tG,<*>\tA,G,<*>\t1,1,2\tG\t4\t0.25\t0.25\t0.5\t0.0");

        let o3 = fs::read_to_string(d.output.join("clipped_trm_s3.vcf.tsv")).unwrap();
        assert_eq!(o3.lines().count(), 2);

        let outputs: Vec<_> = fs::read_dir(&d.output).unwrap().collect();
        assert_eq!(outputs.len(), 2);
    }

    #[test]
    fn missing_marker_fails_only_that_file() {
        let d = dirs();
        fs::write(d.raw.join("a.vcf"), report(&["DP=1;AD=1,0"])).unwrap();
        fs::write(d.raw.join("b.vcf"), "##no header here\n").unwrap();

        let cfg = config(&d, &["--stage", "trim"]);
        let s = run(&cfg).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].succeeded, vec![d.raw.join("a.vcf")]);
        assert_eq!(s[0].failed.len(), 1);
        assert!(s[0].failed[0].reason.contains("#CHROM"));

        let t = fs::read_to_string(d.trimmed.join("trm_a.vcf.tsv")).unwrap();
        assert!(t.starts_with("#CHROM"));
        assert_eq!(t.lines().count(), 2);
        assert!(!d.trimmed.join("trm_b.vcf.tsv").exists());
        assert!(process_data(cfg).is_err());
    }

    #[test]
    fn extract_stage_reads_trimmed_dir() {
        let d = dirs();
        let t = format!("{}\nchrM\t5\t.\tC\tT\t0\t.\tDP=0;AD=0,0\tPL\t0\n", HDR);
        fs::write(d.trimmed.join("trm_x.tsv"), &t).unwrap();
        fs::write(d.trimmed.join(".hidden"), &t).unwrap();

        let cfg = config(&d, &["-s", "extract", "-z", "fail"]);
        let s = run(&cfg).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].n_files(), 1);
        assert_eq!(s[0].failed.len(), 1);
        assert!(fs::read_dir(&d.output).unwrap().next().is_none());

        let cfg = config(&d, &["-s", "extract", "-z", "skip"]);
        let s = run(&cfg).unwrap();
        assert!(s[0].failed.is_empty());
        assert_eq!(s[0].stats.written, 0);
        assert_eq!(s[0].stats.zero_depth, 1);
    }

    #[test]
    fn include_filter() {
        let d = dirs();
        fs::write(d.raw.join("keep.vcf"), report(&["DP=1;AD=1,0"])).unwrap();
        fs::write(d.raw.join("notes.txt"), "nothing").unwrap();
        let cfg = config(&d, &["--include", r"\.vcf$"]);
        let s = run(&cfg).unwrap();
        assert_eq!(s[0].n_files(), 1);
        assert!(s.iter().all(|x| x.failed.is_empty()));
        assert!(d.output.join("clipped_trm_keep.vcf.tsv").exists());
    }
}

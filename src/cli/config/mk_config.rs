use std::path::{Path, PathBuf};

use clap::ArgMatches;
use regex::Regex;

use super::{Config, Stage, ZeroDepth};
use crate::info::DepthField;

fn check_dir(dir: &Path, desc: &str) -> anyhow::Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(anyhow!(
            "{} directory {} does not exist (it will not be created)",
            desc,
            dir.display()
        ))
    }
}

impl Config {
    pub fn from_matches(m: &ArgMatches) -> anyhow::Result<Self> {
        let get_dir = |s: &str| -> anyhow::Result<PathBuf> {
            m.try_get_one::<PathBuf>(s)?
                .cloned()
                .ok_or_else(|| anyhow!("Missing {}", s))
        };

        let raw_dir = get_dir("raw_dir")?;
        let trimmed_dir = get_dir("trimmed_dir")?;
        let output_dir = get_dir("output_dir")?;

        let stage = *m.try_get_one::<Stage>("stage")?.unwrap_or(&Stage::All);
        if stage.trim() {
            check_dir(&raw_dir, "Input")?;
        }
        // The trimmed directory is written by trim and read by extract
        check_dir(&trimmed_dir, "Trimmed")?;
        if stage.extract() {
            check_dir(&output_dir, "Output")?;
        }

        let marker: Box<str> = m
            .try_get_one::<String>("marker")?
            .map(|s| Box::from(s.as_str()))
            .unwrap_or_else(|| Box::from("#CHROM"));
        if marker.is_empty() {
            return Err(anyhow!("Header marker can not be empty"));
        }

        let depth_field = m
            .try_get_one::<DepthField>("depth_field")?
            .cloned()
            .unwrap_or(DepthField::Index(1));

        let n_alleles = m
            .try_get_one::<u32>("n_alleles")?
            .map(|x| *x as usize)
            .unwrap_or(4);

        let zero_depth = *m
            .try_get_one::<ZeroDepth>("zero_depth")?
            .unwrap_or(&ZeroDepth::Na);

        let include = m.try_get_one::<Regex>("include")?.cloned();

        debug!(
            "Stage: {:?}, directories: {} -> {} -> {}",
            stage,
            raw_dir.display(),
            trimmed_dir.display(),
            output_dir.display()
        );
        debug!(
            "Depth field: {}, retained alleles: {}, zero depth: {:?}",
            depth_field, n_alleles, zero_depth
        );

        Ok(Config {
            raw_dir,
            trimmed_dir,
            output_dir,
            stage,
            marker,
            depth_field,
            n_alleles,
            zero_depth,
            include,
        })
    }
}

use std::path::PathBuf;

use regex::Regex;

use super::{Stage, ZeroDepth};
use crate::info::DepthField;

mod getters;
mod mk_config;

pub struct Config {
    raw_dir: PathBuf,
    trimmed_dir: PathBuf,
    output_dir: PathBuf,
    stage: Stage,
    marker: Box<str>,
    depth_field: DepthField,
    n_alleles: usize,
    zero_depth: ZeroDepth,
    include: Option<Regex>,
}

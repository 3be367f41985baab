use std::path::PathBuf;

use clap::{command, value_parser, Arg, Command};
use regex::Regex;

use super::{Stage, ZeroDepth};
use crate::{info::DepthField, log_utils::LogLevel};

pub(super) fn cli_model() -> Command {
    command!()
    .next_help_heading("Operation")
    .arg(
        Arg::new("stage")
            .short('s')
            .long("stage")
            .value_parser(value_parser!(Stage))
            .ignore_case(true)
            .default_value("all")
            .value_name("STAGE")
            .help("Pipeline stage(s) to run"),
    )
    .arg(
        Arg::new("marker")
            .long("marker")
            .value_parser(value_parser!(String))
            .default_value("#CHROM")
            .value_name("STRING")
            .help("Text marking the header line of the tabular section"),
    )
    .arg(
        Arg::new("depth_field")
            .short('d')
            .long("depth-field")
            .value_parser(value_parser!(DepthField))
            .default_value("1")
            .value_name("KEY|INDEX")
            .help("INFO sub-field with the allele depths, given by key (e.g. AD) or zero based position"),
    )
    .arg(
        Arg::new("n_alleles")
            .short('n')
            .long("n-alleles")
            .value_parser(value_parser!(u32).range(1..))
            .default_value("4")
            .value_name("INT")
            .help("Number of alleles used for total depth and frequencies"),
    )
    .arg(
        Arg::new("zero_depth")
            .short('z')
            .long("zero-depth")
            .value_parser(value_parser!(ZeroDepth))
            .ignore_case(true)
            .default_value("na")
            .value_name("POLICY")
            .help("Treatment of records with zero total depth"),
    )
    .next_help_heading("Input/Output")
    .arg(
        Arg::new("raw_dir")
            .short('i')
            .long("raw-dir")
            .value_parser(value_parser!(PathBuf))
            .default_value("pileups")
            .value_name("DIR")
            .help("Directory with raw pileup reports"),
    )
    .arg(
        Arg::new("trimmed_dir")
            .short('t')
            .long("trimmed-dir")
            .value_parser(value_parser!(PathBuf))
            .default_value("trimmed_pileups")
            .value_name("DIR")
            .help("Directory for trimmed tables"),
    )
    .arg(
        Arg::new("output_dir")
            .short('o')
            .long("output-dir")
            .value_parser(value_parser!(PathBuf))
            .default_value("subsetted_pileups")
            .value_name("DIR")
            .help("Directory for annotated depth tables"),
    )
    .arg(
        Arg::new("include")
            .long("include")
            .value_parser(value_parser!(Regex))
            .value_name("REGEX")
            .help("Only process input files with names matching REGEX"),
    )
    .arg(
        Arg::new("loglevel")
            .short('l')
            .long("loglevel")
            .value_name("LOGLEVEL")
            .value_parser(value_parser!(LogLevel))
            .ignore_case(true)
            .default_value("info")
            .help("Set log level"),
    )
}

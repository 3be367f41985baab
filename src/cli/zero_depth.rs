use clap::{builder::PossibleValue, ValueEnum};

/// Treatment of records where the retained alleles have zero total depth
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ZeroDepth {
    /// Write the record with NA frequencies
    Na,
    /// Leave the record out of the output
    Skip,
    /// Fail the whole file
    Fail,
}

impl ValueEnum for ZeroDepth {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Na, Self::Skip, Self::Fail]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Na => PossibleValue::new("na"),
            Self::Skip => PossibleValue::new("skip"),
            Self::Fail => PossibleValue::new("fail"),
        })
    }
}

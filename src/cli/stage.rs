use clap::{builder::PossibleValue, ValueEnum};

/// Which part of the pipeline to run
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    Trim,
    Extract,
    All,
}

impl Stage {
    pub fn trim(&self) -> bool {
        matches!(self, Self::Trim | Self::All)
    }

    pub fn extract(&self) -> bool {
        matches!(self, Self::Extract | Self::All)
    }
}

impl ValueEnum for Stage {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Trim, Self::Extract, Self::All]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Trim => PossibleValue::new("trim").help("Remove report headers only"),
            Self::Extract => {
                PossibleValue::new("extract").help("Annotate previously trimmed tables")
            }
            Self::All => PossibleValue::new("all").help("Trim then annotate"),
        })
    }
}

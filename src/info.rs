use std::{fmt, num::IntErrorKind, str::FromStr};

use crate::error::PileupError;

/// Location of the allele depth list within the INFO column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepthField {
    /// Sub-field with this key (e.g. AD)
    Key(Box<str>),
    /// Zero based position of the sub-field
    Index(usize),
}

impl FromStr for DepthField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err("Empty depth field".to_string())
        } else if s.bytes().all(|c| c.is_ascii_digit()) {
            s.parse::<usize>()
                .map(Self::Index)
                .map_err(|e| format!("Illegal depth field index {}: {}", s, e))
        } else if s.contains([';', '=']) {
            Err(format!("Illegal depth field key {}", s))
        } else {
            Ok(Self::Key(Box::from(s)))
        }
    }
}

impl fmt::Display for DepthField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => write!(f, "{}", k),
            Self::Index(i) => write!(f, "{}", i),
        }
    }
}

/// One `;` separated element of INFO: `key=value` or a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubField<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
}

impl<'a> SubField<'a> {
    fn parse(s: &'a str) -> Self {
        match s.split_once('=') {
            Some((key, value)) => Self {
                key,
                value: Some(value),
            },
            None => Self {
                key: s,
                value: None,
            },
        }
    }
}

/// INFO column split into ordered sub-fields
#[derive(Debug)]
pub struct InfoField<'a> {
    fields: Vec<SubField<'a>>,
}

impl<'a> InfoField<'a> {
    pub fn parse(s: &'a str) -> Self {
        let fields = s.trim().split(';').map(SubField::parse).collect();
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, ix: usize) -> Option<&SubField<'a>> {
        self.fields.get(ix)
    }

    pub fn get_key(&self, key: &str) -> Option<&SubField<'a>> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Value of the depth sub-field selected by `field`
    pub fn depth_string(&self, field: &DepthField, record: usize) -> Result<&'a str, PileupError> {
        let malformed = |msg: String| PileupError::MalformedInfoField { record, msg };
        let sf = match field {
            DepthField::Index(i) => self.get(*i).ok_or_else(|| {
                malformed(format!(
                    "expected at least {} sub-fields, found {}",
                    i + 1,
                    self.len()
                ))
            })?,
            DepthField::Key(k) => self
                .get_key(k)
                .ok_or_else(|| malformed(format!("no sub-field with key {}", k)))?,
        };
        sf.value
            .ok_or_else(|| malformed(format!("sub-field {} has no value", sf.key)))
    }
}

/// Split a comma separated depth list into counts.  Individual counts are
/// limited to `u32` so that row and file totals always fit in a `u64`
pub fn parse_depths(s: &str, record: usize) -> Result<Vec<u64>, PileupError> {
    s.split(',')
        .map(|t| match t.trim().parse::<u32>() {
            Ok(x) => Ok(x as u64),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(PileupError::DepthTooLarge {
                record,
                token: t.to_owned(),
            }),
            Err(_) => Err(PileupError::NonNumericDepth {
                record,
                token: t.to_owned(),
            }),
        })
        .collect()
}

use crate::error::PileupError;

const REQUIRED: [&str; 5] = ["#CHROM", "POS", "REF", "ALT", "INFO"];

/// Positions of the required columns within a header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    chrom: usize,
    pos: usize,
    ref_all: usize,
    alt_all: usize,
    info: usize,
    n_fields: usize,
}

impl Columns {
    pub fn from_header(hdr: &str) -> Result<Self, PileupError> {
        let fields: Vec<_> = hdr.trim_end_matches(['\r', '\n']).split('\t').collect();
        let mut ix = [0; 5];
        for (col, i) in REQUIRED.iter().zip(ix.iter_mut()) {
            *i = fields
                .iter()
                .position(|f| f.trim() == *col)
                .ok_or_else(|| PileupError::MissingColumn {
                    column: col.to_string(),
                })?;
        }
        let n_fields = ix.iter().max().map(|x| x + 1).unwrap_or(0);
        debug!(
            "Columns - CHROM: {}, POS: {}, REF: {}, ALT: {}, INFO: {}",
            ix[0], ix[1], ix[2], ix[3], ix[4]
        );
        Ok(Self {
            chrom: ix[0],
            pos: ix[1],
            ref_all: ix[2],
            alt_all: ix[3],
            info: ix[4],
            n_fields,
        })
    }
}

/// One data row of a trimmed table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimmedRecord<'a> {
    pub chrom: &'a str,
    pub pos: &'a str,
    pub ref_all: &'a str,
    pub alt_all: &'a str,
    pub info: &'a str,
}

impl<'a> TrimmedRecord<'a> {
    pub fn from_line(line: &'a str, cols: &Columns, record: usize) -> Result<Self, PileupError> {
        let fields: Vec<_> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        if fields.len() < cols.n_fields {
            return Err(PileupError::ShortRecord {
                record,
                expected: cols.n_fields,
                seen: fields.len(),
            });
        }
        Ok(Self {
            chrom: fields[cols.chrom],
            pos: fields[cols.pos],
            ref_all: fields[cols.ref_all],
            alt_all: fields[cols.alt_all],
            info: fields[cols.info],
        })
    }
}

/// Parse a complete trimmed table (header line + data rows).  The header line
/// must contain `marker`, as when the table was trimmed.  Blank lines are
/// ignored
pub fn parse_table<'a>(s: &'a str, marker: &str) -> Result<Vec<TrimmedRecord<'a>>, PileupError> {
    let mut lines = s.lines().filter(|l| !l.trim().is_empty());
    let hdr = lines.next().ok_or(PileupError::EmptyTable)?;
    if !hdr.contains(marker) {
        return Err(PileupError::MissingMarker {
            marker: marker.to_owned(),
        });
    }
    let cols = Columns::from_header(hdr)?;
    let recs = lines
        .enumerate()
        .map(|(i, l)| TrimmedRecord::from_line(l, &cols, i))
        .collect::<Result<Vec<_>, _>>()?;
    if recs.is_empty() {
        Err(PileupError::EmptyTable)
    } else {
        Ok(recs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HDR: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tsample1";

    #[test]
    fn header_columns_by_name() {
        let c = Columns::from_header(HDR).unwrap();
        assert_eq!((c.chrom, c.pos, c.ref_all, c.alt_all, c.info), (0, 1, 3, 4, 7));
        assert_eq!(c.n_fields, 8);
    }

    #[test]
    fn reordered_header() {
        let c = Columns::from_header("INFO\tREF\tALT\tPOS\t#CHROM\r\n").unwrap();
        let r = TrimmedRecord::from_line("DP=3;AD=2,1\tA\tG\t17\tchr1", &c, 0).unwrap();
        assert_eq!(r.chrom, "chr1");
        assert_eq!(r.pos, "17");
        assert_eq!(r.ref_all, "A");
        assert_eq!(r.alt_all, "G");
        assert_eq!(r.info, "DP=3;AD=2,1");
    }

    #[test]
    fn missing_info_column() {
        assert_eq!(
            Columns::from_header("#CHROM\tPOS\tREF\tALT"),
            Err(PileupError::MissingColumn {
                column: "INFO".to_string()
            })
        );
    }

    #[test]
    fn short_record() {
        let s = format!("{}\nchrM\t1\t.\tA\tT\t0\t.\tDP=1;AD=1,0\nchrM\t2\t.\tA\n", HDR);
        assert_eq!(
            parse_table(&s, "#CHROM"),
            Err(PileupError::ShortRecord {
                record: 1,
                expected: 8,
                seen: 4
            })
        );
    }

    #[test]
    fn blank_lines_and_empty_tables() {
        let s = format!("{}\n\nchrM\t1\t.\tA\tT\t0\t.\tDP=1;AD=1,0\n\n", HDR);
        assert_eq!(parse_table(&s, "#CHROM").unwrap().len(), 1);
        assert_eq!(parse_table("", "#CHROM"), Err(PileupError::EmptyTable));
        assert_eq!(parse_table(HDR, "#CHROM"), Err(PileupError::EmptyTable));
    }

    #[test]
    fn header_must_carry_marker() {
        let s = "CHROM\tPOS\tREF\tALT\tINFO\nchrM\t1\tA\tT\tDP=1;AD=1,0\n";
        assert_eq!(
            parse_table(s, "#CHROM"),
            Err(PileupError::MissingMarker {
                marker: "#CHROM".to_string()
            })
        );
        let s = format!("{}\nchrM\t1\t.\tA\tT\t0\t.\tDP=1;AD=1,0\n", HDR);
        assert_eq!(
            parse_table(&s, "FORMAT\tsample1"),
            Ok(vec![TrimmedRecord {
                chrom: "chrM",
                pos: "1",
                ref_all: "A",
                alt_all: "T",
                info: "DP=1;AD=1,0"
            }])
        );
        assert!(parse_table(&s, "#SAMPLE").is_err());
    }
}

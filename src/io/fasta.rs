//! FASTA ingestion: thin wrapper around `zoe::prelude::FastaReader`,
//! normalizing each `FastaSeq` into this crate's 1-based `SequenceRecord`.

use std::path::Path;

use zoe::prelude::FastaReader;

use crate::extend::model::SequenceRecord;
use crate::io::{ReadFileZip, open_reader, with_file_context};

/// Reads every record out of a FASTA file into 1-based [`SequenceRecord`]s.
///
/// ## Errors
///
/// `path` must exist, be readable, and contain well-formed FASTA.
pub fn read_records(path: impl AsRef<Path>) -> std::io::Result<Vec<SequenceRecord>> {
    let path = path.as_ref();
    let reader: FastaReader<ReadFileZip> = FastaReader::from_readable(open_reader(path)?)?;

    let mut records = Vec::new();
    for seq in reader {
        let seq = with_file_context(path, seq)?;
        let id = seq.name.split_ascii_whitespace().next().unwrap_or("").to_string();
        records.push(SequenceRecord::new(id, seq.sequence.as_ref()));
    }
    Ok(records)
}

/// Reads exactly one record, as required by the `extend-clusters` driver's
/// reference/query arguments; errors if the file is empty or holds more than
/// one record.
///
/// ## Errors
///
/// As [`read_records`], plus an error if the record count isn't exactly one.
pub fn read_single_record(path: impl AsRef<Path>) -> std::io::Result<SequenceRecord> {
    let path = path.as_ref();
    let mut records = read_records(path)?;
    match records.len() {
        1 => Ok(records.pop().unwrap()),
        0 => Err(std::io::Error::new(std::io::ErrorKind::InvalidData, format!("{}: no FASTA records found", path.display()))),
        n => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{}: expected exactly one FASTA record, found {n}", path.display()),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn reads_and_normalizes_single_record() {
        let dir = std::env::temp_dir();
        let path = dir.join("synten_core_fasta_test.fa");
        std::fs::File::create(&path).unwrap().write_all(b">chr1 description\nACGTacgt\nNN\n").unwrap();

        let rec = read_single_record(&path).unwrap();
        assert_eq!(rec.id, "chr1");
        assert_eq!(rec.len(), 10);
        assert_eq!(rec.at(1), b'a');
        assert_eq!(rec.at(9), b'n');

        std::fs::remove_file(&path).ok();
    }
}

//! Plain/gzip/stdout-aware readers and writers, trimmed down from
//! `irma-core`'s own `io` module to the FASTA/cluster-file surface this
//! crate needs.

pub mod clusters;
pub mod fasta;
pub mod writers;

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use flate2::read::MultiGzDecoder;
use zoe::define_whichever;

define_whichever! {
    #[doc="An enum for the different acceptable input types"]
    pub enum ReadFileZip {
        #[doc="A reader for a regular uncompressed file"]
        File(BufReader<File>),
        #[doc="A reader for a gzip compressed file"]
        Zipped(BufReader<MultiGzDecoder<File>>),
    }

    impl Read for ReadFileZip {}
}

fn is_gz(path: impl AsRef<Path>) -> bool {
    path.as_ref().extension().is_some_and(|ext| ext == "gz")
}

/// Opens `path` for reading, transparently decompressing `.gz` input.
///
/// ## Errors
///
/// `path` must exist and be readable.
pub fn open_reader(path: impl AsRef<Path>) -> std::io::Result<ReadFileZip> {
    let path = path.as_ref();
    let file = with_file_context(path, File::open(path))?;
    Ok(if is_gz(path) {
        ReadFileZip::Zipped(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        ReadFileZip::File(BufReader::new(file))
    })
}

/// Annotates an I/O error with the offending path, in the style of `zoe`'s
/// `ResultWithErrorContext`, reimplemented locally since this crate does not
/// need the rest of `zoe`'s error machinery.
pub fn with_file_context<T>(path: impl AsRef<Path>, result: std::io::Result<T>) -> std::io::Result<T> {
    result.map_err(|e| std::io::Error::new(e.kind(), format!("{}: {e}", path.as_ref().display())))
}

//! Output writers: the generic plain/gzip/stdout sink, and the delta-file
//! and cluster-file serializers matching the exact textual formats.

use std::{
    fs::File,
    io::{BufWriter, Stdout, Write, stdout},
    path::Path,
};

use flate2::{Compression, write::GzEncoder};
use zoe::define_whichever;

use crate::extend::{
    geometry::rev_c,
    model::{Alignment, FORWARD_CHAR, SequenceRecord, Strand, Synteny},
};
use crate::io::is_gz;

define_whichever! {
    #[doc="An enum for the different acceptable output types"]
    #[derive(Debug)]
    pub enum WriteFileZipStdout {
        #[doc="A writer for a regular uncompressed file"]
        File(BufWriter<File>),
        #[doc="A writer for a gzip compressed file"]
        Zipped(GzEncoder<BufWriter<File>>),
        #[doc="A writer for uncompressed data to stdout"]
        Stdout(BufWriter<Stdout>),
    }

    impl Write for WriteFileZipStdout {}
}

/// Creates a [`WriteFileZipStdout`], using `path` to determine whether a
/// regular file, zipped file, or stdout should be used.
///
/// ## Errors
///
/// Creation of `path` must be successful, if a path is specified.
pub fn create_writer<P: AsRef<Path>>(path: Option<P>) -> std::io::Result<WriteFileZipStdout> {
    let writer = match path {
        Some(ref p) => {
            let file = File::create(p)?;
            let buf_writer = BufWriter::new(file);
            if is_gz(p) {
                WriteFileZipStdout::Zipped(GzEncoder::new(buf_writer, Compression::default()))
            } else {
                WriteFileZipStdout::File(buf_writer)
            }
        }
        None => WriteFileZipStdout::Stdout(BufWriter::new(stdout())),
    };
    Ok(writer)
}

/// Writes the delta block for one (A, B) pair: a header line followed by one
/// record per alignment (coordinates, error counts, then the delta vector
/// terminated by a literal `0`).
pub fn write_delta_alignments<W: Write>(
    writer: &mut W, a: &SequenceRecord, b: &SequenceRecord, alignments: &[Alignment],
) -> std::io::Result<()> {
    writeln!(writer, ">{} {} {} {}", a.id, b.id, a.len(), b.len())?;

    for aln in alignments {
        let fwd = aln.dir_b == Strand::Forward;
        let (s_b, e_b) = if fwd {
            (aln.s_b, aln.e_b)
        } else {
            (rev_c(aln.s_b, b.len()), rev_c(aln.e_b, b.len()))
        };
        writeln!(
            writer,
            "{} {} {} {} {} {} {}",
            aln.s_a, aln.e_a, s_b, e_b, aln.errors, aln.sim_errors, aln.non_alphas
        )?;
        for d in &aln.delta {
            writeln!(writer, "{d}")?;
        }
        writeln!(writer, "0")?;
    }
    Ok(())
}

/// Writes the cluster-file block for one synteny: one `>ref query lenA lenB`
/// header, then one `+ dirB` line per cluster and one row per match.
pub fn write_syntenys<W: Write>(
    writer: &mut W, a: &SequenceRecord, b: &SequenceRecord, syntenys: &[Synteny],
) -> std::io::Result<()> {
    writeln!(writer, ">{} {} {} {}", a.id, b.id, a.len(), b.len())?;

    for synteny in syntenys {
        for cluster in &synteny.clusters {
            writeln!(writer, "{:>2} {:>2}", FORWARD_CHAR, cluster.dir_b.as_char())?;

            let mut prev = None;
            for m in &cluster.matches {
                let s_b = if cluster.dir_b == Strand::Forward { m.s_b } else { rev_c(m.s_b, b.len()) };
                if let Some(prev) = prev {
                    let (prev_s_a, prev_s_b, prev_len): (i64, i64, i64) = prev;
                    let gap_a = m.s_a - prev_s_a - prev_len;
                    let gap_b = m.s_b - prev_s_b - prev_len;
                    writeln!(writer, "{:>8} {:>8} {:>6}{:>6} {:>6}", m.s_a, s_b, m.len, gap_a, gap_b)?;
                } else {
                    writeln!(writer, "{:>8} {:>8} {:>6}     -      -", m.s_a, s_b, m.len)?;
                }
                prev = Some((m.s_a, m.s_b, m.len));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::extend::model::{Cluster, Match};

    #[test]
    fn delta_format_matches_exact_identity_case() {
        let a = SequenceRecord::new("A".into(), b"acgtacgt");
        let b = SequenceRecord::new("B".into(), b"acgtacgt");
        let aln = Alignment {
            s_a: 1,
            e_a: 8,
            s_b: 1,
            e_b: 8,
            dir_b: Strand::Forward,
            delta: vec![],
            delta_a_pos: 0,
            errors: 0,
            sim_errors: 0,
            non_alphas: 0,
        };
        let mut out = Vec::new();
        write_delta_alignments(&mut out, &a, &b, &[aln]).unwrap();
        assert_eq!(out, b">A B 8 8\n1 8 1 8 0 0 0\n0\n");
    }

    #[test]
    fn cluster_format_first_match_has_dashes() {
        let a = SequenceRecord::new("A".into(), b"acgtacgt");
        let b = SequenceRecord::new("B".into(), b"acgtacgt");
        let cluster = Cluster::new(vec![Match { s_a: 1, s_b: 1, len: 4 }, Match { s_a: 6, s_b: 6, len: 3 }], Strand::Forward);
        let synteny = Synteny { clusters: vec![cluster] };
        let mut out = Vec::new();
        write_syntenys(&mut out, &a, &b, std::slice::from_ref(&synteny)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("       1        1      4     -      -\n"));
        assert!(text.contains("       6        6      3     1      1\n"));
    }
}

//! Reader for the upstream `mgaps`-style cluster/synteny file format.
//!
//! Parse-or-abort in `irma-core`'s style: malformed input is a
//! [`std::io::Result`] error with file/line context, never a panic — this is
//! the "parse / input error" class, not a programming bug.

use std::io::{BufRead, Read};
use std::path::Path;

use crate::extend::geometry::rev_c;
use crate::extend::model::{Cluster, Match, Strand, Synteny};
use crate::io::open_reader;

/// One `>` header's worth of synteny data: the reference/query identifiers
/// and lengths named in the header, plus the clusters found between them.
#[derive(Debug, Clone)]
pub struct ClusterFileEntry {
    pub a_id: String,
    pub b_id: String,
    pub a_len: i64,
    pub b_len: i64,
    pub synteny: Synteny,
}

/// Reads every block of the cluster file at `path`.
///
/// ## Errors
///
/// `path` must exist and be readable, and its contents must follow the
/// `>id id len len` / `+ dirB` / match-row grammar described in the delta
/// and cluster file formats.
pub fn read_cluster_file(path: impl AsRef<Path>) -> std::io::Result<Vec<ClusterFileEntry>> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    parse_cluster_file(reader).map_err(|e| std::io::Error::new(e.kind(), format!("{}: {e}", path.display())))
}

fn parse_cluster_file(reader: impl Read) -> std::io::Result<Vec<ClusterFileEntry>> {
    let buf = std::io::BufReader::new(reader);
    let mut entries: Vec<ClusterFileEntry> = Vec::new();
    let mut current_clusters: Vec<Cluster> = Vec::new();
    let mut b_len_current: i64 = 0;

    let parse_error = |line_no: usize, msg: &str| -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::InvalidData, format!("line {line_no}: {msg}"))
    };

    for (line_no, line) in buf.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line?;
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('>') {
            if let Some(entry) = entries.last_mut() {
                entry.synteny.clusters = std::mem::take(&mut current_clusters);
            }
            let fields: Vec<&str> = header.split_ascii_whitespace().collect();
            if fields.len() != 4 {
                return Err(parse_error(line_no, "expected '>a_id b_id a_len b_len'"));
            }
            let a_len: i64 = fields[2].parse().map_err(|_| parse_error(line_no, "bad a_len"))?;
            let b_len: i64 = fields[3].parse().map_err(|_| parse_error(line_no, "bad b_len"))?;
            b_len_current = b_len;
            entries.push(ClusterFileEntry {
                a_id: fields[0].to_string(),
                b_id: fields[1].to_string(),
                a_len,
                b_len,
                synteny: Synteny { clusters: Vec::new() },
            });
            continue;
        }

        let fields: Vec<&str> = trimmed.split_ascii_whitespace().collect();
        if entries.is_empty() {
            return Err(parse_error(line_no, "match/cluster row before any '>' header"));
        }

        match fields.len() {
            2 => {
                // "+ dirB" cluster-start line.
                let dir_b = match fields[1] {
                    "+" => Strand::Forward,
                    "-" => Strand::Reverse,
                    other => return Err(parse_error(line_no, &format!("unrecognized strand '{other}'"))),
                };
                current_clusters.push(Cluster::new(Vec::new(), dir_b));
            }
            3 | 5 => {
                let cluster = current_clusters
                    .last_mut()
                    .ok_or_else(|| parse_error(line_no, "match row before any '+ dirB' line"))?;
                let s_a: i64 = fields[0].parse().map_err(|_| parse_error(line_no, "bad sA"))?;
                let s_b_stored: i64 = fields[1].parse().map_err(|_| parse_error(line_no, "bad sB"))?;
                let len: i64 = fields[2].parse().map_err(|_| parse_error(line_no, "bad len"))?;
                let s_b = match cluster.dir_b {
                    Strand::Forward => s_b_stored,
                    Strand::Reverse => rev_c(s_b_stored, b_len_current),
                };
                cluster.matches.push(Match { s_a, s_b, len });
            }
            _ => return Err(parse_error(line_no, "unrecognized row shape")),
        }
    }

    if let Some(entry) = entries.last_mut() {
        entry.synteny.clusters = std::mem::take(&mut current_clusters);
    }

    Ok(entries)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_forward_cluster() {
        let text = b">refA qryB 20 20\n \
+  +\n\
       1        1      4      -      -\n\
       6        6      3      1      1\n";
        let entries = parse_cluster_file(&text[..]).unwrap();
        assert_eq!(entries.len(), 1);
        let synteny = &entries[0].synteny;
        assert_eq!(synteny.clusters.len(), 1);
        let matches = &synteny.clusters[0].matches;
        assert_eq!(matches[0], Match { s_a: 1, s_b: 1, len: 4 });
        assert_eq!(matches[1], Match { s_a: 6, s_b: 6, len: 3 });
    }

    #[test]
    fn un_projects_reverse_strand_coordinates() {
        // B has length 20; a reverse match stored as sB'=20 (revC of sB=1, len=20) with len 4
        // should round-trip back to forward sB=1.
        let text = b">refA qryB 20 20\n \
+  -\n\
      1       20      4      -      -\n";
        let entries = parse_cluster_file(&text[..]).unwrap();
        let m = entries[0].synteny.clusters[0].matches[0];
        assert_eq!(m.s_b, 1);
    }
}

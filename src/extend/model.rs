//! Core data model for the cluster-to-alignment extension pipeline:
//! sequence records, matches, clusters, syntenies, and alignments.

use bitflags::bitflags;

/// Substitution for any non-alphabetic (and non-`*`) input character, and for
/// out-of-bounds sentinel lookups during re-scoring.
pub const STOP_CHAR: u8 = b'X';

/// Strand marker used in the cluster and delta file formats.
pub const FORWARD_CHAR: char = '+';
pub const REVERSE_CHAR: char = '-';

/// Which strand of B a cluster or alignment was built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn as_char(self) -> char {
        match self {
            Strand::Forward => FORWARD_CHAR,
            Strand::Reverse => REVERSE_CHAR,
        }
    }
}

/// A 1-based nucleotide sequence with an unused sentinel byte at index 0.
///
/// Mirrors `Read_Sequence`'s normalization: the FASTA body is lower-cased,
/// every non-alphabetic byte other than `*` is mapped to `x`, and whitespace
/// is dropped entirely before indexing begins.
#[derive(Debug, Clone)]
pub struct SequenceRecord {
    pub id: String,
    seq: Vec<u8>,
}

impl SequenceRecord {
    /// Build a record from a raw (not yet normalized) FASTA id and body.
    pub fn new(id: String, body: &[u8]) -> Self {
        let mut seq = Vec::with_capacity(body.len() + 1);
        seq.push(0u8);
        for &b in body {
            if b.is_ascii_whitespace() {
                continue;
            }
            let c = b.to_ascii_lowercase();
            seq.push(if c.is_ascii_alphabetic() || c == b'*' { c } else { b'x' });
        }
        SequenceRecord { id, seq }
    }

    /// Number of bases, i.e. the highest valid 1-based coordinate.
    pub fn len(&self) -> i64 {
        (self.seq.len() - 1) as i64
    }

    pub fn is_empty(&self) -> bool {
        self.seq.len() <= 1
    }

    /// Byte at a 1-based coordinate (index 0 returns the sentinel).
    pub fn at(&self, pos: i64) -> u8 {
        self.seq[pos as usize]
    }

    /// Whole 1-based buffer, sentinel included at index 0.
    pub fn bytes(&self) -> &[u8] {
        &self.seq
    }

    /// Reverse-complement of this record, preserving the index-0 sentinel.
    /// Non-ACGT alphabetic characters round-trip through the IUPAC
    /// complement table; anything else (including `x`) complements to itself.
    pub fn reverse_complement(&self) -> SequenceRecord {
        let len = self.seq.len();
        let mut out = vec![0u8; len];
        for i in 1..len {
            out[i] = complement_base(self.seq[len - i]);
        }
        SequenceRecord { id: self.id.clone(), seq: out }
    }
}

fn complement_base(c: u8) -> u8 {
    match c {
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        b'r' => b'y',
        b'y' => b'r',
        b'k' => b'm',
        b'm' => b'k',
        b'b' => b'v',
        b'v' => b'b',
        b'd' => b'h',
        b'h' => b'd',
        other => other,
    }
}

/// An exact-match anchor between A and B, 1-based. `s_b` lives in whichever
/// coordinate space the owning cluster's strand processes B in: the forward
/// orientation for forward clusters, or the reverse-complement buffer's
/// orientation for reverse clusters. Only the cluster-file reader/writer at
/// the I/O boundary projects these through [`crate::extend::geometry::rev_c`]
/// into the original B's forward orientation for external consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub s_a: i64,
    pub s_b: i64,
    pub len: i64,
}

impl Match {
    pub fn e_a(&self) -> i64 {
        self.s_a + self.len - 1
    }

    pub fn e_b(&self) -> i64 {
        self.s_b + self.len - 1
    }
}

/// An ordered chain of co-linear exact matches sharing a strand.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub matches: Vec<Match>,
    pub dir_b: Strand,
    pub was_fused: bool,
}

impl Cluster {
    pub fn new(matches: Vec<Match>, dir_b: Strand) -> Self {
        Cluster { matches, dir_b, was_fused: false }
    }

    pub fn first(&self) -> &Match {
        self.matches.first().expect("cluster has no matches")
    }

    pub fn last(&self) -> &Match {
        self.matches.last().expect("cluster has no matches")
    }
}

/// A reference record plus the clusters found against it for one query.
#[derive(Debug, Clone)]
pub struct Synteny {
    pub clusters: Vec<Cluster>,
}

/// A gapped alignment under construction or finalized for output.
#[derive(Debug, Clone)]
pub struct Alignment {
    pub s_a: i64,
    pub e_a: i64,
    /// Same coordinate-space convention as [`Match::s_b`]: the
    /// reverse-complement buffer's orientation when `dir_b` is `Reverse`.
    pub s_b: i64,
    pub e_b: i64,
    pub dir_b: Strand,
    /// Sparse edit script; positive k = advance `|k|-1` then delete from A,
    /// negative k = advance `|k|-1` then insert into A (shift B only).
    pub delta: Vec<i64>,
    /// Running sum of per-delta A-length contributions, used to offset newly
    /// spliced delta suffixes onto the correct position.
    pub delta_a_pos: i64,
    pub errors: i64,
    pub sim_errors: i64,
    pub non_alphas: i64,
}

impl Alignment {
    /// Seed a fresh, single-match alignment. Per the extender façade contract
    /// this must stay delta-free until passed through `extend_backward`.
    pub fn seed(m: &Match, dir_b: Strand) -> Self {
        Alignment {
            s_a: m.s_a,
            e_a: m.e_a(),
            s_b: m.s_b,
            e_b: m.e_b(),
            dir_b,
            delta: Vec::new(),
            delta_a_pos: 0,
            errors: 0,
            sim_errors: 0,
            non_alphas: 0,
        }
    }

    pub fn recompute_delta_a_pos(&mut self) {
        self.delta_a_pos = self
            .delta
            .iter()
            .map(|&d| if d > 0 { d } else { d.abs() - 1 })
            .sum();
    }
}

bitflags! {
    /// Flags passed to the collaborator-supplied [`crate::extend::extender::SequenceExtender`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExtendFlags: u32 {
        const FORWARD_SEARCH      = 1 << 0;
        const BACKWARD_SEARCH     = 1 << 1;
        const OPTIMAL_BIT         = 1 << 2;
        const SEQEND_BIT          = 1 << 3;
        const FORCED_FORWARD_ALIGN = 1 << 4;
    }
}

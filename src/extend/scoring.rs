//! Process-wide, read-only scoring configuration.
//!
//! Replaces the original's global `MATCH_SCORE`/`GOOD_SCORE`/`CONT_GAP_SCORE`/
//! `breakLen`/`TO_SEQEND` statics with a single value threaded through the
//! core, per the "explicit `ScoringContext`" design note.

use std::io;
use std::path::Path;

use crate::extend::model::STOP_CHAR;
use crate::io::with_file_context;

/// 26x26 substitution table plus the handful of scalar knobs the extender
/// façade and target selection need. Indexed by `(A_char - b'A', B_char -
/// b'A')` after upper-casing; non-alphabetic characters are mapped to
/// [`STOP_CHAR`] before indexing, matching `MATCH_SCORE[matrix][Xc-'A'][Yc-'A']`.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    match_score: [[i32; 26]; 26],
    pub good_score: i64,
    pub cont_gap_score: i64,
    pub break_len: i64,
    pub to_seqend: bool,
    pub max_alignment_length: i64,
}

const MAX_ALIGNMENT_LENGTH_DEFAULT: i64 = 10_000;
const BREAK_LEN_DEFAULT: i64 = 200;

impl ScoringContext {
    /// A simple ACGT + IUPAC-ambiguity match/mismatch table, matching
    /// `irma-core`'s own default DNA scoring (`WeightMatrix::new_dna_matrix(2, -5, None)`).
    pub fn dna_default() -> Self {
        Self::from_dna_scores(2, -5, false)
    }

    /// Builds the same match/mismatch table `zoe::data::matrices::WeightMatrix::new_dna_matrix`
    /// would, bridging the DNA default `irma-core`'s `aligner` subcommand uses into this
    /// crate's 26-letter indexing scheme. Kept independent of `WeightMatrix`'s internal
    /// (SIMD-profile-oriented) representation, which is not meant for scalar lookups.
    pub fn from_dna_scores(matching: i32, mismatch: i32, ignore_n: bool) -> Self {
        let mut match_score = [[mismatch; 26]; 26];

        let bases = [b'A', b'C', b'G', b'T'];
        for &a in &bases {
            for &b in &bases {
                let ai = (a - b'A') as usize;
                let bi = (b - b'A') as usize;
                match_score[ai][bi] = if a == b { matching } else { mismatch };
            }
        }

        // IUPAC ambiguity codes score neutrally against anything definite.
        for &amb in b"RYSWKMBDHVN" {
            let i = (amb - b'A') as usize;
            for j in 0..26 {
                match_score[i][j] = 0;
                match_score[j][i] = 0;
            }
        }
        if ignore_n {
            let n = (b'N' - b'A') as usize;
            for j in 0..26 {
                match_score[n][j] = 0;
                match_score[j][n] = 0;
            }
        }

        ScoringContext {
            match_score,
            good_score: matching as i64,
            cont_gap_score: mismatch as i64,
            break_len: BREAK_LEN_DEFAULT,
            to_seqend: false,
            max_alignment_length: MAX_ALIGNMENT_LENGTH_DEFAULT,
        }
    }

    /// Loads a 26x26 whitespace-separated integer matrix (one row per line,
    /// rows/columns in `A..Z` order), following the parse-or-abort style of
    /// `irma-core`'s `arg_parsing.rs`.
    pub fn from_matrix_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let text = with_file_context(path, std::fs::read_to_string(path))?;

        let mut match_score = [[0i32; 26]; 26];
        let mut rows = 0;
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let values: Vec<i32> = line
                .split_ascii_whitespace()
                .map(|tok| tok.parse::<i32>())
                .collect::<Result<_, _>>()
                .map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("{}: line {line_no}: {e}", path.display()),
                    )
                })?;
            if values.len() != 26 || rows >= 26 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{}: expected a 26x26 matrix, row {rows} has {} entries", path.display(), values.len()),
                ));
            }
            match_score[rows].copy_from_slice(&values);
            rows += 1;
        }
        if rows != 26 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: expected 26 rows, found {rows}", path.display()),
            ));
        }

        Ok(ScoringContext {
            match_score,
            good_score: 2,
            cont_gap_score: -5,
            break_len: BREAK_LEN_DEFAULT,
            to_seqend: false,
            max_alignment_length: MAX_ALIGNMENT_LENGTH_DEFAULT,
        })
    }

    /// Score for an (already upper-cased-or-stop) character pair, looked up
    /// the way `parseDelta`/`validateData` do: `MATCH_SCORE[matrix][a-'A'][b-'A']`.
    pub fn score(&self, a: u8, b: u8) -> i32 {
        let a = normalize_for_lookup(a);
        let b = normalize_for_lookup(b);
        self.match_score[(a - b'A') as usize][(b - b'A') as usize]
    }

    pub fn with_break_len(mut self, break_len: i64) -> Self {
        self.break_len = break_len;
        self
    }

    pub fn with_to_seqend(mut self, to_seqend: bool) -> Self {
        self.to_seqend = to_seqend;
        self
    }

    pub fn with_max_alignment_length(mut self, max_alignment_length: i64) -> Self {
        self.max_alignment_length = max_alignment_length;
        self
    }
}

/// Upper-case a raw sequence byte for matrix lookup, substituting
/// [`STOP_CHAR`] for anything not in `A..Z`, exactly as `parseDelta` does
/// before indexing `MATCH_SCORE`.
pub fn normalize_for_lookup(c: u8) -> u8 {
    let c = c.to_ascii_uppercase();
    if c.is_ascii_uppercase() { c } else { STOP_CHAR }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dna_default_scores_identity_positively() {
        let ctx = ScoringContext::dna_default();
        assert!(ctx.score(b'A', b'A') > 0);
        assert!(ctx.score(b'A', b'C') < 0);
    }

    #[test]
    fn non_alpha_normalizes_to_stop_char() {
        assert_eq!(normalize_for_lookup(b'1'), STOP_CHAR);
        assert_eq!(normalize_for_lookup(b'a'), b'A');
    }

    #[test]
    fn ambiguity_codes_are_neutral() {
        let ctx = ScoringContext::dna_default();
        assert_eq!(ctx.score(b'N', b'A'), 0);
    }

    #[test]
    fn matrix_file_tolerates_blank_lines_between_rows() {
        use std::io::Write as _;

        let dir = std::env::temp_dir();
        let path = dir.join("synten_core_scoring_matrix_test.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        for row in 0..26u32 {
            if row == 10 {
                writeln!(file).unwrap();
            }
            let mut values = [0i32; 26];
            values[row as usize] = 5;
            let line: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            writeln!(file, "{}", line.join(" ")).unwrap();
        }
        drop(file);

        let ctx = ScoringContext::from_matrix_file(&path).unwrap();
        assert_eq!(ctx.score(b'A', b'A'), 5);
        assert_eq!(ctx.score(b'K', b'K'), 5);
        assert_eq!(ctx.score(b'Z', b'Z'), 5);
        assert_eq!(ctx.score(b'A', b'B'), 0);

        std::fs::remove_file(&path).ok();
    }
}

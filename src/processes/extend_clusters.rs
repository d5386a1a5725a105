//! Sub-program: drive the cluster-to-alignment extension core over a whole
//! cluster file, writing the resulting alignments (and, optionally, the
//! fused cluster listing) for every `(A, B)` pair it names.

use std::collections::HashMap;
use std::io;

#[cfg(not(feature = "dev_no_rayon"))]
use rayon::prelude::*;

use crate::args::extend_clusters::{ExtendClustersArgs, ParsedExtendClustersArgs, parse_extend_clusters_args};
use crate::extend::driver::merge_synteny;
use crate::extend::extender::{GlobalDpExtender, SequenceExtender};
use crate::extend::model::{Alignment, SequenceRecord, Synteny};
use crate::extend::rescorer::rescore_all;
use crate::extend::scoring::ScoringContext;
use crate::extend::validator::validate;
use crate::io::clusters::ClusterFileEntry;
use crate::io::writers::{create_writer, write_delta_alignments, write_syntenys};

/// One `(A, B)` pair's worth of finished output: the records extended
/// against, the alignments produced, and the synteny (now with every
/// cluster's `was_fused` set) it came from.
type PairResult = (SequenceRecord, SequenceRecord, Vec<Alignment>, Synteny);

/// Sub-program for extending synteny clusters into gapped alignments.
///
/// ## Errors
///
/// Propagates I/O failures opening or parsing the reference, query,
/// cluster, matrix, or output files, with file-path context attached.
pub fn extend_clusters_process(args: ExtendClustersArgs) -> io::Result<()> {
    let ParsedExtendClustersArgs { references, queries, entries, scoring, config } = parse_extend_clusters_args(args)?;

    let ref_by_id = index_by_id(&references);
    let qry_by_id = index_by_id(&queries);
    let extender = GlobalDpExtender::new(&scoring, config.gap_open, config.gap_extend);

    #[cfg(not(feature = "dev_no_rayon"))]
    let results: Vec<PairResult> = entries
        .into_par_iter()
        .map(|entry| process_entry(entry, &ref_by_id, &qry_by_id, &extender, &scoring, config.validate))
        .collect::<io::Result<Vec<_>>>()?;

    #[cfg(feature = "dev_no_rayon")]
    let results: Vec<PairResult> = entries
        .into_iter()
        .map(|entry| process_entry(entry, &ref_by_id, &qry_by_id, &extender, &scoring, config.validate))
        .collect::<io::Result<Vec<_>>>()?;

    let mut delta_writer = create_writer(config.delta_out.as_ref())?;
    for (a, b, alignments, _) in &results {
        write_delta_alignments(&mut delta_writer, a, b, alignments)?;
    }

    if let Some(cluster_out) = &config.cluster_out {
        let mut cluster_writer = create_writer(Some(cluster_out))?;
        for (a, b, _, synteny) in &results {
            write_syntenys(&mut cluster_writer, a, b, std::slice::from_ref(synteny))?;
        }
    }

    Ok(())
}

fn index_by_id(records: &[SequenceRecord]) -> HashMap<&str, &SequenceRecord> {
    records.iter().map(|r| (r.id.as_str(), r)).collect()
}

/// Runs the merge driver, re-scorer, and (optionally) the validator for one
/// `(A, B)` pair named by a cluster-file entry. Each pair owns its own
/// `alignments`, `clusters`, and reverse-complement scratch buffer, so this
/// is safe to call from any number of threads concurrently.
fn process_entry(
    mut entry: ClusterFileEntry, ref_by_id: &HashMap<&str, &SequenceRecord>, qry_by_id: &HashMap<&str, &SequenceRecord>,
    extender: &impl SequenceExtender, scoring: &ScoringContext, validate_flag: bool,
) -> io::Result<PairResult> {
    let a = ref_by_id
        .get(entry.a_id.as_str())
        .copied()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, format!("unknown reference id '{}' in cluster file", entry.a_id)))?
        .clone();
    let b = qry_by_id
        .get(entry.b_id.as_str())
        .copied()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, format!("unknown query id '{}' in cluster file", entry.b_id)))?
        .clone();

    let mut alignments = merge_synteny(&mut entry.synteny, &a, &b, extender, scoring);
    rescore_all(&mut alignments, &a, &b, scoring);

    if validate_flag {
        validate(&entry.synteny.clusters, &alignments, &a, &b, scoring);
    }

    Ok((a, b, alignments, entry.synteny))
}

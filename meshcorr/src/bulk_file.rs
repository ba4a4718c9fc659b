//! Bulk-data files on disk
//!
//! The file is loaded completely and closed before parsing begins; parsing
//! itself is [`BulkReader`]'s job.

use std::path::Path;
use std::time::Instant;

use meshcorr_core::{BulkModel, BulkReader, ReadReport};
use tracing::{debug, info};

use crate::error::{CoreResultExt, Result};
use crate::source::SourceText;

/// File-level entry points for bulk-data decks
pub struct BulkFile;

impl BulkFile {
    /// Read a deck with the default reader settings
    pub fn read<P: AsRef<Path>>(path: P) -> Result<(BulkModel, ReadReport)> {
        let mut model = BulkModel::new();
        let report = Self::read_with(path, &BulkReader::default(), &mut model)?;
        Ok((model, report))
    }

    /// Read a deck into `model` with an explicit reader
    ///
    /// `model` is resized from the deck; on error it is left partially
    /// filled and should be cleared before reuse.
    pub fn read_with<P: AsRef<Path>>(
        path: P,
        reader: &BulkReader,
        model: &mut BulkModel,
    ) -> Result<ReadReport> {
        let path = path.as_ref();
        let start = Instant::now();
        let text = SourceText::load(path)?;
        debug!(path = %path.display(), bytes = text.as_str().len(), "loaded bulk file");

        let report = reader.read_into(text.as_str(), model).in_file(path)?;
        let merge = &report.merge;
        debug!(
            lines = merge.lines,
            comments = merge.comments,
            continuations = merge.continuations,
            orphans = merge.orphans,
            records = merge.records,
            "merged bulk records"
        );
        info!(
            path = %path.display(),
            nodes = report.counts.nodes,
            bars = report.counts.bars,
            triangles = report.counts.triangles,
            quads = report.counts.quads,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "read bulk file"
        );
        Ok(report)
    }
}

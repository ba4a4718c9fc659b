//! Two-pass bulk-data reader
//!
//! The reader is a pure function of the text: it never touches files. Targets
//! are sized once from a count pass and then filled index by index, so no
//! storage grows during the fill. A failing fill leaves the targets partially
//! written; callers must reset them before reuse.

use alloc::vec::Vec;

use super::record::{merge_lines, LogicalRecord, MergeStats};
use crate::connection::ConnectionMatrix;
use crate::format::constants::{COMMENT_MARKER, MIN_LINE_WIDTH};
use crate::nodes::NodeGrid;
use crate::Result;

/// Field index of a node's key
const GRID_KEY_FIELD: usize = 1;
/// Field index of a node's first coordinate; field 2 is the coordinate system
const GRID_FIRST_COORDINATE: usize = 3;
/// Field index of an element's first node key; fields 1 and 2 are ids
const ELEMENT_FIRST_NODE: usize = 3;

/// Reader configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BulkConfig {
    /// Width lines are padded to before classification
    pub min_line_width: usize,
    /// First character of a comment line
    pub comment_marker: char,
}

impl BulkConfig {
    /// Set the padding width
    pub fn with_min_line_width(mut self, width: usize) -> Self {
        self.min_line_width = width;
        self
    }

    /// Set the comment marker
    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            min_line_width: MIN_LINE_WIDTH,
            comment_marker: COMMENT_MARKER,
        }
    }
}

/// Entity keywords the reader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Keyword {
    /// `GRID`
    Grid,
    /// `CBAR` or `CBEAM`
    Bar,
    /// `CTRIA3`
    Triangle,
    /// `CQUAD4`
    Quad,
}

impl Keyword {
    /// Match a record keyword, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        const NAMES: [(&str, Keyword); 5] = [
            ("GRID", Keyword::Grid),
            ("CBAR", Keyword::Bar),
            ("CBEAM", Keyword::Bar),
            ("CTRIA3", Keyword::Triangle),
            ("CQUAD4", Keyword::Quad),
        ];
        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, keyword)| keyword)
    }

    /// Node keys referenced by an element record; zero for nodes
    pub const fn node_count(self) -> usize {
        match self {
            Keyword::Grid => 0,
            Keyword::Bar => 2,
            Keyword::Triangle => 3,
            Keyword::Quad => 4,
        }
    }

    /// Connection slots one record expands into
    pub const fn slots_per_record(self) -> usize {
        match self {
            Keyword::Grid => 0,
            Keyword::Bar => 1,
            Keyword::Triangle => 3,
            Keyword::Quad => 4,
        }
    }
}

/// Number of records per entity kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityCounts {
    pub nodes: usize,
    pub bars: usize,
    pub triangles: usize,
    pub quads: usize,
}

impl EntityCounts {
    /// Count recognised records
    pub fn from_records(records: &[LogicalRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            if let Some(keyword) = Keyword::from_name(record.keyword()) {
                *counts.slot_mut(keyword) += 1;
            }
        }
        counts
    }

    pub fn get(&self, keyword: Keyword) -> usize {
        match keyword {
            Keyword::Grid => self.nodes,
            Keyword::Bar => self.bars,
            Keyword::Triangle => self.triangles,
            Keyword::Quad => self.quads,
        }
    }

    fn slot_mut(&mut self, keyword: Keyword) -> &mut usize {
        match keyword {
            Keyword::Grid => &mut self.nodes,
            Keyword::Bar => &mut self.bars,
            Keyword::Triangle => &mut self.triangles,
            Keyword::Quad => &mut self.quads,
        }
    }

    /// Elements of every kind
    pub fn elements(&self) -> usize {
        self.bars + self.triangles + self.quads
    }

    /// Connection slots produced by all elements after expansion
    pub fn edge_slots(&self) -> usize {
        self.bars + 3 * self.triangles + 4 * self.quads
    }
}

/// Entity collections produced by a read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkModel {
    pub nodes: NodeGrid,
    /// One connection per bar or beam
    pub bars: ConnectionMatrix,
    /// Three connections per triangle, at `3i..3i + 2`
    pub triangles: ConnectionMatrix,
    /// Four connections per quadrilateral, at `4i..4i + 3`
    pub quads: ConnectionMatrix,
}

impl BulkModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element connection matrix for `keyword`, `None` for nodes
    pub fn edges(&self, keyword: Keyword) -> Option<&ConnectionMatrix> {
        match keyword {
            Keyword::Grid => None,
            Keyword::Bar => Some(&self.bars),
            Keyword::Triangle => Some(&self.triangles),
            Keyword::Quad => Some(&self.quads),
        }
    }

    pub fn edges_mut(&mut self, keyword: Keyword) -> Option<&mut ConnectionMatrix> {
        match keyword {
            Keyword::Grid => None,
            Keyword::Bar => Some(&mut self.bars),
            Keyword::Triangle => Some(&mut self.triangles),
            Keyword::Quad => Some(&mut self.quads),
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.bars.clear();
        self.triangles.clear();
        self.quads.clear();
    }
}

/// Summary of one read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadReport {
    pub counts: EntityCounts,
    pub merge: MergeStats,
}

/// Bulk-data reader
#[derive(Debug, Clone, Default)]
pub struct BulkReader {
    config: BulkConfig,
}

impl BulkReader {
    pub fn new(config: BulkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BulkConfig {
        &self.config
    }

    /// Merge `text` into logical records
    pub fn records(&self, text: &str) -> (Vec<LogicalRecord>, MergeStats) {
        merge_lines(text, &self.config)
    }

    /// Parse `text` into a fresh model
    pub fn read(&self, text: &str) -> Result<(BulkModel, ReadReport)> {
        let mut model = BulkModel::new();
        let report = self.read_into(text, &mut model)?;
        Ok((model, report))
    }

    /// Parse `text` into caller-provided targets
    ///
    /// Every target is resized from the count pass, discarding what it held.
    /// The first malformed record aborts the read.
    pub fn read_into(&self, text: &str, model: &mut BulkModel) -> Result<ReadReport> {
        let (records, merge) = self.records(text);
        let counts = EntityCounts::from_records(&records);

        model.nodes.set_node_count(counts.nodes);
        model.bars.set_connection_count(counts.bars);
        model.triangles.set_connection_count(3 * counts.triangles);
        model.quads.set_connection_count(4 * counts.quads);

        let mut filled = EntityCounts::default();
        for record in &records {
            let Some(keyword) = Keyword::from_name(record.keyword()) else {
                continue;
            };
            let index = filled.get(keyword);
            match keyword {
                Keyword::Grid => fill_node(record, index, &mut model.nodes)?,
                Keyword::Bar => fill_bar(record, index, &mut model.bars)?,
                Keyword::Triangle => fill_ring::<3>(record, index, &mut model.triangles)?,
                Keyword::Quad => fill_ring::<4>(record, index, &mut model.quads)?,
            }
            *filled.slot_mut(keyword) += 1;
        }

        Ok(ReadReport { counts, merge })
    }
}

fn fill_node(record: &LogicalRecord, index: usize, nodes: &mut NodeGrid) -> Result<()> {
    let key = record.key_field(GRID_KEY_FIELD)?;
    let mut coordinates = [0.0; 3];
    for (axis, value) in coordinates.iter_mut().enumerate() {
        *value = record.real_field(GRID_FIRST_COORDINATE + axis)?;
    }
    nodes.set_node(index, key, coordinates)
}

fn node_keys<const N: usize>(record: &LogicalRecord) -> Result<[&str; N]> {
    let mut keys = [""; N];
    for (i, key) in keys.iter_mut().enumerate() {
        *key = record.key_field(ELEMENT_FIRST_NODE + i)?;
    }
    Ok(keys)
}

fn fill_bar(record: &LogicalRecord, index: usize, bars: &mut ConnectionMatrix) -> Result<()> {
    let [a, b] = node_keys::<2>(record)?;
    bars.set_connection(index, a, b, 0.0)
}

/// Expand a closed element outline into `N` edges `v0->v1 .. v(N-1)->v0`
fn fill_ring<const N: usize>(
    record: &LogicalRecord,
    index: usize,
    edges: &mut ConnectionMatrix,
) -> Result<()> {
    let keys = node_keys::<N>(record)?;
    let base = N * index;
    for i in 0..N {
        edges.set_connection(base + i, keys[i], keys[(i + 1) % N], 0.0)?;
    }
    Ok(())
}

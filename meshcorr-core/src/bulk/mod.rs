//! Bulk-data parsing
//!
//! Bulk data is a line-oriented keyword format in which every line may use
//! one of three field encodings:
//!
//! - **free**: comma-separated fields
//! - **small**: 8-column fixed fields
//! - **large**: 16-column fixed fields, keyword marked with `*`
//!
//! Parsing runs in stages: lines are padded and classified ([`line`]),
//! continuation lines are merged into logical records ([`record`]), then the
//! [`reader`] counts entities, sizes the targets and fills them.

pub mod line;
pub mod reader;
pub mod record;

pub use line::{classify, pad_line, LineKind};
pub use reader::{BulkConfig, BulkModel, BulkReader, EntityCounts, Keyword, ReadReport};
pub use record::{merge_lines, FieldEncoding, LogicalRecord, MergeStats};

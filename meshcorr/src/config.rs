//! Writer configuration for connection files and rigid exports

use chrono::NaiveDateTime;
use meshcorr_core::format::constants::rigid::{DEFAULT_DOF_CODE, DEFAULT_TYPE_CODE};
use meshcorr_core::NumberFormat;

/// Options for writing ASCII connection files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionFileConfig {
    number_format: NumberFormat,
    first_source: Option<String>,
    last_source: Option<String>,
    timestamp: Option<NaiveDateTime>,
}

impl ConnectionFileConfig {
    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }

    /// Name of the mesh or mode set the first keys belong to
    pub fn with_first_source(mut self, name: impl Into<String>) -> Self {
        self.first_source = Some(name.into());
        self
    }

    /// Name of the mesh or mode set the last keys belong to
    pub fn with_last_source(mut self, name: impl Into<String>) -> Self {
        self.last_source = Some(name.into());
        self
    }

    /// Fixed header timestamp instead of the current local time
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn number_format(&self) -> &NumberFormat {
        &self.number_format
    }

    pub fn first_source(&self) -> Option<&str> {
        self.first_source.as_deref()
    }

    pub fn last_source(&self) -> Option<&str> {
        self.last_source.as_deref()
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }
}

/// Which key of a connection becomes the independent node of a rigid element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndependentSide {
    #[default]
    First,
    Last,
}

/// Options for rigid-connection exports
#[derive(Debug, Clone, PartialEq)]
pub struct RigidExportConfig {
    author: String,
    program_version: String,
    type_code: String,
    dof_code: String,
    start_id: u64,
    independent: IndependentSide,
    first_source: Option<String>,
    last_source: Option<String>,
    timestamp: Option<NaiveDateTime>,
}

impl Default for RigidExportConfig {
    fn default() -> Self {
        Self {
            author: String::from("meshcorr"),
            program_version: String::from(env!("CARGO_PKG_VERSION")),
            type_code: String::from(DEFAULT_TYPE_CODE),
            dof_code: String::from(DEFAULT_DOF_CODE),
            start_id: 1,
            independent: IndependentSide::First,
            first_source: None,
            last_source: None,
            timestamp: None,
        }
    }
}

impl RigidExportConfig {
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_program_version(mut self, version: impl Into<String>) -> Self {
        self.program_version = version.into();
        self
    }

    /// Element type code written in the first record field
    pub fn with_type_code(mut self, code: impl Into<String>) -> Self {
        self.type_code = code.into();
        self
    }

    /// Coupled degrees of freedom, e.g. `123` for translations only
    pub fn with_dof_code(mut self, code: impl Into<String>) -> Self {
        self.dof_code = code.into();
        self
    }

    /// Identifier of the first record; later records count up from it
    pub fn with_start_id(mut self, id: u64) -> Self {
        self.start_id = id;
        self
    }

    pub fn with_independent(mut self, side: IndependentSide) -> Self {
        self.independent = side;
        self
    }

    pub fn with_first_source(mut self, name: impl Into<String>) -> Self {
        self.first_source = Some(name.into());
        self
    }

    pub fn with_last_source(mut self, name: impl Into<String>) -> Self {
        self.last_source = Some(name.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn program_version(&self) -> &str {
        &self.program_version
    }

    pub fn type_code(&self) -> &str {
        &self.type_code
    }

    pub fn dof_code(&self) -> &str {
        &self.dof_code
    }

    pub fn start_id(&self) -> u64 {
        self.start_id
    }

    pub fn independent(&self) -> IndependentSide {
        self.independent
    }

    pub fn first_source(&self) -> Option<&str> {
        self.first_source.as_deref()
    }

    pub fn last_source(&self) -> Option<&str> {
        self.last_source.as_deref()
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }
}

/// Header timestamp: the configured one or the current local time
pub(crate) fn header_timestamp(fixed: Option<NaiveDateTime>) -> String {
    fixed
        .unwrap_or_else(|| chrono::Local::now().naive_local())
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_rigid_defaults() {
        let config = RigidExportConfig::default();
        assert_eq!(config.type_code(), "RBE2");
        assert_eq!(config.dof_code(), "123456");
        assert_eq!(config.start_id(), 1);
        assert_eq!(config.independent(), IndependentSide::First);
        assert_eq!(config.program_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_builders() {
        let config = RigidExportConfig::default()
            .with_start_id(5000)
            .with_dof_code("123")
            .with_independent(IndependentSide::Last)
            .with_first_source("wing.bdf");
        assert_eq!(config.start_id(), 5000);
        assert_eq!(config.dof_code(), "123");
        assert_eq!(config.independent(), IndependentSide::Last);
        assert_eq!(config.first_source(), Some("wing.bdf"));
        assert_eq!(config.last_source(), None);

        let config = ConnectionFileConfig::default()
            .with_number_format(NumberFormat::default().with_precision(3))
            .with_last_source("test modes");
        assert_eq!(config.number_format().precision, 3);
        assert_eq!(config.last_source(), Some("test modes"));
    }

    #[test]
    fn test_fixed_header_timestamp() {
        let stamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 0))
            .unwrap();
        assert_eq!(header_timestamp(Some(stamp)), "2024-03-09 14:05:00");
        assert_eq!(header_timestamp(None).len(), 19);
    }
}

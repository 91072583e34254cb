use crate::pipeline::QueryParams;
use std::path::PathBuf;

/// Where raw events come from
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSpec {
    /// JSON array or JSON Lines export of the event table
    File(PathBuf),

    /// Warehouse statements endpoint
    Warehouse {
        url: String,
        token: String,
        table: Option<String>,
    },
}

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Event source
    pub source: SourceSpec,

    /// Query parameter tuple
    pub params: QueryParams,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Recent transfers listed in the text summary
    pub recent_rows: usize,

    /// Memoize operation results
    pub cache_enabled: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            source: SourceSpec::File(PathBuf::from("events.json")),
            params: QueryParams::default(),
            output_json: Some(PathBuf::from("report.json")),
            print_summary: false,
            recent_rows: 10,
            cache_enabled: true,
        }
    }
}

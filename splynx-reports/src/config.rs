use splynx_core::TechnicianTable;
use std::path::PathBuf;

/// Everything a run needs besides the data source.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Root for `<date>/<technician>/<title>.txt` digest files.
    pub digest_root: PathBuf,
    /// Root for `<technician>/tareas_<date>.txt` summary files.
    pub summary_root: PathBuf,
    /// Assignee id → technician name for the calendar summary.
    pub technicians: TechnicianTable,
    /// `false`: unassigned tasks are left out of the summary entirely.
    /// `true`: they are grouped under `SIN_ASIGNAR`.
    pub include_unassigned: bool,
}

impl ReportConfig {
    pub fn new(digest_root: impl Into<PathBuf>, summary_root: impl Into<PathBuf>) -> Self {
        Self {
            digest_root: digest_root.into(),
            summary_root: summary_root.into(),
            technicians: TechnicianTable::new(),
            include_unassigned: false,
        }
    }

    pub fn with_technicians(mut self, technicians: TechnicianTable) -> Self {
        self.technicians = technicians;
        self
    }

    pub fn with_unassigned(mut self, include: bool) -> Self {
        self.include_unassigned = include;
        self
    }
}

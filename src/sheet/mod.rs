//! Call-sheet document projection: derived schedule values plus the two
//! renderers (paginated PDF and grid workbook) that share one formatting
//! contract so their outputs can never drift apart.

pub mod derive;
pub mod format;
pub mod pdf;
pub mod xlsx;

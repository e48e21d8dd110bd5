mod report;
mod scan;

pub use report::{crossings_table, levels_table, scan_table};
pub use scan::{MarketReport, WindowAnalysis, analyze_window, scan_markets};

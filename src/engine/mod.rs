//! Runner — fetch a catalog, scan it, and present the results.

pub mod report;
pub mod scanner;

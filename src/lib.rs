// SPDX-License-Identifier: PMPL-1.0-or-later
//! accessguard - WCAG 2.2 HTML accessibility scanner and auto-fixer
//!
//! Parses an HTML page or fragment into an owned node arena, runs a fixed
//! catalog of 20 checks over it and reports ordered findings with a
//! severity summary. A companion auto-fixer repairs four of the issues
//! in place.
//!
//! ## Checks
//!
//! - **Images** (1.1.1/1.4.4): missing `alt`, missing dimensions
//! - **Links** (2.4.4): empty links and buttons, links without text
//! - **Contrast** (1.4.3): inline color pairs below 4.5:1
//! - **Structure** (1.3.1): heading order, landmarks, table headers, empty headings, nav lists
//! - **Forms** (1.3.1): unlabeled fields
//! - **Page** (3.1.1/2.4.2/4.1.1/1.4.4): language, title, duplicate ids, viewport
//! - **Keyboard** (2.1.1/2.4.1/2.4.3/2.4.7): focus outlines, skip link, positive tabindex
//! - **Media** (1.4.2): autoplay
//! - **Styles** (1.3.1): hidden text, tiny fonts
//!
//! ## Example
//!
//! ```
//! use accessguard::{scan, Catalog, Document};
//!
//! let catalog = Catalog::wcag22();
//! let document = Document::parse(r#"<html lang="en"><body><img src="a.png"></body></html>"#);
//! let result = scan(&catalog, &document);
//! assert!(result.has_errors());
//! ```

pub mod catalog;
pub mod checks;
pub mod color;
pub mod config;
pub mod dom;
pub mod error;
pub mod finding;
pub mod fixer;
pub mod query;
pub mod report;
pub mod scanner;

pub use catalog::{Catalog, CheckDefinition, CheckId};
pub use checks::{scan, scan_html};
pub use config::Config;
pub use dom::{Document, NodeId};
pub use error::{GuardError, Result};
pub use finding::{Finding, ScanReport, ScanResult, Severity, Summary, WcagLevel};
pub use fixer::{AutoFixer, FixKind, FixOutcome};

// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule engine: runs every catalog check over one parsed document.
//!
//! Each check is a pure function of the document and its own definition.
//! Checks never see each other's output; the engine concatenates their
//! findings in catalog order, which is part of the observable contract.

pub mod contrast;
pub mod forms;
pub mod images;
pub mod keyboard;
pub mod links;
pub mod media;
pub mod page;
pub mod structure;
pub mod styles;

use crate::catalog::{Catalog, CheckDefinition, CheckId};
use crate::dom::Document;
use crate::finding::{Finding, ScanReport, ScanResult};
use tracing::{debug, info};

/// Run all checks of `catalog` against `document`
pub fn scan(catalog: &Catalog, document: &Document) -> ScanResult {
    let mut findings = Vec::new();

    for check in catalog.iter() {
        let found = run_check(check, document);
        debug!(check = %check.id, findings = found.len(), "Check complete");
        findings.extend(found);
    }

    let result = ScanResult::new(findings);
    info!(
        total = result.summary.total,
        errors = result.summary.error,
        warnings = result.summary.warning,
        notices = result.summary.notice,
        "Scan complete"
    );
    result
}

/// Parse `html` and scan it, tagging the result with `document_id`
pub fn scan_html(catalog: &Catalog, html: &str, document_id: Option<&str>) -> ScanReport {
    info!(document = document_id.unwrap_or("<anonymous>"), bytes = html.len(), "Scanning HTML");
    let document = Document::parse(html);
    ScanReport::new(document_id.map(String::from), scan(catalog, &document))
}

/// Evaluate a single check
pub fn run_check(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    match check.id {
        CheckId::MissingAltText => images::missing_alt_text(check, document),
        CheckId::EmptyLinksButtons => links::empty_links_buttons(check, document),
        CheckId::ColorContrast => contrast::color_contrast(check, document),
        CheckId::HeadingHierarchy => structure::heading_hierarchy(check, document),
        CheckId::MissingFormLabels => forms::missing_form_labels(check, document),
        CheckId::MissingLangAttr => page::missing_lang_attr(check, document),
        CheckId::MissingFocusIndicators => keyboard::missing_focus_indicators(check, document),
        CheckId::MissingLandmarks => structure::missing_landmarks(check, document),
        CheckId::EmptyTableHeaders => structure::empty_table_headers(check, document),
        CheckId::MissingSkipNav => keyboard::missing_skip_nav(check, document),
        CheckId::MissingPageTitle => page::missing_page_title(check, document),
        CheckId::DuplicateIds => page::duplicate_ids(check, document),
        CheckId::EmptyHeadings => structure::empty_headings(check, document),
        CheckId::ImagesMissingDimensions => images::images_missing_dimensions(check, document),
        CheckId::MissingLinkText => links::missing_link_text(check, document),
        CheckId::TabindexPositive => keyboard::tabindex_positive(check, document),
        CheckId::AutoPlayingMedia => media::auto_playing_media(check, document),
        CheckId::MissingViewportMeta => page::missing_viewport_meta(check, document),
        CheckId::InlineStylesA11y => styles::inline_styles_a11y(check, document),
        CheckId::MissingListStructure => structure::missing_list_structure(check, document),
    }
}

#[cfg(test)]
pub(crate) fn run(id: CheckId, html: &str) -> Vec<Finding> {
    let catalog = Catalog::wcag22();
    run_check(catalog.definition(id), &Document::parse(html))
}

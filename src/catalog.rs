// SPDX-License-Identifier: PMPL-1.0-or-later
//! The WCAG 2.2 check catalog.
//!
//! The catalog is a fixed, ordered, append-only table. Its order is the
//! order checks run in, and therefore the order findings are reported in.
//! [`CheckId`] is a closed enum so the rule engine's dispatch is checked for
//! exhaustiveness at build time; [`CheckId::as_str`] keeps the stable string
//! key used to correlate findings outside this crate.

use crate::finding::{Finding, Severity, WcagLevel};
use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    MissingAltText,
    EmptyLinksButtons,
    ColorContrast,
    HeadingHierarchy,
    MissingFormLabels,
    MissingLangAttr,
    MissingFocusIndicators,
    MissingLandmarks,
    EmptyTableHeaders,
    MissingSkipNav,
    MissingPageTitle,
    DuplicateIds,
    EmptyHeadings,
    ImagesMissingDimensions,
    MissingLinkText,
    TabindexPositive,
    AutoPlayingMedia,
    MissingViewportMeta,
    InlineStylesA11y,
    MissingListStructure,
}

impl CheckId {
    /// Every check in catalog order
    pub const ALL: [CheckId; 20] = [
        CheckId::MissingAltText,
        CheckId::EmptyLinksButtons,
        CheckId::ColorContrast,
        CheckId::HeadingHierarchy,
        CheckId::MissingFormLabels,
        CheckId::MissingLangAttr,
        CheckId::MissingFocusIndicators,
        CheckId::MissingLandmarks,
        CheckId::EmptyTableHeaders,
        CheckId::MissingSkipNav,
        CheckId::MissingPageTitle,
        CheckId::DuplicateIds,
        CheckId::EmptyHeadings,
        CheckId::ImagesMissingDimensions,
        CheckId::MissingLinkText,
        CheckId::TabindexPositive,
        CheckId::AutoPlayingMedia,
        CheckId::MissingViewportMeta,
        CheckId::InlineStylesA11y,
        CheckId::MissingListStructure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckId::MissingAltText => "missing_alt_text",
            CheckId::EmptyLinksButtons => "empty_links_buttons",
            CheckId::ColorContrast => "color_contrast",
            CheckId::HeadingHierarchy => "heading_hierarchy",
            CheckId::MissingFormLabels => "missing_form_labels",
            CheckId::MissingLangAttr => "missing_lang_attr",
            CheckId::MissingFocusIndicators => "missing_focus_indicators",
            CheckId::MissingLandmarks => "missing_landmarks",
            CheckId::EmptyTableHeaders => "empty_table_headers",
            CheckId::MissingSkipNav => "missing_skip_nav",
            CheckId::MissingPageTitle => "missing_page_title",
            CheckId::DuplicateIds => "duplicate_ids",
            CheckId::EmptyHeadings => "empty_headings",
            CheckId::ImagesMissingDimensions => "images_missing_dimensions",
            CheckId::MissingLinkText => "missing_link_text",
            CheckId::TabindexPositive => "tabindex_positive",
            CheckId::AutoPlayingMedia => "auto_playing_media",
            CheckId::MissingViewportMeta => "missing_viewport_meta",
            CheckId::InlineStylesA11y => "inline_styles_a11y",
            CheckId::MissingListStructure => "missing_list_structure",
        }
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CheckId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown check id: {}", s))
    }
}

/// Static description of one check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckDefinition {
    pub id: CheckId,
    pub title: &'static str,
    /// Dotted WCAG success criterion
    pub wcag: &'static str,
    pub level: WcagLevel,
    pub severity: Severity,
    /// Whether the auto-fixer has a transformation for this check
    pub auto_fixable: bool,
    pub description: &'static str,
}

impl CheckDefinition {
    /// Build a finding for this check. Severity, criterion and level come
    /// from the definition; `element` is expected to be pre-truncated.
    pub fn finding(&self, message: impl Into<String>, element: impl Into<String>) -> Finding {
        Finding {
            check_id: self.id,
            severity: self.severity,
            wcag: self.wcag.to_string(),
            level: self.level,
            message: message.into(),
            element: element.into(),
        }
    }
}

fn definition(id: CheckId) -> CheckDefinition {
    use Severity::{Error, Notice, Warning};
    use WcagLevel::{A, AA};

    let (title, wcag, level, severity, auto_fixable, description) = match id {
        CheckId::MissingAltText => (
            "Missing image alt text", "1.1.1", A, Error, false,
            "Images must have an alt attribute that describes the image content. Decorative images should use an empty alt attribute (alt=\"\").",
        ),
        CheckId::EmptyLinksButtons => (
            "Empty links or buttons", "2.4.4", A, Error, false,
            "Links and buttons must have discernible text content or an accessible label.",
        ),
        CheckId::ColorContrast => (
            "Insufficient color contrast", "1.4.3", AA, Warning, false,
            "Text must have a contrast ratio of at least 4.5:1 for normal text and 3:1 for large text against its background.",
        ),
        CheckId::HeadingHierarchy => (
            "Skipped heading level", "1.3.1", A, Warning, false,
            "Heading levels should not be skipped (e.g., H1 followed by H3 without H2). This helps screen reader users navigate the page structure.",
        ),
        CheckId::MissingFormLabels => (
            "Missing form field labels", "1.3.1", A, Error, true,
            "Form fields (input, select, textarea) must have an associated label element, aria-label, or aria-labelledby attribute.",
        ),
        CheckId::MissingLangAttr => (
            "Missing document language", "3.1.1", A, Error, true,
            "The HTML element must have a lang attribute specifying the document language.",
        ),
        CheckId::MissingFocusIndicators => (
            "Removed focus indicators", "2.4.7", AA, Warning, false,
            "Focus indicators (outline) must not be removed. Users navigating with keyboards rely on visible focus styles.",
        ),
        CheckId::MissingLandmarks => (
            "Missing ARIA landmark regions", "1.3.1", A, Warning, false,
            "Pages should include landmark regions (main, nav, header, footer) to help assistive technology users navigate.",
        ),
        CheckId::EmptyTableHeaders => (
            "Empty table headers", "1.3.1", A, Error, false,
            "Table header cells (th) must contain text so screen readers can associate data cells with their headers.",
        ),
        CheckId::MissingSkipNav => (
            "Missing skip navigation link", "2.4.1", A, Warning, true,
            "A skip navigation link should be the first focusable element so keyboard users can bypass repetitive navigation.",
        ),
        CheckId::MissingPageTitle => (
            "Missing or empty page title", "2.4.2", A, Error, false,
            "Every page must have a descriptive title element that identifies the page content.",
        ),
        CheckId::DuplicateIds => (
            "Duplicate element IDs", "4.1.1", A, Error, false,
            "Element IDs must be unique within a page. Duplicate IDs break label associations and ARIA references.",
        ),
        CheckId::EmptyHeadings => (
            "Empty headings", "1.3.1", A, Warning, true,
            "Heading elements must contain text content. Empty headings confuse screen reader users navigating by headings.",
        ),
        CheckId::ImagesMissingDimensions => (
            "Images missing width/height", "1.4.4", AA, Notice, false,
            "Images should have explicit width and height attributes to prevent layout shift (CLS).",
        ),
        CheckId::MissingLinkText => (
            "Links without accessible text", "2.4.4", A, Error, false,
            "Links must have discernible text, either as text content, aria-label, aria-labelledby, or via an image with alt text.",
        ),
        CheckId::TabindexPositive => (
            "Positive tabindex values", "2.4.3", A, Warning, false,
            "Avoid tabindex values greater than 0. They disrupt the natural tab order and confuse keyboard users.",
        ),
        CheckId::AutoPlayingMedia => (
            "Auto-playing media", "1.4.2", A, Error, false,
            "Audio or video must not play automatically. Users must be able to control media playback.",
        ),
        CheckId::MissingViewportMeta => (
            "Missing or restrictive viewport meta", "1.4.4", AA, Warning, false,
            "The viewport meta tag should be present and must not disable user scaling (user-scalable=no or maximum-scale=1).",
        ),
        CheckId::InlineStylesA11y => (
            "Accessibility-affecting inline styles", "1.3.1", A, Notice, false,
            "Inline styles that hide content (display:none) without aria-hidden, or set very small font sizes, may create accessibility barriers.",
        ),
        CheckId::MissingListStructure => (
            "Navigation without list structure", "1.3.1", A, Notice, false,
            "Navigation regions should use list elements (ul/ol) to group links, helping screen readers announce the number of items.",
        ),
    };

    CheckDefinition {
        id,
        title,
        wcag,
        level,
        severity,
        auto_fixable,
        description,
    }
}

/// The ordered set of check definitions handed to the rule engine
#[derive(Debug, Clone)]
pub struct Catalog {
    checks: Vec<CheckDefinition>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::wcag22()
    }
}

impl Catalog {
    /// The 20 WCAG 2.2 checks in execution order
    pub fn wcag22() -> Self {
        Self {
            checks: CheckId::ALL.into_iter().map(definition).collect(),
        }
    }

    /// Definitions in execution order
    pub fn iter(&self) -> impl Iterator<Item = &CheckDefinition> {
        self.checks.iter()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Definition of a known check
    pub fn definition(&self, id: CheckId) -> &CheckDefinition {
        // `ALL` fixes both the enum order and the table order
        &self.checks[id as usize]
    }

    /// Look up a definition by its string key; unknown keys give `None`
    pub fn get(&self, id: &str) -> Option<&CheckDefinition> {
        self.checks.iter().find(|c| c.id.as_str() == id)
    }

    /// Definitions with the given severity, in catalog order
    pub fn by_severity(&self, severity: Severity) -> Vec<&CheckDefinition> {
        self.checks.iter().filter(|c| c.severity == severity).collect()
    }

    /// Definitions the auto-fixer can act on
    pub fn auto_fixable(&self) -> Vec<&CheckDefinition> {
        self.checks.iter().filter(|c| c.auto_fixable).collect()
    }

    /// Build a finding from a string key. Unknown keys yield no finding.
    pub fn finding(&self, id: &str, message: &str, element: &str) -> Option<Finding> {
        self.get(id).map(|def| {
            def.finding(message, crate::dom::truncate_chars(element, crate::dom::SNIPPET_LIMIT))
        })
    }
}

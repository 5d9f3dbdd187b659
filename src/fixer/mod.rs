// SPDX-License-Identifier: PMPL-1.0-or-later
//! Auto-fixer: independent, idempotent repairs for four checks.
//!
//! Each repair is gated by its own [`FixesConfig`] toggle. Content fixes
//! run on HTML fragments (post bodies, template partials); the language
//! fix works on the `<html>` attribute string; the skip link is markup the
//! page renderer prints.

pub mod form_labels;
pub mod headings;
pub mod lang;
pub mod skip_link;

pub use form_labels::add_form_labels;
pub use headings::remove_empty_headings;
pub use lang::ensure_lang_attr;
pub use skip_link::{skip_link_markup, DEFAULT_SKIP_LABEL, SKIP_LINK_CSS};

use crate::catalog::CheckId;
use crate::config::FixesConfig;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, info};

/// One kind of automatic repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixKind {
    LangAttr,
    EmptyHeadings,
    FormLabels,
    SkipLink,
}

impl FixKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixKind::LangAttr => "lang_attr",
            FixKind::EmptyHeadings => "empty_headings",
            FixKind::FormLabels => "form_labels",
            FixKind::SkipLink => "skip_link",
        }
    }

    /// The check whose findings this fix addresses
    pub fn check(&self) -> CheckId {
        match self {
            FixKind::LangAttr => CheckId::MissingLangAttr,
            FixKind::EmptyHeadings => CheckId::EmptyHeadings,
            FixKind::FormLabels => CheckId::MissingFormLabels,
            FixKind::SkipLink => CheckId::MissingSkipNav,
        }
    }
}

impl fmt::Display for FixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running the content fixes over a fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixOutcome {
    pub html: String,
    /// Fixes that changed the markup, in the order they ran
    pub applied: Vec<FixKind>,
}

impl FixOutcome {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Applies the enabled fixes
#[derive(Debug, Clone, Default)]
pub struct AutoFixer {
    config: FixesConfig,
}

impl AutoFixer {
    pub fn new(config: FixesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FixesConfig {
        &self.config
    }

    /// Whether a fix is switched on
    pub fn is_enabled(&self, kind: FixKind) -> bool {
        match kind {
            FixKind::LangAttr => self.config.lang_attr,
            FixKind::EmptyHeadings => self.config.empty_headings,
            FixKind::FormLabels => self.config.form_labels,
            FixKind::SkipLink => self.config.skip_link,
        }
    }

    /// Add `lang="<site_language>"` to the `<html>` attribute string
    pub fn language_attributes(&self, attributes: &str) -> String {
        if !self.config.lang_attr {
            return attributes.to_string();
        }
        ensure_lang_attr(attributes, &self.config.site_language)
    }

    /// Run the enabled content fixes: empty headings, then form labels.
    ///
    /// Input is returned unchanged when nothing applies.
    pub fn fix_content(&self, html: &str) -> FixOutcome {
        let mut applied = Vec::new();
        let mut current = Cow::Borrowed(html);

        if self.config.empty_headings && !html.is_empty() {
            if let Cow::Owned(stripped) = remove_empty_headings(html) {
                current = Cow::Owned(stripped);
                applied.push(FixKind::EmptyHeadings);
            }
        }

        if self.config.form_labels && !current.is_empty() {
            if let Some(labelled) = add_form_labels(&current) {
                current = Cow::Owned(labelled);
                applied.push(FixKind::FormLabels);
            }
        }

        if applied.is_empty() {
            debug!("No content fixes applied");
        } else {
            info!(fixes = ?applied, "Applied content fixes");
        }

        FixOutcome {
            html: current.into_owned(),
            applied,
        }
    }

    /// Skip link markup, when that fix is enabled
    pub fn skip_link(&self) -> Option<String> {
        self.config
            .skip_link
            .then(|| skip_link_markup(DEFAULT_SKIP_LABEL))
    }

    /// Stylesheet for the skip link, when that fix is enabled
    pub fn skip_link_css(&self) -> Option<&'static str> {
        self.config.skip_link.then_some(SKIP_LINK_CSS)
    }
}

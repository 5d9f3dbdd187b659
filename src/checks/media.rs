// SPDX-License-Identifier: PMPL-1.0-or-later
//! Auto-playing media - WCAG 1.4.2 Audio Control (Level A)

use crate::catalog::CheckDefinition;
use crate::dom::Document;
use crate::finding::Finding;

/// `video`/`audio` with `autoplay`, then iframes whose URL requests autoplay
pub fn auto_playing_media(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    let mut findings: Vec<Finding> = document
        .elements_by_tag(&["video", "audio"])
        .filter(|&node| document.has_attr(node, "autoplay"))
        .map(|node| {
            check.finding(
                format!(
                    "<{}> has autoplay attribute. Users must control media playback.",
                    document.tag_name(node).unwrap_or_default()
                ),
                document.snippet(node),
            )
        })
        .collect();

    findings.extend(
        document
            .elements_by_tag(&["iframe"])
            .filter(|&iframe| {
                document
                    .attr(iframe, "src")
                    .is_some_and(|src| src.contains("autoplay=1") || src.contains("autoplay=true"))
            })
            .map(|iframe| {
                check.finding("Iframe source includes autoplay parameter.", document.snippet(iframe))
            }),
    );

    findings
}

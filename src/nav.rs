//! Conversation-entry validation and active-position tracking.
//!
//! The host page has no stable per-item identifier, so "is this a real
//! conversation entry" is decided structurally: entries have visible text and
//! a real footprint, while sidebar navigation chrome carries accessible
//! labels and icon buttons are tiny. The active position is recomputed fresh
//! on every call; the tree may have mutated since the last shortcut.

use tracing::trace;

use crate::config::ValidatorConfig;
use crate::dom::Document;
use crate::types::NodeId;

/// Whether a candidate node is a genuine conversation entry.
///
/// All of the following must hold: non-empty trimmed text, bounding box
/// larger than the configured thresholds, no accessible label, and no
/// "More options" label substring. The substring check is case-sensitive,
/// matching the host page's label convention.
pub fn is_genuine_entry(doc: &dyn Document, node: NodeId, config: &ValidatorConfig) -> bool {
    let has_text = !doc.text_content(node).trim().is_empty();

    let rect = doc.bounding_box(node);
    let has_size = rect.width > config.min_width && rect.height > config.min_height;

    // Labeled links belong to the decoy sidebar navigation region.
    let label = doc.attribute(node, "aria-label");
    let has_label = label.is_some();
    let is_more_button = label.map_or(false, |l| l.contains("More options"));

    let genuine = has_text && has_size && !has_label && !is_more_button;
    if !genuine {
        trace!(%node, has_text, has_size, has_label, "rejected candidate");
    }
    genuine
}

/// Filter a candidate sequence down to genuine entries, order preserved.
pub fn validate_entries(
    doc: &dyn Document,
    candidates: &[NodeId],
    config: &ValidatorConfig,
) -> Vec<NodeId> {
    candidates
        .iter()
        .copied()
        .filter(|&node| is_genuine_entry(doc, node, config))
        .collect()
}

/// Position of the active node among validated entries.
///
/// An entry matches if it is the active node, contains it, or is contained by
/// it — the clickable entry and the node carrying the selection marker are
/// often different levels of the same wrapper. Falls back to scanning for an
/// entry whose `aria-current` attribute equals `"page"`.
pub fn active_index(
    doc: &dyn Document,
    validated: &[NodeId],
    active: Option<NodeId>,
) -> Option<usize> {
    let active = active?;
    if validated.is_empty() {
        return None;
    }

    for (i, &entry) in validated.iter().enumerate() {
        if entry == active || doc.contains(entry, active) || doc.contains(active, entry) {
            return Some(i);
        }
    }

    validated
        .iter()
        .position(|&entry| doc.attribute(entry, "aria-current").as_deref() == Some("page"))
}

/// Index of the previous entry, wrapping to the last.
///
/// `None` current index (no active entry) also lands on the last entry.
pub fn previous_index(len: usize, current: Option<usize>) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i > 0 => i - 1,
        _ => len - 1,
    })
}

/// Index of the next entry, wrapping to the first.
///
/// `None` current index (no active entry) lands on the first entry.
pub fn next_index(len: usize, current: Option<usize>) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    })
}

//! The dental-chart side of step 2: a transient tooth selection plus the
//! issue editor that reads and writes the draft's per-tooth ledger.
//!
//! The selection and the open editor are UI working-state and never part
//! of the draft; every commit, removal, or cancel clears them.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::models::{NumberingScheme, ToothIssue, ToothNumber, TreatmentDraft};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("no teeth selected")]
    EmptySelection,

    #[error("an issue description is required")]
    EmptyIssue,
}

/// The issue editor's pre-filled working values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueEditor {
    pub issue: String,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartEditor {
    scheme: NumberingScheme,
    selected: BTreeSet<ToothNumber>,
    editor: Option<IssueEditor>,
}

impl ChartEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheme(&self) -> NumberingScheme {
        self.scheme
    }

    /// Switches the displayed numbering scheme.
    ///
    /// Clears the working selection (those teeth are no longer on screen)
    /// but never touches ledger entries recorded under the other scheme;
    /// both key sets coexist in the draft.
    pub fn set_scheme(&mut self, scheme: NumberingScheme) {
        self.scheme = scheme;
        self.selected.clear();
        self.editor = None;
    }

    pub fn selected(&self) -> &BTreeSet<ToothNumber> {
        &self.selected
    }

    /// Adds the tooth to the selection if absent, removes it if present.
    pub fn toggle_tooth(&mut self, tooth: ToothNumber) {
        if !self.selected.remove(&tooth) {
            self.selected.insert(tooth);
        }
    }

    /// Whether the "add issue" action is available at all. With nothing
    /// selected the action is disabled, not an error.
    pub fn can_edit_issue(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn editor(&self) -> Option<&IssueEditor> {
        self.editor.as_ref()
    }

    /// Opens the issue editor over the current selection.
    ///
    /// Returns `None` (and stays closed) when nothing is selected. A single
    /// selected tooth pre-fills from its existing entry; a group selection
    /// pre-fills only when every selected tooth shares an identical
    /// issue+comment, otherwise blank.
    pub fn open_issue_editor(
        &mut self,
        ledger: &BTreeMap<ToothNumber, ToothIssue>,
    ) -> Option<&IssueEditor> {
        if self.selected.is_empty() {
            return None;
        }

        let mut teeth = self.selected.iter();
        let first = teeth.next().and_then(|t| ledger.get(t));
        let shared = match first {
            Some(entry) if teeth.all(|t| ledger.get(t) == Some(entry)) => Some(entry),
            _ => None,
        };

        self.editor = Some(match shared {
            Some(entry) => IssueEditor {
                issue: entry.issue.clone(),
                comment: entry.comment.clone().unwrap_or_default(),
            },
            None => IssueEditor::default(),
        });
        self.editor.as_ref()
    }

    /// Writes `{issue, comment}` to every selected tooth, overwriting
    /// existing entries (the one operation allowed to overwrite). Clears
    /// the selection and closes the editor.
    ///
    /// Pure in-memory assignment: the write is atomic across the whole
    /// selection. Blank comments are stored as absent.
    pub fn commit_issue(
        &mut self,
        draft: &mut TreatmentDraft,
        issue: &str,
        comment: Option<&str>,
    ) -> Result<(), ChartError> {
        if self.selected.is_empty() {
            return Err(ChartError::EmptySelection);
        }
        let issue = issue.trim();
        if issue.is_empty() {
            return Err(ChartError::EmptyIssue);
        }
        let comment = comment
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        for tooth in &self.selected {
            draft.tooth_issues.insert(
                *tooth,
                ToothIssue {
                    issue: issue.to_string(),
                    comment: comment.clone(),
                },
            );
        }
        self.selected.clear();
        self.editor = None;
        Ok(())
    }

    /// Deletes the ledger entry for every selected tooth; a no-op for
    /// teeth without one. Clears the selection and closes the editor.
    pub fn remove_issue(
        &mut self,
        draft: &mut TreatmentDraft,
    ) -> Result<(), ChartError> {
        if self.selected.is_empty() {
            return Err(ChartError::EmptySelection);
        }
        for tooth in &self.selected {
            draft.tooth_issues.remove(tooth);
        }
        self.selected.clear();
        self.editor = None;
        Ok(())
    }

    /// Abandons the edit: selection cleared, editor closed, ledger
    /// untouched.
    pub fn cancel(&mut self) {
        self.selected.clear();
        self.editor = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tooth(n: u8) -> ToothNumber {
        ToothNumber::new(n).expect("valid tooth in tests")
    }

    fn cavity(comment: Option<&str>) -> ToothIssue {
        ToothIssue {
            issue: "Cavity".to_string(),
            comment: comment.map(str::to_string),
        }
    }

    // =========================================================================
    // selection
    // =========================================================================

    #[test]
    fn toggle_adds_then_removes() {
        let mut chart = ChartEditor::new();

        chart.toggle_tooth(tooth(18));
        assert!(chart.selected().contains(&tooth(18)));

        chart.toggle_tooth(tooth(18));
        assert!(chart.selected().is_empty());
    }

    #[test]
    fn edit_action_unavailable_with_empty_selection() {
        let mut chart = ChartEditor::new();
        let ledger = BTreeMap::new();

        assert!(!chart.can_edit_issue());
        assert_eq!(chart.open_issue_editor(&ledger), None);
        assert_eq!(chart.editor(), None);
    }

    // =========================================================================
    // editor pre-fill
    // =========================================================================

    #[test]
    fn single_tooth_prefills_existing_entry() {
        let mut chart = ChartEditor::new();
        chart.toggle_tooth(tooth(18));
        let mut ledger = BTreeMap::new();
        ledger.insert(tooth(18), cavity(Some("x")));

        let editor = chart.open_issue_editor(&ledger).expect("selection non-empty");

        assert_eq!(editor.issue, "Cavity");
        assert_eq!(editor.comment, "x");
    }

    #[test]
    fn single_unmapped_tooth_prefills_blank() {
        let mut chart = ChartEditor::new();
        chart.toggle_tooth(tooth(18));
        let ledger = BTreeMap::new();

        let editor = chart.open_issue_editor(&ledger).expect("selection non-empty");

        assert_eq!(editor, &IssueEditor::default());
    }

    #[test]
    fn group_with_identical_entries_prefills_shared_value() {
        let mut chart = ChartEditor::new();
        chart.toggle_tooth(tooth(11));
        chart.toggle_tooth(tooth(12));
        let mut ledger = BTreeMap::new();
        ledger.insert(tooth(11), cavity(Some("x")));
        ledger.insert(tooth(12), cavity(Some("x")));

        let editor = chart.open_issue_editor(&ledger).expect("selection non-empty");

        assert_eq!(editor.issue, "Cavity");
        assert_eq!(editor.comment, "x");
    }

    #[test]
    fn group_with_partial_coverage_prefills_blank() {
        let mut chart = ChartEditor::new();
        chart.toggle_tooth(tooth(11));
        chart.toggle_tooth(tooth(12));
        let mut ledger = BTreeMap::new();
        ledger.insert(tooth(11), cavity(None));

        let editor = chart.open_issue_editor(&ledger).expect("selection non-empty");

        assert_eq!(editor, &IssueEditor::default());
    }

    #[test]
    fn group_with_diverging_comments_prefills_blank() {
        let mut chart = ChartEditor::new();
        chart.toggle_tooth(tooth(11));
        chart.toggle_tooth(tooth(12));
        let mut ledger = BTreeMap::new();
        ledger.insert(tooth(11), cavity(Some("x")));
        ledger.insert(tooth(12), cavity(Some("y")));

        let editor = chart.open_issue_editor(&ledger).expect("selection non-empty");

        assert_eq!(editor, &IssueEditor::default());
    }

    // =========================================================================
    // commit
    // =========================================================================

    #[test]
    fn commit_writes_every_selected_tooth_and_clears_selection() {
        let mut chart = ChartEditor::new();
        let mut draft = TreatmentDraft::new();
        chart.toggle_tooth(tooth(11));
        chart.toggle_tooth(tooth(12));
        chart.open_issue_editor(&draft.tooth_issues);

        chart
            .commit_issue(&mut draft, "Cavity", Some("watch"))
            .expect("valid commit");

        assert_eq!(draft.tooth_issues.get(&tooth(11)), Some(&cavity(Some("watch"))));
        assert_eq!(draft.tooth_issues.get(&tooth(12)), Some(&cavity(Some("watch"))));
        assert!(chart.selected().is_empty());
        assert_eq!(chart.editor(), None);
    }

    #[test]
    fn commit_overwrites_existing_entries() {
        let mut chart = ChartEditor::new();
        let mut draft = TreatmentDraft::new();
        draft.tooth_issues.insert(tooth(11), cavity(Some("old")));
        chart.toggle_tooth(tooth(11));

        chart
            .commit_issue(&mut draft, "Fracture", None)
            .expect("valid commit");

        assert_eq!(
            draft.tooth_issues.get(&tooth(11)),
            Some(&ToothIssue {
                issue: "Fracture".to_string(),
                comment: None,
            })
        );
    }

    #[test]
    fn commit_twice_with_same_arguments_is_idempotent() {
        let mut draft = TreatmentDraft::new();

        let mut chart = ChartEditor::new();
        chart.toggle_tooth(tooth(11));
        chart.toggle_tooth(tooth(12));
        chart.commit_issue(&mut draft, "Cavity", Some("x")).unwrap();
        let after_first = draft.tooth_issues.clone();

        let mut chart = ChartEditor::new();
        chart.toggle_tooth(tooth(11));
        chart.toggle_tooth(tooth(12));
        chart.commit_issue(&mut draft, "Cavity", Some("x")).unwrap();

        assert_eq!(draft.tooth_issues, after_first);
    }

    #[test]
    fn commit_rejects_empty_issue() {
        let mut chart = ChartEditor::new();
        let mut draft = TreatmentDraft::new();
        chart.toggle_tooth(tooth(11));

        assert_eq!(
            chart.commit_issue(&mut draft, "   ", None),
            Err(ChartError::EmptyIssue)
        );
        // Nothing written; selection kept for the retry.
        assert!(draft.tooth_issues.is_empty());
        assert!(chart.selected().contains(&tooth(11)));
    }

    #[test]
    fn commit_rejects_empty_selection() {
        let mut chart = ChartEditor::new();
        let mut draft = TreatmentDraft::new();

        assert_eq!(
            chart.commit_issue(&mut draft, "Cavity", None),
            Err(ChartError::EmptySelection)
        );
    }

    #[test]
    fn blank_comment_is_stored_as_absent() {
        let mut chart = ChartEditor::new();
        let mut draft = TreatmentDraft::new();
        chart.toggle_tooth(tooth(11));

        chart.commit_issue(&mut draft, "Cavity", Some("  ")).unwrap();

        assert_eq!(draft.tooth_issues.get(&tooth(11)), Some(&cavity(None)));
    }

    // =========================================================================
    // remove
    // =========================================================================

    #[test]
    fn remove_deletes_entries_for_selection() {
        let mut chart = ChartEditor::new();
        let mut draft = TreatmentDraft::new();
        draft.tooth_issues.insert(tooth(11), cavity(None));
        draft.tooth_issues.insert(tooth(12), cavity(None));
        chart.toggle_tooth(tooth(11));

        chart.remove_issue(&mut draft).expect("selection non-empty");

        assert!(!draft.tooth_issues.contains_key(&tooth(11)));
        assert!(draft.tooth_issues.contains_key(&tooth(12)));
        assert!(chart.selected().is_empty());
    }

    #[test]
    fn remove_is_a_no_op_for_unmapped_teeth() {
        let mut chart = ChartEditor::new();
        let mut draft = TreatmentDraft::new();
        chart.toggle_tooth(tooth(11));

        chart.remove_issue(&mut draft).expect("not an error");

        assert!(draft.tooth_issues.is_empty());
    }

    // =========================================================================
    // scheme switching
    // =========================================================================

    #[test]
    fn scheme_switch_preserves_entries_from_both_schemes() {
        let mut chart = ChartEditor::new();
        let mut draft = TreatmentDraft::new();

        chart.toggle_tooth(tooth(18));
        chart.commit_issue(&mut draft, "Cavity", None).unwrap();

        chart.set_scheme(NumberingScheme::Pediatric);
        chart.toggle_tooth(tooth(55));
        chart.commit_issue(&mut draft, "Early decay", None).unwrap();

        assert!(draft.tooth_issues.contains_key(&tooth(18)));
        assert!(draft.tooth_issues.contains_key(&tooth(55)));
    }

    #[test]
    fn scheme_switch_clears_working_selection_only() {
        let mut chart = ChartEditor::new();
        let mut draft = TreatmentDraft::new();
        draft.tooth_issues.insert(tooth(18), cavity(None));
        chart.toggle_tooth(tooth(17));

        chart.set_scheme(NumberingScheme::Pediatric);

        assert!(chart.selected().is_empty());
        assert!(draft.tooth_issues.contains_key(&tooth(18)));
    }

    #[test]
    fn cancel_clears_selection_without_touching_ledger() {
        let mut chart = ChartEditor::new();
        let mut draft = TreatmentDraft::new();
        draft.tooth_issues.insert(tooth(18), cavity(None));
        chart.toggle_tooth(tooth(18));
        chart.open_issue_editor(&draft.tooth_issues);

        chart.cancel();

        assert!(chart.selected().is_empty());
        assert_eq!(chart.editor(), None);
        assert!(draft.tooth_issues.contains_key(&tooth(18)));
    }
}

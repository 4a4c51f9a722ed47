//! Error adapter for converting FamTreeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use famtree::{FamTreeError, diagnostics::RelationIssue};

/// Adapter for [`FamTreeError`].
pub struct ErrorAdapter<'a>(pub &'a FamTreeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FamTreeError::Io(_) => "famtree::io",
            FamTreeError::Input(_) => "famtree::input",
            FamTreeError::Config(_) => "famtree::config",
            FamTreeError::Export(_) => "famtree::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            FamTreeError::Input(_) => {
                "input must be a .json or .toml snapshot with `people` and `relations`"
            }
            FamTreeError::Config(_) => "check the [layout] and [style] sections of the config file",
            FamTreeError::Io(_) | FamTreeError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Adapter for a relation the tree could not show as declared.
///
/// These are warnings: the chart is still rendered.
pub struct IssueAdapter<'a>(pub &'a RelationIssue);

impl fmt::Debug for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for IssueAdapter<'_> {}

impl MietteDiagnostic for IssueAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            RelationIssue::UnknownPerson { .. } => "famtree::relation::unknown_person",
            RelationIssue::SelfRelation { .. } => "famtree::relation::self",
            RelationIssue::DuplicateRelation { .. } => "famtree::relation::duplicate",
            RelationIssue::ExtraParent { .. } => "famtree::relation::extra_parent",
            RelationIssue::ExtraSpouse { .. } => "famtree::relation::extra_spouse",
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Warning)
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A failure that stopped the run.
    Error(ErrorAdapter<'a>),
    /// A data-quality warning.
    Issue(IssueAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Error(e) => fmt::Display::fmt(e, f),
            Reportable::Issue(i) => fmt::Display::fmt(i, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Error(e) => e.source(),
            Reportable::Issue(_) => None,
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Error(e) => e.code(),
            Reportable::Issue(i) => i.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Error(e) => e.severity(),
            Reportable::Issue(i) => i.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Error(e) => e.help(),
            Reportable::Issue(i) => i.help(),
        }
    }
}

/// Convert a [`FamTreeError`] into a list of reportable errors.
pub fn to_reportables(err: &FamTreeError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}

/// Convert relation issues into reportable warnings.
pub fn issues_to_reportables(issues: &[RelationIssue]) -> Vec<Reportable<'_>> {
    issues
        .iter()
        .map(|issue| Reportable::Issue(IssueAdapter(issue)))
        .collect()
}

#[cfg(test)]
mod tests {
    use famtree::model::Relation;

    use super::*;

    fn code_of(reportable: &Reportable<'_>) -> String {
        reportable.code().map(|c| c.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_error_codes() {
        let cases = [
            (FamTreeError::Input("bad".to_string()), "famtree::input"),
            (FamTreeError::Config("bad".to_string()), "famtree::config"),
            (
                FamTreeError::Io(std::io::Error::other("disk")),
                "famtree::io",
            ),
        ];

        for (err, expected) in &cases {
            let reportables = to_reportables(err);
            assert_eq!(reportables.len(), 1);
            assert_eq!(code_of(&reportables[0]), *expected);
        }
    }

    #[test]
    fn test_error_message_preserved() {
        let err = FamTreeError::Input("invalid JSON snapshot".to_string());

        let reportables = to_reportables(&err);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Input error: invalid JSON snapshot");
                assert!(e.help().is_some());
            }
            Reportable::Issue(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_issues_are_warnings() {
        let issues = vec![RelationIssue::SelfRelation {
            relation: Relation::spouse("a", "a"),
        }];

        let reportables = issues_to_reportables(&issues);
        assert_eq!(reportables.len(), 1);
        assert_eq!(code_of(&reportables[0]), "famtree::relation::self");
        assert_eq!(reportables[0].severity(), Some(miette::Severity::Warning));
        assert_eq!(reportables[0].to_string(), "spouse relation links a to themselves");
    }
}

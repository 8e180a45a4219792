//! Named configuration sections and their inheritance chain

use admiral_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A view-specific slice of a model's configuration
///
/// `list`, `export`, `show` and `edit` inherit from `base`;
/// `create`, `update`, `nested` and `modal` inherit from `edit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Base,
    List,
    Export,
    Show,
    Edit,
    Create,
    Update,
    Nested,
    Modal,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Base,
        Section::List,
        Section::Export,
        Section::Show,
        Section::Edit,
        Section::Create,
        Section::Update,
        Section::Nested,
        Section::Modal,
    ];

    /// Section this one inherits from
    pub fn parent(self) -> Option<Section> {
        match self {
            Section::Base => None,
            Section::List | Section::Export | Section::Show | Section::Edit => Some(Section::Base),
            Section::Create | Section::Update | Section::Nested | Section::Modal => {
                Some(Section::Edit)
            }
        }
    }

    /// Inheritance chain from `base` down to this section
    pub fn chain(self) -> Vec<Section> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent() {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Whether this section renders a form
    pub fn is_edit_family(self) -> bool {
        self == Section::Edit || self.parent() == Some(Section::Edit)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Base => "base",
            Section::List => "list",
            Section::Export => "export",
            Section::Show => "show",
            Section::Edit => "edit",
            Section::Create => "create",
            Section::Update => "update",
            Section::Nested => "nested",
            Section::Modal => "modal",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| {
                Error::invalid_option("section", s, format!("Unknown section '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain() {
        assert_eq!(Section::Base.chain(), vec![Section::Base]);
        assert_eq!(Section::List.chain(), vec![Section::Base, Section::List]);
        assert_eq!(
            Section::Modal.chain(),
            vec![Section::Base, Section::Edit, Section::Modal]
        );
    }

    #[test]
    fn test_edit_family() {
        assert!(Section::Edit.is_edit_family());
        assert!(Section::Create.is_edit_family());
        assert!(!Section::Show.is_edit_family());
        assert!(!Section::Base.is_edit_family());
    }

    #[test]
    fn test_parse() {
        assert_eq!("nested".parse::<Section>().unwrap(), Section::Nested);
        assert!("sidebar".parse::<Section>().is_err());
    }
}

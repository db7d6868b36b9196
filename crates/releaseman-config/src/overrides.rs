//! Command-line overrides and the merge rule table.

use crate::Config;

/// Values supplied on the command line.
///
/// `None` means "not supplied". An empty string is treated the same way so a
/// field that is already set never collapses to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// `--start_from`
    pub start_from_branch: Option<String>,
    /// `--release_on`
    pub release_on_branch: Option<String>,
    /// `--version`
    pub version: Option<String>,
    /// `--changelog-path`
    pub changelog_path: Option<String>,
}

type Rule = (fn(&ConfigOverrides) -> Option<&String>, fn(&mut Config) -> &mut String);

/// Field-by-field overlay: override wins over the base value.
fn rules() -> [Rule; 4] {
    [
        (
            |o| o.start_from_branch.as_ref(),
            |c| &mut c.release.start_from_branch,
        ),
        (
            |o| o.release_on_branch.as_ref(),
            |c| &mut c.release.release_on_branch,
        ),
        (|o| o.version.as_ref(), |c| &mut c.release.version),
        (|o| o.changelog_path.as_ref(), |c| &mut c.changelog.path),
    ]
}

impl ConfigOverrides {
    /// Overlays these overrides on `base`.
    ///
    /// Every non-empty override replaces the base value; everything else,
    /// including `changes` and the templates, is kept from `base`.
    #[must_use]
    pub fn merge(&self, base: Config) -> Config {
        let mut merged = base;
        for (get, field) in rules() {
            if let Some(value) = get(self).filter(|v| !v.is_empty()) {
                value.clone_into(field(&mut merged));
            }
        }
        merged
    }
}

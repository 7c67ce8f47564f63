//! External module references supplied by the host loader

use serde::{Deserialize, Serialize};

/// How the body uses an external module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportKind {
    /// The body reads members of the module object (`_.map`)
    #[default]
    Namespace,
    /// The body uses the binding as the module's default export
    Default,
    /// The body uses both the module object and `<name>__default`
    NamespaceAndDefault,
}

/// An external module the bundle expects the host to supply.
///
/// `name` is the binding the body uses for the module; it becomes the factory
/// parameter. Identifiers are unique per bundle and their order fixes the
/// order of generated arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalReference {
    /// Module specifier, e.g. `lodash` or `./vendor/dom.js`
    pub id: String,
    /// Local binding name
    pub name: String,
    #[serde(default)]
    pub kind: ImportKind,
}

impl ExternalReference {
    /// A module used through its namespace object
    pub fn namespace(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ImportKind::Namespace,
        }
    }

    /// A module used only through its default export
    pub fn default_import(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ImportKind::Default,
        }
    }

    /// A module used through both its namespace and its default export
    pub fn namespace_and_default(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ImportKind::NamespaceAndDefault,
        }
    }

    /// Binding holding the default export when it differs from `name`
    pub fn default_binding(&self) -> Option<String> {
        match self.kind {
            ImportKind::NamespaceAndDefault => Some(format!("{}__default", self.name)),
            ImportKind::Namespace | ImportKind::Default => None,
        }
    }

    /// Every binding this reference introduces into the body
    pub fn bindings(&self) -> Vec<String> {
        let mut bindings = vec![self.name.clone()];
        bindings.extend(self.default_binding());
        bindings
    }

    /// Whether the default export is consumed
    pub fn uses_default(&self) -> bool {
        !matches!(self.kind, ImportKind::Namespace)
    }
}

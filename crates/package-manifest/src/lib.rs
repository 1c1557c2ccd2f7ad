use std::collections::HashMap;

use derive_more::{Display, Error, From};
use miette::Diagnostic;
use serde_json::{Map, Value};
use spartan_tree::{read_json, Tree, TreeError};
use strum::IntoStaticStr;

/// Conventional name of the manifest file at the root of a project.
pub const PACKAGE_JSON: &str = "package.json";

#[derive(Debug, Display, Error, From, Diagnostic)]
#[non_exhaustive]
pub enum PackageManifestError {
    #[diagnostic(transparent)]
    Tree(TreeError),

    #[from(ignore)]
    #[display("Failed to serialize {_0}: {_1}")]
    #[diagnostic(code(spartan_package_manifest::serialization_error))]
    Serialization(#[error(not(source))] String, #[error(source)] serde_json::Error),

    #[from(ignore)]
    #[display("invalid attribute: {_0}")]
    #[diagnostic(code(spartan_package_manifest::invalid_attribute))]
    InvalidAttribute(#[error(not(source))] String),

    #[from(ignore)]
    #[display("No package.json was found in {_0}")]
    #[diagnostic(code(spartan_package_manifest::no_import_manifest_found))]
    NoImporterManifestFound(#[error(not(source))] String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum DependencyGroup {
    #[strum(serialize = "dependencies")]
    Prod,
    #[strum(serialize = "devDependencies")]
    Dev,
    #[strum(serialize = "optionalDependencies")]
    Optional,
    #[strum(serialize = "peerDependencies")]
    Peer,
}

/// Content of a `package.json` file and its path inside the tree.
///
/// The content is kept as a loose JSON value, so fields this crate knows nothing about
/// (and the order of all keys) survive a read-modify-write cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    path: String,
    value: Value,
}

impl PackageManifest {
    pub fn from_tree(tree: &dyn Tree, path: &str) -> Result<PackageManifest, PackageManifestError> {
        if !tree.exists(path) {
            return Err(PackageManifestError::NoImporterManifestFound(path.to_string()));
        }

        let value = read_json(tree, path)?;
        Ok(PackageManifest { path: path.to_string(), value })
    }

    pub fn from_value(path: &str, value: Value) -> Self {
        PackageManifest { path: path.to_string(), value }
    }

    /// Serialize like `JSON.stringify(manifest, null, 2)`.
    pub fn to_json_string(&self) -> Result<String, PackageManifestError> {
        serde_json::to_string_pretty(&self.value)
            .map_err(|error| PackageManifestError::Serialization(self.path.clone(), error))
    }

    pub fn save(&self, tree: &mut dyn Tree) -> Result<(), PackageManifestError> {
        let contents = self.to_json_string()?;
        tree.write(&self.path, contents.as_bytes())?;
        Ok(())
    }

    /// Raw entries of every object group in `groups`, in order.
    pub fn dependencies<'a>(
        &'a self,
        groups: impl IntoIterator<Item = DependencyGroup> + 'a,
    ) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        // non-object groups are skipped, not reported
        groups
            .into_iter()
            .flat_map(|group| self.value.get::<&str>(group.into()))
            .flat_map(|dependencies| dependencies.as_object())
            .flatten()
            .map(|(name, version)| (name.as_str(), version))
    }

    /// Every declared dependency with `devDependencies` overriding `dependencies` on name clashes.
    ///
    /// The override happens before non-string entries are dropped, so a non-string entry in
    /// `devDependencies` hides the range from `dependencies`.
    pub fn merged_dependencies(&self) -> HashMap<&'_ str, &'_ str> {
        self.dependencies([DependencyGroup::Prod, DependencyGroup::Dev])
            .collect::<HashMap<_, _>>()
            .into_iter()
            .filter_map(|(name, version)| Some((name, version.as_str()?)))
            .collect()
    }

    /// Version range of `name` in a single group.
    pub fn dependency(&self, name: &str, group: DependencyGroup) -> Option<&'_ str> {
        self.value.get::<&str>(group.into())?.get(name)?.as_str()
    }

    pub fn add_dependency(
        &mut self,
        name: &str,
        version: &str,
        dependency_group: DependencyGroup,
    ) -> Result<(), PackageManifestError> {
        let dependency_type: &str = dependency_group.into();
        if let Some(field) = self.value.get_mut(dependency_type) {
            if let Some(dependencies) = field.as_object_mut() {
                dependencies.insert(name.to_string(), Value::String(version.to_string()));
            } else {
                return Err(PackageManifestError::InvalidAttribute(format!(
                    "{dependency_type} attribute should be an object"
                )));
            }
        } else if let Some(manifest) = self.value.as_object_mut() {
            let mut dependencies = Map::<String, Value>::new();
            dependencies.insert(name.to_string(), Value::String(version.to_string()));
            manifest.insert(dependency_type.to_string(), Value::Object(dependencies));
        } else {
            return Err(PackageManifestError::InvalidAttribute(
                "package.json should contain an object".to_string(),
            ));
        }
        Ok(())
    }
}

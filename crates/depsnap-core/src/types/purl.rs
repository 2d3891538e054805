//! Canonical package identifiers.
//!
//! Identifiers follow the package URL scheme:
//! `pkg:<type>/<namespace>/<name>@<version>`. Each component is
//! percent-encoded so that the canonical string is unambiguous and stable.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

use super::ModuleCoordinates;
use crate::error::{DepsnapError, DepsnapResult};

/// Bytes that stay unencoded inside a component: `[A-Za-z0-9.-_~]`
const PURL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// Canonical, versioned package identifier.
///
/// Equality, ordering and hashing are those of the canonical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PackageUrl(String);

impl PackageUrl {
    /// Package type used for every module resolved by the build
    pub const MAVEN: &'static str = "maven";

    /// Build the identifier of a Maven module version.
    ///
    /// A module without a group uses its own name as namespace.
    pub fn maven(coordinates: &ModuleCoordinates) -> DepsnapResult<Self> {
        let namespace = if coordinates.group.trim().is_empty() {
            coordinates.module.as_str()
        } else {
            coordinates.group.as_str()
        };
        Self::build(
            Self::MAVEN,
            Some(namespace),
            &coordinates.module,
            &coordinates.version,
        )
        .map_err(|e| match e {
            DepsnapError::MalformedIdentifier { reason, .. } => {
                DepsnapError::malformed(coordinates.to_string(), reason)
            },
            other => other,
        })
    }

    /// Build an identifier from its individual components
    pub fn build(
        package_type: &str,
        namespace: Option<&str>,
        name: &str,
        version: &str,
    ) -> DepsnapResult<Self> {
        let display = format!("{}:{}:{}", namespace.unwrap_or(""), name, version);

        if !Self::is_valid_type(package_type) {
            return Err(DepsnapError::malformed(
                display,
                format!("unsupported package type '{}'", package_type.escape_debug()),
            ));
        }
        validate_component(&display, "name", name)?;
        validate_component(&display, "version", version)?;

        let mut purl = format!("pkg:{}/", package_type.to_ascii_lowercase());
        if let Some(namespace) = namespace.filter(|ns| !ns.trim().is_empty()) {
            reject_control_chars(&display, "namespace", namespace)?;
            purl.push_str(&encode(namespace));
            purl.push('/');
        }
        purl.push_str(&encode(name));
        purl.push('@');
        purl.push_str(&encode(version));

        Ok(Self(purl))
    }

    /// The canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if a package type is acceptable (`[a-zA-Z.+-][a-zA-Z0-9.+-]*`)
    pub fn is_valid_type(package_type: &str) -> bool {
        let mut chars = package_type.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '.' || first == '+' || first == '-' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '+' || c == '-')
            },
            _ => false,
        }
    }
}

fn validate_component(display: &str, component: &str, value: &str) -> DepsnapResult<()> {
    if value.trim().is_empty() {
        return Err(DepsnapError::malformed(
            display,
            format!("{} is empty", component),
        ));
    }
    reject_control_chars(display, component, value)
}

fn reject_control_chars(display: &str, component: &str, value: &str) -> DepsnapResult<()> {
    match value.chars().find(|c| c.is_control()) {
        Some(c) => Err(DepsnapError::malformed(
            display.escape_debug().to_string(),
            format!("{} contains unsupported character {:?}", component, c),
        )),
        None => Ok(()),
    }
}

fn encode(component: &str) -> String {
    utf8_percent_encode(component, PURL_COMPONENT).to_string()
}

impl fmt::Display for PackageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PackageUrl {
    fn borrow(&self) -> &str {
        &self.0
    }
}

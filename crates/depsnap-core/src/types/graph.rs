//! Resolved dependency graphs handed over by the host resolution engine.
//!
//! A graph is an arena of components; edges are indices into the arena, so
//! a component can be shared by any number of parents, and a misbehaving
//! producer can even express cycles. Nothing here assumes acyclicity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DependencyScope, ModuleCoordinates};
use crate::error::{DepsnapError, DepsnapResult};

/// Position of a component inside its graph's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentIndex(pub usize);

impl fmt::Display for ComponentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A resolved module version and the components it depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedComponent {
    #[serde(flatten)]
    pub coordinates: ModuleCoordinates,
    /// Selected dependencies, in the order the host reported them
    #[serde(default)]
    pub dependencies: Vec<ComponentIndex>,
    /// A project of the build itself rather than a published package
    #[serde(default)]
    pub project: bool,
}

/// Resolved dependency graph of a single configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedGraph {
    #[serde(default)]
    pub components: Vec<ResolvedComponent>,
    /// First-level dependencies declared by the configuration
    #[serde(default)]
    pub roots: Vec<ComponentIndex>,
}

impl ResolvedGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component to the arena and return its index
    pub fn add_component(&mut self, coordinates: ModuleCoordinates) -> ComponentIndex {
        self.push(coordinates, false)
    }

    /// Add a project of the build (e.g. a sibling subproject) to the arena
    pub fn add_project(&mut self, coordinates: ModuleCoordinates) -> ComponentIndex {
        self.push(coordinates, true)
    }

    fn push(&mut self, coordinates: ModuleCoordinates, project: bool) -> ComponentIndex {
        let index = ComponentIndex(self.components.len());
        self.components.push(ResolvedComponent {
            coordinates,
            dependencies: Vec::new(),
            project,
        });
        index
    }

    /// Record that `from` depends on `to`
    pub fn add_dependency(&mut self, from: ComponentIndex, to: ComponentIndex) -> DepsnapResult<()> {
        self.component(to)?;
        let component = self.component_mut(from)?;
        component.dependencies.push(to);
        Ok(())
    }

    /// Declare a component as a first-level dependency
    pub fn add_root(&mut self, root: ComponentIndex) -> DepsnapResult<()> {
        self.component(root)?;
        self.roots.push(root);
        Ok(())
    }

    /// Look up a component, failing on an index outside the arena
    pub fn component(&self, index: ComponentIndex) -> DepsnapResult<&ResolvedComponent> {
        self.components
            .get(index.0)
            .ok_or_else(|| self.dangling(index))
    }

    fn component_mut(&mut self, index: ComponentIndex) -> DepsnapResult<&mut ResolvedComponent> {
        if index.0 >= self.components.len() {
            return Err(self.dangling(index));
        }
        Ok(&mut self.components[index.0])
    }

    fn dangling(&self, index: ComponentIndex) -> DepsnapError {
        DepsnapError::InvalidGraph {
            reason: format!(
                "component {} does not exist ({} components)",
                index,
                self.components.len()
            ),
        }
    }

    /// Check if the configuration declares no dependencies at all
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of components in the arena
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

fn default_project_path() -> String {
    ":".to_string()
}

/// One resolution-complete event: a configuration and its resolved graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedConfiguration {
    /// Path of the project owning the configuration (`:` for the root)
    #[serde(default = "default_project_path")]
    pub project_path: String,
    /// Configuration name (e.g. "runtimeClasspath")
    pub configuration_name: String,
    /// Scope of the configuration, when the host knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<DependencyScope>,
    pub graph: ResolvedGraph,
}

impl ResolvedConfiguration {
    /// Create an event for a configuration of the given project
    pub fn new(
        project_path: impl Into<String>,
        configuration_name: impl Into<String>,
        graph: ResolvedGraph,
    ) -> Self {
        Self {
            project_path: project_path.into(),
            configuration_name: configuration_name.into(),
            scope: None,
            graph,
        }
    }

    /// Tag the configuration with a scope
    pub fn with_scope(mut self, scope: DependencyScope) -> Self {
        self.scope = Some(scope);
        self
    }
}

//! Per-configuration graph traversal.
//!
//! The walker flattens one `ResolvedGraph` into one record per distinct
//! package identifier. Identifiers already visited during the walk are not
//! re-emitted nor descended into again, which bounds the walk by the number
//! of distinct packages and makes it terminate on cyclic input.
//!
//! Components that are projects of the build itself are walked through but
//! never recorded: their dependencies are reported as direct dependencies
//! of the build, and no edge points at the project.

use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use depsnap_core::types::{
    ComponentIndex, DependencyScope, ModuleCoordinates, PackageUrl, Relationship,
    ResolvedConfiguration, ResolvedGraph,
};

use crate::classify::classify;
use crate::ExtractResult;

/// One package observed while walking a configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkRecord {
    pub purl: PackageUrl,
    /// Coordinates the identifier was built from, used for provenance lookup
    pub module: ModuleCoordinates,
    pub relationship: Relationship,
    /// Scope of the configuration the package was resolved in, if known
    pub scope: Option<DependencyScope>,
    /// Identifiers of the selected dependencies, in source order, no self-edge
    pub dependencies: Vec<PackageUrl>,
}

/// Stateless walker over resolved graphs
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphWalker;

impl GraphWalker {
    /// Create a new walker
    pub fn new() -> Self {
        Self
    }

    /// Walk a configuration's graph depth-first from each root in order.
    ///
    /// Fails without emitting anything if any reachable component has
    /// malformed coordinates or references a component outside the graph.
    pub fn walk(&self, graph: &ResolvedGraph) -> ExtractResult<Vec<WalkRecord>> {
        let mut walk = Walk::new(graph);
        for &root in &graph.roots {
            walk.walk_from(root)?;
        }

        debug!(
            "Walked {} components into {} records",
            graph.component_count(),
            walk.records.len()
        );

        Ok(walk
            .records
            .into_values()
            .map(|pending| pending.into_record())
            .collect())
    }

    /// Walk a configuration's graph, tagging every record with its scope
    pub fn walk_configuration(
        &self,
        configuration: &ResolvedConfiguration,
    ) -> ExtractResult<Vec<WalkRecord>> {
        let mut records = self.walk(&configuration.graph)?;
        for record in &mut records {
            record.scope = configuration.scope;
        }
        Ok(records)
    }
}

struct PendingRecord {
    purl: PackageUrl,
    module: ModuleCoordinates,
    relationship: Relationship,
    dependencies: IndexSet<PackageUrl>,
}

impl PendingRecord {
    fn into_record(self) -> WalkRecord {
        WalkRecord {
            purl: self.purl,
            module: self.module,
            relationship: self.relationship,
            scope: None,
            dependencies: self.dependencies.into_iter().collect(),
        }
    }
}

/// A component whose dependencies are still being visited
struct Frame {
    index: ComponentIndex,
    /// `None` for a project of the build
    purl: Option<PackageUrl>,
    next_child: usize,
}

struct Walk<'g> {
    graph: &'g ResolvedGraph,
    /// Identifier per component, built once per walk
    identifiers: HashMap<ComponentIndex, PackageUrl>,
    /// Visited set and output, in first-visit order
    records: IndexMap<PackageUrl, PendingRecord>,
    /// Visited project components
    projects: HashSet<ComponentIndex>,
}

impl<'g> Walk<'g> {
    fn new(graph: &'g ResolvedGraph) -> Self {
        Self {
            graph,
            identifiers: HashMap::new(),
            records: IndexMap::new(),
            projects: HashSet::new(),
        }
    }

    fn identifier(&mut self, index: ComponentIndex) -> ExtractResult<PackageUrl> {
        if let Some(purl) = self.identifiers.get(&index) {
            return Ok(purl.clone());
        }
        let component = self.graph.component(index)?;
        let purl = PackageUrl::maven(&component.coordinates)?;
        self.identifiers.insert(index, purl.clone());
        Ok(purl)
    }

    /// Mark a component visited. Returns false if its identifier was
    /// already visited, after escalating the existing record.
    fn enter(
        &mut self,
        index: ComponentIndex,
        purl: &PackageUrl,
        relationship: Relationship,
    ) -> ExtractResult<bool> {
        if let Some(existing) = self.records.get_mut(purl) {
            existing.relationship = existing.relationship.escalate(relationship);
            return Ok(false);
        }

        let component = self.graph.component(index)?;
        self.records.insert(
            purl.clone(),
            PendingRecord {
                purl: purl.clone(),
                module: component.coordinates.clone(),
                relationship,
                dependencies: IndexSet::new(),
            },
        );
        Ok(true)
    }

    /// Visit a component reached with `relationship`. Returns the frame to
    /// descend into, or `None` if it was visited before.
    fn open(&mut self, index: ComponentIndex, relationship: Relationship) -> ExtractResult<Option<Frame>> {
        if self.graph.component(index)?.project {
            let first_visit = self.projects.insert(index);
            return Ok(first_visit.then_some(Frame {
                index,
                purl: None,
                next_child: 0,
            }));
        }

        let purl = self.identifier(index)?;
        if !self.enter(index, &purl, relationship)? {
            return Ok(None);
        }
        Ok(Some(Frame {
            index,
            purl: Some(purl),
            next_child: 0,
        }))
    }

    fn walk_from(&mut self, root: ComponentIndex) -> ExtractResult<()> {
        let Some(frame) = self.open(root, classify(true))? else {
            return Ok(());
        };
        let mut stack = vec![frame];

        while let Some(mut frame) = stack.pop() {
            let component = self.graph.component(frame.index)?;
            let Some(&child) = component.dependencies.get(frame.next_child) else {
                continue;
            };
            frame.next_child += 1;

            if let Some(parent) = &frame.purl {
                if !self.graph.component(child)?.project {
                    let child_purl = self.identifier(child)?;
                    if &child_purl != parent {
                        if let Some(record) = self.records.get_mut(parent) {
                            record.dependencies.insert(child_purl);
                        }
                    }
                }
            }
            // Dependencies declared by a project of the build are first-level
            let opened = self.open(child, classify(frame.purl.is_none()))?;

            stack.push(frame);
            if let Some(child_frame) = opened {
                stack.push(child_frame);
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        // Arbitrary edges, cycles and self-loops included: the walk
        // terminates with exactly one record per reachable identifier.
        #[test]
        fn walk_emits_each_reachable_identifier_once(
            num_components in 1usize..12,
            edges in prop::collection::vec((0usize..12, 0usize..12), 0..40),
            roots in prop::collection::vec(0usize..12, 1..4),
        ) {
            let mut graph = ResolvedGraph::new();
            let indices: Vec<_> = (0..num_components)
                .map(|i| graph.add_component(ModuleCoordinates::new("g", format!("m{}", i % 8), "1.0")))
                .collect();
            for (from, to) in edges {
                if from < num_components && to < num_components {
                    graph.add_dependency(indices[from], indices[to]).unwrap();
                }
            }
            for root in roots {
                if root < num_components {
                    graph.add_root(indices[root]).unwrap();
                }
            }

            let records = GraphWalker::new().walk(&graph).unwrap();

            // Reachable identifiers by plain breadth-first search
            let mut reachable = HashSet::new();
            let mut seen = HashSet::new();
            let mut queue: Vec<_> = graph.roots.clone();
            while let Some(index) = queue.pop() {
                if !seen.insert(index) {
                    continue;
                }
                let component = graph.component(index).unwrap();
                reachable.insert(PackageUrl::maven(&component.coordinates).unwrap());
                queue.extend(component.dependencies.iter().copied());
            }

            let emitted: HashSet<_> = records.iter().map(|r| r.purl.clone()).collect();
            prop_assert_eq!(emitted.len(), records.len(), "an identifier was emitted twice");

            // Identifiers shared by several slots may hide the later slots'
            // children, so emitted is a subset of slot-wise reachability.
            prop_assert!(emitted.is_subset(&reachable));
            if num_components <= 8 {
                prop_assert_eq!(&emitted, &reachable);
            }
            for record in &records {
                prop_assert!(!record.dependencies.contains(&record.purl));
                for dependency in &record.dependencies {
                    prop_assert!(emitted.contains(dependency), "edge to unvisited identifier");
                }
            }
            let direct: HashSet<_> = graph
                .roots
                .iter()
                .map(|&r| PackageUrl::maven(&graph.component(r).unwrap().coordinates).unwrap())
                .collect();
            for record in &records {
                prop_assert_eq!(record.relationship.is_direct(), direct.contains(&record.purl));
            }
        }
    }
}

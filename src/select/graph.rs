//! Minimum-cost distinguishing-subgraph search (Krahmer, van Erk & Verleg).
//!
//! Builds one directed multigraph over the referent and all confusors:
//! entities are nodes, resource-valued facts are directed edges labeled by
//! predicate, literal-valued facts are self-loop edges labeled by
//! (predicate, literal). A candidate subgraph grows one edge at a time from
//! the referent; its cost is node count plus edge count. A candidate is a
//! solution when no other node can impersonate the referent under a
//! structure-preserving relabeling, and branch-and-bound keeps the cheapest
//! solution found.
//!
//! Both the outer search and the inner matcher are worst-case exponential,
//! so every recursive entry and every node/edge loop checks a wall-clock
//! deadline and aborts with `Timeout` the instant the budget is exceeded.
//!
//! Reference: Krahmer, van Erk & Verleg, "Graph-based generation of
//! referring expressions" (Computational Linguistics 29(1), 2003).

use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::{Duration, Instant};

use oxigraph::model::{Literal, NamedNode, Term};
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::SelectError;
use crate::expression::ReferringExpression;
use crate::priorities::PriorityConfig;
use crate::store::{FactStore, Statement, local_name};

use super::{Selector, confusor_statements};

/// Default wall-clock budget for one resolution.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Branch-and-bound subgraph search selector.
pub struct GraphSelector {
    config: PriorityConfig,
    timeout: Duration,
}

impl GraphSelector {
    /// Create a selector over the given priority configuration.
    pub fn new(config: PriorityConfig) -> Self {
        Self {
            config,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the wall-clock budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Selector for GraphSelector {
    fn resolve(
        &self,
        referent: &NamedNode,
        confusors: &[NamedNode],
        store: &dyn FactStore,
    ) -> Result<ReferringExpression, SelectError> {
        let deadline = Deadline::start(self.timeout);

        // The priority order is a branch heuristic only: a referent type
        // without a configured priority list is not an error here.
        let heuristic = Heuristic::for_referent(&self.config, referent, store)?;

        confusor_statements(confusors, store)?;

        let full = FullGraph::build(referent, confusors, store, &heuristic.ignored)?;
        tracing::debug!(
            nodes = full.graph.node_count(),
            edges = full.graph.edge_count(),
            "relation graph built"
        );

        let candidate = Candidate::seed(full.referent);
        let search = Search {
            full: &full,
            heuristic: &heuristic,
            deadline: &deadline,
        };
        let best = search.run(&candidate, None)?;

        let Some(solution) = best else {
            return Err(SelectError::RemainingConfusorsUnresolved {
                remaining: confusors.iter().map(|c| c.as_str().to_string()).collect(),
            });
        };
        tracing::debug!(cost = solution.cost, "minimum-cost subgraph found");

        let mut expression = ReferringExpression::new(referent.clone());
        for &edge in &solution.edges {
            let Some((source, target)) = full.graph.edge_endpoints(edge) else {
                continue;
            };
            let subject = full.graph[source].clone();
            match &full.graph[edge] {
                EdgeLabel::Relation(predicate) => {
                    expression.add_entry(
                        Some(subject),
                        predicate.clone(),
                        Some(Term::from(full.graph[target].clone())),
                        false,
                    );
                }
                EdgeLabel::Attribute(predicate, value) => {
                    expression.add_entry(
                        Some(subject),
                        predicate.clone(),
                        Some(Term::from(value.clone())),
                        false,
                    );
                }
            }
        }
        Ok(expression)
    }
}

// ---------------------------------------------------------------------------
// Deadline
// ---------------------------------------------------------------------------

/// Cooperative wall-clock budget, polled at every recursion and loop step.
struct Deadline {
    end: Instant,
    budget: Duration,
}

impl Deadline {
    fn start(budget: Duration) -> Self {
        Self {
            end: Instant::now() + budget,
            budget,
        }
    }

    fn check(&self) -> Result<(), SelectError> {
        if Instant::now() >= self.end {
            return Err(SelectError::Timeout {
                budget_ms: self.budget.as_millis() as u64,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Relation graph
// ---------------------------------------------------------------------------

/// Edge labels: a bare predicate for entity-to-entity relations, a
/// (predicate, literal) pair for attribute self-loops.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum EdgeLabel {
    Relation(NamedNode),
    Attribute(NamedNode, Literal),
}

impl EdgeLabel {
    fn predicate(&self) -> &NamedNode {
        match self {
            EdgeLabel::Relation(p) | EdgeLabel::Attribute(p, _) => p,
        }
    }

    fn value_key(&self) -> &str {
        match self {
            EdgeLabel::Relation(_) => "",
            EdgeLabel::Attribute(_, v) => v.value(),
        }
    }
}

/// The full relation multigraph over referent + confusors.
struct FullGraph {
    graph: DiGraph<NamedNode, EdgeLabel>,
    referent: NodeIndex,
}

impl FullGraph {
    /// One edge per distinct statement about any of the entities; duplicate
    /// statements are consumed once, ignore-listed predicates not at all.
    fn build(
        referent: &NamedNode,
        confusors: &[NamedNode],
        store: &dyn FactStore,
        ignored: &HashSet<String>,
    ) -> Result<Self, SelectError> {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<NamedNode, NodeIndex> = HashMap::new();
        let mut consumed: HashSet<Statement> = HashSet::new();

        let referent_ix = Self::ensure_node(&mut graph, &mut nodes, referent);

        let mut entities: Vec<&NamedNode> = Vec::with_capacity(confusors.len() + 1);
        entities.extend(confusors);
        entities.push(referent);

        for entity in entities {
            for stmt in store.about(entity)? {
                if !consumed.insert(stmt.clone()) {
                    continue;
                }
                if ignored.contains(local_name(&stmt.predicate)) {
                    continue;
                }
                let source = Self::ensure_node(&mut graph, &mut nodes, &stmt.subject);
                match &stmt.object {
                    Term::NamedNode(object) => {
                        let target = Self::ensure_node(&mut graph, &mut nodes, object);
                        graph.add_edge(source, target, EdgeLabel::Relation(stmt.predicate));
                    }
                    Term::Literal(value) => {
                        graph.add_edge(
                            source,
                            source,
                            EdgeLabel::Attribute(stmt.predicate, value.clone()),
                        );
                    }
                    _ => {}
                }
            }
        }

        Ok(Self {
            graph,
            referent: referent_ix,
        })
    }

    fn ensure_node(
        graph: &mut DiGraph<NamedNode, EdgeLabel>,
        nodes: &mut HashMap<NamedNode, NodeIndex>,
        entity: &NamedNode,
    ) -> NodeIndex {
        if let Some(&ix) = nodes.get(entity) {
            return ix;
        }
        let ix = graph.add_node(entity.clone());
        nodes.insert(entity.clone(), ix);
        ix
    }

    /// Labels on edges `from → to`.
    fn labels(&self, from: NodeIndex, to: NodeIndex) -> HashSet<&EdgeLabel> {
        self.graph
            .edges_directed(from, Direction::Outgoing)
            .filter(|e| e.target() == to)
            .map(|e| e.weight())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Candidate subgraph
// ---------------------------------------------------------------------------

/// A connected subgraph of the full graph, grown from the referent.
#[derive(Clone)]
struct Candidate {
    nodes: BTreeSet<NodeIndex>,
    /// Insertion order, preserved for description read-out.
    edges: Vec<EdgeIndex>,
    edge_set: HashSet<EdgeIndex>,
}

impl Candidate {
    fn seed(referent: NodeIndex) -> Self {
        Self {
            nodes: BTreeSet::from([referent]),
            edges: Vec::new(),
            edge_set: HashSet::new(),
        }
    }

    fn cost(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// Labels on candidate edges `from → to`.
    fn labels(&self, graph: &DiGraph<NamedNode, EdgeLabel>, from: NodeIndex, to: NodeIndex) -> HashSet<EdgeLabel> {
        self.edges
            .iter()
            .filter(|&&e| graph.edge_endpoints(e) == Some((from, to)))
            .map(|&e| graph[e].clone())
            .collect()
    }

    /// Nodes adjacent to `node` through candidate edges, either direction.
    fn adjacent(&self, graph: &DiGraph<NamedNode, EdgeLabel>, node: NodeIndex) -> BTreeSet<NodeIndex> {
        let mut out = BTreeSet::new();
        for &e in &self.edges {
            if let Some((source, target)) = graph.edge_endpoints(e) {
                if source == node && target != node {
                    out.insert(target);
                }
                if target == node && source != node {
                    out.insert(source);
                }
            }
        }
        out
    }

    fn with_edge(&self, graph: &DiGraph<NamedNode, EdgeLabel>, edge: EdgeIndex) -> Option<Self> {
        let (source, target) = graph.edge_endpoints(edge)?;
        let mut next = self.clone();
        next.nodes.insert(source);
        next.nodes.insert(target);
        next.edges.push(edge);
        next.edge_set.insert(edge);
        Some(next)
    }
}

// ---------------------------------------------------------------------------
// Branch heuristic
// ---------------------------------------------------------------------------

/// Priority ranks for edge ordering plus the ignore-list, resolved from the
/// first referent type with a configured priority list. Optional: with no
/// matching type the ordering is purely lexical and nothing is ignored.
struct Heuristic {
    rank: HashMap<String, usize>,
    ignored: HashSet<String>,
}

impl Heuristic {
    fn for_referent(
        config: &PriorityConfig,
        referent: &NamedNode,
        store: &dyn FactStore,
    ) -> Result<Self, SelectError> {
        for ty in store.types_of(referent)? {
            if let Some(priorities) = config.priorities_for(ty.as_str()) {
                let mut rank = HashMap::new();
                for (i, name) in priorities.iter().enumerate() {
                    rank.entry(name.clone()).or_insert(i);
                }
                let ignored = config.ignored_for(ty.as_str()).iter().cloned().collect();
                tracing::debug!(type_iri = ty.as_str(), "edge order follows priorities");
                return Ok(Self { rank, ignored });
            }
        }
        Ok(Self {
            rank: HashMap::new(),
            ignored: HashSet::new(),
        })
    }

    fn rank_of(&self, label: &EdgeLabel) -> usize {
        self.rank
            .get(local_name(label.predicate()))
            .copied()
            .unwrap_or(usize::MAX)
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

struct Solution {
    edges: Vec<EdgeIndex>,
    cost: usize,
}

struct Search<'a> {
    full: &'a FullGraph,
    heuristic: &'a Heuristic,
    deadline: &'a Deadline,
}

impl Search<'_> {
    /// Branch-and-bound over candidate subgraphs. The best solution so far
    /// is threaded through as an accumulator; candidates at least as costly
    /// are pruned before the distractor check.
    fn run(
        &self,
        candidate: &Candidate,
        mut best: Option<Solution>,
    ) -> Result<Option<Solution>, SelectError> {
        self.deadline.check()?;

        let cost = candidate.cost();
        if let Some(b) = &best {
            if b.cost <= cost {
                return Ok(best);
            }
        }

        if !self.has_distractor(candidate)? {
            return Ok(Some(Solution {
                edges: candidate.edges.clone(),
                cost,
            }));
        }

        for edge in self.branch_edges(candidate) {
            self.deadline.check()?;
            let Some(next) = candidate.with_edge(&self.full.graph, edge) else {
                continue;
            };
            best = self.run(&next, best)?;
        }
        Ok(best)
    }

    /// Does any non-referent node still pass for the referent under the
    /// candidate's constraints?
    fn has_distractor(&self, candidate: &Candidate) -> Result<bool, SelectError> {
        for node in self.full.graph.node_indices() {
            self.deadline.check()?;
            if node == self.full.referent {
                continue;
            }
            if self.matches_as(candidate, node)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Edges leaving any candidate node that are not yet in the candidate,
    /// ordered by the priority heuristic (rank, then lexical tie-breaks).
    fn branch_edges(&self, candidate: &Candidate) -> Vec<EdgeIndex> {
        let mut edges: Vec<EdgeIndex> = Vec::new();
        for &node in &candidate.nodes {
            for edge in self.full.graph.edges_directed(node, Direction::Outgoing) {
                if !candidate.edge_set.contains(&edge.id()) {
                    edges.push(edge.id());
                }
            }
        }
        edges.sort_by_key(|&e| {
            let label = &self.full.graph[e];
            let (source, target) = self
                .full
                .graph
                .edge_endpoints(e)
                .map(|(s, t)| {
                    (
                        self.full.graph[s].as_str().to_string(),
                        self.full.graph[t].as_str().to_string(),
                    )
                })
                .unwrap_or_default();
            (
                self.heuristic.rank_of(label),
                local_name(label.predicate()).to_string(),
                label.predicate().as_str().to_string(),
                label.value_key().to_string(),
                source,
                target,
            )
        });
        edges
    }

    /// Can `other` impersonate the referent? True when an injective mapping
    /// of all candidate nodes exists, rooted at referent → other, under
    /// which every candidate edge's label set is contained in the full
    /// graph's label set between the mapped endpoints, in both directions,
    /// and self-loop label sets are contained in the images'.
    fn matches_as(&self, candidate: &Candidate, other: NodeIndex) -> Result<bool, SelectError> {
        if !self.loops_contained(candidate, self.full.referent, other) {
            return Ok(false);
        }
        let mut mapping = HashMap::from([(self.full.referent, other)]);
        let frontier = candidate.adjacent(&self.full.graph, self.full.referent);
        self.extend_mapping(candidate, &mut mapping, &frontier)
    }

    /// Candidate self-loop labels on `node` must all appear on `image`.
    fn loops_contained(&self, candidate: &Candidate, node: NodeIndex, image: NodeIndex) -> bool {
        let required = candidate.labels(&self.full.graph, node, node);
        let available = self.full.labels(image, image);
        required.iter().all(|label| available.contains(label))
    }

    /// Backtracking extension of a partial injective node mapping: take the
    /// first unmapped frontier node, try every unused full-graph node as its
    /// image, check label containment against all mapped nodes in both
    /// directions, recurse, undo on failure.
    fn extend_mapping(
        &self,
        candidate: &Candidate,
        mapping: &mut HashMap<NodeIndex, NodeIndex>,
        frontier: &BTreeSet<NodeIndex>,
    ) -> Result<bool, SelectError> {
        self.deadline.check()?;
        if mapping.len() == candidate.nodes.len() {
            return Ok(true);
        }
        // A frontier node must be mapped eventually, and constraints only
        // tighten as the mapping grows, so if the first one has no
        // consistent image now the partial mapping is dead.
        let Some(&next) = frontier.iter().find(|n| !mapping.contains_key(n)) else {
            return Ok(false);
        };

        for image in self.full.graph.node_indices() {
            self.deadline.check()?;
            if mapping.values().any(|&used| used == image) {
                continue;
            }
            if !self.loops_contained(candidate, next, image) {
                continue;
            }
            let consistent = mapping.iter().all(|(&mapped, &mapped_image)| {
                self.edges_contained(candidate, next, mapped, image, mapped_image)
                    && self.edges_contained(candidate, mapped, next, mapped_image, image)
            });
            if !consistent {
                continue;
            }

            mapping.insert(next, image);
            let mut extended = frontier.clone();
            extended.remove(&next);
            for neighbor in candidate.adjacent(&self.full.graph, next) {
                if !mapping.contains_key(&neighbor) {
                    extended.insert(neighbor);
                }
            }
            if self.extend_mapping(candidate, mapping, &extended)? {
                return Ok(true);
            }
            mapping.remove(&next);
        }
        Ok(false)
    }

    /// Candidate labels `from → to` must all appear on `from_image → to_image`.
    fn edges_contained(
        &self,
        candidate: &Candidate,
        from: NodeIndex,
        to: NodeIndex,
        from_image: NodeIndex,
        to_image: NodeIndex,
    ) -> bool {
        let required = candidate.labels(&self.full.graph, from, to);
        if required.is_empty() {
            return true;
        }
        let available = self.full.labels(from_image, to_image);
        required.iter().all(|label| available.contains(label))
    }
}

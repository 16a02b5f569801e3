//! Concept lattice and its covering relation.
//!
//! The [`LatticeBuilder`] takes a finished concept set, in any order, and
//! derives the Hasse diagram. Nodes are sorted by extent size (ties broken by
//! the extent's members), so node ids are the same however the concepts were
//! produced. For a concept `C`, the candidates above it are visited by
//! increasing extent size and a candidate `D` is a cover unless a cover found
//! earlier already sits below `D`. Any concept strictly between `C` and `D` is
//! smaller than `D`, so either it or one of the covers below it has been seen
//! by then, which keeps the result exact. The per-concept searches share
//! nothing mutable and fan out over rayon for large sets.

use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::time::Instant;

use rayon::prelude::*;
use roaring::RoaringBitmap;
use seahash::SeaHasher;
use tracing::{debug, info, warn};

use crate::concept::Concept;
use crate::context::{AttributeSet, Context, ObjectSet};
use crate::enumerate::ConceptEnumerator;
use crate::error::{LecticError, Result};
use crate::settings::LatticeSettings;

pub type NodeId = usize;
pub type SetHasher = BuildHasherDefault<SeaHasher>;

// extents and intents are looked up by their sorted members
type SetKey = Vec<u32>;
fn key(set: &RoaringBitmap) -> SetKey {
    set.iter().collect()
}

// ------------- Builder -------------
#[derive(Debug, Clone, Copy)]
pub struct LatticeBuilder {
    parallel: bool,
    parallel_threshold: usize,
}
impl Default for LatticeBuilder {
    fn default() -> Self {
        Self::from_settings(&LatticeSettings::default())
    }
}

impl LatticeBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn from_settings(settings: &LatticeSettings) -> Self {
        Self {
            parallel: settings.parallel,
            parallel_threshold: settings.parallel_threshold,
        }
    }
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
    /// Smallest concept count for which cover tests run on the thread pool.
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Enumerates every concept of `context` and builds the lattice from them.
    pub fn build_from_context(&self, context: &Context) -> Result<Lattice> {
        self.build(ConceptEnumerator::new(context))
    }

    /// Builds the lattice of a complete concept set.
    ///
    /// Fails with [`LecticError::IncompleteConceptSet`] when the set is empty,
    /// repeats an extent or an intent, or lacks a single greatest or least concept.
    pub fn build<I>(&self, concepts: I) -> Result<Lattice>
    where
        I: IntoIterator<Item = Concept>,
    {
        let started = Instant::now();
        let mut keyed: Vec<(SetKey, Concept)> =
            concepts.into_iter().map(|c| (key(c.extent()), c)).collect();
        if keyed.is_empty() {
            return Err(LecticError::IncompleteConceptSet("no concepts given".into()));
        }
        keyed.sort_unstable_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        let mut by_extent = HashMap::with_capacity_and_hasher(keyed.len(), SetHasher::default());
        let mut by_intent = HashMap::with_capacity_and_hasher(keyed.len(), SetHasher::default());
        let mut nodes = Vec::with_capacity(keyed.len());
        for (id, (extent_key, concept)) in keyed.into_iter().enumerate() {
            if by_extent.insert(extent_key, id).is_some() {
                warn!(%concept, "duplicate extent in concept set");
                return Err(LecticError::IncompleteConceptSet(format!(
                    "extent of {concept} appears twice"
                )));
            }
            if by_intent.insert(key(concept.intent()), id).is_some() {
                warn!(%concept, "duplicate intent in concept set");
                return Err(LecticError::IncompleteConceptSet(format!(
                    "intent of {concept} appears twice"
                )));
            }
            nodes.push(concept);
        }

        let (bottom, top) = (0, nodes.len() - 1);
        if let Some(stray) = nodes.iter().find(|c| !c.extent().is_subset(nodes[top].extent())) {
            return Err(LecticError::IncompleteConceptSet(format!(
                "{stray} lies outside the largest extent"
            )));
        }
        if let Some(stray) = nodes.iter().find(|c| !nodes[bottom].extent().is_subset(c.extent())) {
            return Err(LecticError::IncompleteConceptSet(format!(
                "{stray} does not contain the smallest extent"
            )));
        }
        debug!(concepts = nodes.len(), "concept set validated");

        let parallel = self.parallel && nodes.len() >= self.parallel_threshold;
        let upper: Vec<Vec<NodeId>> = if parallel {
            (0..nodes.len()).into_par_iter().map(|id| upper_covers_of(&nodes, id)).collect()
        } else {
            (0..nodes.len()).map(|id| upper_covers_of(&nodes, id)).collect()
        };
        let mut lower = vec![Vec::new(); nodes.len()];
        for (id, covers) in upper.iter().enumerate() {
            for &cover in covers {
                lower[cover].push(id);
            }
        }

        let lattice = Lattice { nodes, upper, lower, by_extent, by_intent, top, bottom };
        info!(
            concepts = lattice.len(),
            edges = lattice.edge_count(),
            parallel,
            ms = started.elapsed().as_secs_f64() * 1000.0,
            "lattice built"
        );
        Ok(lattice)
    }
}

// Nodes are sorted by extent size, so every strict superset of `id` comes after it.
fn upper_covers_of(nodes: &[Concept], id: NodeId) -> Vec<NodeId> {
    let extent = nodes[id].extent();
    let size = extent.len();
    let mut covers: Vec<NodeId> = Vec::new();
    for (candidate, concept) in nodes.iter().enumerate().skip(id + 1) {
        let above = concept.extent();
        if above.len() == size || !extent.is_subset(above) {
            continue;
        }
        if covers.iter().any(|&c| nodes[c].extent().is_subset(above)) {
            continue;
        }
        covers.push(candidate);
    }
    covers
}

// ------------- Lattice -------------
/// Every concept of a context together with the covering relation.
///
/// Built once by [`LatticeBuilder`] and never mutated afterwards. The top
/// concept holds every object of the context, the bottom concept every
/// attribute. They coincide when the lattice has a single concept.
#[derive(Debug, Clone)]
pub struct Lattice {
    nodes: Vec<Concept>,
    upper: Vec<Vec<NodeId>>,
    lower: Vec<Vec<NodeId>>,
    by_extent: HashMap<SetKey, NodeId, SetHasher>,
    by_intent: HashMap<SetKey, NodeId, SetHasher>,
    top: NodeId,
    bottom: NodeId,
}

impl Lattice {
    pub fn from_context(context: &Context) -> Result<Self> {
        LatticeBuilder::default().build_from_context(context)
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    /// Concepts by ascending extent size; positions are the node ids.
    pub fn concepts(&self) -> &[Concept] {
        &self.nodes
    }
    pub fn concept(&self, id: NodeId) -> Option<&Concept> {
        self.nodes.get(id)
    }
    pub fn top(&self) -> &Concept {
        &self.nodes[self.top]
    }
    pub fn bottom(&self) -> &Concept {
        &self.nodes[self.bottom]
    }
    pub fn top_id(&self) -> NodeId {
        self.top
    }
    pub fn bottom_id(&self) -> NodeId {
        self.bottom
    }
    /// The node id of a concept, looked up by its extent.
    pub fn id_of(&self, concept: &Concept) -> Option<NodeId> {
        self.by_extent.get(&key(concept.extent())).copied()
    }
    pub fn find_by_extent(&self, extent: &ObjectSet) -> Option<&Concept> {
        self.by_extent.get(&key(extent)).map(|&id| &self.nodes[id])
    }
    pub fn find_by_intent(&self, intent: &AttributeSet) -> Option<&Concept> {
        self.by_intent.get(&key(intent)).map(|&id| &self.nodes[id])
    }

    // ------------- Covering relation -------------
    /// Concepts immediately above `concept`; nothing for a concept of another lattice.
    pub fn upper_covers<'l>(
        &'l self,
        concept: &Concept,
    ) -> impl Iterator<Item = &'l Concept> + use<'l> {
        self.neighbours(&self.upper, concept)
    }
    /// Concepts immediately below `concept`; nothing for a concept of another lattice.
    pub fn lower_covers<'l>(
        &'l self,
        concept: &Concept,
    ) -> impl Iterator<Item = &'l Concept> + use<'l> {
        self.neighbours(&self.lower, concept)
    }
    fn neighbours<'l>(
        &'l self,
        adjacency: &'l [Vec<NodeId>],
        concept: &Concept,
    ) -> impl Iterator<Item = &'l Concept> + use<'l> {
        self.id_of(concept)
            .into_iter()
            .flat_map(move |id| adjacency[id].iter().map(move |&n| &self.nodes[n]))
    }
    pub fn upper_cover_ids(&self, id: NodeId) -> &[NodeId] {
        self.upper.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
    pub fn lower_cover_ids(&self, id: NodeId) -> &[NodeId] {
        self.lower.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
    /// True when `upper` covers `lower` with nothing in between.
    pub fn is_covered_by(&self, lower: &Concept, upper: &Concept) -> bool {
        match (self.id_of(lower), self.id_of(upper)) {
            (Some(l), Some(u)) => self.upper[l].contains(&u),
            _ => false,
        }
    }
    /// Covering pairs as `(lower, upper)` node ids.
    pub fn edge_ids(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.upper
            .iter()
            .enumerate()
            .flat_map(|(l, covers)| covers.iter().map(move |&u| (l, u)))
    }
    /// Covering pairs as `(lower, upper)` concepts.
    pub fn edges(&self) -> impl Iterator<Item = (&Concept, &Concept)> + '_ {
        self.edge_ids().map(|(l, u)| (&self.nodes[l], &self.nodes[u]))
    }
    pub fn edge_count(&self) -> usize {
        self.upper.iter().map(Vec::len).sum()
    }

    // ------------- Lattice operations -------------
    /// Infimum: the concept whose extent is the intersection of the extents.
    /// The meet of nothing is the top concept.
    pub fn meet(&self, concepts: &[&Concept]) -> Option<&Concept> {
        let Some((first, rest)) = concepts.split_first() else {
            return Some(self.top());
        };
        let extent = rest.iter().fold(first.extent().clone(), |acc, c| acc & c.extent());
        self.find_by_extent(&extent)
    }
    /// Supremum: the concept whose intent is the intersection of the intents.
    /// The join of nothing is the bottom concept.
    pub fn join(&self, concepts: &[&Concept]) -> Option<&Concept> {
        let Some((first, rest)) = concepts.split_first() else {
            return Some(self.bottom());
        };
        let intent = rest.iter().fold(first.intent().clone(), |acc, c| acc & c.intent());
        self.find_by_intent(&intent)
    }
}

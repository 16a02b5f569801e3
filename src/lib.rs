//! Lectic – Formal Concept Analysis over bitset contexts.
//!
//! Formal Concept Analysis starts from a binary relation between *objects*
//! and *attributes* and derives every *formal concept* hidden in it:
//! * A [`context::Context`] is the relation itself, declared once and never mutated.
//! * A [`closure::GaloisClosure`] composes the two derivation queries of a
//!   context into closure operators on attribute sets and on object sets.
//! * A [`concept::Concept`] is a closed pair of an extent (objects) and an
//!   intent (attributes), each determining the other.
//! * A [`enumerate::ConceptEnumerator`] lists every concept exactly once, in
//!   lectic order of intents, using the Next Closure canonicity test.
//! * A [`lattice::Lattice`] holds all concepts with their covering relation
//!   (the Hasse diagram), built by a [`lattice::LatticeBuilder`].
//!
//! Objects and attributes are addressed by their declaration index, and sets
//! of them are roaring bitmaps, so derivation and closure are bitmap
//! intersections.
//!
//! ## Modules
//! * [`context`] – Declaration, membership queries and derivation.
//! * [`closure`] – Closure operators and closed-set tests.
//! * [`concept`] – The concept value type and the lectic order.
//! * [`enumerate`] – Lazy concept enumeration and enumeration budgets.
//! * [`lattice`] – Covering relation, sentinels, meets and joins.
//! * [`export`] – A serializable node/edge view for external renderers.
//! * [`settings`] – Optional configuration and tracing setup.
//!
//! ## Usage caveat
//! The number of concepts can be exponential in the number of attributes.
//! Enumeration is lazy, so a consumer can stop at any point, or bound the
//! walk with an [`enumerate::Budget`].
//!
//! ## Quick Start
//! ```
//! use lectic::{Context, ConceptEnumerator, Lattice};
//! let context = Context::from_pairs(
//!     ["1", "2", "3"],
//!     ["a", "b"],
//!     [("1", "a"), ("1", "b"), ("2", "a"), ("3", "b")],
//! ).unwrap();
//! assert_eq!(ConceptEnumerator::new(&context).count(), 4);
//! let lattice = Lattice::from_context(&context).unwrap();
//! assert_eq!(lattice.top().object_names(&context), vec!["1", "2", "3"]);
//! assert_eq!(lattice.bottom().attribute_names(&context), vec!["a", "b"]);
//! assert_eq!(lattice.edge_count(), 4);
//! ```

pub mod closure;
pub mod concept;
pub mod context;
pub mod enumerate;
pub mod error;
pub mod export;
pub mod lattice;
pub mod settings;

pub use closure::GaloisClosure;
pub use concept::{lectic_cmp, Concept};
pub use context::{AttributeSet, Context, Index, ObjectSet};
pub use enumerate::{Budget, ConceptEnumerator, Enumeration};
pub use error::{LecticError, Result, Side};
pub use export::LatticeGraph;
pub use lattice::{Lattice, LatticeBuilder, NodeId};
pub use settings::Settings;

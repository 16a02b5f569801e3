//! The binary relation under analysis.
//!
//! A [`Context`] is declared once from an ordered sequence of object
//! identifiers, an ordered sequence of attribute identifiers and the pairs that
//! hold between them. Declaration order is the index assignment: object `i` and
//! attribute `j` are addressed as plain `u32` indices everywhere else in the
//! crate, and the attribute indices double as the ranking used for lectic
//! order during enumeration.
//!
//! The relation is stored twice, once per object (its row) and once per
//! attribute (its column), both as roaring bitmaps. The two derivation queries
//! then reduce to intersecting a handful of bitmaps.

use std::fmt;

// used to keep the one-to-one mapping between identifiers and their assigned indices
use bimap::BiMap;

// used for extents and intents
use roaring::RoaringBitmap;

use tracing::{debug, warn};

use crate::error::{LecticError, Result, Side};

// ------------- Sets -------------
pub type Index = u32;
/// A set of object indices.
pub type ObjectSet = RoaringBitmap;
/// A set of attribute indices.
pub type AttributeSet = RoaringBitmap;

/// Every index below `len`.
pub(crate) fn full_set(len: Index) -> RoaringBitmap {
    let mut set = RoaringBitmap::new();
    set.insert_range(0..len);
    set
}

// ------------- Universe -------------
// An ordered, duplicate-free sequence of identifiers where the position is the index.
#[derive(Debug, Clone)]
struct Universe {
    side: Side,
    names: BiMap<String, Index>,
}
impl Universe {
    fn new<I>(side: Side, names: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut universe = Self {
            side,
            names: BiMap::new(),
        };
        for name in names {
            universe.push(name.into())?;
        }
        Ok(universe)
    }
    fn push(&mut self, name: String) -> Result<Index> {
        let index = Index::try_from(self.names.len()).map_err(|_| {
            LecticError::InconsistentRelation(format!("too many {}s for a 32 bit index", self.side))
        })?;
        match self.names.insert_no_overwrite(name, index) {
            Ok(()) => Ok(index),
            Err((name, _)) => Err(LecticError::DuplicateIdentifier {
                kind: self.side,
                identifier: name,
            }),
        }
    }
    fn len(&self) -> Index {
        // push refuses to grow past the index range
        self.names.len() as Index
    }
    fn index_of(&self, name: &str) -> Option<Index> {
        self.names.get_by_left(name).copied()
    }
    fn name_of(&self, index: Index) -> Option<&str> {
        self.names.get_by_right(&index).map(String::as_str)
    }
    fn resolve(&self, name: &str) -> Result<Index> {
        self.index_of(name).ok_or_else(|| LecticError::InvalidIdentifier {
            kind: self.side,
            identifier: name.to_owned(),
        })
    }
    fn check(&self, index: Index) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(LecticError::InvalidIdentifier {
                kind: self.side,
                identifier: format!("#{index}"),
            })
        }
    }
    fn check_set(&self, set: &RoaringBitmap) -> Result<()> {
        match set.max() {
            Some(max) => self.check(max),
            None => Ok(()),
        }
    }
    fn names(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.len()).filter_map(move |i| self.name_of(i))
    }
    // Every identifier but the one at `removed`, later ones moving down a position.
    fn without(&self, removed: Index) -> Self {
        let names = self
            .names
            .iter()
            .filter(|&(_, &i)| i != removed)
            .map(|(name, &i)| (name.clone(), if i > removed { i - 1 } else { i }))
            .collect();
        Self { side: self.side, names }
    }
}

// The set with `removed` taken out and every larger index moved down by one.
fn close_gap(set: &RoaringBitmap, removed: Index) -> RoaringBitmap {
    set.iter()
        .filter(|&i| i != removed)
        .map(|i| if i > removed { i - 1 } else { i })
        .collect()
}

// ------------- Context -------------
#[derive(Debug, Clone)]
pub struct Context {
    objects: Universe,
    attributes: Universe,
    rows: Vec<AttributeSet>,  // attributes held by each object
    columns: Vec<ObjectSet>,  // objects holding each attribute
}

impl Context {
    /// A context without objects and attributes.
    pub fn empty() -> Self {
        Self {
            objects: Universe { side: Side::Object, names: BiMap::new() },
            attributes: Universe { side: Side::Attribute, names: BiMap::new() },
            rows: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Builds a context from the pairs that hold; every other pair is false.
    ///
    /// Fails with [`LecticError::InconsistentRelation`] if a pair names an
    /// identifier that was not declared, and with
    /// [`LecticError::DuplicateIdentifier`] if a declared sequence repeats itself.
    pub fn from_pairs<O, A, P, X, Y>(objects: O, attributes: A, pairs: P) -> Result<Self>
    where
        O: IntoIterator,
        O::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
        P: IntoIterator<Item = (X, Y)>,
        X: AsRef<str>,
        Y: AsRef<str>,
    {
        let objects = Universe::new(Side::Object, objects)?;
        let attributes = Universe::new(Side::Attribute, attributes)?;
        let mut rows = vec![AttributeSet::new(); objects.len() as usize];
        for (object, attribute) in pairs {
            let (object, attribute) = (object.as_ref(), attribute.as_ref());
            let (Some(o), Some(a)) = (objects.index_of(object), attributes.index_of(attribute))
            else {
                warn!(object, attribute, "relation pair references an undeclared identifier");
                return Err(LecticError::InconsistentRelation(format!(
                    "pair ({object}, {attribute}) references an undeclared identifier"
                )));
            };
            rows[o as usize].insert(a);
        }
        Ok(Self::from_rows(objects, attributes, rows))
    }

    /// Builds a context from a dense table with one row per object and one
    /// column per attribute, both in declaration order.
    pub fn from_table<O, A, T>(objects: O, attributes: A, table: T) -> Result<Self>
    where
        O: IntoIterator,
        O::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
        T: IntoIterator,
        T::Item: AsRef<[bool]>,
    {
        let objects = Universe::new(Side::Object, objects)?;
        let attributes = Universe::new(Side::Attribute, attributes)?;
        let width = attributes.len() as usize;
        let mut rows = Vec::with_capacity(objects.len() as usize);
        for (o, cells) in table.into_iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != width {
                return Err(LecticError::InconsistentRelation(format!(
                    "row {o} has {} cells but {width} attributes are declared",
                    cells.len()
                )));
            }
            rows.push(
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, held)| **held)
                    .map(|(a, _)| a as Index)
                    .collect::<AttributeSet>(),
            );
        }
        if rows.len() != objects.len() as usize {
            return Err(LecticError::InconsistentRelation(format!(
                "table has {} rows but {} objects are declared",
                rows.len(),
                objects.len()
            )));
        }
        Ok(Self::from_rows(objects, attributes, rows))
    }

    fn from_rows(objects: Universe, attributes: Universe, rows: Vec<AttributeSet>) -> Self {
        let mut columns = vec![ObjectSet::new(); attributes.len() as usize];
        for (o, row) in rows.iter().enumerate() {
            for a in row {
                columns[a as usize].insert(o as Index);
            }
        }
        let context = Self { objects, attributes, rows, columns };
        debug!(
            objects = context.object_count(),
            attributes = context.attribute_count(),
            pairs = context.pair_count(),
            "context constructed"
        );
        context
    }

    // ------------- Universe views -------------
    pub fn object_count(&self) -> Index {
        self.objects.len()
    }
    pub fn attribute_count(&self) -> Index {
        self.attributes.len()
    }
    /// Object identifiers in declaration order.
    pub fn objects(&self) -> impl Iterator<Item = &str> + '_ {
        self.objects.names()
    }
    /// Attribute identifiers in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> + '_ {
        self.attributes.names()
    }
    pub fn object_index(&self, name: &str) -> Option<Index> {
        self.objects.index_of(name)
    }
    pub fn attribute_index(&self, name: &str) -> Option<Index> {
        self.attributes.index_of(name)
    }
    pub fn object_name(&self, index: Index) -> Option<&str> {
        self.objects.name_of(index)
    }
    pub fn attribute_name(&self, index: Index) -> Option<&str> {
        self.attributes.name_of(index)
    }
    pub fn contains_object(&self, name: &str) -> bool {
        self.objects.index_of(name).is_some()
    }
    pub fn contains_attribute(&self, name: &str) -> bool {
        self.attributes.index_of(name).is_some()
    }
    /// A context is empty unless it has at least one object and one attribute.
    pub fn is_empty(&self) -> bool {
        self.object_count() == 0 || self.attribute_count() == 0
    }
    pub fn all_objects(&self) -> ObjectSet {
        full_set(self.object_count())
    }
    pub fn all_attributes(&self) -> AttributeSet {
        full_set(self.attribute_count())
    }
    /// Number of pairs that hold.
    pub fn pair_count(&self) -> u64 {
        self.rows.iter().map(RoaringBitmap::len).sum()
    }
    /// Share of the declared pairs that hold, `0.0` for an empty context.
    pub fn density(&self) -> f64 {
        let cells = u64::from(self.object_count()) * u64::from(self.attribute_count());
        if cells == 0 {
            0.0
        } else {
            self.pair_count() as f64 / cells as f64
        }
    }

    // ------------- Membership -------------
    pub fn query(&self, object: &str, attribute: &str) -> Result<bool> {
        let o = self.objects.resolve(object)?;
        let a = self.attributes.resolve(attribute)?;
        Ok(self.rows[o as usize].contains(a))
    }
    pub fn holds(&self, object: Index, attribute: Index) -> Result<bool> {
        self.objects.check(object)?;
        self.attributes.check(attribute)?;
        Ok(self.rows[object as usize].contains(attribute))
    }
    /// The attributes held by one object.
    pub fn row(&self, object: Index) -> Result<&AttributeSet> {
        self.objects.check(object)?;
        Ok(&self.rows[object as usize])
    }
    /// The objects holding one attribute.
    pub fn column(&self, attribute: Index) -> Result<&ObjectSet> {
        self.attributes.check(attribute)?;
        Ok(&self.columns[attribute as usize])
    }
    pub fn object_set<I, S>(&self, names: I) -> Result<ObjectSet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().map(|n| self.objects.resolve(n.as_ref())).collect()
    }
    pub fn attribute_set<I, S>(&self, names: I) -> Result<AttributeSet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().map(|n| self.attributes.resolve(n.as_ref())).collect()
    }

    // ------------- Derivation -------------
    /// Objects related to every attribute in the set (all objects for the empty set).
    pub fn objects_having(&self, attributes: &AttributeSet) -> Result<ObjectSet> {
        self.attributes.check_set(attributes)?;
        Ok(self.derive_objects(attributes))
    }
    /// Attributes held by every object in the set (all attributes for the empty set).
    pub fn attributes_of(&self, objects: &ObjectSet) -> Result<AttributeSet> {
        self.objects.check_set(objects)?;
        Ok(self.derive_attributes(objects))
    }
    pub fn objects_having_named(&self, attributes: &[&str]) -> Result<ObjectSet> {
        let attributes = self.attribute_set(attributes)?;
        Ok(self.derive_objects(&attributes))
    }
    pub fn attributes_of_named(&self, objects: &[&str]) -> Result<AttributeSet> {
        let objects = self.object_set(objects)?;
        Ok(self.derive_attributes(&objects))
    }

    // Unchecked derivations for callers that only ever hand in sets built from this context.
    pub(crate) fn derive_objects(&self, attributes: &AttributeSet) -> ObjectSet {
        intersect_all(&self.columns, attributes, self.object_count())
    }
    pub(crate) fn derive_attributes(&self, objects: &ObjectSet) -> AttributeSet {
        intersect_all(&self.rows, objects, self.attribute_count())
    }

    // ------------- Editing -------------
    // Edits never touch the receiver, they produce a new context.
    pub fn with_pair(&self, object: &str, attribute: &str) -> Result<Self> {
        let o = self.objects.resolve(object)?;
        let a = self.attributes.resolve(attribute)?;
        let mut edited = self.clone();
        edited.rows[o as usize].insert(a);
        edited.columns[a as usize].insert(o);
        Ok(edited)
    }
    pub fn without_pair(&self, object: &str, attribute: &str) -> Result<Self> {
        let o = self.objects.resolve(object)?;
        let a = self.attributes.resolve(attribute)?;
        let mut edited = self.clone();
        edited.rows[o as usize].remove(a);
        edited.columns[a as usize].remove(o);
        Ok(edited)
    }
    /// Appends an object holding the given attributes.
    pub fn with_object(&self, name: &str, attributes: &[&str]) -> Result<Self> {
        let row = self.attribute_set(attributes).map_err(|e| {
            LecticError::InconsistentRelation(format!("new object '{name}': {e}"))
        })?;
        let mut edited = self.clone();
        let o = edited.objects.push(name.to_owned())?;
        for a in &row {
            edited.columns[a as usize].insert(o);
        }
        edited.rows.push(row);
        Ok(edited)
    }
    /// Appends an attribute held by the given objects.
    pub fn with_attribute(&self, name: &str, objects: &[&str]) -> Result<Self> {
        let column = self.object_set(objects).map_err(|e| {
            LecticError::InconsistentRelation(format!("new attribute '{name}': {e}"))
        })?;
        let mut edited = self.clone();
        let a = edited.attributes.push(name.to_owned())?;
        for o in &column {
            edited.rows[o as usize].insert(a);
        }
        edited.columns.push(column);
        Ok(edited)
    }
    /// Drops an object; the objects declared after it move down one index.
    pub fn without_object(&self, name: &str) -> Result<Self> {
        let o = self.objects.resolve(name)?;
        let mut rows = self.rows.clone();
        rows.remove(o as usize);
        let columns = self.columns.iter().map(|column| close_gap(column, o)).collect();
        let edited = Self {
            objects: self.objects.without(o),
            attributes: self.attributes.clone(),
            rows,
            columns,
        };
        debug!(object = name, objects = edited.object_count(), "object removed");
        Ok(edited)
    }
    /// Drops an attribute; the attributes declared after it move down one index.
    pub fn without_attribute(&self, name: &str) -> Result<Self> {
        let a = self.attributes.resolve(name)?;
        let mut columns = self.columns.clone();
        columns.remove(a as usize);
        let rows = self.rows.iter().map(|row| close_gap(row, a)).collect();
        let edited = Self {
            objects: self.objects.clone(),
            attributes: self.attributes.without(a),
            rows,
            columns,
        };
        debug!(attribute = name, attributes = edited.attribute_count(), "attribute removed");
        Ok(edited)
    }
}

// Intersection of the selected bitmaps, or everything below `universe` when nothing is selected.
fn intersect_all(
    sets: &[RoaringBitmap],
    selected: &RoaringBitmap,
    universe: Index,
) -> RoaringBitmap {
    let mut selected = selected.iter();
    let Some(first) = selected.next() else {
        return full_set(universe);
    };
    let mut result = sets[first as usize].clone();
    for i in selected {
        if result.is_empty() {
            break;
        }
        result &= &sets[i as usize];
    }
    result
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let margin = self.objects().map(|o| o.chars().count()).max().unwrap_or(0);
        write!(f, "{:margin$} |", "")?;
        for attribute in self.attributes() {
            write!(f, " {attribute} |")?;
        }
        writeln!(f)?;
        for (o, object) in self.objects().enumerate() {
            write!(f, "{object:margin$} |")?;
            for (a, attribute) in self.attributes().enumerate() {
                let mark = if self.rows[o].contains(a as Index) { "X" } else { "." };
                write!(f, " {mark:^width$} |", width = attribute.chars().count())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

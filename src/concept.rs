use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use roaring::RoaringBitmap;

use crate::context::{AttributeSet, Context, ObjectSet};

// ------------- Concept -------------
/// A closed pair: the extent holds exactly the objects sharing every attribute
/// of the intent, and the intent exactly the attributes shared by the extent.
///
/// Concepts of one context are identified by their extent alone, so equality
/// and hashing only look at the extent. The partial order is extent inclusion,
/// which makes `a < b` read as "`a` is a proper subconcept of `b`".
#[derive(Debug, Clone)]
pub struct Concept {
    extent: ObjectSet,
    intent: AttributeSet,
}

impl Concept {
    pub(crate) fn new(extent: ObjectSet, intent: AttributeSet) -> Self {
        Self { extent, intent }
    }
    pub fn extent(&self) -> &ObjectSet {
        &self.extent
    }
    pub fn intent(&self) -> &AttributeSet {
        &self.intent
    }
    pub fn into_parts(self) -> (ObjectSet, AttributeSet) {
        (self.extent, self.intent)
    }
    pub fn is_subconcept_of(&self, other: &Concept) -> bool {
        self.extent.is_subset(&other.extent)
    }
    /// Object identifiers of the extent, in declaration order.
    pub fn object_names<'c>(&self, context: &'c Context) -> Vec<&'c str> {
        self.extent.iter().filter_map(|o| context.object_name(o)).collect()
    }
    /// Attribute identifiers of the intent, in declaration order.
    pub fn attribute_names<'c>(&self, context: &'c Context) -> Vec<&'c str> {
        self.intent.iter().filter_map(|a| context.attribute_name(a)).collect()
    }
}

impl PartialEq for Concept {
    fn eq(&self, other: &Self) -> bool {
        self.extent == other.extent
    }
}
impl Eq for Concept {}
impl Hash for Concept {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.extent.len().hash(state);
        for o in &self.extent {
            o.hash(state);
        }
    }
}
impl PartialOrd for Concept {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.extent == other.extent {
            Some(Ordering::Equal)
        } else if self.extent.is_subset(&other.extent) {
            Some(Ordering::Less)
        } else if other.extent.is_subset(&self.extent) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

fn write_set(f: &mut fmt::Formatter, set: &RoaringBitmap) -> fmt::Result {
    let mut s = String::new();
    for i in set {
        s += &(i.to_string() + ",");
    }
    s.pop();
    write!(f, "{{{}}}", s)
}
impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        write_set(f, &self.extent)?;
        write!(f, ", ")?;
        write_set(f, &self.intent)?;
        write!(f, ")")
    }
}

// ------------- Lectic order -------------
/// Compares two attribute sets in lectic order: the smallest index on which
/// they differ decides, and the set containing it is the greater one.
pub fn lectic_cmp(a: &AttributeSet, b: &AttributeSet) -> Ordering {
    let difference = a ^ b;
    match difference.min() {
        None => Ordering::Equal,
        Some(i) if b.contains(i) => Ordering::Less,
        Some(_) => Ordering::Greater,
    }
}

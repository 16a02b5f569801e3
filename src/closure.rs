//! Galois connection over a [`Context`].
//!
//! The two derivation queries of the context are composed into the closure
//! operators on attribute sets and on object sets. Both are idempotent and
//! monotone, which is what the enumerator's canonicity test relies on.

use crate::concept::Concept;
use crate::context::{AttributeSet, Context, ObjectSet};
use crate::error::Result;

#[derive(Debug, Clone, Copy)]
pub struct GaloisClosure<'c> {
    context: &'c Context,
}

impl<'c> GaloisClosure<'c> {
    pub fn new(context: &'c Context) -> Self {
        Self { context }
    }
    pub fn context(&self) -> &'c Context {
        self.context
    }

    /// The largest attribute set shared by the objects having every attribute of `attributes`.
    pub fn attribute_closure(&self, attributes: &AttributeSet) -> Result<AttributeSet> {
        let extent = self.context.objects_having(attributes)?;
        Ok(self.context.derive_attributes(&extent))
    }
    /// The largest object set holding every attribute shared by `objects`.
    pub fn object_closure(&self, objects: &ObjectSet) -> Result<ObjectSet> {
        let intent = self.context.attributes_of(objects)?;
        Ok(self.context.derive_objects(&intent))
    }
    pub fn is_closed_intent(&self, attributes: &AttributeSet) -> Result<bool> {
        Ok(self.attribute_closure(attributes)? == *attributes)
    }
    pub fn is_closed_extent(&self, objects: &ObjectSet) -> Result<bool> {
        Ok(self.object_closure(objects)? == *objects)
    }
    /// The concept generated by an attribute set: its intent is the closure of `attributes`.
    pub fn concept_of_attributes(&self, attributes: &AttributeSet) -> Result<Concept> {
        let extent = self.context.objects_having(attributes)?;
        let intent = self.context.derive_attributes(&extent);
        Ok(Concept::new(extent, intent))
    }
    /// The concept generated by an object set: its extent is the closure of `objects`.
    pub fn concept_of_objects(&self, objects: &ObjectSet) -> Result<Concept> {
        let intent = self.context.attributes_of(objects)?;
        let extent = self.context.derive_objects(&intent);
        Ok(Concept::new(extent, intent))
    }

    // Unchecked form used in the enumeration loop, where every candidate is built
    // from indices of this context. Hands back the extent too, so it is derived once.
    pub(crate) fn close(&self, attributes: &AttributeSet) -> Concept {
        let extent = self.context.derive_objects(attributes);
        let intent = self.context.derive_attributes(&extent);
        Concept::new(extent, intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // the classic "planets" cross table
    fn planets() -> Context {
        Context::from_table(
            ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"],
            ["small", "medium", "large", "near", "far", "moon", "no moon"],
            [
                [true, false, false, true, false, false, true],
                [true, false, false, true, false, false, true],
                [true, false, false, true, false, true, false],
                [true, false, false, true, false, true, false],
                [false, false, true, false, true, true, false],
                [false, false, true, false, true, true, false],
                [false, true, false, false, true, true, false],
                [false, true, false, false, true, true, false],
            ],
        )
        .unwrap()
    }

    fn subsets(n: u32) -> Vec<AttributeSet> {
        (0u32..(1 << n))
            .map(|mask| (0..n).filter(|i| mask & (1 << i) != 0).collect())
            .collect()
    }

    #[test]
    fn attribute_closure_is_idempotent_and_monotone() {
        let context = planets();
        let closure = GaloisClosure::new(&context);
        let all = subsets(context.attribute_count());
        let closed: Vec<AttributeSet> =
            all.iter().map(|s| closure.attribute_closure(s).unwrap()).collect();
        for (s, c) in all.iter().zip(&closed) {
            assert!(s.is_subset(c), "closure is extensive");
            assert_eq!(&closure.attribute_closure(c).unwrap(), c);
        }
        for (i, s) in all.iter().enumerate() {
            for (j, t) in all.iter().enumerate() {
                if s.is_subset(t) {
                    assert!(closed[i].is_subset(&closed[j]));
                }
            }
        }
    }

    #[test]
    fn object_closure_is_idempotent_and_monotone() {
        let context = planets();
        let closure = GaloisClosure::new(&context);
        let all = subsets(context.object_count());
        let closed: Vec<ObjectSet> =
            all.iter().map(|s| closure.object_closure(s).unwrap()).collect();
        for (s, c) in all.iter().zip(&closed) {
            assert!(s.is_subset(c));
            assert!(closure.is_closed_extent(c).unwrap());
        }
        for (i, s) in all.iter().enumerate() {
            for (j, t) in all.iter().enumerate() {
                if s.is_subset(t) {
                    assert!(closed[i].is_subset(&closed[j]));
                }
            }
        }
    }

    #[test]
    fn generated_concepts_are_fixed_points() {
        let context = planets();
        let closure = GaloisClosure::new(&context);
        let moon = context.attribute_set(["moon"]).unwrap();
        let concept = closure.concept_of_attributes(&moon).unwrap();
        assert_eq!(concept.object_names(&context).len(), 6);
        assert_eq!(concept.attribute_names(&context), vec!["moon"]);
        assert!(closure.is_closed_intent(concept.intent()).unwrap());

        let giants = context.object_set(["Jupiter"]).unwrap();
        let concept = closure.concept_of_objects(&giants).unwrap();
        assert_eq!(concept.object_names(&context), vec!["Jupiter", "Saturn"]);
        assert_eq!(concept.attribute_names(&context), vec!["large", "far", "moon"]);
        assert_eq!(closure.close(concept.intent()), concept);
    }

    #[test]
    fn out_of_range_sets_are_rejected() {
        let context = planets();
        let closure = GaloisClosure::new(&context);
        let bogus: AttributeSet = [42u32].into_iter().collect();
        assert!(closure.attribute_closure(&bogus).is_err());
        assert!(closure.object_closure(&bogus).is_err());
        assert!(closure.concept_of_attributes(&bogus).is_err());
    }
}

use lectic::{ConceptEnumerator, Context, Lattice};

#[test]
fn empty_context_has_one_concept() {
    let context = Context::empty();
    assert_eq!(ConceptEnumerator::new(&context).count(), 1);
    let lattice = Lattice::from_context(&context).expect("lattice");
    assert_eq!(lattice.len(), 1);
    assert_eq!(lattice.top(), lattice.bottom(), "top and bottom coincide");
    assert_eq!(lattice.edge_count(), 0);
}

#[test]
fn universal_context_has_one_concept() {
    // every object holds every attribute
    let context = Context::from_table(["x", "y"], ["p", "q", "r"], [[true; 3], [true; 3]])
        .expect("context");
    let lattice = Lattice::from_context(&context).expect("lattice");
    assert_eq!(lattice.len(), 1);
    assert_eq!(lattice.top().extent().len(), 2);
    assert_eq!(lattice.top().intent().len(), 3);
}

#[test]
fn void_relation_has_two_concepts() {
    // nothing holds: (all objects, no attributes) above (no objects, all attributes)
    let context = Context::from_table(["x", "y"], ["p", "q"], [[false; 2], [false; 2]])
        .expect("context");
    let lattice = Lattice::from_context(&context).expect("lattice");
    assert_eq!(lattice.len(), 2);
    assert_eq!(lattice.edge_count(), 1);
    assert!(lattice.bottom().extent().is_empty());
    assert!(lattice.top().intent().is_empty());
    assert!(lattice.is_covered_by(lattice.bottom(), lattice.top()));
}

#[test]
fn objects_without_attributes() {
    let context =
        Context::from_pairs(["x", "y", "z"], Vec::<String>::new(), Vec::<(&str, &str)>::new())
            .expect("context");
    let lattice = Lattice::from_context(&context).expect("lattice");
    assert_eq!(lattice.len(), 1);
    assert_eq!(lattice.top().extent().len(), 3);
}

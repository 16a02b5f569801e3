use lectic::{AttributeSet, Context, GaloisClosure, Lattice, ObjectSet};

// "Living beings and water": 8 objects, 9 attributes, 19 concepts
fn living_beings() -> Context {
    let rows = [
        ("leech", "abg"),
        ("bream", "abgh"),
        ("frog", "abcgh"),
        ("dog", "acghi"),
        ("spike-weed", "abdf"),
        ("reed", "abcdf"),
        ("bean", "acde"),
        ("maize", "acdf"),
    ];
    let attributes: Vec<String> = "abcdefghi".chars().map(String::from).collect();
    let pairs: Vec<(String, String)> = rows
        .iter()
        .flat_map(|(o, held)| held.chars().map(move |a| (o.to_string(), a.to_string())))
        .collect();
    Context::from_pairs(rows.iter().map(|(o, _)| *o), attributes, pairs).expect("context")
}

fn subsets(n: u32) -> impl Iterator<Item = AttributeSet> {
    (0u32..(1 << n)).map(move |mask| (0..n).filter(|i| mask & (1 << i) != 0).collect())
}

#[test]
fn closure_is_monotone_and_idempotent() {
    let context = living_beings();
    let closure = GaloisClosure::new(&context);
    let all: Vec<AttributeSet> = subsets(context.attribute_count()).collect();
    let closed: Vec<AttributeSet> =
        all.iter().map(|s| closure.attribute_closure(s).unwrap()).collect();
    for (s, c) in all.iter().zip(&closed) {
        assert_eq!(&closure.attribute_closure(c).unwrap(), c, "idempotent");
        assert!(s.is_subset(c), "extensive");
    }
    // monotone on every pair S ⊆ S ∪ {a}, which covers all comparable pairs by transitivity
    for (i, s) in all.iter().enumerate() {
        for a in 0..context.attribute_count() {
            let mut t = s.clone();
            t.insert(a);
            let j = t.iter().map(|x| 1usize << x).sum::<usize>();
            assert!(closed[i].is_subset(&closed[j]), "monotone");
        }
    }
}

#[test]
fn object_round_trip_is_a_closed_superset() {
    let context = living_beings();
    let closure = GaloisClosure::new(&context);
    for mask in 0u32..(1 << context.object_count()) {
        let objects: ObjectSet =
            (0..context.object_count()).filter(|i| mask & (1 << i) != 0).collect();
        let intent = context.attributes_of(&objects).unwrap();
        let extent = context.objects_having(&intent).unwrap();
        assert!(objects.is_subset(&extent));
        assert!(closure.is_closed_extent(&extent).unwrap());
    }
}

#[test]
fn lattice_reverses_order() {
    let context = living_beings();
    let lattice = Lattice::from_context(&context).expect("lattice");
    assert_eq!(lattice.len(), 19);
    assert_eq!(lattice.edge_count(), 32);
    for c in lattice.concepts() {
        assert_eq!(&context.attributes_of(c.extent()).unwrap(), c.intent(), "fixed point");
        assert_eq!(&context.objects_having(c.intent()).unwrap(), c.extent(), "fixed point");
        for d in lattice.concepts() {
            assert_eq!(
                c.extent().is_subset(d.extent()),
                d.intent().is_subset(c.intent()),
                "extent inclusion mirrors intent containment"
            );
        }
    }
}

#[test]
fn meets_and_joins_exist_for_every_pair() {
    let context = living_beings();
    let lattice = Lattice::from_context(&context).expect("lattice");
    for c in lattice.concepts() {
        for d in lattice.concepts() {
            let meet = lattice.meet(&[c, d]).expect("meet exists");
            let join = lattice.join(&[c, d]).expect("join exists");
            assert!(meet <= c && meet <= d);
            assert!(c <= join && d <= join);
        }
    }
    assert_eq!(
        lattice.meet(&lattice.concepts().iter().collect::<Vec<_>>()),
        Some(lattice.bottom())
    );
    assert_eq!(lattice.join(&lattice.concepts().iter().collect::<Vec<_>>()), Some(lattice.top()));
}

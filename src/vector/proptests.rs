use proptest::prelude::*;

use super::Vector;


#[derive(Debug, Clone)]
enum Op {
    Push(u16),
    Insert(usize, Vec<u16>),
    Reserve(usize),
    Resize(usize),
    Truncate(usize),
    Pop,
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u16>().prop_map(Op::Push),
        2 => (any::<usize>(), prop::collection::vec(any::<u16>(), 0..12))
            .prop_map(|(at, items)| Op::Insert(at, items)),
        1 => (0..40usize).prop_map(Op::Reserve),
        1 => (0..64usize).prop_map(Op::Resize),
        1 => any::<usize>().prop_map(Op::Truncate),
        1 => Just(Op::Pop),
        1 => Just(Op::Clear),
    ]
}

fn check_invariants(v: &Vector<u16>, model: &[u16]) -> Result<(), TestCaseError> {
    prop_assert!(v.len() <= v.capacity());
    prop_assert_eq!(v.capacity() == 0, v.data().is_null());
    prop_assert_eq!(v.as_slice(), model);
    Ok(())
}

proptest! {
    #[test]
    fn matches_model(ops in prop::collection::vec(op(), 0..80)) {
        let mut v = Vector::<u16>::new();
        let mut model = Vec::<u16>::new();

        for op in ops {
            let cap_before = v.capacity();
            match op {
                Op::Push(x) => {
                    v.push_back(x);
                    model.push(x);
                    match cap_before {
                        0 => prop_assert_eq!(v.capacity(), 8),
                        cap if model.len() > cap => prop_assert_eq!(v.capacity(), cap * 2),
                        cap => prop_assert_eq!(v.capacity(), cap),
                    }
                },
                Op::Insert(at, items) => {
                    let at = at % (model.len() + 1);
                    v.insert(at, items.clone());
                    model.splice(at..at, items);
                    prop_assert!(v.capacity() >= cap_before);
                },
                Op::Reserve(n) => {
                    v.reserve(n);
                    prop_assert_eq!(v.capacity(), cap_before + n);
                },
                Op::Resize(n) => {
                    v.resize(n);
                    model.resize(n, 0);
                    prop_assert_eq!(v.capacity(), cap_before.max(n));
                },
                Op::Truncate(n) => {
                    v.truncate(n);
                    model.truncate(n);
                    prop_assert_eq!(v.capacity(), cap_before);
                },
                Op::Pop => {
                    prop_assert_eq!(v.pop_back(), model.pop());
                },
                Op::Clear => {
                    v.clear();
                    model.clear();
                    prop_assert_eq!(v.capacity(), 0);
                },
            }
            check_invariants(&v, &model)?;
        }
    }

    #[test]
    fn appends_keep_order(n in 0..300usize) {
        let mut v = Vector::<usize>::new();
        for i in 0..n { v.emplace_back(i); }

        prop_assert_eq!(v.len(), n);
        prop_assert!(v.iter().copied().eq(0..n));
    }

    #[test]
    fn insert_shifts_tail(
        base in prop::collection::vec(any::<i32>(), 0..32),
        items in prop::collection::vec(any::<i32>(), 0..32),
        at in any::<prop::sample::Index>(),
    ) {
        let at = at.index(base.len() + 1);
        let mut v = Vector::from(base.clone());
        v.insert(at, items.clone());

        let mut expected = base;
        expected.splice(at..at, items);
        prop_assert_eq!(v, expected);
    }

    #[test]
    fn reverse_cursors_mirror_forward(values in prop::collection::vec(any::<u8>(), 0..32)) {
        let v = Vector::from(values.clone());

        let mut reversed = Vec::new();
        let (mut it, end) = (v.crbegin(), v.crend());
        while it != end {
            reversed.push(unsafe { *it.get() });
            it.move_next();
        }

        let mut forward = Vec::new();
        let (mut it, end) = (v.cbegin(), v.cend());
        while it != end {
            forward.push(unsafe { *it.get() });
            it += 1;
        }

        prop_assert_eq!(&forward, &values);
        reversed.reverse();
        prop_assert_eq!(reversed, values);
    }
}

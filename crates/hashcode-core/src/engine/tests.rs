//! Tests for the dynamic traversal engine.

use super::*;
use crate::test_utils::{fold, fold_record, ih, init_tracing, sh};

/// Override that ignores everything but `id`.
struct Keyed {
    id: u32,
    #[allow(dead_code)]
    payload: String,
}

impl Hashcode for Keyed {
    fn hashcode(&self) -> u64 {
        u64::from(self.id) * 1_000
    }
}

fn sub(a: i64, b: &str, c: Value, e: Value) -> Value {
    Record::new("Sub")
        .field("A", a)
        .field("B", b)
        .field("C", c)
        .field("E", e)
        .into()
}

// ============================================================================
// Primitives
// ============================================================================

mod primitives {
    use super::*;

    #[test]
    fn test_fixtures() {
        let h = StructuralHasher::new();
        assert_eq!(h.hash(&Value::from(123)).unwrap(), 3813);
        assert_eq!(h.hash(&Value::from("Hello")).unwrap(), 2_358_303_207);
        assert_eq!(h.hash(&Value::from(vec![1, 2, 3])).unwrap(), 240_343);
        assert_eq!(h.hash(&Value::from(true)).unwrap(), 1231);
        assert_eq!(h.hash(&Value::from(false)).unwrap(), 1237);
    }

    #[test]
    fn test_matches_static_impls() {
        assert_eq!(Value::from(-5_i8).hashcode(), (-5_i8).hashcode());
        assert_eq!(Value::from(200_u8).hashcode(), 200_u8.hashcode());
        assert_eq!(Value::from(1.25_f32).hashcode(), 1.25_f64.hashcode());
        assert_eq!(Value::from('x').hashcode(), 'x'.hashcode());
        assert_eq!(Value::Bytes(b"Hello".to_vec()).hashcode(), 2_358_303_207);
    }

    #[test]
    fn test_int_and_uint_agree() {
        assert_eq!(Value::Int(123).hashcode(), Value::Uint(123).hashcode());
        assert_eq!(Value::Int(-1).hashcode(), Value::Uint(u64::MAX).hashcode());
    }

    #[test]
    fn test_function_uses_signature() {
        let a = Value::Function("func(int) string".into());
        assert_eq!(a.hashcode(), sh("func(int) string"));
    }
}

// ============================================================================
// Absent values and references
// ============================================================================

mod references {
    use super::*;

    #[test]
    fn test_null_is_zero() {
        assert_eq!(Value::Null.hashcode(), 0);
        assert_eq!(Value::null_ref().hashcode(), 0);
        assert_eq!(Value::from(None::<i32>).hashcode(), 0);
    }

    #[test]
    fn test_reference_resolves() {
        assert_eq!(Value::reference(123).hashcode(), 3813);
        assert_eq!(Value::from(Some(123)).hashcode(), 3813);
        assert_eq!(
            Value::reference(Value::reference("Hello")).hashcode(),
            2_358_303_207
        );
    }

    #[test]
    fn test_absent_ref_ignores_override() {
        let absent = Value::Ref(None);
        let present = Value::reference(Value::custom(Keyed {
            id: 3,
            payload: String::new(),
        }));
        assert_eq!(absent.hashcode(), 0);
        assert_eq!(present.hashcode(), 3_000);
    }
}

// ============================================================================
// Composites
// ============================================================================

mod composites {
    use super::*;

    #[test]
    fn test_map_fixture() {
        let m = Value::map([("one", 1), ("two", 2)]);
        assert_eq!(m.hashcode(), 108_091_655_972);
    }

    #[test]
    fn test_map_permutations_agree() {
        let entries = vec![
            ("alpha", Value::from(1)),
            ("beta", Value::from("two")),
            ("gamma", Value::from(vec![3, 4])),
            ("delta", Value::Null),
        ];
        let expected = Value::map(entries.clone()).hashcode();

        let mut rotated = entries.clone();
        for _ in 0..entries.len() {
            rotated.rotate_left(1);
            assert_eq!(Value::map(rotated.clone()).hashcode(), expected);
        }
        let mut reversed = entries;
        reversed.reverse();
        assert_eq!(Value::map(reversed).hashcode(), expected);
    }

    #[test]
    fn test_colliding_key_text_is_order_independent() {
        // Int(1) and Str("1") render alike but hash differently
        let a = Value::Map(vec![
            (Value::Int(1), Value::from("int")),
            (Value::from("1"), Value::from("str")),
        ]);
        let b = Value::Map(vec![
            (Value::from("1"), Value::from("str")),
            (Value::Int(1), Value::from("int")),
        ]);
        assert_eq!(a.hashcode(), b.hashcode());
    }

    #[test]
    fn test_list_order_sensitive() {
        assert_ne!(
            Value::from(vec![1, 2, 3]).hashcode(),
            Value::from(vec![3, 2, 1]).hashcode()
        );
    }

    #[test]
    fn test_record_empty() {
        assert_eq!(Value::from(Record::new("S")).hashcode(), 2797);
    }

    #[test]
    fn test_record_type_name_discriminates() {
        let a = Record::new("Point").field("x", 1).field("y", 2);
        let b = Record::new("Vector").field("x", 1).field("y", 2);
        assert_eq!(Value::from(a.clone()).hashcode(), fold_record("Point", &[ih(1), ih(2)]));
        assert_ne!(Value::from(a).hashcode(), Value::from(b).hashcode());
    }

    #[test]
    fn test_record_field_policy() {
        let base = |hidden: i64, excluded: &str| -> Value {
            Record::new("Doc")
                .field("title", "t")
                .private_field("cache", hidden)
                .excluded_field("etag", excluded)
                .into()
        };
        let expected = fold_record("Doc", &[sh("t")]);
        assert_eq!(base(1, "a").hashcode(), expected);
        assert_eq!(base(2, "b").hashcode(), expected);
    }

    #[test]
    fn test_record_field_order_is_declared_order() {
        let ab = Record::new("R").field("a", 1).field("b", 2);
        let ba = Record::new("R").field("b", 2).field("a", 1);
        assert_ne!(Value::from(ab).hashcode(), Value::from(ba).hashcode());
    }

    #[test]
    fn test_override_ignores_fields() {
        let a = Value::custom(Keyed {
            id: 9,
            payload: "one".into(),
        });
        let b = Value::custom(Keyed {
            id: 9,
            payload: "two".into(),
        });
        assert_eq!(a.hashcode(), 9_000);
        assert_eq!(a.hashcode(), b.hashcode());
    }

    #[test]
    fn test_nested_reference_fixture() {
        let three: Value = Value::reference(Value::map([("one", "one")]));
        let e = Value::map([
            ("one", Value::from(1)),
            ("two", Value::from("two")),
            ("three", three),
            (
                "sub",
                sub(
                    123,
                    "Hello",
                    Value::from(vec![1_u32, 2, 3]),
                    Value::map([("one", Value::from(1)), ("two", Value::from("two"))]),
                ),
            ),
            (
                "sub-ptr",
                Value::reference(sub(
                    123,
                    "Hello",
                    Value::from(vec![1_u32, 2, 3]),
                    Value::map([("one", 1)]),
                )),
            ),
            (
                "sub-slice",
                Value::List(vec![sub(123, "Hello", Value::List(vec![]), Value::Map(vec![]))]),
            ),
            ("sub-nil", Value::null_ref()),
        ]);
        let s: Value = Record::new("S")
            .field("A", 123)
            .field("B", "Hello")
            .field("C", vec![1_u32, 2, 3])
            .field("E", e)
            .into();

        assert_eq!(s.hashcode(), 15_127_202_206_556_940_116);
    }

    #[test]
    fn test_nested_list_folds_child_hash() {
        let v = Value::List(vec![Value::from(vec![1, 2]), Value::from("x")]);
        assert_eq!(v.hashcode(), fold(&[fold(&[ih(1), ih(2)]), sh("x")]));
    }
}

// ============================================================================
// Strict mode and depth limit
// ============================================================================

mod policy {
    use super::*;

    fn nested(depth: usize) -> Value {
        (0..depth).fold(Value::from(1), |acc, _| Value::List(vec![acc]))
    }

    #[test]
    fn test_unsupported_lenient_is_zero() {
        init_tracing();
        let v = Value::List(vec![Value::Unsupported("chan int".into())]);
        assert_eq!(StructuralHasher::new().hash(&v).unwrap(), fold(&[0]));
    }

    #[test]
    fn test_unsupported_strict_errors() {
        let v = Value::map([("ch", Value::Unsupported("chan int".into()))]);
        let err = StructuralHasher::strict().hash(&v).unwrap_err();
        assert_eq!(
            err,
            HashError::Unsupported {
                kind: ValueKind::Unsupported,
                description: "chan int".into(),
            }
        );
        assert_eq!(StructuralHasher::strict().hash_lossy(&v), 0);
    }

    #[test]
    fn test_strict_agrees_on_supported_values() {
        let v = Value::map([("k", vec![1, 2, 3])]);
        assert_eq!(StructuralHasher::strict().hash(&v).unwrap(), v.hashcode());
    }

    #[test]
    fn test_depth_limit_lenient() {
        init_tracing();
        let hasher = StructuralHasher::with_config(HashConfig::new().with_max_depth(3)).unwrap();
        assert_eq!(hasher.hash(&nested(3)).unwrap(), nested(3).hashcode());

        // The fourth list is cut to 0
        let expected = fold(&[fold(&[fold(&[0])])]);
        assert_eq!(hasher.hash(&nested(4)).unwrap(), expected);
    }

    #[test]
    fn test_depth_limit_strict() {
        let hasher = StructuralHasher::with_config(
            HashConfig::new().with_strict(true).with_max_depth(2),
        )
        .unwrap();
        let err = hasher.hash(&nested(3)).unwrap_err();
        assert_eq!(
            err,
            HashError::DepthExceeded {
                limit: 2,
                kind: ValueKind::Sequence,
            }
        );
    }

    #[test]
    fn test_depth_counts_references() {
        let hasher = StructuralHasher::with_config(
            HashConfig::new().with_strict(true).with_max_depth(1),
        )
        .unwrap();
        assert!(hasher.hash(&Value::reference(1)).is_ok());
        assert!(hasher.hash(&Value::reference(Value::reference(1))).is_err());
    }

    #[test]
    fn test_unbounded_handles_deep_nesting() {
        let v = nested(500);
        assert_eq!(StructuralHasher::new().hash(&v).unwrap(), v.hashcode());
    }

    #[test]
    fn test_zero_depth_config_rejected() {
        let err = StructuralHasher::with_config(HashConfig::new().with_max_depth(0)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let hasher = StructuralHasher::with_config(HashConfig::new().with_max_depth(1)).unwrap();
        assert_eq!(hasher.hash(&Value::List(vec![])), Ok(7));
    }

    #[test]
    fn test_try_hashcode() {
        assert_eq!(try_hashcode(&Value::from(123)), Ok(3813));
        assert!(try_hashcode(&Value::Unsupported("fd".into())).is_err());
    }
}

// ============================================================================
// Settings reach values nested in typed data
// ============================================================================

mod nesting {
    use std::collections::HashMap;

    use super::*;

    /// Structural record over a dynamic payload.
    struct Envelope {
        body: HashMap<String, Value>,
    }

    impl Envelope {
        fn new(key: &str, value: Value) -> Self {
            Self {
                body: HashMap::from([(key.to_string(), value)]),
            }
        }
    }

    impl Hashcode for Envelope {
        fn hashcode(&self) -> u64 {
            traverse(self)
        }

        fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
            hasher.enter(ValueKind::Record, ctx, |ctx| {
                Ok(Combiner::record("Envelope")
                    .field_in(&self.body, hasher, ctx)?
                    .finish())
            })
        }
    }

    fn nested(depth: usize) -> Value {
        (0..depth).fold(Value::from(1), |acc, _| Value::List(vec![acc]))
    }

    #[test]
    fn test_strict_reaches_value_inside_custom() {
        let v = Value::custom(Envelope::new("h", Value::Unsupported("chan int".into())));
        assert_eq!(
            StructuralHasher::strict().hash(&v),
            Err(HashError::Unsupported {
                kind: ValueKind::Unsupported,
                description: "chan int".into(),
            })
        );
        // lenient agrees with the plain hash
        assert_eq!(StructuralHasher::new().hash(&v), Ok(v.hashcode()));
    }

    #[test]
    fn test_depth_limit_reaches_value_inside_custom() {
        let hasher = StructuralHasher::with_config(
            HashConfig::new().with_strict(true).with_max_depth(2),
        )
        .unwrap();
        let v = Value::custom(Envelope::new("deep", nested(10)));
        assert!(matches!(
            hasher.hash(&v),
            Err(HashError::DepthExceeded { limit: 2, .. })
        ));
    }

    #[test]
    fn test_strict_reaches_value_inside_typed_containers() {
        let typed = vec![Some(Box::new(Value::Unsupported("fd".into())))];
        assert!(StructuralHasher::strict().hash(&typed).is_err());
        assert_eq!(StructuralHasher::new().hash(&typed), Ok(typed.hashcode()));
    }

    #[test]
    fn test_override_stays_a_leaf() {
        let hasher = StructuralHasher::with_config(
            HashConfig::new().with_strict(true).with_max_depth(1),
        )
        .unwrap();
        let keyed = Keyed {
            id: 4,
            payload: String::new(),
        };
        assert_eq!(hasher.hash(&Value::custom(keyed)), Ok(4_000));
    }

    #[test]
    fn test_context_depth_restored_between_siblings() {
        let hasher = StructuralHasher::with_config(
            HashConfig::new().with_strict(true).with_max_depth(3),
        )
        .unwrap();
        let wide = Value::List(vec![nested(2), nested(2), nested(2)]);
        assert_eq!(hasher.hash(&wide), Ok(wide.hashcode()));
    }
}

// ============================================================================
// Cycles through shared pointers
// ============================================================================

mod cycles {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    struct Node {
        id: u32,
        next: RefCell<Option<Rc<Node>>>,
    }

    impl Hashcode for Node {
        fn hashcode(&self) -> u64 {
            traverse(self)
        }

        fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
            hasher.enter(ValueKind::Record, ctx, |ctx| {
                Ok(Combiner::record("Node")
                    .field_in(&self.id, hasher, ctx)?
                    .field_in(&self.next, hasher, ctx)?
                    .finish())
            })
        }
    }

    fn node(id: u32) -> Rc<Node> {
        Rc::new(Node {
            id,
            next: RefCell::new(None),
        })
    }

    #[test]
    fn test_self_loop_terminates() {
        init_tracing();
        let a = node(1);
        *a.next.borrow_mut() = Some(Rc::clone(&a));

        let back_edge = fold_record("Node", &[ih(1), 0]);
        assert_eq!(a.hashcode(), back_edge);
        assert_eq!((*a).hashcode(), fold_record("Node", &[ih(1), back_edge]));

        a.next.borrow_mut().take();
    }

    #[test]
    fn test_two_node_cycle_strict_errors() {
        let a = node(1);
        let b = node(2);
        *a.next.borrow_mut() = Some(Rc::clone(&b));
        *b.next.borrow_mut() = Some(Rc::clone(&a));

        assert!(matches!(
            StructuralHasher::strict().hash(&a),
            Err(HashError::Cycle { .. })
        ));
        assert_eq!(
            StructuralHasher::new().hash(&a),
            Ok(fold_record("Node", &[ih(1), fold_record("Node", &[ih(2), 0])]))
        );

        a.next.borrow_mut().take();
    }

    #[test]
    fn test_shared_without_cycle_is_not_a_cycle() {
        let leaf = Rc::new(5);
        let pair = (Rc::clone(&leaf), Rc::clone(&leaf));
        assert_eq!(StructuralHasher::strict().hash(&pair), Ok(fold(&[ih(5), ih(5)])));

        let tail = node(3);
        let a = node(1);
        let b = node(2);
        *a.next.borrow_mut() = Some(Rc::clone(&tail));
        *b.next.borrow_mut() = Some(Rc::clone(&tail));
        let both = vec![a, b];
        assert!(StructuralHasher::strict().hash(&both).is_ok());
    }

    #[test]
    fn test_weak_back_reference_terminates() {
        struct Parent {
            child: RefCell<Option<Rc<Child>>>,
        }
        struct Child {
            parent: std::rc::Weak<Parent>,
        }

        impl Hashcode for Parent {
            fn hashcode(&self) -> u64 {
                traverse(self)
            }

            fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
                Ok(Combiner::record("Parent")
                    .field_in(&self.child, hasher, ctx)?
                    .finish())
            }
        }

        impl Hashcode for Child {
            fn hashcode(&self) -> u64 {
                traverse(self)
            }

            fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
                Ok(Combiner::record("Child")
                    .field_in(&self.parent, hasher, ctx)?
                    .finish())
            }
        }

        let parent = Rc::new(Parent {
            child: RefCell::new(None),
        });
        let child = Rc::new(Child {
            parent: Rc::downgrade(&parent),
        });
        *parent.child.borrow_mut() = Some(child);

        let expected = fold_record("Parent", &[fold_record("Child", &[0])]);
        assert_eq!(parent.hashcode(), expected);
    }
}

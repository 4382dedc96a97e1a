use arithc::{Context, interpreter::symbols::core::SymbolTable};
use proptest::prelude::*;

/// Expression shape used to generate source text and its reference value.
#[derive(Debug, Clone)]
enum Tree {
    Leaf(f64),
    Neg(Box<Tree>),
    Op(char, Box<Tree>, Box<Tree>),
}

impl Tree {
    fn reference(&self) -> f64 {
        match self {
            Self::Leaf(value) => *value,
            Self::Neg(inner) => -inner.reference(),
            Self::Op(op, left, right) => {
                let (l, r) = (left.reference(), right.reference());
                match op {
                    '+' => l + r,
                    '-' => l - r,
                    '*' => l * r,
                    '/' => l / r,
                    '%' => l % r,
                    _ => l.powf(r),
                }
            },
        }
    }

    /// Renders fully parenthesised source. With `leaves` set, every literal
    /// is replaced by a fresh variable whose value is pushed onto it.
    fn render(&self, leaves: &mut Option<Vec<f64>>) -> String {
        match self {
            Self::Leaf(value) => match leaves {
                Some(values) => {
                    values.push(*value);
                    format!("v{}", values.len() - 1)
                },
                None => format!("({value})"),
            },
            Self::Neg(inner) => format!("(-({}))", inner.render(leaves)),
            Self::Op(op, left, right) => {
                format!("({} {op} {})", left.render(leaves), right.render(leaves))
            },
        }
    }
}

fn leaf() -> impl Strategy<Value = Tree> {
    (-1000i32..1000).prop_map(|n| Tree::Leaf(f64::from(n) / 8.0))
}

fn tree() -> impl Strategy<Value = Tree> {
    leaf().prop_recursive(5, 48, 2, |inner| {
              prop_oneof![inner.clone().prop_map(|t| Tree::Neg(Box::new(t))),
                          (prop::sample::select(vec!['+', '-', '*', '/', '%', '^']),
                           inner.clone(),
                           inner).prop_map(|(op, l, r)| Tree::Op(op, Box::new(l), Box::new(r))),]
          })
}

fn same(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
}

#[test]
fn grouped_sign_binds_tighter_than_power() {
    let table = SymbolTable::new();
    let eval = |src: &str| Context::silent().evaluate_source(src, &table);

    assert_eq!(eval("-2^2"), -4.0);
    assert_eq!(eval("(-(2))^2"), 4.0);

    let t = Tree::Op('^', Box::new(Tree::Neg(Box::new(Tree::Leaf(2.0)))), Box::new(Tree::Leaf(2.0)));
    let src = t.render(&mut None);

    assert_eq!(src, "((-((2))) ^ (2))");
    assert_eq!(eval(&src), t.reference());
}

proptest! {
    #[test]
    fn constant_trees_fold_to_the_reference_value(t in tree()) {
        let table = SymbolTable::new();
        let src = t.render(&mut None);

        let expr = Context::silent().compile(&src, &table);
        prop_assert!(expr.is_ok(), "{} failed to compile", src);
        let expr = expr.unwrap();

        prop_assert!(expr.is_constant());
        prop_assert!(same(expr.evaluate(), t.reference()),
                     "{} gave {}, expected {}", src, expr.evaluate(), t.reference());
    }

    #[test]
    fn folding_matches_unfolded_evaluation(t in tree()) {
        let mut leaves = Some(Vec::new());
        let src = t.render(&mut leaves);

        let mut table = SymbolTable::new();
        for (i, value) in leaves.unwrap_or_default().into_iter().enumerate() {
            table.add_variable(format!("v{i}"), value, false);
        }

        let expr = Context::silent().compile(&src, &table).unwrap();
        let first = expr.evaluate();

        prop_assert!(same(first, t.reference()));
        prop_assert_eq!(first.to_bits(), expr.evaluate().to_bits());
    }

    #[test]
    fn variables_track_their_cells(start in -1e6f64..1e6, next in -1e6f64..1e6) {
        let mut table = SymbolTable::new();
        table.add_variable("a", start, false);

        let expr = Context::silent().compile("a * 2 - 1", &table).unwrap();
        prop_assert_eq!(expr.evaluate(), start * 2.0 - 1.0);

        table.find_variable("a").unwrap().set(next);
        prop_assert_eq!(expr.evaluate(), next * 2.0 - 1.0);
    }

    #[test]
    fn scientific_literals_round_trip(x in 0f64..1e300) {
        let table = SymbolTable::new();
        let src = format!("{x:e}");

        prop_assert_eq!(Context::silent().evaluate_source(&src, &table), x);
    }
}

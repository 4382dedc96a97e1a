use arithc::{
    ast::{BinaryOperator, Expr, Span, UnaryOperator},
    build_ast,
    error::{ParseError, ParseErrorKind},
    interpreter::{
        lexer::{Scanner, Token, TokenKind},
        parser::core::{MAX_CALL_ARGUMENTS, MAX_NESTING_DEPTH, Parser},
    },
};
use pretty_assertions::assert_eq;

fn parse(src: &str) -> Expr<'_> {
    match Parser::new(src).parse() {
        Ok(ast) => ast.into_root(),
        Err(e) => panic!("Parsing {src:?} failed: {e}"),
    }
}

fn parse_err(src: &str) -> ParseError {
    match Parser::new(src).parse() {
        Ok(ast) => panic!("Parsing {src:?} succeeded with {:?}", ast.root()),
        Err(e) => e,
    }
}

fn number(value: f64, offset: usize, len: usize) -> Expr<'static> {
    Expr::Number { value,
                   span: Span::new(offset, len) }
}

fn ident(name: &str, offset: usize) -> Expr<'_> {
    Expr::Identifier { name,
                       span: Span::new(offset, name.len()) }
}

fn binary<'a>(left: Expr<'a>, op: BinaryOperator, right: Expr<'a>, offset: usize) -> Expr<'a> {
    Expr::BinaryOp { left: Box::new(left),
                     op,
                     right: Box::new(right),
                     span: Span::new(offset, 1) }
}

fn unary(op: UnaryOperator, expr: Expr<'_>, offset: usize) -> Expr<'_> {
    Expr::UnaryOp { op,
                    expr: Box::new(expr),
                    span: Span::new(offset, 1) }
}

#[test]
fn scanner_reports_offsets_and_lengths() {
    let tokens = Scanner::new(" 12.5e-1*foo_2").collect::<Vec<_>>();

    assert_eq!(tokens,
               vec![Token { kind:   TokenKind::Number,
                            offset: 1,
                            len:    7, },
                    Token { kind:   TokenKind::Star,
                            offset: 8,
                            len:    1, },
                    Token { kind:   TokenKind::Identifier,
                            offset: 9,
                            len:    5, },
                    Token { kind:   TokenKind::EndOfInput,
                            offset: 14,
                            len:    0, }]);
}

#[test]
fn scanner_latches_invalid_input() {
    let mut scanner = Scanner::new("1 + #2");

    assert_eq!(scanner.next_token().kind, TokenKind::Number);
    assert_eq!(scanner.next_token().kind, TokenKind::Plus);

    let invalid = scanner.next_token();
    assert_eq!(invalid.kind, TokenKind::Invalid);
    assert_eq!(invalid.offset, 4);
    assert_eq!(scanner.next_token(), invalid);
    assert_eq!(scanner.next_token(), invalid);
}

#[test]
fn scanner_rejects_malformed_numbers() {
    for src in [".", "1e", "1.2.3", "1e5.0", ".e1", "1e+"] {
        let kinds = Scanner::new(src).map(|t| t.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![TokenKind::Invalid], "input {src:?}");
    }
}

#[test]
fn scanner_keeps_returning_end_of_input() {
    let mut scanner = Scanner::new("x");
    scanner.next_token();

    for _ in 0..3 {
        assert_eq!(scanner.next_token(),
                   Token { kind:   TokenKind::EndOfInput,
                           offset: 1,
                           len:    0, });
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(parse("1 + 2 * x"),
               binary(number(1.0, 0, 1),
                      BinaryOperator::Add,
                      binary(number(2.0, 4, 1), BinaryOperator::Mul, ident("x", 8), 6),
                      2));
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(parse("10-3-2"),
               binary(binary(number(10.0, 0, 2), BinaryOperator::Sub, number(3.0, 3, 1), 2),
                      BinaryOperator::Sub,
                      number(2.0, 5, 1),
                      4));
}

#[test]
fn power_is_right_associative() {
    assert_eq!(parse("2^3^2"),
               binary(number(2.0, 0, 1),
                      BinaryOperator::Pow,
                      binary(number(3.0, 2, 1), BinaryOperator::Pow, number(2.0, 4, 1), 3),
                      1));
}

#[test]
fn sign_binds_looser_than_power() {
    assert_eq!(parse("-2^2"),
               unary(UnaryOperator::Negate,
                     binary(number(2.0, 1, 1), BinaryOperator::Pow, number(2.0, 3, 1), 2),
                     0));
    assert_eq!(parse("2^-x"),
               binary(number(2.0, 0, 1),
                      BinaryOperator::Pow,
                      unary(UnaryOperator::Negate, ident("x", 3), 2),
                      1));
}

#[test]
fn stacked_signs_nest() {
    assert_eq!(parse("-+a"),
               unary(UnaryOperator::Negate, unary(UnaryOperator::Plus, ident("a", 2), 1), 0));
}

#[test]
fn parentheses_leave_no_node() {
    assert_eq!(parse("((7))"), number(7.0, 2, 1));
    assert_eq!(parse("(1 + 2) % 3"),
               binary(binary(number(1.0, 1, 1), BinaryOperator::Add, number(2.0, 5, 1), 3),
                      BinaryOperator::Mod,
                      number(3.0, 10, 1),
                      8));
}

#[test]
fn literals_keep_their_value() {
    for (src, value) in [("5.", 5.0),
                         (".5", 0.5),
                         ("007", 7.0),
                         ("1e3", 1000.0),
                         ("1E+3", 1000.0),
                         ("2.5e-1", 0.25),
                         ("1e400", f64::INFINITY)]
    {
        assert_eq!(parse(src), number(value, 0, src.len()), "input {src:?}");
    }
}

#[test]
fn calls_keep_arguments_in_order() {
    assert_eq!(parse("max(1, x)"),
               Expr::FunctionCall { name:      "max",
                                    arguments: vec![number(1.0, 4, 1), ident("x", 7)],
                                    span:      Span::new(0, 3), });
    assert_eq!(parse("now()"),
               Expr::FunctionCall { name:      "now",
                                    arguments: vec![],
                                    span:      Span::new(0, 3), });
}

#[test]
fn unknown_names_are_accepted_by_the_parser() {
    assert!(matches!(parse("nothing(here)"), Expr::FunctionCall { name: "nothing", .. }));
    assert!(matches!(parse("nothing"), Expr::Identifier { name: "nothing", .. }));
}

#[test]
fn unclosed_group_ends_early() {
    let err = parse_err("(1+2");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    assert_eq!(err.offset, 4);

    let err = build_ast("max(1, 2").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    assert_eq!(err.offset, 8);
}

#[test]
fn missing_operand() {
    let err = parse_err("1 + * 2");
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(err.offset, 4);

    let err = parse_err("1 -");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    assert_eq!(err.offset, 3);

    let err = parse_err("");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    assert_eq!(err.offset, 0);
}

#[test]
fn trailing_tokens() {
    let err = parse_err("1 + 2)");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.offset, 5);

    let err = parse_err("3 x");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.offset, 2);
}

#[test]
fn invalid_input_stops_the_parse() {
    let err = parse_err("1 + 2 @ 3");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.offset, 6);

    let err = parse_err("1 + @");
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(err.offset, 4);
}

#[test]
fn later_errors_are_collected() {
    let err = parse_err("(* 2");

    assert!(!err.kinds.is_empty());
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(err.offset, 1);
    assert!(err.kinds.contains(ParseErrorKind::UnexpectedEndOfInput));
    assert_eq!(err.kinds.len(), 2);
}

#[test]
fn argument_lists_are_capped() {
    let at_limit = format!("f({})", vec!["1"; MAX_CALL_ARGUMENTS].join(","));
    match parse(&at_limit) {
        Expr::FunctionCall { arguments, .. } => assert_eq!(arguments.len(), MAX_CALL_ARGUMENTS),
        other => panic!("expected a call, got {other:?}"),
    }

    let over_limit = format!("f({})", vec!["1"; MAX_CALL_ARGUMENTS + 2].join(","));
    let err = parse_err(&over_limit);
    assert_eq!(err.kind, ParseErrorKind::TooManyArguments);
    // "f(" plus 256 "1," pairs puts the offending comma at 2 + 2 * 256 - 1.
    assert_eq!(err.offset, 2 + 2 * MAX_CALL_ARGUMENTS - 1);
    assert_eq!(err.kinds.len(), 1);
}

#[test]
fn nesting_is_bounded() {
    let parens = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(parse(&parens(MAX_NESTING_DEPTH - 1)), number(1.0, MAX_NESTING_DEPTH - 1, 1));

    let err = parse_err(&parens(MAX_NESTING_DEPTH));
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
    assert_eq!(err.offset, MAX_NESTING_DEPTH);

    let err = parse_err(&parens(50_000));
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
    assert_eq!(err.offset, MAX_NESTING_DEPTH);

    let signs = format!("{}1", "-".repeat(50_000));
    assert_eq!(parse_err(&signs).kind, ParseErrorKind::NestingTooDeep);

    let powers = format!("2{}", "^2".repeat(50_000));
    assert_eq!(parse_err(&powers).kind, ParseErrorKind::NestingTooDeep);
}

#[test]
fn operator_chains_count_toward_nesting() {
    let sum = |terms: usize| format!("1{}", "+1".repeat(terms - 1));

    assert!(Parser::new(&sum(MAX_NESTING_DEPTH + 1)).parse().is_ok());

    let err = parse_err(&sum(50_000));
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
    // The first rejected operator follows MAX_NESTING_DEPTH accepted "+1" pairs.
    assert_eq!(err.offset, 1 + 2 * MAX_NESTING_DEPTH);

    let product = format!("2{}", "*2".repeat(50_000));
    assert_eq!(parse_err(&product).kind, ParseErrorKind::NestingTooDeep);
}

#[test]
fn tree_printer_shows_every_node() {
    let ast = build_ast("-max(a, 2) ^ b").unwrap();

    assert_eq!(ast.to_string(),
               "type: 'unary'
value: '-'
arg:
  type: 'binary'
  value: '^'
  left:
    type: 'call'
    value: 'max'
    args[0]:
      type: 'identifier'
      value: 'a'
    args[1]:
      type: 'number'
      value: '2'
  right:
    type: 'identifier'
    value: 'b'
");
}

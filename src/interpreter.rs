/// The compiler module resolves and optimizes parsed expressions.
///
/// The compiler walks the AST produced by the parser, binds every name to an
/// entry of a symbol table and folds constant subtrees. Its output no longer
/// refers to the source text.
///
/// # Responsibilities
/// - Resolves variables to cell references or constant snapshots.
/// - Resolves calls and checks their argument counts.
/// - Collapses constant unary, binary and call subtrees into single values.
pub mod compiler;
/// The evaluator module computes the value of compiled expressions.
///
/// Evaluation is a plain walk over the compiled tree. It performs no lookups,
/// allocates nothing and cannot fail; arithmetic follows IEEE-754 rules.
pub mod evaluator;
/// The lexer module tokenizes source text for the parser.
///
/// The scanner reads the raw source and produces tokens for numbers,
/// identifiers, operators and punctuation, each with its byte offset and
/// length. This is the first stage of the pipeline.
///
/// # Responsibilities
/// - Converts the input into tokens with kind and source location.
/// - Validates the shape of numeric literals.
/// - Reports input that matches no token.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser consumes the scanner's tokens with one token of lookahead and
/// constructs an AST honouring operator precedence and associativity.
///
/// # Responsibilities
/// - Converts tokens into AST nodes.
/// - Records syntax errors with their byte offsets and keeps parsing to
///   collect further ones.
/// - Caps call argument lists at a fixed maximum.
pub mod parser;
/// The symbols module stores the names expressions are compiled against.
///
/// A symbol table maps names to variables and to native functions with a
/// fixed arity, and can be seeded with the built-in math library.
pub mod symbols;

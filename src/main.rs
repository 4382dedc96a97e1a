use std::{
    io::{self, BufRead},
    process::ExitCode,
};

use arithc::{
    Context,
    diagnostics::Severity,
    interpreter::symbols::core::SymbolTable,
    util::num::format_significant,
};
use clap::Parser;

/// arithc compiles arithmetic expressions and evaluates them.
///
/// With an expression it prints its value. Without one it reads expressions
/// from standard input, one per line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Binds a mutable variable. May be repeated.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    variables: Vec<Binding>,

    /// Binds a constant, folded into expressions at compile time. May be
    /// repeated.
    #[arg(long = "const", value_name = "NAME=VALUE", value_parser = parse_binding)]
    constants: Vec<Binding>,

    /// Table mode prints every input line's value with 20 significant digits,
    /// or `[FAIL] <line>` when it does not compile.
    #[arg(short, long)]
    table: bool,

    /// Suppresses diagnostics.
    #[arg(short, long)]
    quiet: bool,

    /// Expression to evaluate. Reads standard input when omitted.
    expression: Option<String>,
}

#[derive(Debug, Clone)]
struct Binding {
    name:  String,
    value: f64,
}

fn parse_binding(text: &str) -> Result<Binding, String> {
    let Some((name, value)) = text.split_once('=') else {
        return Err(format!("expected NAME=VALUE, got '{text}'"));
    };

    let name = name.trim();
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(format!("'{name}' is not a valid variable name"));
    }

    let value = value.trim()
                     .parse::<f64>()
                     .map_err(|e| format!("invalid value '{value}': {e}"))?;
    Ok(Binding { name: name.to_string(),
                 value })
}

fn main() -> ExitCode {
    let args = Args::parse();

    let context = if args.quiet { Context::silent() } else { Context::default() };

    let mut table = SymbolTable::with_builtins();
    for binding in &args.variables {
        bind(&context, &mut table, binding, false);
    }
    for binding in &args.constants {
        bind(&context, &mut table, binding, true);
    }

    if let Some(expression) = &args.expression {
        return match context.compile(expression, &table) {
            Ok(expr) => {
                println!("{}", expr.evaluate());
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            },
        };
    }

    let input = io::stdin().lock();
    let result = if args.table {
        run_table(&context, &table, input)
    } else {
        run_repl(&context, &table, input)
    };

    if let Err(e) = result {
        eprintln!("Failed to read standard input: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Adds `binding` to `table`, warning when it replaces an existing variable.
fn bind(context: &Context, table: &mut SymbolTable, binding: &Binding, constant: bool) {
    if table.find_variable(&binding.name).is_some() {
        context.handler()
               .handle(Severity::Warn,
                       &format!("Binding '{}' replaces an existing variable", binding.name));
    }
    table.add_variable(binding.name.as_str(), binding.value, constant);
}

fn run_table(context: &Context, table: &SymbolTable, input: impl BufRead) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        match context.compile(&line, table) {
            Ok(expr) => println!("{}", format_significant(expr.evaluate(), 20)),
            Err(_) => println!("[FAIL] {line}"),
        }
    }
    Ok(())
}

fn run_repl(context: &Context, table: &SymbolTable, input: impl BufRead) -> io::Result<()> {
    print_help(table);

    // Source of the last line that parsed, for the `ast` command.
    let mut last: Option<String> = None;

    for line in input.lines() {
        let line = line?;
        if line == "q" {
            break;
        }

        if line == "ast" {
            match &last {
                Some(source) => {
                    if let Ok(ast) = Context::silent().build_ast(source) {
                        print!("{ast}");
                    }
                },
                None => context.handler()
                               .handle(Severity::Info, "No expression has been parsed yet"),
            }
            continue;
        }

        let Ok(ast) = context.build_ast(&line) else {
            context.handler()
                   .handle(Severity::Error, &format!("Failed to build AST: {line}"));
            continue;
        };
        if let Ok(expr) = context.compile_ast(&ast, table) {
            println!("{}", expr.evaluate());
        }
        last = Some(line.clone());
    }
    Ok(())
}

fn print_help(table: &SymbolTable) {
    let mut functions = table.functions()
                             .map(|(name, function)| format!("{name}/{}", function.arity()))
                             .collect::<Vec<_>>();
    functions.sort();

    let mut constants = table.variables()
                             .filter(|(_, variable)| variable.is_constant())
                             .map(|(name, _)| name)
                             .collect::<Vec<_>>();
    constants.sort_unstable();

    let mut variables = table.variables()
                             .filter(|(_, variable)| !variable.is_constant())
                             .map(|(name, variable)| format!("{name} = {}", variable.get()))
                             .collect::<Vec<_>>();
    variables.sort();

    println!("\nAvailable functions:");
    for function in &functions {
        println!("\t{function}");
    }
    println!("\nAvailable constants:");
    for constant in &constants {
        println!("\t{constant}");
    }
    if !variables.is_empty() {
        println!("\nAvailable variables:");
        for variable in &variables {
            println!("\t{variable}");
        }
    }
    println!("\nAvailable operators:");
    for (operator, meaning) in [("+", "sum"),
                                ("-", "subtract"),
                                ("*", "multiply"),
                                ("/", "divide"),
                                ("%", "remainder"),
                                ("^", "exponent")]
    {
        println!("\t'{operator}' - {meaning}");
    }
    println!("\nType 'ast' to show the tree of the last expression, 'q' to quit.\n");
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io::Cursor, rc::Rc};

    use super::*;

    fn recording_context() -> (Context, Rc<RefCell<Vec<(Severity, String)>>>) {
        let messages = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&messages);
        let context = Context::with_handler(move |severity: Severity, message: &str| {
            sink.borrow_mut().push((severity, message.to_string()));
        });
        (context, messages)
    }

    #[test]
    fn bindings_parse() {
        let binding = parse_binding(" rate = 2.5 ").unwrap();
        assert_eq!(binding.name, "rate");
        assert_eq!(binding.value, 2.5);

        assert!(parse_binding("rate").is_err());
        assert!(parse_binding("1x=2").is_err());
        assert!(parse_binding("x=two").is_err());
    }

    #[test]
    fn rebinding_warns() {
        let (context, messages) = recording_context();
        let mut table = SymbolTable::with_builtins();

        bind(&context, &mut table, &parse_binding("rate=1").unwrap(), false);
        assert!(messages.borrow().is_empty());

        bind(&context, &mut table, &parse_binding("pi=3").unwrap(), true);
        assert_eq!(*messages.borrow(),
                   [(Severity::Warn, "Binding 'pi' replaces an existing variable".to_string())]);
        assert_eq!(table.find_variable("pi").unwrap().get(), 3.0);
    }

    #[test]
    fn ast_before_any_expression_is_reported() {
        let (context, messages) = recording_context();
        let table = SymbolTable::with_builtins();

        run_repl(&context, &table, Cursor::new("ast\n1 +\nq\n")).unwrap();

        let messages = messages.borrow();
        assert_eq!(messages[0],
                   (Severity::Info, "No expression has been parsed yet".to_string()));
        assert_eq!(messages.last().unwrap(),
                   &(Severity::Error, "Failed to build AST: 1 +".to_string()));
    }
}

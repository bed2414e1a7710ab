use colored::Colorize;
use design_patterns::behavioral::visitor::{
    ComplexityVisitor, FunctionDefinition, PrettyPrintVisitor, Statement, SyntaxCheckVisitor,
};
use design_patterns::logging;

fn calculate(extra: Vec<Statement>) -> FunctionDefinition {
    let mut body = vec![
        Statement::declare("result", Some("int"), Some("0")),
        Statement::declare("temp", Some("int"), None),
        Statement::if_else(
            "x > y",
            vec![Statement::assign("result", "x"), Statement::assign("temp", "1")],
            Some(vec![Statement::assign("result", "y"), Statement::assign("temp", "0")]),
        ),
        Statement::expr("print(result)"),
    ];
    body.extend(extra);
    FunctionDefinition::new("calculate", &["x", "y"], body)
}

fn main() {
    logging::init();
    println!("{}", "=== Visitor: code analyzer ===".bold());

    let function = calculate(Vec::new());

    let mut printer = PrettyPrintVisitor::default();
    function.accept(&mut printer);
    println!("\n{}\n{}", "Pretty print:".cyan(), printer.output());

    let mut complexity = ComplexityVisitor::new();
    function.accept(&mut complexity);
    println!("\n{} {}", "Complexity:".cyan(), complexity.complexity());

    let mut checker = SyntaxCheckVisitor::new();
    checker.check_function(&function);
    println!("\n{} {}", "Syntax errors:".cyan(), checker.errors().len());

    let broken = calculate(vec![Statement::assign("z", "temp")]);
    checker.reset();
    checker.check_function(&broken);
    println!("\n{}", "With an undeclared variable:".cyan());
    for error in checker.errors() {
        println!("  {}", error.red());
    }
}

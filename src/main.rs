// vexcheck: semantic analyzer for C++ declaration and initialization pitfalls

use std::fs;
use std::io::Read;

use vexcheck::analyzer::diagnostics::Severity;
use vexcheck::analyzer::engine::Analyzer;
use vexcheck::analyzer::judgment::Judgment;
use vexcheck::frontend::ast::Fragment;
use vexcheck::frontend::parse::Parser;

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("vexcheck");
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <file.cpp>", program_name);
        eprintln!();
        eprintln!("Examples:");
        eprintln!(
            "  {} declarations.cpp        # Analyze declaration fragments in a file",
            program_name
        );
        eprintln!(
            "  {} -                       # Read fragments from stdin",
            program_name
        );
        std::process::exit(1);
    }

    let input = &args[1];

    // Read source code from the named file, or stdin for '-'
    let source = if input == "-" {
        let mut buffer = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
            eprintln!("Error: Failed to read stdin: {}", e);
            std::process::exit(1);
        }
        buffer
    } else {
        match fs::read_to_string(input) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error: Failed to read '{}': {}", input, e);
                std::process::exit(1);
            }
        }
    };

    // Parse the source into fragments
    let mut parser = match Parser::new(&source) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let unit = match parser.parse_unit() {
        Ok(unit) => unit,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // Judge every fragment; one judgment block per fragment on stdout
    let mut analyzer = Analyzer::new();
    let judgments = analyzer.analyze_unit(&unit);

    let mut rejected = false;
    for (fragment, judgment) in unit.fragments.iter().zip(&judgments) {
        render_judgment(fragment, judgment);
        if !judgment.is_accepted() {
            rejected = true;
        }
    }

    if rejected {
        std::process::exit(1);
    }
}

/// Print one fragment's judgment: role, deduced type when present, then
/// every diagnostic with a severity prefix.
fn render_judgment(fragment: &Fragment, judgment: &Judgment) {
    let location = fragment.location();
    match &judgment.deduced_type {
        Some(ty) => println!(
            "{} (line {}): {}, deduced type {}",
            fragment.identifier(),
            location.line,
            judgment.role,
            ty
        ),
        None => println!(
            "{} (line {}): {}",
            fragment.identifier(),
            location.line,
            judgment.role
        ),
    }

    for diagnostic in &judgment.diagnostics {
        let prefix = match diagnostic.severity() {
            Severity::Advisory => "note",
            Severity::Rejected | Severity::Structural => "error",
        };
        println!("  {}: {}", prefix, diagnostic);
    }
}

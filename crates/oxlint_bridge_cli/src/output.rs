//! Text output

/// Prints warning blocks, then error blocks, then a summary line.
pub fn output_diagnostics(warnings: &[String], errors: &[String]) {
    for warning in warnings {
        println!("{}", warning);
    }
    for error in errors {
        println!("{}", error);
    }

    println!();
    println!(
        "Found {} warning(s) and {} error(s)",
        warnings.len(),
        errors.len()
    );
}

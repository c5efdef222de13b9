// opwrap CLI driver
//
// Thin glue around the transformation engine: argument parsing, prelude
// lookup, per-file processing, and output writing. Per-node problems are
// reported by the engine and never stop a run; a parse failure is fatal
// for that file only and writes nothing for it.

use clap::Parser;
use parser::source::SourceFile;
use std::path::{Path, PathBuf};
use transform::prelude::{locate_prelude, materialize_builtin, PreludeSource, PRELUDE_FILE_NAME};
use transform::{TransformError, TransformationConfig};

#[derive(Parser, Debug)]
#[command(
    name = "opwrap",
    version,
    about = "Source-to-source operator instrumentation for C-family code"
)]
struct Args {
    /// Input source files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Transform array subscript expressions
    #[arg(long = "array-subscripts", default_value_t = true, action = clap::ArgAction::Set, value_name = "BOOL")]
    array_subscripts: bool,

    /// Transform arithmetic operators (+, -, *, /, %)
    #[arg(long = "arithmetic-ops")]
    arithmetic_ops: bool,

    /// Transform assignment operators (=, +=, -=, etc.)
    #[arg(long = "assignment-ops")]
    assignment_ops: bool,

    /// Transform comparison operators (<, >, ==, !=, etc.)
    #[arg(long = "comparison-ops")]
    comparison_ops: bool,

    /// Transform user-overloaded operators
    #[arg(long = "overloaded-ops")]
    overloaded_ops: bool,

    /// Skip transformations in system headers
    #[arg(long = "skip-system-headers", default_value_t = true, action = clap::ArgAction::Set, value_name = "BOOL")]
    skip_system_headers: bool,

    /// Route template-dependent expressions through runtime dispatch
    #[arg(long = "defer-dependent", default_value_t = true, action = clap::ArgAction::Set, value_name = "BOOL")]
    defer_dependent: bool,

    /// Path to custom prelude header (default: built-in)
    #[arg(long, value_name = "PATH")]
    prelude: Option<PathBuf>,

    /// Output directory for transformed files (default: overwrite)
    #[arg(long = "output-dir", value_name = "DIRECTORY")]
    output_dir: Option<PathBuf>,

    /// Parse and analyze without writing changes
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Print transformation statistics
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set, value_name = "BOOL")]
    stats: bool,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,
}

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let args = Args::parse();

    if let Err(code) = validate_output_directory(args.output_dir.as_deref()) {
        return code;
    }

    let config = build_config(&args);

    if args.verbose {
        print_config(&args, &config);
    }

    let mut worst_exit = 0;
    for file in &args.files {
        let code = process_file(file, &args, &config);
        worst_exit = worst_exit.max(code);
    }
    worst_exit
}

fn build_config(args: &Args) -> TransformationConfig {
    let prelude_path = resolve_prelude(args);
    TransformationConfig {
        transform_array_subscripts: args.array_subscripts,
        transform_arithmetic_operators: args.arithmetic_ops,
        transform_assignment_operators: args.assignment_ops,
        transform_comparison_operators: args.comparison_ops,
        transform_overloaded_operators: args.overloaded_ops,
        instrument_dependent_expressions: args.defer_dependent,
        skip_system_headers: args.skip_system_headers,
        prelude_path,
    }
}

/// Resolve the runtime header the emitted include will reference.
fn resolve_prelude(args: &Args) -> Option<PathBuf> {
    if let Some(path) = &args.prelude {
        if !path.exists() {
            eprintln!("Warning: Prelude file not found: {}", path.display());
        }
    }
    match locate_prelude(args.prelude.as_deref()) {
        PreludeSource::File(path) => Some(path),
        PreludeSource::Builtin => match &args.output_dir {
            // Materialize the embedded header next to the outputs so the
            // relative include resolves
            Some(dir) => match materialize_builtin(dir) {
                Ok(_) => Some(PathBuf::from(PRELUDE_FILE_NAME)),
                Err(e) => {
                    eprintln!("Warning: could not write built-in prelude: {}", e);
                    None
                }
            },
            None => {
                eprintln!("Warning: Using built-in prelude (no external file found)");
                None
            }
        },
    }
}

fn validate_output_directory(output_dir: Option<&Path>) -> Result<(), i32> {
    let Some(dir) = output_dir else {
        return Ok(()); // Overwrite mode
    };
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Error creating output directory: {}", e);
        return Err(1);
    }
    Ok(())
}

fn print_config(args: &Args, config: &TransformationConfig) {
    let on_off = |b: bool| if b { "ON" } else { "OFF" };
    eprintln!("opwrap configuration:");
    eprintln!(
        "  Array subscripts: {}",
        on_off(config.transform_array_subscripts)
    );
    eprintln!(
        "  Arithmetic ops: {}",
        on_off(config.transform_arithmetic_operators)
    );
    eprintln!(
        "  Assignment ops: {}",
        on_off(config.transform_assignment_operators)
    );
    eprintln!(
        "  Comparison ops: {}",
        on_off(config.transform_comparison_operators)
    );
    eprintln!(
        "  Overloaded ops: {}",
        on_off(config.transform_overloaded_operators)
    );
    eprintln!(
        "  Skip system headers: {}",
        on_off(config.skip_system_headers)
    );
    eprintln!(
        "  Defer dependent expressions: {}",
        on_off(config.instrument_dependent_expressions)
    );
    eprintln!(
        "  Prelude path: {}",
        config
            .prelude_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );
    eprintln!(
        "  Output directory: {}",
        args.output_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "overwrite".to_string())
    );
    eprintln!("  Dry run: {}", on_off(args.dry_run));
}

fn process_file(path: &Path, args: &Args, config: &TransformationConfig) -> i32 {
    if args.verbose {
        eprintln!("Processing file: {}", path.display());
    }

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            let err = TransformError::Io {
                path: path.display().to_string(),
                details: e.to_string(),
            };
            eprintln!("Error: {}", err);
            return err.exit_code();
        }
    };
    let source = SourceFile::new(path.display().to_string(), text);

    let outcome = match transform::transform_source(&source, config) {
        Ok(outcome) => outcome,
        Err(parse_errors) => {
            // Fatal for this file: report and write nothing
            parser::error::report_errors(source.name(), source.text(), &parse_errors);
            let err = TransformError::FrontEnd {
                message: format!("{} parse error(s) in {}", parse_errors.len(), path.display()),
            };
            eprintln!("Error: {}", err);
            return err.exit_code();
        }
    };

    if !outcome.diagnostics.is_empty() && (args.verbose || outcome.diagnostics.error_count() > 0) {
        transform::error_report::report_diagnostics(&outcome.diagnostics, &source);
    }

    if args.dry_run {
        if let Ok(detection) = transform::analyze_source(&source) {
            eprintln!("{}", detection);
        }
    }

    if args.stats {
        eprintln!("=== Transformation Complete ===");
        eprintln!("{}", outcome.stats);
        eprintln!("{}", outcome.diagnostics.summary());
    }

    if args.dry_run {
        if args.verbose {
            eprintln!("Dry run - no files written");
        }
        return 0;
    }

    let written = match &args.output_dir {
        Some(dir) => {
            // Copy-through: unchanged files land in the output directory too
            let file_name = path.file_name().unwrap_or(path.as_os_str());
            let out_path = dir.join(file_name);
            std::fs::write(&out_path, &outcome.text).map(|_| Some(out_path))
        }
        None if outcome.changed => std::fs::write(path, &outcome.text).map(|_| Some(path.to_path_buf())),
        None => Ok(None),
    };

    match written {
        Ok(Some(out_path)) => {
            if args.verbose {
                eprintln!("Wrote transformed file: {}", out_path.display());
            }
            0
        }
        Ok(None) => 0,
        Err(e) => {
            let err = TransformError::Io {
                path: path.display().to_string(),
                details: e.to_string(),
            };
            eprintln!("Error: {}", err);
            err.exit_code()
        }
    }
}

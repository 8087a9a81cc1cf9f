use repaste::args;
use repaste::dialect::Dialect;
use repaste::imports::splice_into_document;
use repaste::logging::{ConsoleSink, LogSink};
use repaste::output::report::formatter_for;
use repaste::pipeline;
use repaste::versions::find_project_root;

use std::error::Error;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let args = args::parse_args();

    if args.markdown_help {
        println!("{}", clap_markdown::help_markdown_command(&args::command()));
        return Ok(());
    }

    let log = ConsoleSink::new(args.verbose);

    // The snippet stands in for the clipboard: a file if given, else stdin.
    let snippet = match &args.snippet_file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    if snippet.trim().is_empty() {
        log.warn("Snippet is empty; nothing to paste");
        return Ok(());
    }

    let dest_path = PathBuf::from(&args.dest_file);
    let dest_text = fs::read_to_string(&dest_path)?;

    let dialect = match &args.dialect {
        Some(tag) => Dialect::from_tag(tag),
        None => Dialect::from_extension(&dest_path),
    };
    log.info(&format!("Snippet dialect: {}", dialect));

    let project_root = match &args.project_dir {
        Some(dir) => Some(PathBuf::from(dir)),
        None => dest_path.parent().and_then(find_project_root),
    };

    let outcome = pipeline::run(
        &snippet,
        &dest_text,
        dialect,
        project_root.as_deref(),
        &log,
    );

    if args.apply {
        let merged =
            splice_into_document(&dest_text, &outcome.code, &outcome.imports_to_add, args.line);
        fs::write(&dest_path, merged)?;
        log.info(&format!("Snippet pasted into {}", dest_path.display()));
    } else {
        let formatter = formatter_for(&args.format);
        let report = formatter.format_outcome(&outcome, &dest_path);
        match &args.output_file {
            Some(file) => {
                let mut output = File::create(file)?;
                output.write_all(report.as_bytes())?;
                log.info(&format!("Report written to: {}", file));
            }
            None => {
                print!("{}", report);
                if !report.ends_with('\n') {
                    println!();
                }
            }
        }
    }

    if outcome.adapted {
        log.info("Snippet adapted to the destination style");
    } else {
        log.warn("Snippet was pasted without adaptation");
    }

    Ok(())
}

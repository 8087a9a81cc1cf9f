use clap::{Arg, ArgAction, Command};

pub struct Args {
    pub dest_file: String,
    pub snippet_file: Option<String>,
    pub dialect: Option<String>,
    pub project_dir: Option<String>,
    pub line: Option<usize>,
    pub apply: bool,
    pub output_file: Option<String>,
    pub format: String,
    pub verbose: bool,
    pub markdown_help: bool,
}

pub fn command() -> Command {
    Command::new("repaste")
        .about("Re-style pasted code snippets to match the destination file")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("dest_file")
                .help("The file the snippet is being pasted into")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("snippet")
                .long("snippet")
                .help("Read the snippet from the specified file instead of stdin")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("dialect")
                .long("dialect")
                .help("Snippet dialect (defaults to the destination file extension)")
                .value_name("DIALECT")
                .value_parser(["python", "cfamily"]),
        )
        .arg(
            Arg::new("project_dir")
                .long("project-dir")
                .help("Project root holding the dependency manifest (default: walk up from the destination)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("line")
                .long("line")
                .help("1-based destination line to paste before (default: end of file)")
                .value_name("N")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("apply")
                .long("apply")
                .help("Write the destination file back with imports and snippet spliced in")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .help("Write the report to the specified file instead of stdout")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format (text, json, or code)")
                .value_name("FORMAT")
                .value_parser(["text", "json", "code"])
                .default_value("text"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug details to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("markdown_help")
                .long("markdown-help")
                .help("Generate a markdown version of the help text")
                .action(ArgAction::SetTrue),
        )
}

pub fn parse_args() -> Args {
    let matches = command().get_matches();

    Args {
        dest_file: matches.get_one::<String>("dest_file").unwrap().clone(),
        snippet_file: matches.get_one::<String>("snippet").cloned(),
        dialect: matches.get_one::<String>("dialect").cloned(),
        project_dir: matches.get_one::<String>("project_dir").cloned(),
        line: matches.get_one::<usize>("line").copied(),
        apply: matches.get_flag("apply"),
        output_file: matches.get_one::<String>("output").cloned(),
        format: matches.get_one::<String>("format").unwrap().clone(),
        verbose: matches.get_flag("verbose"),
        markdown_help: matches.get_flag("markdown_help"),
    }
}

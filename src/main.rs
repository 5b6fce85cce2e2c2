use clap::Parser;
use itertools::Itertools;
use log::{error, info};
use rstruth::parser_io::ParseTreeGraph;
use rstruth::table_io::write_csv_filtered;
use rstruth::{Limits, ParsedStatement, TruthTableEntry};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "STATEMENT")]
    /// The statement to tabulate, e.g. "A AND NOT B" or "A * 'B".
    /// If omitted, statements are read one per line from the input
    statement: Option<String>,

    #[clap(short, long, value_parser, value_name = "FILE", conflicts_with = "statement")]
    /// Read statements from FILE instead of stdin
    input: Option<PathBuf>,

    #[clap(long, value_parser, value_name = "FILE")]
    /// Export the truth table(s) as CSV to FILE ('-' for stdout)
    csv: Option<PathBuf>,

    #[clap(long, value_parser, value_name = "FILE", requires = "statement")]
    /// Render the parse tree of the statement in dot (GraphViz) format
    dot: Option<PathBuf>,

    #[clap(short, long, value_parser, value_name = "RESULT", default_value = "any")]
    /// Only show rows whose result is true, false or any
    filter: TruthTableEntry,

    #[clap(
        long,
        value_parser,
        value_name = "N",
        env = "RSTRUTH_MAX_VARIABLES",
        default_value_t = Limits::default().max_variables
    )]
    /// Reject statements with more than N distinct variables
    max_variables: usize,

    #[clap(
        long,
        value_parser,
        value_name = "N",
        env = "RSTRUTH_MAX_DEPTH",
        default_value_t = Limits::default().max_depth
    )]
    /// Reject statements nested or chained deeper than N levels
    max_depth: usize,

    #[clap(short, long, action = clap::ArgAction::Count)]
    /// Increase logging verbosity (-v, -vv, -vvv)
    verbose: u8,
}

fn log_level(verbose: u8) -> simplelog::LevelFilter {
    match verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    }
}

fn create_writer(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        Ok(Box::new(BufWriter::new(io::stdout())) as Box<dyn Write>)
    } else {
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)) as Box<dyn Write>)
    }
}

struct Session {
    limits: Limits,
    filter: TruthTableEntry,
    csv: Option<Box<dyn Write>>,
}

impl Session {
    fn process(&mut self, statement: &str) -> anyhow::Result<ParsedStatement> {
        let parsed = ParsedStatement::new(statement, &self.limits)?;
        let table = parsed.truth_table()?;

        info!(
            "{:?}: {} rows, {} true",
            parsed.label(),
            table.len(),
            table.rows_matching(TruthTableEntry::True).count()
        );

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "Symbols: {}", table.variables().iter().join(", "))?;
        write!(stdout, "{}", table.filtered(self.filter))?;

        if let Some(writer) = self.csv.as_mut() {
            write_csv_filtered(&table, self.filter, writer)?;
        }

        Ok(parsed)
    }
}

fn main() -> anyhow::Result<()> {
    let args =
        argfile::expand_args_from(wild::args_os(), argfile::parse_fromfile, argfile::PREFIX)?;
    let args = Args::parse_from(args);

    simplelog::TermLogger::init(
        log_level(args.verbose),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let mut session = Session {
        limits: Limits::new(args.max_variables).with_max_depth(args.max_depth),
        filter: args.filter,
        csv: args.csv.as_deref().map(create_writer).transpose()?,
    };

    if let Some(statement) = args.statement {
        if statement.trim().is_empty() {
            return Err(anyhow::anyhow!("please enter a statement"));
        }

        let parsed = session.process(&statement)?;

        if let Some(dot_file) = args.dot {
            let mut writer = create_writer(&dot_file)?;
            ParseTreeGraph::new(parsed.expr()).render_dot(&mut writer)?;
            writer.flush()?;
        }
    } else {
        let reader: Box<dyn BufRead> = if let Some(input_file) = args.input {
            Box::new(BufReader::new(File::open(input_file)?))
        } else {
            Box::new(BufReader::new(io::stdin()))
        };

        let mut failures = 0usize;
        let mut first = true;

        for line in reader.lines() {
            let line = line?;
            let statement = line.trim();
            if statement.is_empty() {
                continue;
            }

            if !first {
                println!();
            }
            first = false;

            // a rejected statement does not stop the remaining ones
            if let Err(e) = session.process(statement) {
                error!("{:?}: {}", statement, e);
                failures += 1;
            }
        }

        if failures > 0 {
            Err(anyhow::anyhow!("{} statement(s) could not be tabulated", failures))?
        }
    }

    // flush the writer before dropping it
    if let Some(mut writer) = session.csv.take() {
        writer.flush()?;
    }

    Ok(())
}

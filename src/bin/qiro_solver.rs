use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use ::log::{LevelFilter, info, warn};
use anyhow::{Context, bail};
use glob::glob;
use qiro::{
    config::{ExactConfig, OracleConfig, QiroConfig, SamplingConfig, TableConfig},
    log::build_pace_logger_for_verbosity,
    prelude::*,
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Reduces graphs with correlation-guided elimination rules")]
struct Opts {
    /// Input files in PACE format; glob patterns are expanded. Reads stdin if omitted.
    #[structopt(short = "i", long)]
    input: Vec<String>,

    /// JSON configuration; the flags below override its values
    #[structopt(short = "c", long)]
    config: Option<PathBuf>,

    /// Problem kind (vc, mis, clique). Defaults to the header of the input.
    #[structopt(short = "k", long)]
    kind: Option<ProblemKind>,

    /// Correlation oracle: exact, sampling or table
    #[structopt(short = "o", long)]
    oracle: Option<String>,

    /// Inverse temperature of the exact oracle
    #[structopt(long)]
    beta: Option<f64>,

    /// Largest graph the exact oracle accepts
    #[structopt(long)]
    max_nodes: Option<NumNodes>,

    /// Number of samples of the sampling oracle
    #[structopt(long)]
    samples: Option<usize>,

    /// Fraction of best samples used by the sampling oracle
    #[structopt(long)]
    elite_fraction: Option<f64>,

    #[structopt(short = "s", long)]
    seed: Option<u64>,

    /// JSON file of correlation entries for the table oracle
    #[structopt(long)]
    correlations: Option<PathBuf>,

    /// Score used by the table oracle for pairs missing in the file
    #[structopt(long)]
    default_score: Option<f64>,

    /// standard or inverted
    #[structopt(long)]
    one_point_polarity: Option<Polarity>,

    /// standard or inverted
    #[structopt(long)]
    two_points_polarity: Option<Polarity>,

    /// Print a JSON report including every round instead of the plain solution
    #[structopt(short = "r", long)]
    report: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

impl Opts {
    fn load_config(&self) -> anyhow::Result<QiroConfig> {
        let mut config = match &self.config {
            Some(path) => QiroConfig::from_json_file(path)?,
            None => QiroConfig::default(),
        };

        if let Some(name) = &self.oracle {
            config.oracle = match name.to_ascii_lowercase().as_str() {
                "exact" => OracleConfig::Exact(ExactConfig::default()),
                "sampling" => OracleConfig::Sampling(SamplingConfig::default()),
                "table" => OracleConfig::Table(TableConfig::default()),
                other => bail!("unknown oracle \"{other}\""),
            };
        }

        match &mut config.oracle {
            OracleConfig::Exact(c) => {
                c.beta = self.beta.unwrap_or(c.beta);
                c.max_nodes = self.max_nodes.unwrap_or(c.max_nodes);
            }
            OracleConfig::Sampling(c) => {
                c.samples = self.samples.unwrap_or(c.samples);
                c.elite_fraction = self.elite_fraction.unwrap_or(c.elite_fraction);
                c.seed = self.seed.unwrap_or(c.seed);
            }
            OracleConfig::Table(c) => {
                if self.correlations.is_some() {
                    c.path = self.correlations.clone();
                }
                c.default = self.default_score.or(c.default);
            }
        }

        if let Some(p) = self.one_point_polarity {
            config.one_point_polarity = p;
        }
        if let Some(p) = self.two_points_polarity {
            config.two_points_polarity = p;
        }

        Ok(config)
    }

    fn input_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for pattern in &self.input {
            let before = files.len();
            for entry in glob(pattern).with_context(|| format!("invalid pattern {pattern}"))? {
                files.push(entry?);
            }

            if files.len() == before {
                warn!("pattern {pattern} matched no files");
            }
        }
        Ok(files)
    }
}

/// Reads the graph and resolves the problem kind: flag, then header, then configuration
fn load_problem<R: std::io::BufRead>(
    reader: R,
    opts: &Opts,
    config: &QiroConfig,
) -> anyhow::Result<Problem> {
    let pace_reader = PaceReader::try_new(reader)?;
    let kind = opts
        .kind
        .or(pace_reader.problem_hint())
        .unwrap_or(config.problem);

    let mut graph = AdjArray::new(pace_reader.number_of_nodes());
    for edge in pace_reader {
        let Edge(u, v) = edge?;
        graph.try_add_edge(u, v);
    }

    Ok(Problem::new(kind, graph)?)
}

fn solve_and_print<W: Write>(
    problem: &Problem,
    base: &QiroConfig,
    report: bool,
    mut out: W,
) -> anyhow::Result<()> {
    let config = QiroConfig {
        problem: problem.kind(),
        ..base.clone()
    };
    let solver = config.build_solver()?;
    let result = solver.solve_with_trace(problem)?;

    info!(
        "{}: |S| = {} after {} rounds",
        problem.kind(),
        result.solution.len(),
        result.rounds.len()
    );

    if report {
        serde_json::to_writer(&mut out, &result)?;
        writeln!(out)?;
    } else {
        result.solution.write(&mut out)?;
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_pace_logger_for_verbosity(LevelFilter::Warn, opts.verbose);

    let config = opts.load_config()?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if opts.input.is_empty() {
        let problem = load_problem(std::io::stdin().lock(), &opts, &config)?;
        solve_and_print(&problem, &config, opts.report, &mut out)?;
    } else {
        for file in opts.input_files()? {
            info!("Processing {}", file.display());
            let reader = std::io::BufReader::new(
                std::fs::File::open(&file)
                    .with_context(|| format!("cannot open {}", file.display()))?,
            );
            let problem = load_problem(reader, &opts, &config)
                .with_context(|| format!("cannot read {}", file.display()))?;

            if !opts.report {
                writeln!(out, "c {}", file.display())?;
            }
            solve_and_print(&problem, &config, opts.report, &mut out)
                .with_context(|| format!("solve failed for {}", file.display()))?;
        }
    }

    out.flush()?;
    Ok(())
}

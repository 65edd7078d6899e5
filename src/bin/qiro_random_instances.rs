use std::{
    io::{BufWriter, Write},
    path::PathBuf,
    time::Instant,
};

use ::log::{LevelFilter, info, warn};
use itertools::Itertools;
use qiro::{config::QiroConfig, log::build_pace_logger_for_verbosity, prelude::*};
use serde::Serialize;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Solves connected G(n,p) instances and prints one JSON line per instance")]
struct Opts {
    /// Number of nodes; may be given multiple times
    #[structopt(short = "n", long, default_value = "20")]
    nodes: Vec<NumNodes>,

    /// Expected average degree; may be given multiple times
    #[structopt(short = "d", long, default_value = "3")]
    avg_deg: Vec<f64>,

    /// Instances per parameter combination
    #[structopt(short, long, default_value = "10")]
    repeats: u64,

    #[structopt(short = "k", long, default_value = "vc")]
    kind: ProblemKind,

    /// JSON solver configuration
    #[structopt(short = "c", long)]
    config: Option<PathBuf>,

    #[structopt(short = "s", long, default_value = "1")]
    seed: u64,

    /// Connectivity attempts per instance before giving up
    #[structopt(long, default_value = "100")]
    max_trials: u64,

    /// Directory to store every generated instance in PACE format
    #[structopt(short = "w", long)]
    write: Option<PathBuf>,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

#[derive(Serialize)]
struct InstanceRecord {
    kind: ProblemKind,
    n: NumNodes,
    m: NumEdges,
    p: f64,
    seed: u64,
    solution_size: usize,
    rounds: usize,
    fallbacks: usize,
    valid: bool,
    elapsed_ms: u64,
}

fn is_valid(kind: ProblemKind, graph: &AdjArray, solution: &Solution) -> bool {
    match kind {
        ProblemKind::MinVertexCover => solution.is_vertex_cover(graph),
        ProblemKind::MaxIndependentSet => solution.is_independent_set(graph),
        ProblemKind::MaxClique => solution.is_clique(graph),
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_pace_logger_for_verbosity(LevelFilter::Warn, opts.verbose);

    let config = QiroConfig {
        problem: opts.kind,
        ..match &opts.config {
            Some(path) => QiroConfig::from_json_file(path)?,
            None => QiroConfig::default(),
        }
    };
    let solver = config.build_solver()?;

    if let Some(dir) = &opts.write {
        std::fs::create_dir_all(dir)?;
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut next_seed = opts.seed;

    for (&n, &d) in opts.nodes.iter().cartesian_product(opts.avg_deg.iter()) {
        if n < 2 {
            warn!("skip n={n}: need at least two nodes");
            continue;
        }
        let p = (d / (n - 1) as f64).clamp(0.0, 1.0);

        for _ in 0..opts.repeats {
            let Some((graph, seed)) = connected_gnp(n, p, next_seed, opts.max_trials) else {
                warn!("no connected G({n}, {p:.4}) found starting at seed {next_seed}");
                next_seed += opts.max_trials;
                continue;
            };
            next_seed = seed + 1;

            if let Some(dir) = &opts.write {
                let path = dir.join(format!(
                    "n{n:>03}_m{:>04}_s{seed}.gr",
                    graph.number_of_edges()
                ));
                graph.try_write_pace_file(&opts.kind.to_string(), &path)?;
                info!("Wrote {}", path.display());
            }

            let problem = Problem::new(opts.kind, graph.clone())?;
            let start = Instant::now();
            let report = solver.solve_with_trace(&problem)?;

            let record = InstanceRecord {
                kind: opts.kind,
                n,
                m: graph.number_of_edges(),
                p,
                seed,
                solution_size: report.solution.len(),
                rounds: report.rounds.len(),
                fallbacks: report.rounds.iter().filter(|r| r.rank > 0).count(),
                valid: is_valid(opts.kind, &graph, &report.solution),
                elapsed_ms: start.elapsed().as_millis() as u64,
            };

            serde_json::to_writer(&mut out, &record)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

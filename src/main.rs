use boolean_width::graph::{BaseGraph, BitGraph};
use boolean_width::io::DimacsRead;
use boolean_width::{HeuristicType, Measure, Scoring, Shape, Solver};
use std::convert::TryFrom;
use std::fs::File;
use std::io;
use std::io::{stdin, BufReader};
use std::path::PathBuf;
use structopt::StructOpt;

#[cfg(not(target_env = "msvc"))]
use jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "boolw-cli",
    about = "Computes boolean-width and boolean-cost decompositions for a given input graph."
)]
struct Opt {
    /// Input file in DIMACS / .dgf format. `stdin` if not specified.
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Objective: width or cost.
    #[structopt(short, long, default_value = "width")]
    measure: Measure,

    /// Decomposition shape: linear or tree.
    #[structopt(short, long, default_value = "tree")]
    shape: Shape,

    /// Largest vertex count solved exactly.
    #[structopt(short, long, default_value = "16")]
    exact_limit: usize,

    /// greedy, greedy_light, greedy_light_single_start:<vertex>,
    /// first_improvement or random.
    #[structopt(long, default_value = "first_improvement")]
    heuristic: HeuristicType,

    /// minfront, lun, min_cover_size, relative_neighborhood or
    /// neighborhood_size.
    #[structopt(long, default_value = "minfront")]
    scoring: Scoring,

    /// Swaps evaluated by the local search.
    #[structopt(short, long, default_value = "10000")]
    budget: usize,

    #[structopt(long, default_value = "1337")]
    seed: u64,

    /// Print every cut of the decomposition.
    #[structopt(short, long)]
    trace: bool,

    /// Increase log output, may be repeated.
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u64,
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    #[cfg(feature = "logging")]
    boolean_width::logger::build_logger_for_level(boolean_width::logger::level_from_verbosity(
        opt.verbose,
    ));

    #[cfg(feature = "handle-ctrlc")]
    boolean_width::signals::initialize()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let graph: BitGraph = match &opt.input {
        Some(path) => {
            let file = File::open(path)?;
            BitGraph::try_from(DimacsRead(BufReader::new(file)))?
        }
        None => {
            let stdin = stdin();
            let reader = DimacsRead(stdin.lock());
            BitGraph::try_from(reader)?
        }
    };

    let solver = Solver::default()
        .measure(opt.measure)
        .shape(opt.shape)
        .exact_limit(opt.exact_limit)
        .heuristic(opt.heuristic)
        .scoring(opt.scoring)
        .local_search_budget(opt.budget)
        .seed(opt.seed);

    let result = solver
        .solve(&graph)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    println!(
        "c {} {} of a graph with {} vertices",
        opt.shape,
        opt.measure,
        graph.universe().cardinality()
    );
    println!("s {}", result.objective_value);
    println!("{}", result.decomposition);
    if opt.trace {
        for cut in result.decomposition.trace(&graph) {
            println!("t {}", cut);
        }
    }
    Ok(())
}

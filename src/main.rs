use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sourcing::{
    catalog::CatalogIndex,
    evolution::{GeneticOptimizer, OptimizerOptions, RestartController, RestartOptions},
    fitness::{FitnessEvaluator, FreightPolicy},
    loader, report,
    rng::RandomNumberGenerator,
    Result,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Freight {
    /// Charge a supplier's fee for every line assigned to it
    PerAssignment,
    /// Charge each supplier's fee once
    PerSupplier,
}

impl From<Freight> for FreightPolicy {
    fn from(freight: Freight) -> Self {
        match freight {
            Freight::PerAssignment => FreightPolicy::PerAssignment,
            Freight::PerSupplier => FreightPolicy::PerSupplier,
        }
    }
}

/// Finds the cheapest way to source a cart across suppliers
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Suppliers file (`name;shipping_fee`)
    #[arg(long)]
    suppliers: PathBuf,

    /// Products file (`category;name;price;quantity;supplier`)
    #[arg(long)]
    products: PathBuf,

    /// Cart file (`product;quantity`)
    #[arg(long)]
    cart: PathBuf,

    /// Write the result table to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of independent searches
    #[arg(long, default_value_t = 10)]
    runs: usize,

    /// Individuals per generation (even)
    #[arg(long, default_value_t = 50)]
    population: usize,

    /// Generations per search
    #[arg(long, default_value_t = 100)]
    generations: usize,

    /// Probability that a child is mutated
    #[arg(long, default_value_t = 0.1)]
    mutation_rate: f64,

    /// Seed for reproducible results
    #[arg(long)]
    seed: Option<u64>,

    /// Run the searches concurrently
    #[arg(long)]
    parallel: bool,

    /// How shipping fees are charged
    #[arg(long, value_enum, default_value_t = Freight::PerAssignment)]
    freight: Freight,
}

fn run(args: Args) -> Result<()> {
    let suppliers = loader::load_catalog(&args.suppliers, &args.products)?;
    let cart = loader::load_cart(&args.cart)?;
    let index = CatalogIndex::new(&suppliers);

    let options = OptimizerOptions::builder()
        .population_size(args.population)
        .generations(args.generations)
        .mutation_rate(args.mutation_rate)
        .build();
    let restart = RestartOptions::new(args.runs).with_parallel(args.parallel);

    let mut rng = match args.seed {
        Some(seed) => RandomNumberGenerator::from_seed(seed),
        None => RandomNumberGenerator::new(),
    };

    let controller =
        RestartController::new(GeneticOptimizer::new(FitnessEvaluator::new(args.freight.into())));
    info!(
        freight = ?controller.optimizer().objective().freight_policy(),
        runs = restart.get_runs(),
        "Searching"
    );
    let result = controller.run(&options, &restart, &cart, &index, &mut rng)?;
    let best = &result.best;

    print!("{}", best.solution);
    println!("{}", best.summary);
    println!("Suppliers: {}", best.solution.suppliers().join(", "));

    if let Some(path) = &args.output {
        report::save_report(path, &best.solution, &best.summary)?;
        info!(path = %path.display(), "Report saved");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

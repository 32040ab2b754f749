use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use store_route::{PlannerConfig, Report, RoutePlanner, StoreLayout, Strategy};


#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a route through the given departments
    Plan {
        #[command(flatten)]
        args: PlanArgs,

        /// Departments that must be visited
        stops: Vec<String>,
    },
    /// Plan a route through the departments stocking a shopping list
    Shop {
        #[command(flatten)]
        args: PlanArgs,

        products: Vec<String>,
    },
    /// Departments to visit for a shopping list
    Departments {
        #[arg(short, long)]
        layout: PathBuf,

        products: Vec<String>,
    },
    /// Products from a shopping list stocked by one department
    Items {
        #[arg(short, long)]
        layout: PathBuf,

        #[arg(long)]
        department: String,

        products: Vec<String>,
    },
    /// Check whether any department stocks a product
    Exists {
        #[arg(short, long)]
        layout: PathBuf,

        product: String,
    },
}

#[derive(Args)]
struct PlanArgs {
    /// Store layout JSON document
    #[arg(short, long)]
    layout: PathBuf,

    /// Planner configuration JSON document, command line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    start: Option<String>,

    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Report every vertex of the walk instead of the required stops only
    #[arg(long)]
    full_walk: bool,

    /// End the route at the last stop
    #[arg(long)]
    no_return: bool,

    /// Give up the exhaustive search after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    NearestNeighbor,
    Exhaustive,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::NearestNeighbor => Strategy::NearestNeighbor,
            StrategyArg::Exhaustive => Strategy::Exhaustive,
        }
    }
}

impl PlanArgs {

    fn planner(&self) -> Result<RoutePlanner<StoreLayout>, anyhow::Error> {
        let mut config = match &self.config {
            Some(path) => PlannerConfig::load(path)?,
            None => PlannerConfig::default(),
        };

        if let Some(start) = &self.start {
            config.start = start.clone();
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
        if self.full_walk {
            config.report = Report::FullWalk;
        }
        if self.no_return {
            config.return_to_start = false;
        }
        if self.max_expansions.is_some() {
            config.max_expansions = self.max_expansions;
        }
        config.validate()?;

        info!("Loading store layout {:?}", self.layout);
        let layout = StoreLayout::load(&self.layout)?;
        Ok(RoutePlanner::new(layout, config))
    }
}


#[derive(Serialize)]
struct RouteOutput<'a> {
    strategy: Strategy,
    route: Vec<String>,
    cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    departments: Option<&'a [String]>,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}


fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Plan { args, stops } => {
            let planner = args.planner()?;
            let route = planner.plan_route(&stops)?;
            print_json(&RouteOutput {
                strategy: route.strategy,
                route: route.report(planner.config().report),
                cost: route.cost,
                departments: None,
            })?;
        }
        Commands::Shop { args, products } => {
            let planner = args.planner()?;
            let departments = planner.layout().catalog().departments_for_products(&products)?;
            let route = planner.plan_route(&departments)?;
            print_json(&RouteOutput {
                strategy: route.strategy,
                route: route.report(planner.config().report),
                cost: route.cost,
                departments: Some(departments.as_slice()),
            })?;
        }
        Commands::Departments { layout, products } => {
            let layout = StoreLayout::load(layout)?;
            print_json(&layout.catalog().departments_for_products(&products)?)?;
        }
        Commands::Items { layout, department, products } => {
            let layout = StoreLayout::load(layout)?;
            print_json(&layout.catalog().department_items(&department, &products)?)?;
        }
        Commands::Exists { layout, product } => {
            let layout = StoreLayout::load(layout)?;
            print_json(&layout.catalog().product_exists(&product))?;
        }
    }

    Ok(())
}

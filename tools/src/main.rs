//! territory-runner: headless analysis runner for the territory planner.
//!
//! Usage:
//!   territory-runner --csv portfolio.csv --db runs.db
//!   territory-runner --demo --seed 42 --reps 6 --accounts 12
//!   territory-runner --csv portfolio.csv --growth aggressive --segment Enterprise

use anyhow::Result;
use territory_core::{
    config::EngineConfig,
    demo,
    engine::TerritoryEngine,
    projection::GrowthScenario,
    recommend::format_currency,
    store::PlannerStore,
    types::Segment,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let csv_path = string_arg(&args, "--csv");
    let demo_mode = args.iter().any(|a| a == "--demo");
    let seed = parse_arg(&args, "--seed", 42u64);
    let rep_count = parse_arg(&args, "--reps", 6usize);
    let accounts_per_rep = parse_arg(&args, "--accounts", 12usize);
    let db = string_arg(&args, "--db");
    let config_path = string_arg(&args, "--config");
    let segment = string_arg(&args, "--segment")
        .and_then(|s| Segment::parse_label(&s))
        .unwrap_or(Segment::MidMarket);
    let growth = string_arg(&args, "--growth")
        .and_then(|s| GrowthScenario::parse_label(&s))
        .unwrap_or(GrowthScenario::Expected);

    let config = match &config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let (engine, source) = if demo_mode {
        let accounts = demo::generate_portfolio(seed, rep_count, accounts_per_rep);
        let source = format!("demo(seed={seed})");
        (TerritoryEngine::from_accounts(accounts, config), source)
    } else {
        let path = csv_path
            .ok_or_else(|| anyhow::anyhow!("pass --csv <file> or --demo"))?;
        let text = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        (TerritoryEngine::from_csv(&text, config)?, path)
    };

    print_report(&engine, segment, growth);

    if let Some(db_path) = db {
        let store = PlannerStore::open(&db_path)?;
        store.migrate()?;
        let run_id = format!("run-{}", chrono::Utc::now().timestamp());
        store.insert_run(
            &run_id,
            &source,
            engine.accounts().len(),
            engine.reps().len(),
            env!("CARGO_PKG_VERSION"),
        )?;
        store.save_snapshot(&run_id, "loaded", "baseline", engine.baseline_snapshot())?;
        println!("\nSaved run {run_id} to {db_path}");
    }

    Ok(())
}

fn print_report(engine: &TerritoryEngine, segment: Segment, growth: GrowthScenario) {
    let summary = engine.summary();

    println!("Territory Planner — analysis");
    println!("  team size:      {}", summary.team_size);
    println!("  accounts:       {}", summary.total_accounts);
    println!("  total ARR:      {}", format_currency(summary.total_arr));
    println!(
        "  whitespace:     {}",
        format_currency(summary.total_actionable_whitespace)
    );
    println!(
        "  at-risk ARR:    {} ({:.0}%)",
        format_currency(summary.total_at_risk_arr),
        summary.at_risk_pct
    );
    println!("  required hours: {:.0}", summary.total_required_hours);
    println!("  avg capacity:   {:.0}%", summary.avg_capacity);
    println!("  avg health:     {:.0}", summary.avg_health);
    println!();

    println!("Representatives:");
    for rep in engine.reps() {
        println!(
            "  {:<24} {:>3} accts  {:>9}  {:>5.0} hrs  {:>4.0}% [{:?}]",
            rep.name,
            rep.account_count,
            format_currency(rep.total_arr),
            rep.required_hours,
            rep.capacity_score,
            rep.capacity_status,
        );
    }
    println!();

    let equity = engine.equity();
    println!("Equity scores (100 = perfectly even):");
    for dim in equity.dimensions() {
        println!(
            "  {:<12} score {:>3.0}  cv {:>5.1}  gini {:.2}",
            dim.dimension.label(),
            dim.score,
            dim.cv,
            dim.gini,
        );
    }
    println!();

    let insights = engine.insights();
    if !insights.is_empty() {
        println!("Insights:");
        for insight in &insights {
            println!("  [{:?}] {}", insight.kind, insight.text);
        }
        println!();
    }

    let recommendations = engine.recommendations();
    if recommendations.is_empty() {
        println!("No recommendations — the team is balanced.");
    } else {
        println!("Recommendations:");
        for rec in &recommendations {
            println!("  [{:?}] {}: {}", rec.priority, rec.title, rec.action);
        }
    }
    println!();

    let projection = engine.projection(growth);
    println!("Projection ({growth:?} growth):");
    println!(
        "  projected ARR:  {} (churn {})",
        format_currency(projection.projected.total_arr),
        format_currency(projection.projected.expected_churn),
    );
    println!(
        "  hiring need:    {} (headcount {:.1})",
        projection.projected.hiring_need, projection.projected.required_headcount
    );
    for entry in &projection.timeline {
        println!("  {:<8} {} — {}", entry.day, entry.action, entry.reason);
    }
    println!();

    let benchmark = engine.benchmark_comparison(segment);
    println!("Benchmark vs {segment}:");
    println!(
        "  accounts/rep: {:.0} (range {}, {:?})",
        benchmark.accounts.your_value, benchmark.accounts.benchmark_range, benchmark.accounts.status
    );
    println!(
        "  ARR/rep:      {} (range {}, {:?})",
        format_currency(benchmark.arr.your_value),
        benchmark.arr.benchmark_range,
        benchmark.arr.status
    );
    println!(
        "  capacity:     {:.0}% (target {}, {:?})",
        benchmark.capacity.your_value, benchmark.capacity.benchmark_range, benchmark.capacity.status
    );
    println!(
        "  at-risk:      {:.0}% (target {}, {:?})",
        benchmark.risk.your_value, benchmark.risk.benchmark_range, benchmark.risk.status
    );
}

fn string_arg(args: &[String], flag: &str) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

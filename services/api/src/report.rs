use crate::infra::{parse_date, parse_target_score};
use clap::Args;
use perf_analytics::analytics::{
    AnalyticsEngine, BehavioralScope, BehavioralView, DashboardView, FilterSpec,
};
use perf_analytics::config::AppConfig;
use perf_analytics::dataset::RawDataset;
use perf_analytics::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// JSON export of evaluation documents (array or object keyed by id)
    #[arg(long)]
    pub(crate) evaluations: PathBuf,
    /// Optional JSON export of employee documents for the behavioral summary
    #[arg(long)]
    pub(crate) employees: Option<PathBuf>,
    /// Case-insensitive substring of the employee name
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    /// Exact sector to keep
    #[arg(long)]
    pub(crate) sector: Option<String>,
    /// Inclusive lower date bound (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: Option<String>,
    /// Inclusive upper date bound (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) end: Option<String>,
    /// Reference line for the monthly series (defaults to the configured value)
    #[arg(long, value_parser = parse_target_score)]
    pub(crate) target_score: Option<f64>,
    /// Restrict the behavioral summary to one company id
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// Number of ranking rows to print
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        evaluations,
        employees,
        name,
        sector,
        start,
        end,
        target_score,
        company,
        top,
    } = args;

    let config = AppConfig::load()?;
    let mut engine = AnalyticsEngine::new(config.analytics);
    if let Some(target) = target_score {
        engine = engine.with_target_score(target);
    }

    let raw_evaluations = RawDataset::from_path(&evaluations)?;
    let filter = FilterSpec {
        name,
        sector,
        start,
        end,
    };
    let dashboard = engine.dashboard(raw_evaluations.documents(), &filter);
    println!(
        "Evaluation dashboard ({} documents loaded from {})",
        raw_evaluations.len(),
        evaluations.display()
    );
    render_dashboard(&dashboard, top);

    if let Some(path) = employees {
        let raw_employees = RawDataset::from_path(&path)?;
        let scope = BehavioralScope {
            company,
            ..BehavioralScope::default()
        };
        let behavioral = engine.behavioral(
            raw_employees.documents(),
            raw_evaluations.documents(),
            &scope,
        );
        println!(
            "\nBehavioral profile ({} employee documents loaded from {})",
            raw_employees.len(),
            path.display()
        );
        render_behavioral(&behavioral);
    }

    Ok(())
}

fn render_dashboard(view: &DashboardView, top: usize) {
    let general = &view.general;
    println!(
        "- {} evaluations | average {:.2} | {} sectors | {} employees",
        general.total_evaluations,
        general.average_score,
        general.sector_count,
        general.employee_count
    );
    if let Some(top_performer) = &general.top_performer {
        println!(
            "- Top performer: {} ({} / {}) with {:.2}",
            top_performer.name, top_performer.sector, top_performer.role, top_performer.score
        );
    }

    if !general.sector_distribution.is_empty() {
        println!("Sector distribution:");
        for point in &general.sector_distribution {
            println!("  - {}: {}", point.name, point.value);
        }
    }

    if !view.evolution.is_empty() {
        println!("Monthly evolution:");
        for point in &view.evolution {
            println!(
                "  - {}: leaders {:.2} | others {:.2} | overall {:.2} | target {:.1}",
                point.month, point.leaders, point.others, point.overall, point.target
            );
        }
    }

    if !view.competency.rows.is_empty() {
        println!("Competencies:");
        for row in &view.competency.rows {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|cell| format!("{} {:.2}", cell.sector, cell.average))
                .collect();
            println!(
                "  - {} (overall {:.2}): {}",
                row.criterion,
                row.overall,
                cells.join(", ")
            );
        }
    }

    if !view.ranking.is_empty() {
        println!("Ranking (top {}):", top.min(view.ranking.len()));
        for entry in view.ranking.iter().take(top) {
            println!(
                "  {}. {} [{}] {} -> {:.2}",
                entry.position, entry.name, entry.sector, entry.month, entry.score
            );
        }
    }
}

fn render_behavioral(view: &BehavioralView) {
    println!(
        "- {} employees in scope | {} with a DISC profile",
        view.employee_count, view.profiled_count
    );
    for dimension in &view.dimensions {
        println!("  - {}: {:.1}", dimension.label, dimension.average);
    }
    if !view.type_distribution.is_empty() {
        let counts: Vec<String> = view
            .type_distribution
            .iter()
            .map(|entry| format!("{} {}", entry.label, entry.count))
            .collect();
        println!("- Primary types: {}", counts.join(", "));
    }
    for grouping in &view.groupings {
        println!("By {}:", grouping.dimension_label);
        for group in &grouping.groups {
            let ranked: Vec<String> = group
                .top_types
                .iter()
                .map(|ranked| format!("{} ({:.2})", ranked.label, ranked.average_score))
                .collect();
            println!(
                "  - {} ({} employees): {}",
                group.group,
                group.employee_count,
                ranked.join(", ")
            );
        }
    }
    if view.unmatched_evaluations > 0 || view.ambiguous_evaluations > 0 {
        println!(
            "- {} evaluations without an employee match, {} ambiguous",
            view.unmatched_evaluations, view.ambiguous_evaluations
        );
    }
}

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use optima_core::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "optima")]
#[command(about = "Daily food, workout and step ledger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log grams of a food from the food table
    Food {
        /// Food name (see `optima foods`)
        name: String,

        /// Amount eaten in grams
        grams: f64,
    },

    /// Log a strength exercise
    Workout {
        /// Exercise name (see `optima exercises`)
        exercise: String,

        /// Load in kilograms
        #[arg(long, default_value_t = 0.0)]
        weight: f64,

        /// Reps per set
        #[arg(long, default_value_t = 0)]
        reps: u32,

        /// Number of sets
        #[arg(long, default_value_t = 3)]
        sets: u32,

        /// Use a weight-reps preset such as 17.5-10 instead of --weight/--reps
        #[arg(long, conflicts_with_all = ["weight", "reps"])]
        preset: Option<String>,
    },

    /// Log a step count
    Steps {
        count: u64,
    },

    /// Record body weight
    Weight {
        /// Body weight in kilograms
        kg: f64,

        /// Body fat percentage
        #[arg(long)]
        body_fat: Option<f64>,

        /// Measurement date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show totals for every entry since the last clear (default)
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show every logged entry
    History,

    /// List the food table
    Foods,

    /// List exercises by muscle group
    Exercises {
        /// Only show one muscle group
        #[arg(long)]
        group: Option<String>,
    },

    /// Remove every logged entry (start a new day)
    Clear,
}

fn main() -> ExitCode {
    // Initialize logging
    optima_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let profile = config.profile.to_profile();
    let mut session = Session::open(catalog, profile, SnapshotStore::new(&data_dir))?;

    match cli.command {
        Some(Commands::Food { name, grams }) => {
            let entry = session.log_food(&name, grams)?;
            println!("✓ Food logged: {}", describe(&entry));
        }
        Some(Commands::Workout {
            exercise,
            weight,
            reps,
            sets,
            preset,
        }) => {
            let entry = match preset {
                Some(preset) => session.log_preset(&exercise, &preset, sets)?,
                None => session.log_workout(&exercise, weight, reps, sets)?,
            };
            println!("✓ Set logged: {}", describe(&entry));
        }
        Some(Commands::Steps { count }) => {
            let entry = session.log_steps(count)?;
            println!("✓ Steps logged: {}", describe(&entry));
        }
        Some(Commands::Weight { kg, body_fat, date }) => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let record = session.record_weight(date, kg, body_fat)?;
            match record.body_fat_pct {
                Some(pct) => println!(
                    "✓ Weight recorded: {} kg, {}% body fat on {}",
                    record.weight_kg, pct, record.date
                ),
                None => println!("✓ Weight recorded: {} kg on {}", record.weight_kg, record.date),
            }
        }
        Some(Commands::Summary { json: true }) => {
            println!("{}", session.summary().to_json_pretty()?);
        }
        Some(Commands::Summary { json: false }) | None => display_summary(&session),
        Some(Commands::History) => display_history(session.ledger()),
        Some(Commands::Foods) => display_foods(catalog),
        Some(Commands::Exercises { group }) => display_exercises(catalog, group.as_deref()),
        Some(Commands::Clear) => {
            let removed = session.ledger().len();
            session.clear()?;
            println!("✓ Cleared {} entries", removed);
        }
    }

    Ok(())
}

fn describe(entry: &LogEntry) -> String {
    format!("{} ({:+} kcal)", entry.details(), entry.calories())
}

fn display_summary(session: &Session<'_>) {
    let summary = session.summary();
    let totals = summary.totals;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  DAILY SUMMARY");
    println!("╰─────────────────────────────────────────╯");
    println!();

    if summary.entries == 0 {
        println!("  No logs for today yet. Start logging to see your history!");
        println!();
    }

    println!("  Consumed:            {} kcal", summary.consumed);
    println!("  Burned:              {} kcal", summary.burned);
    println!("  Net Calorie Impact:  {} kcal", totals.calories);
    println!();
    println!(
        "  Protein {:.1} g · Carbs {:.1} g · Fat {:.1} g",
        totals.protein, totals.carbs, totals.fat
    );
    println!(
        "  BMR: {} kcal/day ({:.0}% covered)",
        summary.bmr,
        summary.bmr_progress * 100.0
    );

    let weights = session.weights();
    if let Some(latest) = weights.latest() {
        match weights.trend() {
            Some(delta) => println!(
                "  Weight: {} kg ({:+.1} kg since first record)",
                latest.weight_kg, delta
            ),
            None => println!("  Weight: {} kg", latest.weight_kg),
        }
    }

    println!();
}

fn display_history(ledger: &ActivityLedger<'_>) {
    if ledger.is_empty() {
        println!("No logs for today yet. Start logging to see your history!");
        return;
    }

    println!(
        "{:<6} {:<8} {:<36} {:>8} {:>8} {:>8} {:>8}",
        "Time", "Type", "Details", "Calories", "Protein", "Carbs", "Fat"
    );
    for entry in ledger.entries() {
        let macros = entry.macros();
        println!(
            "{:<6} {:<8} {:<36} {:>8} {:>8.1} {:>8.1} {:>8.1}",
            entry.timestamp().with_timezone(&Local).format("%H:%M"),
            entry.kind().to_string(),
            entry.details(),
            entry.calories(),
            macros.protein,
            macros.carbs,
            macros.fat
        );
    }

    let totals = ledger.daily_totals();
    println!();
    println!("Net Calorie Impact: {} kcal", totals.calories);
}

fn display_foods(catalog: &Catalog) {
    let mut foods: Vec<&FoodProfile> = catalog.foods.values().collect();
    foods.sort_by(|a, b| a.name.cmp(&b.name));

    println!("Per 100 g:");
    for food in foods {
        println!(
            "  {:<22} {:>5} kcal  P {:>5.1}  C {:>5.1}  F {:>5.1}  Fiber {:>4.1}",
            food.name, food.calories, food.protein, food.carbs, food.fat, food.fiber
        );
    }
}

fn display_exercises(catalog: &Catalog, group: Option<&str>) {
    for (name, exercises) in &catalog.exercises.groups {
        if group.is_some_and(|g| !g.eq_ignore_ascii_case(name)) {
            continue;
        }
        println!("{}:", name);
        for exercise in exercises {
            let presets = catalog.exercises.presets_for(exercise);
            if presets.is_empty() {
                println!("  - {}", exercise);
            } else {
                let presets: Vec<String> = presets.iter().map(ToString::to_string).collect();
                println!("  - {} [{}]", exercise, presets.join(", "));
            }
        }
    }
}

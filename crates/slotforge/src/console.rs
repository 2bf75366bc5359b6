//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//! Available with the `console` feature.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the SlotForge banner and sets up tracing. `RUST_LOG` overrides
/// the default `slotforge_solver=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("slotforge_solver=info"));

        // Another subscriber may already be installed by the host program.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 ____  _       _   _____
/ ___|| | ___ | |_|  ___|__  _ __ __ _  ___
\___ \| |/ _ \| __| |_ / _ \| '__/ _` |/ _ \
 ___) | | (_) | |_|  _| (_) | | | (_| |  __/
|____/|_|\___/ \__|_|  \___/|_|  \__, |\___|
                                 |___/
"#;

    let version_line = format!(
        "              v{} - Preference-Weighted Assignment\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Only handle slotforge_solver events
        if !event.metadata().target().starts_with("slotforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_solver_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    bound_mode: Option<String>,
    strategy: Option<String>,
    total_cost: Option<String>,
    error: Option<String>,
    entity_count: Option<u64>,
    person_count: Option<u64>,
    assignments: Option<u64>,
    augmentations: Option<u64>,
    duration_ms: Option<u64>,
    persons: Option<u64>,
    entities: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "bound_mode" => self.bound_mode = Some(s),
            "strategy" => self.strategy = Some(s),
            "total_cost" => self.total_cost = Some(s),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "entity_count" => self.entity_count = Some(value),
            "person_count" => self.person_count = Some(value),
            "assignments" => self.assignments = Some(value),
            "augmentations" => self.augmentations = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "persons" => self.persons = Some(value),
            "entities" => self.entities = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_debug(field, &value);
    }
}

fn format_solver_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "infeasible" => format_infeasible(v),
        "solve_failed" => format_failed(v),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    let entity_count = v.entity_count.unwrap_or(0);
    let person_count = v.person_count.unwrap_or(0);

    format!(
        "{} {} {} entity count ({}), person count ({}), pairings ({}), bounds ({}), strategy ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        entity_count.to_formatted_string(&Locale::en).bright_yellow(),
        person_count.to_formatted_string(&Locale::en).bright_yellow(),
        (entity_count * person_count)
            .to_formatted_string(&Locale::en)
            .bright_magenta(),
        v.bound_mode.as_deref().unwrap_or("exact").white().bold(),
        v.strategy.as_deref().unwrap_or("auto").white(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let assignments = v.assignments.unwrap_or(0);
    let total_cost = v.total_cost.as_deref().unwrap_or("N/A");

    let mut output = format!(
        "{} {} {} Solving ended: time spent ({}), augmentations ({}), total cost ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.augmentations
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
        total_cost.bright_green(),
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');
    output.push_str(&boxed_line("Assignments:", &assignments.to_formatted_string(&Locale::en)));
    output.push('\n');
    output.push_str(&boxed_line("Total Cost:", total_cost));
    output.push('\n');
    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_infeasible(v: &EventVisitor) -> String {
    format!(
        "{} {} {} No assignment under {} bounds: {} person(s), {} entity(ies) cannot be served",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Solver]".bright_cyan(),
        v.bound_mode.as_deref().unwrap_or("exact").white().bold(),
        v.persons.unwrap_or(0).to_string().bright_red(),
        v.entities.unwrap_or(0).to_string().bright_red(),
    )
}

fn format_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Solver]".bright_cyan(),
        v.error.as_deref().unwrap_or("solve failed").bright_red(),
    )
}

fn boxed_line(label: &str, value: &str) -> String {
    format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        label,
        value,
        "║".bright_cyan()
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

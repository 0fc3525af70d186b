//! Colorful console output for GRASP runs.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//! Auto-initialized by the entry points when the `console` feature is enabled.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect. Leaves an
/// already installed global subscriber in place.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "tourforge_solver=info".parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(TourConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 _____                 _____
|_   _|__  _   _ _ __ |  ___|__  _ __ __ _  ___
  | |/ _ \| | | | '__|| |_ / _ \| '__/ _` |/ _ \
  | | (_) | |_| | |   |  _| (_) | | | (_| |  __/
  |_|\___/ \__,_|_|   |_|  \___/|_|  \__, |\___|
                                     |___/
"#;

    let version_line = format!(
        "              v{} - GRASP for the Euclidean TSP\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats engine events with colors.
pub struct TourConsoleLayer;

impl<S: Subscriber> Layer<S> for TourConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("tourforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_engine_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    city_count: Option<u64>,
    max_iterations: Option<u64>,
    iteration: Option<u64>,
    iterations: Option<u64>,
    length: Option<f64>,
    best_length: Option<f64>,
    duration_ms: Option<u64>,
    moves_evaluated: Option<u64>,
    terminated_early: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "event" {
            self.event = Some(format!("{:?}", value).trim_matches('"').to_string());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "event" {
            self.event = Some(value.to_string());
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "city_count" => self.city_count = Some(value),
            "max_iterations" => self.max_iterations = Some(value),
            "iteration" => self.iteration = Some(value),
            "iterations" => self.iterations = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "moves_evaluated" => self.moves_evaluated = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "length" => self.length = Some(value),
            "best_length" => self.best_length = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "terminated_early" {
            self.terminated_early = Some(value);
        }
    }
}

fn format_engine_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "grasp_start" => format_solving_started(v),
        "new_best" => format_new_best(v),
        "grasp_end" => format_solving_ended(v),
        _ => String::new(),
    }
}

fn format_solving_started(v: &EventVisitor) -> String {
    let city_count = v.city_count.unwrap_or(0);
    let max_iterations = v.max_iterations.unwrap_or(0);

    format!(
        "{} {} {} city count ({}), iteration budget ({}), 2-opt neighborhood ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[GRASP]".bright_cyan(),
        city_count.to_formatted_string(&Locale::en).bright_yellow(),
        max_iterations.to_formatted_string(&Locale::en).bright_yellow(),
        neighborhood_size(city_count).to_formatted_string(&Locale::en).bright_magenta()
    )
}

fn format_new_best(v: &EventVisitor) -> String {
    let iteration = v.iteration.unwrap_or(0) + 1;
    let length = v.length.unwrap_or(0.0);

    format!(
        "    {} Iteration {:>7} | {}",
        "->".bright_blue(),
        iteration.to_formatted_string(&Locale::en).white(),
        format!("{length:.2}").bright_green()
    )
}

fn format_solving_ended(v: &EventVisitor) -> String {
    let best_length = v.best_length.unwrap_or(0.0);
    let iterations = v.iterations.unwrap_or(0);
    let duration_ms = v.duration_ms.unwrap_or(0);
    let moves_evaluated = v.moves_evaluated.unwrap_or(0);

    let mut output = format!(
        "{} {} {} Solving ended: best length ({}), time spent ({}), iterations ({}), moves evaluated ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[GRASP]".bright_cyan(),
        format!("{best_length:.2}").bright_green(),
        format_duration_ms(duration_ms).yellow(),
        iterations.to_formatted_string(&Locale::en).white(),
        moves_evaluated.to_formatted_string(&Locale::en).bright_magenta().bold()
    );

    let status = if v.terminated_early.unwrap_or(false) {
        "STOPPED EARLY"
    } else {
        "ITERATION BUDGET SPENT"
    };

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<54}  {}",
        "║".bright_cyan(),
        status,
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&"╠══════════════════════════════════════════════════════════╣".bright_cyan().to_string());
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Best length:",
        format!("{best_length:.2}"),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

/// Candidate reversals in one full 2-opt scan over `city_count` cities.
fn neighborhood_size(city_count: u64) -> u64 {
    if city_count < 4 {
        return 0;
    }
    // Pairs (start, end) with 1 <= start and start + 2 <= end <= n.
    (city_count - 2) * (city_count - 1) / 2
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

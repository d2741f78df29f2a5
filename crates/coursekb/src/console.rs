//! Colorful console output for recommendation runs.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//! Enabled with the `console` feature.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// directives are honored; engine events default to `info`.
pub fn init() {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "coursekb_engine=info".parse() {
            filter = filter.add_directive(directive);
        }

        // A subscriber installed elsewhere wins.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RecommendConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats engine events with colors.
pub struct RecommendConsoleLayer;

impl<S: Subscriber> Layer<S> for RecommendConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Only handle coursekb_engine events
        if !metadata.target().starts_with("coursekb_engine") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    constraints: Option<String>,
    step: Option<String>,
    key: Option<String>,
    keys: Option<String>,
    error: Option<String>,
    duration_ms: Option<u64>,
    matches: Option<u64>,
    total_found: Option<u64>,
    returned: Option<u64>,
    relaxations: Option<u64>,
    filter_passes: Option<u64>,
    courses: Option<u64>,
    count: Option<u64>,
    satisfiable: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, format!("{:?}", value).trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "duration_ms" => self.duration_ms = Some(value),
            "matches" => self.matches = Some(value),
            "total_found" => self.total_found = Some(value),
            "returned" => self.returned = Some(value),
            "relaxations" => self.relaxations = Some(value),
            "filter_passes" => self.filter_passes = Some(value),
            "courses" => self.courses = Some(value),
            "count" => self.count = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "satisfiable" {
            self.satisfiable = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "phase" => &mut self.phase,
            "constraints" => &mut self.constraints,
            "step" => &mut self.step,
            "key" => &mut self.key,
            "keys" => &mut self.keys,
            "error" => &mut self.error,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "recommend_start" => format_recommend_start(v),
        "conflicts_found" => format_conflicts(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "relax_step" => format_step(v),
        "popularity_fallback" => format_fallback(v),
        "catalog_unavailable" => format_unavailable(v),
        "recommend_end" => format_recommend_end(v),
        "conflict_probe" if level == Level::TRACE => format_probe(v),
        _ => String::new(),
    }
}

fn prefix(tag: &str) -> String {
    format!(
        "{} {} {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", tag).bright_cyan()
    )
}

fn format_recommend_start(v: &EventVisitor) -> String {
    format!(
        "{} Recommending for ({})",
        prefix("Recommender"),
        v.constraints.as_deref().unwrap_or("unconstrained").bright_yellow()
    )
}

fn format_conflicts(v: &EventVisitor) -> String {
    let count = v.count.unwrap_or(0);
    if count == 0 {
        return format!("{} No single conflicting constraint", prefix("Conflicts"));
    }
    format!(
        "{} {} conflicting constraint(s): {}",
        prefix("Conflicts"),
        count.to_string().yellow(),
        v.keys.as_deref().unwrap_or("[]").bright_magenta()
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    format!(
        "{} {} phase started from ({})",
        prefix(phase),
        phase.white().bold(),
        v.constraints.as_deref().unwrap_or("unconstrained").bright_yellow()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    format!(
        "{} {} phase ended: time spent ({}), matches ({})",
        prefix(phase),
        phase.white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_count(v.matches.unwrap_or(0)).bright_magenta()
    )
}

fn format_step(v: &EventVisitor) -> String {
    format!(
        "    {} {}",
        "->".bright_blue(),
        v.step.as_deref().unwrap_or("").white()
    )
}

fn format_probe(v: &EventVisitor) -> String {
    let result = if v.satisfiable.unwrap_or(false) {
        "blocking".bright_red().to_string()
    } else {
        "not blocking".bright_black().to_string()
    };
    format!(
        "    {} probe {} {}",
        "?".bright_blue(),
        v.key.as_deref().unwrap_or("?").white(),
        result
    )
}

fn format_fallback(v: &EventVisitor) -> String {
    format!(
        "{} No matches after relaxation, showing {} most popular courses",
        prefix("Fallback"),
        format_count(v.courses.unwrap_or(0)).bright_yellow()
    )
}

fn format_unavailable(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Catalog]".bright_cyan(),
        v.error.as_deref().unwrap_or("unavailable").bright_red()
    )
}

fn format_recommend_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let phase = if phase == "Initial" {
        phase.bright_green().to_string()
    } else {
        phase.yellow().to_string()
    };
    format!(
        "{} Done: {} of {} courses returned, ended in ({}), relaxations ({}), filter passes ({})",
        prefix("Recommender"),
        format_count(v.returned.unwrap_or(0)).bright_green().bold(),
        format_count(v.total_found.unwrap_or(0)).white(),
        phase,
        v.relaxations.unwrap_or(0).to_string().yellow(),
        format_count(v.filter_passes.unwrap_or(0)).bright_magenta()
    )
}

fn format_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_format() {
        assert_eq!(format_duration_ms(12), "12ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_count_format() {
        assert_eq!(format_count(1_500_000), "1,500,000");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("filter_pass".into()),
            ..EventVisitor::default()
        };
        assert!(format_event(Level::DEBUG, &visitor).is_empty());
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}

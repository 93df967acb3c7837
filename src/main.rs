use std::process;

use clap::{Parser, ValueEnum};
use tracing::{debug, Level};
use tune::{parse_score, NotationError, ToneEvent};

/// Beethoven's Fifth, opening bars
const DEMO_SONG: &str = "T180 o2 P2 P8 L8 GGG L2 E- P24 P8 L8 FFF L2 D";

/// Decode PLAY-string notation into tone events
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Notation to decode, optionally with YAML frontmatter (defaults to a demo song)
    notation: Option<String>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Beep)]
    format: Format,
    /// Log decoding steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One line of beep(1) arguments per event
    Beep,
    /// The event list as YAML
    Yaml,
    /// A table with running start times
    Table,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = args.notation.as_deref().unwrap_or(DEMO_SONG);
    let events = match decode(source) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Decoding error: {}", e);
            process::exit(1);
        }
    };
    debug!(count = events.len(), "decoded");

    match args.format {
        Format::Beep => {
            for event in &events {
                println!("{}", beep_args(event));
            }
        }
        Format::Yaml => match serde_yaml::to_string(&events) {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => {
                eprintln!("Error serializing events: {}", e);
                process::exit(1);
            }
        },
        Format::Table => print_table(&events),
    }
}

fn decode(source: &str) -> Result<Vec<ToneEvent>, NotationError> {
    let score = parse_score(source)?;
    if let Some(title) = score.title() {
        eprintln!("Playing {}", title);
    }
    score.context().events().collect()
}

/// `-n -f <hz> -l <ms> -D <ms>`; beep(1) cannot play 0 Hz, so rests use 1 Hz
/// with no length.
fn beep_args(event: &ToneEvent) -> String {
    format!(
        "-n -f {:.3} -l {:.0} -D {:.0}",
        event.frequency_hz.max(1.0),
        1e3 * event.tone_seconds,
        1e3 * event.rest_seconds
    )
}

fn print_table(events: &[ToneEvent]) {
    println!("{:>9} {:>10} {:>8} {:>8}", "start", "freq", "tone", "rest");
    let mut start = 0.0;
    for event in events {
        println!(
            "{:>9.3} {:>10.3} {:>8.3} {:>8.3}",
            start, event.frequency_hz, event.tone_seconds, event.rest_seconds
        );
        start += event.slot_seconds();
    }
    println!("{:>9.3} total", start);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_song_decodes() {
        let events = decode(DEMO_SONG).unwrap();
        // P2 P8 GGG E- P24 P8 FFF D
        assert_eq!(events.len(), 12);
        assert_eq!(events.iter().filter(|e| e.is_rest()).count(), 4);
    }

    #[test]
    fn test_beep_args() {
        let note = ToneEvent {
            frequency_hz: 440.0,
            tone_seconds: 0.4,
            rest_seconds: 0.1,
        };
        assert_eq!(beep_args(&note), "-n -f 440.000 -l 400 -D 100");

        let rest = ToneEvent {
            frequency_hz: 0.0,
            tone_seconds: 0.0,
            rest_seconds: 0.25,
        };
        assert_eq!(beep_args(&rest), "-n -f 1.000 -l 0 -D 250");
    }
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lab_core::readouts::{format_clock, status_label};
use lab_core::{ReactionEngine, WorksheetAnswers, WorksheetField, WorksheetSection};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "lab_cli", about = "Metal displacement lab CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the reaction to completion and print readings.
    Run {
        /// Reaction config JSON.
        #[arg(long, default_value = lab_setup::DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Print a status line every N simulated seconds.
        #[arg(long, default_value_t = 30)]
        print_every: u32,
        /// Write the sample series to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Pace ticks at the config's tick interval instead of as fast as possible.
        #[arg(long)]
        realtime: bool,
    },
    /// Print the lab notebook questions, or a blank answers JSON with --json.
    Worksheet {
        #[arg(long, conflicts_with = "answers")]
        json: bool,
        /// Saved answers JSON. Lists the questions still left blank.
        #[arg(long)]
        answers: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

fn run(config_path: &Path, print_every: u32, csv: Option<&Path>, realtime: bool) -> Result<()> {
    let config = lab_setup::load_config(config_path)?;
    let tick_interval = Duration::from_millis(config.tick_interval_ms);
    let mut engine = ReactionEngine::new(config);

    println!(
        "Starting reaction: duration={}s rate={} initial={:.1}°C rise={:.1}°C speed={}x",
        engine.config().duration,
        engine.config().rate_constant,
        engine.config().initial_temperature,
        engine.config().max_temperature_rise,
        engine.config().playback_speed(),
    );
    println!("{}", "-".repeat(72));
    print_status(&engine);

    engine.start();
    while engine.is_running() {
        if realtime {
            std::thread::sleep(tick_interval);
        }
        engine.tick();
        if print_every > 0 && engine.elapsed_time() % print_every == 0 {
            print_status(&engine);
        }
    }

    println!("{}", "-".repeat(72));
    println!("Done. Final reading:");
    print_status(&engine);

    if let Some(path) = csv {
        write_csv(path, &engine)?;
        println!("Series written to {}", path.display());
    }
    Ok(())
}

fn write_csv(path: &Path, engine: &ReactionEngine) -> Result<()> {
    let file =
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    lab_core::write_series_csv(&mut writer, engine.series())
        .with_context(|| format!("writing {}", path.display()))
}

fn print_status(engine: &ReactionEngine) {
    let state = engine.state();
    let Some(sample) = engine.series().latest() else {
        return;
    };
    println!(
        "[{clock:>5}]  temp={temp:6.2}°C  [Cu2+]={cu:.3}  [Zn2+]={zn:.3}  {status}",
        clock = format_clock(state.elapsed_time),
        temp = state.temperature,
        cu = sample.concentration_oxidizer,
        zn = sample.concentration_reduced_product,
        status = status_label(&state),
    );
}

fn print_worksheet(json: bool, answers: Option<&Path>) -> Result<()> {
    if let Some(path) = answers {
        return print_unanswered(&lab_setup::load_answers(path)?);
    }
    if json {
        let blank = serde_json::to_string_pretty(&WorksheetAnswers::new())
            .context("serializing blank worksheet")?;
        println!("{blank}");
        return Ok(());
    }
    let mut current_section = None;
    for field in WorksheetField::ALL {
        let section = field.section();
        if current_section != Some(section) {
            println!("\n{}", section.title());
            current_section = Some(section);
        }
        match field.placeholder() {
            Some(hint) => println!("  {:<14} {}  ({hint})", field.id(), field.label()),
            None => println!("  {:<14} {}", field.id(), field.label()),
        }
    }
    Ok(())
}

/// Blank questions grouped by notebook section, sections in notebook order.
fn unanswered_by_section(
    answers: &WorksheetAnswers,
) -> Vec<(WorksheetSection, Vec<WorksheetField>)> {
    let mut grouped: Vec<(WorksheetSection, Vec<WorksheetField>)> = Vec::new();
    for field in answers.unanswered() {
        match grouped.last_mut() {
            Some((section, fields)) if *section == field.section() => fields.push(field),
            _ => grouped.push((field.section(), vec![field])),
        }
    }
    grouped
}

fn print_unanswered(answers: &WorksheetAnswers) -> Result<()> {
    let grouped = unanswered_by_section(answers);
    if grouped.is_empty() {
        println!("All {} questions answered.", WorksheetField::ALL.len());
        return Ok(());
    }
    let blank: usize = grouped.iter().map(|(_, fields)| fields.len()).sum();
    println!("{blank} of {} questions unanswered:", WorksheetField::ALL.len());
    for (section, fields) in grouped {
        println!("\n{}", section.title());
        for field in fields {
            println!("  {:<14} {}", field.id(), field.label());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            print_every,
            csv,
            realtime,
        } => run(&config, print_every, csv.as_deref(), realtime)?,
        Commands::Worksheet { json, answers } => print_worksheet(json, answers.as_deref())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_writes_full_series_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("reaction.json");
        std::fs::write(&config_path, r#"{"duration": 20}"#).unwrap();
        let csv_path = dir.path().join("series.csv");

        run(&config_path, 0, Some(csv_path.as_path()), false).unwrap();

        let text = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(text.lines().count(), 22);
        assert!(text.lines().last().unwrap().starts_with("20,"));
    }

    #[test]
    fn run_with_invalid_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("reaction.json");
        std::fs::write(&config_path, r#"{"rate_constant": 0}"#).unwrap();
        assert!(run(&config_path, 0, None, false).is_err());
    }

    #[test]
    fn config_defaults_to_shipped_file() {
        let cli = Cli::try_parse_from(["lab_cli", "run"]).unwrap();
        let Commands::Run { config, .. } = cli.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(config, PathBuf::from(lab_setup::DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn json_and_answers_flags_conflict() {
        let parsed = Cli::try_parse_from(["lab_cli", "worksheet", "--json", "--answers", "a.json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn unanswered_questions_group_by_section() {
        let mut answers = WorksheetAnswers::new();
        for field in WorksheetField::ALL {
            answers.set(field, "done");
        }
        answers.set(WorksheetField::AnalysisQ1, "  ");
        answers.set(WorksheetField::TempFinal, "");

        let grouped = unanswered_by_section(&answers);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, WorksheetField::TempFinal.section());
        assert_eq!(grouped[0].1, vec![WorksheetField::TempFinal]);
        assert_eq!(grouped[1].1, vec![WorksheetField::AnalysisQ1]);
    }

    #[test]
    fn saved_answers_file_lists_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"analysisQ4": "Lost two electrons"}"#).unwrap();
        print_worksheet(false, Some(path.as_path())).unwrap();

        let answers = lab_setup::load_answers(&path).unwrap();
        let blank: usize = unanswered_by_section(&answers)
            .iter()
            .map(|(_, fields)| fields.len())
            .sum();
        assert_eq!(blank, WorksheetField::ALL.len() - 1);
    }
}

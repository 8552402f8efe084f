//! Curriculum CLI
//!
//! Inspect, navigate and validate curriculum data.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use curriculum::{Curriculum, CurriculumConfig, Language, Lesson, Validator};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "curriculum")]
#[command(about = "Inspect and validate curriculum levels, lessons and exercises")]
struct Cli {
    /// Config file (defaults to curriculum.toml and friends)
    #[arg(short, long)]
    config: Option<String>,

    /// Load curriculum data from this directory instead of the built-in bundle
    #[arg(short, long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check references and authoring conventions
    Validate {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List levels in progression order
    Levels,

    /// Show the language features of a level
    Features {
        level: String,
        language: Language,
        /// Include everything permitted by earlier levels
        #[arg(short, long)]
        accumulated: bool,
    },

    /// List lessons, optionally for one level
    Lessons {
        #[arg(short, long)]
        level: Option<String>,
    },

    /// Show the lesson after the given one
    Next { lesson: String },

    /// Show the lesson before the given one
    Previous { lesson: String },

    /// List registered exercises
    Exercises,

    /// Export the whole curriculum as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut config = CurriculumConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(dir) = cli.data {
        config.source.data_dir = Some(dir);
    }
    let format = config.output.format;

    let curriculum = Curriculum::from_config(&config).with_context(|| match config.data_dir() {
        Some(dir) => format!("failed to load curriculum from {}", dir.display()),
        None => "failed to load built-in curriculum".to_string(),
    })?;

    match cli.command {
        Commands::Validate { strict, json } => {
            let mut validator = Validator::from(&config.validation);
            validator.strict |= strict;
            let report = validator.validate(&curriculum);

            if json {
                println!("{}", format.render(&report)?);
            } else {
                println!(
                    "Validating {} {} ({})",
                    curriculum.manifest().name,
                    curriculum.version(),
                    curriculum.checksum().short()
                );
                for finding in &report.errors {
                    println!("  error[{}] {}: {}", finding.code, finding.path, finding.message);
                }
                for finding in &report.warnings {
                    println!("  warning[{}] {}: {}", finding.code, finding.path, finding.message);
                }
                println!(
                    "{} error(s), {} warning(s)",
                    report.errors.len(),
                    report.warnings.len()
                );
            }

            Ok(if report.is_clean() { 0 } else { 1 })
        }

        Commands::Levels => {
            for (position, level) in curriculum.levels().levels().enumerate() {
                let languages: Vec<_> = level.languages().map(|l| l.as_str()).collect();
                println!(
                    "{}. {} - {} [{}]",
                    position + 1,
                    level.id,
                    level.title,
                    languages.join(", ")
                );
            }
            Ok(0)
        }

        Commands::Features {
            level,
            language,
            accumulated,
        } => {
            // Strict: an unknown level is an error here, not an empty result
            curriculum.levels().level(&level)?;
            let features = if accumulated {
                curriculum.accumulated_language_features(&level, language)
            } else {
                curriculum.levels().language_features(&level, language)
            };
            println!("{}", format.render(&features)?);
            Ok(0)
        }

        Commands::Lessons { level } => {
            let lessons: Vec<&Lesson> = match &level {
                Some(id) => curriculum.syllabus().lessons_for_level(id).iter().collect(),
                None => curriculum.syllabus().lessons().collect(),
            };
            for lesson in lessons {
                print_lesson(&curriculum, lesson);
            }
            Ok(0)
        }

        Commands::Next { lesson } => {
            match curriculum.syllabus().next_lesson(&lesson) {
                Some(next) => print_lesson(&curriculum, next),
                None => println!("No lesson after '{}'", lesson),
            }
            Ok(0)
        }

        Commands::Previous { lesson } => {
            match curriculum.syllabus().previous_lesson(&lesson) {
                Some(previous) => print_lesson(&curriculum, previous),
                None => println!("No lesson before '{}'", lesson),
            }
            Ok(0)
        }

        Commands::Exercises => {
            for definition in curriculum.exercises().definitions() {
                println!(
                    "{} - {} (level {}, {} task(s), {} scenario(s))",
                    definition.slug,
                    definition.title,
                    definition.level_id,
                    definition.tasks.len(),
                    definition.scenarios.len()
                );
                for task in &definition.tasks {
                    let scenarios: Vec<&str> = definition
                        .scenarios_for_task(&task.id)
                        .map(|s| s.slug.as_str())
                        .collect();
                    println!("  {}: {}", task.id, scenarios.join(", "));
                }
            }
            Ok(0)
        }

        Commands::Export { output } => {
            let export = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "manifest": curriculum.manifest(),
                "checksum": curriculum.checksum(),
                "levels": curriculum.levels().levels().collect::<Vec<_>>(),
                "syllabus": curriculum.syllabus(),
                "exercises": curriculum.exercises().definitions(),
            });
            let rendered = format.render(&export)?;

            if let Some(path) = output {
                std::fs::write(&path, &rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("Exported {} to {}", curriculum.version(), path.display());
            } else {
                println!("{}", rendered);
            }
            Ok(0)
        }
    }
}

fn print_lesson(curriculum: &Curriculum, lesson: &Lesson) {
    let level = curriculum.syllabus().level_for_lesson(&lesson.id).unwrap_or("?");
    match lesson.content_slug() {
        Some(slug) => println!(
            "{} [{}] {} -> {} ({})",
            lesson.id,
            lesson.lesson_type().as_str(),
            lesson.title,
            slug,
            level
        ),
        None => println!(
            "{} [{}] {} ({})",
            lesson.id,
            lesson.lesson_type().as_str(),
            lesson.title,
            level
        ),
    }
}


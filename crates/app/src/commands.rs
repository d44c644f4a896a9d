//! Subcommand implementations.
//!
//! Every command writes its result to `out` so it can be checked without a
//! terminal. Diagnostics go through `tracing` to stderr.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clearsight_application::ports::{Clock, HighScoreStore, SettingsStore};
use clearsight_application::{ClickResult, ExerciseRunner};
use clearsight_domain::{
    BackgroundColor, ColorVisionType, ExerciseKind, FontFamily, PersistedSettings, SessionOutcome,
    VisionPreference, css_filter, transform,
};
use clearsight_infrastructure::{
    ClearsightConfig, FileHighScoreStore, FileSettingsStore, SystemClock, to_json_stable,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::{info, warn};

use crate::cli::{Commands, DyslexiaArgs, SettingsCommand};

/// Runs one subcommand against the stores in `data_dir`.
pub async fn run<W: Write>(
    command: Commands,
    config: &ClearsightConfig,
    data_dir: &Path,
    out: &mut W,
) -> Result<()> {
    match command {
        Commands::Filter { kind, correction } => filter(out, &kind, correction),
        Commands::Bionic { file } => {
            let text = match file {
                Some(path) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut text = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut text)
                        .await
                        .context("reading stdin")?;
                    text
                }
            };
            bionic(out, &text)
        }
        Commands::Dyslexia => dyslexia(out, &FileSettingsStore::new(data_dir)).await,
        Commands::Settings { action } => {
            settings(out, &FileSettingsStore::new(data_dir), action).await
        }
        Commands::Options => options(out),
        Commands::Scores => scores(out, &FileHighScoreStore::new(data_dir)).await,
        Commands::Play { exercise, seconds } => {
            let kind = ExerciseKind::from_id(&exercise)?;
            let mut runner = ExerciseRunner::new(
                kind,
                config.miss_policy,
                Arc::new(FileHighScoreStore::new(data_dir)),
                Arc::new(SystemClock::new()),
            )
            .with_duration(seconds.unwrap_or_else(|| kind.duration_secs()));
            play(&mut runner, BufReader::new(tokio::io::stdin()), out).await?;
            Ok(())
        }
    }
}

fn parse_vision(kind: &str) -> ColorVisionType {
    let parsed = ColorVisionType::from_key(kind);
    if parsed == ColorVisionType::None && !kind.trim().eq_ignore_ascii_case("none") {
        warn!(kind, "unknown color-vision type, using none");
    }
    parsed
}

/// Prints the CSS filter for `kind`, or `none`.
pub fn filter<W: Write>(out: &mut W, kind: &str, correction: bool) -> Result<()> {
    let filter = css_filter(parse_vision(kind), correction);
    writeln!(out, "{}", filter.unwrap_or("none"))?;
    Ok(())
}

/// Prints every accepted key with its label or CSS value.
pub fn options<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "vision types:")?;
    for kind in ColorVisionType::DEFICIENCIES
        .into_iter()
        .chain([ColorVisionType::None])
    {
        writeln!(out, "  {:<16} {}", kind.key(), kind.label())?;
    }
    writeln!(out, "fonts:")?;
    for font in FontFamily::ALL {
        writeln!(out, "  {:<16} {}", font.key(), font.font_stack())?;
    }
    writeln!(out, "backgrounds:")?;
    for background in BackgroundColor::ALL {
        writeln!(out, "  {:<16} {}", background.key(), background.css_color())?;
    }
    Ok(())
}

/// Prints `text` as bionic HTML.
pub fn bionic<W: Write>(out: &mut W, text: &str) -> Result<()> {
    writeln!(out, "{}", transform(text).to_html())?;
    Ok(())
}

/// Prints the stylesheet the stored dyslexia settings produce.
pub async fn dyslexia<W: Write, S: SettingsStore>(out: &mut W, store: &S) -> Result<()> {
    let settings = store.load().await?.dyslexia_settings;
    if !settings.is_enabled {
        writeln!(out, "dyslexia mode is off")?;
        return Ok(());
    }
    let style = settings.clamped().style();
    writeln!(out, "{}", style.font_rule())?;
    writeln!(out, "body.{} {{", style.mode_class)?;
    for line in style.declarations().lines() {
        writeln!(out, "  {line}")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// Shows or edits persisted settings.
pub async fn settings<W: Write, S: SettingsStore>(
    out: &mut W,
    store: &S,
    action: SettingsCommand,
) -> Result<()> {
    let mut current = store.load().await?;
    match action {
        SettingsCommand::Show => {}
        SettingsCommand::Vision { kind, correction } => {
            current.set_vision(VisionPreference::new(parse_vision(&kind), correction));
            store.save(&current).await?;
            info!(vision = %current.vision_type, correction, "settings saved");
        }
        SettingsCommand::Dyslexia(args) => {
            apply_dyslexia_args(&mut current, &args);
            store.save(&current).await?;
            info!(enabled = current.dyslexia_settings.is_enabled, "settings saved");
        }
    }
    write!(out, "{}", to_json_stable(&current)?)?;
    Ok(())
}

fn apply_dyslexia_args(settings: &mut PersistedSettings, args: &DyslexiaArgs) {
    let dyslexia = &mut settings.dyslexia_settings;
    if args.enable {
        dyslexia.is_enabled = true;
    }
    if args.disable {
        dyslexia.is_enabled = false;
    }
    if let Some(font) = &args.font {
        dyslexia.font_family = FontFamily::from_key(font);
    }
    if let Some(background) = &args.background {
        dyslexia.background_color = BackgroundColor::from_key(background);
    }
    if let Some(size) = args.font_size {
        dyslexia.font_size = size;
    }
    if let Some(spacing) = args.line_spacing {
        dyslexia.line_spacing = spacing;
    }
    if let Some(bionic) = args.bionic {
        dyslexia.bionic_reading = bionic;
    }
    if let Some(ruler) = args.ruler {
        dyslexia.reading_ruler = ruler;
    }
    *dyslexia = dyslexia.clamped();
}

/// Lists stored high scores.
pub async fn scores<W: Write, H: HighScoreStore>(out: &mut W, store: &H) -> Result<()> {
    let all = store.all().await?;
    if all.is_empty() {
        writeln!(out, "no high scores yet")?;
    }
    for (exercise, record) in &all {
        writeln!(
            out,
            "{exercise:<18} {:>6}  {}",
            record.score,
            record.achieved_at.format("%Y-%m-%d %H:%M")
        )?;
    }
    Ok(())
}

fn parse_point(line: &str) -> Option<(f32, f32)> {
    let mut parts = line.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((x, y))
}

/// Plays one session. Each input line is a click `x y`; `q` or end of
/// input ends the session early.
pub async fn play<H, C, R, W>(
    runner: &mut ExerciseRunner<H, C>,
    input: R,
    out: &mut W,
) -> Result<SessionOutcome>
where
    H: HighScoreStore + 'static,
    C: Clock + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut outcomes = runner.subscribe();
    if let Some(target) = runner.start().await? {
        writeln!(
            out,
            "{}: target at {:.0},{:.0} (radius {:.0})",
            runner.kind().id(),
            target.x,
            target.y,
            target.radius
        )?;
    }

    let mut lines = input.lines();
    let outcome = loop {
        if let Some(done) = outcomes.borrow_and_update().clone() {
            break Some(done);
        }
        tokio::select! {
            changed = outcomes.changed() => {
                if changed.is_err() {
                    break runner.end_early().await;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break runner.end_early().await;
                };
                let line = line.trim();
                if line.eq_ignore_ascii_case("q") {
                    break runner.end_early().await;
                }
                let Some((x, y)) = parse_point(line) else {
                    writeln!(out, "expected `x y`, got {line:?}")?;
                    continue;
                };
                match runner.click(x, y).await {
                    ClickResult::Hit { points, next } => {
                        writeln!(out, "hit +{points}, next target at {:.0},{:.0}", next.x, next.y)?;
                    }
                    ClickResult::Miss => writeln!(out, "miss")?,
                    ClickResult::Inactive => writeln!(out, "time is up")?,
                }
            }
        }
    };

    let outcome = outcome.context("no session was played")?;
    writeln!(
        out,
        "{}: score {} ({} hits, {} misses)",
        outcome.exercise_id, outcome.score, outcome.hits, outcome.misses
    )?;
    if outcome.is_new_high {
        writeln!(out, "new high score!")?;
    } else {
        writeln!(out, "high score {}", outcome.high_score)?;
    }
    Ok(outcome)
}

//! Broadside - Entry Point
//!
//! Terminal driver for the quiz battle. It owns everything the library leaves
//! out: prompting, the answer timer, the leaderboard file and difficulty
//! unlocks between battles.

use broadside::campaign::Campaign;
use broadside::combat::{AnswerEvent, AnswerKind, CombatSession, TurnReport};
use broadside::core::{BattleConfig, BroadsideError, Difficulty, PlayerId, Result};
use broadside::persistence::{MemoryScoreStore, ScoreStore};
use broadside::quiz::{builtin_catalog, load_catalog, QuestionBank, QuestionProvider};
use clap::Parser;
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Broadside: Naval Quiz Battle
#[derive(Parser, Debug)]
#[command(name = "broadside")]
#[command(about = "Answer trivia to sink the enemy ship")]
struct Args {
    /// Battle config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Question catalog (TOML); defaults to the built-in catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Seed for question order (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Subject to fight in; prompts when omitted
    #[arg(long)]
    subject: Option<String>,

    /// Difficulty, skipping the unlock check; prompts when omitted
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Player name for the leaderboard
    #[arg(long, default_value = "Captain")]
    player: String,

    /// Leaderboard file (JSON), created if missing
    #[arg(long)]
    scores: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("broadside=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }

    let questions = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => builtin_catalog()?,
    };
    let mut bank = QuestionBank::with_seed(questions, config.rng_seed);
    if bank.is_empty() {
        return Err(BroadsideError::Catalog("catalog has no usable questions".into()));
    }

    let mut store = match &args.scores {
        Some(path) if path.exists() => MemoryScoreStore::from_json(&std::fs::read_to_string(path)?)?,
        _ => MemoryScoreStore::new(),
    };
    let player = store.register_player(&args.player)?;
    let mut campaign = Campaign::new();

    println!("\n=== BROADSIDE: NAVAL QUIZ BATTLE ===");
    println!("Answer correctly to fire. Wrong answers drain shields, then hull.");
    println!("You have {}s per question.", config.answer_timeout_secs);

    loop {
        let subject = match &args.subject {
            Some(subject) => subject.clone(),
            None => match prompt_subject(&bank.list_subjects())? {
                Some(subject) => subject,
                None => break,
            },
        };
        let difficulty = match args.difficulty {
            Some(difficulty) => difficulty,
            None => match prompt_difficulty(&campaign)? {
                Some(difficulty) => difficulty,
                None => break,
            },
        };

        let mut session = match CombatSession::initialize(&mut bank, &subject, difficulty, &config) {
            Ok(session) => session,
            Err(e @ BroadsideError::NoQuestionsAvailable { .. }) => {
                println!("{}. Pick another subject.", e);
                if args.subject.is_some() {
                    break;
                }
                continue;
            }
            Err(e) => return Err(e),
        };

        run_battle(&mut session, &bank, Duration::from_secs(config.answer_timeout_secs))?;
        settle_battle(&session, player, &mut store, &mut campaign, &bank.list_subjects())?;

        if !confirm("Battle again? [y/N] ")? {
            break;
        }
    }

    if let Some(path) = &args.scores {
        std::fs::write(path, store.to_json()?)?;
        tracing::info!("Saved leaderboard to {}", path.display());
    }

    println!("\nFair winds, {}! Total score: {}", args.player, store.total_score(player)?);
    Ok(())
}

/// Drive one battle until the session reports it is over
fn run_battle(session: &mut CombatSession, bank: &QuestionBank, timeout: Duration) -> Result<()> {
    println!(
        "\nEngaging enemy {} in {} ({} questions)",
        session.difficulty().ship_class(),
        session.subject(),
        session.total_questions()
    );

    while !session.is_over() {
        let Some(question) = session.current_question() else {
            break;
        };
        let choices = question.choices.len();

        println!();
        display_status(session);
        if session.is_bonus_question() {
            println!("[BONUS] {}", question.text);
        } else {
            println!("{}", question.text);
        }
        for (i, choice) in question.choices.iter().enumerate() {
            println!("  {}) {}", i + 1, choice);
        }

        let asked = Instant::now();
        let event = loop {
            let input = read_line("> ")?;
            if input == "q" || input == "quit" {
                println!("Battle abandoned.");
                return Ok(());
            }
            if asked.elapsed() > timeout {
                break AnswerEvent::Timeout;
            }
            match input.parse::<usize>() {
                Ok(n) if (1..=choices).contains(&n) => break AnswerEvent::Choice(n - 1),
                _ => println!("Enter a number from 1 to {}", choices),
            }
        };

        let report = session.submit_answer(bank, event)?;
        display_report(&report);
    }

    Ok(())
}

/// Show the result, store it and advance the campaign
fn settle_battle(
    session: &CombatSession,
    player: PlayerId,
    store: &mut MemoryScoreStore,
    campaign: &mut Campaign,
    subjects: &BTreeSet<String>,
) -> Result<()> {
    let (Some(result), Some(stars), Some(outcome)) =
        (session.rank(), session.star_tier(), session.outcome())
    else {
        return Ok(());
    };

    println!("\n=== {:?} ===", outcome);
    println!("Score: {}  ({}%)", session.state().score, result.percent);
    println!("Rank: {}  Stars: {:.1}", stars.label(), stars.stars());
    println!("{}", stars.message());

    let record = session.record(player)?;
    if record.score > 0 {
        store.record_session(record)?;
    }
    if Campaign::clears(stars) {
        store.mark_completed(player, session.subject(), session.difficulty())?;
    }
    if let Some(unlocked) =
        campaign.record_result(session.subject(), session.difficulty(), stars, subjects)
    {
        println!("{} difficulty unlocked!", unlocked);
    }
    if !Campaign::clears(stars) {
        println!("Earn at least one star to clear {}.", session.subject());
    }

    println!("\n--- Leaderboard ---");
    for (i, entry) in store.top_scores(10)?.iter().enumerate() {
        println!(
            "{:>2}. {:<16} {:>5}  acc {:>3.0}%  boosts {}",
            i + 1,
            entry.player_name,
            entry.score,
            entry.accuracy * 100.0,
            entry.weapon_boosts
        );
    }
    Ok(())
}

fn display_status(session: &CombatSession) {
    let state = session.state();
    println!(
        "Hull {}/{}  Shields {}/{}  Enemy {}/{}  Score {}  Weapon {}",
        state.player_hp,
        state.player_max_hp,
        state.player_shields,
        state.player_max_shields,
        state.enemy_hp,
        state.enemy_max_hp,
        state.score,
        session.weapon()
    );
}

fn display_report(report: &TurnReport) {
    match (report.kind, report.was_bonus) {
        (AnswerKind::Correct, true) => {
            print!("Bonus secured! +10% damage for the rest of the battle.");
            if let Some(weapon) = report.weapon_upgrade {
                print!(" Weapon upgraded to {}.", weapon);
            }
            println!();
        }
        (_, true) => println!("Bonus missed. Fight on without it."),
        (AnswerKind::Correct, false) => {
            println!(
                "Hit! {} damage, +{} points.",
                report.damage_dealt, report.points_awarded
            );
            if report.cash_in_points > 0 {
                println!("Early kill bonus: +{} points.", report.cash_in_points);
            }
        }
        (kind, false) => {
            let reason = if kind == AnswerKind::TimedOut { "Too slow!" } else { "Wrong!" };
            if report.shield_lost {
                println!("{} Shield lost ({} left).", reason, report.state.player_shields);
            } else {
                println!("{} Hull hit for {}.", reason, report.hp_lost);
            }
        }
    }
    if report.skipped_points > 0 {
        println!("Unanswered questions: +{} points.", report.skipped_points);
    }
}

fn prompt_subject(subjects: &BTreeSet<String>) -> Result<Option<String>> {
    let subjects: Vec<&String> = subjects.iter().collect();
    println!("\nSubjects:");
    for (i, subject) in subjects.iter().enumerate() {
        println!("  {}) {}", i + 1, subject);
    }
    loop {
        let input = read_line("Subject (q to quit): ")?;
        if input == "q" || input == "quit" {
            return Ok(None);
        }
        match input.parse::<usize>() {
            Ok(n) if (1..=subjects.len()).contains(&n) => return Ok(Some(subjects[n - 1].clone())),
            _ => println!("Enter a number from 1 to {}", subjects.len()),
        }
    }
}

fn prompt_difficulty(campaign: &Campaign) -> Result<Option<Difficulty>> {
    println!("\nDifficulties:");
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let lock = if campaign.is_unlocked(*difficulty) { "" } else { " (locked)" };
        println!("  {}) {} - {}{}", i + 1, difficulty, difficulty.ship_class(), lock);
    }
    loop {
        let input = read_line("Difficulty (q to quit): ")?;
        if input == "q" || input == "quit" {
            return Ok(None);
        }
        let picked = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Difficulty::ALL.get(i).copied());
        match picked {
            Some(difficulty) if campaign.is_unlocked(difficulty) => return Ok(Some(difficulty)),
            Some(difficulty) => println!("{} is locked. Clear every subject below it first.", difficulty),
            None => println!("Enter a number from 1 to {}", Difficulty::ALL.len()),
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    let input = read_line(prompt)?;
    Ok(matches!(input.to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        // EOF behaves like quitting
        return Ok("q".into());
    }
    Ok(input.trim().to_string())
}

//! Flowday CLI entry point
//!
//! Plays the role the UI layer plays in the full product: build the
//! session, run the one-time bootstrap cascade (login, plan,
//! gamification, graph, library), then dispatch the requested command.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveTime};
use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use tracing::info;

use flowday::cli::{Cli, Command};
use flowday::config::Config;
use flowday::session::Session;
use flowday::group_for_today;
use flowgate::{HttpGateway, NewHabit, NewTask, NodeType, PlanItem};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flowday")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("flowday.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("Flowday loaded config: base-url={}", config.gateway.base_url);

    let gateway = HttpGateway::new(
        config.gateway.base_url.as_str(),
        Duration::from_millis(config.gateway.timeout_ms),
    )
    .context("Failed to build gateway")?;

    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let mut session = Session::new(Arc::new(gateway));
    bootstrap(&mut session, date).await?;

    match cli.command.unwrap_or(Command::Today) {
        Command::Today => cmd_today(&session),
        Command::Complete { item_id } => cmd_complete(&mut session, item_id).await,
        Command::Skip { item_id, reason } => cmd_skip(&mut session, item_id, reason).await,
        Command::Map => cmd_map(&session),
        Command::Library => cmd_library(&session),
        Command::AddHabit { name, window } => cmd_add_habit(&mut session, name, window).await,
        Command::AddTask {
            title,
            after,
            difficulty,
        } => cmd_add_task(&mut session, title, after, difficulty).await,
        Command::Review => cmd_review(&mut session, date).await,
    }
}

/// One-time session start: login, then the initial fetch cascade
async fn bootstrap(session: &mut Session, date: NaiveDate) -> Result<()> {
    session.init().await.context("Dev login failed")?;
    session.fetch_plan(date).await.context("Failed to load the day plan")?;
    session
        .fetch_gamification(date)
        .await
        .context("Failed to load gamification")?;
    session.fetch_graph().await.context("Failed to load the graph")?;
    session.fetch_library().await.context("Failed to load the library")?;
    Ok(())
}

/// Show the plan grouped into now / ready / later
fn cmd_today(session: &Session) -> Result<()> {
    let Some(plan) = session.day_plan() else {
        bail!("No plan loaded");
    };

    print!("{}  flow {}", plan.date.to_string().cyan(), plan.flow_score);
    if let Some(snapshot) = session.gamification() {
        print!(
            " | streak {}d | xp {} | flow streak {}",
            snapshot.streak_days, snapshot.xp, snapshot.flow_streak
        );
    }
    println!();

    let view = group_for_today(plan);
    print_section(session, "Now", &view.now);
    print_section(session, "Ready", &view.ready);
    print_section(session, "Later", &view.later);

    let settled = plan.items.iter().filter(|item| item.status.is_settled()).count();
    if settled > 0 {
        println!("\n{}", format!("{settled} item(s) already settled today").dimmed());
    }

    Ok(())
}

fn print_section(session: &Session, title: &str, items: &[&PlanItem]) {
    println!("\n{}", title.bold());

    if items.is_empty() {
        println!("  {}", "nothing here".dimmed());
        return;
    }

    for item in items {
        let window = item
            .scheduled_window_start
            .map(|start| format!(" ~{}", start.format("%H:%M")))
            .unwrap_or_default();
        println!(
            "  [{}] {}{}",
            item.id.to_string().yellow(),
            session.item_label(item),
            window.dimmed()
        );
    }
}

/// Complete an item and report the re-derived state
async fn cmd_complete(session: &mut Session, item_id: i64) -> Result<()> {
    let Some(label) = session
        .day_plan()
        .and_then(|plan| plan.item(item_id))
        .map(|item| session.item_label(item))
    else {
        bail!("Item {item_id} is not in the loaded plan");
    };

    session.complete_item(item_id).await.context("Complete failed")?;

    let status = session
        .day_plan()
        .and_then(|plan| plan.item(item_id))
        .map(|item| item.status.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("{} {} is now {}", "✓".green(), label.bold(), status);
    if let Some(snapshot) = session.gamification() {
        println!("  xp {}", snapshot.xp);
    }

    Ok(())
}

/// Skip an item, then ask the coach about it
async fn cmd_skip(session: &mut Session, item_id: i64, reason: Option<String>) -> Result<()> {
    let Some((node_type, node_id, label)) = session
        .day_plan()
        .and_then(|plan| plan.item(item_id))
        .map(|item| (item.node_type, item.node_id, session.item_label(item)))
    else {
        bail!("Item {item_id} is not in the loaded plan");
    };

    session.skip_item(item_id, reason.as_deref()).await.context("Skip failed")?;
    session
        .request_suggestion(node_type, node_id)
        .await
        .context("Suggestion request failed")?;

    println!("{} skipped {}", "✗".yellow(), label.bold());

    if let Some(suggestion) = session.suggestion() {
        println!("\n{}", "Coach suggests:".bold());
        for action in &suggestion.actions {
            println!("  {} {}: {}", "·".cyan(), action.title.bold(), action.description);
        }
    }

    Ok(())
}

/// Print the derived relationship map
fn cmd_map(session: &Session) -> Result<()> {
    let Some(view) = session.graph_view() else {
        println!("No graph loaded");
        return Ok(());
    };

    if view.nodes.is_empty() {
        println!("No nodes yet - add habits or tasks to see the map.");
        return Ok(());
    }

    println!("{}", "Nodes".bold());
    for node in &view.nodes {
        let id = match node.kind {
            NodeType::Goal => node.id.blue(),
            NodeType::System => node.id.magenta(),
            NodeType::Habit => node.id.green(),
            NodeType::Task => node.id.yellow(),
        };
        println!("  {} {}", id, node.label);
    }

    println!("\n{}", "Links".bold());
    for link in &view.links {
        println!("  {} {} {}", link.source, link.relation.to_string().dimmed(), link.target);
    }

    Ok(())
}

/// List habits and tasks with their anchors
fn cmd_library(session: &Session) -> Result<()> {
    println!("{}", "Habits".bold());
    let mut habits: Vec<_> = session.habits().values().collect();
    habits.sort_by_key(|habit| habit.id);
    if habits.is_empty() {
        println!("  {}", "none yet".dimmed());
    }
    for habit in habits {
        let window = habit
            .soft_window_start
            .map(|start| start.format("%H:%M").to_string())
            .unwrap_or_else(|| "open".to_string());
        let energy = habit.energy_tag.as_deref().unwrap_or("flex");
        println!(
            "  [{}] {} {}",
            habit.id,
            habit.name.bold(),
            format!("window ~{window} | energy {energy}").dimmed()
        );
    }

    println!("\n{}", "Tasks".bold());
    let mut tasks: Vec<_> = session.tasks().values().collect();
    tasks.sort_by_key(|task| task.id);
    if tasks.is_empty() {
        println!("  {}", "none yet".dimmed());
    }
    for task in tasks {
        let follows = task
            .habit_id
            .and_then(|habit_id| session.habits().get(&habit_id))
            .map(|habit| format!("after {}", habit.name))
            .unwrap_or_else(|| "no anchor".to_string());
        println!(
            "  [{}] {} {}",
            task.id,
            task.title.bold(),
            format!("difficulty {} | {follows}", task.difficulty).dimmed()
        );
    }

    Ok(())
}

/// Create a habit under the default system and refresh
async fn cmd_add_habit(session: &mut Session, name: String, window: Option<String>) -> Result<()> {
    let Some(system_id) = session.default_system_id() else {
        bail!("The library has no habits yet, so there is no system to attach to; seed the service first");
    };

    let window = window
        .map(|raw| NaiveTime::parse_from_str(&raw, "%H:%M").context(format!("Invalid window time: {raw}")))
        .transpose()?;

    let mut habit = NewHabit::new(system_id, name);
    habit.soft_window_start = window;
    habit.soft_window_end = window;
    habit.recurrence_rule = Some("daily".to_string());

    let Some(created) = session.create_habit(habit).await.context("Create habit failed")? else {
        bail!("Session not initialized");
    };

    session.fetch_library().await.context("Failed to refresh the library")?;
    session.fetch_graph().await.context("Failed to refresh the graph")?;

    println!("{} Added habit [{}] {}", "✓".green(), created.id, created.name.bold());
    Ok(())
}

/// Create a task and refresh
async fn cmd_add_task(
    session: &mut Session,
    title: String,
    after: Option<i64>,
    difficulty: Option<u8>,
) -> Result<()> {
    let mut task = NewTask::new(title);
    task.habit_id = after;

    if let Some(difficulty) = difficulty {
        if !(1..=5).contains(&difficulty) {
            bail!("Difficulty must be between 1 and 5");
        }
        task.difficulty = difficulty;
    }

    let Some(created) = session.create_task(task).await.context("Create task failed")? else {
        bail!("Session not initialized");
    };

    session.fetch_library().await.context("Failed to refresh the library")?;
    session.fetch_graph().await.context("Failed to refresh the graph")?;

    println!("{} Added task [{}] {}", "✓".green(), created.id, created.title.bold());
    Ok(())
}

/// Show the daily review for the date
async fn cmd_review(session: &mut Session, date: NaiveDate) -> Result<()> {
    session
        .fetch_daily_review(date)
        .await
        .context("Failed to load the daily review")?;

    let Some(review) = session.last_review() else {
        bail!("No review available");
    };

    println!("{} {}", "Review for".bold(), date.to_string().cyan());
    println!("\n{}", review.summary);
    println!(
        "\ncompleted {:.0}% | flow {}",
        review.completion_rate * 100.0,
        review.flow_score
    );

    if !review.tweaks.is_empty() {
        println!("\n{}", "Suggested tweaks".bold());
        for tweak in &review.tweaks {
            println!("  {} {}: {}", "·".cyan(), tweak.title.bold(), tweak.description);
        }
    }

    Ok(())
}

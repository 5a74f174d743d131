use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use swatter_core::constants::FRAMES_PER_SECOND;
use swatter_core::{run_headless, Board, Difficulty, HeadlessSummary, Session, SessionPhase};
use swatter_host::bots::create_bot;
use swatter_host::{
    parse_seed, seed_from_clock, seed_to_hex, ControllerOptions, FinalScore, LeaderboardClient,
    LogSink, RankedScore, ScoreSink, SessionController,
};

#[derive(Parser, Debug)]
#[command(name = "swatter-sim")]
#[command(about = "Play a bug swatter session with a simulated player")]
struct Cli {
    /// easy|medium|hard; anything else falls back to easy
    #[arg(long, default_value = "easy")]
    difficulty: String,
    /// Session seed, decimal or 0x-prefixed hex. Random when omitted.
    #[arg(long)]
    seed: Option<String>,
    /// idle|greedy|random
    #[arg(long, default_value = "greedy")]
    bot: String,
    /// Frames the bot waits between clicks
    #[arg(long, default_value_t = 12)]
    reaction_frames: u32,
    #[arg(long, default_value = "bot")]
    name: String,
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    #[arg(long, default_value_t = 600.0)]
    height: f64,
    #[arg(long, value_enum, default_value_t = Mode::Headless)]
    mode: Mode,
    /// Print the `/api/score` request body instead of a summary
    #[arg(long)]
    json: bool,
    /// POST the final score to the leaderboard, then show the tier's top 5
    #[arg(long)]
    submit: bool,
    /// Leaderboard base URL [default: $SWATTER_API_URL or http://localhost:3001]
    #[arg(long)]
    api_url: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Fixed-step, as fast as possible
    Headless,
    /// Wall-clock timers, one full minute
    Realtime,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let difficulty = Difficulty::parse_or_default(&cli.difficulty);
    if difficulty.as_str() != cli.difficulty {
        tracing::warn!(
            requested = %cli.difficulty,
            "unknown difficulty, using {difficulty}"
        );
    }
    let seed = match cli.seed.as_deref() {
        Some(raw) => parse_seed(raw)?,
        None => seed_from_clock(),
    };
    if !(cli.width.is_finite() && cli.height.is_finite()) || cli.width <= 0.0 || cli.height <= 0.0
    {
        return Err(anyhow!(
            "board must have positive size, got {}x{}",
            cli.width,
            cli.height
        ));
    }
    let client = if cli.submit {
        let client = match cli.api_url.as_deref() {
            Some(url) => LeaderboardClient::new(url)?,
            None => LeaderboardClient::from_env()?,
        };
        Some(client)
    } else {
        None
    };

    let session = Session::new(difficulty, Board::new(cli.width, cli.height), seed);
    let mut bot = create_bot(&cli.bot, cli.reaction_frames, seed)?;

    tracing::info!(
        difficulty = %difficulty,
        seed = %seed_to_hex(seed),
        bot = bot.id(),
        "{}",
        bot.description()
    );

    let final_score = match cli.mode {
        Mode::Headless => {
            let mut session = session;
            let summary = run_headless(&mut session, FRAMES_PER_SECOND, |session, frame| {
                bot.next_click(session.bugs(), frame)
            });
            if !cli.json {
                print_summary(difficulty, seed, &summary);
            }
            FinalScore {
                name: cli.name.clone(),
                score: summary.final_score,
                difficulty,
            }
        }
        Mode::Realtime => {
            let options = ControllerOptions::default();
            let sink: Arc<dyn ScoreSink> = match &client {
                Some(client) => Arc::new(client.clone()),
                None => Arc::new(LogSink),
            };
            let controller = SessionController::launch(session, cli.name.clone(), options, sink)
                .context("failed to launch session")?;
            let handle = controller.handle();

            let mut frame = 0u32;
            let mut ticker = tokio::time::interval(options.frame_period);
            while handle.phase() == SessionPhase::Running {
                ticker.tick().await;
                frame += 1;
                let target = handle.with_session(|session| bot.next_click(session.bugs(), frame));
                if let Some(id) = target {
                    handle.click(id);
                }
            }

            let outcome = tokio::time::timeout(Duration::from_secs(5), controller.finish())
                .await
                .context("session did not wind down")??;
            outcome.final_score
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string(&final_score)?);
    } else {
        println!("  Final score:   {}", final_score.score);
    }

    if let Some(client) = &client {
        // Realtime sessions already went through the controller's sink.
        if matches!(cli.mode, Mode::Headless) {
            match client.submit_score(&final_score).await {
                Ok(result) => tracing::info!(
                    rank = ?result.rank,
                    "score submitted to {}",
                    client.base_url()
                ),
                Err(err) => tracing::warn!("score submission failed: {err:#}"),
            }
        }
        let top = client.fetch_rankings(difficulty).await;
        if !cli.json {
            print_rankings(difficulty, &top);
        }
    }
    Ok(())
}

fn print_rankings(difficulty: Difficulty, rankings: &[RankedScore]) {
    println!("Top scores ({difficulty}):");
    if rankings.is_empty() {
        println!("  (none)");
    }
    for (index, entry) in rankings.iter().enumerate() {
        println!("  {:>2}. {:<20} {}", index + 1, entry.name, entry.score);
    }
}

fn print_summary(difficulty: Difficulty, seed: u32, summary: &HeadlessSummary) {
    println!("Session finished.");
    println!("  Difficulty:    {difficulty}");
    println!("  Seed:          {}", seed_to_hex(seed));
    println!("  Frames:        {}", summary.frames);
    println!("  Spawned:       {}", summary.spawned);
    println!(
        "  Clicks:        {} (mosquito {}, malaria {}, bee {})",
        summary.clicks,
        summary.clicks_by_kind[0],
        summary.clicks_by_kind[1],
        summary.clicks_by_kind[2]
    );
}

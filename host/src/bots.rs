use anyhow::{anyhow, Result};
use swatter_core::rng::SeededRng;
use swatter_core::{Bug, BugId, BugKind};

/// A simulated player. Called once per frame with the live bugs; returns at
/// most one bug to click.
pub trait ClickerBot: Send {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn reset(&mut self, seed: u32);
    fn next_click(&mut self, bugs: &[Bug], frame: u32) -> Option<BugId>;
}

pub const BOT_IDS: [&str; 3] = ["idle", "greedy", "random"];

pub fn create_bot(id: &str, reaction_frames: u32, seed: u32) -> Result<Box<dyn ClickerBot>> {
    let reaction_frames = reaction_frames.max(1);
    let mut bot: Box<dyn ClickerBot> = match id {
        "idle" => Box::new(IdleBot),
        "greedy" => Box::new(GreedyBot { reaction_frames }),
        "random" => Box::new(RandomBot {
            reaction_frames,
            rng: SeededRng::new(seed),
        }),
        other => {
            return Err(anyhow!(
                "unknown bot: {other} (expected {})",
                BOT_IDS.join("|")
            ))
        }
    };
    bot.reset(seed);
    Ok(bot)
}

pub struct IdleBot;

impl ClickerBot for IdleBot {
    fn id(&self) -> &'static str {
        "idle"
    }

    fn description(&self) -> &'static str {
        "never clicks"
    }

    fn reset(&mut self, _seed: u32) {}

    fn next_click(&mut self, _bugs: &[Bug], _frame: u32) -> Option<BugId> {
        None
    }
}

pub struct GreedyBot {
    reaction_frames: u32,
}

impl ClickerBot for GreedyBot {
    fn id(&self) -> &'static str {
        "greedy"
    }

    fn description(&self) -> &'static str {
        "clicks the most valuable non-bee bug, oldest first"
    }

    fn reset(&mut self, _seed: u32) {}

    fn next_click(&mut self, bugs: &[Bug], frame: u32) -> Option<BugId> {
        if frame % self.reaction_frames != 0 {
            return None;
        }
        bugs.iter()
            .filter(|bug| bug.kind != BugKind::Bee)
            .min_by_key(|bug| (-bug.kind.score(), bug.id))
            .map(|bug| bug.id)
    }
}

pub struct RandomBot {
    reaction_frames: u32,
    rng: SeededRng,
}

impl ClickerBot for RandomBot {
    fn id(&self) -> &'static str {
        "random"
    }

    fn description(&self) -> &'static str {
        "clicks any live bug, bees included"
    }

    fn reset(&mut self, seed: u32) {
        self.rng = SeededRng::new(seed);
    }

    fn next_click(&mut self, bugs: &[Bug], frame: u32) -> Option<BugId> {
        if bugs.is_empty() || frame % self.reaction_frames != 0 {
            return None;
        }
        let index = self.rng.next_int(bugs.len() as u32) as usize;
        Some(bugs[index].id)
    }
}

use anyhow::Result;
use colored::Colorize;
use log::debug;
use std::fmt::Display;
use std::io::{BufRead, Write};
use treasure_game::town::BRAWL_OPENING;
use treasure_game::{
    Action, Difficulty, Item, Journey, JourneyStatus, ParseDifficultyError, Traveler, Turn,
    TurnOutcome,
};

use crate::menu::{MENU, MenuChoice};

const INVALID_OPTION: &str = "Yikes! That's an invalid option! Try again.";
const WIN_MESSAGE: &str = "Congratulations, you found the last of the three treasures! You win!";

/// Style the first occurrence of `span` inside `text`, leaving the rest plain.
fn highlight<D: Display>(text: &str, span: &str, style: impl Fn(&str) -> D) -> String {
    match text.split_once(span) {
        Some((before, after)) => format!("{before}{}{after}", style(span)),
        None => text.to_string(),
    }
}

/// What the player asked for this turn.
enum Step {
    Act(Action),
    Retry,
    EndOfInput,
}

/// Interactive loop over any line-based input and text output.
pub struct Session<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Session<I, O> {
    pub const fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub const fn output(&mut self) -> &mut O {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> O {
        self.output
    }

    /// Prompt and read one trimmed line; `None` once input is exhausted.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask for a difficulty; unrecognized answers play on normal.
    pub fn choose_difficulty(&mut self) -> Result<Difficulty> {
        let Some(answer) = self.read_line("Easy, Normal, or Hard? (e/n/h): ")? else {
            return Ok(Difficulty::Normal);
        };
        Ok(answer.parse::<Difficulty>().unwrap_or_else(|err: ParseDifficultyError| {
            debug!("{err}; playing on normal");
            Difficulty::Normal
        }))
    }

    /// Run turns until the journey ends or the player leaves.
    pub fn play(&mut self, journey: &mut Journey) -> Result<JourneyStatus> {
        writeln!(self.output, "{}", journey.town().latest_news())?;
        loop {
            self.render_status(journey)?;
            let action = match self.next_step(journey)? {
                Step::Act(action) => action,
                Step::Retry => continue,
                Step::EndOfInput => Action::Retire,
            };
            let turn = journey.perform(action);
            self.render_turn(&turn)?;
            if turn.status.is_over() {
                return self.finish(turn.status, journey);
            }
        }
    }

    fn render_status(&mut self, journey: &Journey) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "***")?;
        writeln!(self.output, "{}", journey.hunter())?;
        let town = journey.town();
        let terrain = highlight(&town.describe_terrain(), town.terrain().name(), |name| {
            name.purple()
        });
        writeln!(self.output, "{terrain}")?;
        writeln!(self.output, "{MENU}")?;
        Ok(())
    }

    fn next_step(&mut self, journey: &Journey) -> Result<Step> {
        let Some(line) = self.read_line("What's your next move? ")? else {
            return Ok(Step::EndOfInput);
        };
        let choice = match line.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(err) => {
                debug!("{err}");
                writeln!(self.output, "{INVALID_OPTION}")?;
                return Ok(Step::Retry);
            }
        };
        let step = match choice {
            MenuChoice::Buy => {
                writeln!(self.output, "{}", journey.town().shop().inventory_listing())?;
                self.pick_item("What're you lookin' to buy? ", Action::Buy)?
            }
            MenuChoice::Sell => {
                let kit = journey
                    .hunter()
                    .kit()
                    .iter()
                    .map(|item| {
                        format!("{item}: {} gold", journey.town().shop().sell_price(*item))
                    })
                    .collect::<Vec<_>>();
                if kit.is_empty() {
                    writeln!(self.output, "You have nothing to sell.")?;
                    return Ok(Step::Retry);
                }
                writeln!(self.output, "{}", kit.join("\n"))?;
                self.pick_item("What're you lookin' to sell? ", Action::Sell)?
            }
            MenuChoice::Move => Step::Act(Action::Move),
            MenuChoice::Look => Step::Act(Action::LookForTrouble),
            MenuChoice::Dig => Step::Act(Action::Dig),
            MenuChoice::Hunt => Step::Act(Action::Hunt),
            MenuChoice::Exit => Step::Act(Action::Retire),
        };
        Ok(step)
    }

    fn pick_item(&mut self, prompt: &str, trade: fn(Item) -> Action) -> Result<Step> {
        let Some(line) = self.read_line(prompt)? else {
            return Ok(Step::EndOfInput);
        };
        match line.parse::<Item>() {
            Ok(item) => Ok(Step::Act(trade(item))),
            Err(err) => {
                writeln!(self.output, "Sorry, {err}.")?;
                Ok(Step::Retry)
            }
        }
    }

    fn render_turn(&mut self, turn: &Turn) -> Result<()> {
        match turn.outcome {
            TurnOutcome::Brawl(brawl) if brawl.is_brawl() => {
                let news = highlight(&turn.news, BRAWL_OPENING, |opening| opening.red());
                writeln!(self.output, "{news}")?;
            }
            _ => writeln!(self.output, "{}", turn.news)?,
        }
        Ok(())
    }

    fn finish(&mut self, status: JourneyStatus, journey: &Journey) -> Result<JourneyStatus> {
        match status {
            JourneyStatus::Broke => {
                writeln!(self.output, "{}", "Game over".red().bold())?;
            }
            JourneyStatus::Won => {
                writeln!(self.output, "{}", WIN_MESSAGE.bright_yellow().bold())?;
                writeln!(self.output, "Fare thee well, {}!", journey.hunter().name())?;
            }
            JourneyStatus::Retired | JourneyStatus::InProgress => {}
        }
        Ok(status)
    }
}

use crate::celebrate::random_cat_url;
use anyhow::Context;
use std::io::{self, Write};
use std::path::Path;
use yachtro_core::{
    trim_float, Event, EventBus, HandResult, JokerCatalog, Phase, RunError, RunState,
    ScoreTables,
};
use yachtro_data::{load_game_config, load_jokers};

const HELP: &str = "\
commands:
  r, roll            roll the unheld dice
  h, hold N [N..]    toggle hold on dice N (1-based)
  d, discard         throw the dice away for a fresh set
  f, finish          score the current dice
  n, next            start the next hand of this round
  s, shop            visit the shop after clearing a round
  b, buy N           buy shop offer N (1-based)
  l, leave           leave the shop for the next round
  a, advance         skip the shop and go to the next round
  restart            start over after losing
  st, status         show the table
  t, table           show the scoring guide
  j, jokers          show owned jokers
  q, quit            leave the game";

fn build_run(assets: &Path, seed: u64) -> anyhow::Result<RunState> {
    let config = load_game_config(assets)
        .with_context(|| format!("load rules from {}", assets.display()))?;
    let catalog = load_jokers(assets)
        .with_context(|| format!("load jokers from {}", assets.display()))?;
    Ok(RunState::new(config, catalog, seed))
}

pub fn run(assets: &Path, seed: u64, celebrate: bool) -> anyhow::Result<()> {
    let mut run = build_run(assets, seed)?;
    let mut events = EventBus::default();
    tracing::info!(seed, jokers = run.catalog.jokers.len(), "run started");

    println!("Yachtro. Type 'help' for commands.");
    print_status(&run);

    let stdin = io::stdin();
    loop {
        print!("{}> ", prompt(&run));
        io::stdout().flush().context("flush stdout")?;
        let mut line = String::new();
        if stdin.read_line(&mut line).context("read command")? == 0 {
            break;
        }
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        let outcome = match command {
            "q" | "quit" | "exit" => break,
            "help" | "?" => {
                println!("{HELP}");
                Ok(())
            }
            "r" | "roll" => run.roll(&mut events).map(|_| ()),
            "h" | "hold" => hold(&mut run, &args, &mut events),
            "d" | "discard" => run.discard(&mut events),
            "f" | "finish" => run.finish_hand(&mut events).map(|result| {
                print_result(&result);
            }),
            "n" | "next" => run.next_hand(&mut events),
            "s" | "shop" => run.open_shop(&mut events).map(|_| print_shop(&run)),
            "b" | "buy" => buy(&mut run, &args, &mut events),
            "l" | "leave" => run.leave_shop(&mut events),
            "a" | "advance" => run.next_round(&mut events),
            "restart" => {
                run.restart(&mut events);
                Ok(())
            }
            "st" | "status" => {
                print_status(&run);
                Ok(())
            }
            "t" | "table" => {
                print_guide(&run.tables);
                Ok(())
            }
            "j" | "jokers" => {
                print_inventory(&run);
                Ok(())
            }
            other => {
                println!("unknown command: {other} (try 'help')");
                continue;
            }
        };

        match outcome {
            Ok(()) => {
                report_events(&run, &mut events, celebrate);
                if command != "st" && command != "status" {
                    print_status(&run);
                }
            }
            Err(err) => println!("error: {err}"),
        }
    }
    Ok(())
}

pub fn print_table(assets: &Path) -> anyhow::Result<()> {
    let config = load_game_config(assets)
        .with_context(|| format!("load rules from {}", assets.display()))?;
    let catalog = load_jokers(assets)
        .with_context(|| format!("load jokers from {}", assets.display()))?;
    print_guide(&ScoreTables::from_config(&config));
    println!();
    print_catalog(&catalog);
    Ok(())
}

fn hold(run: &mut RunState, args: &[&str], events: &mut EventBus) -> Result<(), RunError> {
    if args.is_empty() {
        println!("usage: hold N [N..]");
        return Ok(());
    }
    for arg in args {
        match parse_index(arg) {
            Some(index) => {
                run.toggle_hold(index, events)?;
            }
            None => println!("not a die number: {arg}"),
        }
    }
    Ok(())
}

fn buy(run: &mut RunState, args: &[&str], events: &mut EventBus) -> Result<(), RunError> {
    let Some(index) = args.first().and_then(|arg| parse_index(arg)) else {
        println!("usage: buy N");
        return Ok(());
    };
    let joker = run.buy_joker(index, events)?;
    println!("bought {} for {} coins", joker.title(), joker.cost);
    run.leave_shop(events)
}

/// 1-based user input to a 0-based index.
fn parse_index(text: &str) -> Option<usize> {
    text.parse::<usize>().ok()?.checked_sub(1)
}

fn prompt(run: &RunState) -> &'static str {
    match run.phase() {
        Phase::Idle | Phase::Rolling => "hand",
        Phase::Finished => "scored",
        Phase::Shop => "shop",
        Phase::Lost => "lost",
    }
}

fn report_events(run: &RunState, events: &mut EventBus, celebrate: bool) {
    let mut cleared = false;
    for event in events.drain() {
        tracing::debug!(?event, "event");
        match event {
            Event::Celebration { hand } => println!("*** {} ***", hand.display_name()),
            Event::RunLost { score, target } => {
                println!("Run over: scored {score} of {target}. Type 'restart' to play again.");
            }
            Event::RoundAdvanced { round, target } => {
                println!("Round {round}: reach {target} points.");
            }
            Event::HandScored { .. } => cleared = run.can_advance(),
            _ => {}
        }
    }
    if cleared {
        println!("Round cleared! 'shop' to spend coins or 'advance' to move on.");
        if celebrate {
            if let Some(url) = random_cat_url() {
                println!("Celebration: {url}");
            }
        }
    }
}

fn print_result(result: &HandResult) {
    for transition in result.sequence.transitions() {
        println!("  {}", transition.caption);
    }
    println!("  +{} coins", result.coins_earned);
}

fn print_status(run: &RunState) {
    let state = &run.state;
    println!(
        "Round {} | Score {}/{} | Coins {} | Rerolls {} | Discards {} | Hands {}",
        state.round,
        state.score,
        state.target,
        state.coins,
        state.rerolls_left,
        state.discards_left,
        state.hands_left
    );
    if matches!(run.phase(), Phase::Shop) {
        print_shop(run);
        return;
    }
    let dice: Vec<String> = run
        .dice
        .iter()
        .map(|die| {
            if die.held {
                format!("[{}]", die.value)
            } else {
                format!(" {} ", die.value)
            }
        })
        .collect();
    println!("Dice: {}", dice.join(""));
    if state.rolled {
        let preview = run.preview();
        println!(
            "{}: {} chips x {} mult = {}",
            preview.hand.display_name(),
            preview.chips,
            trim_float(preview.mult),
            preview.total
        );
    }
}

fn print_shop(run: &RunState) {
    let Some(shop) = &run.shop else {
        return;
    };
    println!("Shop (coins: {}):", run.state.coins);
    for (index, offer) in shop.offers.iter().enumerate() {
        let mark = if shop.affordable(index, run.state.coins) {
            ""
        } else {
            " (unavailable)"
        };
        println!(
            "  {}. {} - {} [{} coins]{mark}",
            index + 1,
            offer.title(),
            offer.describe(),
            offer.cost
        );
    }
}

fn print_inventory(run: &RunState) {
    if run.inventory.is_empty() {
        println!("No jokers yet.");
        return;
    }
    for group in run.inventory.grouped() {
        let badge = if group.count > 1 {
            format!(" x{}", group.count)
        } else {
            String::new()
        };
        println!(
            "  {}{badge} - {}",
            group.joker.title(),
            group.joker.describe()
        );
    }
}

fn print_guide(tables: &ScoreTables) {
    println!("{:<16}{:>8}{:>8}", "Hand", "Chips", "Mult");
    for row in tables.guide() {
        let chips = row
            .chips
            .map(|chips| chips.to_string())
            .unwrap_or_else(|| "sum".to_string());
        println!(
            "{:<16}{:>8}{:>8}",
            row.kind.display_name(),
            chips,
            trim_float(row.mult)
        );
    }
}

fn print_catalog(catalog: &JokerCatalog) {
    println!("Jokers:");
    for joker in &catalog.jokers {
        println!(
            "  {} [{} coins] - {}",
            joker.title(),
            joker.cost,
            joker.describe()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_one_based() {
        assert_eq!(parse_index("1"), Some(0));
        assert_eq!(parse_index("5"), Some(4));
        assert_eq!(parse_index("0"), None);
        assert_eq!(parse_index("x"), None);
    }

    #[test]
    fn prompt_follows_the_phase() {
        let run = RunState::with_defaults(1);
        assert_eq!(prompt(&run), "hand");
    }
}

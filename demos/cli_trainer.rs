//! CLI blackjack trainer example.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjtrain::{
    Action, Card, CountingDrill, DealerHand, Game, GameOptions, GameState, Hand, Suit,
    TrainingOptions,
};

fn main() {
    env_logger::init();
    println!("Blackjack trainer (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    loop {
        match prompt_line("Mode: [p]lay with coaching, [c]ounting drill: ").as_str() {
            "p" | "play" => play(seed),
            "c" | "count" => counting_drill(seed),
            "q" | "quit" => return,
            _ => println!("Unknown mode."),
        }
    }
}

fn play(seed: u64) {
    let training = TrainingOptions::default();
    let mut game = Game::new(GameOptions::classic(), training, seed);

    loop {
        let bankroll = game.bankroll();
        if bankroll == 0 {
            println!("You are out of chips. Game over.");
            break;
        }

        let Some(bet) = prompt_usize(&format!("Bet amount (1-{bankroll}, 0 to stop): ")) else {
            return;
        };
        if bet == 0 {
            break;
        }
        if let Err(err) = game.add_chip(bet) {
            println!("Bet error: {err}");
            continue;
        }
        if let Err(err) = game.deal() {
            println!("Deal error: {err}");
            let _ = game.clear_bet();
            continue;
        }

        while game.state() == GameState::PlayerTurn {
            print_table(&game);
            println!("{}", format_actions(&game));

            let action = match prompt_line("Action: ").as_str() {
                "h" | "hit" => Action::Hit,
                "s" | "stand" => Action::Stand,
                "d" | "double" => Action::Double,
                "p" | "split" => Action::Split,
                "u" | "surrender" => Action::Surrender,
                "?" => {
                    if let Some(action) = game.recommendation() {
                        println!("Coach suggests: {action}");
                    }
                    continue;
                }
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            match game.act(action) {
                Ok(feedback) if feedback.correct => {
                    if let Some(play) = feedback.index_play {
                        println!("{}", colorize(&format!("Index play: {play}"), "36"));
                    }
                }
                Ok(feedback) => {
                    println!(
                        "{}",
                        colorize(
                            &format!("Mistake: {} was right", feedback.recommended),
                            "33"
                        )
                    );
                }
                Err(err) => println!("Action error: {err}"),
            }
        }

        if game.state() == GameState::DealerTurn {
            if let Err(err) = game.play_dealer() {
                println!("Dealer error: {err}");
            }
        }

        if let Some(result) = game.last_result() {
            print_final(&game);
            println!("Payout: {} (net {})", result.total_payout, result.net);
        }

        if game.should_quiz_count() {
            ask_count(&mut game);
        }

        let stats = game.stats();
        println!(
            "Strategy {:.0}% | streak {} | count {:.0}%",
            stats.strategy_accuracy() * 100.0,
            stats.current_streak,
            stats.count_accuracy() * 100.0
        );

        if let Err(err) = game.next_hand() {
            println!("Round error: {err}");
            break;
        }
    }
}

fn ask_count(game: &mut Game) {
    let Some(answer) = prompt_i32("Running count? ") else {
        return;
    };
    let check = game.check_count(answer);
    if check.correct {
        println!("{}", colorize("Correct.", "32"));
    } else {
        println!(
            "{}",
            colorize(&format!("The count is {}.", check.expected), "31")
        );
    }
}

fn counting_drill(seed: u64) {
    let training = TrainingOptions::default();
    let mut drill = CountingDrill::new(&GameOptions::default(), &training, seed);

    loop {
        let cards = match drill.deal_round() {
            Ok(cards) => cards,
            Err(err) => {
                println!("Drill error: {err}");
                return;
            }
        };
        println!(
            "\n{}",
            cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
        );

        let Some(answer) = prompt_i32("Running count? ") else {
            break;
        };
        let check = drill.check(answer);
        if check.correct {
            println!("{}", colorize("Correct.", "32"));
        } else {
            println!(
                "{}",
                colorize(&format!("The count is {}.", check.expected), "31")
            );
        }
        println!(
            "True count {:.1} | {} cards left",
            drill.true_count(),
            drill.shoe().cards_remaining()
        );
    }

    println!(
        "Counted {} cards, {:.0}% of checks right.",
        drill.stats().cards_counted,
        drill.stats().count_accuracy() * 100.0
    );
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn prompt_i32(prompt: &str) -> Option<i32> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<i32>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(game: &Game) {
    println!(
        "\nShoe: {} cards remaining | bankroll {}",
        game.shoe().cards_remaining(),
        game.bankroll()
    );

    let dealer = game.dealer();
    println!(
        "\nDealer: {} (value {})",
        format_dealer(dealer),
        dealer.visible_value()
    );

    for (index, hand) in game.hands().iter().enumerate() {
        let marker = if index == game.active_hand_index() { "*" } else { " " };
        println!(
            "{marker} Hand {index}: {} | value {} | bet {} | {:?}",
            format_hand(hand),
            hand.value(),
            hand.bet(),
            hand.status()
        );
    }
    println!();
}

fn print_final(game: &Game) {
    let dealer = game.dealer();
    println!(
        "\nDealer: {} (value {})",
        format_dealer(dealer),
        dealer.value()
    );
    for (index, hand) in game.hands().iter().enumerate() {
        println!(
            "Hand {index}: {} | value {} | {:?}",
            format_hand(hand),
            hand.value(),
            hand.result()
        );
    }
}

fn format_actions(game: &Game) -> String {
    let allowed = game.allowed().unwrap_or(bjtrain::Allowed {
        double: false,
        split: false,
        surrender: false,
    });
    let parts = [
        format_action("hit", "h", true),
        format_action("stand", "s", true),
        format_action("double", "d", allowed.double),
        format_action("split", "p", allowed.split),
        format_action("surrender", "u", allowed.surrender),
        format_action("hint", "?", true),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_dealer(dealer: &DealerHand) -> String {
    if dealer.is_empty() {
        return "(no cards)".to_string();
    }

    if dealer.is_hole_revealed() {
        dealer
            .cards()
            .iter()
            .map(format_card)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        let mut parts = Vec::new();
        if let Some(card) = dealer.up_card() {
            parts.push(format_card(card));
        }
        if dealer.len() > 1 {
            parts.push("??".to_string());
        }
        parts.join(" ")
    }
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}

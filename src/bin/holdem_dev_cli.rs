// src/bin/holdem_dev_cli.rs

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use holdem_engine::api::{ActionSource, PassiveSource, TableObserver, TableSnapshot};
use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::table::TableConfig;
use holdem_engine::domain::SeatIndex;
use holdem_engine::engine::{
    Action, ActionKind, ActionRequest, Decision, EngineError, HandEvent, HandEventKind, Session,
};
use holdem_engine::infra::AnyRng;

#[derive(Parser, Debug)]
#[command(author, version, about = "Локальная игра в холдем за одним столом", long_about = None)]
struct Args {
    /// Количество игроков (2..=10).
    #[arg(short, long, default_value_t = 3)]
    players: u8,

    /// Стартовый стек каждого игрока.
    #[arg(short, long, default_value_t = 10)]
    stack: u64,

    /// Seed для воспроизводимых раздач.
    #[arg(long)]
    seed: Option<u64>,

    /// Максимум раздач.
    #[arg(long, default_value_t = 1_000)]
    max_hands: u64,

    /// JSON-конфиг стола (блайнды, места, лимит переспросов).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Игрок на месте 0 вводит действия с клавиатуры, остальные – пассивные боты.
    #[arg(short, long)]
    interactive: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TableConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => TableConfig::default(),
    };
    if args.players > config.max_seats {
        config.max_seats = args.players;
        config.validate()?;
    }

    let mut session = Session::new(config, AnyRng::from_optional_seed(args.seed))?;
    for i in 0..args.players {
        session.add_player(format!("Player {}", i + 1), Chips::new(args.stack))?;
    }

    let mut source = CliSource {
        interactive: args.interactive,
    };
    let mut observer = PrintObserver {
        hero: args.interactive.then_some(0),
    };

    while !session.is_finished() && session.hands_played() < args.max_hands {
        println!();
        println!("================ HAND {} =================", session.hands_played() + 1);
        let result = session.play_next_hand(&mut source, &mut observer)?;

        println!("Результаты:");
        for r in &result.summary.results {
            println!("  seat {} | net {:+} | won {}", r.seat, r.net, r.won);
        }
        for e in session.eliminated().iter().filter(|e| e.after_hand == result.summary.hand_id) {
            println!("  {} выбывает (стек {})", e.name, e.stack);
        }
    }

    println!();
    println!("================ LEADERBOARD ================");
    for (place, entry) in session.leaderboard().iter().enumerate() {
        println!("{:>2}. {:<12} {}", place + 1, entry.name, entry.stack);
    }
    if let Some(winner) = session.winner() {
        println!("Победитель: {}", winner.name);
    }

    Ok(())
}

/// Место 0 – человек (если включено), остальные – check/call.
struct CliSource {
    interactive: bool,
}

impl ActionSource for CliSource {
    fn decide(&mut self, request: &ActionRequest) -> Decision {
        if !self.interactive || request.seat != 0 {
            return PassiveSource.decide(request);
        }

        let legal: Vec<&str> = request.legal.kinds.iter().map(|k| kind_hint(*k)).collect();
        println!(
            "[seat {}] стек {} | ставка {} / текущая {} | к колу {} | мин. рейз до {}",
            request.seat,
            request.stack,
            request.player_bet,
            request.current_bet,
            request.legal.to_call,
            request.legal.min_raise_to,
        );
        print!("Действие ({}): ", legal.join(", "));
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            // Конец ввода – фолд, чтобы не зациклиться.
            Ok(0) | Err(_) => Decision::Act(Action::Fold),
            Ok(_) => parse_action(line.trim()),
        }
    }

    fn rejected(&mut self, request: &ActionRequest, action: Action, reason: &EngineError) {
        if self.interactive && request.seat == 0 {
            println!("Нельзя {action}: {reason}");
        }
    }
}

fn kind_hint(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Fold => "fold",
        ActionKind::Check => "check",
        ActionKind::Call => "call",
        ActionKind::Bet => "bet N",
        ActionKind::Raise => "raise N",
        ActionKind::AllIn => "allin",
    }
}

/// Разбор свободного текста. Непонятный ввод – отмена (спросим ещё раз).
fn parse_action(input: &str) -> Decision {
    let mut parts = input.split_whitespace();
    let word = parts.next().unwrap_or("").to_ascii_lowercase();
    let amount = parts.next().and_then(|s| s.parse::<u64>().ok()).map(Chips::new);

    let action = match (word.as_str(), amount) {
        ("f" | "fold", _) => Action::Fold,
        ("x" | "check", _) => Action::Check,
        ("c" | "call", _) => Action::Call,
        ("b" | "bet", Some(a)) => Action::Bet(a),
        ("r" | "raise", Some(a)) => Action::Raise(a),
        ("a" | "allin" | "all-in", _) => Action::AllIn,
        _ => {
            println!("Не понял ввод: {input:?}");
            return Decision::Cancelled;
        }
    };
    Decision::Act(action)
}

struct PrintObserver {
    /// Чьи карманные карты показывать сразу после раздачи.
    hero: Option<SeatIndex>,
}

impl TableObserver for PrintObserver {
    fn on_event(&mut self, event: &HandEvent, snapshot: &TableSnapshot) {
        match &event.kind {
            HandEventKind::BlindsPosted {
                small_blind,
                big_blind,
            } => {
                if let Some((seat, amount)) = small_blind {
                    println!("SB: seat {seat} ставит {amount}");
                }
                if let Some((seat, amount)) = big_blind {
                    println!("BB: seat {seat} ставит {amount}");
                }
            }
            HandEventKind::HoleCardsDealt { seat, cards } if self.hero == Some(*seat) => {
                let cards: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
                println!("Ваши карты: {}", cards.join(" "));
            }
            HandEventKind::StreetChanged { street } => {
                println!("--- {} --- банк {}", street.title(), snapshot.total_pot);
            }
            HandEventKind::BoardDealt { board, .. } => {
                let cards: Vec<String> = board.iter().map(|c| c.to_string()).collect();
                println!("Борд: {}", cards.join(" "));
            }
            HandEventKind::PlayerActed {
                seat,
                action,
                outcome,
                new_stack,
                ..
            } => {
                let suffix = if outcome.auto_folded {
                    " (не хватает на call – фолд)"
                } else {
                    ""
                };
                println!("seat {seat}: {action}{suffix} | стек {new_stack}");
            }
            HandEventKind::ShowdownReveal {
                seat,
                hole_cards,
                label,
                ..
            } => {
                let cards: Vec<String> = hole_cards.iter().map(|c| c.to_string()).collect();
                println!("seat {seat} открывает {} – {label}", cards.join(" "));
            }
            HandEventKind::PotAwarded {
                pot_index,
                seat,
                amount,
                ..
            } => {
                let name = if *pot_index == 0 { "основной банк" } else { "сайд-пот" };
                println!("seat {seat} забирает {amount} ({name} #{pot_index})");
            }
            HandEventKind::PotRefunded { seat, amount, .. } => {
                println!("seat {seat}: возврат {amount}");
            }
            _ => {}
        }
    }
}

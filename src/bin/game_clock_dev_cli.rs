// src/bin/game_clock_dev_cli.rs
//
// Dev-CLI для часов:
//   game_clock_dev_cli [blitz|rapid|bronstein|fide] [moves]  : быстрая симуляция на ручном времени;
//   game_clock_dev_cli live                                   : короткая партия на настоящем рантайме.
//
// Уровень логов задаётся через RUST_LOG (например, RUST_LOG=game_clock=debug).

use std::time::Duration;

use rand::Rng;
use tracing_subscriber::EnvFilter;

use game_clock::api::{Command, GameViewDto};
use game_clock::domain::{GameState, PlayerSlot};
use game_clock::engine::GameEngine;
use game_clock::infra::{map_engine_to_view, ManualTimeSource, TimeSource};
use game_clock::runtime::ClockRuntime;
use game_clock::time_ctrl::{DelayType, TimeControlConfig, TimeProfile};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = args.first().map(String::as_str).unwrap_or("blitz");

    if mode == "live" {
        run_live();
        return;
    }

    let profile = match mode {
        "rapid" => TimeProfile::Rapid,
        "bronstein" => TimeProfile::BronsteinBlitz,
        "fide" => TimeProfile::Fide,
        _ => TimeProfile::Blitz,
    };
    let max_moves: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(60);

    println!("game_clock_dev_cli: симуляция партии, профиль {:?}, до {} ходов", profile, max_moves);
    simulate(TimeControlConfig::from_profile(profile), max_moves);
}

/// Симуляция на ручном времени: между ходами прогоняем все тики, которые успели бы сработать.
fn simulate(config: TimeControlConfig, max_moves: u32) {
    let time = ManualTimeSource::new(0);
    let mut engine = match GameEngine::new(config) {
        Ok(engine) => engine,
        Err(err) => {
            println!("[CLI] некорректный контроль времени: {}", err);
            return;
        }
    };
    let mut rng = rand::thread_rng();

    // Первым думает игрок 1, поэтому партию запускает нажатие игрока 2.
    if let Err(err) = engine.press_move(PlayerSlot::Two, time.now_ms()) {
        println!("[CLI] не удалось начать партию: {}", err);
        return;
    }

    let mut moves_made = 0;
    while engine.state() == GameState::Running && moves_made < max_moves {
        let think_ms: u64 = rng.gen_range(500..15_000);
        let move_at = time.now_ms() + think_ms;

        // Тики до момента хода.
        while let Some(tick) = engine.next_wakeup() {
            if tick.due_at > move_at {
                break;
            }
            time.set(tick.due_at);
            if let Err(err) = engine.on_tick(tick.player, tick.generation, time.now_ms()) {
                println!("[CLI] тик отклонён: {}", err);
                return;
            }
            if engine.state() == GameState::Done {
                break;
            }
        }
        if engine.state() == GameState::Done {
            break;
        }

        time.set(move_at);
        let Some(mover) = engine.active_player() else {
            break;
        };
        if let Err(err) = engine.press_move(mover, time.now_ms()) {
            println!("[CLI] ход отклонён: {}", err);
            return;
        }
        moves_made += 1;
        engine.drain_events();

        let title = format!("ход {} ({} думал {} мс)", moves_made, mover, think_ms);
        print_view(&title, &map_engine_to_view(&engine));
    }

    println!();
    match engine.state() {
        GameState::Done => println!(
            "[CLI] флажок упал у {}",
            engine.active_player().map(|p| p.to_string()).unwrap_or_default()
        ),
        state => println!("[CLI] симуляция остановлена в состоянии {}", state),
    }
}

/// Короткая партия в реальном времени: 5 секунд + 1 секунда Бронштейна.
fn run_live() {
    let rt = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
        Ok(rt) => rt,
        Err(err) => {
            println!("[CLI] не удалось поднять tokio: {}", err);
            return;
        }
    };

    rt.block_on(async {
        let config = TimeControlConfig::new(5_000, 1, DelayType::Bronstein, false);
        let engine = match GameEngine::new(config) {
            Ok(engine) => engine,
            Err(err) => {
                println!("[CLI] некорректный контроль времени: {}", err);
                return;
            }
        };
        let (runtime, task) = ClockRuntime::spawn(engine);

        let _ = runtime
            .send(Command::MoveRequested {
                player: PlayerSlot::Two,
            })
            .await;

        let mut view = runtime.watch();
        let mut mover = PlayerSlot::One;
        for _ in 0..6 {
            tokio::time::sleep(Duration::from_millis(1_500)).await;
            match runtime.send(Command::MoveRequested { player: mover }).await {
                Ok(v) => print_view(&format!("{} сходил", mover), &v),
                Err(err) => println!("[CLI] ошибка: {:?}", err),
            }
            mover = mover.opponent();
        }

        // Дальше никто не ходит: ждём, пока упадёт флажок.
        while view.changed().await.is_ok() {
            let current = view.borrow().clone();
            if current.state == GameState::Done {
                print_view("время вышло", &current);
                break;
            }
        }

        runtime.shutdown().await;
        let _ = task.await;
    });

    println!("[CLI] Завершение работы dev-CLI (live).");
}

fn print_view(title: &str, view: &GameViewDto) {
    let [one, two] = &view.players;
    println!(
        "[{:>7}] {:<40} | P1 {:>8} (ход {:>3}){} | P2 {:>8} (ход {:>3}){}",
        view.state.to_string(),
        title,
        one.display,
        one.move_number,
        if one.is_running { " *" } else { "  " },
        two.display,
        two.move_number,
        if two.is_running { " *" } else { "  " },
    );
}

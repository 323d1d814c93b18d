use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use stratagem::board::{Color, Location, Move, Piece, PieceLocation, PieceType};
use stratagem::engine::Game;
use stratagem::resolve::resolve_battle;
use stratagem::validate::{validate_move, MoveKind};
use stratagem::variant::Variant;

use PieceType::*;

const DELTA_ORDER: [PieceType; 40] = [
    Colonel, Major, Major, Captain, Captain, Captain, Bomb, Bomb, Bomb, Bomb, Sergeant, Sergeant,
    Sergeant, Miner, Miner, Miner, Miner, Lieutenant, Lieutenant, Lieutenant, Scout, Scout, Scout,
    Scout, Sergeant, Scout, Scout, Scout, Bomb, Flag, Miner, Spy, Lieutenant, Captain, Scout,
    Major, Colonel, General, Marshal, Bomb,
];

/// Miner march that ends with Red taking Blue's flag on move seven.
const MINER_SCRIPT: [(i32, i32); 7] = [
    (30, 40),
    (69, 59),
    (40, 50),
    (59, 49),
    (50, 60),
    (49, 39),
    (60, 70),
];

fn sq(index: i32) -> Location {
    Location::new(index % 10, index / 10)
}

fn delta_setup(color: Color) -> Vec<PieceLocation> {
    DELTA_ORDER
        .iter()
        .enumerate()
        .map(|(i, &pt)| {
            let i = i as i32;
            let index = match color {
                Color::Red => i,
                Color::Blue => 99 - i,
            };
            PieceLocation::new(Piece::new(pt, color), sq(index))
        })
        .collect()
}

/// Candidate moves for the side to move, filtered through the validator.
fn legal_moves(game: &Game) -> Vec<Move> {
    let Some(side) = game.side_to_move() else {
        return Vec::new();
    };
    let board = game.board();
    let mut moves = Vec::new();
    for pl in board.pieces() {
        if !pl.piece.is_owned_by(side) {
            continue;
        }
        for (dx, dy) in [(0, 1), (1, 0), (0, -1), (-1, 0)] {
            for step in 1..10 {
                let to = pl.location.offset(dx * step, dy * step);
                if !board.contains(to) {
                    break;
                }
                let mv = Move::new(pl.piece.piece_type, pl.location, to);
                if validate_move(game.config(), board, game.status(), game.last_mover(), mv)
                    .is_ok()
                {
                    moves.push(mv);
                }
                if !board.is_empty(to) {
                    break;
                }
            }
        }
    }
    moves
}

fn random_move(game: &Game, rng: &mut impl Rng) -> Option<Move> {
    legal_moves(game).choose(rng).copied()
}

fn delta_game() -> Game {
    let mut game = Game::new(
        Variant::Delta.config(),
        &delta_setup(Color::Red),
        &delta_setup(Color::Blue),
    )
    .unwrap();
    game.start_game().unwrap();
    game
}

fn bench_validate_move(c: &mut Criterion) {
    let game = delta_game();
    let step = Move::new(Miner, sq(30), sq(40));
    let blocked = Move::new(Scout, sq(20), sq(60));
    c.bench_function("validate_step", |b| {
        b.iter(|| {
            validate_move(
                game.config(),
                game.board(),
                game.status(),
                game.last_mover(),
                black_box(step),
            )
        })
    });
    c.bench_function("validate_blocked_dash", |b| {
        b.iter(|| {
            validate_move(
                game.config(),
                game.board(),
                game.status(),
                game.last_mover(),
                black_box(blocked),
            )
        })
    });
}

fn bench_resolve_battle(c: &mut Criterion) {
    let config = Variant::Epsilon.config();
    c.bench_function("resolve_battle_upset", |b| {
        b.iter(|| resolve_battle(&config, black_box(Spy), black_box(Marshal), MoveKind::Step))
    });
}

fn bench_legal_moves(c: &mut Criterion) {
    let game = delta_game();
    c.bench_function("legal_moves_delta_start", |b| {
        b.iter(|| legal_moves(black_box(&game)))
    });
}

fn bench_scripted_game(c: &mut Criterion) {
    c.bench_function("delta_miner_script", |b| {
        b.iter_batched(
            delta_game,
            |mut game| {
                for (from, to) in MINER_SCRIPT {
                    let _ = game.make_move(Miner, sq(from), sq(to));
                }
                game
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_random_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("playout");
    group.sample_size(20);
    group.bench_function("delta_random_200", |b| {
        let mut seed = 0u64;
        b.iter_batched(
            || {
                seed += 1;
                (delta_game(), SmallRng::seed_from_u64(seed))
            },
            |(mut game, mut rng)| {
                for _ in 0..200 {
                    let Some(mv) = random_move(&game, &mut rng) else {
                        break;
                    };
                    match game.make_move(mv.piece, mv.from, mv.to) {
                        Ok(result) if result.status.is_ok() => {}
                        _ => break,
                    }
                }
                game
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_validate_move,
    bench_resolve_battle,
    bench_legal_moves,
    bench_scripted_game,
    bench_random_playout,
);
criterion_main!(benches);

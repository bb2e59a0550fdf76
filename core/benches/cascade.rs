use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use jump61_core::search::{self, SearchConfig};
use jump61_core::{Board, MAX_SIZE, Side};
use rand::prelude::*;
use std::hint::black_box;

/// Every square loaded to capacity for Red, with Blue holding one corner
/// and on move: a single spot sets off the whole board.
fn loaded_board(size: usize) -> Board {
    let mut board = Board::new(size).unwrap();
    for n in 0..size * size {
        board.set(n, board.neighbors(n), Side::Red).unwrap();
    }
    board.set(0, 2, Side::Blue).unwrap();
    if board.whose_move() != Side::Blue {
        board.set(size * size - 1, 1, Side::Red).unwrap();
    }
    board
}

fn midgame(size: usize, moves: usize, seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(size).unwrap();
    for _ in 0..moves {
        if board.winner().is_some() {
            break;
        }
        let side = board.whose_move();
        let legal: Vec<_> = board.legal_moves(side).collect();
        board.add_spot(side, legal[rng.random_range(0..legal.len())]).unwrap();
    }
    board
}

fn bench_cascade(c: &mut Criterion) {
    c.bench_function("cascade/full_board", |b| {
        let board = loaded_board(MAX_SIZE);
        b.iter_batched(
            || board.clone(),
            |mut board| black_box(board.add_spot(Side::Blue, 0).unwrap()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_search(c: &mut Criterion) {
    for depth in [1, 2] {
        c.bench_function(&format!("search/6x6/depth{depth}"), |b| {
            let board = midgame(6, 30, 61);
            assert!(board.winner().is_none());
            let config = SearchConfig::new(depth);
            b.iter(|| black_box(search::search(&board, board.whose_move(), &config).unwrap()))
        });
    }
}

criterion_group!(benches, bench_cascade, bench_search);
criterion_main!(benches);

// threads.rs - Wall-clock time of a full run at several worker counts
//
// Prints CSV (`name,time,range`) so results can be plotted per thread count.

use std::thread::available_parallelism;
use std::time::{Duration, Instant};

use conway::{Cell, Grid, GridIo, Image, ImageStore, Params, run};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

const SIZE: usize = 256;
const TURNS: usize = 100;
const ITERATIONS: usize = 5;
const THREADS: [usize; 5] = [1, 2, 4, 8, 16];

fn board() -> Grid {
    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    let alive: Vec<Cell> = (0..SIZE)
        .flat_map(|y| (0..SIZE).map(move |x| Cell::new(x, y)))
        .filter(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state % 4 == 0
        })
        .collect();
    Grid::with_alive(SIZE, SIZE, &alive)
}

async fn timed_run(params: Params, initial: &Grid) -> Duration {
    let store = ImageStore::spawn();
    store.insert(params.input_name(), Image { width: SIZE, height: SIZE, cells: initial.cells().to_vec() });

    let (events_tx, mut events_rx) = mpsc::channel(1024);
    let (_keys_tx, keys_rx) = mpsc::channel(1);
    let timer = Instant::now();
    let handle = tokio::spawn(run(params, store.clone(), events_tx, keys_rx));
    while events_rx.recv().await.is_some() {}
    let elapsed = timer.elapsed();

    match handle.await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => eprintln!("run failed: {err}"),
        Err(err) => eprintln!("run panicked: {err}"),
    }
    let _ = store.check_idle().await;
    elapsed
}

fn main() {
    let cpus = available_parallelism().map(|n| n.get()).unwrap_or(1);
    let runtime = match Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("cannot start runtime: {err}");
            return;
        }
    };
    let initial = board();

    println!("name,time,range");
    for threads in THREADS {
        let params = Params { turns: TURNS, threads, image_width: SIZE, image_height: SIZE };
        let samples: Vec<f64> = (0..ITERATIONS)
            .map(|_| runtime.block_on(timed_run(params, &initial)).as_secs_f64())
            .collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let spread = samples.iter().map(|s| (s - mean).abs()).fold(0.0, f64::max);
        println!("Gol/{SIZE}x{SIZE}x{TURNS}-{threads}-{cpus},{mean:.6},±{:.1}%", spread / mean * 100.0);
    }
}

use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use structopt::StructOpt;

use std::time;

use oseq::{Handle, OSeq, Side};

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u128>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "inserts", default_value = "100000")]
    inserts: usize,

    #[structopt(long = "removes", default_value = "100000")]
    removes: usize,

    #[structopt(long = "gets", default_value = "100000")]
    gets: usize,
}

fn main() {
    let opts = Opt::from_args();
    let seed = opts.seed.unwrap_or_else(random);
    let mut rng = SmallRng::from_seed(make_seed(seed));

    let mut index: OSeq<u64> = OSeq::new();
    let mut handles: Vec<Handle> = vec![];

    // initial load, random mix of extremal and adjacent inserts.
    let start = time::Instant::now();
    for _i in 0..opts.loads {
        let value = rng.gen::<u64>();
        let handle = match handles.len() {
            0 => index.insert_extremal(value, Side::Greater),
            _ if rng.gen::<u8>() % 2 == 0 => {
                let side = pick_side(&mut rng);
                index.insert_extremal(value, side)
            }
            n => {
                let at = handles[rng.gen::<usize>() % n];
                let side = pick_side(&mut rng);
                index.insert_adjacent(at, value, side).unwrap()
            }
        };
        handles.push(handle);
    }
    println!("loaded {} items in {:?}", opts.loads, start.elapsed());

    do_incremental(seed, opts, index, handles);
}

fn do_incremental(seed: u128, opts: Opt, mut index: OSeq<u64>, mut handles: Vec<Handle>) {
    let mut rng = SmallRng::from_seed(make_seed(seed));

    let start = time::Instant::now();
    let total = opts.inserts + opts.removes + opts.gets;
    let mut n = total;
    while n > 0 && !handles.is_empty() {
        let op = rng.gen::<usize>() % total;
        let j = rng.gen::<usize>() % handles.len();

        if op < opts.inserts {
            let side = pick_side(&mut rng);
            let handle = index.insert_adjacent(handles[j], rng.gen(), side).unwrap();
            handles.push(handle);
        } else if op < (opts.inserts + opts.removes) {
            let handle = handles.swap_remove(j);
            index.remove(handle).unwrap();
        } else if op % 3 == 0 {
            index.get(handles[j]).unwrap();
        } else if op % 3 == 1 {
            index.rank(handles[j]).unwrap();
        } else {
            index.select(rng.gen::<usize>() % index.len()).unwrap();
        }
        n -= 1;
    }
    println!(
        "incremental {} ops in {:?}, len:{}",
        total - n,
        start.elapsed(),
        index.len()
    );
}

fn pick_side<R: Rng>(rng: &mut R) -> Side {
    if rng.gen::<bool>() {
        Side::Smaller
    } else {
        Side::Greater
    }
}

// widen the replayable u128 seed into SmallRng's seed width.
fn make_seed(seed: u128) -> [u8; 32] {
    let mut out = [0; 32];
    out[..16].copy_from_slice(&seed.to_le_bytes());
    out[16..].copy_from_slice(&seed.to_be_bytes());
    out
}

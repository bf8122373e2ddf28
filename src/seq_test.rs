use arbitrary::{self, unstructured::Unstructured, Arbitrary};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;

#[test]
fn test_seq_scenarios() {
    let mut index: OSeq<char> = OSeq::new();

    // append-only build.
    let a = index.insert_extremal('a', Side::Greater);
    let b = index.insert_extremal('b', Side::Greater);
    let c = index.insert_extremal('c', Side::Greater);
    assert_eq!(collect(&index), vec!['a', 'b', 'c']);
    index.validate().unwrap();

    // adjacent insertion before b.
    let x = index.insert_adjacent(b, 'x', Side::Smaller).unwrap();
    assert_eq!(collect(&index), vec!['a', 'x', 'b', 'c']);
    index.validate().unwrap();

    // removal re-balances and shifts ranks.
    assert_eq!(index.remove(b).unwrap(), 'b');
    assert_eq!(collect(&index), vec!['a', 'x', 'c']);
    assert_eq!(index.rank(c).unwrap(), 2);
    index.validate().unwrap();

    assert_eq!(index.rank(a).unwrap(), 0);
    assert_eq!(index.rank(x).unwrap(), 1);
    assert_eq!(index.len(), 3);
}

#[test]
fn test_seq_handle_invalidation() {
    let mut index: OSeq<u64> = OSeq::new();

    let a = index.insert_extremal(10, Side::Greater);
    let b = index.insert_extremal(20, Side::Greater);

    assert_eq!(index.is_valid(b), true);
    assert_eq!(index.remove(b).unwrap(), 20);
    assert_eq!(index.is_valid(b), false);

    // every operation on a dead handle fails the same way, every time.
    for _ in 0..2 {
        assert!(matches!(index.get(b), Err(Error::InvalidHandle(_, _))));
        assert!(matches!(index.set(b, 99), Err(Error::InvalidHandle(_, _))));
        assert!(matches!(index.rank(b), Err(Error::InvalidHandle(_, _))));
        assert!(matches!(index.remove(b), Err(Error::InvalidHandle(_, _))));
        assert!(matches!(
            index.insert_adjacent(b, 30, Side::Greater),
            Err(Error::InvalidHandle(_, _))
        ));
        assert!(matches!(
            index.adjacent(b, Side::Greater),
            Err(Error::InvalidHandle(_, _))
        ));
    }

    // slot reuse must not resurrect the dead handle.
    let c = index.insert_extremal(30, Side::Greater);
    assert_eq!(index.is_valid(b), false);
    assert!(index.get(b).is_err());

    assert_eq!(index.get(a).unwrap(), &10);
    assert_eq!(index.get(c).unwrap(), &30);

    assert!(matches!(index.select(2), Err(Error::IndexOutOfBounds(_, _))));
}

#[test]
fn test_seq_rank_select() {
    let mut index: OSeq<u64> = OSeq::new();
    let mut handles = vec![];

    for i in 0..100 {
        handles.push(index.insert_extremal(i, Side::Greater));
    }
    for i in (100..200).rev() {
        handles.insert(0, index.insert_extremal(i, Side::Smaller));
    }

    for (i, &h) in handles.iter().enumerate() {
        assert_eq!(index.rank(h).unwrap(), i);
        assert_eq!(index.select(i).unwrap(), h);
    }
    index.validate().unwrap();

    assert_eq!(index.extremal(Side::Smaller), Some(handles[0]));
    assert_eq!(index.extremal(Side::Greater), Some(handles[199]));
    assert_eq!(index.adjacent(handles[10], Side::Greater).unwrap(), Some(handles[11]));
    assert_eq!(index.adjacent(handles[10], Side::Smaller).unwrap(), Some(handles[9]));
    assert_eq!(index.adjacent(handles[0], Side::Smaller).unwrap(), None);
    assert_eq!(index.adjacent(handles[199], Side::Greater).unwrap(), None);
}

#[test]
fn test_seq_set() {
    let mut index: OSeq<u64> = OSeq::new();
    let a = index.insert_extremal(10, Side::Greater);
    let b = index.insert_extremal(20, Side::Greater);

    assert_eq!(index.set(a, 11).unwrap(), 10);
    assert_eq!(index.get(a).unwrap(), &11);
    assert_eq!(index.get(b).unwrap(), &20);
    assert_eq!(index.rank(a).unwrap(), 0); // no reordering
    index.validate().unwrap();
}

// insert a batch through random extremal/adjacent choices, then remove
// every entry in random handle order, validating after every single
// operation.
#[test]
fn test_seq_churn() {
    let seed: u128 = random();
    // let seed: u128 = 108608880608704922882102056739567863183;
    println!("test_seq_churn {}", seed);
    let mut rng = SmallRng::from_seed(make_seed(seed));

    let mut index: OSeq<u64> = OSeq::new();
    let mut refv: Vec<(Handle, u64)> = vec![];

    let n = 1_000;
    for i in 0..n {
        let value = rng.gen::<u64>();
        let (at, handle) = if refv.is_empty() || rng.gen::<u8>() % 2 == 0 {
            let side = flip(&mut rng);
            let at = match side {
                Side::Smaller => 0,
                Side::Greater => refv.len(),
            };
            (at, index.insert_extremal(value, side))
        } else {
            let j = rng.gen::<usize>() % refv.len();
            let side = flip(&mut rng);
            let at = match side {
                Side::Smaller => j,
                Side::Greater => j + 1,
            };
            (at, index.insert_adjacent(refv[j].0, value, side).unwrap())
        };
        refv.insert(at, (handle, value));

        index.validate().unwrap();
        assert_eq!(index.len(), i + 1);
    }

    for i in 0..n {
        let j = rng.gen::<usize>() % refv.len();
        let (handle, value) = refv.remove(j);
        assert_eq!(index.remove(handle).unwrap(), value);
        assert!(index.get(handle).is_err());

        index.validate().unwrap();
        assert_eq!(index.len(), n - i - 1);
    }
    assert!(index.is_empty());
}

#[test]
fn test_seq() {
    let seed: u128 = random();
    // let seed: u128 = 55460639888202704213570867496101801838;
    println!("test_seq {}", seed);
    let mut rng = SmallRng::from_seed(make_seed(seed));

    let mut index: OSeq<u64> = OSeq::new();
    let mut refv: Vec<(Handle, u64)> = vec![];

    let mut counts = [0_usize; 11];

    for _i in 0..10_000 {
        let bytes = rng.gen::<[u8; 32]>();
        let mut uns = Unstructured::new(&bytes);

        let op: Op = uns.arbitrary().unwrap();
        // println!("op -- {:?}", op);
        match op {
            Op::Len => {
                counts[0] += 1;
                assert_eq!(index.len(), refv.len());
            }
            Op::IsEmpty => {
                counts[1] += 1;
                assert_eq!(index.is_empty(), refv.is_empty());
            }
            Op::InsertExtremal(value, side) => {
                counts[2] += 1;
                let side = Side::from(side);
                let handle = index.insert_extremal(value, side);
                match side {
                    Side::Smaller => refv.insert(0, (handle, value)),
                    Side::Greater => refv.push((handle, value)),
                }
            }
            Op::InsertAdjacent(j, value, side) if !refv.is_empty() => {
                counts[3] += 1;
                let j = j % refv.len();
                let side = Side::from(side);
                let handle = index.insert_adjacent(refv[j].0, value, side).unwrap();
                let at = match side {
                    Side::Smaller => j,
                    Side::Greater => j + 1,
                };
                refv.insert(at, (handle, value));
            }
            Op::Remove(j) if !refv.is_empty() => {
                counts[4] += 1;
                let (handle, value) = refv.remove(j % refv.len());
                assert_eq!(index.remove(handle).unwrap(), value);
                assert_eq!(index.is_valid(handle), false);
            }
            Op::Get(j) if !refv.is_empty() => {
                counts[5] += 1;
                let (handle, value) = refv[j % refv.len()];
                assert_eq!(index.get(handle).unwrap(), &value);
            }
            Op::Set(j, value) if !refv.is_empty() => {
                counts[6] += 1;
                let j = j % refv.len();
                let (handle, old) = refv[j];
                assert_eq!(index.set(handle, value).unwrap(), old);
                refv[j] = (handle, value);
            }
            Op::Rank(j) if !refv.is_empty() => {
                counts[7] += 1;
                let j = j % refv.len();
                assert_eq!(index.rank(refv[j].0).unwrap(), j);
            }
            Op::Select(j) if !refv.is_empty() => {
                counts[8] += 1;
                let j = j % refv.len();
                assert_eq!(index.select(j).unwrap(), refv[j].0);
            }
            Op::Iter => {
                counts[9] += 1;
                let a: Vec<u64> = index.iter().cloned().collect();
                let b: Vec<u64> = refv.iter().map(|(_, value)| *value).collect();
                assert_eq!(a, b);
            }
            _ => counts[10] += 1, // op on empty instance, skipped
        }

        index.validate().unwrap();
    }

    // rank/select round trip over everything still alive.
    for (j, &(handle, _)) in refv.iter().enumerate() {
        assert_eq!(index.rank(handle).unwrap(), j);
        assert_eq!(index.select(j).unwrap(), handle);
    }

    println!("counts {:?} len:{}/{}", counts, index.len(), refv.len());
}

fn collect<V: Clone>(index: &OSeq<V>) -> Vec<V> {
    index.iter().cloned().collect()
}

// widen the replayable u128 seed into SmallRng's seed width.
fn make_seed(seed: u128) -> [u8; 32] {
    let mut out = [0; 32];
    out[..16].copy_from_slice(&seed.to_le_bytes());
    out[16..].copy_from_slice(&seed.to_be_bytes());
    out
}

fn flip<R: Rng>(rng: &mut R) -> Side {
    if rng.gen::<bool>() {
        Side::Smaller
    } else {
        Side::Greater
    }
}

#[derive(Debug, Arbitrary)]
enum Op {
    Len,
    IsEmpty,
    InsertExtremal(u64, Flip),
    InsertAdjacent(usize, u64, Flip),
    Remove(usize),
    Get(usize),
    Set(usize, u64),
    Rank(usize),
    Select(usize),
    Iter,
}

// Side is not Arbitrary, the test derives its own coin.
#[derive(Debug, Arbitrary, Clone, Copy)]
enum Flip {
    Smaller,
    Greater,
}

impl From<Flip> for Side {
    fn from(flip: Flip) -> Side {
        match flip {
            Flip::Smaller => Side::Smaller,
            Flip::Greater => Side::Greater,
        }
    }
}

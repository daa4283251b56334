use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cosmap::error::{CosmapError, Result};
use cosmap::index::ProjectionIndex;
use cosmap::index::config::ProjectionIndexConfig;
use cosmap::index::entry::EntryId;
use cosmap::index::observer::LogOverwrites;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_vector(rng: &mut StdRng, dimension: usize) -> Vec<f32> {
    (0..dimension).map(|_| rng.random_range(-1.0..1.0)).collect()
}

fn assert_bounds_hold<T>(index: &ProjectionIndex<T>) {
    match index.bounds() {
        Some((min, max)) => {
            for entry in index.iter() {
                assert!(
                    min <= entry.projection() && entry.projection() <= max,
                    "projection {} outside [{min}, {max}]",
                    entry.projection()
                );
            }
        }
        None => {
            assert!(index.is_empty());
            assert_eq!(index.min_projection(), 0.0);
            assert_eq!(index.max_projection(), 0.0);
        }
    }
}

#[test]
fn projection_index_overwrites_then_extends_range() -> Result<()> {
    init_logger();
    let mut index = ProjectionIndex::new(4).with_observer(LogOverwrites);
    assert_eq!(index.reference_direction(), &[0.5, 0.5, 0.5, 0.5]);

    assert!(!index.push(&[1.0, 0.0, 0.0, 0.0], "a")?);
    assert!(index.push(&[0.0, 1.0, 0.0, 0.0], "b")?);
    assert_eq!(index.len(), 1);

    let entry = index.search(&[1.0, 0.0, 0.0, 0.0])?.expect("entry");
    assert_eq!(*entry.value(), "b");
    assert_eq!(entry.vector(), &[1.0, 0.0, 0.0, 0.0]);

    assert!(!index.push(&[10.0, 10.0, 10.0, 10.0], "big")?);
    assert_eq!(index.len(), 2);
    assert_eq!(index.max_projection(), 20.0);
    assert_eq!(index.min_projection(), 0.5);
    Ok(())
}

#[test]
fn projection_index_recalls_every_pushed_value() -> Result<()> {
    init_logger();
    let dimension = 160;
    let mut rng = StdRng::seed_from_u64(7);
    let mut index = ProjectionIndex::new(dimension);

    for i in 0..500 {
        let vector = random_vector(&mut rng, dimension);
        let overwritten = index.push(&vector, i)?;

        let projection = index.projection(&vector)?;
        let entry = index.search(&vector)?.expect("just pushed");
        assert!((entry.projection() - projection).abs() < 0.1);

        if overwritten {
            // The overwritten entry is the one search lands on again.
            assert_eq!(*entry.value(), i);
            assert_ne!(entry.vector(), vector.as_slice());
        } else {
            // A fresh entry just past the old bounds may sit within tolerance
            // of its neighbour, which search can return first.
            assert!(index.iter().any(|entry| *entry.value() == i));
        }
    }

    assert!(index.len() > 1);
    assert_bounds_hold(&index);
    Ok(())
}

#[test]
fn projection_index_overwrite_keeps_entry_count() -> Result<()> {
    let mut index = ProjectionIndex::new(8);
    let base = vec![0.25; 8];
    index.push(&base, 1)?;

    let mut nudged = base.clone();
    nudged[0] += 0.05;
    let len = index.len();
    assert!(index.push(&nudged, 2)?);
    assert_eq!(index.len(), len);

    let entry = index.search(&nudged)?.expect("entry");
    assert_eq!(entry.vector(), base.as_slice());
    assert_eq!(*entry.value(), 2);
    Ok(())
}

#[test]
fn projection_index_fast_path_updates_bounds() -> Result<()> {
    let mut index = ProjectionIndex::new(1);
    index.push(&[0.0], ())?;

    for step in 1..=20 {
        let high = step as f32;
        assert!(!index.push(&[high], ())?);
        assert_eq!(index.max_projection(), high);

        let low = -high;
        assert!(!index.push(&[low], ())?);
        assert_eq!(index.min_projection(), low);
    }

    assert_eq!(index.len(), 41);
    assert_bounds_hold(&index);
    Ok(())
}

#[test]
fn projection_index_bounds_survive_mixed_push_and_remove() -> Result<()> {
    let dimension = 16;
    let mut rng = StdRng::seed_from_u64(42);
    let mut index = ProjectionIndex::new(dimension);
    let mut ids: Vec<EntryId> = Vec::new();

    for round in 0..300 {
        if round % 3 == 2 && !ids.is_empty() {
            let victim = ids.swap_remove(rng.random_range(0..ids.len()));
            let len = index.len();
            assert!(index.remove(victim));
            assert_eq!(index.len(), len - 1);

            let bounds = index.bounds();
            let order: Vec<EntryId> = index.iter().map(|entry| entry.id()).collect();
            assert!(!index.remove(victim));
            assert_eq!(index.len(), len - 1);
            assert_eq!(index.bounds(), bounds);
            assert_eq!(
                index.iter().map(|entry| entry.id()).collect::<Vec<_>>(),
                order
            );
        } else {
            let vector: Vec<f32> = random_vector(&mut rng, dimension)
                .into_iter()
                .map(|x| x * 4.0)
                .collect();
            if !index.push(&vector, round)? {
                let newest = index.iter().map(|entry| entry.id()).max().expect("inserted");
                ids.push(newest);
            }
        }
        assert_bounds_hold(&index);
    }

    for id in ids.drain(..) {
        assert!(index.remove(id));
        assert_bounds_hold(&index);
    }
    assert!(index.is_empty());
    assert_eq!(index.bounds(), None);
    Ok(())
}

#[test]
fn projection_index_rejects_mismatched_lengths() -> Result<()> {
    let mut index: ProjectionIndex<u8> = ProjectionIndex::new(3);
    index.push(&[1.0, 1.0, 1.0], 1)?;

    assert!(matches!(
        index.push(&[1.0, 1.0], 2),
        Err(CosmapError::InvalidArgument(_))
    ));
    assert!(matches!(
        index.search(&[1.0; 4]),
        Err(CosmapError::InvalidArgument(_))
    ));
    assert_eq!(index.len(), 1);
    Ok(())
}

#[test]
fn projection_index_from_json_config() -> Result<()> {
    let config = ProjectionIndexConfig::from_json(
        r#"{"dimension": 1, "tolerance": 0.5, "linear_scan_threshold": 2}"#,
    )?;
    let mut index = ProjectionIndex::with_config(config)?;

    index.push(&[0.0], "zero")?;
    index.push(&[1.0], "one")?;
    assert!(index.push(&[0.6], "near one")?);
    assert_eq!(*index.search(&[1.0])?.expect("entry").value(), "near one");
    Ok(())
}

#[test]
fn projection_index_behind_a_mutex() -> Result<()> {
    let index = Arc::new(Mutex::new(ProjectionIndex::new(2)));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let index = Arc::clone(&index);
            std::thread::spawn(move || -> Result<()> {
                for i in 0..25 {
                    let x = (t * 25 + i) as f32;
                    index.lock().expect("lock").push(&[x, x], t)?;
                }
                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread")?;
    }

    let index = index.lock().expect("lock");
    assert_eq!(index.len(), 100);
    assert_bounds_hold(&index);
    Ok(())
}

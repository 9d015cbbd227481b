//! Balanced partitioning of the warehouse keyspace.

use crate::error::PartitionError;
use rand::Rng;
use std::collections::HashMap;

/// Splits `total` warehouses into `parts` disjoint contiguous ranges and
/// assigns each range its share of the `active` warehouses.
///
/// Active warehouses are packed at the front of each range, so changing the
/// active count later never requires repartitioning: the remainder of each
/// range is reserved but idle. The struct is immutable after construction
/// and safe to share across workers.
#[derive(Debug, Clone)]
pub struct Partitioner {
    /// Total number of warehouses in the schema.
    total: usize,
    /// Warehouses currently generating load.
    active: usize,
    /// Number of partitions `total` is broken into.
    parts: usize,

    /// Boundary points between partitions; partition `i` covers
    /// `bounds[i]..bounds[i+1]`.
    bounds: Vec<usize>,
    /// Active warehouses in each partition, each a contiguous ascending run
    /// starting at the partition's lower bound.
    part_elems: Vec<Vec<usize>>,
    /// Reverse mapping from active warehouse to partition index.
    elem_to_part: HashMap<usize, usize>,
    /// All active warehouses in partition order, for uniform sampling.
    all_elems: Vec<usize>,
}

impl Partitioner {
    /// Build a partitioner for `total` warehouses, `active` of which are
    /// under load, split into `parts` partitions.
    ///
    /// With `total = 20`, `active = 10`, `parts = 3`:
    ///
    /// ```text
    /// bounds     = [0, 6, 13, 20]
    /// sizes      = [3, 3, 4]
    /// part_elems = [[0, 1, 2], [6, 7, 8], [13, 14, 15, 16]]
    /// ```
    pub fn new(total: usize, active: usize, parts: usize) -> Result<Self, PartitionError> {
        if total == 0 {
            return Err(PartitionError::TotalNotPositive(total));
        }
        if active == 0 {
            return Err(PartitionError::ActiveNotPositive(active));
        }
        if parts == 0 {
            return Err(PartitionError::PartsNotPositive(parts));
        }
        if active > total {
            return Err(PartitionError::ActiveExceedsTotal { active, total });
        }
        if parts > total {
            return Err(PartitionError::PartsExceedTotal { parts, total });
        }

        // Boundary points between partitions. Scaled integer division keeps
        // the range sizes within one of each other.
        let bounds: Vec<usize> = (0..=parts).map(|i| i * total / parts).collect();

        // Active count per partition, by the same technique applied to
        // `active`; the counts sum to `active` exactly.
        let sizes: Vec<usize> = (0..parts)
            .map(|i| (i + 1) * active / parts - i * active / parts)
            .collect();

        // Active warehouses occupy the front of each partition's range.
        let part_elems: Vec<Vec<usize>> = (0..parts)
            .map(|i| (bounds[i]..bounds[i] + sizes[i]).collect())
            .collect();

        let mut elem_to_part = HashMap::new();
        for (part, elems) in part_elems.iter().enumerate() {
            for &elem in elems {
                elem_to_part.insert(elem, part);
            }
        }

        let all_elems: Vec<usize> = part_elems.iter().flatten().copied().collect();

        Ok(Self {
            total,
            active,
            parts,
            bounds,
            part_elems,
            elem_to_part,
            all_elems,
        })
    }

    /// Total number of warehouses.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of warehouses under load.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Number of partitions.
    pub fn parts(&self) -> usize {
        self.parts
    }

    /// Boundary points between partitions, `parts + 1` entries with the
    /// first at zero and the last at `total`.
    pub fn bounds(&self) -> &[usize] {
        &self.bounds
    }

    /// Active warehouses per partition.
    pub fn partition_elements(&self) -> &[Vec<usize>] {
        &self.part_elems
    }

    /// Partition index holding an active warehouse, or `None` if the
    /// warehouse is idle or out of range.
    pub fn partition_of(&self, elem: usize) -> Option<usize> {
        self.elem_to_part.get(&elem).copied()
    }

    /// All active warehouses in partition order.
    pub fn active_elements(&self) -> &[usize] {
        &self.all_elems
    }

    /// Draw a uniformly random active warehouse.
    ///
    /// The generator is injected so that each worker can hold its own
    /// seeded generator and runs stay reproducible.
    pub fn rand_active<R: Rng>(&self, rng: &mut R) -> usize {
        self.all_elems[rng.gen_range(0..self.all_elems.len())]
    }

    /// Describe the partition layout for logging.
    pub fn describe(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "{} partitions over {} warehouses ({} active):",
            self.parts, self.total, self.active
        ));
        for i in 0..self.parts {
            lines.push(format!(
                "  p{}: [{}, {}), {} active",
                i,
                self.bounds[i],
                self.bounds[i + 1],
                self.part_elems[i].len()
            ));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_documented_scenario() {
        let p = Partitioner::new(20, 10, 3).unwrap();

        assert_eq!(p.bounds(), &[0, 6, 13, 20]);
        assert_eq!(
            p.partition_elements(),
            &[vec![0, 1, 2], vec![6, 7, 8], vec![13, 14, 15, 16]]
        );
        assert_eq!(p.active_elements(), &[0, 1, 2, 6, 7, 8, 13, 14, 15, 16]);
    }

    #[test]
    fn test_bounds_shape() {
        for &(total, active, parts) in &[
            (1, 1, 1),
            (10, 10, 10),
            (20, 10, 3),
            (1000, 7, 13),
            (97, 31, 5),
        ] {
            let p = Partitioner::new(total, active, parts).unwrap();
            let bounds = p.bounds();

            assert_eq!(bounds.len(), parts + 1);
            assert_eq!(bounds[0], 0);
            assert_eq!(bounds[parts], total);
            assert!(bounds.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_active_counts_balanced() {
        for &(total, active, parts) in &[(20, 10, 3), (100, 99, 7), (50, 3, 11), (64, 64, 8)] {
            let p = Partitioner::new(total, active, parts).unwrap();
            let sizes: Vec<usize> = p.partition_elements().iter().map(|e| e.len()).collect();

            assert_eq!(sizes.iter().sum::<usize>(), active);
            let max = sizes.iter().max().unwrap();
            let min = sizes.iter().min().unwrap();
            assert!(max - min <= 1, "unbalanced sizes {sizes:?}");
        }
    }

    #[test]
    fn test_elements_within_partition_ranges() {
        let p = Partitioner::new(97, 31, 5).unwrap();
        let bounds = p.bounds();

        for (i, elems) in p.partition_elements().iter().enumerate() {
            for &elem in elems {
                assert!(elem >= bounds[i] && elem < bounds[i + 1]);
            }
        }
    }

    #[test]
    fn test_reverse_mapping_matches_elements() {
        let p = Partitioner::new(100, 42, 9).unwrap();

        for (i, elems) in p.partition_elements().iter().enumerate() {
            for &elem in elems {
                assert_eq!(p.partition_of(elem), Some(i));
            }
        }
        // Every mapped warehouse is active, and vice versa.
        for &elem in p.active_elements() {
            assert!(p.partition_of(elem).is_some());
        }
        assert_eq!(
            p.active_elements().len(),
            p.partition_elements().iter().map(|e| e.len()).sum::<usize>()
        );
        assert!(p.partition_of(99).is_none());
    }

    #[test]
    fn test_invalid_arguments() {
        assert_eq!(
            Partitioner::new(0, 1, 1).unwrap_err(),
            PartitionError::TotalNotPositive(0)
        );
        assert_eq!(
            Partitioner::new(10, 0, 1).unwrap_err(),
            PartitionError::ActiveNotPositive(0)
        );
        assert_eq!(
            Partitioner::new(10, 1, 0).unwrap_err(),
            PartitionError::PartsNotPositive(0)
        );
        assert_eq!(
            Partitioner::new(10, 11, 1).unwrap_err(),
            PartitionError::ActiveExceedsTotal {
                active: 11,
                total: 10
            }
        );
        assert_eq!(
            Partitioner::new(10, 10, 11).unwrap_err(),
            PartitionError::PartsExceedTotal {
                parts: 11,
                total: 10
            }
        );
    }

    #[test]
    fn test_rand_active_draws_only_active_elements() {
        let p = Partitioner::new(20, 10, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let elem = p.rand_active(&mut rng);
            assert!(p.partition_of(elem).is_some(), "drew idle warehouse {elem}");
        }
    }

    #[test]
    fn test_rand_active_roughly_uniform() {
        let p = Partitioner::new(20, 10, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts: HashMap<usize, usize> = HashMap::new();
        let draws = 10_000;
        for _ in 0..draws {
            *counts.entry(p.rand_active(&mut rng)).or_default() += 1;
        }

        // All ten active warehouses reachable, each near the expected 1000.
        assert_eq!(counts.len(), p.active());
        for (&elem, &count) in &counts {
            assert!(
                (700..=1300).contains(&count),
                "warehouse {elem} drawn {count} times"
            );
        }
    }

    #[test]
    fn test_rand_active_deterministic_under_fixed_seed() {
        let p = Partitioner::new(50, 25, 5).unwrap();

        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20).map(|_| p.rand_active(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(draw(7), draw(7));
    }

    #[test]
    fn test_active_less_than_parts() {
        // Some partitions legitimately get no active warehouses.
        let p = Partitioner::new(10, 2, 5).unwrap();
        let sizes: Vec<usize> = p.partition_elements().iter().map(|e| e.len()).collect();

        assert_eq!(sizes.iter().sum::<usize>(), 2);
        assert!(sizes.iter().all(|&s| s <= 1));
    }

    #[test]
    fn test_describe() {
        let p = Partitioner::new(20, 10, 3).unwrap();
        let description = p.describe();

        assert!(description.contains("3 partitions over 20 warehouses"));
        assert!(description.contains("p0: [0, 6), 3 active"));
        assert!(description.contains("p2: [13, 20), 4 active"));
    }
}

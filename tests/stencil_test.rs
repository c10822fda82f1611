// SPDX-License-Identifier: MIT

use parexec::algorithms::{filter, MIN_STENCIL_LEN};
use parexec::{BoundedPool, ExecutionPolicy, ParallelError};
use test_utils::producers::random_sequence;
use test_utils::reference::reference_filter;

fn filtered(
    input: &[f64],
    max_workers: usize,
    policy: ExecutionPolicy,
) -> Vec<f64> {
    let pool = BoundedPool::new(max_workers).unwrap();
    let mut output = vec![0.0; input.len()];
    filter(&pool, input, &mut output, policy).unwrap();
    output
}

#[test]
fn test_three_elements() {
    let output = filtered(&[1.0, 2.0, 3.0], 4, ExecutionPolicy::Parallel);
    assert_eq!(output, vec![2.0, 2.0, 2.0]);
}

#[test]
fn test_zeros_stay_zero() {
    let output = filtered(&[0.0; 4], 4, ExecutionPolicy::Parallel);
    assert_eq!(output, vec![0.0; 4]);
}

#[test]
fn test_wraps_around_at_both_ends() {
    let input = [3.0, 0.0, 0.0, 0.0, 0.0, 6.0];
    let output = filtered(&input, 2, ExecutionPolicy::Parallel);
    assert_eq!(output, vec![3.0, 1.0, 0.0, 0.0, 2.0, 3.0]);
}

#[test]
fn test_matches_reference() {
    let input = random_sequence(100_003, 0);
    let expected = reference_filter(&input);

    assert_eq!(filtered(&input, 4, ExecutionPolicy::Parallel), expected);
}

#[test]
fn test_identical_across_policies_and_worker_counts() {
    let input = random_sequence(10_007, 7);
    let baseline = filtered(&input, 1, ExecutionPolicy::Sequential);

    for max_workers in [1, 2, 4, 8] {
        for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
            assert_eq!(
                filtered(&input, max_workers, policy),
                baseline,
                "{max_workers} workers, {policy:?}"
            );
        }
    }
}

#[test]
fn test_short_sequences_rejected() {
    let pool = BoundedPool::new(4).unwrap();

    for len in 0..MIN_STENCIL_LEN {
        let input = vec![1.0; len];
        let mut output = vec![-1.0; len];
        let result =
            filter(&pool, &input, &mut output, ExecutionPolicy::Parallel);

        assert!(matches!(
            result,
            Err(ParallelError::StencilTooShort { len: l, min: 3 }) if l == len
        ));
        assert!(output.iter().all(|&value| value == -1.0));
    }
}

#[test]
fn test_length_mismatch_rejected() {
    let pool = BoundedPool::new(4).unwrap();
    let input = vec![1.0; 8];
    let mut output = vec![0.0; 7];

    let result =
        filter(&pool, &input, &mut output, ExecutionPolicy::Sequential);

    assert!(matches!(
        result,
        Err(ParallelError::LengthMismatch {
            input: 8,
            output: 7
        })
    ));
}

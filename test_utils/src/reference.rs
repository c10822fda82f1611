// SPDX-License-Identifier: MIT

/// Single-threaded circular 3-point average with explicit boundary handling.
pub fn reference_filter(input: &[f64]) -> Vec<f64> {
    let n = input.len();
    let mut output = vec![0.0; n];

    for i in 1..n - 1 {
        output[i] = (input[i - 1] + input[i] + input[i + 1]) / 3.0;
    }

    // Wrap-around neighbours at both ends.
    output[0] = (input[n - 1] + input[0] + input[1]) / 3.0;
    output[n - 1] = (input[n - 2] + input[n - 1] + input[0]) / 3.0;

    output
}

/// Left-to-right sum.
pub fn reference_sum(input: &[f64]) -> f64 {
    let mut total = 0.0;
    for &value in input {
        total += value;
    }
    total
}

use burn::prelude::*;
use burn::tensor::TensorData;

use crate::game::{Board, CELLS};

/// Encode a board as the network's row-major input: Empty 0, Human +1, Agent -1.
pub fn encode_board(board: &Board) -> [f64; CELLS] {
    let mut data = [0.0f64; CELLS];
    for (slot, cell) in data.iter_mut().zip(board.cells()) {
        *slot = cell.value();
    }
    data
}

/// Lift a flat encoding into a `[1, len]` row vector for matrix products.
pub fn encoding_to_tensor<B: Backend>(encoding: &[f64], device: &B::Device) -> Tensor<B, 2> {
    Tensor::<B, 1>::from_data(TensorData::from(encoding), device).reshape([1, encoding.len()])
}

use burn::prelude::*;
use burn::tensor::activation::sigmoid;
use burn::tensor::TensorData;
use rand::Rng;

use crate::ai::state_encoding::encoding_to_tensor;
use crate::error::NetworkError;
use crate::game::CELLS;

pub const INPUT_SIZE: usize = CELLS;
pub const OUTPUT_SIZE: usize = CELLS;

/// Largest hidden layer a config may ask for.
pub const MAX_HIDDEN_SIZE: usize = 64;

/// Distance kept between any score and the ends of (0, 1).
const SCORE_MARGIN: f64 = 1e-12;

/// Network shape and optimisation hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub hidden_size: usize,
    pub learning_rate: f64,
    /// Seed for weight initialisation and the fallback RNG. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            hidden_size: 10,
            learning_rate: 0.1,
            seed: None,
        }
    }
}

impl NetworkConfig {
    /// Build a randomly initialised network drawing weights from `rng`.
    pub fn init<B: Backend, R: Rng>(
        &self,
        rng: &mut R,
        device: &B::Device,
    ) -> PolicyNetwork<B> {
        PolicyNetwork::random(self.hidden_size, self.learning_rate, rng, device)
    }
}

/// Two-layer sigmoid network scoring each of the nine cells.
///
/// ```text
/// Input:  [1, 9]   board encoding
/// W1:     [9, H]   -> sigmoid -> hidden [1, H]
/// W2:     [H, 9]   -> sigmoid -> scores [1, 9], each in (0, 1)
/// ```
///
/// No biases. The weights change only through [`PolicyNetwork::train`].
#[derive(Debug, Clone)]
pub struct PolicyNetwork<B: Backend> {
    w1: Tensor<B, 2>,
    w2: Tensor<B, 2>,
    learning_rate: f64,
    device: B::Device,
}

impl<B: Backend> PolicyNetwork<B> {
    /// Weights drawn uniformly from `[0, 1)`.
    pub fn random<R: Rng>(
        hidden_size: usize,
        learning_rate: f64,
        rng: &mut R,
        device: &B::Device,
    ) -> Self {
        let w1 = (0..INPUT_SIZE * hidden_size).map(|_| rng.random::<f64>()).collect();
        let w2 = (0..hidden_size * OUTPUT_SIZE).map(|_| rng.random::<f64>()).collect();
        Self::from_weights(w1, w2, hidden_size, learning_rate, device)
    }

    /// All-zero weights: a network that carries no signal yet.
    pub fn zeroed(hidden_size: usize, learning_rate: f64, device: &B::Device) -> Self {
        Self::from_weights(
            vec![0.0; INPUT_SIZE * hidden_size],
            vec![0.0; hidden_size * OUTPUT_SIZE],
            hidden_size,
            learning_rate,
            device,
        )
    }

    /// Build from row-major weight buffers. `w1` is `INPUT_SIZE x hidden_size`,
    /// `w2` is `hidden_size x OUTPUT_SIZE`; panics on any other length.
    pub fn from_weights(
        w1: Vec<f64>,
        w2: Vec<f64>,
        hidden_size: usize,
        learning_rate: f64,
        device: &B::Device,
    ) -> Self {
        assert!(hidden_size > 0, "hidden layer must have at least one unit");
        assert_eq!(
            w1.len(),
            INPUT_SIZE * hidden_size,
            "W1 must hold {INPUT_SIZE}x{hidden_size} weights"
        );
        assert_eq!(
            w2.len(),
            hidden_size * OUTPUT_SIZE,
            "W2 must hold {hidden_size}x{OUTPUT_SIZE} weights"
        );

        PolicyNetwork {
            w1: Tensor::from_data(TensorData::new(w1, [INPUT_SIZE, hidden_size]), device),
            w2: Tensor::from_data(TensorData::new(w2, [hidden_size, OUTPUT_SIZE]), device),
            learning_rate,
            device: device.clone(),
        }
    }

    pub fn hidden_size(&self) -> usize {
        self.w1.dims()[1]
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// False while every weight is still zero.
    pub fn is_initialized(&self) -> bool {
        let nonzero = |t: &Tensor<B, 2>| t.to_data().iter::<f64>().any(|w| w != 0.0);
        nonzero(&self.w1) || nonzero(&self.w2)
    }

    /// Flattened copies of (W1, W2), row-major.
    pub fn weights(&self) -> (Vec<f64>, Vec<f64>) {
        (
            self.w1.to_data().iter::<f64>().collect(),
            self.w2.to_data().iter::<f64>().collect(),
        )
    }

    /// Score every cell for the encoded board. Every score lies strictly
    /// inside (0, 1). Panics unless `input.len() == INPUT_SIZE`.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let (_, scores) = self.forward_layers(input);
        scores
    }

    /// One gradient-descent step on a single sample. Returns the mean squared
    /// error of the output *before* the update.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<f64, NetworkError> {
        let (hidden, scores) = self.forward_layers(input);
        let loss = mean_squared_error(&scores, target)?;

        let x = encoding_to_tensor::<B>(input, &self.device);
        let t = encoding_to_tensor::<B>(target, &self.device);
        let output = encoding_to_tensor::<B>(&scores, &self.device);

        // dL/dy = 2/n (y - t), then through the output sigmoid
        let scale = 2.0 / OUTPUT_SIZE as f64;
        let output_delta = (output.clone() - t).mul_scalar(scale) * sigmoid_derivative(output);
        let grad_w2 = hidden.clone().transpose().matmul(output_delta.clone());

        // Back through W2 (pre-update) and the hidden sigmoid
        let hidden_delta =
            output_delta.matmul(self.w2.clone().transpose()) * sigmoid_derivative(hidden);
        let grad_w1 = x.transpose().matmul(hidden_delta);

        let lr = self.learning_rate;
        self.w2 = self.w2.clone() - grad_w2.mul_scalar(lr);
        self.w1 = self.w1.clone() - grad_w1.mul_scalar(lr);

        Ok(loss)
    }

    /// Returns (hidden activations `[1, H]`, output scores). Scores that
    /// round to 0 or 1 are pulled back inside by `SCORE_MARGIN`.
    fn forward_layers(&self, input: &[f64]) -> (Tensor<B, 2>, Vec<f64>) {
        assert_eq!(
            input.len(),
            INPUT_SIZE,
            "network input must have {INPUT_SIZE} values, got {}",
            input.len()
        );
        let x = encoding_to_tensor::<B>(input, &self.device);
        let hidden = sigmoid(x.matmul(self.w1.clone()));
        let output = sigmoid(hidden.clone().matmul(self.w2.clone()));
        let scores = output
            .into_data()
            .iter::<f64>()
            .map(|s| s.clamp(SCORE_MARGIN, 1.0 - SCORE_MARGIN))
            .collect();
        (hidden, scores)
    }
}

/// sigmoid'(z) expressed through the activation a = sigmoid(z): a * (1 - a).
fn sigmoid_derivative<B: Backend>(activation: Tensor<B, 2>) -> Tensor<B, 2> {
    activation.clone() * activation.neg().add_scalar(1.0)
}

/// MSE = (1/n) * sum((output_i - target_i)^2).
pub fn mean_squared_error(output: &[f64], target: &[f64]) -> Result<f64, NetworkError> {
    if output.len() != target.len() {
        return Err(NetworkError::DimensionMismatch {
            expected: output.len(),
            actual: target.len(),
        });
    }
    if output.is_empty() {
        return Ok(0.0);
    }
    let sum: f64 = output
        .iter()
        .zip(target)
        .map(|(o, t)| (o - t) * (o - t))
        .sum();
    Ok(sum / output.len() as f64)
}

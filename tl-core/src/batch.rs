//! Safetensors ingestion: decode one inference cycle's outputs into tensors.
//!
//! Engines that hand results over as a serialized safetensors buffer (the
//! interchange format used for model checkpoints and replay shards) can be
//! consumed directly. Only `F32` tensors are accepted, and every tensor must
//! carry the cycle's batch size on its first dimension.

use safetensors::tensor::Dtype;
use safetensors::SafeTensors;
use thiserror::Error;

use crate::tensor::OutputTensor;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("safetensors: {0}")]
    Safetensors(#[from] safetensors::SafeTensorError),
    #[error("tensor {name}: unsupported dtype {dtype:?}, expected F32")]
    BadDtype { name: String, dtype: Dtype },
    #[error("tensor {name}: rank 0 shape")]
    RankZero { name: String },
    #[error("tensor {name}: batch dimension {got}, expected {expected}")]
    BadBatch {
        name: String,
        got: usize,
        expected: usize,
    },
}

/// Decode every tensor in a serialized safetensors buffer.
///
/// `expected_batch` is the number of agents in the cycle; a tensor whose
/// first dimension differs is a contract violation at this boundary.
pub fn load_output_batch(
    bytes: &[u8],
    expected_batch: usize,
) -> Result<Vec<OutputTensor>, BatchError> {
    let st = SafeTensors::deserialize(bytes)?;
    let mut out = Vec::with_capacity(st.len());

    for (name, view) in st.tensors() {
        if view.dtype() != Dtype::F32 {
            return Err(BatchError::BadDtype {
                name,
                dtype: view.dtype(),
            });
        }
        let shape = view.shape().to_vec();
        let Some(&batch) = shape.first() else {
            return Err(BatchError::RankZero { name });
        };
        if batch != expected_batch {
            return Err(BatchError::BadBatch {
                name,
                got: batch,
                expected: expected_batch,
            });
        }

        // The raw byte view is not guaranteed to be 4-byte aligned, so decode
        // per element instead of casting the slice.
        let raw = view.data();
        let mut data = Vec::with_capacity(raw.len() / 4);
        for b in raw.chunks_exact(4) {
            data.push(f32::from_le_bytes([b[0], b[1], b[2], b[3]]));
        }

        out.push(OutputTensor { name, shape, data });
    }

    Ok(out)
}

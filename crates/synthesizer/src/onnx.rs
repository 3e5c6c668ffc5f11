//! ONNX Runtime backend for FastSpeech2 inference.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{Tensor, Value};
use tracing::debug;
use tts_core::{SynthesisParams, TtsError, TtsResult};

/// A loaded FastSpeech2 ONNX session.
///
/// `Session::run` takes `&mut self`, so the session sits behind a mutex
/// and concurrent callers serialize.
#[derive(Debug)]
pub struct OnnxModel {
    session: Mutex<Session>,
}

impl OnnxModel {
    /// Load an exported FastSpeech2 model from an `.onnx` file.
    pub fn load(path: impl AsRef<Path>, intra_threads: usize) -> TtsResult<Self> {
        let path = path.as_ref();
        let session = build_session(path, intra_threads).map_err(|e| TtsError::ModelLoad {
            path: path.to_path_buf(),
            source: io::Error::other(e.to_string()),
        })?;
        debug!(path = %path.display(), "ONNX model loaded");
        Ok(Self {
            session: Mutex::new(session),
        })
    }

    /// Run the model over one symbol sequence and return raw samples.
    ///
    /// The exported graph takes the FastSpeech2 inference inputs: the
    /// symbol IDs with their length, a speaker index, and the three
    /// prosody controls. The waveform comes back on the `wav` output,
    /// with a fallback to the first output for models exported under a
    /// different name.
    pub fn infer(&self, ids: &[i64], params: &SynthesisParams) -> TtsResult<Vec<f32>> {
        let src_len = ids.len() as i64;

        let mut inputs: HashMap<String, Value> = HashMap::new();

        let speakers = Tensor::from_array(([1], vec![params.speaker_id]))
            .map_err(tensor_error)?;
        inputs.insert("speakers".to_string(), speakers.into());

        let texts = Tensor::from_array(([1, ids.len()], ids.to_vec())).map_err(tensor_error)?;
        inputs.insert("texts".to_string(), texts.into());

        let src_lens = Tensor::from_array(([1], vec![src_len])).map_err(tensor_error)?;
        inputs.insert("src_lens".to_string(), src_lens.into());

        let max_src_len = Tensor::from_array(([1], vec![src_len])).map_err(tensor_error)?;
        inputs.insert("max_src_len".to_string(), max_src_len.into());

        let p_control =
            Tensor::from_array(([1], vec![params.pitch_control])).map_err(tensor_error)?;
        inputs.insert("p_control".to_string(), p_control.into());

        let e_control =
            Tensor::from_array(([1], vec![params.energy_control])).map_err(tensor_error)?;
        inputs.insert("e_control".to_string(), e_control.into());

        let d_control =
            Tensor::from_array(([1], vec![params.duration_control])).map_err(tensor_error)?;
        inputs.insert("d_control".to_string(), d_control.into());

        let mut session = self
            .session
            .lock()
            .map_err(|_| TtsError::inference("model session lock poisoned"))?;
        let outputs = session
            .run(inputs)
            .map_err(|e| TtsError::inference(format!("model run failed: {e}")))?;

        let value = if let Some(value) = outputs.get("wav") {
            value.view()
        } else if let Some((_, value)) = outputs.iter().next() {
            value
        } else {
            return Err(TtsError::inference("model produced no outputs"));
        };

        let (_, samples) = value
            .try_extract_tensor::<f32>()
            .map_err(|e| TtsError::inference(format!("output extraction failed: {e}")))?;
        Ok(samples.to_vec())
    }
}

fn build_session(path: &Path, intra_threads: usize) -> ort::Result<Session> {
    Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(intra_threads)?
        .commit_from_file(path)
}

fn tensor_error(e: ort::Error) -> TtsError {
    TtsError::inference(format!("tensor creation failed: {e}"))
}

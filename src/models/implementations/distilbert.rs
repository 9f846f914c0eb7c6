//! DistilBERT sequence-classification implementation.
//!
//! DistilBERT is a distilled bidirectional encoder with:
//! - Learned absolute position embeddings
//! - Post-norm transformer layers with GELU feed-forward blocks
//! - A sequence-classification head over the first-token hidden state
//!
//! The sentiment checkpoints this crate ships with are plain
//! `DistilBertForSequenceClassification` fine-tunes, so a single encoder
//! implementation covers every supported variant; the label vocabulary is
//! read from each checkpoint's `config.json`.

use candle_core::{DType, Device, IndexOp, Result, Tensor, D};
use candle_nn::{
    embedding, layer_norm, linear, ops::softmax, Embedding, LayerNorm, Linear, Module, VarBuilder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const MIN_VALUE_F64: f64 = f32::MIN as f64;
// DistilBERT checkpoints do not carry an eps in config.json; this is the
// value the reference implementation hardcodes.
const LAYER_NORM_EPS: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub vocab_size: usize,
    pub dim: usize,
    pub n_layers: usize,
    pub n_heads: usize,
    pub hidden_dim: usize,
    pub max_position_embeddings: usize,
    #[serde(default)]
    pub pad_token_id: u32,
    #[serde(default)]
    pub id2label: Option<HashMap<String, String>>,
}

/// Token and position embeddings with the shared embedding norm.
#[derive(Debug, Clone)]
struct Embeddings {
    word_embeddings: Embedding,
    position_embeddings: Embedding,
    norm: LayerNorm,
}

impl Embeddings {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let word_embeddings =
            embedding(config.vocab_size, config.dim, vb.pp("word_embeddings"))?;
        let position_embeddings = embedding(
            config.max_position_embeddings,
            config.dim,
            vb.pp("position_embeddings"),
        )?;
        let norm = layer_norm(config.dim, LAYER_NORM_EPS, vb.pp("LayerNorm"))?;

        Ok(Self {
            word_embeddings,
            position_embeddings,
            norm,
        })
    }

    fn forward(&self, input_ids: &Tensor) -> Result<Tensor> {
        let (_batch, seq_len) = input_ids.dims2()?;
        let position_ids =
            Tensor::arange(0u32, seq_len as u32, input_ids.device())?.unsqueeze(0)?;

        let words = input_ids.apply(&self.word_embeddings)?;
        let positions = position_ids.apply(&self.position_embeddings)?;
        words.broadcast_add(&positions)?.apply(&self.norm)
    }
}

/// Multi-head self-attention with separate query/key/value projections.
#[derive(Debug, Clone)]
struct Attention {
    q_lin: Linear,
    k_lin: Linear,
    v_lin: Linear,
    out_lin: Linear,
    n_heads: usize,
    head_dim: usize,
}

impl Attention {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let n_heads = config.n_heads;
        let head_dim = config.dim / config.n_heads;

        let q_lin = linear(config.dim, config.dim, vb.pp("q_lin"))?;
        let k_lin = linear(config.dim, config.dim, vb.pp("k_lin"))?;
        let v_lin = linear(config.dim, config.dim, vb.pp("v_lin"))?;
        let out_lin = linear(config.dim, config.dim, vb.pp("out_lin"))?;

        Ok(Self {
            q_lin,
            k_lin,
            v_lin,
            out_lin,
            n_heads,
            head_dim,
        })
    }

    fn forward(&self, hidden_states: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let (batch, seq_len, dim) = hidden_states.dims3()?;

        let split_heads = |xs: &Tensor| -> Result<Tensor> {
            xs.reshape((batch, seq_len, self.n_heads, self.head_dim))?
                .transpose(1, 2)?
                .contiguous()
        };

        let q = split_heads(&hidden_states.apply(&self.q_lin)?)?;
        let k = split_heads(&hidden_states.apply(&self.k_lin)?)?;
        let v = split_heads(&hidden_states.apply(&self.v_lin)?)?;

        let scale = (self.head_dim as f64).powf(-0.5);
        let q = (q * scale)?;

        let attention_scores = q.matmul(&k.t()?)?;
        let attention_scores = attention_scores.broadcast_add(attention_mask)?;
        let attention_probs = softmax(&attention_scores, D::Minus1)?;

        attention_probs
            .matmul(&v)?
            .transpose(1, 2)?
            .reshape((batch, seq_len, dim))?
            .apply(&self.out_lin)
    }
}

/// Feed-forward block with GELU activation.
#[derive(Debug, Clone)]
struct FeedForward {
    lin1: Linear,
    lin2: Linear,
}

impl FeedForward {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let lin1 = linear(config.dim, config.hidden_dim, vb.pp("lin1"))?;
        let lin2 = linear(config.hidden_dim, config.dim, vb.pp("lin2"))?;
        Ok(Self { lin1, lin2 })
    }
}

impl Module for FeedForward {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        xs.apply(&self.lin1)?.gelu_erf()?.apply(&self.lin2)
    }
}

/// Single post-norm transformer layer.
#[derive(Debug, Clone)]
struct TransformerLayer {
    attention: Attention,
    sa_norm: LayerNorm,
    feed_forward: FeedForward,
    output_norm: LayerNorm,
}

impl TransformerLayer {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let attention = Attention::load(vb.pp("attention"), config)?;
        let sa_norm = layer_norm(config.dim, LAYER_NORM_EPS, vb.pp("sa_layer_norm"))?;
        let feed_forward = FeedForward::load(vb.pp("ffn"), config)?;
        let output_norm = layer_norm(config.dim, LAYER_NORM_EPS, vb.pp("output_layer_norm"))?;

        Ok(Self {
            attention,
            sa_norm,
            feed_forward,
            output_norm,
        })
    }

    fn forward(&self, hidden_states: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let residual = hidden_states.clone();
        let attention_output = self.attention.forward(hidden_states, attention_mask)?;
        let hidden_states = (residual + attention_output)?.apply(&self.sa_norm)?;

        let ffn_output = hidden_states.apply(&self.feed_forward)?;
        (hidden_states + ffn_output)?.apply(&self.output_norm)
    }
}

/// Classification head over the first-token hidden state.
#[derive(Debug, Clone)]
struct ClassificationHead {
    pre_classifier: Linear,
    classifier: Linear,
}

impl ClassificationHead {
    fn load(vb: VarBuilder, config: &Config, num_labels: usize) -> Result<Self> {
        let pre_classifier = linear(config.dim, config.dim, vb.pp("pre_classifier"))?;
        let classifier = linear(config.dim, num_labels, vb.pp("classifier"))?;

        Ok(Self {
            pre_classifier,
            classifier,
        })
    }

    fn forward(&self, hidden_states: &Tensor) -> Result<Tensor> {
        hidden_states
            .i((.., 0, ..))?
            .apply(&self.pre_classifier)?
            .relu()?
            .apply(&self.classifier)
    }
}

/// Encoder weights shared across clones of a loaded model.
#[derive(Debug, Clone)]
struct EncoderWeights {
    embeddings: Embeddings,
    layers: Vec<TransformerLayer>,
    head: ClassificationHead,
    dtype: DType,
}

impl EncoderWeights {
    fn load(vb: VarBuilder, config: &Config, num_labels: usize) -> Result<Self> {
        let encoder_vb = vb.pp("distilbert");
        let embeddings = Embeddings::load(encoder_vb.pp("embeddings"), config)?;

        let mut layers = Vec::with_capacity(config.n_layers);
        for layer_idx in 0..config.n_layers {
            layers.push(TransformerLayer::load(
                encoder_vb.pp(format!("transformer.layer.{layer_idx}")),
                config,
            )?);
        }

        // The classification head sits at the checkpoint root, outside the
        // `distilbert.` prefix.
        let head = ClassificationHead::load(vb.clone(), config, num_labels)?;

        Ok(Self {
            embeddings,
            layers,
            head,
            dtype: vb.dtype(),
        })
    }

    /// Turn a 1/0 padding mask into an additive attention mask.
    fn expand_attention_mask(&self, mask: &Tensor) -> Result<Tensor> {
        let (batch_size, seq_len) = mask.dims2()?;

        let expanded_mask = mask
            .unsqueeze(1)?
            .unsqueeze(2)?
            .expand((batch_size, 1, seq_len, seq_len))?
            .to_dtype(self.dtype)?;

        let inverted_mask = (1.0 - expanded_mask)?;
        (inverted_mask * MIN_VALUE_F64)?.to_dtype(self.dtype)
    }

    /// Forward pass returning classification logits of shape
    /// `(batch_size, num_labels)`.
    fn forward(&self, input_ids: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let additive_mask = self.expand_attention_mask(attention_mask)?;

        let mut hidden_states = self.embeddings.forward(input_ids)?;
        for layer in &self.layers {
            hidden_states = layer.forward(&hidden_states, &additive_mask)?;
        }

        self.head.forward(&hidden_states)
    }
}

/*
Pretrained sentiment checkpoints
*/

use crate::pipelines::sentiment_analysis::pipeline::SentimentResult;
use anyhow::{Error as E, Result as AnyhowResult};
use hf_hub::{api::sync::Api, Repo, RepoType};
use tokenizers::Tokenizer;

/// Available pretrained DistilBERT sentiment checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistilBertVariant {
    /// `distilbert-base-uncased-finetuned-sst-2-english`: English SST-2
    /// fine-tune emitting POSITIVE/NEGATIVE.
    SstEnglish,
    /// `lxyuan/distilbert-base-multilingual-cased-sentiments-student`:
    /// multilingual distillation emitting positive/neutral/negative.
    MultilingualSentiment,
}

impl DistilBertVariant {
    pub fn model_id(&self) -> &'static str {
        match self {
            DistilBertVariant::SstEnglish => "distilbert-base-uncased-finetuned-sst-2-english",
            DistilBertVariant::MultilingualSentiment => {
                "lxyuan/distilbert-base-multilingual-cased-sentiments-student"
            }
        }
    }

    /// Base-model repo to fetch `tokenizer.json` from when the fine-tuned
    /// repo does not ship one.
    fn tokenizer_fallback_id(&self) -> &'static str {
        match self {
            DistilBertVariant::SstEnglish => "distilbert-base-uncased",
            DistilBertVariant::MultilingualSentiment => "distilbert-base-multilingual-cased",
        }
    }
}

impl std::fmt::Display for DistilBertVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DistilBertVariant::SstEnglish => "distilbert-sst2-english",
            DistilBertVariant::MultilingualSentiment => "distilbert-multilingual-sentiment",
        };
        write!(f, "{name}")
    }
}

impl crate::core::ModelOptions for DistilBertVariant {
    fn cache_key(&self) -> String {
        self.to_string()
    }
}

/// Sentiment classification model backed by a pretrained DistilBERT
/// checkpoint.
#[derive(Clone)]
pub struct SentimentDistilBertModel {
    weights: Arc<EncoderWeights>,
    device: Device,
    id2label: HashMap<String, String>,
}

impl SentimentDistilBertModel {
    pub fn new(variant: DistilBertVariant, device: Device) -> AnyhowResult<Self> {
        let model_id = variant.model_id().to_string();

        let api = Api::new()?;
        let repo = api.repo(Repo::new(model_id.clone(), RepoType::Model));

        let config_filename = repo.get("config.json")?;
        let weights_filename = {
            match repo.get("model.safetensors") {
                Ok(safetensors) => safetensors,
                Err(_) => match repo.get("pytorch_model.bin") {
                    Ok(pytorch_model) => pytorch_model,
                    Err(e) => {
                        anyhow::bail!("Model weights not found in repo {}. Expected `model.safetensors` or `pytorch_model.bin`. Error: {e}", model_id)
                    }
                },
            }
        };

        let config_content = std::fs::read_to_string(&config_filename).map_err(|e| {
            E::msg(format!(
                "Failed to read config file {config_filename:?}: {e}"
            ))
        })?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| E::msg(format!("Failed to parse model config: {e}")))?;

        // The label vocabulary is owned by the checkpoint; a classification
        // checkpoint without one is unusable.
        let id2label = config.id2label.clone().ok_or_else(|| {
            E::msg(format!("Checkpoint {model_id} has no id2label map in config.json"))
        })?;

        debug!(
            model = %variant,
            labels = id2label.len(),
            "loading sentiment checkpoint"
        );

        let dtype = DType::F32;
        let vb = if weights_filename
            .extension()
            .is_some_and(|ext| ext == "safetensors")
        {
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_filename], dtype, &device)? }
        } else if weights_filename.extension().is_some_and(|ext| ext == "bin") {
            VarBuilder::from_pth(&weights_filename, dtype, &device)?
        } else {
            anyhow::bail!("Unsupported weight file format: {:?}", weights_filename);
        };

        let weights = Arc::new(EncoderWeights::load(vb, &config, id2label.len())?);

        Ok(Self {
            weights,
            device,
            id2label,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Labels this checkpoint can emit, e.g. `["NEGATIVE", "POSITIVE"]`.
    pub fn labels(&self) -> Vec<&str> {
        self.id2label.values().map(String::as_str).collect()
    }

    pub fn predict(&self, tokenizer: &Tokenizer, text: &str) -> AnyhowResult<SentimentResult> {
        let texts = [text.to_string()];
        let mut results = self.predict_batch(tokenizer, &texts)?;
        results
            .pop()
            .ok_or_else(|| E::msg("Classifier returned no prediction for a single input"))
    }

    /// Classify a whole batch with a single forward pass.
    ///
    /// Inputs are padded to the longest sequence in the batch; the output
    /// order matches the input order.
    pub fn predict_batch(
        &self,
        tokenizer: &Tokenizer,
        texts: &[String],
    ) -> AnyhowResult<Vec<SentimentResult>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let mut encodings = Vec::with_capacity(texts.len());
        for text in texts {
            let encoding = tokenizer
                .encode(text.as_str(), true)
                .map_err(|e| E::msg(format!("Tokenization error: {e}")))?;
            encodings.push(encoding);
        }

        // Pad the batch to its longest sequence.
        let max_len = encodings.iter().map(|e| e.len()).max().unwrap_or(0);
        let pad_token_id = tokenizer
            .get_padding()
            .map(|p| p.pad_id)
            .or_else(|| tokenizer.token_to_id("[PAD]"))
            .unwrap_or(0);

        let mut all_token_ids: Vec<u32> = Vec::new();
        let mut all_attention_masks: Vec<u32> = Vec::new();

        for encoding in encodings {
            let mut token_ids = encoding.get_ids().to_vec();
            let mut attention_mask = encoding.get_attention_mask().to_vec();

            token_ids.resize(max_len, pad_token_id);
            attention_mask.resize(max_len, 0);

            all_token_ids.extend(token_ids);
            all_attention_masks.extend(attention_mask);
        }

        let input_ids_tensor =
            Tensor::from_vec(all_token_ids, (texts.len(), max_len), &self.device)?;
        let attention_mask_tensor =
            Tensor::from_vec(all_attention_masks, (texts.len(), max_len), &self.device)?;

        let logits = self
            .weights
            .forward(&input_ids_tensor, &attention_mask_tensor)?;
        let probabilities = softmax(&logits, D::Minus1)?.to_vec2::<f32>()?;

        let mut results = Vec::with_capacity(texts.len());
        for row in probabilities {
            let (predicted_id, score) = row
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                .ok_or_else(|| E::msg("Classifier produced an empty probability row"))?;

            let label = self
                .id2label
                .get(&predicted_id.to_string())
                .ok_or_else(|| {
                    E::msg(format!(
                        "Predicted ID '{predicted_id}' not found in id2label map"
                    ))
                })?
                .clone();

            results.push(SentimentResult {
                label,
                score: *score,
            });
        }

        Ok(results)
    }

    pub fn get_tokenizer(variant: DistilBertVariant) -> AnyhowResult<Tokenizer> {
        let api = Api::new()?;
        let repo = api.repo(Repo::new(variant.model_id().to_string(), RepoType::Model));

        // Some fine-tuned repos only publish the slow-tokenizer files; fall
        // back to the base model's tokenizer.json in that case.
        let tokenizer_filename = match repo.get("tokenizer.json") {
            Ok(filename) => filename,
            Err(_) => {
                let base = api.repo(Repo::new(
                    variant.tokenizer_fallback_id().to_string(),
                    RepoType::Model,
                ));
                base.get("tokenizer.json")?
            }
        };

        Tokenizer::from_file(tokenizer_filename)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))
    }
}

impl crate::pipelines::sentiment_analysis::model::SentimentAnalysisModel
    for SentimentDistilBertModel
{
    type Options = DistilBertVariant;

    fn new(options: Self::Options, device: Device) -> anyhow::Result<Self> {
        SentimentDistilBertModel::new(options, device)
    }

    fn predict(&self, tokenizer: &Tokenizer, text: &str) -> AnyhowResult<SentimentResult> {
        self.predict(tokenizer, text)
    }

    fn predict_batch(
        &self,
        tokenizer: &Tokenizer,
        texts: &[String],
    ) -> AnyhowResult<Vec<SentimentResult>> {
        self.predict_batch(tokenizer, texts)
    }

    fn get_tokenizer(options: Self::Options) -> AnyhowResult<Tokenizer> {
        Self::get_tokenizer(options)
    }

    fn device(&self) -> &Device {
        self.device()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ModelOptions;

    #[test]
    fn variant_cache_keys_are_distinct() {
        assert_ne!(
            DistilBertVariant::SstEnglish.cache_key(),
            DistilBertVariant::MultilingualSentiment.cache_key()
        );
    }

    #[test]
    fn variant_model_ids() {
        assert_eq!(
            DistilBertVariant::SstEnglish.model_id(),
            "distilbert-base-uncased-finetuned-sst-2-english"
        );
        assert!(DistilBertVariant::MultilingualSentiment
            .model_id()
            .starts_with("lxyuan/"));
    }
}

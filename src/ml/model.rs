use anyhow::{anyhow, ensure, Result};
use burn::{
    nn::{loss::CrossEntropyLossConfig, Embedding, EmbeddingConfig, Linear, LinearConfig},
    prelude::*,
    tensor::activation::tanh,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally - do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct MnlmConfig {
    pub vocab_size:    usize,
    pub vector_size:   usize,
    /// Columns per feature row: 2·context_size + 2.
    pub num_features:  usize,
    /// One output head per network language.
    pub num_languages: usize,
    /// Weight of the language-specific head on top of the shared output.
    #[config(default = 1.0)]
    pub alpha:         f64,
    /// Label smoothing of the evaluation loss; 0 disables it.
    #[config(default = 0.0)]
    pub betta:         f64,
}

impl MnlmConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> MnlmModel<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.vector_size).init(device);
        let hidden    = LinearConfig::new(self.num_features * self.vector_size, self.vector_size)
            .init(device);
        let output    = LinearConfig::new(self.vector_size, self.vocab_size).init(device);
        let language_heads = (0..self.num_languages)
            .map(|_| LinearConfig::new(self.vector_size, self.vocab_size).init(device))
            .collect();
        MnlmModel {
            embedding, hidden, output, language_heads,
            vector_size: self.vector_size,
            alpha:       self.alpha,
            betta:       self.betta,
        }
    }

    /// Fail unless `saved` has the same tensor shapes as this config.
    /// alpha and betta are runtime settings and may differ.
    pub fn ensure_same_shape(&self, saved: &MnlmConfig) -> Result<()> {
        let fields = [
            ("vocab_size",    self.vocab_size,    saved.vocab_size),
            ("vector_size",   self.vector_size,   saved.vector_size),
            ("num_features",  self.num_features,  saved.num_features),
            ("num_languages", self.num_languages, saved.num_languages),
        ];
        let mismatches: Vec<String> = fields
            .iter()
            .filter(|(_, configured, stored)| configured != stored)
            .map(|(name, configured, stored)| format!("{name}: configured {configured}, saved {stored}"))
            .collect();
        ensure!(
            mismatches.is_empty(),
            "saved network does not match the configuration ({})",
            mismatches.join("; ")
        );
        Ok(())
    }
}

#[derive(Module, Debug)]
pub struct MnlmModel<B: Backend> {
    pub embedding:      Embedding<B>,
    pub hidden:         Linear<B>,
    pub output:         Linear<B>,
    pub language_heads: Vec<Linear<B>>,
    pub vector_size:    usize,
    pub alpha:          f64,
    pub betta:          f64,
}

impl<B: Backend> MnlmModel<B> {
    /// features: [batch, num_features], heads: [batch] (-1 = no head)
    /// → logits: [batch, vocab_size]
    pub fn forward(&self, features: Tensor<B, 2, Int>, heads: Tensor<B, 1, Int>) -> Tensor<B, 2> {
        let [batch_size, num_features] = features.dims();

        let embedded = self.embedding.forward(features); // [batch, num_features, vector]
        let flat     = embedded.reshape([batch_size, num_features * self.vector_size]);
        let hidden   = tanh(self.hidden.forward(flat));

        let mut logits = self.output.forward(hidden.clone());
        for (head_id, head) in self.language_heads.iter().enumerate() {
            // [batch, 1] mask selecting the rows routed to this head
            let mask = heads
                .clone()
                .equal_elem(head_id as i64)
                .float()
                .unsqueeze_dim::<2>(1);
            logits = logits + head.forward(hidden.clone()).mul(mask).mul_scalar(self.alpha);
        }
        logits
    }

    /// Mean cross-entropy of the batch, shape [1].
    pub fn forward_loss(
        &self,
        features: Tensor<B, 2, Int>,
        heads:    Tensor<B, 1, Int>,
        targets:  Tensor<B, 1, Int>,
    ) -> Tensor<B, 1> {
        let logits    = self.forward(features, heads);
        let smoothing = (self.betta > 0.0).then_some(self.betta as f32);
        CrossEntropyLossConfig::new()
            .with_smoothing(smoothing)
            .init(&logits.device())
            .forward(logits, targets)
    }

    /// Embedding matrix as one Vec per vocabulary index.
    pub fn embedding_vectors(&self) -> Result<Vec<Vec<f32>>> {
        let [_, dim] = self.embedding.weight.dims();
        ensure!(dim > 0, "embedding has zero width");
        let values: Vec<f32> = self
            .embedding
            .weight
            .val()
            .into_data()
            .convert::<f32>()
            .to_vec()
            .map_err(|e| anyhow!("Cannot read embedding weights: {:?}", e))?;
        Ok(values.chunks(dim).map(<[f32]>::to_vec).collect())
    }
}

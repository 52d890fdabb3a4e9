// In: src/pipeline/registry.rs

//! The explicit codec registry.
//!
//! A registry is built once at startup and handed to the pipeline; there is no
//! global table. Lookups are by `CodecId`, and the passthrough codec is always
//! present so a recorded fallback can be inverted by any registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::StrataConfig;
use crate::error::StrataError;
use crate::kernels::KernelOptions;
use crate::pipeline::models::CodecId;
use crate::pipeline::traits::{BuiltinCodec, TransformCodec};

#[derive(Clone)]
pub struct CodecRegistry {
    codecs: BTreeMap<CodecId, Arc<dyn TransformCodec>>,
}

impl CodecRegistry {
    /// A registry holding only the passthrough codec.
    pub fn empty() -> Self {
        let mut codecs: BTreeMap<CodecId, Arc<dyn TransformCodec>> = BTreeMap::new();
        codecs.insert(
            CodecId::Passthrough,
            Arc::new(BuiltinCodec::new(CodecId::Passthrough, KernelOptions::default())),
        );
        Self { codecs }
    }

    /// Every built-in transform with default kernel options.
    pub fn standard() -> Self {
        Self::with_options(KernelOptions::default())
    }

    pub fn from_config(config: &StrataConfig) -> Self {
        Self::with_options(KernelOptions {
            max_cycle_pattern_len: config.max_cycle_pattern_len,
        })
    }

    fn with_options(options: KernelOptions) -> Self {
        let mut registry = Self::empty();
        for id in CodecId::TRANSFORMS {
            registry.register(Arc::new(BuiltinCodec::new(id, options)));
        }
        registry
    }

    /// Adds or replaces the codec registered under `codec.id()`.
    pub fn register(&mut self, codec: Arc<dyn TransformCodec>) -> &mut Self {
        self.codecs.insert(codec.id(), codec);
        self
    }

    /// Removes a codec. The passthrough codec cannot be removed.
    pub fn unregister(&mut self, id: CodecId) -> &mut Self {
        if id != CodecId::Passthrough {
            self.codecs.remove(&id);
        }
        self
    }

    pub fn get(&self, id: CodecId) -> Result<&Arc<dyn TransformCodec>, StrataError> {
        self.codecs.get(&id).ok_or(StrataError::CodecUnavailable(id))
    }

    pub fn contains(&self, id: CodecId) -> bool {
        self.codecs.contains_key(&id)
    }

    /// Registered transforms in `CodecId` order, excluding passthrough.
    pub fn transforms(&self) -> Vec<CodecId> {
        self.codecs
            .keys()
            .copied()
            .filter(|&id| id != CodecId::Passthrough)
            .collect()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("codecs", &self.codecs.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_has_every_transform() {
        let registry = CodecRegistry::standard();
        assert_eq!(registry.transforms(), CodecId::TRANSFORMS.to_vec());
        assert!(registry.contains(CodecId::Passthrough));
        assert_eq!(registry.get(CodecId::Sort).unwrap().id(), CodecId::Sort);
    }

    #[test]
    fn test_unregistered_codec_is_unavailable() {
        let mut registry = CodecRegistry::standard();
        registry.unregister(CodecId::Bwt).unregister(CodecId::Passthrough);
        assert!(matches!(
            registry.get(CodecId::Bwt),
            Err(StrataError::CodecUnavailable(CodecId::Bwt))
        ));
        assert!(registry.get(CodecId::Passthrough).is_ok());
        assert!(CodecRegistry::empty().transforms().is_empty());
    }
}

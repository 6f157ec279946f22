//! # bottins-core — Anotações Inline para Sequências IOB
//!
//! Este crate transforma o corpus dos Bottins (anuários comerciais com entidades
//! marcadas por tags inline) em dados de treino para modelos de rotulação de
//! sequência.
//!
//! ## Arquitetura do Sistema
//!
//! Cada linha do corpus passa por um pipeline linear e sem estado compartilhado:
//!
//! 1.  **Entrada** ([`corpus`]): pares `(texto anotado, fonte)` lidos do CSV.
//! 2.  **Parser** ([`annotation`]): remove as tags e calcula os spans das entidades
//!     no texto limpo.
//! 3.  **Tokenização** ([`tokenizer`]): palavras e pontuação com offsets.
//! 4.  **Tagging** ([`tagger`]): uma tag IOB por token.
//! 5.  **Saída** ([`sink`]): um [`Record`] por linha JSONL.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use bottins_core::Converter;
//!
//! let converter = Converter::new();
//! let record = converter.convert_row("<PER>Jean Dupont</PER> à <LOC>Paris</LOC>.", "");
//!
//! assert_eq!(record.tokens, ["Jean", "Dupont", "à", "Paris", "."]);
//! assert_eq!(record.tags, ["B-PER", "I-PER", "O", "B-LOC", "O"]);
//! ```

pub mod annotation;
pub mod convert;
pub mod corpus;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod sink;
pub mod tagger;
pub mod tokenizer;
pub mod unescape;

pub use annotation::{parse_annotated_text, AnnotationParser};
pub use convert::{convert_file, ConversionSummary, ConvertOptions};
pub use error::{Error, Result};
pub use pipeline::{Conversion, Converter};
pub use record::{EntitySpan, Record};
pub use tagger::{tag_runs, tag_tokens, tokenize_and_tag, Tag, TagRun};
pub use tokenizer::{tokenize, Token, Tokenizer};
pub use unescape::HtmlDecoder;

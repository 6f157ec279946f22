//! # Pipeline de Conversão
//!
//! Orquestra, para cada linha, os três estágios:
//!
//! 1. **Parser** ([`crate::annotation`]): texto anotado → texto limpo + entidades.
//! 2. **Tokenizador** ([`crate::tokenizer`]): texto limpo → tokens com offsets.
//! 3. **Tagger** ([`crate::tagger`]): tokens + entidades → tags IOB.
//!
//! O [`Converter`] compila as duas expressões regulares uma única vez e depois só
//! é lido; cada linha é processada de forma independente.

use tracing::trace;

use crate::annotation::AnnotationParser;
use crate::record::{EntitySpan, Record};
use crate::tagger::{tag_runs, tag_tokens, Tag};
use crate::tokenizer::{Token, Tokenizer};

/// Resultado intermediário de uma linha, antes de virar [`Record`].
#[derive(Debug, Clone)]
pub struct Conversion {
    pub text: String,
    pub entities: Vec<EntitySpan>,
    pub tokens: Vec<Token>,
    pub tags: Vec<Tag>,
}

impl Conversion {
    /// Entidades não vazias que não receberam nenhum `B-`.
    ///
    /// Acontece quando um único token cobre duas entidades
    /// (`<LOC>Paris</LOC><LOC>France</LOC>` vira o token `ParisFrance`): a
    /// primeira fica com o token e a segunda some da sequência IOB.
    pub fn untagged_entities(&self) -> usize {
        let non_empty = self.entities.iter().filter(|e| !e.is_empty()).count();
        non_empty.saturating_sub(tag_runs(&self.tags).len())
    }

    /// Achata tokens e tags em strings e anexa a fonte.
    pub fn into_record(self, source: impl Into<String>) -> Record {
        Record {
            text: self.text,
            entities: self.entities,
            tokens: self.tokens.into_iter().map(|t| t.text).collect(),
            tags: self.tags.iter().map(Tag::label).collect(),
            source: source.into(),
        }
    }
}

/// Conversor de texto anotado em sequência IOB.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    parser: AnnotationParser,
    tokenizer: Tokenizer,
}

impl Converter {
    /// Cria o conversor compilando os padrões de tag e de token.
    pub fn new() -> Self {
        Self {
            parser: AnnotationParser::new(),
            tokenizer: Tokenizer::new(),
        }
    }

    /// Executa parser → tokenizador → tagger sobre um texto anotado.
    pub fn convert(&self, raw_text: &str) -> Conversion {
        let (text, entities) = self.parser.parse(raw_text);
        let tokens = self.tokenizer.tokenize(&text);
        let tags = tag_tokens(&tokens, &entities);
        trace!(
            "{} entidades, {} tokens em {} caracteres",
            entities.len(),
            tokens.len(),
            text.chars().count()
        );

        Conversion {
            text,
            entities,
            tokens,
            tags,
        }
    }

    /// Converte uma linha `(texto, fonte)` direto no registro de saída.
    pub fn convert_row(&self, raw_text: &str, source: &str) -> Record {
        self.convert(raw_text).into_record(source)
    }
}

//! # Registro de Saída (linha JSONL)
//!
//! Cada linha do CSV de entrada vira exatamente um [`Record`]. Os campos são
//! serializados na ordem `text`, `entities`, `tokens`, `tags`, `source`.
//!
//! As entidades são gravadas como triplas `[início, fim, rótulo]`, no mesmo
//! formato consumido pelos scripts de treino:
//!
//! ```json
//! {"text":"Jean Dupont à Paris.","entities":[[0,11,"PER"],[14,19,"LOC"]],"tokens":["Jean","Dupont","à","Paris","."],"tags":["B-PER","I-PER","O","B-LOC","O"],"source":""}
//! ```

use serde::{Deserialize, Serialize};

/// Uma entidade anotada no texto limpo.
///
/// Os offsets são em **caracteres** (não bytes) e formam um intervalo semiaberto
/// `[start, end)`. Uma tag vazia (`<ORG></ORG>`) produz `start == end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "(usize, usize, String)", from = "(usize, usize, String)")]
pub struct EntitySpan {
    /// Offset inicial (inclusivo).
    pub start: usize,
    /// Offset final (exclusivo).
    pub end: usize,
    /// Nome da tag, copiado literalmente (ex: "PER", "CARDINAL").
    pub label: String,
}

impl EntitySpan {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Quantidade de caracteres cobertos.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// `true` para entidades de largura zero, que nunca casam com um token.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Teste de sobreposição com intervalo aberto: `start < self.end && end > self.start`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end && end > self.start
    }
}

impl From<EntitySpan> for (usize, usize, String) {
    fn from(span: EntitySpan) -> Self {
        (span.start, span.end, span.label)
    }
}

impl From<(usize, usize, String)> for EntitySpan {
    fn from((start, end, label): (usize, usize, String)) -> Self {
        Self { start, end, label }
    }
}

/// Registro final, imutável após a construção.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Texto limpo (sem tags, entidades HTML decodificadas).
    pub text: String,
    /// Entidades ordenadas por `start`.
    pub entities: Vec<EntitySpan>,
    /// Texto de cada token, na ordem.
    pub tokens: Vec<String>,
    /// Uma tag IOB por token.
    pub tags: Vec<String>,
    /// Rótulo de origem vindo da segunda coluna do CSV (pode ser vazio).
    #[serde(default)]
    pub source: String,
}

impl Record {
    /// Serializa como uma linha JSON (sem o `\n` final).
    ///
    /// `serde_json` não escapa caracteres não-ASCII, então "à" sai literalmente.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_serializes_as_triple() {
        let span = EntitySpan::new(14, 19, "LOC");
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(json, r#"[14,19,"LOC"]"#);

        let back: EntitySpan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, span);
    }

    #[test]
    fn test_zero_width_span_overlaps_nothing() {
        let span = EntitySpan::new(0, 0, "ORG");
        assert!(span.is_empty());
        assert!(!span.overlaps(0, 1));
        assert!(!span.overlaps(0, 4));
    }

    #[test]
    fn test_overlap_is_open_interval() {
        let span = EntitySpan::new(5, 10, "PER");
        assert!(span.overlaps(4, 6));
        assert!(span.overlaps(9, 12));
        // Encostar na borda não é sobreposição
        assert!(!span.overlaps(0, 5));
        assert!(!span.overlaps(10, 12));
    }

    #[test]
    fn test_record_json_line_keeps_non_ascii() {
        let record = Record {
            text: "à Paris".to_string(),
            entities: vec![EntitySpan::new(2, 7, "LOC")],
            tokens: vec!["à".to_string(), "Paris".to_string()],
            tags: vec!["O".to_string(), "B-LOC".to_string()],
            source: String::new(),
        };
        let line = record.to_json_line().unwrap();
        assert_eq!(
            line,
            r#"{"text":"à Paris","entities":[[2,7,"LOC"]],"tokens":["à","Paris"],"tags":["O","B-LOC"],"source":""}"#
        );
        assert!(!line.contains('\n'));
    }
}

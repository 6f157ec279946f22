//! # Esquema de Tags IOB
//!
//! Atribui uma tag a cada token cruzando os intervalos dos tokens com os
//! intervalos das entidades.
//!
//! ## Esquema IOB
//!
//! - `B-TAG`: Begin — primeiro token que toca uma entidade
//! - `I-TAG`: Inside — tokens seguintes da **mesma** entidade
//! - `O`: Outside — não toca nenhuma entidade
//!
//! O rótulo vem direto do nome da tag no texto anotado (`PER`, `LOC`, `CARDINAL`...);
//! não existe lista fechada de categorias.
//!
//! ## Regra de Atribuição
//!
//! Para cada token procura-se a **primeira** entidade (na ordem recebida) com
//! `tok_start < ent_end && tok_end > ent_start`. O tagger lembra o *índice* da
//! entidade do token anterior: se for o mesmo, a tag é `I-`, senão `B-`. Por isso
//! duas entidades vizinhas com o mesmo rótulo (`<LOC>Paris</LOC><LOC>France</LOC>`)
//! começam cada uma com seu próprio `B-LOC`.

use serde::{Deserialize, Serialize};

use crate::record::EntitySpan;
use crate::tokenizer::{Token, Tokenizer};

/// Tag IOB aplicada a um token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Tag {
    /// **Begin**: início de uma entidade. Ex: **Jean** (B-PER) Dupont.
    Begin(String),
    /// **Inside**: continuação da mesma entidade. Ex: Jean **Dupont** (I-PER).
    Inside(String),
    /// **Outside**: fora de qualquer entidade.
    Outside,
}

impl Tag {
    /// Representação textual da tag (ex: "B-PER", "I-LOC", "O")
    pub fn label(&self) -> String {
        match self {
            Tag::Begin(label) => format!("B-{}", label),
            Tag::Inside(label) => format!("I-{}", label),
            Tag::Outside => "O".to_string(),
        }
    }

    /// Rótulo da entidade (se for B- ou I-)
    pub fn entity_label(&self) -> Option<&str> {
        match self {
            Tag::Begin(label) | Tag::Inside(label) => Some(label),
            Tag::Outside => None,
        }
    }

    /// Verifica se a transição prev → next é válida no esquema IOB
    ///
    /// Regras:
    /// - `I-X` só pode seguir `B-X` ou `I-X` (mesmo rótulo)
    /// - `B-X` e `O` podem seguir qualquer tag
    pub fn is_valid_transition(prev: &Tag, next: &Tag) -> bool {
        match next {
            Tag::Inside(label) => match prev {
                Tag::Begin(prev_label) | Tag::Inside(prev_label) => prev_label == label,
                Tag::Outside => false,
            },
            _ => true,
        }
    }

    /// Parseia uma tag a partir de string (ex: "B-PER" → Begin("PER"))
    pub fn from_label(s: &str) -> Option<Self> {
        if s == "O" {
            return Some(Tag::Outside);
        }
        let (prefix, label) = s.split_once('-')?;
        if label.is_empty() {
            return None;
        }
        match prefix {
            "B" => Some(Tag::Begin(label.to_string())),
            "I" => Some(Tag::Inside(label.to_string())),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.label()
    }
}

impl TryFrom<String> for Tag {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Tag::from_label(&s).ok_or_else(|| format!("tag IOB inválida: {:?}", s))
    }
}

/// Atribui uma tag IOB a cada token.
///
/// `entities` deve estar na ordem de `start` (como sai do parser). Entidades de
/// largura zero nunca sobrepõem um token e portanto são ignoradas naturalmente.
pub fn tag_tokens(tokens: &[Token], entities: &[EntitySpan]) -> Vec<Tag> {
    let mut tags = Vec::with_capacity(tokens.len());
    let mut active_entity: Option<usize> = None;

    for token in tokens {
        let hit = entities
            .iter()
            .enumerate()
            .find(|(_, e)| e.overlaps(token.start, token.end));

        match hit {
            None => {
                tags.push(Tag::Outside);
                active_entity = None;
            }
            Some((idx, entity)) => {
                let label = entity.label.clone();
                if active_entity == Some(idx) {
                    tags.push(Tag::Inside(label));
                } else {
                    tags.push(Tag::Begin(label));
                }
                active_entity = Some(idx);
            }
        }
    }

    debug_assert!(
        tags.windows(2).all(|w| Tag::is_valid_transition(&w[0], &w[1])),
        "sequência IOB inválida: {:?}",
        tags
    );
    tags
}

/// Tokeniza e etiqueta em um passo (compatibilidade).
///
/// Garante `tokens.len() == tags.len()`.
pub fn tokenize_and_tag(text: &str, entities: &[EntitySpan]) -> (Vec<Token>, Vec<Tag>) {
    let tokens = Tokenizer::new().tokenize(text);
    let tags = tag_tokens(&tokens, entities);
    (tokens, tags)
}

/// Trecho contíguo de tokens pertencentes a uma mesma entidade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRun {
    /// Rótulo da entidade (ex: "PER")
    pub label: String,
    /// Índice do primeiro token (inclusivo)
    pub start_token: usize,
    /// Índice do último token (exclusivo)
    pub end_token: usize,
}

/// Reagrupa uma sequência IOB em trechos de tokens.
///
/// Máquina de estados do esquema IOB:
/// - `B-X` sempre abre um trecho novo (fechando o anterior).
/// - `I-X` continua o trecho aberto se o rótulo for o mesmo; caso contrário
///   (I sem B, ou rótulo diferente) é tratado como um novo início.
/// - `O` fecha o trecho aberto.
///
/// # Exemplo
/// `[B-LOC, B-LOC, I-LOC, O]` → `[LOC 0..1, LOC 1..3]`
pub fn tag_runs(tags: &[Tag]) -> Vec<TagRun> {
    let mut runs = Vec::new();
    let mut current: Option<TagRun> = None;

    for (i, tag) in tags.iter().enumerate() {
        match tag {
            Tag::Inside(label)
                if current.as_ref().is_some_and(|run| &run.label == label) =>
            {
                if let Some(run) = current.as_mut() {
                    run.end_token = i + 1;
                }
            }
            Tag::Begin(label) | Tag::Inside(label) => {
                runs.extend(current.take());
                current = Some(TagRun {
                    label: label.clone(),
                    start_token: i,
                    end_token: i + 1,
                });
            }
            Tag::Outside => runs.extend(current.take()),
        }
    }

    // Fecha último trecho se aberto
    runs.extend(current);
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(tags: &[Tag]) -> Vec<String> {
        tags.iter().map(Tag::label).collect()
    }

    #[test]
    fn test_tag_labels() {
        assert_eq!(Tag::Outside.label(), "O");
        assert_eq!(Tag::Begin("PER".into()).label(), "B-PER");
        assert_eq!(Tag::Inside("CARDINAL".into()).to_string(), "I-CARDINAL");
    }

    #[test]
    fn test_tag_from_label() {
        assert_eq!(Tag::from_label("O"), Some(Tag::Outside));
        assert_eq!(Tag::from_label("B-PER"), Some(Tag::Begin("PER".into())));
        assert_eq!(Tag::from_label("I-LOC"), Some(Tag::Inside("LOC".into())));
        assert_eq!(Tag::from_label("X-LOC"), None);
        assert_eq!(Tag::from_label("B-"), None);
        assert_eq!(Tag::from_label("LOC"), None);
    }

    #[test]
    fn test_tag_serde_as_string() {
        let json = serde_json::to_string(&vec![Tag::Begin("LOC".into()), Tag::Outside]).unwrap();
        assert_eq!(json, r#"["B-LOC","O"]"#);
        let back: Vec<Tag> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Tag::Begin("LOC".into()), Tag::Outside]);
        assert!(serde_json::from_str::<Tag>(r#""Z-LOC""#).is_err());
    }

    #[test]
    fn test_valid_transitions() {
        let b_per = Tag::Begin("PER".into());
        let i_per = Tag::Inside("PER".into());
        let i_loc = Tag::Inside("LOC".into());
        assert!(Tag::is_valid_transition(&b_per, &i_per));
        assert!(Tag::is_valid_transition(&i_per, &i_per));
        assert!(!Tag::is_valid_transition(&Tag::Outside, &i_per));
        assert!(!Tag::is_valid_transition(&b_per, &i_loc));
        assert!(Tag::is_valid_transition(&Tag::Outside, &b_per));
    }

    #[test]
    fn test_tokenize_and_tag_basic() {
        let entities = vec![EntitySpan::new(0, 11, "PER"), EntitySpan::new(14, 19, "LOC")];
        let (tokens, tags) = tokenize_and_tag("Jean Dupont à Paris.", &entities);
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Jean", "Dupont", "à", "Paris", "."]);
        assert_eq!(labels(&tags), vec!["B-PER", "I-PER", "O", "B-LOC", "O"]);
    }

    #[test]
    fn test_adjacent_same_label_entities_both_begin() {
        let entities = vec![EntitySpan::new(0, 5, "LOC"), EntitySpan::new(5, 11, "LOC")];
        let (tokens, tags) = tokenize_and_tag("ParisFrance", &entities);
        // Uma única palavra cobre as duas entidades: casa com a primeira
        assert_eq!(tokens.len(), 1);
        assert_eq!(labels(&tags), vec!["B-LOC"]);

        let entities = vec![EntitySpan::new(0, 5, "LOC"), EntitySpan::new(6, 12, "LOC")];
        let (_, tags) = tokenize_and_tag("Paris France", &entities);
        assert_eq!(labels(&tags), vec!["B-LOC", "B-LOC"]);
    }

    #[test]
    fn test_zero_width_entity_matches_nothing() {
        let entities = vec![EntitySpan::new(0, 0, "ORG")];
        let (tokens, tags) = tokenize_and_tag(" text", &entities);
        assert_eq!(tokens.len(), 1);
        assert_eq!(labels(&tags), vec!["O"]);
    }

    #[test]
    fn test_partial_overlap_tags_token() {
        // A entidade cobre só parte de "Dupontel": o token inteiro recebe a tag
        let entities = vec![EntitySpan::new(0, 6, "PER")];
        let (_, tags) = tokenize_and_tag("Dupontel vient", &entities);
        assert_eq!(labels(&tags), vec!["B-PER", "O"]);
    }

    #[test]
    fn test_outside_resets_tracker() {
        let entities = vec![EntitySpan::new(0, 4, "PER")];
        let tokens = vec![
            Token { text: "Jean".into(), start: 0, end: 4, index: 0 },
            Token { text: ",".into(), start: 4, end: 5, index: 1 },
            Token { text: "Jean".into(), start: 0, end: 4, index: 2 },
        ];
        let tags = tag_tokens(&tokens, &entities);
        assert_eq!(labels(&tags), vec!["B-PER", "O", "B-PER"]);
    }

    #[test]
    fn test_tag_runs() {
        let tags: Vec<Tag> = ["O", "B-PER", "I-PER", "O", "B-LOC", "B-LOC", "I-LOC"]
            .iter()
            .filter_map(|s| Tag::from_label(s))
            .collect();
        let runs = tag_runs(&tags);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], TagRun { label: "PER".into(), start_token: 1, end_token: 3 });
        assert_eq!(runs[1], TagRun { label: "LOC".into(), start_token: 4, end_token: 5 });
        assert_eq!(runs[2], TagRun { label: "LOC".into(), start_token: 5, end_token: 7 });
    }

    #[test]
    fn test_tag_runs_dangling_inside_starts_run() {
        let tags = vec![
            Tag::Inside("ORG".into()),
            Tag::Inside("PER".into()),
            Tag::Inside("PER".into()),
        ];
        let runs = tag_runs(&tags);
        assert_eq!(runs.len(), 2);
        assert_eq!((runs[0].start_token, runs[0].end_token), (0, 1));
        assert_eq!((runs[1].start_token, runs[1].end_token), (1, 3));
    }
}

//! # Tokenizador Palavra/Pontuação
//!
//! Divide o texto limpo em tokens preservando a posição original de cada um,
//! para que o tagger possa cruzar tokens com entidades.
//!
//! ## Esquema de Tokenização
//!
//! - Sequência máxima de caracteres de palavra (letras e números Unicode, `_`).
//! - Ou um único caractere que não é palavra nem espaço (pontuação, símbolos).
//! - Espaços só separam; nunca viram token.
//!
//! Os offsets são contados em **caracteres**, o mesmo sistema de coordenadas das
//! entidades produzidas pelo [`crate::annotation`].
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use bottins_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("Rue d'Anjou, 5.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["Rue", "d", "'", "Anjou", ",", "5", "."]);
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Palavra (letras, números e `_`) ou um símbolo isolado.
///
/// Marcas combinantes (`\p{M}`) e conectores como `‿` não contam como palavra:
/// cada um vira um token próprio. Os separadores de informação U+001C–U+001F
/// contam como espaço.
const TOKEN_PATTERN: &str = r"[\p{L}\p{N}_]+|[^\p{L}\p{N}_\s\x1C-\x1F]";

/// Um token extraído do texto limpo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// O texto do token (ex: "Dupont", ",", "à").
    pub text: String,
    /// Índice de caractere inicial no texto limpo (inclusivo).
    pub start: usize,
    /// Índice de caractere final no texto limpo (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Tokenizador com o padrão já compilado.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(TOKEN_PATTERN).expect("TOKEN_PATTERN é uma regex válida"),
        }
    }

    /// Tokeniza o texto, da esquerda para a direita.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        // A regex devolve bytes; convertemos para caracteres incrementalmente
        let mut last_byte = 0;
        let mut last_char = 0;

        for (index, m) in self.pattern.find_iter(text).enumerate() {
            let start = last_char + text[last_byte..m.start()].chars().count();
            let end = start + m.as_str().chars().count();
            tokens.push(Token {
                text: m.as_str().to_string(),
                start,
                end,
                index,
            });
            last_byte = m.end();
            last_char = end;
        }

        tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokeniza com um tokenizador descartável (compatibilidade).
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new().tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Jean Dupont à Paris.");
        assert_eq!(texts(&tokens), vec!["Jean", "Dupont", "à", "Paris", "."]);
        assert_eq!((tokens[2].start, tokens[2].end), (12, 13));
        assert_eq!((tokens[3].start, tokens[3].end), (14, 19));
        assert_eq!((tokens[4].start, tokens[4].end), (19, 20));
    }

    #[test]
    fn test_punctuation_is_one_token_per_char() {
        let tokens = tokenize("...!?");
        assert_eq!(texts(&tokens), vec![".", ".", ".", "!", "?"]);
    }

    #[test]
    fn test_digits_and_underscore_are_word_chars() {
        let tokens = tokenize("n_42 12,5");
        assert_eq!(texts(&tokens), vec!["n_42", "12", ",", "5"]);
    }

    #[test]
    fn test_combining_marks_are_not_word_chars() {
        // Texto decomposto (NFD): o acento é um símbolo separado
        let tokens = tokenize("e\u{301}t\u{301} a\u{203F}b");
        assert_eq!(
            texts(&tokens),
            vec!["e", "\u{301}", "t", "\u{301}", "a", "\u{203F}", "b"]
        );
        assert_eq!((tokens[1].start, tokens[1].end), (1, 2));
    }

    #[test]
    fn test_precomposed_accents_and_numbers() {
        let tokens = tokenize("Évry ½ Ⅻ");
        assert_eq!(texts(&tokens), vec!["Évry", "½", "Ⅻ"]);
    }

    #[test]
    fn test_information_separators_are_whitespace() {
        let tokens = tokenize("a\u{1F}b\u{1C}");
        assert_eq!(texts(&tokens), vec!["a", "b"]);
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize("  \n\t ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_indices_are_sequential() {
        let tokens = tokenize("a, b; c");
        let indices: Vec<usize> = tokens.iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_round_trip_with_whitespace() {
        let text = "  Crédit  Lyonnais,\n12 rue d'Hauteville ";
        let chars: Vec<char> = text.chars().collect();
        let tokens = tokenize(text);

        let mut rebuilt = String::new();
        let mut cursor = 0;
        for token in &tokens {
            let gap: String = chars[cursor..token.start].iter().collect();
            assert!(gap.chars().all(char::is_whitespace));
            rebuilt.push_str(&gap);
            let piece: String = chars[token.start..token.end].iter().collect();
            assert_eq!(piece, token.text);
            rebuilt.push_str(&piece);
            cursor = token.end;
        }
        rebuilt.extend(&chars[cursor..]);
        assert_eq!(rebuilt, text);
    }
}

//! # Parser de Anotações Inline
//!
//! Remove as tags `<LABEL>conteúdo</LABEL>` do texto bruto e registra onde cada
//! entidade foi parar no texto limpo.
//!
//! ## Algoritmo
//!
//! 1. Procura, da esquerda para a direita, regiões `<LABEL>...</LABEL>` sem
//!    sobreposição. O conteúdo vai até a **primeira** tag de fechamento com o
//!    **mesmo** rótulo; se ela não existe, a abertura fica como texto e a busca
//!    continua logo depois do `<`.
//! 2. Para cada região: decodifica e acumula o trecho anterior, anota
//!    `start`, decodifica e acumula o conteúdo, anota `end`.
//! 3. Decodifica e acumula o que sobrar depois da última região.
//!
//! A decodificação HTML (`&apos;` → `'`) acontece **antes** de medir cada trecho,
//! porque as referências mudam o comprimento do texto.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use bottins_core::annotation::AnnotationParser;
//!
//! let parser = AnnotationParser::new();
//! let (text, entities) = parser.parse("Rue d&apos;Anjou <CARDINAL>5</CARDINAL>");
//!
//! assert_eq!(text, "Rue d'Anjou 5");
//! assert_eq!((entities[0].start, entities[0].end), (12, 13));
//! ```

use std::collections::HashMap;

use regex::Regex;

use crate::record::EntitySpan;
use crate::unescape::HtmlDecoder;

/// Tag de abertura; o fechamento `</LABEL>` é procurado à parte.
const OPEN_TAG_PATTERN: &str = r"<([A-Z]+)>";

/// Parser de texto anotado.
///
/// Guarda as expressões regulares já compiladas; pode ser compartilhado entre
/// threads sem sincronização porque `parse` só usa `&self`.
#[derive(Debug, Clone)]
pub struct AnnotationParser {
    open_tag: Regex,
    decoder: HtmlDecoder,
}

impl AnnotationParser {
    pub fn new() -> Self {
        Self {
            open_tag: Regex::new(OPEN_TAG_PATTERN).expect("OPEN_TAG_PATTERN é uma regex válida"),
            decoder: HtmlDecoder::new(),
        }
    }

    /// Separa o texto limpo das entidades.
    ///
    /// Nunca falha: tags sem par (ou com rótulos diferentes) ficam no texto como
    /// caracteres comuns e não geram entidade.
    pub fn parse(&self, raw_text: &str) -> (String, Vec<EntitySpan>) {
        let mut plain = String::with_capacity(raw_text.len());
        let mut entities = Vec::new();
        let mut cursor = 0;
        let mut search_from = 0;
        // Comprimento do texto limpo em caracteres
        let mut length = 0;
        let mut closings = ClosingTags::default();

        while let Some(caps) = self.open_tag.captures_at(raw_text, search_from) {
            let (Some(open), Some(label)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let label = label.as_str();

            let Some(close_start) = closings.find(raw_text, label, open.end()) else {
                // Sem fechamento: a busca recomeça logo depois do '<'
                search_from = open.start() + 1;
                continue;
            };
            let close_end = close_start + label.len() + 3;

            length += self.push_decoded(&mut plain, &raw_text[cursor..open.start()]);

            let start = length;
            length += self.push_decoded(&mut plain, &raw_text[open.end()..close_start]);
            entities.push(EntitySpan::new(start, length, label));

            cursor = close_end;
            search_from = close_end;
        }

        self.push_decoded(&mut plain, &raw_text[cursor..]);

        // Já vem em ordem; a ordenação estável só normaliza
        entities.sort_by_key(|e| e.start);
        (plain, entities)
    }

    /// Decodifica o trecho, anexa ao buffer e retorna quantos caracteres entraram.
    fn push_decoded(&self, buffer: &mut String, segment: &str) -> usize {
        if segment.is_empty() {
            return 0;
        }
        let decoded = self.decoder.decode(segment);
        buffer.push_str(&decoded);
        decoded.chars().count()
    }
}

impl Default for AnnotationParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Atalho que compila um parser descartável (compatibilidade).
///
/// Para processar muitas linhas prefira reutilizar um [`AnnotationParser`].
pub fn parse_annotated_text(raw_text: &str) -> (String, Vec<EntitySpan>) {
    AnnotationParser::new().parse(raw_text)
}

/// Memória da próxima `</LABEL>` por rótulo, válida para uma única linha.
///
/// As buscas só andam para a frente, então uma posição já encontrada continua
/// sendo a primeira enquanto não ficar para trás, e "não existe" continua valendo
/// para qualquer ponto adiante. Cada rótulo percorre o texto no máximo uma vez
/// entre dois fechamentos.
#[derive(Default)]
struct ClosingTags<'a> {
    next: HashMap<&'a str, Option<usize>>,
}

impl<'a> ClosingTags<'a> {
    fn find(&mut self, text: &str, label: &'a str, from: usize) -> Option<usize> {
        match self.next.get(label) {
            Some(None) => return None,
            Some(Some(pos)) if *pos >= from => return Some(*pos),
            _ => {}
        }
        let closing = format!("</{}>", label);
        let found = text[from..].find(&closing).map(|offset| from + offset);
        self.next.insert(label, found);
        found
    }
}

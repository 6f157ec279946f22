//! # Decodificação de Referências HTML
//!
//! O corpus foi exportado com referências HTML (`&apos;`, `&amp;`, `&#233;`) e às
//! vezes com as formas "legadas" que os navegadores aceitam. As regras seguidas
//! são as do HTML5:
//!
//! - Referência nomeada com `;` → tabela completa do HTML5 (via `html_escape`).
//! - Nomes legados sem `;` (`&copy 2020`, `&amp`) também são decodificados, e o
//!   maior prefixo legado conhecido vence (`&copy2020` → `©2020`).
//! - Numéricas na faixa 0x80–0x9F são lidas como Windows-1252 (`&#128;` → `€`).
//! - `&#0;`, surrogates e valores acima de U+10FFFF viram U+FFFD; os demais
//!   códigos proibidos (controles, não-caracteres) são removidos.
//! - Qualquer outra coisa fica como está.

use std::borrow::Cow;

use regex::{Captures, Regex};

/// Referência candidata: numérica decimal, hexadecimal ou nomeada (até 32 chars).
const CHARREF_PATTERN: &str = r"&(#[0-9]+;?|#[xX][0-9a-fA-F]+;?|[^\t\n\x0C <&#;]{1,32};?)";

/// Nomes que o HTML5 aceita sem `;` final.
const LEGACY_NAMES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig",
    "agrave", "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy",
    "curren", "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14",
    "frac34", "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt",
    "macr", "micro", "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf",
    "ordm", "oslash", "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg",
    "sect", "shy", "sup1", "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc",
    "ugrave", "uml", "uuml", "yacute", "yen", "yuml",
];

/// Decodificador com o padrão de referências já compilado.
#[derive(Debug, Clone)]
pub struct HtmlDecoder {
    pattern: Regex,
}

impl HtmlDecoder {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(CHARREF_PATTERN).expect("CHARREF_PATTERN é uma regex válida"),
        }
    }

    /// Decodifica todas as referências do trecho.
    pub fn decode<'a>(&self, segment: &'a str) -> Cow<'a, str> {
        if !segment.contains('&') {
            return Cow::Borrowed(segment);
        }
        self.pattern
            .replace_all(segment, |caps: &Captures| replace_charref(&caps[1]))
    }
}

impl Default for HtmlDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve uma referência (sem o `&` inicial).
fn replace_charref(s: &str) -> String {
    if let Some(digits) = s.strip_prefix('#') {
        let digits = digits.trim_end_matches(';');
        let code = match digits.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => digits.parse::<u32>(),
        };
        // Estouro de u32 também está acima de U+10FFFF
        return numeric_charref(code.unwrap_or(u32::MAX));
    }

    if s.ends_with(';') {
        if let Some(decoded) = named_charref(s) {
            return decoded;
        }
    } else if let Some(decoded) = legacy_charref(s) {
        return decoded;
    }

    // Maior prefixo legado, o resto fica literal
    for end in (2..s.len()).rev() {
        if !s.is_char_boundary(end) {
            continue;
        }
        if let Some(decoded) = legacy_charref(&s[..end]) {
            return decoded + &s[end..];
        }
    }
    format!("&{}", s)
}

/// `name;` na tabela completa do HTML5.
fn named_charref(name_with_semicolon: &str) -> Option<String> {
    let reference = format!("&{}", name_with_semicolon);
    match html_escape::decode_html_entities(&reference) {
        Cow::Owned(decoded) if decoded != reference => Some(decoded),
        _ => None,
    }
}

/// Nome legado aceito sem `;`.
fn legacy_charref(name: &str) -> Option<String> {
    if LEGACY_NAMES.contains(&name) {
        named_charref(&format!("{};", name))
    } else {
        None
    }
}

fn numeric_charref(code: u32) -> String {
    if let Some(c) = windows_1252(code) {
        return c.to_string();
    }
    if (0xD800..=0xDFFF).contains(&code) || code > 0x10FFFF {
        return '\u{FFFD}'.to_string();
    }
    if is_forbidden_codepoint(code) {
        return String::new();
    }
    char::from_u32(code).map(String::from).unwrap_or_default()
}

/// Remapeamento de referências inválidas (0x00, CR e a faixa C1 lida como cp1252).
fn windows_1252(code: u32) -> Option<char> {
    let c = match code {
        0x00 => '\u{FFFD}',
        0x0D => '\r',
        0x80 => '\u{20AC}',
        0x81 => '\u{81}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8D => '\u{8D}',
        0x8E => '\u{017D}',
        0x8F => '\u{8F}',
        0x90 => '\u{90}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9D => '\u{9D}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => return None,
    };
    Some(c)
}

/// Controles e não-caracteres que o HTML5 descarta.
fn is_forbidden_codepoint(code: u32) -> bool {
    matches!(code, 0x01..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F..=0x9F | 0xFDD0..=0xFDEF)
        || code & 0xFFFE == 0xFFFE
}

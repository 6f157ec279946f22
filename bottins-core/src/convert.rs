//! # Conversão de Arquivo
//!
//! Liga as pontas: [`RowReader`] → [`Converter`] → [`JsonlSink`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::corpus::RowReader;
use crate::error::Result;
use crate::pipeline::Converter;
use crate::sink::JsonlSink;

/// Opções da conversão.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Número máximo de linhas a processar (útil para testes rápidos).
    pub limit: Option<usize>,
}

/// Resumo devolvido ao final da conversão.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Linhas lidas e escritas.
    pub rows: usize,
    /// Total de entidades encontradas.
    pub entities: usize,
    /// Total de tokens produzidos.
    pub tokens: usize,
    /// Entidades que nenhum token representa (ver [`crate::Conversion::untagged_entities`]).
    pub untagged_entities: usize,
}

impl std::fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processed {} rows from {} -> {}",
            self.rows,
            self.input.display(),
            self.output.display()
        )
    }
}

/// Converte o CSV anotado em JSONL com tags IOB.
///
/// Cada linha é gravada assim que convertida; se algo falhar no meio, o arquivo
/// contém apenas registros completos das linhas anteriores.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConversionSummary> {
    let input = input.as_ref();
    let output = output.as_ref();
    debug!("Convertendo {} -> {} ({:?})", input.display(), output.display(), options);

    let converter = Converter::new();
    let rows = RowReader::from_path(input, options.limit)?;
    let mut sink = JsonlSink::create(output)?;
    let mut entities = 0;
    let mut tokens = 0;
    let mut untagged_entities = 0;

    for row in rows {
        let row = row?;
        let conversion = converter.convert(&row.text);
        let line = sink.written() + 1;
        if conversion.tokens.is_empty() {
            warn!("Linha {} sem tokens", line);
        }
        let lost = conversion.untagged_entities();
        if lost > 0 {
            warn!("Linha {}: {} entidade(s) sem token próprio", line, lost);
            untagged_entities += lost;
        }

        let record = conversion.into_record(row.source);
        entities += record.entities.len();
        tokens += record.tokens.len();
        sink.write(&record)?;
    }

    let rows = sink.written();
    sink.finish()?;

    let summary = ConversionSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        rows,
        entities,
        tokens,
        untagged_entities,
    };
    info!(
        "{} linhas, {} entidades, {} tokens",
        summary.rows, summary.entities, summary.tokens
    );
    Ok(summary)
}

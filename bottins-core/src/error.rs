//! Tipos de erro do `bottins-core`.
//!
//! O parser e o tagger nunca falham: marcação malformada vira texto comum.
//! Os erros abaixo vêm apenas da "encanação" (leitura do CSV, escrita do JSONL).

use thiserror::Error;

/// Resultado padrão das operações de I/O do crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Erros de entrada/saída da conversão.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Falha de leitura/escrita no sistema de arquivos.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV ilegível (UTF-8 inválido, aspas desbalanceadas...).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Falha ao serializar um registro.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}


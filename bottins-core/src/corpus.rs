//! # Leitura do Corpus (CSV)
//!
//! O corpus dos Bottins é um CSV sem cabeçalho:
//!
//! | Coluna | Conteúdo                                         |
//! |--------|--------------------------------------------------|
//! | 0      | Texto com anotações inline (`<PER>...</PER>`)    |
//! | 1      | Rótulo de origem (opcional, vazio se ausente)    |
//!
//! Colunas extras são ignoradas e linhas em branco são puladas.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Uma linha do corpus: texto anotado e sua origem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub text: String,
    pub source: String,
}

/// Iterador sobre as linhas do CSV, com limite opcional.
///
/// O limite é verificado **depois** de entregar cada linha, então `Some(0)`
/// ainda entrega a primeira linha.
///
/// O limite conta linhas **entregues**. O leitor do `csv` descarta linhas em
/// branco antes de chegarem aqui, então elas não consomem o limite: com
/// `Some(2)`, a entrada `"\na\nb"` entrega `a` e `b` (não é uma contagem de
/// linhas físicas do arquivo).
pub struct RowReader<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    limit: Option<usize>,
    yielded: usize,
    done: bool,
}

impl RowReader<File> {
    /// Abre um arquivo CSV.
    pub fn from_path(path: impl AsRef<Path>, limit: Option<usize>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file, limit))
    }
}

impl<R: Read> RowReader<R> {
    /// Lê de qualquer fonte (`&[u8]` nos testes).
    pub fn from_reader(reader: R, limit: Option<usize>) -> Self {
        let records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();
        Self {
            records,
            limit,
            yielded: 0,
            done: false,
        }
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            };
            if record.is_empty() {
                continue;
            }

            let row = Row {
                text: record.get(0).unwrap_or_default().to_string(),
                source: record.get(1).unwrap_or_default().to_string(),
            };

            self.yielded += 1;
            if self.limit.is_some_and(|limit| self.yielded >= limit) {
                self.done = true;
            }
            return Some(Ok(row));
        }
    }
}

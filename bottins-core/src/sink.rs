//! # Escrita JSONL
//!
//! Um [`Record`] por linha, UTF-8, sem escapar acentos.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::record::Record;

/// Destino de registros JSONL.
pub struct JsonlSink<W: Write> {
    writer: W,
    written: usize,
}

impl JsonlSink<BufWriter<File>> {
    /// Cria (ou trunca) o arquivo, criando o diretório pai se preciso.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Escreve um registro.
    ///
    /// A linha inteira é serializada antes de tocar o destino, então um erro de
    /// serialização nunca deixa meia linha no arquivo.
    pub fn write(&mut self, record: &Record) -> Result<()> {
        let mut line = record.to_json_line()?;
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Quantidade de registros escritos até agora.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Descarrega o buffer e devolve o escritor.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

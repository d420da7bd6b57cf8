//! session — постраничная выдача записей одного контейнера.
//!
//! ScenarioSession хранится слоем обработки запросов на одного клиента: владеет
//! своим Container (никакого глобального ридера), лениво строит индекс offset'ов
//! при первом обращении и отдаёт записи по одной.
//!
//! Семантика:
//! - total()     — число записей (длина индекса); индекс кэшируется в сессии.
//! - next_page() — Ok(Some(page)), у последней записи `done = true`;
//!                 Ok(None), когда все записи выданы;
//!                 Err(..) при ошибке чтения. Ошибка никогда не даёт `done`.
//! - seek(k)     — следующий next_page() отдаст запись k (k == total() допустим).
//! - reset()     — назад к записи 0; индекс сохраняется.

use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::config::ReaderConfig;
use crate::container::{copy_payload, Container};
use crate::error::{RecordError, Result};

/// One served record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Position of the record in file order.
    pub index: usize,
    pub offset: u64,
    pub payload: Vec<u8>,
    /// True when this is the last record of the container.
    pub done: bool,
}

pub struct ScenarioSession {
    container: Container,
    offsets: Option<Vec<u64>>,
    next: usize,
}

impl ScenarioSession {
    pub fn open<P: AsRef<Path>>(path: P, cfg: ReaderConfig) -> Result<Self> {
        Ok(Self::from_container(Container::open_path(path, cfg)?))
    }

    pub fn from_container(container: Container) -> Self {
        Self {
            container,
            offsets: None,
            next: 0,
        }
    }

    pub fn container(&mut self) -> &mut Container {
        &mut self.container
    }

    /// Index of the record the next call to next_page() will serve.
    pub fn position(&self) -> usize {
        self.next
    }

    pub fn total(&mut self) -> Result<usize> {
        Ok(self.offsets()?.len())
    }

    pub fn next_page(&mut self) -> Result<Option<Page>> {
        let next = self.next;
        let (offset, total) = {
            let offsets = self.offsets()?;
            match offsets.get(next) {
                Some(&off) => (off, offsets.len()),
                None => return Ok(None),
            }
        };

        let rec = self.container.record_at(offset, copy_payload)?;
        self.next = next + 1;
        Ok(Some(Page {
            index: next,
            offset: rec.offset,
            payload: rec.value,
            done: self.next == total,
        }))
    }

    pub fn seek(&mut self, k: usize) -> Result<()> {
        let total = self.total()?;
        if k > total {
            return Err(RecordError::InvalidState(format!(
                "cannot seek to record {} of {}",
                k, total
            )));
        }
        self.next = k;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }

    fn offsets(&mut self) -> Result<&[u64]> {
        if self.offsets.is_none() {
            let offsets = self.container.index()?;
            debug!(
                "session index for {}: {} records",
                self.container.path().display(),
                offsets.len()
            );
            self.offsets = Some(offsets);
        }
        Ok(self.offsets.as_deref().unwrap_or(&[]))
    }
}

// Базовые модули
pub mod consts;
pub mod error;
pub mod config;
pub mod metrics;

// Формат и чтение
pub mod checksum; // masked CRC32C
pub mod source;   // WindowedSource — единственная точка файлового I/O
pub mod frame;    // src/frame/{mod,header,cursor}.rs
pub mod container;

// Пейджинг поверх контейнера (одна сессия — один Container)
pub mod session;

// Удобные реэкспорты
pub use config::{ChecksumPolicy, ReaderConfig};
pub use container::{copy_payload, Container, RawStream, VerifyReport};
pub use error::{ChecksumField, RecordError, Result};
pub use frame::{FrameHeader, FrameOffsets, Record, RecordStream};
pub use session::{Page, ScenarioSession};
pub use source::WindowedSource;

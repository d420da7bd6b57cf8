// tests/window_reads.rs
//
// WindowedSource против наивного «всегда перечитать из файла» на файле с известным узором.

mod common;

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::Result;

use common::{patterned, write_bytes};
use scenario_records::{RecordError, WindowedSource};

fn naive_read(path: &Path, offset: u64, size: usize) -> Result<Vec<u8>> {
    let mut f = File::open(path)?;
    f.seek(SeekFrom::Start(offset))?;
    let mut buf = vec![0u8; size];
    f.read_exact(&mut buf)?;
    Ok(buf)
}

fn check(src: &mut WindowedSource, path: &Path, offset: u64, size: usize) -> Result<()> {
    let want = naive_read(path, offset, size)?;
    let got = src.read(offset, size)?;
    assert_eq!(&got[..], &want[..], "offset={offset} size={size}");
    Ok(())
}

#[test]
fn overlapping_adjacent_and_far_ranges() -> Result<()> {
    let data = patterned(10_000, 17);
    let path = write_bytes("window-ranges", &data)?;
    let mut src = WindowedSource::open(&path, 256)?;
    assert_eq!(src.file_len(), 10_000);
    assert_eq!(src.capacity(), 256);

    check(&mut src, &path, 0, 12)?;
    check(&mut src, &path, 12, 100)?; // соседний
    check(&mut src, &path, 50, 100)?; // перекрывающийся
    check(&mut src, &path, 200, 100)?; // выходит за окно
    check(&mut src, &path, 9_000, 40)?; // далеко вперёд
    check(&mut src, &path, 3, 7)?; // далеко назад
    check(&mut src, &path, 9_990, 10)?; // последний байт файла
    check(&mut src, &path, 1_000, 256)?; // ровно ёмкость окна
    check(&mut src, &path, 2_000, 257)?; // на байт больше — мимо окна
    check(&mut src, &path, 0, 10_000)?; // весь файл
    Ok(())
}

#[test]
fn in_window_reads_do_not_move_the_window() -> Result<()> {
    let data = patterned(4_096, 3);
    let path = write_bytes("window-hit", &data)?;
    let mut src = WindowedSource::open(&path, 512)?;

    src.read(100, 10)?;
    assert_eq!(src.window(), 100..612);

    src.read(150, 300)?;
    src.read(600, 12)?;
    assert_eq!(src.window(), 100..612);
    Ok(())
}

#[test]
fn oversized_reads_leave_the_window_alone() -> Result<()> {
    let data = patterned(8_192, 5);
    let path = write_bytes("window-oversized", &data)?;
    let mut src = WindowedSource::open(&path, 128)?;

    src.read(64, 16)?;
    let before = src.window();
    let big = src.read(1_000, 4_000)?.into_owned();
    assert_eq!(big, data[1_000..5_000].to_vec());
    assert_eq!(src.window(), before);
    Ok(())
}

#[test]
fn window_near_eof_is_shifted_back() -> Result<()> {
    let data = patterned(1_000, 9);
    let path = write_bytes("window-eof", &data)?;
    let mut src = WindowedSource::open(&path, 300)?;

    src.read(950, 20)?;
    assert_eq!(src.window(), 700..1_000);
    // чтение чуть «назад» попадает в то же окно
    check(&mut src, &path, 720, 30)?;
    assert_eq!(src.window(), 700..1_000);
    Ok(())
}

#[test]
fn reads_past_end_are_truncated() -> Result<()> {
    let data = patterned(100, 1);
    let path = write_bytes("window-past-end", &data)?;
    let mut src = WindowedSource::open(&path, 64)?;

    assert!(matches!(
        src.read(90, 11),
        Err(RecordError::Truncated { offset: 90, needed: 11, file_len: 100 })
    ));
    assert!(matches!(src.read(u64::MAX, 2), Err(RecordError::Truncated { .. })));
    assert!(src.read(100, 0)?.is_empty());
    check(&mut src, &path, 90, 10)?;
    Ok(())
}

#[test]
fn randomized_reads_match_naive_reader() -> Result<()> {
    let data = patterned(50_000, 42);
    let path = write_bytes("window-random", &data)?;

    let mut rng = oorandom::Rand64::new(0x5eed_cafe);
    for cap in [16usize, 100, 1_024, 65_536] {
        let mut src = WindowedSource::open(&path, cap)?;
        for _ in 0..500 {
            let size = rng.rand_range(0..(cap as u64 * 2)) as usize;
            let size = size.min(data.len());
            let offset = rng.rand_range(0..(data.len() - size + 1) as u64);
            let got = src.read(offset, size)?;
            let lo = offset as usize;
            assert_eq!(&got[..], &data[lo..lo + size], "cap={cap} offset={offset} size={size}");
        }
    }
    Ok(())
}

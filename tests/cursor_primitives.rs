use std::io::SeekFrom;

use anyhow::Result;
use fstdump::{ByteReader, Error};

#[test]
fn fixed_width_reads_are_big_endian() -> Result<()> {
    let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0xFF];
    let mut br = ByteReader::new(&data);
    assert_eq!(br.read_u16()?, 0x0102);
    assert_eq!(br.read_u32()?, 0x0304_0506);
    assert_eq!(br.read_u8()?, 0x07);
    assert_eq!(br.read_i8()?, 0x08);
    assert_eq!(br.read_i8()?, -1);
    assert_eq!(br.remaining(), 0);

    let mut br = ByteReader::new(&data);
    assert_eq!(br.read_u64()?, 0x0102_0304_0506_0708);
    Ok(())
}

#[test]
fn failed_reads_leave_the_cursor_unchanged() {
    let data = [0xAA, 0xBB];
    let mut br = ByteReader::new(&data);
    assert!(matches!(br.read_u32(), Err(Error::UnexpectedEof(_))));
    assert_eq!(br.tell(), 0);
    assert_eq!(br.read_u16().unwrap(), 0xAABB);
    assert!(matches!(br.read_u8(), Err(Error::UnexpectedEof(_))));
    assert_eq!(br.tell(), 2);
}

#[test]
fn seek_is_clamped_to_the_buffer() {
    let data = [0u8; 4];
    let mut br = ByteReader::new(&data);
    br.seek(SeekFrom::Start(100));
    assert_eq!(br.tell(), 4);
    br.seek(SeekFrom::Current(-100));
    assert_eq!(br.tell(), 0);
    br.seek(SeekFrom::End(-2));
    assert_eq!(br.tell(), 2);
    br.seek(SeekFrom::End(10));
    assert_eq!(br.tell(), 4);
}

#[test]
fn peek_does_not_advance_and_clamps_at_eof() {
    let data = [1, 2, 3];
    let mut br = ByteReader::new(&data);
    assert_eq!(br.peek_bytes(2), &[1, 2]);
    assert_eq!(br.tell(), 0);
    assert_eq!(br.read_bytes(5), &[1, 2, 3]);
    assert_eq!(br.tell(), 3);
    assert_eq!(br.read_bytes(1), &[] as &[u8]);
}

#[test]
fn uleb128_decoding() -> Result<()> {
    let mut br = ByteReader::new(&[0x7F]);
    assert_eq!(br.read_uleb128()?, (127, 1));

    let mut br = ByteReader::new(&[0x80, 0x01]);
    assert_eq!(br.read_uleb128()?, (128, 2));

    let mut br = ByteReader::new(&[0xE5, 0x8E, 0x26]);
    assert_eq!(br.read_uleb128()?, (624_485, 3));
    Ok(())
}

#[test]
fn uleb128_overflow_and_eof() {
    // ten continuation bytes would need a shift past bit 63
    let mut data = vec![0x80u8; 10];
    data.push(0x01);
    let mut br = ByteReader::new(&data);
    assert!(matches!(br.read_uleb128(), Err(Error::LebOverflow)));
    assert_eq!(br.tell(), 0);

    let mut br = ByteReader::new(&[0x80]);
    assert!(matches!(br.read_uleb128(), Err(Error::UnexpectedEof(_))));
    assert_eq!(br.tell(), 0);
}

#[test]
fn sleb128_sign_extension() -> Result<()> {
    let mut br = ByteReader::new(&[0x7F]);
    assert_eq!(br.read_sleb128()?, (-1, 1));

    let mut br = ByteReader::new(&[0x3F]);
    assert_eq!(br.read_sleb128()?, (63, 1));

    let mut br = ByteReader::new(&[0x40]);
    assert_eq!(br.read_sleb128()?, (-64, 1));

    let mut br = ByteReader::new(&[0x80, 0x7F]);
    assert_eq!(br.read_sleb128()?, (-128, 2));
    Ok(())
}

#[test]
fn reverse_reads_walk_backwards() -> Result<()> {
    let mut data = Vec::new();
    data.extend_from_slice(&0x1111_2222_3333_4444u64.to_be_bytes());
    data.extend_from_slice(&0x5555_6666_7777_8888u64.to_be_bytes());
    let mut br = ByteReader::new(&data);
    br.seek(SeekFrom::End(0));

    assert_eq!(br.read_u64_rev()?, 0x5555_6666_7777_8888);
    assert_eq!(br.tell(), 8);
    assert_eq!(br.read_u64_rev()?, 0x1111_2222_3333_4444);
    assert_eq!(br.tell(), 0);
    assert!(matches!(br.read_u64_rev(), Err(Error::UnexpectedEof(_))));
    assert_eq!(br.tell(), 0);
    Ok(())
}

#[test]
fn reverse_byte_reads() -> Result<()> {
    let data = [1u8, 2, 3, 4, 5];
    let mut br = ByteReader::new(&data);
    br.seek(SeekFrom::End(0));
    assert_eq!(br.read_bytes_rev(2)?, &[4, 5]);
    assert_eq!(br.tell(), 3);
    assert_eq!(br.read_bytes_rev(3)?, &[1, 2, 3]);
    assert_eq!(br.tell(), 0);
    assert!(matches!(br.read_bytes_rev(1), Err(Error::UnexpectedEof(_))));
    Ok(())
}

#[test]
fn cstring_reads_consume_the_terminator() -> Result<()> {
    let data = b"ab\0cd\0";
    let mut br = ByteReader::new(data);
    assert_eq!(br.read_cstring()?, ("ab".to_string(), 3));
    assert_eq!(br.read_cstring()?, ("cd".to_string(), 3));
    assert_eq!(br.remaining(), 0);

    let mut br = ByteReader::new(b"abc");
    assert!(matches!(br.read_cstring(), Err(Error::UnterminatedCString)));
    Ok(())
}

#[test]
fn cstring_max_truncates_the_view_but_not_the_consumption() -> Result<()> {
    let data = b"abcdef\0x";
    let mut br = ByteReader::new(data);
    let (text, consumed) = br.read_cstring_max(3)?;
    assert_eq!(text, "abc");
    assert_eq!(consumed, 7);
    assert_eq!(br.tell(), 7);
    assert_eq!(br.read_u8()?, b'x');
    Ok(())
}

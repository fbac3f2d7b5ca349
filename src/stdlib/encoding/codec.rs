//! Byte-level codecs: `encoding/ascii85`, `encoding/base32`,
//! `encoding/base64`, `encoding/binary`, `encoding/csv`, `encoding/hex`,
//! `encoding/pem`.

use super::write_closer;
use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::types::RecvKind::{Pointer, Value};
use crate::types::Ty;

fn corrupt_input_error(b: &mut PackageBuilder) -> Result<Ty> {
    let named = b.named("CorruptInputError", Ty::INT64)?;
    b.error_method(named, Value)?;
    Ok(named)
}

pub fn ascii85() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/ascii85", "ascii85");
    let bytes = b.bytes();
    let err = b.error();

    b.func("Encode", &[("dst", bytes), ("src", bytes)], &[Ty::INT])?;
    b.func("MaxEncodedLen", &[("n", Ty::INT)], &[Ty::INT])?;
    b.func(
        "Decode",
        &[("dst", bytes), ("src", bytes), ("flush", Ty::BOOL)],
        &[Ty::INT, Ty::INT, err],
    )?;
    let writer = b.io_writer()?;
    let closer = write_closer(&mut b)?;
    let reader = b.io_reader()?;
    b.func("NewEncoder", &[("w", writer)], &[closer])?;
    b.func("NewDecoder", &[("r", reader)], &[reader])?;
    corrupt_input_error(&mut b)?;
    b.finish()
}

pub fn base32() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/base32", "base32");
    let bytes = b.bytes();

    let shape = b.struct_type(&[("data", Ty::INT)]);
    let encoding = b.named("Encoding", shape)?;
    let encoding_ptr = b.recv_ptr(encoding);
    b.var("StdEncoding", encoding_ptr)?;
    b.var("HexEncoding", encoding_ptr)?;
    b.func("NewEncoding", &[("encoder", Ty::STRING)], &[encoding_ptr])?;

    let err = b.error();
    b.method(encoding, Pointer, "EncodeToString", &[("src", bytes)], &[Ty::STRING])?;
    b.method(encoding, Pointer, "DecodeString", &[("s", Ty::STRING)], &[bytes, err])?;
    b.method(encoding, Pointer, "Encode", &[("dst", bytes), ("src", bytes)], &[])?;
    b.method(
        encoding,
        Pointer,
        "Decode",
        &[("dst", bytes), ("src", bytes)],
        &[Ty::INT, err],
    )?;
    b.method(encoding, Pointer, "EncodedLen", &[("n", Ty::INT)], &[Ty::INT])?;
    b.method(encoding, Pointer, "DecodedLen", &[("n", Ty::INT)], &[Ty::INT])?;
    b.method(encoding, Pointer, "WithPadding", &[("padding", Ty::RUNE)], &[encoding])?;
    b.method(
        encoding,
        Pointer,
        "AppendEncode",
        &[("dst", bytes), ("src", bytes)],
        &[bytes],
    )?;
    b.method(
        encoding,
        Pointer,
        "AppendDecode",
        &[("dst", bytes), ("src", bytes)],
        &[bytes, err],
    )?;
    b.method(encoding, Pointer, "Strict", &[], &[encoding_ptr])?;
    corrupt_input_error(&mut b)?;

    let writer = b.io_writer()?;
    let reader = b.io_reader()?;
    let closer = write_closer(&mut b)?;
    b.func("NewEncoder", &[("enc", encoding_ptr), ("w", writer)], &[closer])?;
    b.func("NewDecoder", &[("enc", encoding_ptr), ("r", reader)], &[reader])?;
    b.const_int("NoPadding", Ty::RUNE, -1)?;
    b.const_int("StdPadding", Ty::RUNE, i64::from(b'='))?;
    b.var("RawStdEncoding", encoding_ptr)?;
    b.var("RawHexEncoding", encoding_ptr)?;
    b.finish()
}

pub fn base64() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/base64", "base64");
    let bytes = b.bytes();
    let err = b.error();

    let shape = b.struct_type(&[("alphabet", Ty::STRING)]);
    let encoding = b.named("Encoding", shape)?;
    let encoding_ptr = b.recv_ptr(encoding);
    b.method(encoding, Pointer, "EncodeToString", &[("src", bytes)], &[Ty::STRING])?;
    b.method(encoding, Pointer, "DecodeString", &[("s", Ty::STRING)], &[bytes, err])?;
    b.method(encoding, Pointer, "EncodedLen", &[("n", Ty::INT)], &[Ty::INT])?;
    b.method(encoding, Pointer, "DecodedLen", &[("n", Ty::INT)], &[Ty::INT])?;
    b.method(encoding, Pointer, "Encode", &[("dst", bytes), ("src", bytes)], &[])?;
    b.method(
        encoding,
        Pointer,
        "Decode",
        &[("dst", bytes), ("src", bytes)],
        &[Ty::INT, err],
    )?;
    b.method(encoding, Pointer, "Strict", &[], &[encoding_ptr])?;
    b.method(encoding, Pointer, "WithPadding", &[("padding", Ty::INT32)], &[encoding_ptr])?;
    b.method(
        encoding,
        Pointer,
        "AppendEncode",
        &[("dst", bytes), ("src", bytes)],
        &[bytes],
    )?;
    b.method(
        encoding,
        Pointer,
        "AppendDecode",
        &[("dst", bytes), ("src", bytes)],
        &[bytes, err],
    )?;
    b.func("NewEncoding", &[("encoder", Ty::STRING)], &[encoding_ptr])?;

    let writer = b.io_writer()?;
    let closer = write_closer(&mut b)?;
    let reader = b.io_reader()?;
    b.func("NewEncoder", &[("enc", encoding_ptr), ("w", writer)], &[closer])?;
    b.func("NewDecoder", &[("enc", encoding_ptr), ("r", reader)], &[reader])?;
    b.const_int("NoPadding", Ty::INT32, -1)?;
    b.const_int("StdPadding", Ty::INT32, i64::from(b'='))?;
    corrupt_input_error(&mut b)?;
    for name in ["StdEncoding", "URLEncoding", "RawStdEncoding", "RawURLEncoding"] {
        b.var(name, encoding_ptr)?;
    }
    b.finish()
}

fn byte_order_methods(b: &mut PackageBuilder, append: bool) -> Vec<(&'static str, Ty)> {
    let bytes = b.bytes();
    let mut methods = vec![
        ("Uint16", b.sig(&[("b", bytes)], &[Ty::UINT16])),
        ("Uint32", b.sig(&[("b", bytes)], &[Ty::UINT32])),
        ("Uint64", b.sig(&[("b", bytes)], &[Ty::UINT64])),
        ("PutUint16", b.sig(&[("b", bytes), ("v", Ty::UINT16)], &[])),
        ("PutUint32", b.sig(&[("b", bytes), ("v", Ty::UINT32)], &[])),
        ("PutUint64", b.sig(&[("b", bytes), ("v", Ty::UINT64)], &[])),
    ];
    if append {
        methods.push(("AppendUint16", b.sig(&[("b", bytes), ("v", Ty::UINT16)], &[bytes])));
        methods.push(("AppendUint32", b.sig(&[("b", bytes), ("v", Ty::UINT32)], &[bytes])));
        methods.push(("AppendUint64", b.sig(&[("b", bytes), ("v", Ty::UINT64)], &[bytes])));
    }
    methods.push(("String", b.sig(&[], &[Ty::STRING])));
    methods
}

pub fn binary() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/binary", "binary");
    let bytes = b.bytes();
    let err = b.error();
    let any = b.any();

    let methods = byte_order_methods(&mut b, false);
    let iface = b.interface(&methods)?;
    let order = b.named("ByteOrder", iface)?;
    b.var("BigEndian", order)?;
    b.var("LittleEndian", order)?;

    let writer = b.io_writer()?;
    let reader = b.io_reader()?;
    b.func("Write", &[("w", writer), ("order", order), ("data", any)], &[err])?;
    b.func("Read", &[("r", reader), ("order", order), ("data", any)], &[err])?;
    b.func("PutUvarint", &[("buf", bytes), ("x", Ty::UINT64)], &[Ty::INT])?;
    b.func("Uvarint", &[("buf", bytes)], &[Ty::UINT64, Ty::INT])?;
    b.func("PutVarint", &[("buf", bytes), ("x", Ty::INT64)], &[Ty::INT])?;
    b.func("Varint", &[("buf", bytes)], &[Ty::INT64, Ty::INT])?;
    b.func("Size", &[("v", any)], &[Ty::INT])?;
    b.func("AppendUvarint", &[("buf", bytes), ("x", Ty::UINT64)], &[bytes])?;
    b.func("AppendVarint", &[("buf", bytes), ("x", Ty::INT64)], &[bytes])?;
    b.var("NativeEndian", order)?;

    let methods = byte_order_methods(&mut b, true);
    let iface = b.interface(&methods)?;
    b.named("AppendByteOrder", iface)?;
    b.const_int("MaxVarintLen16", Ty::INT, 3)?;
    b.const_int("MaxVarintLen32", Ty::INT, 5)?;
    b.const_int("MaxVarintLen64", Ty::INT, 10)?;

    let read_byte = b.sig(&[], &[Ty::BYTE, err]);
    let byte_reader = b.interface(&[("ReadByte", read_byte)])?;
    b.func("ReadUvarint", &[("r", byte_reader)], &[Ty::UINT64, err])?;
    b.func("ReadVarint", &[("r", byte_reader)], &[Ty::INT64, err])?;
    b.func(
        "Encode",
        &[("buf", bytes), ("order", order), ("data", any)],
        &[Ty::INT, err],
    )?;
    b.func(
        "Decode",
        &[("buf", bytes), ("order", order), ("data", any)],
        &[Ty::INT, err],
    )?;
    b.func(
        "Append",
        &[("order", order), ("buf", bytes), ("data", any)],
        &[bytes, err],
    )?;
    b.finish()
}

pub fn csv() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/csv", "csv");
    let err = b.error();

    let shape = b.struct_type(&[
        ("Comma", Ty::INT32),
        ("Comment", Ty::INT32),
        ("FieldsPerRecord", Ty::INT),
        ("LazyQuotes", Ty::BOOL),
        ("TrimLeadingSpace", Ty::BOOL),
        ("ReuseRecord", Ty::BOOL),
        ("TrailingComma", Ty::BOOL),
    ]);
    let reader = b.named("Reader", shape)?;
    let reader_ptr = b.recv_ptr(reader);
    let io_reader = b.io_reader()?;
    let io_writer = b.io_writer()?;
    b.func("NewReader", &[("r", io_reader)], &[reader_ptr])?;

    let shape = b.struct_type(&[("Comma", Ty::INT32), ("UseCRLF", Ty::BOOL)]);
    let writer = b.named("Writer", shape)?;
    let writer_ptr = b.recv_ptr(writer);
    b.func("NewWriter", &[("w", io_writer)], &[writer_ptr])?;

    let record = b.slice(Ty::STRING);
    let records = b.slice(record);
    b.method(reader, Pointer, "Read", &[], &[record, err])?;
    b.method(reader, Pointer, "ReadAll", &[], &[records, err])?;
    b.method(reader, Pointer, "FieldPos", &[("field", Ty::INT)], &[Ty::INT, Ty::INT])?;
    b.method(reader, Pointer, "InputOffset", &[], &[Ty::INT64])?;

    let shape = b.struct_type(&[
        ("StartLine", Ty::INT),
        ("Line", Ty::INT),
        ("Column", Ty::INT),
        ("Err", err),
    ]);
    let parse_error = b.named("ParseError", shape)?;
    b.error_method(parse_error, Pointer)?;
    b.method(parse_error, Pointer, "Unwrap", &[], &[err])?;

    b.method(writer, Pointer, "Write", &[("record", record)], &[err])?;
    b.method(writer, Pointer, "WriteAll", &[("records", records)], &[err])?;
    b.method(writer, Pointer, "Flush", &[], &[])?;
    b.method(writer, Pointer, "Error", &[], &[err])?;
    b.error_vars(&["ErrFieldCount", "ErrQuote", "ErrBareQuote", "ErrTrailingComma"])?;
    b.finish()
}

pub fn hex() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/hex", "hex");
    let bytes = b.bytes();
    let err = b.error();

    b.func("EncodeToString", &[("src", bytes)], &[Ty::STRING])?;
    b.func("DecodeString", &[("s", Ty::STRING)], &[bytes, err])?;
    b.func("EncodedLen", &[("n", Ty::INT)], &[Ty::INT])?;
    b.func("DecodedLen", &[("x", Ty::INT)], &[Ty::INT])?;
    b.func("Encode", &[("dst", bytes), ("src", bytes)], &[Ty::INT])?;
    b.func("Decode", &[("dst", bytes), ("src", bytes)], &[Ty::INT, err])?;
    b.func("Dump", &[("data", bytes)], &[Ty::STRING])?;

    let writer = b.io_writer()?;
    let reader = b.io_reader()?;
    let closer = write_closer(&mut b)?;
    b.func("NewEncoder", &[("w", writer)], &[writer])?;
    b.func("NewDecoder", &[("r", reader)], &[reader])?;
    b.func("Dumper", &[("w", writer)], &[closer])?;

    let invalid = b.named("InvalidByteError", Ty::BYTE)?;
    b.error_method(invalid, Value)?;
    b.error_vars(&["ErrLength"])?;
    b.func("AppendEncode", &[("dst", bytes), ("src", bytes)], &[bytes])?;
    b.func("AppendDecode", &[("dst", bytes), ("src", bytes)], &[bytes, err])?;
    b.finish()
}

pub fn pem() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/pem", "pem");
    let bytes = b.bytes();
    let err = b.error();

    let headers = b.map(Ty::STRING, Ty::STRING);
    let shape = b.struct_type(&[("Type", Ty::STRING), ("Headers", headers), ("Bytes", bytes)]);
    let block = b.named("Block", shape)?;
    let block_ptr = b.ptr(block);
    b.func("Decode", &[("data", bytes)], &[block_ptr, bytes])?;
    let writer = b.io_writer()?;
    b.func("Encode", &[("out", writer), ("b", block_ptr)], &[err])?;
    b.func("EncodeToMemory", &[("b", block_ptr)], &[bytes])?;
    b.finish()
}

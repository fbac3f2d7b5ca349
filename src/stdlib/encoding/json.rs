//! `encoding/json`, `encoding/json/jsontext` and `encoding/json/v2`.

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::types::RecvKind::{Pointer, Value};
use crate::types::{FieldDecl, Ty};

pub fn json() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/json", "json");
    let bytes = b.bytes();
    let err = b.error();
    let any = b.any();
    let reader = b.io_reader()?;
    let writer = b.io_writer()?;

    b.func("Marshal", &[("v", any)], &[bytes, err])?;
    b.func(
        "MarshalIndent",
        &[("v", any), ("prefix", Ty::STRING), ("indent", Ty::STRING)],
        &[bytes, err],
    )?;
    b.func("Unmarshal", &[("data", bytes), ("v", any)], &[err])?;
    b.func("Valid", &[("data", bytes)], &[Ty::BOOL])?;

    // bytes.Buffer, only reachable through the functions below.
    let empty = b.struct_type(&[]);
    let buffer = b.hidden("Buffer", empty)?;
    let buffer_ptr = b.recv_ptr(buffer);
    b.method(buffer, Pointer, "Write", &[("p", bytes)], &[Ty::INT, err])?;
    b.method(buffer, Pointer, "WriteString", &[("s", Ty::STRING)], &[Ty::INT, err])?;
    b.method(buffer, Pointer, "Bytes", &[], &[bytes])?;
    b.method(buffer, Pointer, "String", &[], &[Ty::STRING])?;
    b.method(buffer, Pointer, "Len", &[], &[Ty::INT])?;
    b.method(buffer, Pointer, "Reset", &[], &[])?;
    b.method(buffer, Pointer, "WriteByte", &[("c", Ty::BYTE)], &[err])?;
    b.method(buffer, Pointer, "ReadFrom", &[("r", reader)], &[Ty::INT64, err])?;

    b.func("Compact", &[("dst", buffer_ptr), ("src", bytes)], &[err])?;
    b.func(
        "Indent",
        &[
            ("dst", buffer_ptr),
            ("src", bytes),
            ("prefix", Ty::STRING),
            ("indent", Ty::STRING),
        ],
        &[err],
    )?;
    b.func("HTMLEscape", &[("dst", buffer_ptr), ("src", bytes)], &[])?;

    let empty = b.struct_type(&[]);
    let encoder = b.named("Encoder", empty)?;
    let encoder_ptr = b.recv_ptr(encoder);
    b.func("NewEncoder", &[("w", writer)], &[encoder_ptr])?;
    b.method(encoder, Pointer, "Encode", &[("v", any)], &[err])?;
    b.method(
        encoder,
        Pointer,
        "SetIndent",
        &[("prefix", Ty::STRING), ("indent", Ty::STRING)],
        &[],
    )?;
    b.method(encoder, Pointer, "SetEscapeHTML", &[("on", Ty::BOOL)], &[])?;

    let empty = b.struct_type(&[]);
    let decoder = b.named("Decoder", empty)?;
    let decoder_ptr = b.recv_ptr(decoder);
    b.func("NewDecoder", &[("r", reader)], &[decoder_ptr])?;
    b.method(decoder, Pointer, "Decode", &[("v", any)], &[err])?;
    b.method(decoder, Pointer, "More", &[], &[Ty::BOOL])?;
    b.method(decoder, Pointer, "UseNumber", &[], &[])?;
    b.method(decoder, Pointer, "DisallowUnknownFields", &[], &[])?;
    b.method(decoder, Pointer, "Token", &[], &[any, err])?;
    b.method(decoder, Pointer, "Buffered", &[], &[reader])?;
    b.method(decoder, Pointer, "InputOffset", &[], &[Ty::INT64])?;

    let number = b.named("Number", Ty::STRING)?;
    let raw_message = b.named("RawMessage", bytes)?;
    let marshal = b.sig(&[], &[bytes, err]);
    let iface = b.interface(&[("MarshalJSON", marshal)])?;
    b.named("Marshaler", iface)?;
    let unmarshal = b.sig(&[("data", bytes)], &[err]);
    let iface = b.interface(&[("UnmarshalJSON", unmarshal)])?;
    b.named("Unmarshaler", iface)?;

    b.stringer(number)?;
    b.method(number, Value, "Float64", &[], &[Ty::FLOAT64, err])?;
    b.method(number, Value, "Int64", &[], &[Ty::INT64, err])?;
    b.named("Delim", Ty::RUNE)?;
    let empty = b.interface(&[])?;
    b.named("Token", empty)?;

    let shape = b.struct_type(&[("Offset", Ty::INT64)]);
    let syntax = b.named("SyntaxError", shape)?;
    b.error_method(syntax, Pointer)?;
    let shape = b.struct_type(&[
        ("Value", Ty::STRING),
        ("Offset", Ty::INT64),
        ("Struct", Ty::STRING),
        ("Field", Ty::STRING),
    ]);
    let type_error = b.named("UnmarshalTypeError", shape)?;
    b.error_method(type_error, Pointer)?;
    let empty = b.struct_type(&[]);
    let invalid_unmarshal = b.named("InvalidUnmarshalError", empty)?;
    b.error_method(invalid_unmarshal, Pointer)?;
    let empty = b.struct_type(&[]);
    let marshaler_error = b.named("MarshalerError", empty)?;
    b.error_method(marshaler_error, Pointer)?;
    b.method(marshaler_error, Pointer, "Unwrap", &[], &[err])?;
    let empty = b.struct_type(&[]);
    let unsupported_type = b.named("UnsupportedTypeError", empty)?;
    b.error_method(unsupported_type, Pointer)?;
    let shape = b.struct_type(&[("Str", Ty::STRING)]);
    let unsupported_value = b.named("UnsupportedValueError", shape)?;
    b.error_method(unsupported_value, Pointer)?;

    b.method(raw_message, Value, "MarshalJSON", &[], &[bytes, err])?;
    b.method(raw_message, Pointer, "UnmarshalJSON", &[("data", bytes)], &[err])?;

    let shape = b.struct_type(&[("S", Ty::STRING)]);
    let invalid_utf8 = b.named("InvalidUTF8Error", shape)?;
    b.error_method(invalid_utf8, Pointer)?;
    let shape = b.struct_of(&[
        FieldDecl::new("Key", Ty::STRING),
        FieldDecl::new("Type", any),
        FieldDecl::new("Field", any),
    ]);
    let field_error = b.named("UnmarshalFieldError", shape)?;
    b.error_method(field_error, Pointer)?;
    b.finish()
}

pub fn jsontext() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/json/jsontext", "jsontext");
    let bytes = b.bytes();
    let err = b.error();

    let value = b.named("Value", bytes)?;
    b.stringer(value)?;
    b.method(value, Value, "IsValid", &[], &[Ty::BOOL])?;
    b.method(value, Value, "Clone", &[], &[value])?;
    b.method(
        value,
        Value,
        "Indent",
        &[("prefix", Ty::STRING), ("indent", Ty::STRING)],
        &[err],
    )?;
    b.method(value, Value, "Compact", &[], &[err])?;
    b.method(value, Value, "Canonicalize", &[], &[err])?;

    let kind = b.named("Kind", Ty::INT)?;
    let empty = b.struct_type(&[]);
    let token = b.named("Token", empty)?;
    b.method(token, Value, "Kind", &[], &[kind])?;
    b.method(token, Value, "Bool", &[], &[Ty::BOOL])?;
    b.method(token, Value, "Float", &[], &[Ty::FLOAT64])?;
    b.method(token, Value, "Int", &[], &[Ty::INT64])?;
    b.method(token, Value, "Uint", &[], &[Ty::UINT64])?;
    b.stringer(token)?;

    let empty = b.struct_type(&[]);
    let encoder = b.named("Encoder", empty)?;
    let encoder_ptr = b.recv_ptr(encoder);
    let empty = b.struct_type(&[]);
    let decoder = b.named("Decoder", empty)?;
    let decoder_ptr = b.recv_ptr(decoder);
    b.method(encoder, Pointer, "WriteToken", &[("t", token)], &[err])?;
    b.method(encoder, Pointer, "WriteValue", &[("v", value)], &[err])?;
    b.method(encoder, Pointer, "OutputOffset", &[], &[Ty::INT64])?;
    b.method(decoder, Pointer, "ReadToken", &[], &[token, err])?;
    b.method(decoder, Pointer, "ReadValue", &[], &[value, err])?;
    b.method(decoder, Pointer, "InputOffset", &[], &[Ty::INT64])?;
    b.method(decoder, Pointer, "PeekKind", &[], &[kind])?;

    let writer = b.io_writer()?;
    let reader = b.io_reader()?;
    b.func("NewEncoder", &[("w", writer)], &[encoder_ptr])?;
    b.func("NewDecoder", &[("r", reader)], &[decoder_ptr])?;

    for (name, c) in [
        ("InvalidKind", 0),
        ("NullKind", b'n'),
        ("FalseKind", b'f'),
        ("TrueKind", b't'),
        ("StringKind", b'"'),
        ("NumberKind", b'0'),
        ("ObjectStartKind", b'{'),
        ("ObjectEndKind", b'}'),
        ("ArrayStartKind", b'['),
        ("ArrayEndKind", b']'),
    ] {
        b.const_int(name, kind, i64::from(c))?;
    }
    b.finish()
}

pub fn json_v2() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/json/v2", "json");
    let bytes = b.bytes();
    let err = b.error();
    let any = b.any();

    let empty = b.struct_type(&[]);
    let options = b.named("Options", empty)?;
    let opts = b.slice(options);
    b.func_variadic("Marshal", &[("in", any), ("opts", opts)], &[bytes, err])?;
    b.func_variadic(
        "Unmarshal",
        &[("in", bytes), ("out", any), ("opts", opts)],
        &[err],
    )?;
    let writer = b.io_writer()?;
    let reader = b.io_reader()?;
    b.func_variadic(
        "MarshalWrite",
        &[("out", writer), ("in", any), ("opts", opts)],
        &[err],
    )?;
    b.func_variadic(
        "UnmarshalRead",
        &[("in", reader), ("out", any), ("opts", opts)],
        &[err],
    )?;
    b.finish()
}

//! The `encoding` family.

mod codec;
mod json;
mod xml;

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::registry::Registry;
use crate::types::RecvKind::{Pointer, Value};
use crate::types::Ty;

pub(crate) fn register(registry: &mut Registry) {
    registry.register("encoding", encoding);
    registry.register("encoding/ascii85", codec::ascii85);
    registry.register("encoding/asn1", asn1);
    registry.register("encoding/base32", codec::base32);
    registry.register("encoding/base64", codec::base64);
    registry.register("encoding/binary", codec::binary);
    registry.register("encoding/csv", codec::csv);
    registry.register("encoding/gob", gob);
    registry.register("encoding/hex", codec::hex);
    registry.register("encoding/json", json::json);
    registry.register("encoding/json/jsontext", json::jsontext);
    registry.register("encoding/json/v2", json::json_v2);
    registry.register("encoding/pem", codec::pem);
    registry.register("encoding/xml", xml::xml);
}

/// `io.WriteCloser` stand-in.
fn write_closer(b: &mut PackageBuilder) -> Result<Ty> {
    let bytes = b.bytes();
    let err = b.error();
    let write = b.sig(&[("p", bytes)], &[Ty::INT, err]);
    let close = b.sig(&[], &[err]);
    b.interface(&[("Write", write), ("Close", close)])
}

pub fn encoding() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding", "encoding");
    let bytes = b.bytes();
    let err = b.error();

    for (name, method) in [
        ("BinaryMarshaler", "MarshalBinary"),
        ("TextMarshaler", "MarshalText"),
    ] {
        let marshal = b.sig(&[], &[bytes, err]);
        let iface = b.interface(&[(method, marshal)])?;
        b.named(name, iface)?;
    }
    for (name, method) in [
        ("BinaryUnmarshaler", "UnmarshalBinary"),
        ("TextUnmarshaler", "UnmarshalText"),
    ] {
        let unmarshal = b.sig(&[("data", bytes)], &[err]);
        let iface = b.interface(&[(method, unmarshal)])?;
        b.named(name, iface)?;
    }
    b.finish()
}

pub fn asn1() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/asn1", "asn1");
    let bytes = b.bytes();
    let err = b.error();
    let any = b.any();

    b.func("Marshal", &[("val", any)], &[bytes, err])?;
    b.func("Unmarshal", &[("b", bytes), ("val", any)], &[bytes, err])?;
    b.func(
        "MarshalWithParams",
        &[("val", any), ("params", Ty::STRING)],
        &[bytes, err],
    )?;
    b.func(
        "UnmarshalWithParams",
        &[("b", bytes), ("val", any), ("params", Ty::STRING)],
        &[bytes, err],
    )?;

    let ints = b.slice(Ty::INT);
    let oid = b.named("ObjectIdentifier", ints)?;
    b.named("RawContent", bytes)?;
    let shape = b.struct_type(&[
        ("Class", Ty::INT),
        ("Tag", Ty::INT),
        ("IsCompound", Ty::BOOL),
        ("Bytes", bytes),
        ("FullBytes", bytes),
    ]);
    let raw_value = b.named("RawValue", shape)?;
    let shape = b.struct_type(&[("Bytes", bytes), ("BitLength", Ty::INT)]);
    let bit_string = b.named("BitString", shape)?;
    b.method(bit_string, Value, "At", &[("i", Ty::INT)], &[Ty::INT])?;
    b.method(bit_string, Value, "RightAlign", &[], &[bytes])?;
    b.method(oid, Value, "Equal", &[("other", oid)], &[Ty::BOOL])?;
    b.stringer(oid)?;

    let shape = b.struct_type(&[("data", Ty::INT)]);
    b.named("Flag", shape)?;
    b.named("Enumerated", Ty::INT)?;
    for name in ["SyntaxError", "StructuralError"] {
        let shape = b.struct_type(&[("Msg", Ty::STRING)]);
        let named = b.named(name, shape)?;
        b.error_method(named, Value)?;
    }

    for (name, tag) in [
        ("TagBoolean", 1),
        ("TagInteger", 2),
        ("TagBitString", 3),
        ("TagOctetString", 4),
        ("TagNULL", 5),
        ("TagOID", 6),
        ("TagEnum", 10),
        ("TagUTF8String", 12),
        ("TagSequence", 16),
        ("TagSet", 17),
        ("TagPrintableString", 19),
        ("TagIA5String", 22),
        ("TagUTCTime", 23),
        ("TagGeneralizedTime", 24),
        ("TagBMPString", 30),
    ] {
        b.const_int(name, Ty::INT, tag)?;
    }
    b.enumerate(
        Ty::INT,
        &["ClassUniversal", "ClassApplication", "ClassContextSpecific", "ClassPrivate"],
        0,
    )?;
    b.var("NullRawValue", raw_value)?;
    b.var("NullBytes", bytes)?;
    b.finish()
}

pub fn gob() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/gob", "gob");
    let bytes = b.bytes();
    let err = b.error();
    let any = b.any();
    let reader = b.io_reader()?;
    let writer = b.io_writer()?;

    let shape = b.struct_type(&[("data", Ty::INT)]);
    let encoder = b.named("Encoder", shape)?;
    let encoder_ptr = b.recv_ptr(encoder);
    let shape = b.struct_type(&[("data", Ty::INT)]);
    let decoder = b.named("Decoder", shape)?;
    let decoder_ptr = b.recv_ptr(decoder);

    b.func("NewEncoder", &[("w", writer)], &[encoder_ptr])?;
    b.func("NewDecoder", &[("r", reader)], &[decoder_ptr])?;
    b.method(encoder, Pointer, "Encode", &[("e", any)], &[err])?;
    b.method(decoder, Pointer, "Decode", &[("e", any)], &[err])?;
    b.func("Register", &[("value", any)], &[])?;
    b.func("RegisterName", &[("name", Ty::STRING), ("value", any)], &[])?;
    b.method(encoder, Pointer, "EncodeValue", &[("value", any)], &[err])?;
    b.method(decoder, Pointer, "DecodeValue", &[("value", any)], &[err])?;

    let shape = b.struct_type(&[("Name", Ty::STRING), ("Id", Ty::INT)]);
    b.named("CommonType", shape)?;
    let gob_encode = b.sig(&[], &[bytes, err]);
    let iface = b.interface(&[("GobEncode", gob_encode)])?;
    b.named("GobEncoder", iface)?;
    let gob_decode = b.sig(&[("data", bytes)], &[err]);
    let iface = b.interface(&[("GobDecode", gob_decode)])?;
    b.named("GobDecoder", iface)?;
    b.finish()
}

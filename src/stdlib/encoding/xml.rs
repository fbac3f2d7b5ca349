//! `encoding/xml`.

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::types::RecvKind::{Pointer, Value};
use crate::types::Ty;

pub fn xml() -> Result<Package> {
    let mut b = PackageBuilder::new("encoding/xml", "xml");
    let bytes = b.bytes();
    let err = b.error();
    let any = b.any();
    let strings = b.slice(Ty::STRING);
    let entities = b.map(Ty::STRING, Ty::STRING);

    b.func("Marshal", &[("v", any)], &[bytes, err])?;
    b.func("Unmarshal", &[("data", bytes), ("v", any)], &[err])?;
    b.func(
        "MarshalIndent",
        &[("v", any), ("prefix", Ty::STRING), ("indent", Ty::STRING)],
        &[bytes, err],
    )?;
    b.const_str(
        "Header",
        Ty::STRING,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    )?;

    let writer = b.io_writer()?;
    let reader = b.io_reader()?;
    b.func("EscapeText", &[("w", writer), ("data", bytes)], &[err])?;
    b.func("Escape", &[("w", writer), ("data", bytes)], &[])?;

    let token_iface = b.interface(&[])?;
    b.func("CopyToken", &[("t", token_iface)], &[token_iface])?;
    b.named("Token", token_iface)?;

    let empty = b.struct_type(&[]);
    let encoder = b.named("Encoder", empty)?;
    let encoder_ptr = b.recv_ptr(encoder);
    b.func("NewEncoder", &[("w", writer)], &[encoder_ptr])?;
    b.method(encoder, Pointer, "Encode", &[("v", any)], &[err])?;
    b.method(encoder, Pointer, "EncodeToken", &[("t", token_iface)], &[err])?;

    // StartElement is used by signatures before its fields are known.
    let start = b.declare("StartElement")?;
    b.method(
        encoder,
        Pointer,
        "EncodeElement",
        &[("v", any), ("start", start)],
        &[err],
    )?;
    b.method(encoder, Pointer, "Flush", &[], &[err])?;
    b.method(
        encoder,
        Pointer,
        "Indent",
        &[("prefix", Ty::STRING), ("indent", Ty::STRING)],
        &[],
    )?;

    let charset_reader = b.sig(&[("charset", Ty::STRING), ("input", reader)], &[reader, err]);
    let shape = b.struct_type(&[
        ("Strict", Ty::BOOL),
        ("AutoClose", strings),
        ("Entity", entities),
        ("CharsetReader", charset_reader),
        ("DefaultSpace", Ty::STRING),
    ]);
    let decoder = b.named("Decoder", shape)?;
    let decoder_ptr = b.recv_ptr(decoder);
    b.func("NewDecoder", &[("r", reader)], &[decoder_ptr])?;
    b.method(decoder, Pointer, "Decode", &[("v", any)], &[err])?;
    let start_ptr = b.ptr(start);
    b.method(
        decoder,
        Pointer,
        "DecodeElement",
        &[("v", any), ("start", start_ptr)],
        &[err],
    )?;
    b.method(decoder, Pointer, "Token", &[], &[token_iface, err])?;
    b.method(decoder, Pointer, "Skip", &[], &[err])?;

    let shape = b.struct_type(&[("Space", Ty::STRING), ("Local", Ty::STRING)]);
    let name = b.named("Name", shape)?;
    let shape = b.struct_type(&[("Name", name), ("Value", Ty::STRING)]);
    let attr = b.named("Attr", shape)?;
    let attrs = b.slice(attr);
    let shape = b.struct_type(&[("Name", name), ("Attr", attrs)]);
    b.set_underlying(start, shape)?;
    let shape = b.struct_type(&[("Name", name)]);
    let end = b.named("EndElement", shape)?;
    let char_data = b.named("CharData", bytes)?;
    let comment = b.named("Comment", bytes)?;
    let shape = b.struct_type(&[("Target", Ty::STRING), ("Inst", bytes)]);
    let proc_inst = b.named("ProcInst", shape)?;
    let directive = b.named("Directive", bytes)?;

    let marshal = b.sig(&[("e", encoder_ptr), ("start", start)], &[err]);
    let iface = b.interface(&[("MarshalXML", marshal)])?;
    b.named("Marshaler", iface)?;
    let unmarshal = b.sig(&[("d", decoder_ptr), ("start", start)], &[err]);
    let iface = b.interface(&[("UnmarshalXML", unmarshal)])?;
    b.named("Unmarshaler", iface)?;

    b.method(start, Value, "Copy", &[], &[start])?;
    b.method(start, Value, "End", &[], &[end])?;
    for named in [char_data, comment, proc_inst, directive] {
        b.method(named, Value, "Copy", &[], &[named])?;
    }
    b.method(decoder, Pointer, "RawToken", &[], &[token_iface, err])?;
    b.method(decoder, Pointer, "InputOffset", &[], &[Ty::INT64])?;

    let shape = b.struct_type(&[("Msg", Ty::STRING), ("Line", Ty::INT)]);
    let syntax = b.named("SyntaxError", shape)?;
    b.error_method(syntax, Pointer)?;
    let shape = b.struct_type(&[
        ("Field1", Ty::STRING),
        ("Tag1", Ty::STRING),
        ("Field2", Ty::STRING),
        ("Tag2", Ty::STRING),
    ]);
    let tag_path = b.named("TagPathError", shape)?;
    b.error_method(tag_path, Pointer)?;

    // reflect.Type, trimmed to what error messages need.
    let string = b.sig(&[], &[Ty::STRING]);
    let type_name = b.sig(&[], &[Ty::STRING]);
    let kind = b.sig(&[], &[Ty::INT]);
    let reflect_type = b.interface(&[("String", string), ("Name", type_name), ("Kind", kind)])?;
    let shape = b.struct_type(&[("Type", reflect_type)]);
    let unsupported = b.named("UnsupportedTypeError", shape)?;
    b.error_method(unsupported, Pointer)?;

    let token = b.sig(&[], &[token_iface, err]);
    let token_reader = b.interface(&[("Token", token)])?;
    b.named("TokenReader", token_reader)?;
    b.func("NewTokenDecoder", &[("t", token_reader)], &[decoder_ptr])?;

    let marshal_attr = b.sig(&[("name", name)], &[attr, err]);
    let iface = b.interface(&[("MarshalXMLAttr", marshal_attr)])?;
    b.named("MarshalerAttr", iface)?;
    let unmarshal_attr = b.sig(&[("attr", attr)], &[err]);
    let iface = b.interface(&[("UnmarshalXMLAttr", unmarshal_attr)])?;
    b.named("UnmarshalerAttr", iface)?;

    b.method(encoder, Pointer, "Close", &[], &[err])?;
    b.method(decoder, Pointer, "InputPos", &[], &[Ty::INT, Ty::INT])?;
    b.var("HTMLAutoClose", strings)?;
    b.var("HTMLEntity", entities)?;
    b.finish()
}

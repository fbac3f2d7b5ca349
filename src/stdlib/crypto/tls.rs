//! `crypto/tls`.

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::types::RecvKind::{Pointer, Value};
use crate::types::{ChanDir, Ty};

const CIPHER_SUITES: &[(&str, u64)] = &[
    ("TLS_RSA_WITH_AES_128_CBC_SHA", 0x002f),
    ("TLS_RSA_WITH_AES_256_CBC_SHA", 0x0035),
    ("TLS_RSA_WITH_AES_128_GCM_SHA256", 0x009c),
    ("TLS_RSA_WITH_AES_256_GCM_SHA384", 0x009d),
    ("TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA", 0xc009),
    ("TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA", 0xc00a),
    ("TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA", 0xc013),
    ("TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA", 0xc014),
    ("TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256", 0xc02b),
    ("TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384", 0xc02c),
    ("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256", 0xc02f),
    ("TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384", 0xc030),
    ("TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256", 0xcca8),
    ("TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256", 0xcca9),
    ("TLS_AES_128_GCM_SHA256", 0x1301),
    ("TLS_AES_256_GCM_SHA384", 0x1302),
    ("TLS_CHACHA20_POLY1305_SHA256", 0x1303),
];

const SIGNATURE_SCHEMES: &[(&str, u64)] = &[
    ("PKCS1WithSHA256", 0x0401),
    ("PKCS1WithSHA384", 0x0501),
    ("PKCS1WithSHA512", 0x0601),
    ("PSSWithSHA256", 0x0804),
    ("PSSWithSHA384", 0x0805),
    ("PSSWithSHA512", 0x0806),
    ("ECDSAWithP256AndSHA256", 0x0403),
    ("ECDSAWithP384AndSHA384", 0x0503),
    ("ECDSAWithP521AndSHA512", 0x0603),
    ("Ed25519", 0x0807),
    ("PKCS1WithSHA1", 0x0201),
    ("ECDSAWithSHA1", 0x0203),
];

/// `context.Context` with deadlines as unix nanoseconds.
fn context_iface(b: &mut PackageBuilder) -> Result<Ty> {
    let err = b.error();
    let any = b.any();
    let empty = b.struct_type(&[]);
    let done_chan = b.chan(ChanDir::RecvOnly, empty);
    let deadline = b.sig(&[], &[Ty::INT64, Ty::BOOL]);
    let done = b.sig(&[], &[done_chan]);
    let err_sig = b.sig(&[], &[err]);
    let value = b.sig(&[("key", any)], &[any]);
    b.interface(&[
        ("Deadline", deadline),
        ("Done", done),
        ("Err", err_sig),
        ("Value", value),
    ])
}

pub fn tls() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/tls", "tls");
    let err = b.error();
    let any = b.any();
    let bytes = b.bytes();
    let opaque = b.opaque();

    let chain = b.slice(bytes);
    let shape = b.struct_type(&[("Certificate", chain), ("PrivateKey", any), ("Leaf", opaque)]);
    let certificate = b.named("Certificate", shape)?;
    let certificate_ptr = b.ptr(certificate);

    let curve_id = b.named("CurveID", Ty::UINT16)?;
    b.const_uint("CurveP256", curve_id, 23)?;
    b.const_uint("CurveP384", curve_id, 24)?;
    b.const_uint("CurveP521", curve_id, 25)?;
    b.const_uint("X25519", curve_id, 29)?;

    let client_auth = b.named("ClientAuthType", Ty::INT)?;
    b.enumerate(
        client_auth,
        &[
            "NoClientCert",
            "RequestClientCert",
            "RequireAnyClientCert",
            "VerifyClientCertIfGiven",
            "RequireAndVerifyClientCert",
        ],
        0,
    )?;

    let read = b.sig(&[("b", bytes)], &[Ty::INT, err]);
    let write = b.sig(&[("b", bytes)], &[Ty::INT, err]);
    let close = b.sig(&[], &[err]);
    let net_conn = b.interface(&[("Read", read), ("Write", write), ("Close", close)])?;
    let network = b.sig(&[], &[Ty::STRING]);
    let string = b.sig(&[], &[Ty::STRING]);
    let net_addr = b.interface(&[("Network", network), ("String", string)])?;

    let u16s = b.slice(Ty::UINT16);
    let strings = b.slice(Ty::STRING);
    let curves = b.slice(curve_id);
    let shape = b.struct_type(&[
        ("ServerName", Ty::STRING),
        ("CipherSuites", u16s),
        ("SupportedVersions", u16s),
        ("SupportedProtos", strings),
        ("SupportedCurves", curves),
        ("Conn", net_conn),
    ]);
    let hello = b.named("ClientHelloInfo", shape)?;
    let hello_ptr = b.ptr(hello);
    let shape = b.struct_type(&[("Version", Ty::UINT16)]);
    let cert_request = b.named("CertificateRequestInfo", shape)?;
    let cert_request_ptr = b.ptr(cert_request);

    let certificates = b.slice(certificate);
    let get_certificate = b.sig(&[("hello", hello_ptr)], &[certificate_ptr, err]);
    let get_client_certificate = b.sig(&[("info", cert_request_ptr)], &[certificate_ptr, err]);
    let shape = b.struct_type(&[
        ("Certificates", certificates),
        ("GetCertificate", get_certificate),
        ("GetClientCertificate", get_client_certificate),
        ("RootCAs", opaque),
        ("ClientCAs", opaque),
        ("InsecureSkipVerify", Ty::BOOL),
        ("MinVersion", Ty::UINT16),
        ("MaxVersion", Ty::UINT16),
        ("ServerName", Ty::STRING),
        ("NextProtos", strings),
        ("ClientAuth", client_auth),
        ("CipherSuites", u16s),
        ("CurvePreferences", curves),
        ("SessionTicketsDisabled", Ty::BOOL),
        ("Renegotiation", Ty::INT),
    ]);
    let config = b.named("Config", shape)?;
    let config_ptr = b.recv_ptr(config);
    b.method(config, Pointer, "Clone", &[], &[config_ptr])?;

    let peer_certs = b.slice(opaque);
    let chains = b.slice(peer_certs);
    let shape = b.struct_type(&[
        ("Version", Ty::UINT16),
        ("HandshakeComplete", Ty::BOOL),
        ("DidResume", Ty::BOOL),
        ("CipherSuite", Ty::UINT16),
        ("ServerName", Ty::STRING),
        ("NegotiatedProtocol", Ty::STRING),
        ("PeerCertificates", peer_certs),
        ("VerifiedChains", chains),
        ("OCSPResponse", bytes),
    ]);
    let conn_state = b.named("ConnectionState", shape)?;

    let ctx = context_iface(&mut b)?;
    let shape = b.struct_type(&[("fd", Ty::INT)]);
    let conn = b.named("Conn", shape)?;
    let conn_ptr = b.recv_ptr(conn);
    b.method(conn, Pointer, "Close", &[], &[err])?;
    b.method(conn, Pointer, "Read", &[("b", bytes)], &[Ty::INT, err])?;
    b.method(conn, Pointer, "Write", &[("b", bytes)], &[Ty::INT, err])?;
    b.method(conn, Pointer, "Handshake", &[], &[err])?;
    b.method(conn, Pointer, "ConnectionState", &[], &[conn_state])?;
    b.method(conn, Pointer, "HandshakeContext", &[("ctx", ctx)], &[err])?;
    b.method(conn, Pointer, "NetConn", &[], &[net_conn])?;
    b.method(conn, Pointer, "VerifyHostname", &[("host", Ty::STRING)], &[err])?;
    b.method(conn, Pointer, "OCSPResponse", &[], &[bytes])?;

    b.func(
        "Dial",
        &[("network", Ty::STRING), ("addr", Ty::STRING), ("config", config_ptr)],
        &[conn_ptr, err],
    )?;
    b.func(
        "DialWithDialer",
        &[
            ("dialer", opaque),
            ("network", Ty::STRING),
            ("addr", Ty::STRING),
            ("config", config_ptr),
        ],
        &[conn_ptr, err],
    )?;
    b.func(
        "LoadX509KeyPair",
        &[("certFile", Ty::STRING), ("keyFile", Ty::STRING)],
        &[certificate, err],
    )?;
    b.func(
        "X509KeyPair",
        &[("certPEMBlock", bytes), ("keyPEMBlock", bytes)],
        &[certificate, err],
    )?;

    let accept = b.sig(&[], &[net_conn, err]);
    let close = b.sig(&[], &[err]);
    let addr = b.sig(&[], &[net_addr]);
    let listener = b.interface(&[("Accept", accept), ("Close", close), ("Addr", addr)])?;
    b.func("NewListener", &[("inner", listener), ("config", config_ptr)], &[listener])?;
    b.func(
        "Listen",
        &[("network", Ty::STRING), ("laddr", Ty::STRING), ("config", config_ptr)],
        &[listener, err],
    )?;

    b.const_uint("VersionTLS10", Ty::UINT16, 0x0301)?;
    b.const_uint("VersionTLS11", Ty::UINT16, 0x0302)?;
    b.const_uint("VersionTLS12", Ty::UINT16, 0x0303)?;
    b.const_uint("VersionTLS13", Ty::UINT16, 0x0304)?;
    b.const_uint("VersionSSL30", Ty::UINT16, 0x0300)?;
    for &(name, id) in CIPHER_SUITES {
        b.const_uint(name, Ty::UINT16, id)?;
    }

    let shape = b.struct_type(&[
        ("ID", Ty::UINT16),
        ("Name", Ty::STRING),
        ("SupportedVersions", u16s),
        ("Insecure", Ty::BOOL),
    ]);
    let suite = b.named("CipherSuite", shape)?;
    let suite_ptr = b.ptr(suite);
    let suites = b.slice(suite_ptr);
    b.func("CipherSuites", &[], &[suites])?;
    b.func("InsecureCipherSuites", &[], &[suites])?;

    b.method(conn, Pointer, "SetDeadline", &[("t", Ty::INT64)], &[err])?;
    b.method(conn, Pointer, "SetReadDeadline", &[("t", Ty::INT64)], &[err])?;
    b.method(conn, Pointer, "SetWriteDeadline", &[("t", Ty::INT64)], &[err])?;
    b.method(conn, Pointer, "CloseWrite", &[], &[err])?;
    b.method(conn, Pointer, "LocalAddr", &[], &[net_addr])?;
    b.method(conn, Pointer, "RemoteAddr", &[], &[net_addr])?;
    b.method(config, Pointer, "BuildNameToCertificate", &[], &[])?;

    b.func("Server", &[("conn", net_conn), ("config", config_ptr)], &[conn_ptr])?;
    b.func("Client", &[("conn", net_conn), ("config", config_ptr)], &[conn_ptr])?;

    let shape = b.struct_type(&[("NetDialer", opaque), ("Config", config_ptr)]);
    let dialer = b.named("Dialer", shape)?;
    b.method(
        dialer,
        Pointer,
        "DialContext",
        &[("ctx", ctx), ("network", Ty::STRING), ("addr", Ty::STRING)],
        &[conn_ptr, err],
    )?;

    let renegotiation = b.named("RenegotiationSupport", Ty::INT)?;
    b.enumerate(
        renegotiation,
        &["RenegotiateNever", "RenegotiateOnceAsClient", "RenegotiateFreelyAsClient"],
        0,
    )?;
    b.method(
        dialer,
        Pointer,
        "Dial",
        &[("network", Ty::STRING), ("addr", Ty::STRING)],
        &[conn_ptr, err],
    )?;

    let alert = b.named("AlertError", Ty::UINT8)?;
    b.error_method(alert, Value)?;
    let header = b.array(Ty::BYTE, 5);
    let shape = b.struct_type(&[("Msg", Ty::STRING), ("RecordHeader", header), ("Conn", net_conn)]);
    let record_header = b.named("RecordHeaderError", shape)?;
    b.error_method(record_header, Value)?;
    let shape = b.struct_type(&[("UnverifiedCertificates", peer_certs), ("Err", err)]);
    let verification = b.named("CertificateVerificationError", shape)?;
    b.error_method(verification, Value)?;
    b.method(verification, Value, "Unwrap", &[], &[err])?;

    b.func("CipherSuiteName", &[("id", Ty::UINT16)], &[Ty::STRING])?;
    b.func("VersionName", &[("version", Ty::UINT16)], &[Ty::STRING])?;

    let scheme = b.named("SignatureScheme", Ty::UINT16)?;
    b.stringer(scheme)?;
    for &(name, id) in SIGNATURE_SCHEMES {
        b.const_uint(name, scheme, id)?;
    }
    b.method(
        conn_state,
        Pointer,
        "ExportKeyingMaterial",
        &[("label", Ty::STRING), ("context", bytes), ("length", Ty::INT)],
        &[bytes, err],
    )?;

    let empty = b.struct_type(&[]);
    let session = b.named("ClientSessionState", empty)?;
    let session_ptr = b.ptr(session);
    let get = b.sig(&[("sessionKey", Ty::STRING)], &[session_ptr, Ty::BOOL]);
    let put = b.sig(&[("sessionKey", Ty::STRING), ("cs", session_ptr)], &[]);
    let cache_iface = b.interface(&[("Get", get), ("Put", put)])?;
    let cache = b.named("ClientSessionCache", cache_iface)?;
    b.func("NewLRUClientSessionCache", &[("capacity", Ty::INT)], &[cache])?;
    b.finish()
}

//! `crypto/x509` and `crypto/x509/pkix`.

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::types::RecvKind::{Pointer, Value};
use crate::types::Ty;

fn consts(b: &mut PackageBuilder, ty: Ty, values: &[(&str, i64)]) -> Result<()> {
    for &(name, value) in values {
        b.const_int(name, ty, value)?;
    }
    Ok(())
}

pub fn x509() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/x509", "x509");
    let err = b.error();
    let any = b.any();
    let bytes = b.bytes();
    let reader = b.io_reader()?;
    let strings = b.slice(Ty::STRING);

    let key_usage = b.named("KeyUsage", Ty::INT)?;
    consts(
        &mut b,
        key_usage,
        &[
            ("KeyUsageDigitalSignature", 1),
            ("KeyUsageContentCommitment", 2),
            ("KeyUsageKeyEncipherment", 4),
            ("KeyUsageCertSign", 32),
            ("KeyUsageCRLSign", 64),
        ],
    )?;
    let ext_key_usage = b.named("ExtKeyUsage", Ty::INT)?;
    b.enumerate(
        ext_key_usage,
        &[
            "ExtKeyUsageAny",
            "ExtKeyUsageServerAuth",
            "ExtKeyUsageClientAuth",
            "ExtKeyUsageCodeSigning",
        ],
        0,
    )?;
    let sig_alg = b.named("SignatureAlgorithm", Ty::INT)?;
    consts(
        &mut b,
        sig_alg,
        &[
            ("SHA256WithRSA", 4),
            ("SHA384WithRSA", 5),
            ("SHA512WithRSA", 6),
            ("ECDSAWithSHA256", 7),
            ("ECDSAWithSHA384", 8),
            ("ECDSAWithSHA512", 9),
            ("PureEd25519", 16),
        ],
    )?;
    let pub_key_alg = b.named("PublicKeyAlgorithm", Ty::INT)?;
    b.enumerate(pub_key_alg, &["RSA", "DSA", "ECDSA", "Ed25519"], 1)?;

    let pkix_name = b.struct_type(&[
        ("CommonName", Ty::STRING),
        ("Organization", strings),
        ("OrganizationalUnit", strings),
        ("Country", strings),
        ("Province", strings),
        ("Locality", strings),
        ("SerialNumber", Ty::STRING),
    ]);
    let ext_key_usages = b.slice(ext_key_usage);
    let ip_addresses = b.slice(bytes);
    let shape = b.struct_type(&[
        ("Raw", bytes),
        ("RawTBSCertificate", bytes),
        ("RawSubjectPublicKeyInfo", bytes),
        ("RawSubject", bytes),
        ("RawIssuer", bytes),
        ("Signature", bytes),
        ("Subject", pkix_name),
        ("Issuer", pkix_name),
        ("NotBefore", Ty::INT64),
        ("NotAfter", Ty::INT64),
        ("KeyUsage", key_usage),
        ("ExtKeyUsage", ext_key_usages),
        ("IsCA", Ty::BOOL),
        ("BasicConstraintsValid", Ty::BOOL),
        ("MaxPathLen", Ty::INT),
        ("MaxPathLenZero", Ty::BOOL),
        ("DNSNames", strings),
        ("EmailAddresses", strings),
        ("IPAddresses", ip_addresses),
        ("SerialNumber", Ty::INT64),
        ("SignatureAlgorithm", sig_alg),
        ("PublicKeyAlgorithm", pub_key_alg),
        ("PublicKey", any),
        ("Version", Ty::INT),
        ("OCSPServer", strings),
        ("IssuingCertificateURL", strings),
        ("CRLDistributionPoints", strings),
        ("PermittedDNSDomains", strings),
        ("SubjectKeyId", bytes),
        ("AuthorityKeyId", bytes),
    ]);
    let cert = b.named("Certificate", shape)?;
    let cert_ptr = b.recv_ptr(cert);

    let shape = b.struct_type(&[("data", Ty::INT)]);
    let pool = b.named("CertPool", shape)?;
    let pool_ptr = b.recv_ptr(pool);
    b.method(pool, Pointer, "AppendCertsFromPEM", &[("pemCerts", bytes)], &[Ty::BOOL])?;
    b.method(pool, Pointer, "AddCert", &[("cert", cert_ptr)], &[])?;
    b.method(pool, Pointer, "Subjects", &[], &[ip_addresses])?;
    b.method(pool, Pointer, "Clone", &[], &[pool_ptr])?;
    b.method(pool, Pointer, "Equal", &[("other", pool_ptr)], &[Ty::BOOL])?;
    b.func("NewCertPool", &[], &[pool_ptr])?;

    let shape = b.struct_type(&[
        ("DNSName", Ty::STRING),
        ("Roots", pool_ptr),
        ("Intermediates", pool_ptr),
        ("CurrentTime", Ty::INT64),
        ("KeyUsages", ext_key_usages),
        ("MaxConstraintComparisions", Ty::INT),
    ]);
    let verify_opts = b.named("VerifyOptions", shape)?;
    let certs = b.slice(cert_ptr);
    let chains = b.slice(certs);
    b.method(cert, Pointer, "Verify", &[("opts", verify_opts)], &[chains, err])?;
    b.method(cert, Pointer, "Equal", &[("other", cert_ptr)], &[Ty::BOOL])?;
    b.func("ParseCertificate", &[("asn1Data", bytes)], &[cert_ptr, err])?;
    b.func("ParseCertificates", &[("asn1Data", bytes)], &[certs, err])?;

    let rsa_key = b.opaque();
    b.func("ParsePKCS1PrivateKey", &[("der", bytes)], &[rsa_key, err])?;
    b.func("ParsePKCS1PublicKey", &[("der", bytes)], &[rsa_key, err])?;
    b.func("MarshalPKCS1PublicKey", &[("key", rsa_key)], &[bytes])?;
    b.func("ParsePKCS8PrivateKey", &[("der", bytes)], &[any, err])?;
    b.func("ParsePKIXPublicKey", &[("derBytes", bytes)], &[any, err])?;
    b.func("MarshalPKIXPublicKey", &[("pub", any)], &[bytes, err])?;
    b.func("SystemCertPool", &[], &[pool_ptr, err])?;

    let shape = b.struct_type(&[("Cert", cert_ptr), ("Reason", Ty::INT)]);
    let invalid = b.named("CertificateInvalidError", shape)?;
    b.error_method(invalid, Value)?;
    let shape = b.struct_type(&[("Cert", cert_ptr)]);
    let unknown_authority = b.named("UnknownAuthorityError", shape)?;
    b.error_method(unknown_authority, Value)?;

    let shape = b.struct_type(&[
        ("Raw", bytes),
        ("RawSubject", bytes),
        ("Subject", Ty::STRING),
        ("DNSNames", strings),
        ("EmailAddresses", strings),
        ("SignatureAlgorithm", sig_alg),
        ("PublicKeyAlgorithm", pub_key_alg),
        ("PublicKey", any),
    ]);
    let request = b.named("CertificateRequest", shape)?;
    let request_ptr = b.ptr(request);
    b.func(
        "CreateCertificate",
        &[
            ("rand", reader),
            ("template", cert_ptr),
            ("parent", cert_ptr),
            ("pub", any),
            ("priv", any),
        ],
        &[bytes, err],
    )?;
    b.func(
        "CreateCertificateRequest",
        &[("rand", reader), ("template", request_ptr), ("priv", any)],
        &[bytes, err],
    )?;
    b.func("ParseCertificateRequest", &[("asn1Data", bytes)], &[request_ptr, err])?;
    b.func("MarshalPKCS1PrivateKey", &[("key", rsa_key)], &[bytes])?;
    b.func("MarshalPKCS8PrivateKey", &[("key", any)], &[bytes, err])?;
    b.func("MarshalECPrivateKey", &[("key", any)], &[bytes, err])?;
    b.func("ParseECPrivateKey", &[("der", bytes)], &[any, err])?;

    b.method(cert, Pointer, "CheckSignatureFrom", &[("parent", cert_ptr)], &[err])?;
    b.method(
        cert,
        Pointer,
        "CheckSignature",
        &[("algo", sig_alg), ("signed", bytes), ("signature", bytes)],
        &[err],
    )?;
    b.method(cert, Pointer, "VerifyHostname", &[("h", Ty::STRING)], &[err])?;

    consts(
        &mut b,
        key_usage,
        &[("KeyUsageDataEncipherment", 8), ("KeyUsageKeyAgreement", 16)],
    )?;
    consts(
        &mut b,
        ext_key_usage,
        &[
            ("ExtKeyUsageEmailProtection", 4),
            ("ExtKeyUsageTimeStamping", 8),
            ("ExtKeyUsageOCSPSigning", 9),
        ],
    )?;

    let empty = b.struct_type(&[]);
    let extensions = b.slice(empty);
    let big_int = b.opaque();
    let shape = b.struct_type(&[
        ("SerialNumber", big_int),
        ("RevocationTime", Ty::INT64),
        ("ReasonCode", Ty::INT),
        ("Extensions", extensions),
        ("ExtraExtensions", extensions),
    ]);
    let entry = b.named("RevocationListEntry", shape)?;
    let entries = b.slice(entry);
    let shape = b.struct_type(&[
        ("Raw", bytes),
        ("RawIssuer", bytes),
        ("Issuer", empty),
        ("AuthorityKeyId", bytes),
        ("SignatureAlgorithm", sig_alg),
        ("Signature", bytes),
        ("RevokedCertificateEntries", entries),
        ("Number", big_int),
        ("ThisUpdate", Ty::INT64),
        ("NextUpdate", Ty::INT64),
        ("Extensions", extensions),
        ("ExtraExtensions", extensions),
    ]);
    let list = b.named("RevocationList", shape)?;
    let list_ptr = b.recv_ptr(list);
    b.method(list, Pointer, "CheckSignatureFrom", &[("parent", cert_ptr)], &[err])?;
    b.func("ParseRevocationList", &[("der", bytes)], &[list_ptr, err])?;

    let public = b.sig(&[], &[any]);
    let sign = b.sig(
        &[("rand", reader), ("digest", bytes), ("opts", any)],
        &[bytes, err],
    );
    let signer = b.interface(&[("Public", public), ("Sign", sign)])?;
    b.func(
        "CreateRevocationList",
        &[
            ("rand", reader),
            ("template", list_ptr),
            ("issuer", cert_ptr),
            ("priv", signer),
        ],
        &[bytes, err],
    )?;

    let shape = b.struct_type(&[("Certificate", cert_ptr), ("Host", Ty::STRING)]);
    let hostname = b.named("HostnameError", shape)?;
    b.error_method(hostname, Value)?;

    let reason = b.named("InvalidReason", Ty::INT)?;
    consts(
        &mut b,
        reason,
        &[
            ("NotAuthorizedToSign", 0),
            ("Expired", 1),
            ("CANotAuthorizedForThisName", 2),
            ("TooManyIntermediates", 3),
            ("IncompatibleUsage", 4),
            ("NameMismatch", 7),
            ("NameConstraintsWithoutSANs", 8),
            ("UnconstrainedName", 9),
        ],
    )?;
    b.error_vars(&[
        "ErrUnsupportedAlgorithm",
        "IncorrectPasswordError",
        "ErrInsecureAlgorithm",
    ])?;
    consts(
        &mut b,
        sig_alg,
        &[
            ("UnknownSignatureAlgorithm", 0),
            ("MD2WithRSA", 1),
            ("MD5WithRSA", 2),
            ("SHA1WithRSA", 3),
            ("SHA256WithRSAPSS", 13),
            ("SHA384WithRSAPSS", 14),
            ("SHA512WithRSAPSS", 15),
            ("ECDSAWithSHA1", 10),
        ],
    )?;
    consts(
        &mut b,
        key_usage,
        &[("KeyUsageEncipherOnly", 128), ("KeyUsageDecipherOnly", 256)],
    )?;

    let shape = b.struct_type(&[("Err", err)]);
    let system_roots = b.named("SystemRootsError", shape)?;
    b.error_method(system_roots, Value)?;
    b.method(system_roots, Value, "Unwrap", &[], &[err])?;
    for name in ["UnhandledCriticalExtension", "ConstraintViolationError"] {
        let empty = b.struct_type(&[]);
        let named = b.named(name, empty)?;
        b.error_method(named, Value)?;
    }
    b.finish()
}

pub fn pkix() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/x509/pkix", "pkix");
    let any = b.any();
    let bytes = b.bytes();
    let strings = b.slice(Ty::STRING);

    // Name refers to AttributeTypeAndValue before its shape is known.
    let atv = b.declare("AttributeTypeAndValue")?;
    let atvs = b.slice(atv);
    let shape = b.struct_type(&[
        ("Country", strings),
        ("Organization", strings),
        ("OrganizationalUnit", strings),
        ("Locality", strings),
        ("Province", strings),
        ("StreetAddress", strings),
        ("PostalCode", strings),
        ("SerialNumber", Ty::STRING),
        ("CommonName", Ty::STRING),
        ("Names", atvs),
        ("ExtraNames", atvs),
    ]);
    let name = b.named("Name", shape)?;
    b.stringer(name)?;

    let oid = b.slice(Ty::INT);
    let raw_value = b.struct_type(&[
        ("Tag", Ty::INT),
        ("Class", Ty::INT),
        ("IsCompound", Ty::BOOL),
        ("Bytes", bytes),
        ("FullBytes", bytes),
    ]);
    let shape = b.struct_type(&[("Algorithm", oid), ("Parameters", raw_value)]);
    let algorithm = b.named("AlgorithmIdentifier", shape)?;
    let shape = b.struct_type(&[("Id", oid), ("Critical", Ty::BOOL), ("Value", bytes)]);
    let extension = b.named("Extension", shape)?;

    let shape = b.struct_type(&[("Type", oid), ("Value", any)]);
    b.set_underlying(atv, shape)?;

    let rdn_set = b.named("RelativeDistinguishedNameSET", atvs)?;
    let rdn_sets = b.slice(rdn_set);
    let rdn_seq = b.named("RDNSequence", rdn_sets)?;
    b.stringer(rdn_seq)?;
    let rdn_seq_ptr = b.ptr(rdn_seq);
    b.method(name, Pointer, "FillFromRDNSequence", &[("rdns", rdn_seq_ptr)], &[])?;
    b.method(name, Value, "ToRDNSequence", &[], &[rdn_seq])?;

    let values = b.slice(atvs);
    let shape = b.struct_type(&[("Type", oid), ("Value", values)]);
    b.named("AttributeTypeAndValueSET", shape)?;

    let tbs = b.struct_type(&[
        ("Raw", raw_value),
        ("Version", Ty::INT),
        ("Signature", algorithm),
        ("Issuer", rdn_seq),
    ]);
    let bit_string = b.struct_type(&[("Bytes", bytes), ("BitLength", Ty::INT)]);
    let shape = b.struct_type(&[
        ("TBSCertList", tbs),
        ("SignatureAlgorithm", algorithm),
        ("SignatureValue", bit_string),
    ]);
    let cert_list = b.named("CertificateList", shape)?;
    b.method(cert_list, Pointer, "HasExpired", &[("now", Ty::INT64)], &[Ty::BOOL])?;

    let extensions = b.slice(extension);
    let shape = b.struct_type(&[
        ("SerialNumber", Ty::INT64),
        ("RevocationTime", Ty::INT64),
        ("Extensions", extensions),
    ]);
    b.named("RevokedCertificate", shape)?;
    b.finish()
}

//! The `math` family.

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::registry::Registry;
use crate::types::RecvKind::{Pointer, Value};
use crate::types::Ty;

pub(crate) fn register(registry: &mut Registry) {
    registry.register("math", math);
    registry.register("math/big", big);
    registry.register("math/bits", bits);
    registry.register("math/cmplx", cmplx);
    registry.register("math/rand", rand);
    registry.register("math/rand/v2", rand_v2);
}

pub fn math() -> Result<Package> {
    let mut b = PackageBuilder::new("math", "math");
    let f64 = Ty::FLOAT64;

    b.func("Abs", &[("x", f64)], &[f64])?;
    b.func("Sqrt", &[("x", f64)], &[f64])?;
    b.func("Min", &[("x", f64), ("y", f64)], &[f64])?;
    b.func("Max", &[("x", f64), ("y", f64)], &[f64])?;
    for name in [
        "Floor", "Ceil", "Round", "Trunc", "Log", "Log2", "Log10", "Exp", "Sin", "Cos", "Tan",
    ] {
        b.func(name, &[("x", f64)], &[f64])?;
    }
    for name in [
        "Pow", "Mod", "Remainder", "Dim", "Copysign", "Atan2", "Hypot", "Nextafter",
    ] {
        b.func(name, &[("x", f64), ("y", f64)], &[f64])?;
    }
    b.func("Nextafter32", &[("x", Ty::FLOAT32), ("y", Ty::FLOAT32)], &[Ty::FLOAT32])?;
    for name in [
        "Asin", "Acos", "Atan", "Sinh", "Cosh", "Tanh", "Asinh", "Acosh", "Atanh", "Exp2",
        "Expm1", "Log1p", "Logb", "Cbrt", "Erf", "Erfc", "Erfcinv", "Erfinv", "Gamma", "J0", "J1",
        "Y0", "Y1", "RoundToEven",
    ] {
        b.func(name, &[("x", f64)], &[f64])?;
    }
    b.func("Pow10", &[("n", Ty::INT)], &[f64])?;
    b.func("Ilogb", &[("x", f64)], &[Ty::INT])?;
    b.func("Ldexp", &[("frac", f64), ("exp", Ty::INT)], &[f64])?;
    b.func("Frexp", &[("f", f64)], &[f64, Ty::INT])?;
    b.func("Modf", &[("f", f64)], &[f64, f64])?;
    b.func("Sincos", &[("x", f64)], &[f64, f64])?;
    b.func("Lgamma", &[("x", f64)], &[f64, Ty::INT])?;
    b.func("Jn", &[("n", Ty::INT), ("x", f64)], &[f64])?;
    b.func("Yn", &[("n", Ty::INT), ("x", f64)], &[f64])?;
    b.func("FMA", &[("x", f64), ("y", f64), ("z", f64)], &[f64])?;
    b.func("Float32bits", &[("f", Ty::FLOAT32)], &[Ty::UINT32])?;
    b.func("Float32frombits", &[("b", Ty::UINT32)], &[Ty::FLOAT32])?;
    b.func("Inf", &[("sign", Ty::INT)], &[f64])?;
    b.func("NaN", &[], &[f64])?;
    b.func("IsNaN", &[("f", f64)], &[Ty::BOOL])?;
    b.func("IsInf", &[("f", f64), ("sign", Ty::INT)], &[Ty::BOOL])?;
    b.func("Signbit", &[("x", f64)], &[Ty::BOOL])?;
    b.func("Float64bits", &[("f", f64)], &[Ty::UINT64])?;
    b.func("Float64frombits", &[("b", Ty::UINT64)], &[f64])?;

    for (name, value) in [
        ("Pi", std::f64::consts::PI),
        ("E", std::f64::consts::E),
        ("Phi", 1.618_033_988_749_895),
        ("Ln2", std::f64::consts::LN_2),
        ("Ln10", std::f64::consts::LN_10),
        ("Log2E", std::f64::consts::LOG2_E),
        ("Log10E", std::f64::consts::LOG10_E),
        ("MaxFloat64", f64::MAX),
        ("SmallestNonzeroFloat64", 5e-324),
        ("MaxFloat32", f64::from(f32::MAX)),
        ("SmallestNonzeroFloat32", 1.401_298_464_324_817e-45),
    ] {
        b.const_float(name, Ty::UNTYPED_FLOAT, value)?;
    }
    for (name, value) in [
        ("MaxInt", i64::MAX),
        ("MinInt", i64::MIN),
        ("MaxInt8", i64::from(i8::MAX)),
        ("MinInt8", i64::from(i8::MIN)),
        ("MaxInt16", i64::from(i16::MAX)),
        ("MinInt16", i64::from(i16::MIN)),
        ("MaxInt32", i64::from(i32::MAX)),
        ("MinInt32", i64::from(i32::MIN)),
        ("MaxInt64", i64::MAX),
        ("MaxUint8", i64::from(u8::MAX)),
        ("MaxUint16", i64::from(u16::MAX)),
        ("MaxUint32", i64::from(u32::MAX)),
    ] {
        b.const_int(name, Ty::UNTYPED_INT, value)?;
    }
    for (name, value) in [
        ("Sqrt2", std::f64::consts::SQRT_2),
        ("SqrtE", 1.648_721_270_700_128_2),
        ("SqrtPi", 1.772_453_850_905_516),
        ("SqrtPhi", 1.272_019_649_514_069),
    ] {
        b.const_float(name, Ty::UNTYPED_FLOAT, value)?;
    }
    b.finish()
}

pub fn big() -> Result<Package> {
    let mut b = PackageBuilder::new("math/big", "big");
    let bytes = b.bytes();

    let shape = b.struct_type(&[("val", Ty::INT64)]);
    let int = b.named("Int", shape)?;
    let int_ptr = b.recv_ptr(int);
    b.func("NewInt", &[("x", Ty::INT64)], &[int_ptr])?;
    let shape = b.struct_type(&[("val", Ty::FLOAT64)]);
    let float = b.named("Float", shape)?;
    let float_ptr = b.recv_ptr(float);
    b.func("NewFloat", &[("x", Ty::FLOAT64)], &[float_ptr])?;
    let shape = b.struct_type(&[("num", Ty::INT64), ("den", Ty::INT64)]);
    let rat = b.named("Rat", shape)?;
    let rat_ptr = b.recv_ptr(rat);
    b.func("NewRat", &[("a", Ty::INT64), ("b", Ty::INT64)], &[rat_ptr])?;
    let accuracy = b.named("Accuracy", Ty::INT8)?;
    let rounding = b.named("RoundingMode", Ty::BYTE)?;

    let binary = [("x", int_ptr), ("y", int_ptr)];
    for name in ["Add", "Sub", "Mul", "Div", "Mod"] {
        b.method(int, Pointer, name, &binary, &[int_ptr])?;
    }
    b.method(int, Pointer, "Cmp", &[("y", int_ptr)], &[Ty::INT])?;
    b.method(int, Pointer, "Int64", &[], &[Ty::INT64])?;
    b.method(int, Pointer, "SetInt64", &[("x", Ty::INT64)], &[int_ptr])?;
    b.method(
        int,
        Pointer,
        "SetString",
        &[("s", Ty::STRING), ("base", Ty::INT)],
        &[int_ptr, Ty::BOOL],
    )?;
    b.method(int, Pointer, "String", &[], &[Ty::STRING])?;
    b.method(int, Pointer, "Bytes", &[], &[bytes])?;
    b.method(int, Pointer, "SetBytes", &[("buf", bytes)], &[int_ptr])?;
    b.method(int, Pointer, "Sign", &[], &[Ty::INT])?;
    for name in ["Abs", "Neg", "Set"] {
        b.method(int, Pointer, name, &[("x", int_ptr)], &[int_ptr])?;
    }
    b.method(int, Pointer, "IsInt64", &[], &[Ty::BOOL])?;
    b.method(int, Pointer, "CmpAbs", &[("y", int_ptr)], &[Ty::INT])?;
    b.method(int, Pointer, "Float64", &[], &[Ty::FLOAT64, accuracy])?;
    b.method(int, Pointer, "BitLen", &[], &[Ty::INT])?;
    b.method(
        int,
        Pointer,
        "Exp",
        &[("x", int_ptr), ("y", int_ptr), ("m", int_ptr)],
        &[int_ptr],
    )?;
    b.method(
        int,
        Pointer,
        "GCD",
        &[("x", int_ptr), ("y", int_ptr), ("a", int_ptr), ("b", int_ptr)],
        &[int_ptr],
    )?;
    let err = b.error();
    b.method(int, Pointer, "Quo", &binary, &[int_ptr])?;
    b.method(int, Pointer, "Rem", &binary, &[int_ptr])?;
    b.method(
        int,
        Pointer,
        "DivMod",
        &[("x", int_ptr), ("y", int_ptr), ("m", int_ptr)],
        &[int_ptr, int_ptr],
    )?;
    b.method(
        int,
        Pointer,
        "QuoRem",
        &[("x", int_ptr), ("y", int_ptr), ("r", int_ptr)],
        &[int_ptr, int_ptr],
    )?;
    b.method(int, Pointer, "ModInverse", &binary, &[int_ptr])?;
    b.method(int, Pointer, "ModSqrt", &binary, &[int_ptr])?;
    b.method(int, Pointer, "Lsh", &[("x", int_ptr), ("n", Ty::UINT)], &[int_ptr])?;
    b.method(int, Pointer, "Rsh", &[("x", int_ptr), ("n", Ty::UINT)], &[int_ptr])?;
    for name in ["And", "Or", "Xor", "AndNot"] {
        b.method(int, Pointer, name, &binary, &[int_ptr])?;
    }
    b.method(int, Pointer, "Not", &[("x", int_ptr)], &[int_ptr])?;
    b.method(int, Pointer, "Bit", &[("i", Ty::INT)], &[Ty::UINT])?;
    b.method(
        int,
        Pointer,
        "SetBit",
        &[("x", int_ptr), ("i", Ty::INT), ("b", Ty::UINT)],
        &[int_ptr],
    )?;
    b.method(int, Pointer, "TrailingZeroBits", &[], &[Ty::UINT])?;
    b.method(int, Pointer, "Uint64", &[], &[Ty::UINT64])?;
    b.method(int, Pointer, "IsUint64", &[], &[Ty::BOOL])?;
    b.method(int, Pointer, "SetUint64", &[("x", Ty::UINT64)], &[int_ptr])?;
    b.method(int, Pointer, "FillBytes", &[("buf", bytes)], &[bytes])?;
    b.method(int, Pointer, "Sqrt", &[("x", int_ptr)], &[int_ptr])?;
    b.method(int, Pointer, "Text", &[("base", Ty::INT)], &[Ty::STRING])?;
    b.method(int, Pointer, "Append", &[("buf", bytes), ("base", Ty::INT)], &[bytes])?;
    let words = b.slice(Ty::UINTPTR);
    b.method(int, Pointer, "Bits", &[], &[words])?;
    b.method(int, Pointer, "SetBits", &[("abs", words)], &[int_ptr])?;
    let rng = b.opaque();
    b.method(int, Pointer, "Rand", &[("rng", rng), ("n", int_ptr)], &[int_ptr])?;
    b.method(int, Pointer, "ProbablyPrime", &[("n", Ty::INT)], &[Ty::BOOL])?;
    b.method(int, Pointer, "Binomial", &[("n", Ty::INT64), ("k", Ty::INT64)], &[int_ptr])?;
    b.method(int, Pointer, "MulRange", &[("a", Ty::INT64), ("b", Ty::INT64)], &[int_ptr])?;
    b.method(int, Pointer, "MarshalJSON", &[], &[bytes, err])?;
    b.method(int, Pointer, "UnmarshalJSON", &[("text", bytes)], &[err])?;
    b.method(int, Pointer, "MarshalText", &[], &[bytes, err])?;
    b.method(int, Pointer, "UnmarshalText", &[("text", bytes)], &[err])?;
    b.func("Jacobi", &[("x", int_ptr), ("y", int_ptr)], &[Ty::INT])?;

    let binary = [("x", float_ptr), ("y", float_ptr)];
    for name in ["Add", "Sub", "Mul", "Quo"] {
        b.method(float, Pointer, name, &binary, &[float_ptr])?;
    }
    b.method(float, Pointer, "Cmp", &[("y", float_ptr)], &[Ty::INT])?;
    b.method(float, Pointer, "Float64", &[], &[Ty::FLOAT64, accuracy])?;
    b.method(float, Pointer, "SetFloat64", &[("x", Ty::FLOAT64)], &[float_ptr])?;
    b.method(float, Pointer, "String", &[], &[Ty::STRING])?;
    b.method(float, Pointer, "SetPrec", &[("prec", Ty::UINT)], &[float_ptr])?;
    b.method(float, Pointer, "Sign", &[], &[Ty::INT])?;
    for name in ["IsInf", "IsInt", "Signbit"] {
        b.method(float, Pointer, name, &[], &[Ty::BOOL])?;
    }
    b.method(float, Pointer, "Copy", &[("x", float_ptr)], &[float_ptr])?;
    b.method(float, Pointer, "MantExp", &[("mant", float_ptr)], &[Ty::INT])?;
    b.method(
        float,
        Pointer,
        "SetMantExp",
        &[("mant", float_ptr), ("exp", Ty::INT)],
        &[float_ptr],
    )?;
    b.method(float, Pointer, "Int64", &[], &[Ty::INT64, accuracy])?;
    b.method(float, Pointer, "Uint64", &[], &[Ty::UINT64, accuracy])?;
    b.method(float, Pointer, "Sqrt", &[("x", float_ptr)], &[float_ptr])?;
    b.method(float, Pointer, "Set", &[("x", float_ptr)], &[float_ptr])?;
    b.method(float, Pointer, "SetInt", &[("x", int_ptr)], &[float_ptr])?;
    b.method(float, Pointer, "SetRat", &[("x", rat_ptr)], &[float_ptr])?;
    b.method(float, Pointer, "SetMode", &[("mode", rounding)], &[float_ptr])?;
    b.method(float, Pointer, "Mode", &[], &[rounding])?;
    b.method(float, Pointer, "Prec", &[], &[Ty::UINT])?;
    b.method(float, Pointer, "MinPrec", &[], &[Ty::UINT])?;
    b.method(float, Pointer, "Acc", &[], &[accuracy])?;
    b.method(float, Pointer, "Abs", &[("x", float_ptr)], &[float_ptr])?;
    b.method(float, Pointer, "Neg", &[("x", float_ptr)], &[float_ptr])?;
    b.method(float, Pointer, "Float32", &[], &[Ty::FLOAT32, accuracy])?;
    b.method(float, Pointer, "Int", &[("z", int_ptr)], &[int_ptr, accuracy])?;
    b.method(float, Pointer, "Rat", &[("z", rat_ptr)], &[rat_ptr, accuracy])?;
    b.method(float, Pointer, "SetInf", &[("signbit", Ty::BOOL)], &[float_ptr])?;
    b.method(float, Pointer, "SetInt64", &[("x", Ty::INT64)], &[float_ptr])?;
    b.method(float, Pointer, "SetUint64", &[("x", Ty::UINT64)], &[float_ptr])?;
    b.method(
        float,
        Pointer,
        "Text",
        &[("format", Ty::BYTE), ("prec", Ty::INT)],
        &[Ty::STRING],
    )?;
    b.method(
        float,
        Pointer,
        "Append",
        &[("buf", bytes), ("fmt", Ty::BYTE), ("prec", Ty::INT)],
        &[bytes],
    )?;
    b.method(float, Pointer, "SetString", &[("s", Ty::STRING)], &[float_ptr, Ty::BOOL])?;
    b.method(
        float,
        Pointer,
        "Parse",
        &[("s", Ty::STRING), ("base", Ty::INT)],
        &[float_ptr, Ty::INT, err],
    )?;
    b.method(float, Pointer, "MarshalText", &[], &[bytes, err])?;
    b.method(float, Pointer, "UnmarshalText", &[("text", bytes)], &[err])?;
    b.method(float, Pointer, "GobEncode", &[], &[bytes, err])?;
    b.method(float, Pointer, "GobDecode", &[("buf", bytes)], &[err])?;
    b.func(
        "ParseFloat",
        &[
            ("s", Ty::STRING),
            ("base", Ty::INT),
            ("prec", Ty::UINT),
            ("mode", rounding),
        ],
        &[float_ptr, Ty::INT, err],
    )?;

    b.enumerate(
        rounding,
        &[
            "ToNearestEven",
            "ToNearestAway",
            "ToZero",
            "AwayFromZero",
            "ToNegativeInf",
            "ToPositiveInf",
        ],
        0,
    )?;
    b.enumerate(accuracy, &["Below", "Exact", "Above"], -1)?;
    b.stringer(accuracy)?;
    b.stringer(rounding)?;

    let binary = [("x", rat_ptr), ("y", rat_ptr)];
    for name in ["Add", "Sub", "Mul", "Quo"] {
        b.method(rat, Pointer, name, &binary, &[rat_ptr])?;
    }
    b.method(rat, Pointer, "Cmp", &[("y", rat_ptr)], &[Ty::INT])?;
    b.method(rat, Pointer, "Sign", &[], &[Ty::INT])?;
    b.method(rat, Pointer, "IsInt", &[], &[Ty::BOOL])?;
    b.method(rat, Pointer, "Num", &[], &[int_ptr])?;
    b.method(rat, Pointer, "Denom", &[], &[int_ptr])?;
    b.method(rat, Pointer, "Float32", &[], &[Ty::FLOAT32, Ty::BOOL])?;
    b.method(rat, Pointer, "Float64", &[], &[Ty::FLOAT64, Ty::BOOL])?;
    b.method(rat, Pointer, "SetInt", &[("x", int_ptr)], &[rat_ptr])?;
    b.method(rat, Pointer, "SetFrac", &[("a", int_ptr), ("b", int_ptr)], &[rat_ptr])?;
    b.method(
        rat,
        Pointer,
        "SetFrac64",
        &[("a", Ty::INT64), ("b", Ty::INT64)],
        &[rat_ptr],
    )?;
    b.method(rat, Pointer, "SetInt64", &[("x", Ty::INT64)], &[rat_ptr])?;
    b.method(rat, Pointer, "SetFloat64", &[("f", Ty::FLOAT64)], &[rat_ptr])?;
    b.method(rat, Pointer, "SetString", &[("s", Ty::STRING)], &[rat_ptr, Ty::BOOL])?;
    for name in ["Set", "Inv", "Neg", "Abs"] {
        b.method(rat, Pointer, name, &[("x", rat_ptr)], &[rat_ptr])?;
    }
    b.method(rat, Pointer, "String", &[], &[Ty::STRING])?;
    b.method(rat, Pointer, "RatString", &[], &[Ty::STRING])?;
    b.method(rat, Pointer, "FloatString", &[("prec", Ty::INT)], &[Ty::STRING])?;
    b.method(rat, Pointer, "MarshalText", &[], &[bytes, err])?;
    b.method(rat, Pointer, "UnmarshalText", &[("text", bytes)], &[err])?;
    b.method(rat, Pointer, "GobEncode", &[], &[bytes, err])?;
    b.method(rat, Pointer, "GobDecode", &[("buf", bytes)], &[err])?;

    b.alias("Word", Ty::UINTPTR)?;
    let shape = b.struct_type(&[("msg", Ty::STRING)]);
    let err_nan = b.named("ErrNaN", shape)?;
    b.error_method(err_nan, Value)?;
    b.const_int("MaxBase", Ty::INT, 62)?;
    b.const_int("MaxExp", Ty::INT32, i64::from(i32::MAX))?;
    b.const_int("MinExp", Ty::INT32, i64::from(i32::MIN))?;
    b.const_uint("MaxPrec", Ty::UINT, u64::from(u32::MAX))?;
    b.finish()
}

pub fn bits() -> Result<Package> {
    let mut b = PackageBuilder::new("math/bits", "bits");

    for name in ["OnesCount", "LeadingZeros", "TrailingZeros", "Len"] {
        b.func(name, &[("x", Ty::UINT)], &[Ty::INT])?;
    }
    for name in ["OnesCount64", "LeadingZeros64", "TrailingZeros64", "Len64"] {
        b.func(name, &[("x", Ty::UINT64)], &[Ty::INT])?;
    }
    b.func("RotateLeft", &[("x", Ty::UINT), ("k", Ty::INT)], &[Ty::UINT])?;
    b.func("RotateLeft64", &[("x", Ty::UINT64), ("k", Ty::INT)], &[Ty::UINT64])?;
    b.func("ReverseBytes64", &[("x", Ty::UINT64)], &[Ty::UINT64])?;
    b.func("Reverse64", &[("x", Ty::UINT64)], &[Ty::UINT64])?;
    b.const_int("UintSize", Ty::INT, 64)?;
    b.finish()
}

pub fn cmplx() -> Result<Package> {
    let mut b = PackageBuilder::new("math/cmplx", "cmplx");
    let c128 = Ty::COMPLEX128;
    let f64 = Ty::FLOAT64;

    for name in [
        "Sqrt", "Exp", "Log", "Sin", "Cos", "Tan", "Asin", "Acos", "Atan", "Sinh", "Cosh", "Tanh",
        "Conj", "Log10", "Log2",
    ] {
        b.func(name, &[("x", c128)], &[c128])?;
    }
    for name in ["Abs", "Phase"] {
        b.func(name, &[("x", c128)], &[f64])?;
    }
    b.func("Polar", &[("x", c128)], &[f64, f64])?;
    b.func("Rect", &[("r", f64), ("theta", f64)], &[c128])?;
    b.func("Pow", &[("x", c128), ("y", c128)], &[c128])?;
    b.func("Inf", &[], &[c128])?;
    b.func("NaN", &[], &[c128])?;
    b.func("IsNaN", &[("x", c128)], &[Ty::BOOL])?;
    b.func("IsInf", &[("x", c128)], &[Ty::BOOL])?;
    b.finish()
}

/// `func(i, j int)`, the `Shuffle` callback.
fn swap_fn(b: &mut PackageBuilder) -> Ty {
    b.sig(&[("i", Ty::INT), ("j", Ty::INT)], &[])
}

pub fn rand() -> Result<Package> {
    let mut b = PackageBuilder::new("math/rand", "rand");
    let bytes = b.bytes();
    let err = b.error();

    let int63 = b.sig(&[], &[Ty::INT64]);
    let seed = b.sig(&[("seed", Ty::INT64)], &[]);
    let source_iface = b.interface(&[("Int63", int63), ("Seed", seed)])?;
    b.named("Source", source_iface)?;
    let int63 = b.sig(&[], &[Ty::INT64]);
    let seed = b.sig(&[("seed", Ty::INT64)], &[]);
    let uint64 = b.sig(&[], &[Ty::UINT64]);
    let iface = b.interface(&[("Int63", int63), ("Seed", seed), ("Uint64", uint64)])?;
    b.named("Source64", iface)?;

    let shape = b.struct_type(&[("src", source_iface)]);
    let rand = b.named("Rand", shape)?;
    let rand_ptr = b.recv_ptr(rand);
    let ints = b.slice(Ty::INT);
    let swap = swap_fn(&mut b);

    let generators: [(&str, &[(&str, Ty)], Ty); 12] = [
        ("Int", &[], Ty::INT),
        ("Intn", &[("n", Ty::INT)], Ty::INT),
        ("Int31", &[], Ty::INT32),
        ("Int31n", &[("n", Ty::INT32)], Ty::INT32),
        ("Int63", &[], Ty::INT64),
        ("Int63n", &[("n", Ty::INT64)], Ty::INT64),
        ("Uint32", &[], Ty::UINT32),
        ("Uint64", &[], Ty::UINT64),
        ("Float32", &[], Ty::FLOAT32),
        ("Float64", &[], Ty::FLOAT64),
        ("NormFloat64", &[], Ty::FLOAT64),
        ("ExpFloat64", &[], Ty::FLOAT64),
    ];
    for &(name, params, result) in &generators {
        b.method(rand, Pointer, name, params, &[result])?;
    }
    b.method(rand, Pointer, "Perm", &[("n", Ty::INT)], &[ints])?;
    b.method(rand, Pointer, "Shuffle", &[("n", Ty::INT), ("swap", swap)], &[])?;
    b.method(rand, Pointer, "Seed", &[("seed", Ty::INT64)], &[])?;
    b.method(rand, Pointer, "Read", &[("p", bytes)], &[Ty::INT, err])?;

    b.func("New", &[("src", source_iface)], &[rand_ptr])?;
    b.func("NewSource", &[("seed", Ty::INT64)], &[source_iface])?;
    b.func("Intn", &[("n", Ty::INT)], &[Ty::INT])?;
    b.func("Int", &[], &[Ty::INT])?;
    b.func("Float64", &[], &[Ty::FLOAT64])?;
    b.func("Float32", &[], &[Ty::FLOAT32])?;
    b.func("Seed", &[("seed", Ty::INT64)], &[])?;
    b.func("Int31", &[], &[Ty::INT32])?;
    b.func("Int31n", &[("n", Ty::INT32)], &[Ty::INT32])?;
    b.func("Int63", &[], &[Ty::INT64])?;
    b.func("Int63n", &[("n", Ty::INT64)], &[Ty::INT64])?;
    b.func("Uint32", &[], &[Ty::UINT32])?;
    b.func("Uint64", &[], &[Ty::UINT64])?;
    b.func("NormFloat64", &[], &[Ty::FLOAT64])?;
    b.func("ExpFloat64", &[], &[Ty::FLOAT64])?;
    b.func("Perm", &[("n", Ty::INT)], &[ints])?;
    b.func("Shuffle", &[("n", Ty::INT), ("swap", swap)], &[])?;
    b.func("Read", &[("p", bytes)], &[Ty::INT, err])?;

    let shape = b.struct_type(&[("r", rand_ptr)]);
    let zipf = b.named("Zipf", shape)?;
    let zipf_ptr = b.recv_ptr(zipf);
    b.method(zipf, Pointer, "Uint64", &[], &[Ty::UINT64])?;
    b.func(
        "NewZipf",
        &[
            ("r", rand_ptr),
            ("s", Ty::FLOAT64),
            ("v", Ty::FLOAT64),
            ("imax", Ty::UINT64),
        ],
        &[zipf_ptr],
    )?;
    b.finish()
}

pub fn rand_v2() -> Result<Package> {
    let mut b = PackageBuilder::new("math/rand/v2", "rand");
    let ints = b.slice(Ty::INT);
    let swap = swap_fn(&mut b);

    b.func("Int", &[], &[Ty::INT])?;
    b.func("IntN", &[("n", Ty::INT)], &[Ty::INT])?;
    b.func("Int64", &[], &[Ty::INT64])?;
    b.func("Int64N", &[("n", Ty::INT64)], &[Ty::INT64])?;
    b.func("Uint32", &[], &[Ty::UINT32])?;
    b.func("Uint64", &[], &[Ty::UINT64])?;
    b.func("Float32", &[], &[Ty::FLOAT32])?;
    b.func("Float64", &[], &[Ty::FLOAT64])?;
    b.func("N", &[("n", Ty::INT)], &[Ty::INT])?;
    b.func("Shuffle", &[("n", Ty::INT), ("swap", swap)], &[])?;
    b.func("Int32", &[], &[Ty::INT32])?;
    b.func("Int32N", &[("n", Ty::INT32)], &[Ty::INT32])?;
    b.func("Uint", &[], &[Ty::UINT])?;
    b.func("UintN", &[("n", Ty::UINT)], &[Ty::UINT])?;
    b.func("Uint32N", &[("n", Ty::UINT32)], &[Ty::UINT32])?;
    b.func("Uint64N", &[("n", Ty::UINT64)], &[Ty::UINT64])?;
    b.func("ExpFloat64", &[], &[Ty::FLOAT64])?;
    b.func("NormFloat64", &[], &[Ty::FLOAT64])?;
    b.func("Perm", &[("n", Ty::INT)], &[ints])?;

    let bytes = b.bytes();
    let err = b.error();
    let uint64 = b.sig(&[], &[Ty::UINT64]);
    let iface = b.interface(&[("Uint64", uint64)])?;
    let source = b.named("Source", iface)?;

    let empty = b.struct_type(&[]);
    let rand = b.named("Rand", empty)?;
    let rand_ptr = b.recv_ptr(rand);
    b.func("New", &[("src", source)], &[rand_ptr])?;
    let generators: [(&str, &[(&str, Ty)], Ty); 17] = [
        ("Int", &[], Ty::INT),
        ("IntN", &[("n", Ty::INT)], Ty::INT),
        ("Int32", &[], Ty::INT32),
        ("Int32N", &[("n", Ty::INT32)], Ty::INT32),
        ("Int64", &[], Ty::INT64),
        ("Int64N", &[("n", Ty::INT64)], Ty::INT64),
        ("Uint", &[], Ty::UINT),
        ("UintN", &[("n", Ty::UINT)], Ty::UINT),
        ("Uint32", &[], Ty::UINT32),
        ("Uint32N", &[("n", Ty::UINT32)], Ty::UINT32),
        ("Uint64", &[], Ty::UINT64),
        ("Uint64N", &[("n", Ty::UINT64)], Ty::UINT64),
        ("Float32", &[], Ty::FLOAT32),
        ("Float64", &[], Ty::FLOAT64),
        ("ExpFloat64", &[], Ty::FLOAT64),
        ("NormFloat64", &[], Ty::FLOAT64),
        ("Perm", &[("n", Ty::INT)], ints),
    ];
    for &(name, params, result) in &generators {
        b.method(rand, Pointer, name, params, &[result])?;
    }
    b.method(rand, Pointer, "Shuffle", &[("n", Ty::INT), ("swap", swap)], &[])?;
    b.method(rand, Pointer, "N", &[("n", Ty::INT)], &[Ty::INT])?;

    let seed = b.array(Ty::BYTE, 32);
    let empty = b.struct_type(&[]);
    let chacha8 = b.named("ChaCha8", empty)?;
    let chacha8_ptr = b.recv_ptr(chacha8);
    b.func("NewChaCha8", &[("seed", seed)], &[chacha8_ptr])?;
    b.method(chacha8, Pointer, "Seed", &[("seed", seed)], &[])?;
    b.method(chacha8, Pointer, "Uint64", &[], &[Ty::UINT64])?;
    b.method(chacha8, Pointer, "MarshalBinary", &[], &[bytes, err])?;
    b.method(chacha8, Pointer, "UnmarshalBinary", &[("data", bytes)], &[err])?;
    b.method(chacha8, Pointer, "Read", &[("p", bytes)], &[Ty::INT, err])?;

    let empty = b.struct_type(&[]);
    let pcg = b.named("PCG", empty)?;
    let pcg_ptr = b.recv_ptr(pcg);
    b.func("NewPCG", &[("seed1", Ty::UINT64), ("seed2", Ty::UINT64)], &[pcg_ptr])?;
    b.method(pcg, Pointer, "Seed", &[("seed1", Ty::UINT64), ("seed2", Ty::UINT64)], &[])?;
    b.method(pcg, Pointer, "Uint64", &[], &[Ty::UINT64])?;
    b.method(pcg, Pointer, "MarshalBinary", &[], &[bytes, err])?;
    b.method(pcg, Pointer, "UnmarshalBinary", &[("data", bytes)], &[err])?;

    let empty = b.struct_type(&[]);
    let zipf = b.named("Zipf", empty)?;
    let zipf_ptr = b.recv_ptr(zipf);
    b.func(
        "NewZipf",
        &[
            ("r", rand_ptr),
            ("s", Ty::FLOAT64),
            ("v", Ty::FLOAT64),
            ("imax", Ty::UINT64),
        ],
        &[zipf_ptr],
    )?;
    b.method(zipf, Pointer, "Uint64", &[], &[Ty::UINT64])?;
    b.finish()
}

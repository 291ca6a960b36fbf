use zcash_payment_uri::{
    pct_enc::{encoder::Qchar, EStr, EString},
    ParamNameString, QcharError, QcharString,
};

const RAW: &str = "Use Coupon [ZEC4LIFE] to get a 20% discount on your next purchase!!";
const ENCODED: &str =
    "Use%20Coupon%20%5BZEC4LIFE%5D%20to%20get%20a%2020%25%20discount%20on%20your%20next%20purchase!!";

#[test]
fn encode_decode() {
    let s = QcharString::new(RAW).unwrap();
    assert_eq!(s.encoded(), ENCODED);
    assert_eq!(s.decoded(), RAW);
    assert_eq!(s.to_string(), ENCODED);

    let s = QcharString::from_encoded(ENCODED).unwrap();
    assert_eq!(s.decoded(), RAW);
    assert_eq!(s, QcharString::new(RAW).unwrap());
}

#[test]
fn allowed_characters_stay_unencoded() {
    let s = QcharString::new("sk8:forever@!").unwrap();
    assert_eq!(s.encoded(), "sk8:forever@!");

    let s = QcharString::new("a-b.c_d~e$f'g(h)i*j+k,l;m").unwrap();
    assert_eq!(s.encoded(), "a-b.c_d~e$f'g(h)i*j+k,l;m");
}

#[test]
fn delimiters_are_encoded() {
    let s = QcharString::new("a&b=c?d#e%f/g").unwrap();
    assert_eq!(s.encoded(), "a%26b%3Dc%3Fd%23e%25f%2Fg");
}

#[test]
fn non_ascii_is_utf8_encoded() {
    let s = QcharString::new("测试 ✨").unwrap();
    assert_eq!(s.encoded(), "%E6%B5%8B%E8%AF%95%20%E2%9C%A8");
    assert_eq!(s.decoded(), "测试 ✨");
}

#[test]
fn encoding_is_canonical() {
    let lower = QcharString::from_encoded("Thank%2cyou%21").unwrap();
    assert_eq!(lower.encoded(), "Thank,you!");
    assert_eq!(lower, QcharString::new("Thank,you!").unwrap());
}

#[test]
fn construction_errors() {
    assert_eq!(QcharString::new(""), Err(QcharError::Empty));
    assert_eq!(QcharString::from_encoded(""), Err(QcharError::Empty));
    assert_eq!(
        QcharString::from_encoded("a b"),
        Err(QcharError::InvalidEncoding)
    );
    assert_eq!(
        QcharString::from_encoded("50%"),
        Err(QcharError::InvalidEncoding)
    );
    assert_eq!(
        QcharString::from_encoded("%FF%FE"),
        Err(QcharError::InvalidEncoding)
    );
    assert_eq!(
        QcharString::new_strict("Thank%20you"),
        Err(QcharError::AlreadyEncoded)
    );
    assert_eq!(QcharString::new_strict("100%").unwrap().encoded(), "100%25");
}

#[test]
fn param_names() {
    for name in ["a", "amount", "req-foo", "x+y", "A1-b2"] {
        assert_eq!(ParamNameString::new(name).unwrap(), name);
    }
    assert_eq!(ParamNameString::new(""), Err(QcharError::Empty));
    for name in ["1a", "-a", "a.b", "a_b", "ä", "a b"] {
        assert_eq!(
            ParamNameString::new(name),
            Err(QcharError::InvalidParamName),
            "{name:?}"
        );
    }
}

#[test]
fn estr() {
    let s = EStr::<Qchar>::new("Thank%20you!").unwrap();
    assert_eq!(s.as_str(), "Thank%20you!");
    assert_eq!(s.decode().to_string().unwrap(), "Thank you!");
    assert_eq!(&*s.decode().to_bytes(), b"Thank you!");

    assert!(EStr::<Qchar>::new("%E6%B5").unwrap().decode().to_string().is_err());
    assert_eq!(
        EStr::<Qchar>::new("%E6%B5").unwrap().decode().to_string_lossy(),
        "\u{FFFD}"
    );
    assert!(EStr::<Qchar>::new("%zz").is_none());

    let mut buf = EString::<Qchar>::new();
    buf.encode_str("a b");
    buf.encode_str("+c");
    assert_eq!(buf, "a%20b+c");
    assert_eq!(buf.as_str(), "a%20b+c");
}

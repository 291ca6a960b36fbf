#![no_main]
use libfuzzer_sys::fuzz_target;
use zcash_payment_uri::{pct_enc::{encoder::Qchar, EStr}, QcharString};

fuzz_target!(|data: &str| {
    let Ok(s) = QcharString::new(data) else {
        assert!(data.is_empty());
        return;
    };

    assert!(EStr::<Qchar>::new(s.encoded()).is_some());
    assert_eq!(s.decoded(), data);
    assert_eq!(QcharString::from_encoded(s.encoded()), Ok(s));
});

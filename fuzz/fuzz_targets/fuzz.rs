#![no_main]
use journal_censor::{Banned, Censor};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let censor = Censor::default();
        let censored = censor.censor_and_analyze(text);

        let expected_len = censored
            .redactions
            .iter()
            .fold(text.chars().count() as isize, |n, r| n - (r.len as isize - 3));
        assert_eq!(censored.text.chars().count() as isize, expected_len);
        assert_eq!(censor.censor(&censored.text), censored.text);

        // Arbitrary token lists must still terminate.
        let banned = Banned::from_tokens(text.split(' ').take(4));
        let _ = Censor::new(&banned).censor(text);
    }
});

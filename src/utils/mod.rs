mod macros;

pub trait StrExt {
    fn split_exact<const N: usize>(&self, pat: &str) -> [Option<&str>; N];
}

impl StrExt for str {
    fn split_exact<const N: usize>(&self, pat: &str) -> [Option<&str>; N] {
        let mut split = self.splitn(N, pat);
        [(); N].map(|_| split.next())
    }
}

/// `true` iff `input` is entirely ascii digits and exactly `len` long.
///
/// The wall-clock parsers accept only zero-padded fields, so "9" is not a
/// valid hour field and "+1" is not a valid day field.
#[must_use]
pub fn is_padded_number(input: &str, len: usize) -> bool {
    input.len() == len && input.bytes().all(|byte| byte.is_ascii_digit())
}

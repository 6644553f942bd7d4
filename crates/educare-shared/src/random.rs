use rand::distributions::DistString as _;

/// Length used for random suffixes when the caller has no preference
pub const DEFAULT_RANDOM_LEN: usize = 16;

pub fn random_string(len: usize) -> String {
    rand::distributions::Alphanumeric.sample_string(&mut rand::thread_rng(), len)
}

pub fn random_string_def_len() -> String {
    random_string(DEFAULT_RANDOM_LEN)
}

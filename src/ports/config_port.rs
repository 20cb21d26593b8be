//! Configuration access port trait.

pub trait ConfigPort {
    /// `None` when the key is absent; callers decide whether that is fatal.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Missing or unparseable values fall back to `default`.
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}
